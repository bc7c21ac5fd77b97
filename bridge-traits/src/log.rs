//! Host Logging Abstractions
//!
//! Provides a sink for forwarding structured log records to the host
//! shell's logging pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

/// Structured log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    /// Log level
    pub level: LogLevel,
    /// Timestamp
    pub timestamp: DateTime<Utc>,
    /// Target module/component
    pub target: String,
    /// Log message
    pub message: String,
    /// Structured fields
    pub fields: HashMap<String, String>,
    /// Enclosing span name, when the event fired inside one
    pub span: Option<String>,
}

impl LogEntry {
    pub fn new(level: LogLevel, target: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level,
            timestamp: Utc::now(),
            target: target.into(),
            message: message.into(),
            fields: HashMap::new(),
            span: None,
        }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn with_span(mut self, span: impl Into<String>) -> Self {
        self.span = Some(span.into());
        self
    }
}

/// Host logger sink
///
/// Forwards structured logs from the bridge to the host logging pipeline:
/// - **Android-style hosts**: Logcat
/// - **iOS-style hosts**: OSLog
/// - **Desktop**: console, file logs, or system logging
///
/// Calls are synchronous: the host pipelines this bridge targets accept
/// records without awaiting. Implementations should never log picked file
/// content; reference tokens belong at debug level only.
pub trait HostLogger: Send + Sync {
    /// Forward a log entry to the host logging system.
    fn log(&self, entry: LogEntry);

    /// Minimum level this sink will process.
    ///
    /// Records below this level can be filtered out at the source.
    fn min_level(&self) -> LogLevel {
        LogLevel::Info
    }
}

/// Console logger implementation for testing/development
#[derive(Debug, Clone)]
pub struct ConsoleLogger {
    pub min_level: LogLevel,
}

impl Default for ConsoleLogger {
    fn default() -> Self {
        Self {
            min_level: LogLevel::Info,
        }
    }
}

impl HostLogger for ConsoleLogger {
    fn log(&self, entry: LogEntry) {
        if entry.level < self.min_level {
            return;
        }

        let level_str = match entry.level {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        };

        println!(
            "[{}] {} {}: {}",
            entry.timestamp.format("%Y-%m-%d %H:%M:%S%.3f"),
            level_str,
            entry.target,
            entry.message
        );

        if !entry.fields.is_empty() {
            println!("  Fields: {:?}", entry.fields);
        }
    }

    fn min_level(&self) -> LogLevel {
        self.min_level
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_entry_builder() {
        let entry = LogEntry::new(LogLevel::Info, "test", "Test message")
            .with_field("operation", "read_from_uri")
            .with_span("dispatch");

        assert_eq!(entry.level, LogLevel::Info);
        assert_eq!(entry.target, "test");
        assert_eq!(entry.message, "Test message");
        assert_eq!(
            entry.fields.get("operation"),
            Some(&"read_from_uri".to_string())
        );
        assert_eq!(entry.span, Some("dispatch".to_string()));
    }

    #[test]
    fn test_console_logger_filters_by_level() {
        let logger = ConsoleLogger::default();
        assert_eq!(logger.min_level(), LogLevel::Info);

        // Below-threshold entries are dropped without printing.
        logger.log(LogEntry::new(LogLevel::Trace, "test", "dropped"));
        logger.log(LogEntry::new(LogLevel::Warn, "test", "printed"));
    }
}
