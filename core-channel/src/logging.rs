//! # Logging & Tracing Infrastructure
//!
//! Provides structured logging with the `tracing` crate, supporting:
//! - Pretty, JSON, and compact output formats
//! - Module-level filtering via `EnvFilter`
//! - Mirroring filtered events into the host shell's log pipeline through
//!   the [`HostLogger`] sink
//!
//! ## Overview
//!
//! This module configures the `tracing-subscriber` infrastructure. When a
//! host sink is configured, every event that survives filtering is mirrored
//! to the host logger while still flowing through the standard `tracing`
//! layers, so channel activity shows up in the shell's own logs
//! (Logcat/OSLog analogs).
//!
//! ## Usage
//!
//! ```ignore
//! use core_channel::logging::{init_logging, LogFormat, LoggingConfig};
//! use bridge_traits::log::ConsoleLogger;
//! use std::sync::Arc;
//!
//! let config = LoggingConfig::default()
//!     .with_format(LogFormat::Compact)
//!     .with_host_logger(Arc::new(ConsoleLogger::default()));
//! init_logging(config).expect("Failed to initialize logging");
//!
//! tracing::info!("storage channel ready");
//! ```

use std::collections::HashMap;
use std::fmt;
use std::io;
use std::sync::Arc;

use bridge_traits::log::{HostLogger, LogEntry, LogLevel};
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::{
    filter::EnvFilter,
    layer::{Context, SubscriberExt},
    registry::LookupSpan,
    util::SubscriberInitExt,
    Layer,
};

use crate::config::ConfigError;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable pretty format with colors
    Pretty,
    /// Structured JSON format for machine parsing
    Json,
    /// Compact format for production
    Compact,
}

impl Default for LogFormat {
    fn default() -> Self {
        #[cfg(debug_assertions)]
        return Self::Pretty;

        #[cfg(not(debug_assertions))]
        return Self::Json;
    }
}

/// Logging configuration
#[derive(Clone)]
pub struct LoggingConfig {
    /// Output format
    pub format: LogFormat,
    /// Minimum log level
    pub level: LogLevel,
    /// Custom filter string (e.g., "core_channel=debug,bridge_desktop=trace")
    pub filter: Option<String>,
    /// Optional sink for mirroring logs into the host pipeline
    pub host_logger: Option<Arc<dyn HostLogger>>,
    /// Display target module in logs
    pub display_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            level: LogLevel::Info,
            filter: None,
            host_logger: None,
            display_target: true,
        }
    }
}

impl LoggingConfig {
    /// Set log format
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Set minimum log level
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// Set custom filter string
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Set the host logger sink
    pub fn with_host_logger(mut self, sink: Arc<dyn HostLogger>) -> Self {
        self.host_logger = Some(sink);
        self
    }

    /// Enable or disable target display
    pub fn with_target(mut self, display: bool) -> Self {
        self.display_target = display;
        self
    }
}

/// Initialize the logging system
///
/// This should be called once during application startup. Subsequent calls
/// will return an error.
pub fn init_logging(config: LoggingConfig) -> Result<(), ConfigError> {
    let filter = build_filter(&config)?;

    match config.format {
        LogFormat::Pretty => init_pretty_logging(config, filter),
        LogFormat::Json => init_json_logging(config, filter),
        LogFormat::Compact => init_compact_logging(config, filter),
    }
}

fn build_filter(config: &LoggingConfig) -> Result<EnvFilter, ConfigError> {
    let base_level = match config.level {
        LogLevel::Trace => "trace",
        LogLevel::Debug => "debug",
        LogLevel::Info => "info",
        LogLevel::Warn => "warn",
        LogLevel::Error => "error",
    };

    let filter_string = if let Some(custom_filter) = &config.filter {
        custom_filter.clone()
    } else {
        format!(
            "core_channel={0},bridge_traits={0},bridge_desktop={0}",
            base_level
        )
    };

    EnvFilter::try_new(filter_string)
        .map_err(|e| ConfigError::Config(format!("Invalid log filter: {}", e)))
}

fn init_pretty_logging(config: LoggingConfig, filter: EnvFilter) -> Result<(), ConfigError> {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .pretty()
        .with_target(config.display_target)
        .with_writer(io::stdout);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .with(HostLoggerLayer::new(config.host_logger))
        .try_init()
        .map_err(|e| ConfigError::Config(format!("Failed to initialize logging: {}", e)))
}

fn init_json_logging(config: LoggingConfig, filter: EnvFilter) -> Result<(), ConfigError> {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .json()
        .flatten_event(true)
        .with_target(config.display_target)
        .with_writer(io::stdout);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .with(HostLoggerLayer::new(config.host_logger))
        .try_init()
        .map_err(|e| ConfigError::Config(format!("Failed to initialize logging: {}", e)))
}

fn init_compact_logging(config: LoggingConfig, filter: EnvFilter) -> Result<(), ConfigError> {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_target(config.display_target)
        .with_writer(io::stdout);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .with(HostLoggerLayer::new(config.host_logger))
        .try_init()
        .map_err(|e| ConfigError::Config(format!("Failed to initialize logging: {}", e)))
}

/// Layer that mirrors events into a `HostLogger` implementation.
struct HostLoggerLayer {
    sink: Option<Arc<dyn HostLogger>>,
}

impl HostLoggerLayer {
    fn new(sink: Option<Arc<dyn HostLogger>>) -> Self {
        Self { sink }
    }
}

impl<S> Layer<S> for HostLoggerLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
        let Some(sink) = self.sink.as_ref() else {
            return;
        };

        let metadata = event.metadata();
        let level = tracing_level_to_log_level(*metadata.level());

        if level < sink.min_level() {
            return;
        }

        let mut visitor = SinkVisitor::default();
        event.record(&mut visitor);

        let message = visitor
            .message
            .unwrap_or_else(|| metadata.name().to_string());

        let mut entry = LogEntry::new(level, metadata.target(), message);

        for (key, value) in visitor.fields {
            entry = entry.with_field(key, value);
        }

        if let Some(span) = ctx.lookup_current() {
            entry = entry.with_span(span.name());
        }

        sink.log(entry);
    }
}

#[derive(Default)]
struct SinkVisitor {
    message: Option<String>,
    fields: HashMap<String, String>,
}

impl SinkVisitor {
    fn record_value(&mut self, field: &Field, value: String) {
        if field.name() == "message" {
            self.message = Some(value);
        } else {
            self.fields.insert(field.name().to_string(), value);
        }
    }
}

impl Visit for SinkVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.record_value(field, value.to_string());
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_value(field, value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.record_value(field, value.to_string());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.record_value(field, value.to_string());
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.record_value(field, value.to_string());
    }

    fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
        self.record_value(field, value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.record_value(field, format!("{:?}", value));
    }
}

fn tracing_level_to_log_level(level: tracing::Level) -> LogLevel {
    match level {
        tracing::Level::TRACE => LogLevel::Trace,
        tracing::Level::DEBUG => LogLevel::Debug,
        tracing::Level::INFO => LogLevel::Info,
        tracing::Level::WARN => LogLevel::Warn,
        tracing::Level::ERROR => LogLevel::Error,
    }
}
