//! # Host Bridge Traits
//!
//! Platform abstraction traits that must be implemented by each host platform.
//!
//! ## Overview
//!
//! This crate defines the contract between the storage channel and the
//! platform-specific host shell. Each trait represents a capability the
//! channel requires but that must be implemented differently per platform
//! (Android-style mobile shells, desktop shells, tests).
//!
//! ## Traits
//!
//! - [`DocumentPicker`](picker::DocumentPicker) - System chooser dialogs;
//!   launching returns a [`PendingPick`](picker::PendingPick) handle the host
//!   resolves with a typed outcome
//! - [`DocumentProvider`](provider::DocumentProvider) - Byte-level streams,
//!   document creation, and durable access grants over opaque references
//! - [`HostLogger`](log::HostLogger) - Forward structured logs to the host
//!   logging pipeline
//!
//! ## Error Handling
//!
//! All bridge traits use the [`BridgeError`](error::BridgeError) type.
//! Platform implementations should convert host-specific errors to
//! `BridgeError` and provide actionable messages.
//!
//! ## Thread Safety
//!
//! All bridge traits require `Send + Sync` bounds to support safe concurrent
//! usage across async tasks.

pub mod document;
pub mod error;
pub mod log;
pub mod picker;
pub mod provider;

pub use error::BridgeError;

// Re-export commonly used types
pub use document::{DocumentRef, GrantMode};
pub use log::{ConsoleLogger, HostLogger, LogEntry, LogLevel};
pub use picker::{
    DocumentPicker, PendingPick, PickResolver, PickerMode, PickerOutcome, PickerRequest,
};
pub use provider::{DocumentProvider, DocumentReader, DocumentWriter};
