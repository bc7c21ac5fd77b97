//! # Storage Channel Core
//!
//! The request correlator between a cross-platform application shell and the
//! host platform's document-storage facilities.
//!
//! ## Overview
//!
//! The shell sends named operations with arguments over a message-passing
//! channel; the channel translates each into a host picker invocation or a
//! direct document operation, awaits the asynchronous outcome where one
//! exists, and translates every terminal outcome back into exactly one
//! success value or categorized error.
//!
//! The stateful heart is a single pending-request slot: one request may be
//! parked on a picker dialog at a time, and the slot is cleared on every
//! exit path, synchronous or asynchronous. See [`StorageChannel`].
//!
//! ## Modules
//!
//! - [`channel`] - The correlator: dispatch, picker correlation, stream flows
//! - [`request`] - Typed operation requests checked at the call boundary
//! - [`error`] - Reply error kinds and the transport error envelope
//! - [`config`] - Builder wiring host bridges into a channel
//! - [`logging`] - `tracing` setup with host log mirroring
//!
//! ## Usage
//!
//! ```ignore
//! use core_channel::{config::ChannelConfig, request::StorageRequest};
//! use std::sync::Arc;
//!
//! # async fn example(picker: Arc<dyn bridge_traits::DocumentPicker>) {
//! let channel = ChannelConfig::builder()
//!     .picker(picker)
//!     .build()
//!     .expect("channel bridges")
//!     .into_channel();
//!
//! let reply = channel
//!     .handle_call("read_from_uri", &serde_json::json!({ "uri": "file:///tmp/notes" }))
//!     .await;
//! # }
//! ```

pub mod channel;
pub mod config;
pub mod error;
pub mod logging;
pub mod request;

pub use channel::StorageChannel;
pub use config::{ChannelConfig, ChannelConfigBuilder, ConfigError};
pub use error::{ChannelError, ErrorReply, Result};
pub use request::{ReplyValue, StorageRequest};
