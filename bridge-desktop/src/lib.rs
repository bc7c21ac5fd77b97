//! # Desktop Bridge Implementations
//!
//! Default implementations of bridge traits for desktop platforms
//! (macOS, Windows, Linux).
//!
//! ## Overview
//!
//! This crate provides desktop-ready implementations of the storage bridge
//! traits:
//! - `DocumentProvider` using `tokio::fs` over plain paths
//! - `DocumentPicker` as plumbing between the channel and the embedding
//!   shell's own chooser dialogs
//!
//! ## Usage
//!
//! ```ignore
//! use bridge_desktop::{FsDocumentProvider, HostedPicker};
//!
//! let provider = FsDocumentProvider::new();
//! let (picker, events) = HostedPicker::new();
//! // hand `picker` and `provider` to the channel configuration and drain
//! // `events` from the shell's dialog layer
//! ```

mod filesystem;
mod picker;

pub use filesystem::FsDocumentProvider;
pub use picker::{HostedPicker, PickerEvent};
