//! # Channel Configuration
//!
//! Builder that assembles the bridge implementations the storage channel
//! requires, with fail-fast validation and actionable messages when a
//! capability is missing.
//!
//! The picker is always host-injected: only the embedding shell knows how to
//! present chooser dialogs. The provider defaults to the desktop adapter
//! when the `desktop-shims` feature is enabled.
//!
//! ## Usage
//!
//! ```ignore
//! use core_channel::config::ChannelConfig;
//! use std::sync::Arc;
//!
//! let channel = ChannelConfig::builder()
//!     .picker(Arc::new(my_picker))
//!     .build()?
//!     .into_channel();
//! ```

use std::sync::Arc;

use bridge_traits::{picker::DocumentPicker, provider::DocumentProvider};
use thiserror::Error;

use crate::channel::StorageChannel;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Capability missing: {capability} - {message}")]
    CapabilityMissing { capability: String, message: String },
}

/// Assembled channel dependencies.
#[derive(Clone)]
pub struct ChannelConfig {
    pub picker: Arc<dyn DocumentPicker>,
    pub provider: Arc<dyn DocumentProvider>,
}

impl std::fmt::Debug for ChannelConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChannelConfig")
            .field("picker", &"DocumentPicker { ... }")
            .field("provider", &"DocumentProvider { ... }")
            .finish()
    }
}

impl ChannelConfig {
    /// Creates a new builder for constructing a `ChannelConfig`.
    pub fn builder() -> ChannelConfigBuilder {
        ChannelConfigBuilder::default()
    }

    /// Wire the configured bridges into a channel.
    pub fn into_channel(self) -> StorageChannel {
        StorageChannel::new(self.picker, self.provider)
    }
}

/// Builder for [`ChannelConfig`] instances.
#[derive(Default)]
pub struct ChannelConfigBuilder {
    picker: Option<Arc<dyn DocumentPicker>>,
    provider: Option<Arc<dyn DocumentProvider>>,
}

impl ChannelConfigBuilder {
    /// Sets the picker implementation (required).
    pub fn picker(mut self, picker: Arc<dyn DocumentPicker>) -> Self {
        self.picker = Some(picker);
        self
    }

    /// Sets the provider implementation.
    ///
    /// If not provided, the desktop default (`tokio::fs`-based) is used when
    /// the `desktop-shims` feature is enabled.
    pub fn provider(mut self, provider: Arc<dyn DocumentProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Builds the final `ChannelConfig`, validating that every required
    /// capability is available.
    pub fn build(self) -> Result<ChannelConfig, ConfigError> {
        let picker = self.picker.ok_or_else(picker_missing_error)?;

        let provider = match self.provider {
            Some(provider) => provider,
            None => provide_default_provider()?,
        };

        Ok(ChannelConfig { picker, provider })
    }
}

fn picker_missing_error() -> ConfigError {
    ConfigError::CapabilityMissing {
        capability: "DocumentPicker".to_string(),
        message: "No picker implementation provided. \
                 Desktop: wire a HostedPicker event stream into the shell dialog layer. \
                 Mobile: inject the platform document-picker adapter."
            .to_string(),
    }
}

#[cfg(feature = "desktop-shims")]
fn provide_default_provider() -> Result<Arc<dyn DocumentProvider>, ConfigError> {
    use bridge_desktop::FsDocumentProvider;

    let provider: Arc<dyn DocumentProvider> = Arc::new(FsDocumentProvider::new());
    Ok(provider)
}

#[cfg(not(feature = "desktop-shims"))]
fn provide_default_provider() -> Result<Arc<dyn DocumentProvider>, ConfigError> {
    Err(ConfigError::CapabilityMissing {
        capability: "DocumentProvider".to_string(),
        message: "DocumentProvider implementation is required for document access. \
                 Desktop: enable the 'desktop-shims' feature to use the default FsDocumentProvider. \
                 Mobile: inject the platform content-resolver adapter."
            .to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bridge_traits::{
        document::{DocumentRef, GrantMode},
        error::Result as BridgeResult,
        picker::{PendingPick, PickerRequest},
        provider::{DocumentReader, DocumentWriter},
    };

    struct StubPicker;

    impl DocumentPicker for StubPicker {
        fn launch(&self, _request: PickerRequest) -> BridgeResult<PendingPick> {
            let (_resolver, pending) = PendingPick::channel();
            Ok(pending)
        }
    }

    struct StubProvider;

    #[async_trait]
    impl DocumentProvider for StubProvider {
        async fn open_read(&self, _document: &DocumentRef) -> BridgeResult<Option<DocumentReader>> {
            Ok(None)
        }

        async fn open_write_truncate(
            &self,
            _document: &DocumentRef,
        ) -> BridgeResult<Option<DocumentWriter>> {
            Ok(None)
        }

        async fn create_document(
            &self,
            _directory: &DocumentRef,
            _mime_type: &str,
            _file_name: &str,
        ) -> BridgeResult<Option<DocumentRef>> {
            Ok(None)
        }

        async fn persist_grant(
            &self,
            _document: &DocumentRef,
            _grant: GrantMode,
        ) -> BridgeResult<()> {
            Ok(())
        }
    }

    #[test]
    fn test_builder_requires_picker() {
        let result = ChannelConfig::builder()
            .provider(Arc::new(StubProvider))
            .build();

        assert!(result.is_err());
        let err_msg = result.unwrap_err().to_string();
        assert!(err_msg.contains("DocumentPicker"));
        assert!(err_msg.contains("No picker implementation provided"));
    }

    #[test]
    fn test_builder_with_explicit_bridges() {
        let config = ChannelConfig::builder()
            .picker(Arc::new(StubPicker))
            .provider(Arc::new(StubProvider))
            .build()
            .unwrap();

        let _channel = config.into_channel();
    }

    #[cfg(feature = "desktop-shims")]
    #[test]
    fn test_build_with_desktop_default_provider() {
        let config = ChannelConfig::builder()
            .picker(Arc::new(StubPicker))
            .build()
            .expect("desktop default provider should be injected");

        let _channel = config.into_channel();
    }

    #[cfg(not(feature = "desktop-shims"))]
    #[test]
    fn test_builder_requires_provider_without_desktop_shims() {
        let result = ChannelConfig::builder().picker(Arc::new(StubPicker)).build();

        assert!(result.is_err());
        let err_msg = result.unwrap_err().to_string();
        assert!(err_msg.contains("DocumentProvider"));
        assert!(err_msg.contains("desktop-shims"));
    }
}
