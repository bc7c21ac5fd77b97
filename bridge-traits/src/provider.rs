//! Document Provider Abstractions
//!
//! Byte-level access to documents named by opaque references: the
//! content-resolver seam of the bridge.

use async_trait::async_trait;

use crate::document::{DocumentRef, GrantMode};
use crate::error::Result;

/// Boxed async byte source over a document.
pub type DocumentReader = Box<dyn tokio::io::AsyncRead + Send + Unpin>;

/// Boxed async byte sink over a document.
pub type DocumentWriter = Box<dyn tokio::io::AsyncWrite + Send + Unpin>;

/// Byte-level document access over opaque references.
///
/// Abstracts the host content layer:
/// - Android-style hosts: content-resolver streams over picker-issued URIs
/// - Desktop: direct filesystem access
///
/// The `open_*` and `create_document` operations return `Ok(None)` when the
/// host resolves the reference but yields no stream or document, mirroring
/// the nullable results of host content APIs. Hard failures surface as
/// errors.
///
/// # Example
///
/// ```ignore
/// use bridge_traits::provider::DocumentProvider;
/// use bridge_traits::document::DocumentRef;
/// use tokio::io::AsyncReadExt;
///
/// async fn slurp(provider: &dyn DocumentProvider, doc: &DocumentRef) -> Option<Vec<u8>> {
///     let mut source = provider.open_read(doc).await.ok()??;
///     let mut bytes = Vec::new();
///     source.read_to_end(&mut bytes).await.ok()?;
///     Some(bytes)
/// }
/// ```
#[async_trait]
pub trait DocumentProvider: Send + Sync {
    /// Open a byte source over `document`.
    async fn open_read(&self, document: &DocumentRef) -> Result<Option<DocumentReader>>;

    /// Open a truncating byte sink over `document`.
    async fn open_write_truncate(&self, document: &DocumentRef) -> Result<Option<DocumentWriter>>;

    /// Create a new document named `file_name` of `mime_type` inside the
    /// directory named by `directory`.
    async fn create_document(
        &self,
        directory: &DocumentRef,
        mime_type: &str,
        file_name: &str,
    ) -> Result<Option<DocumentRef>>;

    /// Durably persist `grant` on `document` so access survives process
    /// restarts.
    async fn persist_grant(&self, document: &DocumentRef, grant: GrantMode) -> Result<()>;
}
