//! Document Provider Implementation using Tokio

use async_trait::async_trait;
use bridge_traits::{
    document::{DocumentRef, GrantMode},
    error::{BridgeError, Result},
    provider::{DocumentProvider, DocumentReader, DocumentWriter},
};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Tokio-based document provider for desktop hosts.
///
/// Treats references as filesystem paths (a `file://` prefix is accepted and
/// stripped). Desktop filesystems grant access through ordinary permissions,
/// so [`persist_grant`](DocumentProvider::persist_grant) records the request
/// and succeeds.
#[derive(Debug, Default)]
pub struct FsDocumentProvider;

impl FsDocumentProvider {
    pub fn new() -> Self {
        Self
    }

    fn document_path(document: &DocumentRef) -> PathBuf {
        let token = document.as_str();
        PathBuf::from(token.strip_prefix("file://").unwrap_or(token))
    }

    async fn create_uniquely_named(directory: &Path, file_name: &str) -> Result<Option<PathBuf>> {
        let (stem, extension) = match file_name.rsplit_once('.') {
            Some((stem, extension)) if !stem.is_empty() => (stem, Some(extension)),
            _ => (file_name, None),
        };

        // Mirrors system pickers, which unique colliding names rather than
        // overwrite: "doc.json", "doc (1).json", "doc (2).json", ...
        for attempt in 0..1000u32 {
            let candidate = if attempt == 0 {
                file_name.to_string()
            } else {
                match extension {
                    Some(extension) => format!("{stem} ({attempt}).{extension}"),
                    None => format!("{stem} ({attempt})"),
                }
            };

            let path = directory.join(candidate);
            match fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(_) => return Ok(Some(path)),
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
                Err(e) => return Err(BridgeError::Io(e)),
            }
        }

        Err(BridgeError::OperationFailed(format!(
            "no available name for {} in {}",
            file_name,
            directory.display()
        )))
    }
}

#[async_trait]
impl DocumentProvider for FsDocumentProvider {
    async fn open_read(&self, document: &DocumentRef) -> Result<Option<DocumentReader>> {
        let path = Self::document_path(document);
        match fs::File::open(&path).await {
            Ok(file) => {
                debug!(path = ?path, "Opened document for reading");
                Ok(Some(Box::new(file)))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(BridgeError::Io(e)),
        }
    }

    async fn open_write_truncate(&self, document: &DocumentRef) -> Result<Option<DocumentWriter>> {
        let path = Self::document_path(document);
        match fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)
            .await
        {
            Ok(file) => {
                debug!(path = ?path, "Opened document for writing");
                Ok(Some(Box::new(file)))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(BridgeError::Io(e)),
        }
    }

    async fn create_document(
        &self,
        directory: &DocumentRef,
        mime_type: &str,
        file_name: &str,
    ) -> Result<Option<DocumentRef>> {
        let directory = Self::document_path(directory);
        let created = Self::create_uniquely_named(&directory, file_name).await?;

        match created {
            Some(path) => {
                debug!(path = ?path, mime_type, "Created document in directory");
                Ok(Some(DocumentRef::new(path.display().to_string())))
            }
            None => Ok(None),
        }
    }

    async fn persist_grant(&self, document: &DocumentRef, grant: GrantMode) -> Result<()> {
        debug!(document = %document, grant = ?grant, "Recorded access grant");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use uuid::Uuid;

    fn scratch_dir() -> PathBuf {
        let dir = env::temp_dir().join(format!("bridge-desktop-test-{}", Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[tokio::test]
    async fn test_write_then_read_streams() {
        let dir = scratch_dir();
        let provider = FsDocumentProvider::new();
        let document = DocumentRef::new(dir.join("notes.txt").display().to_string());

        let mut sink = provider
            .open_write_truncate(&document)
            .await
            .unwrap()
            .expect("writable stream");
        sink.write_all(b"hello\nworld").await.unwrap();
        sink.flush().await.unwrap();
        sink.shutdown().await.unwrap();

        let mut source = provider
            .open_read(&document)
            .await
            .unwrap()
            .expect("readable stream");
        let mut content = String::new();
        source.read_to_string(&mut content).await.unwrap();
        assert_eq!(content, "hello\nworld");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_open_read_missing_document_yields_none() {
        let dir = scratch_dir();
        let provider = FsDocumentProvider::new();
        let document = DocumentRef::new(dir.join("absent.txt").display().to_string());

        assert!(provider.open_read(&document).await.unwrap().is_none());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_file_scheme_prefix_is_accepted() {
        let dir = scratch_dir();
        let path = dir.join("scheme.txt");
        std::fs::write(&path, "prefixed").unwrap();

        let provider = FsDocumentProvider::new();
        let document = DocumentRef::new(format!("file://{}", path.display()));
        let mut source = provider
            .open_read(&document)
            .await
            .unwrap()
            .expect("readable stream");
        let mut content = String::new();
        source.read_to_string(&mut content).await.unwrap();
        assert_eq!(content, "prefixed");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_create_document_uniques_colliding_names() {
        let dir = scratch_dir();
        let provider = FsDocumentProvider::new();
        let directory = DocumentRef::new(dir.display().to_string());

        let first = provider
            .create_document(&directory, "application/json", "export.json")
            .await
            .unwrap()
            .expect("first document");
        let second = provider
            .create_document(&directory, "application/json", "export.json")
            .await
            .unwrap()
            .expect("second document");

        assert!(first.as_str().ends_with("export.json"));
        assert!(second.as_str().ends_with("export (1).json"));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_create_document_in_missing_directory_yields_none() {
        let dir = scratch_dir();
        let provider = FsDocumentProvider::new();
        let directory = DocumentRef::new(dir.join("nowhere").display().to_string());

        let created = provider
            .create_document(&directory, "text/plain", "doc.txt")
            .await
            .unwrap();
        assert!(created.is_none());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_persist_grant_is_a_recorded_no_op() {
        let provider = FsDocumentProvider::new();
        let document = DocumentRef::new("/tmp/anything");
        provider
            .persist_grant(&document, GrantMode::ReadWrite)
            .await
            .unwrap();
    }
}
