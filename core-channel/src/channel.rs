//! The Request Correlator
//!
//! [`StorageChannel`] owns the single pending-request slot and drives every
//! operation from inbound call to terminal reply: synchronous operations
//! complete inline, picker-backed operations launch the host dialog and park
//! on the pending handle until the host resolves it. The slot is claimed on
//! entry and released on every exit path, so no outcome can leave the
//! channel stuck or reply twice.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use bridge_traits::{
    document::{DocumentRef, GrantMode},
    picker::{DocumentPicker, PickerOutcome, PickerRequest},
    provider::DocumentProvider,
};
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, warn};

use crate::error::{ChannelError, ErrorReply, Result};
use crate::request::{ReplyValue, StorageRequest, WILDCARD_MIME_TYPE};

/// Correlates inbound storage operations with host picker dialogs and
/// provider streams.
///
/// At most one request is in flight at any time: a dispatch that finds the
/// slot occupied is rejected with [`ChannelError::RequestInFlight`] rather
/// than displacing the pending caller.
pub struct StorageChannel {
    picker: Arc<dyn DocumentPicker>,
    provider: Arc<dyn DocumentProvider>,
    pending: Mutex<Option<&'static str>>,
}

impl StorageChannel {
    pub fn new(picker: Arc<dyn DocumentPicker>, provider: Arc<dyn DocumentProvider>) -> Self {
        Self {
            picker,
            provider,
            pending: Mutex::new(None),
        }
    }

    /// Operation currently holding the pending slot, if any.
    pub fn pending_operation(&self) -> Option<&'static str> {
        *self.slot()
    }

    /// Serve one raw transport call: decode the named operation, dispatch
    /// it, and shape failures into the transport envelope.
    pub async fn handle_call(
        &self,
        method: &str,
        args: &Value,
    ) -> std::result::Result<ReplyValue, ErrorReply> {
        let request = StorageRequest::from_call(method, args).map_err(ChannelError::into_reply)?;
        self.dispatch(request)
            .await
            .map_err(ChannelError::into_reply)
    }

    /// Serve one typed operation to its terminal reply.
    pub async fn dispatch(&self, request: StorageRequest) -> Result<ReplyValue> {
        let _pending = self.claim(request.name())?;
        debug!(operation = request.name(), "Dispatching storage request");

        match request {
            StorageRequest::OpenDocumentForRead { mime_types } => {
                self.open_document_for_read(mime_types).await
            }
            StorageRequest::CreateDocumentForWrite {
                file_name,
                mime_type,
            } => self.create_document_for_write(file_name, mime_type).await,
            StorageRequest::SelectExportDirectory => self.select_export_directory().await,
            StorageRequest::CreateFileInDirectory {
                directory_uri,
                file_name,
                mime_type,
            } => {
                self.create_file_in_directory(directory_uri, file_name, mime_type)
                    .await
            }
            StorageRequest::WriteToUri { uri, content } => self.write_to_uri(uri, content).await,
            StorageRequest::ReadFromUri { uri } => {
                self.read_document(&DocumentRef::new(uri)).await
            }
            StorageRequest::CheckPermission | StorageRequest::RequestPermission => {
                // Picker-granted access needs no ahead-of-time permission.
                Ok(ReplyValue::Bool(true))
            }
        }
    }

    async fn open_document_for_read(&self, mime_types: Vec<String>) -> Result<ReplyValue> {
        let request = match mime_types.as_slice() {
            [single] => PickerRequest::open_document(single.clone()),
            _ => PickerRequest::open_document(WILDCARD_MIME_TYPE).with_mime_filters(mime_types),
        };

        let outcome = self.run_picker(request, "file picker").await?;
        let reference = require_reference(
            outcome,
            "File selection canceled for read",
            "No URI returned from file picker for read",
        )?;

        self.take_grant(&reference, GrantMode::Read).await?;
        self.read_document(&reference).await
    }

    async fn create_document_for_write(
        &self,
        file_name: String,
        mime_type: String,
    ) -> Result<ReplyValue> {
        let request = PickerRequest::create_document(file_name, mime_type);

        let outcome = self.run_picker(request, "file saver").await?;
        let reference = require_reference(
            outcome,
            "File creation canceled",
            "No URI returned from file saver",
        )?;

        self.take_grant(&reference, GrantMode::Write).await?;
        Ok(ReplyValue::Text(reference.to_string()))
    }

    async fn select_export_directory(&self) -> Result<ReplyValue> {
        let outcome = self
            .run_picker(PickerRequest::open_document_tree(), "directory picker")
            .await?;
        let reference = require_reference(
            outcome,
            "Directory selection canceled",
            "No directory URI returned from picker",
        )?;

        self.take_grant(&reference, GrantMode::ReadWrite).await?;
        Ok(ReplyValue::Text(reference.to_string()))
    }

    async fn create_file_in_directory(
        &self,
        directory_uri: String,
        file_name: String,
        mime_type: String,
    ) -> Result<ReplyValue> {
        let directory = DocumentRef::new(directory_uri);

        match self
            .provider
            .create_document(&directory, &mime_type, &file_name)
            .await
        {
            Ok(Some(reference)) => {
                debug!(directory = %directory, reference = %reference, "Created document");
                Ok(ReplyValue::Text(reference.to_string()))
            }
            Ok(None) => Err(ChannelError::Create(
                "Failed to create document in directory".to_string(),
            )),
            Err(e) => {
                warn!(directory = %directory, error = %e, "Error creating file in directory");
                Err(ChannelError::Create(format!("Error creating file: {e}")))
            }
        }
    }

    async fn write_to_uri(&self, uri: String, content: String) -> Result<ReplyValue> {
        let document = DocumentRef::new(uri);

        let mut sink = match self.provider.open_write_truncate(&document).await {
            Ok(Some(sink)) => sink,
            Ok(None) => {
                return Err(ChannelError::Write(format!(
                    "Could not open output stream for URI: {document}"
                )))
            }
            Err(e) => return Err(write_failure(&document, e)),
        };

        let written = async {
            sink.write_all(content.as_bytes()).await?;
            sink.flush().await?;
            sink.shutdown().await
        }
        .await;
        if let Err(e) = written {
            return Err(write_failure(&document, e));
        }

        debug!(document = %document, bytes = content.len(), "Wrote document");
        Ok(ReplyValue::Bool(true))
    }

    /// Read `document` and normalize its content to single `\n` separators
    /// with no trailing newline. Shared by `read_from_uri` and the
    /// continuation of a confirmed open-for-read pick.
    async fn read_document(&self, document: &DocumentRef) -> Result<ReplyValue> {
        let source = match self.provider.open_read(document).await {
            Ok(Some(source)) => source,
            Ok(None) => {
                return Err(ChannelError::Read(format!(
                    "Could not open input stream for URI: {document}"
                )))
            }
            Err(e) => return Err(read_failure(document, e)),
        };

        let mut lines = BufReader::new(source).lines();
        let mut content = Vec::new();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => content.push(line),
                Ok(None) => break,
                Err(e) => return Err(read_failure(document, e)),
            }
        }

        debug!(document = %document, lines = content.len(), "Read document");
        Ok(ReplyValue::Text(content.join("\n")))
    }

    async fn run_picker(&self, request: PickerRequest, dialog: &str) -> Result<PickerOutcome> {
        let pending = self.picker.launch(request).map_err(|e| {
            warn!(dialog, error = %e, "Failed to launch picker");
            ChannelError::Intent(format!("Error launching {dialog}: {e}"))
        })?;

        debug!(dialog, "Picker launched; waiting for outcome");
        Ok(pending.wait().await)
    }

    async fn take_grant(&self, reference: &DocumentRef, grant: GrantMode) -> Result<()> {
        let label = match grant {
            GrantMode::Read => "read",
            GrantMode::Write => "write",
            GrantMode::ReadWrite => "read+write",
        };

        self.provider
            .persist_grant(reference, grant)
            .await
            .map_err(|e| {
                warn!(reference = %reference, error = %e, "Failed to persist access grant");
                ChannelError::PermissionDenied(format!("Failed to persist {label} grant"))
            })
    }

    fn claim(&self, operation: &'static str) -> Result<PendingGuard<'_>> {
        let mut slot = self.slot();
        if let Some(in_flight) = *slot {
            warn!(operation, in_flight, "Rejecting request while another is in flight");
            return Err(ChannelError::RequestInFlight(format!(
                "operation {in_flight} has not completed"
            )));
        }

        *slot = Some(operation);
        Ok(PendingGuard {
            slot: &self.pending,
        })
    }

    fn slot(&self) -> MutexGuard<'_, Option<&'static str>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Releases the pending slot when the dispatch that claimed it exits, on
/// every path out of the call.
struct PendingGuard<'a> {
    slot: &'a Mutex<Option<&'static str>>,
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

fn require_reference(
    outcome: PickerOutcome,
    canceled: &str,
    missing: &str,
) -> Result<DocumentRef> {
    match outcome {
        PickerOutcome::Canceled => Err(ChannelError::UserCanceled(canceled.to_string())),
        PickerOutcome::Confirmed { reference: None } => {
            Err(ChannelError::NoUriReturned(missing.to_string()))
        }
        PickerOutcome::Confirmed {
            reference: Some(reference),
        } => Ok(reference),
    }
}

fn read_failure(document: &DocumentRef, err: impl std::fmt::Display) -> ChannelError {
    warn!(document = %document, error = %err, "Error reading from document");
    ChannelError::Read(format!("Error reading file: {err}"))
}

fn write_failure(document: &DocumentRef, err: impl std::fmt::Display) -> ChannelError {
    warn!(document = %document, error = %err, "Error writing to document");
    ChannelError::Write(format!("Error writing file: {err}"))
}
