//! Document Picker Abstractions
//!
//! Models the host system's document chooser dialogs. Launching a dialog
//! returns a [`PendingPick`] handle; the host resolves the paired
//! [`PickResolver`] with a typed [`PickerOutcome`] once the user finishes
//! with the dialog.

use tokio::sync::oneshot;

use crate::document::{DocumentRef, GrantMode};
use crate::error::Result;

/// Which system dialog to present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerMode {
    /// Choose an existing document.
    OpenDocument,
    /// Choose a location and name for a new document.
    CreateDocument,
    /// Choose a directory tree.
    OpenDocumentTree,
}

/// One picker dialog invocation.
///
/// # Example
///
/// ```
/// use bridge_traits::picker::PickerRequest;
///
/// let request = PickerRequest::open_document("*/*")
///     .with_mime_filters(vec!["text/plain".into(), "application/json".into()]);
/// assert_eq!(request.mime_filters.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerRequest {
    pub mode: PickerMode,
    /// Primary type the dialog is filtered to; `*/*` for wildcard.
    pub mime_type: String,
    /// Additional acceptable types when more than one applies.
    pub mime_filters: Vec<String>,
    /// Pre-filled document name for [`PickerMode::CreateDocument`].
    pub initial_name: Option<String>,
    /// Persistable access to request on the returned reference.
    pub grant: GrantMode,
}

impl PickerRequest {
    /// Dialog for choosing an existing document, with a persistable read
    /// grant on the selection.
    pub fn open_document(mime_type: impl Into<String>) -> Self {
        Self {
            mode: PickerMode::OpenDocument,
            mime_type: mime_type.into(),
            mime_filters: Vec::new(),
            initial_name: None,
            grant: GrantMode::Read,
        }
    }

    /// Dialog for creating a new document, pre-filled with `file_name`, with
    /// a persistable write grant on the result.
    pub fn create_document(file_name: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            mode: PickerMode::CreateDocument,
            mime_type: mime_type.into(),
            mime_filters: Vec::new(),
            initial_name: Some(file_name.into()),
            grant: GrantMode::Write,
        }
    }

    /// Dialog for choosing a directory tree, with persistable read and write
    /// grants on the selection.
    pub fn open_document_tree() -> Self {
        Self {
            mode: PickerMode::OpenDocumentTree,
            mime_type: "*/*".to_string(),
            mime_filters: Vec::new(),
            initial_name: None,
            grant: GrantMode::ReadWrite,
        }
    }

    /// Attach the full set of acceptable types.
    pub fn with_mime_filters(mut self, filters: Vec<String>) -> Self {
        self.mime_filters = filters;
        self
    }
}

/// Terminal outcome of a picker dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerOutcome {
    /// The user confirmed a selection. A confirmation can still carry no
    /// reference when the dialog's result named no document.
    Confirmed { reference: Option<DocumentRef> },
    /// The dialog was dismissed without a selection.
    Canceled,
}

impl PickerOutcome {
    pub fn confirmed(reference: DocumentRef) -> Self {
        Self::Confirmed {
            reference: Some(reference),
        }
    }

    pub fn confirmed_empty() -> Self {
        Self::Confirmed { reference: None }
    }
}

/// Awaitable half of a launched picker dialog.
///
/// The caller parks on [`wait`](Self::wait) until the host resolves the
/// paired [`PickResolver`]. A resolver dropped without resolving reports
/// [`PickerOutcome::Canceled`]: a torn-down dialog is indistinguishable from
/// a dismissed one.
#[derive(Debug)]
pub struct PendingPick {
    rx: oneshot::Receiver<PickerOutcome>,
}

impl PendingPick {
    /// Create a resolver/handle pair for one dialog invocation.
    pub fn channel() -> (PickResolver, PendingPick) {
        let (tx, rx) = oneshot::channel();
        (PickResolver { tx }, PendingPick { rx })
    }

    /// Wait for the dialog to finish.
    pub async fn wait(self) -> PickerOutcome {
        self.rx.await.unwrap_or(PickerOutcome::Canceled)
    }
}

/// Host-side half of a launched picker dialog; resolved at most once.
#[derive(Debug)]
pub struct PickResolver {
    tx: oneshot::Sender<PickerOutcome>,
}

impl PickResolver {
    /// Resolve with a confirmed reference.
    pub fn confirm(self, reference: DocumentRef) {
        self.resolve(PickerOutcome::confirmed(reference));
    }

    /// Resolve as dismissed.
    pub fn cancel(self) {
        self.resolve(PickerOutcome::Canceled);
    }

    /// Resolve with an explicit outcome.
    pub fn resolve(self, outcome: PickerOutcome) {
        let _ = self.tx.send(outcome);
    }
}

/// Host document chooser dialogs.
///
/// Abstracts the system picker surface:
/// - Android-style hosts: storage-access-framework intents
/// - Desktop: shell-owned file dialogs
///
/// Launching is synchronous; the selection arrives later through the
/// returned handle. Implementations fail the launch with
/// [`BridgeError::PickerUnavailable`](crate::error::BridgeError::PickerUnavailable)
/// when no dialog handler exists for the requested mode.
///
/// # Example
///
/// ```ignore
/// use bridge_traits::picker::{DocumentPicker, PickerRequest};
///
/// async fn pick(picker: &dyn DocumentPicker) {
///     let pending = picker.launch(PickerRequest::open_document_tree()).unwrap();
///     let outcome = pending.wait().await;
///     // outcome carries the confirmed reference or a cancellation
/// }
/// ```
pub trait DocumentPicker: Send + Sync {
    /// Present the system dialog described by `request`.
    fn launch(&self, request: PickerRequest) -> Result<PendingPick>;
}
