//! Embedder-Driven Picker Plumbing
//!
//! Desktop shells own their chooser dialogs, so the picker bridge here is
//! pure plumbing: each launch is forwarded to the embedding shell as a
//! [`PickerEvent`], and the shell resolves the event once its dialog closes.

use bridge_traits::{
    error::{BridgeError, Result},
    picker::{DocumentPicker, PendingPick, PickResolver, PickerRequest},
};
use tokio::sync::mpsc;
use tracing::debug;

/// A picker launch forwarded to the embedding shell.
#[derive(Debug)]
pub struct PickerEvent {
    pub request: PickerRequest,
    /// Resolve exactly once when the shell's dialog closes. Dropping it
    /// reports a cancellation to the waiting channel.
    pub resolver: PickResolver,
}

/// Picker bridge driven by the embedding shell.
///
/// # Example
///
/// ```ignore
/// use bridge_desktop::HostedPicker;
/// use bridge_traits::document::DocumentRef;
///
/// let (picker, mut events) = HostedPicker::new();
/// // shell side:
/// tokio::spawn(async move {
///     while let Some(event) = events.recv().await {
///         // present a dialog for event.request ...
///         event.resolver.confirm(DocumentRef::new("/picked/path"));
///     }
/// });
/// ```
#[derive(Debug, Clone)]
pub struct HostedPicker {
    events: mpsc::UnboundedSender<PickerEvent>,
}

impl HostedPicker {
    /// Create the picker and the event stream the shell must drain.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<PickerEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { events: tx }, rx)
    }
}

impl DocumentPicker for HostedPicker {
    fn launch(&self, request: PickerRequest) -> Result<PendingPick> {
        let (resolver, pending) = PendingPick::channel();
        debug!(mode = ?request.mode, "Forwarding picker launch to shell");

        self.events
            .send(PickerEvent { request, resolver })
            .map_err(|_| {
                BridgeError::PickerUnavailable(
                    "the embedding shell stopped listening for picker launches".to_string(),
                )
            })?;

        Ok(pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_traits::document::DocumentRef;
    use bridge_traits::picker::{PickerMode, PickerOutcome};

    #[tokio::test]
    async fn test_launch_reaches_shell_and_resolves() {
        let (picker, mut events) = HostedPicker::new();

        let pending = picker
            .launch(PickerRequest::open_document("text/plain"))
            .unwrap();

        let event = events.recv().await.expect("forwarded launch");
        assert_eq!(event.request.mode, PickerMode::OpenDocument);
        event.resolver.confirm(DocumentRef::new("/picked/file.txt"));

        assert_eq!(
            pending.wait().await,
            PickerOutcome::confirmed(DocumentRef::new("/picked/file.txt"))
        );
    }

    #[tokio::test]
    async fn test_launch_fails_when_shell_is_gone() {
        let (picker, events) = HostedPicker::new();
        drop(events);

        let result = picker.launch(PickerRequest::open_document_tree());
        assert!(matches!(result, Err(BridgeError::PickerUnavailable(_))));
    }

    #[tokio::test]
    async fn test_dropped_event_reports_cancellation() {
        let (picker, mut events) = HostedPicker::new();

        let pending = picker
            .launch(PickerRequest::create_document("doc.json", "application/json"))
            .unwrap();

        // Shell tears its dialog down without resolving.
        drop(events.recv().await);

        assert_eq!(pending.wait().await, PickerOutcome::Canceled);
    }
}
