//! # Confirmation Dialog
//!
//! One shared dialog, at most one pending request. `confirm()` hands back a
//! receiver that resolves when the user confirms, cancels, or clicks outside.
//!
//! Opening a second request while one is pending rejects the first with
//! [`ConfirmError::Superseded`] instead of leaving it unresolved forever.

use std::fmt;

use tokio::sync::oneshot;

use super::texts::Notice;

/// Content of the dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmRequest {
    pub title: String,
    pub message: String,
    pub confirm_label: String,
    pub danger: bool,
}

impl ConfirmRequest {
    pub fn new(notice: Notice, confirm_label: &str, danger: bool) -> Self {
        Self {
            title: notice.title.to_string(),
            message: notice.message.to_string(),
            confirm_label: confirm_label.to_string(),
            danger,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmError {
    /// Another confirmation was requested before this one was answered.
    Superseded,
}

impl fmt::Display for ConfirmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfirmError::Superseded => write!(f, "confirmation superseded by a newer request"),
        }
    }
}

impl std::error::Error for ConfirmError {}

pub type ConfirmResult = Result<bool, ConfirmError>;
pub type ConfirmReceiver = oneshot::Receiver<ConfirmResult>;

#[derive(Debug, Default)]
pub struct ConfirmDialog {
    pending: Option<(ConfirmRequest, oneshot::Sender<ConfirmResult>)>,
}

impl ConfirmDialog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the dialog. Any request still pending is rejected first.
    pub fn confirm(&mut self, request: ConfirmRequest) -> ConfirmReceiver {
        if let Some((previous, resolver)) = self.pending.take() {
            log::warn!("Confirmation '{}' superseded before an answer", previous.title);
            let _ = resolver.send(Err(ConfirmError::Superseded));
        }
        let (tx, rx) = oneshot::channel();
        self.pending = Some((request, tx));
        rx
    }

    /// Close the dialog with the user's choice.
    pub fn resolve(&mut self, confirmed: bool) {
        if let Some((request, resolver)) = self.pending.take() {
            log::debug!("Confirmation '{}' answered: {}", request.title, confirmed);
            // The waiting task may be gone already; nothing left to notify.
            let _ = resolver.send(Ok(confirmed));
        }
    }

    /// A click on the backdrop counts as cancel.
    pub fn click_outside(&mut self) {
        self.resolve(false);
    }

    pub fn is_open(&self) -> bool {
        self.pending.is_some()
    }

    pub fn request(&self) -> Option<&ConfirmRequest> {
        self.pending.as_ref().map(|(request, _)| request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::texts;

    fn delete_request() -> ConfirmRequest {
        ConfirmRequest::new(texts::DELETE_CONFIRM, texts::DELETE_CONFIRM_LABEL, true)
    }

    #[test]
    fn test_confirm_resolves_true() {
        let mut dialog = ConfirmDialog::new();
        let mut rx = dialog.confirm(delete_request());
        assert!(dialog.is_open());
        assert_eq!(dialog.request().unwrap().confirm_label, "Eliminar");
        assert!(dialog.request().unwrap().danger);

        dialog.resolve(true);
        assert!(!dialog.is_open());
        assert_eq!(rx.try_recv().unwrap(), Ok(true));
    }

    #[test]
    fn test_click_outside_cancels() {
        let mut dialog = ConfirmDialog::new();
        let mut rx = dialog.confirm(delete_request());
        dialog.click_outside();
        assert_eq!(rx.try_recv().unwrap(), Ok(false));
    }

    #[test]
    fn test_second_request_rejects_first() {
        let mut dialog = ConfirmDialog::new();
        let mut first = dialog.confirm(delete_request());
        let mut second = dialog.confirm(delete_request());

        assert_eq!(first.try_recv().unwrap(), Err(ConfirmError::Superseded));
        assert!(dialog.is_open());

        dialog.resolve(false);
        assert_eq!(second.try_recv().unwrap(), Ok(false));
    }

    #[test]
    fn test_resolve_without_pending_is_noop() {
        let mut dialog = ConfirmDialog::new();
        dialog.resolve(true);
        assert!(!dialog.is_open());
    }

    #[tokio::test]
    async fn test_receiver_awaits_answer() {
        let mut dialog = ConfirmDialog::new();
        let rx = dialog.confirm(delete_request());
        dialog.resolve(true);
        assert_eq!(rx.await.unwrap(), Ok(true));
    }
}
