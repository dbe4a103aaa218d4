//! Ticket dialog state.
//!
//! The dialog opens when a submission starts, shows upload progress,
//! and on success displays the issued ticket number. While it is
//! visible it only closes through the explicit close button, and only
//! once the ticket is on screen; outside clicks and Escape never
//! dismiss it.

use std::sync::{Arc, Mutex};

use yeka_core::TicketNumber;
use yeka_i18n::{routes, Locale};

/// What the dialog is currently showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogView {
    Hidden,
    Progress { percent: u8 },
    Success { ticket: TicketNumber },
}

/// How the user tried to close the dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseRequest {
    OutsideClick,
    Escape,
    CloseButton,
}

/// Shared handle on the dialog. Clones observe the same state, so
/// the submitter and the host can both drive it.
#[derive(Debug, Clone)]
pub struct TicketDialog {
    view: Arc<Mutex<DialogView>>,
}

impl Default for TicketDialog {
    fn default() -> Self {
        Self {
            view: Arc::new(Mutex::new(DialogView::Hidden)),
        }
    }
}

impl TicketDialog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> DialogView {
        self.lock().clone()
    }

    pub fn is_visible(&self) -> bool {
        !matches!(self.view(), DialogView::Hidden)
    }

    /// Show the dialog in its uploading state.
    pub fn open_for_upload(&self) {
        *self.lock() = DialogView::Progress { percent: 0 };
    }

    /// Update the progress bar. Ignored unless an upload is showing,
    /// so a late callback cannot regress a finished dialog.
    pub fn set_progress(&self, percent: u8) {
        let mut view = self.lock();
        if matches!(*view, DialogView::Progress { .. }) {
            *view = DialogView::Progress { percent };
        }
    }

    /// Switch to the success view with the issued ticket.
    pub fn complete(&self, ticket: TicketNumber) {
        *self.lock() = DialogView::Success { ticket };
    }

    /// Hide the dialog without user interaction, as when the
    /// submission fails and the toast takes over.
    pub fn dismiss(&self) {
        *self.lock() = DialogView::Hidden;
    }

    /// Apply a close attempt. Returns whether the dialog closed.
    pub fn request_close(&self, request: CloseRequest) -> bool {
        match request {
            CloseRequest::OutsideClick | CloseRequest::Escape => false,
            CloseRequest::CloseButton => {
                let mut view = self.lock();
                if matches!(*view, DialogView::Success { .. }) {
                    *view = DialogView::Hidden;
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Exact text the copy button puts on the clipboard.
    pub fn copy_payload(&self) -> Option<String> {
        match self.view() {
            DialogView::Success { ticket } => Some(ticket.to_string()),
            _ => None,
        }
    }

    /// Locale-prefixed path of the status page for the shown ticket.
    pub fn status_path(&self, locale: Locale) -> Option<String> {
        match self.view() {
            DialogView::Success { ticket } => {
                Some(routes::localized(locale, &ticket.status_path()))
            }
            _ => None,
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, DialogView> {
        self.view.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticket() -> TicketNumber {
        TicketNumber::from("YK-2024-0001")
    }

    #[test]
    fn test_lifecycle() {
        let dialog = TicketDialog::new();
        assert_eq!(dialog.view(), DialogView::Hidden);

        dialog.open_for_upload();
        assert_eq!(dialog.view(), DialogView::Progress { percent: 0 });

        dialog.set_progress(40);
        assert_eq!(dialog.view(), DialogView::Progress { percent: 40 });

        dialog.complete(ticket());
        assert_eq!(dialog.view(), DialogView::Success { ticket: ticket() });

        dialog.dismiss();
        assert!(!dialog.is_visible());
    }

    #[test]
    fn test_progress_only_applies_while_uploading() {
        let dialog = TicketDialog::new();
        dialog.set_progress(50);
        assert_eq!(dialog.view(), DialogView::Hidden);

        dialog.open_for_upload();
        dialog.complete(ticket());
        dialog.set_progress(80);
        assert_eq!(dialog.view(), DialogView::Success { ticket: ticket() });
    }

    #[test]
    fn test_uploading_dialog_refuses_every_close() {
        let dialog = TicketDialog::new();
        dialog.open_for_upload();

        assert!(!dialog.request_close(CloseRequest::OutsideClick));
        assert!(!dialog.request_close(CloseRequest::Escape));
        assert!(!dialog.request_close(CloseRequest::CloseButton));
        assert!(dialog.is_visible());
    }

    #[test]
    fn test_success_closes_only_through_the_button() {
        let dialog = TicketDialog::new();
        dialog.open_for_upload();
        dialog.complete(ticket());

        assert!(!dialog.request_close(CloseRequest::OutsideClick));
        assert!(!dialog.request_close(CloseRequest::Escape));
        assert!(dialog.is_visible());

        assert!(dialog.request_close(CloseRequest::CloseButton));
        assert!(!dialog.is_visible());
    }

    #[test]
    fn test_copy_payload_is_the_ticket_verbatim() {
        let dialog = TicketDialog::new();
        assert_eq!(dialog.copy_payload(), None);

        dialog.complete(ticket());
        assert_eq!(dialog.copy_payload(), Some("YK-2024-0001".to_string()));
    }

    #[test]
    fn test_status_path_is_locale_prefixed() {
        let dialog = TicketDialog::new();
        dialog.complete(ticket());
        assert_eq!(
            dialog.status_path(Locale::Am),
            Some("/am/report/YK-2024-0001".to_string())
        );
    }

    #[test]
    fn test_clones_share_state() {
        let dialog = TicketDialog::new();
        let observer = dialog.clone();
        dialog.open_for_upload();
        assert!(observer.is_visible());
    }
}
