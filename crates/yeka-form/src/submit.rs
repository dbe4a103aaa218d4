//! Submission state machine.
//!
//! One submission runs at a time: validate, encode, upload with
//! progress, then settle as succeeded or failed. The submitter
//! drives the ticket dialog the host opened and records every
//! transition in its own state.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use thiserror::Error;

use yeka_client::{
    ApiError, ProgressFn, SubmissionGateway, COMPLAINTS_ENDPOINT, REPORTS_ENDPOINT,
};
use yeka_core::{
    ComplaintSchema, ComplaintSubmission, MultipartBody, ReportSchema, ReportSubmission,
    SchemaMessages, TicketNumber, ValidationError,
};
use yeka_i18n::MessageCatalog;

use crate::dialog::TicketDialog;

/// Where a submission currently stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitState {
    Idle,
    Validating,
    Uploading { progress: u8 },
    Succeeded { ticket: TicketNumber },
    Failed { message: String },
}

/// Why a submission did not go through.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("a submission is already in flight")]
    InFlight,
}

/// Title and body for the failure toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub title: String,
    pub body: String,
}

impl SubmitError {
    /// Toast body: every field message for validation failures, the
    /// recovered server text for API failures.
    pub fn toast_body(&self) -> String {
        match self {
            SubmitError::Validation(e) => e.errors.flattened().join("\n"),
            SubmitError::Api(e) => e.user_message(),
            SubmitError::InFlight => self.to_string(),
        }
    }

    pub fn toast(&self, catalog: &MessageCatalog) -> Toast {
        Toast {
            title: catalog.text("form.toast.error").to_string(),
            body: self.toast_body(),
        }
    }
}

/// A validated-and-encoded submission in waiting.
#[derive(Debug, Clone)]
pub enum SubmissionPayload {
    Report(ReportSubmission),
    Complaint(ComplaintSubmission),
}

impl SubmissionPayload {
    pub fn endpoint(&self) -> &'static str {
        match self {
            SubmissionPayload::Report(_) => REPORTS_ENDPOINT,
            SubmissionPayload::Complaint(_) => COMPLAINTS_ENDPOINT,
        }
    }

    pub fn validate(&self, messages: &SchemaMessages) -> Result<(), ValidationError> {
        match self {
            SubmissionPayload::Report(report) => {
                ReportSchema::new(messages.clone()).validate(report)
            }
            SubmissionPayload::Complaint(complaint) => {
                ComplaintSchema::new(messages.clone()).validate(complaint)
            }
        }
    }

    pub fn body(&self) -> MultipartBody {
        match self {
            SubmissionPayload::Report(report) => MultipartBody::from_report(report),
            SubmissionPayload::Complaint(complaint) => MultipartBody::from_complaint(complaint),
        }
    }
}

/// Runs submissions against a gateway, one at a time.
pub struct Submitter {
    gateway: Arc<dyn SubmissionGateway>,
    state: Arc<Mutex<SubmitState>>,
    in_flight: Arc<AtomicBool>,
}

struct FlightGuard {
    flag: Arc<AtomicBool>,
}

impl Drop for FlightGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

impl Submitter {
    pub fn new(gateway: Arc<dyn SubmissionGateway>) -> Self {
        Self {
            gateway,
            state: Arc::new(Mutex::new(SubmitState::Idle)),
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn state(&self) -> SubmitState {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn is_pending(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Validate and upload one submission.
    ///
    /// The host opens the dialog before calling this; the submitter
    /// feeds it progress, completes it with the ticket, or dismisses
    /// it on failure. A second call while one is in flight is
    /// rejected without touching the running attempt's state.
    pub async fn submit(
        &self,
        payload: SubmissionPayload,
        messages: &SchemaMessages,
        dialog: &TicketDialog,
    ) -> Result<TicketNumber, SubmitError> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(SubmitError::InFlight);
        }
        let _guard = FlightGuard {
            flag: self.in_flight.clone(),
        };

        self.set_state(SubmitState::Validating);
        if let Err(e) = payload.validate(messages) {
            let error = SubmitError::from(e);
            self.set_state(SubmitState::Failed {
                message: error.toast_body(),
            });
            dialog.dismiss();
            return Err(error);
        }

        let endpoint = payload.endpoint();
        let body = payload.body();
        self.set_state(SubmitState::Uploading { progress: 0 });
        tracing::debug!(endpoint, parts = body.parts().len(), "submission validated");

        let progress_state = self.state.clone();
        let progress_dialog = dialog.clone();
        let on_progress: ProgressFn = Arc::new(move |percent| {
            *progress_state.lock().unwrap_or_else(|e| e.into_inner()) =
                SubmitState::Uploading { progress: percent };
            progress_dialog.set_progress(percent);
        });

        match self.gateway.submit(endpoint, &body, Some(on_progress)).await {
            Ok(result) => {
                let ticket = result.ticket_number;
                self.set_state(SubmitState::Succeeded {
                    ticket: ticket.clone(),
                });
                dialog.complete(ticket.clone());
                tracing::info!(%ticket, "submission accepted");
                Ok(ticket)
            }
            Err(e) => {
                let error = SubmitError::from(e);
                self.set_state(SubmitState::Failed {
                    message: error.toast_body(),
                });
                dialog.dismiss();
                tracing::warn!("submission failed: {}", error.toast_body());
                Err(error)
            }
        }
    }

    fn set_state(&self, next: SubmitState) {
        *self.state.lock().unwrap_or_else(|e| e.into_inner()) = next;
    }
}
