//! The form and submission controller.
//!
//! [`SubmissionController`] owns all session state: the logged-in user, the
//! form text, the submission history and the phase of the current attempt.
//! A submission runs in two halves so a front-end can show progress between
//! them:
//!
//! 1. [`begin_submission`](SubmissionController::begin_submission) checks the
//!    session, validates the form and builds the payloads.
//! 2. [`complete_submission`](SubmissionController::complete_submission)
//!    timestamps the record, persists the updated history and only then
//!    adopts it in memory.
//!
//! [`submit`](SubmissionController::submit) runs both with the simulated
//! latency in between. While an attempt is between the two halves, a second
//! `begin_submission` fails with [`SubmissionError::InFlight`].

mod clock;
mod error;
mod latency;
mod settings;

use std::sync::Arc;

use tracing::{error, info, warn};

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::SubmissionError;
pub use latency::{NoLatency, SimulatedLatency, SubmissionLatency};
pub use settings::SubmissionSettings;

use crate::calculations::{ChartCounts, FormValidator, PayloadBuilder, ValidationError};
use crate::db::{HistoryRepository, StoreError};
use crate::models::{FormData, FormField, IdentityProvider, ReportPayloads, SubmissionRecord, User};

pub const STATUS_SUBMITTING: &str = "Submitting...";
pub const STATUS_SUCCEEDED: &str = "Submission successful! Records saved.";

/// Where the most recent submission attempt got to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmissionPhase {
    #[default]
    Idle,
    Validating,
    Submitting,
    Succeeded,
    Failed,
}

/// A validated submission waiting to be recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSubmission {
    payloads: ReportPayloads,
    utr: String,
}

impl PendingSubmission {
    pub fn payloads(&self) -> &ReportPayloads {
        &self.payloads
    }
}

pub struct SubmissionController {
    user: Option<User>,
    form: FormData,
    history: Vec<SubmissionRecord>,
    phase: SubmissionPhase,
    status: Option<String>,
    validator: FormValidator,
    payloads: PayloadBuilder,
    repository: HistoryRepository,
    latency: Arc<dyn SubmissionLatency>,
    clock: Arc<dyn Clock>,
}

impl SubmissionController {
    /// Creates a logged-out controller with a blank form and an empty
    /// in-memory history. Call [`rehydrate`](Self::rehydrate) to load the
    /// persisted history.
    pub fn new(
        repository: HistoryRepository,
        settings: &SubmissionSettings,
    ) -> Self {
        Self {
            user: None,
            form: FormData::new(),
            history: Vec::new(),
            phase: SubmissionPhase::Idle,
            status: None,
            validator: FormValidator::new(settings.validation_rules()),
            payloads: PayloadBuilder::new(settings.period_key.clone()),
            repository,
            latency: Arc::new(SimulatedLatency::new(settings.latency())),
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_latency(
        mut self,
        latency: Arc<dyn SubmissionLatency>,
    ) -> Self {
        self.latency = latency;
        self
    }

    pub fn with_clock(
        mut self,
        clock: Arc<dyn Clock>,
    ) -> Self {
        self.clock = clock;
        self
    }

    /// Replaces the in-memory history with the persisted one.
    ///
    /// Returns the number of records loaded.
    pub async fn rehydrate(&mut self) -> Result<usize, StoreError> {
        self.history = self.repository.load().await?;
        info!(records = self.history.len(), "submission history restored");
        Ok(self.history.len())
    }

    // ── session ──────────────────────────────────────────────────────────

    /// Logs in through `provider`. There is no logout; logging in again
    /// replaces the identity.
    pub fn login(
        &mut self,
        provider: &dyn IdentityProvider,
    ) -> &User {
        let user = provider.login();
        info!(utr = %user.utr, name = %user.name, "user logged in");
        self.user.insert(user)
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }

    // ── form ─────────────────────────────────────────────────────────────

    pub fn form(&self) -> &FormData {
        &self.form
    }

    pub fn set_field(
        &mut self,
        field: FormField,
        value: impl Into<String>,
    ) {
        self.form.set(field, value);
    }

    pub fn replace_form(
        &mut self,
        form: FormData,
    ) {
        self.form = form;
    }

    /// Validates the current form for the logged-in user.
    pub fn validate(&self) -> Result<(), SubmissionError> {
        let user = self.user.as_ref().ok_or(SubmissionError::NotAuthenticated)?;
        self.validator.validate(&self.form, user)?;
        Ok(())
    }

    // ── submission ───────────────────────────────────────────────────────

    /// First half of a submission: session check, in-flight guard,
    /// validation and payload construction.
    pub fn begin_submission(&mut self) -> Result<PendingSubmission, SubmissionError> {
        if self.phase == SubmissionPhase::Submitting {
            warn!("submission rejected: another submission is in flight");
            return Err(SubmissionError::InFlight);
        }
        let Some(user) = self.user.as_ref() else {
            warn!("submission rejected: not logged in");
            self.status = Some(SubmissionError::NotAuthenticated.to_string());
            return Err(SubmissionError::NotAuthenticated);
        };
        let utr = user.utr.clone();

        self.phase = SubmissionPhase::Validating;
        let validated = match self.validator.validate(&self.form, user) {
            Ok(validated) => validated,
            Err(e) => return Err(self.reject(e)),
        };

        let payloads = match self.payloads.build(&self.form, &validated) {
            Ok(payloads) => payloads,
            Err(e) => {
                error!(error = %e, "failed to build submission payloads");
                return Err(self.fail());
            }
        };

        self.phase = SubmissionPhase::Submitting;
        self.status = Some(STATUS_SUBMITTING.to_string());
        Ok(PendingSubmission { payloads, utr })
    }

    /// Second half of a submission: records `pending`, persists the whole
    /// updated history and recomputes what the chart shows.
    ///
    /// If persisting fails the in-memory history is left untouched.
    pub async fn complete_submission(
        &mut self,
        pending: PendingSubmission,
    ) -> Result<SubmissionRecord, SubmissionError> {
        let record = SubmissionRecord::new(pending.payloads, pending.utr, self.clock.now());

        let mut updated = self.history.clone();
        updated.push(record.clone());
        if let Err(e) = self.repository.save(&updated).await {
            error!(error = %e, key = %self.repository.key(), "failed to persist submission history");
            return Err(self.fail());
        }

        self.history = updated;
        self.phase = SubmissionPhase::Succeeded;
        self.status = Some(STATUS_SUCCEEDED.to_string());
        info!(
            utr = %record.utr,
            timestamp = %record.timestamp,
            total = self.history.len(),
            "submission recorded"
        );
        Ok(record)
    }

    /// Validates, waits out the simulated latency, then records the submission.
    pub async fn submit(&mut self) -> Result<SubmissionRecord, SubmissionError> {
        let pending = self.begin_submission()?;
        self.latency.wait().await;
        self.complete_submission(pending).await
    }

    fn reject(
        &mut self,
        e: ValidationError,
    ) -> SubmissionError {
        warn!(error = %e, field = ?e.field(), "form failed validation");
        self.phase = SubmissionPhase::Failed;
        self.status = Some(e.to_string());
        SubmissionError::Validation(e)
    }

    fn fail(&mut self) -> SubmissionError {
        self.phase = SubmissionPhase::Failed;
        self.status = Some(SubmissionError::Failed.to_string());
        SubmissionError::Failed
    }

    // ── read-outs ────────────────────────────────────────────────────────

    pub fn history(&self) -> &[SubmissionRecord] {
        &self.history
    }

    pub fn chart_counts(&self) -> ChartCounts {
        ChartCounts::from_history(&self.history)
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.phase
    }

    /// Feedback for the last attempt, if any.
    pub fn status_message(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// The configured latency, for front-ends that wait outside the controller.
    pub fn latency(&self) -> Arc<dyn SubmissionLatency> {
        self.latency.clone()
    }
}
