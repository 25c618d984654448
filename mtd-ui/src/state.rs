//! State shared between the window and the submission task.
//!
//! The controller lives behind a tokio mutex. The UI thread only ever
//! `try_lock`s it, so it never blocks on the submission task; the task takes
//! the lock for the short completion step after the simulated latency.

use std::sync::Arc;

use mtd_core::calculations::ChartCounts;
use mtd_core::controller::SubmissionPhase;
use mtd_core::{
    FormData, IdentityProvider, SubmissionController, SubmissionError, SubmissionRecord, User,
};
use tokio::runtime::Handle;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::debug;

/// Everything the window needs to draw, copied out of the controller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewSnapshot {
    pub user: Option<User>,
    pub status: Option<String>,
    pub phase: SubmissionPhase,
    pub counts: ChartCounts,
}

impl ViewSnapshot {
    pub fn is_submitting(&self) -> bool {
        self.phase == SubmissionPhase::Submitting
    }
}

#[derive(Clone)]
pub struct AppState {
    controller: Arc<Mutex<SubmissionController>>,
    runtime: Handle,
}

impl AppState {
    pub fn new(
        controller: SubmissionController,
        runtime: Handle,
    ) -> Self {
        Self {
            controller: Arc::new(Mutex::new(controller)),
            runtime,
        }
    }

    /// Copies the current controller state, or `None` while the submission
    /// task holds the lock.
    pub fn snapshot(&self) -> Option<ViewSnapshot> {
        let controller = self.controller.try_lock().ok()?;
        Some(ViewSnapshot {
            user: controller.user().cloned(),
            status: controller.status_message().map(str::to_string),
            phase: controller.phase(),
            counts: controller.chart_counts(),
        })
    }

    pub fn login(
        &self,
        provider: &dyn IdentityProvider,
    ) -> Result<User, SubmissionError> {
        let mut controller = self
            .controller
            .try_lock()
            .map_err(|_| SubmissionError::InFlight)?;
        Ok(controller.login(provider).clone())
    }

    /// Validates `form` and, if it passes, starts the submission on the
    /// runtime. The returned handle resolves once the record is persisted
    /// (or persisting failed).
    pub fn start_submission(
        &self,
        form: FormData,
    ) -> Result<JoinHandle<Result<SubmissionRecord, SubmissionError>>, SubmissionError> {
        let (pending, latency) = {
            let mut controller = self
                .controller
                .try_lock()
                .map_err(|_| SubmissionError::InFlight)?;
            controller.replace_form(form);
            (controller.begin_submission()?, controller.latency())
        };

        debug!("submission accepted; waiting for simulated response");
        let controller = self.controller.clone();
        Ok(self.runtime.spawn(async move {
            latency.wait().await;
            controller.lock().await.complete_submission(pending).await
        }))
    }
}
