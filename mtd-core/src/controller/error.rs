use thiserror::Error;

use crate::calculations::ValidationError;

/// Why a submission attempt did not produce a record.
///
/// The `Display` text is the status line shown to the user.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("Please log in with Government Gateway.")]
    NotAuthenticated,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("A submission is already in progress.")]
    InFlight,

    /// Payload construction or persistence failed. The cause is logged, not
    /// carried.
    #[error("Submission failed. Please try again.")]
    Failed,
}
