mod form_data;
mod form_field;
mod payloads;
mod submission;
mod user;

pub use form_data::FormData;
pub use form_field::{FormField, FormSection};
pub use payloads::{
    BalanceSheetPayload, ProfitAndLossPayload, ReportPayloads, SelfAssessmentPayload, VatPayload,
};
pub use submission::{ReportKind, SubmissionRecord, SubmissionStatus};
pub use user::{IdentityProvider, SimulatedGateway, User};
