//! Business rules for the MTD submission form.
//!
//! This module provides the validation rule set, the construction of the
//! four report payloads, and the aggregate counts behind the submission chart.

pub mod chart;
pub mod common;
pub mod payloads;
pub mod validation;

pub use chart::{ChartBar, ChartCounts};
pub use payloads::{DEFAULT_PERIOD_KEY, PayloadBuilder, PayloadError};
pub use validation::{
    DEFAULT_VAT_THRESHOLD, FormValidator, ValidatedForm, ValidationError, ValidationRules,
};
