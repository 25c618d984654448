use std::time::Duration;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::{DEFAULT_PERIOD_KEY, DEFAULT_VAT_THRESHOLD, ValidationRules};

/// Tunables for a [`SubmissionController`](super::SubmissionController).
///
/// Every field has a default, so a partial `[submission]` table in the
/// config file is enough.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmissionSettings {
    /// Simulated round-trip time, in milliseconds.
    pub latency_ms: u64,
    /// Sales above this need a VAT-registered user.
    pub vat_threshold: Decimal,
    /// Period key stamped on every VAT payload.
    pub period_key: String,
    /// Load the persisted history when the controller starts.
    pub rehydrate_history: bool,
}

impl SubmissionSettings {
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }

    pub fn validation_rules(&self) -> ValidationRules {
        ValidationRules {
            vat_threshold: self.vat_threshold,
        }
    }
}

impl Default for SubmissionSettings {
    fn default() -> Self {
        Self {
            latency_ms: 1000,
            vat_threshold: DEFAULT_VAT_THRESHOLD,
            period_key: DEFAULT_PERIOD_KEY.to_string(),
            rehydrate_history: true,
        }
    }
}
