use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    BalanceSheetPayload, ProfitAndLossPayload, ReportPayloads, SelfAssessmentPayload, VatPayload,
};

/// The report categories counted by the submission chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportKind {
    Vat,
    SelfAssessment,
    ProfitAndLoss,
    BalanceSheet,
}

impl ReportKind {
    /// Chart order.
    pub const ALL: [ReportKind; 4] = [
        Self::Vat,
        Self::SelfAssessment,
        Self::ProfitAndLoss,
        Self::BalanceSheet,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Vat => "VAT Returns",
            Self::SelfAssessment => "Self Assessment",
            Self::ProfitAndLoss => "P&L",
            Self::BalanceSheet => "Balance Sheet",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmissionStatus {
    #[default]
    Submitted,
}

/// One entry of the persisted submission history.
///
/// Records written by this application always carry all four reports.
/// The report fields are optional so that histories written by other
/// tools (or older versions) with a report missing still load; the chart
/// counts each category independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vat: Option<VatPayload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub self_assessment: Option<SelfAssessmentPayload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profit_and_loss: Option<ProfitAndLossPayload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance_sheet: Option<BalanceSheetPayload>,
    pub timestamp: DateTime<Utc>,
    pub utr: String,
    #[serde(default)]
    pub status: SubmissionStatus,
}

impl SubmissionRecord {
    pub fn new(
        payloads: ReportPayloads,
        utr: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            vat: Some(payloads.vat),
            self_assessment: Some(payloads.self_assessment),
            profit_and_loss: Some(payloads.profit_and_loss),
            balance_sheet: Some(payloads.balance_sheet),
            timestamp,
            utr: utr.into(),
            status: SubmissionStatus::Submitted,
        }
    }

    /// Whether this record carries a report of the given kind.
    pub fn contains(
        &self,
        kind: ReportKind,
    ) -> bool {
        match kind {
            ReportKind::Vat => self.vat.is_some(),
            ReportKind::SelfAssessment => self.self_assessment.is_some(),
            ReportKind::ProfitAndLoss => self.profit_and_loss.is_some(),
            ReportKind::BalanceSheet => self.balance_sheet.is_some(),
        }
    }
}
