//! Aggregate counts for the submission history bar chart.

use serde::{Deserialize, Serialize};

use crate::models::{ReportKind, SubmissionRecord};

pub const CHART_TITLE: &str = "Submission History";
pub const DATASET_LABEL: &str = "Submissions";
pub const X_AXIS_TITLE: &str = "Report Type";
pub const Y_AXIS_TITLE: &str = "Number of Submissions";

/// Bar fill colours, in [`ReportKind::ALL`] order.
pub const BAR_COLORS: [u32; 4] = [0x4CAF50, 0x2196F3, 0xFFC107, 0xF44336];
/// Bar border colours, in [`ReportKind::ALL`] order.
pub const BAR_BORDER_COLORS: [u32; 4] = [0x388E3C, 0x1976D2, 0xFFA000, 0xD32F2F];

/// Number of history records carrying each report category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartCounts {
    pub vat: usize,
    pub self_assessment: usize,
    pub profit_and_loss: usize,
    pub balance_sheet: usize,
}

impl ChartCounts {
    /// Counts each category independently over `history`.
    pub fn from_history(history: &[SubmissionRecord]) -> Self {
        let count = |kind| history.iter().filter(|r| r.contains(kind)).count();

        Self {
            vat: count(ReportKind::Vat),
            self_assessment: count(ReportKind::SelfAssessment),
            profit_and_loss: count(ReportKind::ProfitAndLoss),
            balance_sheet: count(ReportKind::BalanceSheet),
        }
    }

    pub fn get(
        &self,
        kind: ReportKind,
    ) -> usize {
        match kind {
            ReportKind::Vat => self.vat,
            ReportKind::SelfAssessment => self.self_assessment,
            ReportKind::ProfitAndLoss => self.profit_and_loss,
            ReportKind::BalanceSheet => self.balance_sheet,
        }
    }

    /// `[vatCount, saCount, plCount, bsCount]`, the data series the chart draws.
    pub fn as_array(&self) -> [usize; 4] {
        ReportKind::ALL.map(|kind| self.get(kind))
    }

    /// Largest bar, used to scale the y axis.
    pub fn max(&self) -> usize {
        self.as_array().into_iter().max().unwrap_or(0)
    }

    /// Label, count and colours for each bar in chart order.
    pub fn bars(&self) -> impl Iterator<Item = ChartBar> + '_ {
        ReportKind::ALL
            .into_iter()
            .zip(BAR_COLORS.into_iter().zip(BAR_BORDER_COLORS))
            .map(|(kind, (color, border_color))| ChartBar {
                label: kind.label(),
                count: self.get(kind),
                color,
                border_color,
            })
    }
}

/// One bar of the rendered chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartBar {
    pub label: &'static str,
    pub count: usize,
    pub color: u32,
    pub border_color: u32,
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;

    use super::*;
    use crate::models::{BalanceSheetPayload, SelfAssessmentPayload, SubmissionStatus};

    fn record_with_balance_sheet_only() -> SubmissionRecord {
        SubmissionRecord {
            vat: None,
            self_assessment: None,
            profit_and_loss: None,
            balance_sheet: Some(BalanceSheetPayload {
                assets: Decimal::ONE,
                liabilities: Decimal::ZERO,
                equity: Decimal::ZERO,
            }),
            timestamp: Utc.with_ymd_and_hms(2026, 1, 31, 9, 0, 0).unwrap(),
            utr: "1234567890".to_string(),
            status: SubmissionStatus::Submitted,
        }
    }

    #[test]
    fn empty_history_has_zero_counts() {
        let counts = ChartCounts::from_history(&[]);

        assert_eq!(counts.as_array(), [0, 0, 0, 0]);
        assert_eq!(counts.max(), 0);
    }

    #[test]
    fn categories_are_counted_independently() {
        let mut partial = record_with_balance_sheet_only();
        partial.self_assessment = Some(SelfAssessmentPayload {
            income: Decimal::ONE,
            expenses: Decimal::ZERO,
            allowances: Decimal::ZERO,
        });
        let history = vec![record_with_balance_sheet_only(), partial];

        let counts = ChartCounts::from_history(&history);

        assert_eq!(counts.as_array(), [0, 1, 0, 2]);
        assert_eq!(counts.max(), 2);
    }

    #[test]
    fn bars_follow_chart_order_with_labels_and_colours() {
        let counts = ChartCounts {
            vat: 3,
            self_assessment: 2,
            profit_and_loss: 1,
            balance_sheet: 0,
        };

        let bars: Vec<_> = counts.bars().collect();

        assert_eq!(
            bars.iter().map(|b| b.label).collect::<Vec<_>>(),
            vec!["VAT Returns", "Self Assessment", "P&L", "Balance Sheet"]
        );
        assert_eq!(bars[0].count, 3);
        assert_eq!(bars[0].color, 0x4CAF50);
        assert_eq!(bars[3].border_color, 0xD32F2F);
    }
}
