//! Construction of the four report bodies from a validated form.
//!
//! | Report | Field | Source |
//! |--------|-------|--------|
//! | VAT | `vatDueSales`, `totalVatDue` | VAT charged |
//! | VAT | `vatReclaimedCurrPeriod` | VAT paid |
//! | VAT | `netVatDue` | \|VAT charged - VAT paid\| |
//! | VAT | `totalValueSalesExVAT` / `totalValuePurchasesExVAT` | sales / purchases |
//! | VAT | acquisitions, goods supplied | always 0 |
//! | Self Assessment | `income`, `expenses`, `allowances` | allowances default to 0 |
//! | P&L | `revenue`, `cogs`, `expenses`, `netProfit` | net profit may be blank |
//! | Balance Sheet | `assets`, `liabilities`, `equity` | |

use rust_decimal::Decimal;
use thiserror::Error;

use crate::calculations::common::{AmountParseError, abs_difference, parse_optional_amount};
use crate::calculations::validation::ValidatedForm;
use crate::models::{
    BalanceSheetPayload, FormData, FormField, ProfitAndLossPayload, ReportPayloads,
    SelfAssessmentPayload, VatPayload,
};

/// Period key used when none is configured.
pub const DEFAULT_PERIOD_KEY: &str = "25A1";

/// A validated form that still cannot be turned into payloads.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PayloadError {
    /// An optional field, which validation does not check, is not a number.
    #[error("optional field '{field}' is not numeric: {source}")]
    OptionalNotNumeric {
        field: FormField,
        #[source]
        source: AmountParseError,
    },

    #[error("net VAT due is out of range: charged {charged}, paid {paid}")]
    NetVatOutOfRange { charged: Decimal, paid: Decimal },
}

#[derive(Debug, Clone)]
pub struct PayloadBuilder {
    period_key: String,
}

impl PayloadBuilder {
    pub fn new(period_key: impl Into<String>) -> Self {
        Self {
            period_key: period_key.into(),
        }
    }

    pub fn period_key(&self) -> &str {
        &self.period_key
    }

    /// Builds all four payloads.
    ///
    /// `validated` supplies the required amounts; the optional `netProfit`
    /// and `allowances` fields are read from `form`.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadError`] if an optional field is non-blank and not
    /// numeric, or if VAT charged minus VAT paid overflows.
    pub fn build(
        &self,
        form: &FormData,
        validated: &ValidatedForm,
    ) -> Result<ReportPayloads, PayloadError> {
        let net_profit = optional(form, FormField::NetProfit)?;
        let allowances = optional(form, FormField::Allowances)?.unwrap_or(Decimal::ZERO);

        Ok(ReportPayloads {
            vat: self.vat_payload(validated)?,
            self_assessment: SelfAssessmentPayload {
                income: validated.income,
                expenses: validated.self_assessment_expenses,
                allowances,
            },
            profit_and_loss: ProfitAndLossPayload {
                revenue: validated.revenue,
                cogs: validated.cogs,
                expenses: validated.expenses,
                net_profit,
            },
            balance_sheet: BalanceSheetPayload {
                assets: validated.assets,
                liabilities: validated.liabilities,
                equity: validated.equity,
            },
        })
    }

    fn vat_payload(
        &self,
        validated: &ValidatedForm,
    ) -> Result<VatPayload, PayloadError> {
        let net_vat_due = abs_difference(validated.vat_charged, validated.vat_paid).ok_or(
            PayloadError::NetVatOutOfRange {
                charged: validated.vat_charged,
                paid: validated.vat_paid,
            },
        )?;

        Ok(VatPayload {
            period_key: self.period_key.clone(),
            vat_due_sales: validated.vat_charged,
            vat_due_acquisitions: Decimal::ZERO,
            total_vat_due: validated.vat_charged,
            vat_reclaimed_curr_period: validated.vat_paid,
            net_vat_due,
            total_value_sales_ex_vat: validated.sales,
            total_value_purchases_ex_vat: validated.purchases,
            total_value_goods_supplied_ex_vat: Decimal::ZERO,
            total_acquisitions_ex_vat: Decimal::ZERO,
            finalised: true,
        })
    }
}

impl Default for PayloadBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_PERIOD_KEY)
    }
}

fn optional(
    form: &FormData,
    field: FormField,
) -> Result<Option<Decimal>, PayloadError> {
    parse_optional_amount(form.get(field))
        .map_err(|source| PayloadError::OptionalNotNumeric { field, source })
}
