use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// VAT return body in the shape of the MTD VAT API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VatPayload {
    pub period_key: String,
    pub vat_due_sales: Decimal,
    /// EU acquisitions are not captured by the form; always zero.
    pub vat_due_acquisitions: Decimal,
    pub total_vat_due: Decimal,
    pub vat_reclaimed_curr_period: Decimal,
    pub net_vat_due: Decimal,
    #[serde(rename = "totalValueSalesExVAT")]
    pub total_value_sales_ex_vat: Decimal,
    #[serde(rename = "totalValuePurchasesExVAT")]
    pub total_value_purchases_ex_vat: Decimal,
    #[serde(rename = "totalValueGoodsSuppliedExVAT")]
    pub total_value_goods_supplied_ex_vat: Decimal,
    #[serde(rename = "totalAcquisitionsExVAT")]
    pub total_acquisitions_ex_vat: Decimal,
    pub finalised: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelfAssessmentPayload {
    pub income: Decimal,
    pub expenses: Decimal,
    pub allowances: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitAndLossPayload {
    pub revenue: Decimal,
    pub cogs: Decimal,
    pub expenses: Decimal,
    /// `null` when the optional net profit field was left blank.
    pub net_profit: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceSheetPayload {
    pub assets: Decimal,
    pub liabilities: Decimal,
    pub equity: Decimal,
}

/// The four report bodies produced by one successful form submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportPayloads {
    pub vat: VatPayload,
    pub self_assessment: SelfAssessmentPayload,
    pub profit_and_loss: ProfitAndLossPayload,
    pub balance_sheet: BalanceSheetPayload,
}
