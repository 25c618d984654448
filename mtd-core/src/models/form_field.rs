use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static CAPITAL_LETTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("([A-Z])").expect("static pattern is valid"));

/// The four groups the submission form is laid out in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormSection {
    ProfitAndLoss,
    BalanceSheet,
    VatReturn,
    SelfAssessment,
}

impl FormSection {
    pub const ALL: [FormSection; 4] = [
        Self::ProfitAndLoss,
        Self::BalanceSheet,
        Self::VatReturn,
        Self::SelfAssessment,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Self::ProfitAndLoss => "Profit and Loss (P&L)",
            Self::BalanceSheet => "Balance Sheet",
            Self::VatReturn => "VAT Return",
            Self::SelfAssessment => "Self Assessment",
        }
    }

    /// Fields of this section in display order.
    pub fn fields(&self) -> impl Iterator<Item = FormField> + '_ {
        FormField::ALL
            .into_iter()
            .filter(move |field| field.section() == *self)
    }
}

/// One of the fourteen numeric-as-text inputs on the submission form.
///
/// Serialized with the camelCase key the form and the CSV prefill use
/// (`vatCharged`, `selfAssessmentExpenses`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    Revenue,
    Cogs,
    Expenses,
    NetProfit,
    Assets,
    Liabilities,
    Equity,
    Sales,
    Purchases,
    VatCharged,
    VatPaid,
    Income,
    SelfAssessmentExpenses,
    Allowances,
}

impl FormField {
    /// Every field, in form order.
    pub const ALL: [FormField; 14] = [
        Self::Revenue,
        Self::Cogs,
        Self::Expenses,
        Self::NetProfit,
        Self::Assets,
        Self::Liabilities,
        Self::Equity,
        Self::Sales,
        Self::Purchases,
        Self::VatCharged,
        Self::VatPaid,
        Self::Income,
        Self::SelfAssessmentExpenses,
        Self::Allowances,
    ];

    /// Fields checked by validation, in the order they are checked.
    ///
    /// `netProfit` and `allowances` are not part of this list.
    pub const REQUIRED: [FormField; 12] = [
        Self::Revenue,
        Self::Cogs,
        Self::Expenses,
        Self::Assets,
        Self::Liabilities,
        Self::Equity,
        Self::Sales,
        Self::Purchases,
        Self::VatCharged,
        Self::VatPaid,
        Self::Income,
        Self::SelfAssessmentExpenses,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Self::Revenue => "revenue",
            Self::Cogs => "cogs",
            Self::Expenses => "expenses",
            Self::NetProfit => "netProfit",
            Self::Assets => "assets",
            Self::Liabilities => "liabilities",
            Self::Equity => "equity",
            Self::Sales => "sales",
            Self::Purchases => "purchases",
            Self::VatCharged => "vatCharged",
            Self::VatPaid => "vatPaid",
            Self::Income => "income",
            Self::SelfAssessmentExpenses => "selfAssessmentExpenses",
            Self::Allowances => "allowances",
        }
    }

    pub fn parse(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.key() == key)
    }

    pub fn is_required(&self) -> bool {
        Self::REQUIRED.contains(self)
    }

    pub fn section(&self) -> FormSection {
        match self {
            Self::Revenue | Self::Cogs | Self::Expenses | Self::NetProfit => {
                FormSection::ProfitAndLoss
            }
            Self::Assets | Self::Liabilities | Self::Equity => FormSection::BalanceSheet,
            Self::Sales | Self::Purchases | Self::VatCharged | Self::VatPaid => {
                FormSection::VatReturn
            }
            Self::Income | Self::SelfAssessmentExpenses | Self::Allowances => {
                FormSection::SelfAssessment
            }
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Revenue => "Revenue (£)",
            Self::Cogs => "Cost of Goods Sold (£)",
            Self::Expenses => "Expenses (£)",
            Self::NetProfit => "Net Profit (£)",
            Self::Assets => "Total Assets (£)",
            Self::Liabilities => "Total Liabilities (£)",
            Self::Equity => "Equity (£)",
            Self::Sales => "Total Sales (£)",
            Self::Purchases => "Total Purchases (£)",
            Self::VatCharged => "VAT Charged (Output Tax, £)",
            Self::VatPaid => "VAT Paid (Input Tax, £)",
            Self::Income => "Total Income (£)",
            Self::SelfAssessmentExpenses => "Expenses (£)",
            Self::Allowances => "Allowances (£)",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            Self::Revenue => "Enter total revenue",
            Self::Cogs => "Enter COGS",
            Self::Expenses => "Enter total expenses",
            Self::NetProfit => "Enter net profit",
            Self::Assets => "Enter total assets",
            Self::Liabilities => "Enter total liabilities",
            Self::Equity => "Enter total equity",
            Self::Sales => "Enter total sales",
            Self::Purchases => "Enter total purchases",
            Self::VatCharged => "Enter VAT charged",
            Self::VatPaid => "Enter VAT paid",
            Self::Income => "Enter total income",
            Self::SelfAssessmentExpenses => "Enter total expenses",
            Self::Allowances => "Enter allowances (optional)",
        }
    }

    /// The key split at capital letters and lowercased, as shown in
    /// validation messages (`selfAssessmentExpenses` -> `self assessment expenses`).
    pub fn human_name(&self) -> String {
        CAPITAL_LETTER
            .replace_all(self.key(), " $1")
            .to_lowercase()
    }
}

impl fmt::Display for FormField {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl TryFrom<&str> for FormField {
    type Error = String;

    fn try_from(key: &str) -> Result<Self, Self::Error> {
        Self::parse(key).ok_or_else(|| format!("unknown form field '{key}'"))
    }
}
