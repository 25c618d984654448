//! Submission form validation.
//!
//! Rules are checked in a fixed order and the first failure is returned:
//!
//! | Order | Rule | Error |
//! |-------|------|-------|
//! | 1     | each required field is non-blank, in [`FormField::REQUIRED`] order | [`ValidationError::MissingField`] |
//! | 1     | each required field parses as a number | [`ValidationError::NotNumeric`] |
//! | 2     | sales above the VAT threshold need a VAT-registered user | [`ValidationError::VatThreshold`] |
//! | 3     | assets are not less than liabilities + equity | [`ValidationError::BalanceSheetMismatch`] |
//!
//! The balance-sheet rule is an inequality: assets exceeding liabilities plus
//! equity is accepted.
//!
//! # Example
//!
//! ```
//! use mtd_core::calculations::{FormValidator, ValidationError, ValidationRules};
//! use mtd_core::{FormData, FormField, SimulatedGateway, IdentityProvider};
//!
//! let user = SimulatedGateway.login();
//! let form = FormData::new().with(FormField::Revenue, "");
//!
//! let result = FormValidator::new(ValidationRules::default()).validate(&form, &user);
//!
//! assert_eq!(result.unwrap_err(), ValidationError::MissingField(FormField::Revenue));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calculations::common::{format_pounds, is_blank, parse_amount};
use crate::models::{FormData, FormField, User};

/// Sales level above which VAT registration is compulsory.
pub const DEFAULT_VAT_THRESHOLD: Decimal = Decimal::from_parts(85000, 0, 0, false, 0);

/// The first rule a form broke. The `Display` text is the message shown to
/// the user.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Field {} is required.", .0.human_name())]
    MissingField(FormField),

    #[error("Field {} must be numeric.", .0.human_name())]
    NotNumeric(FormField),

    #[error("Sales exceed £{}. VAT registration required.", pounds(.threshold))]
    VatThreshold { sales: Decimal, threshold: Decimal },

    #[error("Balance Sheet does not balance: Assets must equal Liabilities + Equity.")]
    BalanceSheetMismatch {
        assets: Decimal,
        liabilities_plus_equity: Decimal,
    },
}

impl ValidationError {
    /// The form field the error is attached to, if any.
    pub fn field(&self) -> Option<FormField> {
        match self {
            Self::MissingField(field) | Self::NotNumeric(field) => Some(*field),
            Self::VatThreshold { .. } => Some(FormField::Sales),
            Self::BalanceSheetMismatch { .. } => Some(FormField::Assets),
        }
    }
}

/// Tunable parameters of the rule set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationRules {
    pub vat_threshold: Decimal,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            vat_threshold: DEFAULT_VAT_THRESHOLD,
        }
    }
}

/// The required fields of a form that passed validation, already parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedForm {
    pub revenue: Decimal,
    pub cogs: Decimal,
    pub expenses: Decimal,
    pub assets: Decimal,
    pub liabilities: Decimal,
    pub equity: Decimal,
    pub sales: Decimal,
    pub purchases: Decimal,
    pub vat_charged: Decimal,
    pub vat_paid: Decimal,
    pub income: Decimal,
    pub self_assessment_expenses: Decimal,
}

#[derive(Debug, Clone)]
pub struct FormValidator {
    rules: ValidationRules,
}

impl FormValidator {
    pub fn new(rules: ValidationRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &ValidationRules {
        &self.rules
    }

    /// Checks `form` for `user` and returns the parsed required fields.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] encountered.
    pub fn validate(
        &self,
        form: &FormData,
        user: &User,
    ) -> Result<ValidatedForm, ValidationError> {
        // Field order here must match FormField::REQUIRED.
        let validated = ValidatedForm {
            revenue: required(form, FormField::Revenue)?,
            cogs: required(form, FormField::Cogs)?,
            expenses: required(form, FormField::Expenses)?,
            assets: required(form, FormField::Assets)?,
            liabilities: required(form, FormField::Liabilities)?,
            equity: required(form, FormField::Equity)?,
            sales: required(form, FormField::Sales)?,
            purchases: required(form, FormField::Purchases)?,
            vat_charged: required(form, FormField::VatCharged)?,
            vat_paid: required(form, FormField::VatPaid)?,
            income: required(form, FormField::Income)?,
            self_assessment_expenses: required(form, FormField::SelfAssessmentExpenses)?,
        };

        self.check_vat_registration(validated.sales, user)?;
        check_balance_sheet(&validated)?;

        Ok(validated)
    }

    fn check_vat_registration(
        &self,
        sales: Decimal,
        user: &User,
    ) -> Result<(), ValidationError> {
        if sales > self.rules.vat_threshold && !user.vat_registered {
            return Err(ValidationError::VatThreshold {
                sales,
                threshold: self.rules.vat_threshold,
            });
        }
        Ok(())
    }
}

impl Default for FormValidator {
    fn default() -> Self {
        Self::new(ValidationRules::default())
    }
}

fn required(
    form: &FormData,
    field: FormField,
) -> Result<Decimal, ValidationError> {
    let raw = form.get(field);
    if is_blank(raw) {
        return Err(ValidationError::MissingField(field));
    }
    parse_amount(raw).map_err(|_| ValidationError::NotNumeric(field))
}

fn pounds(value: &Decimal) -> String {
    format_pounds(*value)
}

fn check_balance_sheet(form: &ValidatedForm) -> Result<(), ValidationError> {
    // A sum past Decimal::MAX exceeds any assets value; past Decimal::MIN it
    // is below all of them. Both operands share a sign when the sum overflows.
    let short = match form.liabilities.checked_add(form.equity) {
        Some(sum) => form.assets < sum,
        None => form.liabilities.is_sign_positive(),
    };
    if short {
        return Err(ValidationError::BalanceSheetMismatch {
            assets: form.assets,
            liabilities_plus_equity: form.liabilities.saturating_add(form.equity),
        });
    }
    Ok(())
}
