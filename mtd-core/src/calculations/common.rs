//! Common helpers for reading and presenting form amounts.
//!
//! This module provides the numeric parsing shared by validation and payload
//! construction, plus the currency formatting used in user-facing messages.

use rust_decimal::Decimal;
use thiserror::Error;

/// Error returned when a non-blank string cannot be read as an amount.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid amount '{input}'")]
pub struct AmountParseError {
    pub input: String,
}

/// Returns `true` when the input holds nothing but whitespace.
///
/// Blank input counts as a missing value.
pub fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// Parses a form value into a [`Decimal`].
///
/// Accepts plain decimals (`"1234.56"`), a leading sign and scientific
/// notation (`"1e3"`), with surrounding whitespace ignored. Thousands
/// separators are not numbers: `"1,000"` is rejected.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use mtd_core::calculations::common::parse_amount;
///
/// assert_eq!(parse_amount("1234.56").unwrap(), dec!(1234.56));
/// assert_eq!(parse_amount(" -20 ").unwrap(), dec!(-20));
/// assert_eq!(parse_amount("2.5e3").unwrap(), dec!(2500));
/// assert!(parse_amount("12abc").is_err());
/// assert!(parse_amount("1,000").is_err());
/// ```
pub fn parse_amount(s: &str) -> Result<Decimal, AmountParseError> {
    let trimmed = s.trim();
    let err = || AmountParseError {
        input: s.to_string(),
    };
    // `Decimal::from_str` tolerates `_` separators; a form value may not.
    if trimmed.is_empty() || trimmed.contains('_') {
        return Err(err());
    }
    trimmed
        .parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| err())
}

/// Parses an optional form value. Blank input is `None`.
pub fn parse_optional_amount(s: &str) -> Result<Option<Decimal>, AmountParseError> {
    if is_blank(s) {
        Ok(None)
    } else {
        parse_amount(s).map(Some)
    }
}

/// Absolute difference of two amounts, or `None` if `a - b` does not fit
/// in a [`Decimal`].
pub fn abs_difference(
    a: Decimal,
    b: Decimal,
) -> Option<Decimal> {
    a.checked_sub(b).map(|d| d.abs())
}

/// Formats an amount with comma thousands separators, dropping a zero
/// fractional part.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use mtd_core::calculations::common::format_pounds;
///
/// assert_eq!(format_pounds(dec!(85000)), "85,000");
/// assert_eq!(format_pounds(dec!(1234567.50)), "1,234,567.5");
/// ```
pub fn format_pounds(value: Decimal) -> String {
    let normalized = value.normalize();
    let text = normalized.abs().to_string();
    let (whole, fraction) = match text.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (text.as_str(), None),
    };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if normalized.is_sign_negative() && !normalized.is_zero() {
        "-"
    } else {
        ""
    };
    match fraction {
        Some(fraction) => format!("{sign}{grouped}.{fraction}"),
        None => format!("{sign}{grouped}"),
    }
}
