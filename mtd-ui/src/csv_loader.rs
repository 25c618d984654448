//! CSV prefill for the submission form.
//!
//! ## CSV Format
//!
//! The header row names form fields by their camelCase keys. Column order
//! does not matter and any subset of the fourteen fields may appear. Only the
//! first data row is used; cells are taken verbatim (after trimming), so a
//! prefilled value is validated exactly like typed input when submitted.
//!
//! | Column                   | Section         |
//! |--------------------------|-----------------|
//! | `revenue`                | P&L             |
//! | `cogs`                   | P&L             |
//! | `expenses`               | P&L             |
//! | `netProfit`              | P&L (optional)  |
//! | `assets`                 | Balance Sheet   |
//! | `liabilities`            | Balance Sheet   |
//! | `equity`                 | Balance Sheet   |
//! | `sales`                  | VAT Return      |
//! | `purchases`              | VAT Return      |
//! | `vatCharged`             | VAT Return      |
//! | `vatPaid`                | VAT Return      |
//! | `income`                 | Self Assessment |
//! | `selfAssessmentExpenses` | Self Assessment |
//! | `allowances`             | Self Assessment (optional) |
//!
//! ### Example
//!
//! ```csv
//! revenue,cogs,expenses,assets,liabilities,equity,sales,purchases,vatCharged,vatPaid,income,selfAssessmentExpenses
//! 120000,40000,20000,50000,20000,30000,80000,30000,16000,6000,60000,10000
//! ```

use std::path::Path;

use anyhow::Context;
use mtd_core::{FormData, FormField};

/// Errors that can occur while reading a prefill CSV.
#[derive(Debug, thiserror::Error)]
pub enum CsvLoadError {
    /// The underlying CSV reader failed (bad quoting, ragged rows, etc.).
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    /// A header cell is not one of the form's field keys.
    #[error("unrecognised column '{column}'")]
    UnknownColumn { column: String },

    /// The same field appears in two header cells.
    #[error("column '{column}' appears more than once")]
    DuplicateColumn { column: String },

    /// There is a header but no data row.
    #[error("no data row after the header")]
    NoData,
}

fn parse_header(headers: &csv::StringRecord) -> Result<Vec<FormField>, CsvLoadError> {
    let mut fields = Vec::with_capacity(headers.len());
    for column in headers {
        let field = FormField::parse(column).ok_or_else(|| CsvLoadError::UnknownColumn {
            column: column.to_string(),
        })?;
        if fields.contains(&field) {
            return Err(CsvLoadError::DuplicateColumn {
                column: column.to_string(),
            });
        }
        fields.push(field);
    }
    Ok(fields)
}

/// Parse CSV text and return the form described by its first data row.
///
/// # Errors
///
/// * [`CsvLoadError::Parse`] if the CSV is structurally invalid.
/// * [`CsvLoadError::UnknownColumn`] / [`CsvLoadError::DuplicateColumn`] for
///   a bad header.
/// * [`CsvLoadError::NoData`] if there is no row after the header.
pub fn load_from_str(input: &str) -> Result<FormData, CsvLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(input.as_bytes());

    let fields = parse_header(reader.headers()?)?;
    let record = reader
        .records()
        .next()
        .ok_or(CsvLoadError::NoData)??;

    Ok(fields.into_iter().zip(record.iter()).collect())
}

/// Read a file from disk and delegate to [`load_from_str`].
pub fn load_from_file(path: &Path) -> anyhow::Result<FormData> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read prefill file '{}'", path.display()))?;
    let form = load_from_str(&contents)
        .with_context(|| format!("Failed to load prefill file '{}'", path.display()))?;
    Ok(form)
}
