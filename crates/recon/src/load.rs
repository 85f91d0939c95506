//! Canonical-schema CSV ingestion.
//!
//! Column mapping from arbitrary spreadsheet layouts happens upstream; this
//! loader only reads files whose headers are already named per
//! [`ColumnMapping`] and coerces cells into [`InvoiceRecord`]s.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::config::ColumnMapping;
use crate::error::ReconError;
use crate::model::{InvoiceRecord, Side};

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d-%m-%Y", "%d/%m/%Y", "%d-%b-%Y", "%d.%m.%Y"];

/// Parse a date cell. Unknown formats and blanks are `None`, never an error.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}

/// Parse a taxable value cell: strips thousands separators and the rupee sign.
/// Blank cells are zero.
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    let cleaned: String = raw
        .trim()
        .trim_start_matches('₹')
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return Some(Decimal::ZERO);
    }
    Decimal::from_str(&cleaned).ok()
}

/// Load one ledger's CSV rows into records, in file order.
pub fn load_csv_records(
    side: Side,
    csv_data: &str,
    columns: &ColumnMapping,
) -> Result<Vec<InvoiceRecord>, ReconError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(csv_data.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

    let idx = |name: &str| -> Result<usize, ReconError> {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| ReconError::MissingColumn {
                side,
                column: name.into(),
            })
    };

    let gstin_idx = idx(&columns.gstin)?;
    let name_idx = idx(&columns.name)?;
    let invoice_idx = idx(&columns.invoice_number)?;
    let date_idx = idx(&columns.invoice_date)?;
    let value_idx = idx(&columns.taxable_value)?;

    let mut records = Vec::new();

    for row in reader.records() {
        let row = row?;
        let line = row.position().map_or(0, |p| p.line());
        let cell = |i: usize| row.get(i).unwrap_or("");

        let raw_value = cell(value_idx);
        let taxable_value = parse_amount(raw_value).ok_or_else(|| ReconError::AmountParse {
            side,
            line,
            value: raw_value.into(),
        })?;
        if taxable_value.is_sign_negative() && !taxable_value.is_zero() {
            return Err(ReconError::NegativeAmount {
                side,
                line,
                value: raw_value.into(),
            });
        }

        records.push(InvoiceRecord {
            gstin: cell(gstin_idx).to_string(),
            name: cell(name_idx).to_string(),
            invoice_number: cell(invoice_idx).to_string(),
            invoice_date: parse_date(cell(date_idx)),
            taxable_value,
        });
    }

    Ok(records)
}
