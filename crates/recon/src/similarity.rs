//! Predicates used to score fuzzy candidates and to compute field diffs.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::config::MatchingConfig;
use crate::key::normalize_component;
use crate::model::InvoiceRecord;

/// Lowercase and keep only alphanumerics, so "M/s. Acme Pvt. Ltd" becomes "msacmepvtltd".
pub fn normalize_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// One normalized name contains the other. Handles short names vs full legal names.
/// An empty name is never similar to anything.
pub fn names_similar(a: &str, b: &str) -> bool {
    let a = normalize_name(a);
    let b = normalize_name(b);
    if a.is_empty() || b.is_empty() {
        return false;
    }
    a.contains(&b) || b.contains(&a)
}

pub fn values_close(a: Decimal, b: Decimal, tolerance: Decimal) -> bool {
    (a - b).abs() <= tolerance
}

/// Both dates known and within `window_days` of each other.
pub fn dates_close(a: Option<NaiveDate>, b: Option<NaiveDate>, window_days: u32) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => (a - b).num_days().unsigned_abs() <= u64::from(window_days),
        _ => false,
    }
}

pub fn same_gstin(a: &InvoiceRecord, b: &InvoiceRecord) -> bool {
    normalize_component(&a.gstin) == normalize_component(&b.gstin)
}

/// Weighted fuzzy score for a candidate pair. Does not check the GSTIN gate.
pub fn score(a: &InvoiceRecord, b: &InvoiceRecord, config: &MatchingConfig) -> u32 {
    let mut total: u32 = 0;
    if names_similar(&a.name, &b.name) {
        total = total.saturating_add(config.name_weight);
    }
    if values_close(a.taxable_value, b.taxable_value, config.value_tolerance) {
        total = total.saturating_add(config.value_weight);
    }
    if dates_close(a.invoice_date, b.invoice_date, config.date_window_days) {
        total = total.saturating_add(config.date_weight);
    }
    total
}
