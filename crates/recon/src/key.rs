use crate::model::{InvoiceRecord, MatchKey};

/// Trim + uppercase. Used for both key components.
pub fn normalize_component(s: &str) -> String {
    s.trim().to_uppercase()
}

/// Build the exact-match key for a record. Only `gstin` and
/// `invoice_number` contribute.
pub fn make_key(record: &InvoiceRecord) -> MatchKey {
    MatchKey {
        gstin: normalize_component(&record.gstin),
        invoice_number: normalize_component(&record.invoice_number),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn rec(gstin: &str, inv: &str, name: &str, value: i64) -> InvoiceRecord {
        InvoiceRecord::new(
            gstin,
            name,
            inv,
            NaiveDate::from_ymd_opt(2024, 4, 1),
            Decimal::from(value),
        )
    }

    #[test]
    fn key_ignores_case_and_whitespace() {
        let a = make_key(&rec(" 27aapfu0939f1zv ", "inv/001 ", "Acme", 100));
        let b = make_key(&rec("27AAPFU0939F1ZV", "INV/001", "Something Else", 999));
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "27AAPFU0939F1ZV-INV/001");
        assert!(a.is_valid());
    }

    #[test]
    fn empty_component_is_invalid() {
        assert!(!make_key(&rec("", "INV-1", "Acme", 1)).is_valid());
        assert!(!make_key(&rec("G1", "   ", "Acme", 1)).is_valid());
        assert_eq!(make_key(&rec(" ", "", "Acme", 1)).to_string(), "-");
    }
}
