use std::collections::BTreeSet;

use crate::config::MatchingConfig;
use crate::key::normalize_component;
use crate::model::{Field, InvoiceRecord};
use crate::similarity::names_similar;

/// Fields that disagree between a paired A and B record.
///
/// A missing date or name on either side counts as a difference, so such a
/// pair can never be an exact `Match`.
pub fn field_diffs(a: &InvoiceRecord, b: &InvoiceRecord, config: &MatchingConfig) -> BTreeSet<Field> {
    let mut diffs = BTreeSet::new();

    if normalize_component(&a.gstin) != normalize_component(&b.gstin) {
        diffs.insert(Field::Gstin);
    }
    if normalize_component(&a.invoice_number) != normalize_component(&b.invoice_number) {
        diffs.insert(Field::InvoiceNumber);
    }
    if !names_similar(&a.name, &b.name) {
        diffs.insert(Field::Name);
    }
    match (a.invoice_date, b.invoice_date) {
        (Some(da), Some(db)) if da == db => {}
        _ => {
            diffs.insert(Field::InvoiceDate);
        }
    }
    if (a.taxable_value - b.taxable_value).abs() >= config.exact_epsilon {
        diffs.insert(Field::TaxableValue);
    }

    diffs
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn rec(gstin: &str, name: &str, inv: &str, date: Option<&str>, value: &str) -> InvoiceRecord {
        InvoiceRecord::new(
            gstin,
            name,
            inv,
            date.map(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()),
            Decimal::from_str(value).unwrap(),
        )
    }

    #[test]
    fn identical_records_have_no_diffs() {
        let a = rec("g1", "Acme Pvt Ltd", "inv-1", Some("2024-04-01"), "100.00");
        let b = rec("G1 ", "ACME", " INV-1", Some("2024-04-01"), "100");
        assert!(field_diffs(&a, &b, &MatchingConfig::default()).is_empty());
    }

    #[test]
    fn value_epsilon_is_strict() {
        let cfg = MatchingConfig::default();
        let a = rec("G1", "Acme", "INV-1", Some("2024-04-01"), "100.000");
        let within = rec("G1", "Acme", "INV-1", Some("2024-04-01"), "100.0009");
        let at_edge = rec("G1", "Acme", "INV-1", Some("2024-04-01"), "100.001");
        assert!(field_diffs(&a, &within, &cfg).is_empty());
        assert_eq!(field_diffs(&a, &at_edge, &cfg), BTreeSet::from([Field::TaxableValue]));
    }

    #[test]
    fn every_field_can_differ() {
        let a = rec("G1", "Acme", "INV-1", Some("2024-04-01"), "100");
        let b = rec("G2", "Apex", "INV-2", Some("2024-04-02"), "105");
        let diffs = field_diffs(&a, &b, &MatchingConfig::default());
        assert_eq!(
            diffs.into_iter().collect::<Vec<_>>(),
            vec![
                Field::Gstin,
                Field::InvoiceNumber,
                Field::Name,
                Field::InvoiceDate,
                Field::TaxableValue
            ]
        );
    }

    #[test]
    fn missing_date_or_name_is_a_diff() {
        let cfg = MatchingConfig::default();
        let a = rec("G1", "", "INV-1", None, "100");
        let b = rec("G1", "", "INV-1", None, "100");
        assert_eq!(
            field_diffs(&a, &b, &cfg),
            BTreeSet::from([Field::Name, Field::InvoiceDate])
        );
    }
}
