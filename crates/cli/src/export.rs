//! Flat CSV report of reconciliation outcomes, one row per outcome.

use std::io::Write;

use invoice_recon::{InvoiceRecord, LabelStyle, ReconOutcome};

const HEADERS: [&str; 14] = [
    "key",
    "remark",
    "confidence",
    "field_diffs",
    "a_gstin",
    "a_name",
    "a_invoice_number",
    "a_invoice_date",
    "a_taxable_value",
    "b_gstin",
    "b_name",
    "b_invoice_number",
    "b_invoice_date",
    "b_taxable_value",
];

fn record_cells(record: Option<&InvoiceRecord>) -> [String; 5] {
    match record {
        Some(r) => [
            r.gstin.clone(),
            r.name.clone(),
            r.invoice_number.clone(),
            r.invoice_date.map(|d| d.to_string()).unwrap_or_default(),
            r.taxable_value.to_string(),
        ],
        None => Default::default(),
    }
}

pub fn write_outcomes_csv<W: Write>(
    writer: W,
    outcomes: &[ReconOutcome],
    labels: LabelStyle,
) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(HEADERS)?;

    for o in outcomes {
        let diffs = o
            .field_diffs
            .as_ref()
            .map(|set| set.iter().map(|f| f.to_string()).collect::<Vec<_>>().join("; "))
            .unwrap_or_default();

        let mut row = vec![
            o.key.clone(),
            o.remark.label(labels).to_string(),
            o.confidence.map(|c| c.to_string()).unwrap_or_default(),
            diffs,
        ];
        row.extend(record_cells(o.record_a.as_ref()));
        row.extend(record_cells(o.record_b.as_ref()));
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use invoice_recon::{Confidence, Field};
    use rust_decimal::Decimal;
    use std::collections::BTreeSet;

    fn rec(inv: &str, value: i64) -> InvoiceRecord {
        InvoiceRecord::new("G1", "Acme, Pvt Ltd", inv, None, Decimal::from(value))
    }

    #[test]
    fn writes_header_and_rows() {
        let outcomes = vec![
            ReconOutcome::paired(
                "G1-INV-1".into(),
                &rec("INV-1", 100),
                &rec("INV-1", 105),
                Confidence::High,
                BTreeSet::from([Field::InvoiceDate, Field::TaxableValue]),
            ),
            ReconOutcome::only_in_a("G1-INV-2".into(), &rec("INV-2", 7)),
        ];
        let mut buf = Vec::new();
        write_outcomes_csv(&mut buf, &outcomes, LabelStyle::Legacy).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("key,remark,confidence,field_diffs,a_gstin"));
        assert_eq!(
            lines[1],
            "G1-INV-1,Partially Matched,high,invoice date; taxable value,G1,\"Acme, Pvt Ltd\",INV-1,,100,G1,\"Acme, Pvt Ltd\",INV-1,,105"
        );
        assert_eq!(lines[2], "G1-INV-2,In File B only,,,G1,\"Acme, Pvt Ltd\",INV-2,,7,,,,,");
    }
}
