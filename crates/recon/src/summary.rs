use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::model::{Confidence, LabelStyle, ReconOutcome, ReconSummary, Remark};

/// Compute summary statistics from reconciliation outcomes.
pub fn compute_summary(outcomes: &[ReconOutcome], labels: LabelStyle) -> ReconSummary {
    let mut by_label: BTreeMap<String, usize> = BTreeMap::new();
    let mut matched = 0;
    let mut partially_matched = 0;
    let mut only_in_a = 0;
    let mut only_in_b = 0;
    let mut high_confidence = 0;
    let mut low_confidence = 0;
    let mut total_value_a = Decimal::ZERO;
    let mut total_value_b = Decimal::ZERO;
    let mut matched_value_a = Decimal::ZERO;
    let mut matched_value_b = Decimal::ZERO;
    let mut partial_value_a = Decimal::ZERO;
    let mut partial_value_b = Decimal::ZERO;

    for o in outcomes {
        *by_label.entry(o.remark.label(labels).to_string()).or_insert(0) += 1;

        let value_a = o.record_a.as_ref().map_or(Decimal::ZERO, |r| r.taxable_value);
        let value_b = o.record_b.as_ref().map_or(Decimal::ZERO, |r| r.taxable_value);
        total_value_a += value_a;
        total_value_b += value_b;

        match o.remark {
            Remark::Match => {
                matched += 1;
                matched_value_a += value_a;
                matched_value_b += value_b;
            }
            Remark::PartiallyMatched => {
                partially_matched += 1;
                partial_value_a += value_a;
                partial_value_b += value_b;
            }
            Remark::OnlyInA => only_in_a += 1,
            Remark::OnlyInB => only_in_b += 1,
        }

        match o.confidence {
            Some(Confidence::High) => high_confidence += 1,
            Some(Confidence::Low) => low_confidence += 1,
            None => {}
        }
    }

    ReconSummary {
        total_outcomes: outcomes.len(),
        matched,
        partially_matched,
        only_in_a,
        only_in_b,
        high_confidence,
        low_confidence,
        by_label,
        total_value_a,
        total_value_b,
        matched_value_a,
        matched_value_b,
        partial_value_a,
        partial_value_b,
    }
}
