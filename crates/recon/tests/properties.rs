// Property tests for the reconciliation engine.
// Run with: cargo test -p invoice-recon --test properties

use chrono::NaiveDate;
use invoice_recon::aggregate::aggregate_records;
use invoice_recon::{reconcile, Confidence, InvoiceRecord, MatchingConfig, ReconOutcome, Remark};
use proptest::prelude::*;
use rust_decimal::Decimal;

fn record() -> impl Strategy<Value = InvoiceRecord> {
    (
        prop::sample::select(vec!["G1", "g1 ", "G2", ""]),
        prop::sample::select(vec!["Acme Pvt Ltd", "ACME", "Beta Traders", "", "Gamma"]),
        prop::sample::select(vec!["INV-1", "inv-1", "INV-2", "INV-3", ""]),
        prop::option::of(0u32..20),
        0i64..50_000,
    )
        .prop_map(|(gstin, name, inv, day, cents)| {
            InvoiceRecord::new(
                gstin,
                name,
                inv,
                day.and_then(|d| NaiveDate::from_ymd_opt(2024, 4, 1 + d)),
                Decimal::new(cents, 2),
            )
        })
}

/// Ledger with at most one record per valid key, as the engine requires.
fn ledger() -> impl Strategy<Value = Vec<InvoiceRecord>> {
    prop::collection::vec(record(), 0..12).prop_map(|rows| aggregate_records(&rows))
}

/// Remove each expected record from `seen` exactly once; true if nothing is left over.
fn same_multiset(expected: &[InvoiceRecord], seen: Vec<&InvoiceRecord>) -> bool {
    let mut remaining = seen;
    for rec in expected {
        match remaining.iter().position(|r| *r == rec) {
            Some(i) => {
                remaining.swap_remove(i);
            }
            None => return false,
        }
    }
    remaining.is_empty()
}

fn check_invariants(o: &ReconOutcome, config: &MatchingConfig) {
    assert!(o.record_a.is_some() || o.record_b.is_some());
    match o.remark {
        Remark::Match => {
            let (a, b) = (o.record_a.as_ref().unwrap(), o.record_b.as_ref().unwrap());
            assert!((a.taxable_value - b.taxable_value).abs() < config.exact_epsilon);
            assert_eq!(o.confidence, Some(Confidence::High));
            assert!(o.field_diffs.as_ref().unwrap().is_empty());
        }
        Remark::PartiallyMatched => {
            assert!(o.record_a.is_some() && o.record_b.is_some());
            let diffs = o.field_diffs.as_ref().unwrap();
            assert!(o.confidence == Some(Confidence::Low) || !diffs.is_empty());
        }
        Remark::OnlyInA => {
            assert!(o.record_a.is_some() && o.record_b.is_none());
            assert!(o.confidence.is_none() && o.field_diffs.is_none());
        }
        Remark::OnlyInB => {
            assert!(o.record_a.is_none() && o.record_b.is_some());
            assert!(o.confidence.is_none() && o.field_diffs.is_none());
        }
    }
}

fn rank(o: &ReconOutcome) -> u8 {
    match (o.remark, o.confidence) {
        (_, Some(Confidence::High)) => 0,
        (_, Some(Confidence::Low)) => 1,
        (Remark::OnlyInA, None) => 2,
        _ => 3,
    }
}

/// True if `picked` occurs in `ledger` as a subsequence, i.e. in ledger order.
fn in_ledger_order(ledger: &[InvoiceRecord], picked: &[&InvoiceRecord]) -> bool {
    let mut next = 0;
    for rec in picked {
        match ledger[next..].iter().position(|r| r == *rec) {
            Some(offset) => next += offset + 1,
            None => return false,
        }
    }
    true
}

proptest! {
    #[test]
    fn every_record_used_exactly_once(a in ledger(), b in ledger()) {
        let config = MatchingConfig::default();
        let out = reconcile(&a, &b, &config).unwrap();

        let seen_a: Vec<&InvoiceRecord> = out.iter().filter_map(|o| o.record_a.as_ref()).collect();
        let seen_b: Vec<&InvoiceRecord> = out.iter().filter_map(|o| o.record_b.as_ref()).collect();
        prop_assert!(same_multiset(&a, seen_a));
        prop_assert!(same_multiset(&b, seen_b));

        for o in &out {
            check_invariants(o, &config);
        }
    }

    #[test]
    fn outcome_groups_are_ordered(a in ledger(), b in ledger()) {
        let out = reconcile(&a, &b, &MatchingConfig::default()).unwrap();
        let ranks: Vec<u8> = out.iter().map(rank).collect();
        let mut sorted = ranks.clone();
        sorted.sort();
        prop_assert_eq!(ranks, sorted);

        for group in 0..3u8 {
            let picked: Vec<&InvoiceRecord> = out
                .iter()
                .filter(|o| rank(o) == group)
                .filter_map(|o| o.record_a.as_ref())
                .collect();
            prop_assert!(in_ledger_order(&a, &picked), "group {} leaves A order", group);
        }
        let only_b: Vec<&InvoiceRecord> = out
            .iter()
            .filter(|o| rank(o) == 3)
            .filter_map(|o| o.record_b.as_ref())
            .collect();
        prop_assert!(in_ledger_order(&b, &only_b), "B-only rows leave B order");
    }

    #[test]
    fn fuzzy_pairs_share_gstin(a in ledger(), b in ledger()) {
        let out = reconcile(&a, &b, &MatchingConfig::default()).unwrap();
        for o in out.iter().filter(|o| o.confidence == Some(Confidence::Low)) {
            let (ra, rb) = (o.record_a.as_ref().unwrap(), o.record_b.as_ref().unwrap());
            prop_assert_eq!(ra.gstin.trim().to_uppercase(), rb.gstin.trim().to_uppercase());
        }
    }

    #[test]
    fn deterministic_across_runs(a in ledger(), b in ledger()) {
        let config = MatchingConfig::default();
        let first = reconcile(&a, &b, &config).unwrap();
        let second = reconcile(&a, &b, &config).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn empty_b_keeps_a_order(a in ledger()) {
        let out = reconcile(&a, &[], &MatchingConfig::default()).unwrap();
        prop_assert_eq!(out.len(), a.len());
        for (o, rec) in out.iter().zip(&a) {
            prop_assert_eq!(o.remark, Remark::OnlyInA);
            prop_assert_eq!(o.record_a.as_ref(), Some(rec));
        }
    }
}
