use std::collections::{BTreeSet, HashMap};

use crate::config::MatchingConfig;
use crate::diff::field_diffs;
use crate::key::{make_key, normalize_component};
use crate::model::{Confidence, InvoiceRecord, MatchKey, ReconOutcome};
use crate::similarity::score;

#[derive(Debug)]
pub struct ExactPassOutput<'a> {
    pub matched: Vec<ReconOutcome>,
    /// A records with an invalid key or no B partner, in A order.
    pub unmatched_a: Vec<&'a InvoiceRecord>,
    /// B records not consumed by an exact pair, in B order.
    pub unmatched_b: Vec<&'a InvoiceRecord>,
}

#[derive(Debug)]
pub struct FuzzyPassOutput<'a> {
    pub matched: Vec<ReconOutcome>,
    pub leftover_a: Vec<&'a InvoiceRecord>,
    pub leftover_b: Vec<&'a InvoiceRecord>,
}

/// Pass 1: pair records whose match keys are equal.
///
/// Each B record is consumed at most once; when several A records share a key
/// the first one in A order takes the partner. If two B records share a key the
/// later one wins the lookup and the earlier one falls through to the fuzzy pool.
pub fn match_exact<'a>(
    a: &'a [InvoiceRecord],
    b: &'a [InvoiceRecord],
    config: &MatchingConfig,
) -> ExactPassOutput<'a> {
    let mut lookup: HashMap<MatchKey, usize> = HashMap::with_capacity(b.len());
    for (bi, rec) in b.iter().enumerate() {
        let key = make_key(rec);
        if key.is_valid() {
            lookup.insert(key, bi);
        }
    }

    let mut consumed = vec![false; b.len()];
    let mut matched = Vec::new();
    let mut unmatched_a = Vec::new();

    for rec_a in a {
        let key = make_key(rec_a);
        if !key.is_valid() {
            unmatched_a.push(rec_a);
            continue;
        }
        match lookup.remove(&key) {
            Some(bi) => {
                consumed[bi] = true;
                let rec_b = &b[bi];
                let diffs = field_diffs(rec_a, rec_b, config);
                matched.push(ReconOutcome::paired(
                    key.to_string(),
                    rec_a,
                    rec_b,
                    Confidence::High,
                    diffs,
                ));
            }
            None => unmatched_a.push(rec_a),
        }
    }

    let unmatched_b = b
        .iter()
        .zip(&consumed)
        .filter(|(_, used)| !**used)
        .map(|(rec, _)| rec)
        .collect();

    ExactPassOutput {
        matched,
        unmatched_a,
        unmatched_b,
    }
}

/// Pass 2: score the leftovers of pass 1 and pair each A record with its best
/// B candidate under the same GSTIN.
///
/// Candidates are visited in B order. Ties keep the first candidate seen, and a
/// consumed candidate leaves the available set immediately.
pub fn match_fuzzy<'a>(
    pool_a: &[&'a InvoiceRecord],
    pool_b: &[&'a InvoiceRecord],
    config: &MatchingConfig,
) -> FuzzyPassOutput<'a> {
    let b_gstins: Vec<String> = pool_b.iter().map(|r| normalize_component(&r.gstin)).collect();
    let mut available: BTreeSet<usize> = (0..pool_b.len()).collect();
    let mut matched = Vec::new();
    let mut leftover_a = Vec::new();

    for &rec_a in pool_a {
        let gstin = normalize_component(&rec_a.gstin);
        let mut best: Option<(usize, u32)> = None;

        // Never pair across counterparties. Two blank GSTINs compare equal.
        for &bi in &available {
            if b_gstins[bi] != gstin {
                continue;
            }
            let s = score(rec_a, pool_b[bi], config);
            if s < config.min_score {
                continue;
            }
            if best.map_or(true, |(_, best_score)| s > best_score) {
                best = Some((bi, s));
            }
        }

        match best {
            Some((bi, _)) => {
                available.remove(&bi);
                let rec_b = pool_b[bi];
                let key = format!("fuzzy-{}-{}", make_key(rec_a), make_key(rec_b));
                let diffs = field_diffs(rec_a, rec_b, config);
                matched.push(ReconOutcome::paired(key, rec_a, rec_b, Confidence::Low, diffs));
            }
            None => leftover_a.push(rec_a),
        }
    }

    let leftover_b = available.iter().map(|&bi| pool_b[bi]).collect();

    FuzzyPassOutput {
        matched,
        leftover_a,
        leftover_b,
    }
}
