use std::borrow::Cow;

use tracing::{debug, warn};

use crate::aggregate::{aggregate_records, find_duplicate_key};
use crate::config::{DuplicatePolicy, MatchingConfig, ReconConfig};
use crate::error::ReconError;
use crate::key::make_key;
use crate::matcher::{match_exact, match_fuzzy};
use crate::model::{InvoiceRecord, ReconInput, ReconMeta, ReconOutcome, ReconResult, Side};
use crate::summary::compute_summary;

/// Run reconciliation per config. Returns outcomes + summary.
pub fn run(config: &ReconConfig, input: &ReconInput) -> Result<ReconResult, ReconError> {
    let mut outcomes = reconcile(&input.a, &input.b, &config.matching)?;
    for o in &mut outcomes {
        o.label = Some(o.remark.label(config.output.labels));
    }
    let summary = compute_summary(&outcomes, config.output.labels);

    Ok(ReconResult {
        meta: ReconMeta {
            config_name: config.name.clone(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
            labels: config.output.labels,
        },
        summary,
        outcomes,
    })
}

/// Reconcile ledger A against ledger B.
///
/// Output order: exact pairs (A order), fuzzy pairs (A order), A-only rows
/// (A order), then B-only rows (B order). Every input record appears in
/// exactly one outcome. The only failure is a duplicate key under
/// [`DuplicatePolicy::Reject`].
pub fn reconcile(
    a: &[InvoiceRecord],
    b: &[InvoiceRecord],
    config: &MatchingConfig,
) -> Result<Vec<ReconOutcome>, ReconError> {
    let a = prepare(Side::A, a, config.duplicates)?;
    let b = prepare(Side::B, b, config.duplicates)?;

    let exact = match_exact(&a, &b, config);
    debug!(
        exact_pairs = exact.matched.len(),
        unmatched_a = exact.unmatched_a.len(),
        unmatched_b = exact.unmatched_b.len(),
        "exact pass done"
    );

    let fuzzy = match_fuzzy(&exact.unmatched_a, &exact.unmatched_b, config);
    debug!(
        fuzzy_pairs = fuzzy.matched.len(),
        only_in_a = fuzzy.leftover_a.len(),
        only_in_b = fuzzy.leftover_b.len(),
        "fuzzy pass done"
    );

    let mut outcomes = Vec::with_capacity(
        exact.matched.len()
            + fuzzy.matched.len()
            + fuzzy.leftover_a.len()
            + fuzzy.leftover_b.len(),
    );
    outcomes.extend(exact.matched);
    outcomes.extend(fuzzy.matched);
    outcomes.extend(
        fuzzy
            .leftover_a
            .iter()
            .map(|r| ReconOutcome::only_in_a(make_key(r).to_string(), r)),
    );
    outcomes.extend(
        fuzzy
            .leftover_b
            .iter()
            .map(|r| ReconOutcome::only_in_b(make_key(r).to_string(), r)),
    );

    Ok(outcomes)
}

/// Enforce the one-record-per-key precondition for one side.
fn prepare(
    side: Side,
    records: &[InvoiceRecord],
    policy: DuplicatePolicy,
) -> Result<Cow<'_, [InvoiceRecord]>, ReconError> {
    match policy {
        DuplicatePolicy::Reject => match find_duplicate_key(records) {
            Some(key) => Err(ReconError::DuplicateKey {
                side,
                key: key.to_string(),
            }),
            None => Ok(Cow::Borrowed(records)),
        },
        DuplicatePolicy::Sum => {
            let merged = aggregate_records(records);
            if merged.len() < records.len() {
                warn!(
                    %side,
                    merged = records.len() - merged.len(),
                    "summed records sharing a match key"
                );
            }
            Ok(Cow::Owned(merged))
        }
    }
}
