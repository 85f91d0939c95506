use std::collections::HashSet;

use indexmap::map::Entry;
use indexmap::IndexMap;

use crate::key::make_key;
use crate::model::{InvoiceRecord, MatchKey};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Slot {
    Keyed(MatchKey),
    /// Invalid keys never merge; each record keeps its own slot.
    Unkeyed(usize),
}

/// Sum `taxable_value` over records that share a valid match key.
///
/// Output follows first-seen order. The merged record keeps the name, date and
/// original spelling of the first occurrence.
pub fn aggregate_records(records: &[InvoiceRecord]) -> Vec<InvoiceRecord> {
    let mut groups: IndexMap<Slot, InvoiceRecord> = IndexMap::with_capacity(records.len());

    for (i, rec) in records.iter().enumerate() {
        let key = make_key(rec);
        let slot = if key.is_valid() {
            Slot::Keyed(key)
        } else {
            Slot::Unkeyed(i)
        };
        match groups.entry(slot) {
            Entry::Occupied(mut e) => e.get_mut().taxable_value += rec.taxable_value,
            Entry::Vacant(e) => {
                e.insert(rec.clone());
            }
        }
    }

    groups.into_values().collect()
}

/// First valid match key that occurs more than once, in input order.
pub fn find_duplicate_key(records: &[InvoiceRecord]) -> Option<MatchKey> {
    let mut seen = HashSet::with_capacity(records.len());
    records
        .iter()
        .map(make_key)
        .filter(MatchKey::is_valid)
        .find(|key| !seen.insert(key.clone()))
}
