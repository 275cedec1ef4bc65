//! Search filter over the record list.

use crate::model::CryptoRecord;

/// Returns the records whose name or symbol contains `query`, ignoring case.
///
/// An empty query matches everything. Order is preserved. The query is used as
/// typed; surrounding whitespace is part of the needle.
pub fn filter(all: &[CryptoRecord], query: &str) -> Vec<CryptoRecord> {
    if query.is_empty() {
        return all.to_vec();
    }

    let needle = query.to_lowercase();
    all.iter()
        .filter(|record| matches(record, &needle))
        .cloned()
        .collect()
}

/// Checks a record against an already lowercased needle.
pub fn matches(record: &CryptoRecord, needle: &str) -> bool {
    record.name.to_lowercase().contains(needle) || record.symbol.to_lowercase().contains(needle)
}
