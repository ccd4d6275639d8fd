use std::collections::HashSet;

use crate::constants::ranking::UNPRICED_SENTINEL;
use crate::models::Record;

/// Keeps `primary` as-is and appends the `secondary` records whose identity
/// does not appear in `primary`, in their original order. Repeats within
/// `secondary` are kept.
#[must_use]
pub fn merge(primary: Vec<Record>, secondary: Vec<Record>) -> Vec<Record> {
    let primary_ids: HashSet<String> =
        primary.iter().map(|r| r.identity().to_string()).collect();
    let mut merged = primary;

    merged.extend(
        secondary
            .into_iter()
            .filter(|r| !primary_ids.contains(r.identity())),
    );

    merged
}

/// Stable sort: names containing `query` (case-insensitive) first, then
/// ascending price with unpriced records treated as 999.
pub fn rank(records: &mut [Record], query: &str) {
    let needle = query.trim().to_lowercase();

    records.sort_by(|a, b| {
        let a_match = a.name().to_lowercase().contains(&needle);
        let b_match = b.name().to_lowercase().contains(&needle);

        b_match
            .cmp(&a_match)
            .then_with(|| effective_price(a).total_cmp(&effective_price(b)))
    });
}

fn effective_price(record: &Record) -> f64 {
    record
        .price()
        .filter(|p| *p > 0.0)
        .unwrap_or(UNPRICED_SENTINEL)
}

/// `rank` applied to an owned list.
#[must_use]
pub fn ranked(mut records: Vec<Record>, query: &str) -> Vec<Record> {
    rank(&mut records, query);
    records
}
