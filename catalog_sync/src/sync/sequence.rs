//! Final ordering of the merged set.

use std::cmp::Ordering;

use indexmap::IndexMap;

use crate::store::RecordSet;
use crate::sync::merge::Ranked;

/// Sorts the merged set into fetch order and strips the transient rank.
///
/// Ranked rows come first, ascending by rank. Rows without a rank (prior
/// rows this fetch did not mention) follow, keeping their relative order
/// from the prior store; the sort is stable, so that order is deterministic.
/// The rank cannot leak into the persisted file: the output row type does
/// not carry it.
pub fn sequence_records(merged: IndexMap<String, Ranked>) -> RecordSet {
    let mut rows: Vec<Ranked> = merged.into_values().collect();
    rows.sort_by(|a, b| match (a.rank, b.rank) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    rows.into_iter()
        .map(|ranked| (ranked.row.id.clone(), ranked.row))
        .collect()
}
