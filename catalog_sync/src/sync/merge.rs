//! Keyed upsert-merge of a fetched catalog into the prior record set.

use catalog_ingestor::models::asset::Asset;
use indexmap::IndexMap;

use crate::store::{AssetRecord, RecordSet};

/// A record paired with its transient position in the fetched list.
///
/// `rank` is `None` for rows carried over from the prior store that this
/// fetch did not mention. The pairing never reaches the persisted file; the
/// sequencer strips it.
#[derive(Clone, Debug)]
pub struct Ranked {
    /// The row itself.
    pub row: AssetRecord,
    /// 0-based position within the fetched list, if fetched this run.
    pub rank: Option<usize>,
}

/// Counters describing one merge.
#[derive(Debug, Default, PartialEq)]
pub struct MergeReport {
    /// Fetched identifiers that were not in the prior set.
    pub inserted: usize,
    /// Fetched identifiers that replaced a prior row.
    pub updated: usize,
    /// Prior rows the fetch did not mention, kept unchanged.
    pub retained: usize,
}

/// Merges `fetched` into `prior`, keyed by identifier.
///
/// Every fetched asset lands in the result with rank equal to its position
/// in `fetched`, fully replacing any prior row with the same identifier (no
/// per-field patching). Prior rows the fetch did not mention are kept
/// unchanged and unranked. One pass over each input; no nested scans.
///
/// If the fetch carries the same identifier twice, the later occurrence wins
/// and the duplicate is not double-counted.
pub fn merge_catalog(
    prior: RecordSet,
    fetched: Vec<Asset>,
) -> (IndexMap<String, Ranked>, MergeReport) {
    let mut report = MergeReport::default();

    let mut merged: IndexMap<String, Ranked> = prior
        .into_iter()
        .map(|(id, row)| (id, Ranked { row, rank: None }))
        .collect();
    let prior_len = merged.len();

    for (position, asset) in fetched.into_iter().enumerate() {
        let ranked = Ranked {
            row: AssetRecord::from(asset),
            rank: Some(position),
        };
        let id = ranked.row.id.clone();
        match merged.insert(id, ranked) {
            None => report.inserted += 1,
            // Replacing an unranked entry refreshes a prior row; replacing a
            // ranked one is a duplicate within this fetch.
            Some(old) if old.rank.is_none() => report.updated += 1,
            Some(_) => {}
        }
    }

    report.retained = prior_len - report.updated;
    (merged, report)
}
