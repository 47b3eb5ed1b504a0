//! Catalog synchronization pipeline.
//!
//! ## What this does
//! - Fetches the full remote catalog with bounded-concurrency pagination.
//! - Loads the prior persisted set and **merges** the fetch into it: new
//!   identifiers are inserted, re-fetched ones fully overwritten, rows the
//!   fetch did not mention kept as-is (no deletion).
//! - **Sequences** the merged set into the fetch's order and saves it
//!   atomically.
//!
//! ## All-or-nothing
//! Every fetch or store error aborts the run before the save, so the
//! persisted file either reflects the whole merge or is left untouched.

pub mod merge;
pub mod sequence;

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use catalog_ingestor::{paginate::ParallelPaginator, providers::messari::MessariProvider};
use tracing::info;

use crate::{config::SyncConfig, store::CsvStore};

/// Options for one sync run.
pub struct SyncOptions {
    /// If true, fetch and merge but skip the final save.
    pub dry_run: bool,
}

/// Counters describing one completed sync run.
#[derive(Debug, Default)]
pub struct SyncReport {
    /// Records returned by the remote fetch.
    pub fetched: usize,
    /// Fetched identifiers that were not in the prior store.
    pub inserted: usize,
    /// Fetched identifiers that overwrote a prior row.
    pub updated: usize,
    /// Prior rows kept untouched because the fetch did not mention them.
    pub retained: usize,
    /// Rows in the final persisted set.
    pub total: usize,
}

/// Runs the fetch → merge → sequence → save pipeline against `store_path`.
///
/// Returns the run counters on success. On any error the persisted file is
/// left exactly as it was.
pub async fn sync_catalog(
    config: &SyncConfig,
    store_path: &Path,
    opt: SyncOptions,
) -> anyhow::Result<SyncReport> {
    let store = CsvStore::new(store_path);
    let prior = store.load().context("load prior store")?;
    info!(path = %store_path.display(), rows = prior.len(), "loaded prior store");

    let provider = MessariProvider::new(&config.fetch).context("build catalog provider")?;
    let paginator = ParallelPaginator::new(Arc::new(provider), config.fetch.concurrency);
    let fetched = paginator.fetch_all().await.context("fetch remote catalog")?;
    info!(records = fetched.len(), "fetched remote catalog");

    let fetched_len = fetched.len();
    let (merged, merge_report) = merge::merge_catalog(prior, fetched);
    let records = sequence::sequence_records(merged);

    let report = SyncReport {
        fetched: fetched_len,
        inserted: merge_report.inserted,
        updated: merge_report.updated,
        retained: merge_report.retained,
        total: records.len(),
    };

    if opt.dry_run {
        info!("dry run, skipping save");
        return Ok(report);
    }

    store.save(&records).context("save merged store")?;
    info!(path = %store_path.display(), rows = report.total, "saved catalog");

    Ok(report)
}
