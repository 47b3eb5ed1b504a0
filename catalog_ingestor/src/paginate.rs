//! Concurrent page-window retrieval with deterministic ordering.
//!
//! [`ParallelPaginator`] walks an unknown-length paged collection in batches
//! of `width` concurrent requests. Each batch is awaited in full and its
//! results are reassembled by launch position, never completion order, so the
//! output is identical no matter how network timing interleaves the
//! responses. The walk stops after the first completed batch containing an
//! empty page; it never stops on a page-count bound.

use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::debug;

use crate::{errors::FetchError, models::asset::Asset, providers::CatalogProvider};

/// Fetches every page of a catalog through a [`CatalogProvider`], `width`
/// pages at a time.
pub struct ParallelPaginator<P> {
    provider: Arc<P>,
    width: usize,
}

impl<P> ParallelPaginator<P>
where
    P: CatalogProvider + Send + Sync + 'static,
{
    /// Creates a paginator issuing `width` concurrent requests per batch.
    ///
    /// A width of zero is treated as one.
    pub fn new(provider: Arc<P>, width: usize) -> Self {
        Self {
            provider,
            width: width.max(1),
        }
    }

    /// Retrieves the whole collection and returns its records concatenated
    /// in ascending page order.
    ///
    /// Batches are strictly sequential: pages `[cursor, cursor + width)` are
    /// fetched concurrently, appended in page order once all have resolved,
    /// and only then is the next batch launched. The walk ends when any page
    /// in the just-completed batch came back empty. Records from the other
    /// pages of that final batch are still appended, so data sitting past an
    /// empty page within the same batch is not lost.
    ///
    /// The first error from any page aborts the remaining in-flight requests
    /// and propagates.
    pub async fn fetch_all(&self) -> Result<Vec<Asset>, FetchError> {
        let mut all = Vec::new();
        let mut cursor: u32 = 1;

        loop {
            let pages = self.fetch_batch(cursor).await?;
            let done = pages.iter().any(Vec::is_empty);

            let records: usize = pages.iter().map(Vec::len).sum();
            debug!(first_page = cursor, records, done, "batch complete");

            for page in pages {
                all.extend(page);
            }
            if done {
                break;
            }
            cursor += self.width as u32;
        }

        Ok(all)
    }

    /// Fetches pages `[first_page, first_page + width)` concurrently,
    /// returning them in page order.
    async fn fetch_batch(&self, first_page: u32) -> Result<Vec<Vec<Asset>>, FetchError> {
        let mut tasks = JoinSet::new();
        for slot in 0..self.width {
            let provider = Arc::clone(&self.provider);
            let page = first_page + slot as u32;
            tasks.spawn(async move { (slot, provider.fetch_page(page).await) });
        }

        // Results land in their launch slot, not in completion order.
        let mut pages: Vec<Option<Vec<Asset>>> = vec![None; self.width];
        while let Some(joined) = tasks.join_next().await {
            let (slot, result) =
                joined.map_err(|e| FetchError::Internal(format!("fetch task failed: {e}")))?;
            match result {
                Ok(assets) => pages[slot] = Some(assets),
                Err(err) => {
                    tasks.abort_all();
                    return Err(err);
                }
            }
        }

        pages
            .into_iter()
            .enumerate()
            .map(|(slot, page)| {
                page.ok_or_else(|| {
                    FetchError::Internal(format!("page slot {slot} never completed"))
                })
            })
            .collect()
    }
}
