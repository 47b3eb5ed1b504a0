//! Provider abstraction for remote catalog sources.
//!
//! This module defines the [`CatalogProvider`] trait, the single seam between
//! the pagination machinery and any concrete catalog backend.
//!
//! The contract every implementation must honor:
//! - Page indices are 1-based.
//! - A page index past the end of the collection is NOT an error: it returns
//!   an empty list, which is the authoritative end-of-data signal.
//! - Transient transport problems are retried inside the provider; every
//!   error that escapes `fetch_page` is terminal for the whole run.
//!
//! The trait supports dynamic dispatch (`dyn CatalogProvider`) so callers can
//! pick a backend at runtime.
//!
//! # Example
//!
//! ```rust
//! # use catalog_ingestor::errors::FetchError;
//! # use catalog_ingestor::models::asset::Asset;
//! # use catalog_ingestor::providers::CatalogProvider;
//! # use async_trait::async_trait;
//! struct EmptyProvider;
//! #[async_trait]
//! impl CatalogProvider for EmptyProvider {
//!     async fn fetch_page(&self, _page: u32) -> Result<Vec<Asset>, FetchError> {
//!         Ok(vec![])
//!     }
//! }
//! ```

pub mod messari;

use async_trait::async_trait;

use crate::{errors::FetchError, models::asset::Asset};

/// A source of catalog pages.
#[async_trait]
pub trait CatalogProvider {
    /// Fetches one page of the catalog by its 1-based index.
    ///
    /// Returns an empty list when `page` is past the last page.
    async fn fetch_page(&self, page: u32) -> Result<Vec<Asset>, FetchError>;
}
