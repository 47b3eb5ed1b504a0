//! Fetch configuration: endpoint, pagination shape, and retry policy.

use serde::{Deserialize, Serialize};

/// Default endpoint serving the paginated asset catalog.
pub const DEFAULT_API_BASE: &str = "https://data.messari.io/api/v2/assets";

/// Knobs for the remote fetch phase.
///
/// Every field has a compiled default, so a partial (or absent) config file
/// is fine. Unknown keys are rejected rather than silently ignored.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct FetchConfig {
    /// Base URL of the catalog endpoint.
    pub api_base: String,
    /// Records requested per page.
    pub page_size: u32,
    /// Pages fetched concurrently per batch.
    pub concurrency: usize,
    /// Retries allowed per page after the first attempt fails transiently.
    pub max_retries: u32,
    /// Backoff before retry `n` is `base_delay_ms * 2^n`.
    pub base_delay_ms: u64,
    /// Per-request timeout; a timed-out request counts as transient.
    pub timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            page_size: 500,
            concurrency: 7,
            max_retries: 3,
            base_delay_ms: 1000,
            timeout_secs: 30,
        }
    }
}
