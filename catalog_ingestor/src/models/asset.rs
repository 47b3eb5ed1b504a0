//! Canonical representation of one catalog entry.

use serde::{Deserialize, Serialize};

/// One asset in the remote catalog.
///
/// The identifier is the natural key: globally unique and stable across
/// fetches. Every other field may change from one fetch to the next.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    /// Stable unique identifier assigned by the remote service.
    pub id: String,
    /// Ticker symbol (e.g., "BTC").
    pub symbol: String,
    /// Human-readable name (e.g., "Bitcoin").
    pub name: String,
    /// URL-safe name used by the remote service.
    pub slug: String,
    /// Latest USD price; absent when the service reports none.
    pub price_usd: Option<f64>,
    /// Market-cap rank; absent when the service reports none.
    pub rank: Option<u64>,
}
