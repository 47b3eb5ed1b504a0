use std::{error::Error as _, time::Duration};

use async_trait::async_trait;
use reqwest::Client;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::{
    config::FetchConfig,
    errors::FetchError,
    models::asset::Asset,
    providers::{CatalogProvider, messari::response::MessariResponse},
};

/// Field projection sent with every request; matches exactly the attributes
/// of [`Asset`] so response bodies stay small.
const ASSET_FIELDS: &str =
    "id,slug,symbol,name,metrics/market_data/price_usd,metrics/marketcap/rank";

/// Status-envelope error code meaning the requested page is past the end of
/// the collection. Not an error: it is the normal termination signal.
const PAST_LAST_PAGE: i64 = 404;

/// Catalog provider backed by the Messari assets endpoint.
pub struct MessariProvider {
    client: Client,
    api_base: String,
    page_size: u32,
    max_retries: u32,
    base_delay_ms: u64,
}

impl MessariProvider {
    /// Creates a new Messari provider.
    ///
    /// The underlying HTTP client carries the configured per-request timeout
    /// and its connection pool is shared by all concurrent page fetches.
    pub fn new(config: &FetchConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| FetchError::Internal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_base: config.api_base.clone(),
            page_size: config.page_size,
            max_retries: config.max_retries,
            base_delay_ms: config.base_delay_ms,
        })
    }

    async fn fetch_page_once(&self, page: u32) -> Result<Vec<Asset>, FetchError> {
        let response = self
            .client
            .get(&self.api_base)
            .query(&[
                ("page", page.to_string()),
                ("limit", self.page_size.to_string()),
                ("fields", ASSET_FIELDS.to_string()),
            ])
            .send()
            .await
            .map_err(classify_request_error)?;

        let status = response.status();
        if status.is_server_error() {
            return Err(FetchError::Transient(format!("HTTP {status} from catalog API")));
        }

        // The end-of-data signal arrives as an HTTP 404 whose body still
        // carries the status envelope, so the body is decoded regardless of
        // the HTTP status.
        let body = response
            .json::<MessariResponse>()
            .await
            .map_err(classify_request_error)?;

        let error_code = body.status.as_ref().and_then(|s| s.error_code);
        match error_code {
            Some(PAST_LAST_PAGE) => {
                debug!(page, "past last page");
                Ok(Vec::new())
            }
            Some(code) => {
                let message = body
                    .status
                    .and_then(|s| s.error_message)
                    .unwrap_or_else(|| "unknown API error".to_string());
                Err(FetchError::Api { code, message })
            }
            None if !status.is_success() => Err(FetchError::Api {
                code: i64::from(status.as_u16()),
                message: format!("unexpected HTTP {status} with no API error code"),
            }),
            None => {
                // A success envelope must carry a data array; an absent one
                // is a malformed body, not an empty page.
                let data = body.data.ok_or_else(|| {
                    FetchError::Decode(
                        "response carries neither a data array nor an error code".to_string(),
                    )
                })?;
                let assets = data
                    .into_iter()
                    .map(|raw| {
                        let (price_usd, rank) = match raw.metrics {
                            Some(metrics) => (
                                metrics.market_data.and_then(|m| m.price_usd),
                                metrics.marketcap.and_then(|m| m.rank),
                            ),
                            None => (None, None),
                        };
                        Asset {
                            id: raw.id,
                            symbol: raw.symbol.unwrap_or_default(),
                            name: raw.name.unwrap_or_default(),
                            slug: raw.slug.unwrap_or_default(),
                            price_usd,
                            rank,
                        }
                    })
                    .collect();
                Ok(assets)
            }
        }
    }
}

#[async_trait]
impl CatalogProvider for MessariProvider {
    /// Fetches one page, retrying transient failures with exponential
    /// backoff before escalating.
    async fn fetch_page(&self, page: u32) -> Result<Vec<Asset>, FetchError> {
        let mut attempt: u32 = 0;
        loop {
            match self.fetch_page_once(page).await {
                Ok(assets) => return Ok(assets),
                Err(err) if err.is_transient() => {
                    if attempt >= self.max_retries {
                        return Err(FetchError::RetriesExhausted {
                            attempts: attempt + 1,
                            last: err.to_string(),
                        });
                    }
                    let delay_ms = self.base_delay_ms.saturating_mul(2u64.saturating_pow(attempt));
                    warn!(page, attempt, delay_ms, error = %err, "transient fetch error, retrying");
                    sleep(Duration::from_millis(delay_ms)).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

/// Maps a `reqwest` failure from either the send or the body-read phase
/// onto the fetch taxonomy.
///
/// Request-construction and redirect-policy failures are deterministic, so
/// they surface as internal errors instead of burning retries. A body that
/// arrived but does not decode is fatal. Everything else (timeout, refused
/// connection, reset mid-request or mid-body) is transient.
fn classify_request_error(err: reqwest::Error) -> FetchError {
    if err.is_builder() || err.is_redirect() {
        FetchError::Internal(err.to_string())
    } else if err.is_timeout() || err.is_connect() || has_io_source(&err) {
        FetchError::Transient(err.to_string())
    } else if err.is_decode() {
        FetchError::Decode(err.to_string())
    } else {
        FetchError::Transient(err.to_string())
    }
}

/// Transport failures during the body read are reported by `reqwest` as
/// decode errors; an `io::Error` in the source chain tells them apart from a
/// body that arrived intact but failed to parse.
fn has_io_source(err: &reqwest::Error) -> bool {
    let mut source = err.source();
    while let Some(cause) = source {
        if cause.is::<std::io::Error>() {
            return true;
        }
        source = cause.source();
    }
    false
}
