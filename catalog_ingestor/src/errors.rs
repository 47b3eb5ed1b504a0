use thiserror::Error;

/// Errors that can occur while fetching catalog pages from a provider.
#[derive(Debug, Error)]
pub enum FetchError {
    /// A retryable transport problem (timeout, connection reset, HTTP 5xx).
    #[error("transient fetch error: {0}")]
    Transient(String),

    /// The API returned an error status other than the end-of-data signal.
    #[error("API error {code}: {message}")]
    Api {
        /// Error code reported in the response status envelope.
        code: i64,
        /// Human-readable message reported alongside the code.
        message: String,
    },

    /// The response body could not be decoded into the expected shape.
    #[error("failed to decode API response: {0}")]
    Decode(String),

    /// A transient error persisted through every allowed retry.
    #[error("retries exhausted after {attempts} attempts: {last}")]
    RetriesExhausted {
        /// Total attempts made, including the first.
        attempts: u32,
        /// The transient error observed on the final attempt.
        last: String,
    },

    /// A client-side failure independent of the remote service's behavior
    /// (task join, HTTP client construction, a request that could not be
    /// built). Never retried.
    #[error("internal fetch error: {0}")]
    Internal(String),
}

impl FetchError {
    /// Whether the request that produced this error may be retried.
    pub fn is_transient(&self) -> bool {
        matches!(self, FetchError::Transient(_))
    }
}
