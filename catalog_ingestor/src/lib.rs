//! Remote catalog ingestion: canonical models, the provider seam, and
//! bounded-concurrency pagination over an unknown-length collection.

pub mod config;
pub mod errors;
pub mod models;
pub mod paginate;
pub mod providers;
