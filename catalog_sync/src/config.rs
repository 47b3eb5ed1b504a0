//! Sync configuration: parsing, validation, and loading.
//!
//! The configuration is TOML-backed and entirely optional: every knob has a
//! compiled default, so the binary runs with no config file at all. A file,
//! when given, may override any subset of the fetch settings:
//!
//! ```toml
//! [fetch]
//! concurrency = 4
//! page_size = 250
//! max_retries = 5
//! ```
//!
//! Entrypoints:
//! - Parse + validate from a TOML string: [`load_config_str`]
//! - Parse + validate from a file path: [`load_config_path`]

use anyhow::{Context, bail};
use catalog_ingestor::config::FetchConfig;
use serde::{Deserialize, Serialize};
use toml::from_str;

/// Top-level configuration for one sync run.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct SyncConfig {
    /// Remote fetch settings: endpoint, page size, concurrency, retries.
    pub fetch: FetchConfig,
}

fn validate(config: &SyncConfig) -> anyhow::Result<()> {
    if config.fetch.api_base.trim().is_empty() {
        bail!("fetch.api_base cannot be empty");
    }
    if config.fetch.page_size == 0 {
        bail!("fetch.page_size must be at least 1");
    }
    if config.fetch.concurrency == 0 {
        bail!("fetch.concurrency must be at least 1");
    }
    Ok(())
}

/// Parse and validate a sync configuration from a TOML string.
///
/// Errors:
/// - TOML parse failures, including unknown keys
/// - Values the pipeline cannot run with (empty endpoint, zero page size or
///   concurrency)
pub fn load_config_str(toml_str: &str) -> anyhow::Result<SyncConfig> {
    let config: SyncConfig = from_str(toml_str).context("failed to parse sync config TOML")?;
    validate(&config)?;
    Ok(config)
}

/// Read a configuration TOML file from disk, parse, and validate it.
///
/// See [`load_config_str`] for details.
pub fn load_config_path(path: impl AsRef<std::path::Path>) -> anyhow::Result<SyncConfig> {
    let text = std::fs::read_to_string(path.as_ref())
        .with_context(|| format!("read config file {}", path.as_ref().display()))?;
    load_config_str(&text)
}
