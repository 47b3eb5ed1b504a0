use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use catalog_sync::config::{SyncConfig, load_config_path};
use catalog_sync::store::DEFAULT_STORE_FILE;
use catalog_sync::sync::{SyncOptions, sync_catalog};

#[derive(Parser)]
#[command(version, about = "Sync the remote cryptocurrency catalog into a CSV file")]
struct Cli {
    /// Target CSV file.
    #[arg(default_value = DEFAULT_STORE_FILE)]
    file: PathBuf,

    /// TOML config overriding the built-in fetch defaults.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Fetch and merge, but do not write the store.
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config_path(path)?,
        None => SyncConfig::default(),
    };

    let report = sync_catalog(
        &config,
        &cli.file,
        SyncOptions {
            dry_run: cli.dry_run,
        },
    )
    .await?;

    info!(
        fetched = report.fetched,
        inserted = report.inserted,
        updated = report.updated,
        retained = report.retained,
        total = report.total,
        "catalog sync complete"
    );

    Ok(())
}
