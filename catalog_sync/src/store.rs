//! Persisted CSV store for the asset catalog.
//!
//! The store is a single CSV file with a fixed column shape
//! (`ID,Symbol,Name,Slug,Price in USD,Rank`) keyed by the asset identifier.
//! Loading a missing file yields an empty record set; only a malformed file
//! is an error. Saving writes the whole record set to a temporary file in
//! the destination directory and atomically renames it into place, so a
//! failed save never leaves a partial file at the target path.

use std::{
    io,
    path::{Path, PathBuf},
};

use catalog_ingestor::models::asset::Asset;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::debug;

/// Target file used when the command line names none.
pub const DEFAULT_STORE_FILE: &str = "cryptocurrencies.csv";

/// Column order of the persisted file; must match the serde renames on
/// [`AssetRecord`].
const COLUMNS: [&str; 6] = ["ID", "Symbol", "Name", "Slug", "Price in USD", "Rank"];

/// One persisted catalog row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AssetRecord {
    /// Stable unique identifier; the record key, written as its own column.
    #[serde(rename = "ID")]
    pub id: String,
    /// Ticker symbol.
    #[serde(rename = "Symbol")]
    pub symbol: String,
    /// Human-readable name.
    #[serde(rename = "Name")]
    pub name: String,
    /// URL-safe name.
    #[serde(rename = "Slug")]
    pub slug: String,
    /// Latest USD price; blank in the file when unknown.
    #[serde(rename = "Price in USD")]
    pub price_usd: Option<f64>,
    /// Market-cap rank; blank in the file when unknown.
    #[serde(rename = "Rank")]
    pub rank: Option<u64>,
}

impl From<Asset> for AssetRecord {
    fn from(asset: Asset) -> Self {
        Self {
            id: asset.id,
            symbol: asset.symbol,
            name: asset.name,
            slug: asset.slug,
            price_usd: asset.price_usd,
            rank: asset.rank,
        }
    }
}

/// Keyed record set in persisted row order.
pub type RecordSet = IndexMap<String, AssetRecord>;

/// Errors raised by [`CsvStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// The persisted file exists but could not be read or parsed.
    #[error("failed to load store {path}: {message}")]
    Load {
        /// Offending file.
        path: PathBuf,
        /// Underlying read or parse failure.
        message: String,
    },
    /// The record set could not be written durably.
    #[error("failed to save store {path}: {message}")]
    Save {
        /// Destination file.
        path: PathBuf,
        /// Underlying write failure.
        message: String,
    },
}

/// CSV-file-backed record store.
pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    /// Creates a store backed by `path`. The file need not exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file this store reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the persisted record set.
    ///
    /// A missing file is a fresh store and yields an empty set. Columns
    /// beyond the canonical shape (e.g. an ordering column left behind by an
    /// older writer) are ignored. Any other failure is an error; a corrupt
    /// store is never silently treated as empty.
    pub fn load(&self) -> Result<RecordSet, StoreError> {
        let mut reader = match csv::Reader::from_path(&self.path) {
            Ok(reader) => reader,
            Err(err) if is_not_found(&err) => {
                debug!(path = %self.path.display(), "no prior store, starting empty");
                return Ok(RecordSet::new());
            }
            Err(err) => return Err(self.load_error(err)),
        };

        let mut records = RecordSet::new();
        for row in reader.deserialize::<AssetRecord>() {
            let record = row.map_err(|e| self.load_error(e))?;
            records.insert(record.id.clone(), record);
        }
        Ok(records)
    }

    /// Writes the record set in iteration order, atomically replacing any
    /// previous file.
    ///
    /// The header row is always written, even when the set is empty.
    pub fn save(&self, records: &RecordSet) -> Result<(), StoreError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let tmp = NamedTempFile::new_in(dir).map_err(|e| self.save_error(e))?;

        // Automatic headers only appear once a row is serialized, which
        // would leave an empty set as a bare file; write the header row
        // ourselves instead.
        let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(tmp);
        writer.write_record(COLUMNS).map_err(|e| self.save_error(e))?;
        for record in records.values() {
            writer.serialize(record).map_err(|e| self.save_error(e))?;
        }
        let tmp = writer.into_inner().map_err(|e| self.save_error(e))?;
        tmp.persist(&self.path).map_err(|e| self.save_error(e))?;
        Ok(())
    }

    fn load_error(&self, err: impl std::fmt::Display) -> StoreError {
        StoreError::Load {
            path: self.path.clone(),
            message: err.to_string(),
        }
    }

    fn save_error(&self, err: impl std::fmt::Display) -> StoreError {
        StoreError::Save {
            path: self.path.clone(),
            message: err.to_string(),
        }
    }
}

fn is_not_found(err: &csv::Error) -> bool {
    matches!(err.kind(), csv::ErrorKind::Io(io_err) if io_err.kind() == io::ErrorKind::NotFound)
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn record(id: &str, symbol: &str, price_usd: Option<f64>, rank: Option<u64>) -> AssetRecord {
        AssetRecord {
            id: id.to_string(),
            symbol: symbol.to_string(),
            name: symbol.to_string(),
            slug: id.to_string(),
            price_usd,
            rank,
        }
    }

    fn set(records: Vec<AssetRecord>) -> RecordSet {
        records.into_iter().map(|r| (r.id.clone(), r)).collect()
    }

    #[test]
    fn roundtrip_preserves_rows_and_order() {
        let dir = TempDir::new().unwrap();
        let store = CsvStore::new(dir.path().join("assets.csv"));

        let records = set(vec![
            record("btc", "BTC", Some(67421.5), Some(1)),
            record("eth", "ETH", None, None),
        ]);
        store.save(&records).unwrap();

        let raw = std::fs::read_to_string(store.path()).unwrap();
        let mut lines = raw.lines();
        assert_eq!(lines.next(), Some("ID,Symbol,Name,Slug,Price in USD,Rank"));
        assert_eq!(lines.next(), Some("btc,BTC,BTC,btc,67421.5,1"));
        assert_eq!(lines.next(), Some("eth,ETH,ETH,eth,,"));

        let loaded = store.load().unwrap();
        assert_eq!(loaded, records);
        assert_eq!(loaded.keys().collect::<Vec<_>>(), vec!["btc", "eth"]);
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let store = CsvStore::new(dir.path().join("never-written.csv"));

        let loaded = store.load().unwrap();
        assert!(loaded.is_empty());
    }

    #[test]
    fn empty_set_still_writes_the_header_row() {
        let dir = TempDir::new().unwrap();
        let store = CsvStore::new(dir.path().join("assets.csv"));

        store.save(&RecordSet::new()).unwrap();

        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(raw, "ID,Symbol,Name,Slug,Price in USD,Rank\n");
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("assets.csv");
        std::fs::write(
            &path,
            "ID,Symbol,Name,Slug,Price in USD,Rank\nbtc,BTC,Bitcoin,bitcoin,not-a-number,1\n",
        )
        .unwrap();

        let err = CsvStore::new(&path).load().unwrap_err();
        assert!(matches!(err, StoreError::Load { .. }));
    }

    #[test]
    fn leftover_ordering_column_is_dropped_on_rewrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("assets.csv");
        std::fs::write(
            &path,
            "ID,Symbol,Name,Slug,Price in USD,Rank,Order\nbtc,BTC,Bitcoin,bitcoin,67421.5,1,0\n",
        )
        .unwrap();

        let store = CsvStore::new(&path);
        let loaded = store.load().unwrap();
        assert_eq!(loaded["btc"].symbol, "BTC");

        store.save(&loaded).unwrap();
        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(!raw.contains("Order"));
    }

    #[test]
    fn save_replaces_previous_contents() {
        let dir = TempDir::new().unwrap();
        let store = CsvStore::new(dir.path().join("assets.csv"));

        store
            .save(&set(vec![
                record("btc", "BTC", Some(1.0), Some(1)),
                record("eth", "ETH", Some(2.0), Some(2)),
            ]))
            .unwrap();
        store
            .save(&set(vec![record("xrp", "XRP", Some(3.0), Some(1))]))
            .unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert!(loaded.contains_key("xrp"));
    }
}
