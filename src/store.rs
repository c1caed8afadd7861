//! In-memory store for the source rainfall datasets.
//!
//! The store owns an immutable [DataSnapshot] behind a reader/writer lock.
//! Query handlers clone the current `Arc` out of the lock and read against
//! that generation, so a concurrent [DataStore::load] can never expose a torn
//! mix of old and new collections: a new snapshot is built off-lock in full
//! and published with a single swap, or not at all.

use crate::cli::CommandLineArgs;
use crate::error::FloodcastError;
use crate::models::{ProcessedResult, Record};

use serde_json::Value;
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use tracing::{event, Level};

/// Normals CSV column holding the district name.
const DISTRICT_COLUMN: &str = "DISTRICT";

/// Locations of the three source data files.
#[derive(Clone, Debug)]
pub struct DataPaths {
    /// Historical rainfall records CSV.
    pub historical_csv: PathBuf,
    /// District-wise rainfall normals CSV.
    pub normals_csv: PathBuf,
    /// Pre-computed risk analysis results JSON.
    pub processed_results: PathBuf,
}

impl DataPaths {
    /// Return the [DataPaths] configured by the command line arguments.
    pub fn from_args(args: &CommandLineArgs) -> Self {
        Self {
            historical_csv: args.historical_csv.clone(),
            normals_csv: args.normals_csv.clone(),
            processed_results: args.processed_results.clone(),
        }
    }
}

/// One complete, immutable generation of the source data.
#[derive(Debug, Default, PartialEq)]
pub struct DataSnapshot {
    /// Rows of the historical rainfall CSV, in file order.
    pub historical: Vec<Record>,
    /// District normals keyed by the `DISTRICT` column. Duplicate keys: last
    /// row wins. Empty string key if the column is absent.
    pub normals: HashMap<String, Record>,
    /// The pre-computed results document, if the file exists.
    pub processed: Option<ProcessedResult>,
}

/// Owner of the in-memory source data.
pub struct DataStore {
    /// Source file locations, fixed at construction.
    paths: DataPaths,

    /// The currently published snapshot.
    current: RwLock<Arc<DataSnapshot>>,
}

impl DataStore {
    /// Create a [DataStore] with an empty initial snapshot.
    ///
    /// Call [DataStore::load] afterwards to populate it; the store serves
    /// empty collections until then.
    pub fn new(paths: DataPaths) -> Self {
        Self {
            paths,
            current: RwLock::new(Arc::new(DataSnapshot::default())),
        }
    }

    /// Return the currently published snapshot.
    pub fn snapshot(&self) -> Arc<DataSnapshot> {
        self.current
            .read()
            .expect("data store lock poisoned")
            .clone()
    }

    /// (Re)load all three source files from disk and publish the result as a
    /// new snapshot.
    ///
    /// Missing files are not errors: the corresponding collection is empty.
    /// On any read or parse error the previously published snapshot remains
    /// in place, untouched.
    pub fn load(&self) -> Result<(), FloodcastError> {
        let historical = if self.paths.historical_csv.exists() {
            read_csv(&self.paths.historical_csv)?
        } else {
            Vec::new()
        };

        let normals = if self.paths.normals_csv.exists() {
            let mut normals = HashMap::new();
            for row in read_csv(&self.paths.normals_csv)? {
                let district = row
                    .get(DISTRICT_COLUMN)
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string();
                normals.insert(district, row);
            }
            normals
        } else {
            HashMap::new()
        };

        let processed = if self.paths.processed_results.exists() {
            let file = File::open(&self.paths.processed_results)?;
            Some(serde_json::from_reader(BufReader::new(file))?)
        } else {
            None
        };

        let next = Arc::new(DataSnapshot {
            historical,
            normals,
            processed,
        });
        event!(
            Level::INFO,
            historical = next.historical.len(),
            districts = next.normals.len(),
            processed = next.processed.is_some(),
            "loaded source data"
        );
        *self.current.write().expect("data store lock poisoned") = next;
        Ok(())
    }
}

#[cfg(test)]
impl DataStore {
    /// Return a store pre-populated with `snapshot`, pointing at no real
    /// files.
    pub(crate) fn with_snapshot(snapshot: DataSnapshot) -> Self {
        let missing = std::env::temp_dir().join("floodcast-nonexistent");
        Self {
            paths: DataPaths {
                historical_csv: missing.join("historical.csv"),
                normals_csv: missing.join("normals.csv"),
                processed_results: missing.join("processed.json"),
            },
            current: RwLock::new(Arc::new(snapshot)),
        }
    }
}

/// Parse a header-labelled CSV file into one [Record] per row.
///
/// Every cell is stored as a string value; no column schema is enforced.
fn read_csv(path: &Path) -> Result<Vec<Record>, FloodcastError> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();
    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let mut row = Record::new();
        for (name, value) in headers.iter().zip(record.iter()) {
            row.insert(name.to_string(), Value::String(value.to_string()));
        }
        rows.push(row);
    }
    Ok(rows)
}
