//! Record store: the immutable per-school dataset.
//!
//! The store is built once at startup from the flat CSV dataset and is
//! read-only afterwards. It is passed by reference into the pipeline
//! rather than held as ambient global state, which also makes it safe
//! for unsynchronized concurrent reads.

use crate::models::{Chamber, SchoolRecord};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

/// Failure to build the record store. The host treats any of these as
/// "no data available" and performs no rendering.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to open dataset {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed dataset row: {0}")]
    Csv(#[from] csv::Error),
}

/// The ordered, immutable collection of per-school records.
#[derive(Debug, Clone)]
pub struct RecordStore {
    records: Vec<SchoolRecord>,
}

impl RecordStore {
    /// Load the dataset from a CSV file with the fixed header schema.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let file = File::open(path).map_err(|source| StoreError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let store = Self::from_reader(file)?;
        info!(
            "Loaded {} school records from {}",
            store.len(),
            path.display()
        );
        Ok(store)
    }

    /// Build a store from any CSV reader. Dataset order is preserved.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, StoreError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: SchoolRecord = result?;
            records.push(record);
        }

        debug!("Parsed {} dataset rows", records.len());
        Ok(Self { records })
    }

    /// All records in dataset order.
    pub fn records(&self) -> &[SchoolRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Chambers present in the dataset, sorted.
    pub fn chambers(&self) -> Vec<Chamber> {
        let mut chambers: Vec<Chamber> = self.records.iter().map(|r| r.chamber).collect();
        chambers.sort();
        chambers.dedup();
        chambers
    }

    /// Districts of a chamber, sorted ascending.
    pub fn districts(&self, chamber: Chamber) -> Vec<u32> {
        let mut districts: Vec<u32> = self
            .records
            .iter()
            .filter(|r| r.chamber == chamber)
            .map(|r| r.district)
            .collect();
        districts.sort_unstable();
        districts.dedup();
        districts
    }

    /// Legislator names, sorted; records with a missing legislator are
    /// skipped.
    pub fn legislators(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .records
            .iter()
            .filter_map(|r| r.legislator.clone())
            .collect();
        names.sort();
        names.dedup();
        names
    }

    /// Ward numbers present in the dataset, sorted ascending.
    pub fn wards(&self) -> Vec<u32> {
        let mut wards: Vec<u32> = self.records.iter().filter_map(|r| r.ward).collect();
        wards.sort_unstable();
        wards.dedup();
        wards
    }
}
