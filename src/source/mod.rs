//! Record sources: CSV ingest and the synthetic sample generator.
//!
//! Both produce a [`Dataset`], which pairs the records with the ingest
//! counters and a content fingerprint used to key cached results.

pub mod csv_loader;
pub mod record;
pub mod sample;

pub use csv_loader::{load_records, parse_date, DroppedRow, IngestReport};
pub use record::TransactionRecord;
pub use sample::{generate_sample, SAMPLE_CATALOG};

use crate::utils::error::IngestError;
use chrono::NaiveDate;
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::fs::File;
use std::hash::{Hash, Hasher};
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Where a dataset came from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataOrigin {
    Sample { end: NaiveDate, days: u32, seed: u64 },
    File { path: PathBuf },
    Memory,
}

impl std::fmt::Display for DataOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sample { end, days, seed } => {
                write!(f, "sample data ({} days to {}, seed {})", days, end, seed)
            }
            Self::File { path } => write!(f, "{}", path.display()),
            Self::Memory => write!(f, "in-memory records"),
        }
    }
}

/// Loaded sales records with their provenance
#[derive(Debug, Clone)]
pub struct Dataset {
    pub records: Vec<TransactionRecord>,
    pub report: IngestReport,
    pub origin: DataOrigin,
    fingerprint: u64,
}

impl Dataset {
    pub fn new(records: Vec<TransactionRecord>, report: IngestReport, origin: DataOrigin) -> Self {
        let fingerprint = fingerprint_records(&records);
        Self {
            records,
            report,
            origin,
            fingerprint,
        }
    }

    /// Wrap records built in code; every record counts as loaded
    pub fn from_records(records: Vec<TransactionRecord>) -> Self {
        let report = IngestReport {
            rows_read: records.len(),
            rows_loaded: records.len(),
            ..Default::default()
        };
        Self::new(records, report, DataOrigin::Memory)
    }

    /// Generate the sample dataset
    pub fn sample(end: NaiveDate, days: u32, seed: u64) -> Self {
        let records = generate_sample(end, days, seed);
        info!("Generated {} sample records", records.len());
        let mut dataset = Self::from_records(records);
        dataset.origin = DataOrigin::Sample { end, days, seed };
        dataset
    }

    /// Load a dataset from a CSV file
    ///
    /// # Errors
    /// * `IngestError::IoError` - file cannot be opened
    /// * `IngestError::MissingColumns` - required columns absent
    pub fn from_csv_file(path: impl AsRef<Path>) -> Result<Self, IngestError> {
        let path = path.as_ref();
        info!("Loading sales data from: {}", path.display());

        let file = File::open(path)?;
        let (records, report) = load_records(BufReader::new(file))?;

        Ok(Self::new(
            records,
            report,
            DataOrigin::File {
                path: path.to_path_buf(),
            },
        ))
    }

    /// Content hash over every record field
    pub fn fingerprint(&self) -> u64 {
        self.fingerprint
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Earliest and latest record date
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let min = self.records.iter().map(|r| r.date).min()?;
        let max = self.records.iter().map(|r| r.date).max()?;
        Some((min, max))
    }
}

fn fingerprint_records(records: &[TransactionRecord]) -> u64 {
    let mut hasher = DefaultHasher::new();

    records.len().hash(&mut hasher);
    for record in records {
        record.date.hash(&mut hasher);
        record.sku.hash(&mut hasher);
        record.product_name.hash(&mut hasher);
        record.category.hash(&mut hasher);
        record.quantity_sold.hash(&mut hasher);
        record.unit_price.to_bits().hash(&mut hasher);
    }

    hasher.finish()
}
