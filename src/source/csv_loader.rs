//! CSV ingest of sales records.
//!
//! Required columns are checked up front and a missing one fails the whole
//! load. After that, rows are parsed one at a time: a row that cannot be
//! parsed is dropped and counted in the [`IngestReport`] instead of failing
//! the load.

use super::record::TransactionRecord;
use crate::utils::config::{
    CATEGORY_COLUMN, DATETIME_FORMATS, DATE_FORMATS, MAX_REPORTED_DROPS, REQUIRED_COLUMNS,
    UNKNOWN_CATEGORY,
};
use crate::utils::error::IngestError;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::Read;

/// Outcome counters for one CSV load
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IngestReport {
    /// Data rows seen (header excluded)
    pub rows_read: usize,

    /// Rows turned into records
    pub rows_loaded: usize,

    /// Rows dropped because a field failed to parse
    pub rows_dropped: usize,

    /// Rows skipped because nothing was sold
    pub zero_quantity_skipped: usize,

    /// Loaded rows that fell back to the unknown category
    pub category_defaulted: usize,

    /// First few dropped rows with the reason, for user feedback
    pub dropped_samples: Vec<DroppedRow>,
}

/// A row rejected during ingest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DroppedRow {
    pub line: u64,
    pub reason: String,
}

impl IngestReport {
    /// Get human-readable summary
    pub fn summary(&self) -> String {
        format!(
            "Rows: {} read | {} loaded | {} dropped | {} zero-quantity skipped",
            self.rows_read, self.rows_loaded, self.rows_dropped, self.zero_quantity_skipped
        )
    }

    fn record_drop(&mut self, line: u64, reason: String) {
        warn!("Dropping CSV line {}: {}", line, reason);
        self.rows_dropped += 1;
        if self.dropped_samples.len() < MAX_REPORTED_DROPS {
            self.dropped_samples.push(DroppedRow { line, reason });
        }
    }
}

/// Header positions of the columns we read
struct ColumnMap {
    date: usize,
    sku: usize,
    product_name: usize,
    quantity_sold: usize,
    unit_price: usize,
    category: Option<usize>,
}

impl ColumnMap {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self, IngestError> {
        if headers.is_empty() || headers.iter().all(|h| h.trim().is_empty()) {
            return Err(IngestError::EmptyHeader);
        }

        let positions: HashMap<String, usize> = headers
            .iter()
            .enumerate()
            .map(|(idx, name)| (name.trim().to_lowercase(), idx))
            .collect();

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|name| !positions.contains_key(**name))
            .map(|name| name.to_string())
            .collect();

        if !missing.is_empty() {
            return Err(IngestError::MissingColumns(missing));
        }

        Ok(Self {
            date: positions["date"],
            sku: positions["sku"],
            product_name: positions["product_name"],
            quantity_sold: positions["quantity_sold"],
            unit_price: positions["unit_price"],
            category: positions.get(CATEGORY_COLUMN).copied(),
        })
    }
}

/// Why a single row could not be ingested
enum RowOutcome {
    Loaded(TransactionRecord, bool),
    ZeroQuantity,
    Dropped(String),
}

/// Load sales records from any CSV reader
///
/// **Public** - main entry point for CSV ingest
///
/// # Returns
/// Parsed records and the counters describing what was dropped
///
/// # Errors
/// * `IngestError::MissingColumns` - one or more required columns absent
/// * `IngestError::EmptyHeader` - input has no header row
/// * `IngestError::CsvFailed` - header row itself unreadable
pub fn load_records<R: Read>(
    reader: R,
) -> Result<(Vec<TransactionRecord>, IngestReport), IngestError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    debug!("CSV headers: {:?}", headers.iter().collect::<Vec<_>>());

    let columns = ColumnMap::from_headers(&headers)?;
    if columns.category.is_none() {
        info!("No '{}' column, using '{}' for every row", CATEGORY_COLUMN, UNKNOWN_CATEGORY);
    }

    let mut report = IngestReport::default();
    let mut records = Vec::new();

    for result in csv_reader.records() {
        report.rows_read += 1;

        let row = match result {
            Ok(row) => row,
            Err(e) => {
                let line = e.position().map(|p| p.line()).unwrap_or(0);
                report.record_drop(line, format!("malformed CSV record: {}", e));
                continue;
            }
        };
        let line = row.position().map(|p| p.line()).unwrap_or(0);

        match parse_row(&row, &columns) {
            RowOutcome::Loaded(record, defaulted) => {
                if defaulted {
                    report.category_defaulted += 1;
                }
                report.rows_loaded += 1;
                records.push(record);
            }
            RowOutcome::ZeroQuantity => {
                debug!("Skipping zero-quantity line {}", line);
                report.zero_quantity_skipped += 1;
            }
            RowOutcome::Dropped(reason) => report.record_drop(line, reason),
        }
    }

    info!("CSV ingest finished: {}", report.summary());

    Ok((records, report))
}

fn parse_row(row: &csv::StringRecord, columns: &ColumnMap) -> RowOutcome {
    let field = |idx: usize| row.get(idx).unwrap_or("");

    let raw_date = field(columns.date);
    let Some(date) = parse_date(raw_date) else {
        return RowOutcome::Dropped(format!("unparseable date '{}'", raw_date));
    };

    let sku = field(columns.sku);
    if sku.is_empty() {
        return RowOutcome::Dropped("empty sku".to_string());
    }

    let raw_quantity = field(columns.quantity_sold);
    let Some(quantity) = parse_quantity(raw_quantity) else {
        return RowOutcome::Dropped(format!("invalid quantity_sold '{}'", raw_quantity));
    };

    let raw_price = field(columns.unit_price);
    let Some(price) = parse_price(raw_price) else {
        return RowOutcome::Dropped(format!("invalid unit_price '{}'", raw_price));
    };

    if quantity == 0 {
        return RowOutcome::ZeroQuantity;
    }

    let category = columns.category.map(field).unwrap_or("");
    let defaulted = category.is_empty();
    let category = if defaulted { UNKNOWN_CATEGORY } else { category };

    RowOutcome::Loaded(
        TransactionRecord::new(date, sku, field(columns.product_name), category, quantity, price),
        defaulted,
    )
}

/// Parse a calendar date in any of the accepted layouts
///
/// Date-times are accepted and truncated to their date.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

/// Parse a non-negative whole quantity; `5.0` is accepted, `5.5` is not
fn parse_quantity(raw: &str) -> Option<u64> {
    if let Ok(value) = raw.parse::<u64>() {
        return Some(value);
    }

    let value = raw.parse::<f64>().ok()?;
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= u64::MAX as f64 {
        Some(value as u64)
    } else {
        None
    }
}

fn parse_price(raw: &str) -> Option<f64> {
    let value = raw.parse::<f64>().ok()?;
    (value.is_finite() && value >= 0.0).then_some(value)
}
