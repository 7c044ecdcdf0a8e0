//! CSV export of the ranked table and of raw records.

use super::prepare_output_path;
use crate::aggregator::SkuMetrics;
use crate::source::TransactionRecord;
use crate::utils::config::EXPORT_FILE_PREFIX;
use crate::utils::error::OutputError;
use chrono::NaiveDate;
use log::info;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// One exported ranked row, numbers rounded to cents
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRow {
    pub sku: String,
    pub product_name: String,
    pub category: String,
    pub total_quantity: u64,
    pub total_revenue: f64,
    pub avg_order_value: f64,
}

impl From<&SkuMetrics> for ExportRow {
    fn from(m: &SkuMetrics) -> Self {
        Self {
            sku: m.sku.clone(),
            product_name: m.product_name.clone(),
            category: m.category.clone(),
            total_quantity: m.total_quantity,
            total_revenue: round2(m.total_revenue),
            avg_order_value: round2(m.avg_order_value),
        }
    }
}

/// Record layout written by `write_records_csv`; readable by the CSV loader
#[derive(Serialize)]
struct RecordRow<'a> {
    date: NaiveDate,
    sku: &'a str,
    product_name: &'a str,
    category: &'a str,
    quantity_sold: u64,
    unit_price: f64,
    total_revenue: f64,
}

/// Default export name, e.g. `top_skus_analysis_20240131.csv`
pub fn export_file_name(date: NaiveDate) -> String {
    format!("{}_{}.csv", EXPORT_FILE_PREFIX, date.format("%Y%m%d"))
}

/// Write the ranked table to any writer
pub fn write_top_skus<W: Write>(ranked: &[SkuMetrics], writer: W) -> Result<(), OutputError> {
    let mut csv_writer = ::csv::Writer::from_writer(writer);

    for row in ranked.iter().map(ExportRow::from) {
        csv_writer.serialize(row)?;
    }

    // An empty table still gets its header
    if ranked.is_empty() {
        csv_writer.write_record([
            "sku",
            "product_name",
            "category",
            "total_quantity",
            "total_revenue",
            "avg_order_value",
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Write the ranked table to a CSV file
///
/// **Public** - main entry point for CSV export
///
/// # Errors
/// * `OutputError::InvalidPath` - Path is empty, a directory, or its parent cannot be created
/// * `OutputError::CsvFailed` - CSV serialization error
pub fn write_top_skus_csv(
    ranked: &[SkuMetrics],
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();
    info!("Exporting {} ranked SKUs to: {}", ranked.len(), output_path.display());

    prepare_output_path(output_path)?;
    let file = std::fs::File::create(output_path)?;
    write_top_skus(ranked, file)?;

    info!("Export written successfully");
    Ok(())
}

/// Write raw records to a CSV file in the ingest layout
pub fn write_records_csv(
    records: &[TransactionRecord],
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();
    info!("Writing {} records to: {}", records.len(), output_path.display());

    prepare_output_path(output_path)?;
    let mut csv_writer = ::csv::Writer::from_path(output_path)?;

    for r in records {
        csv_writer.serialize(RecordRow {
            date: r.date,
            sku: &r.sku,
            product_name: &r.product_name,
            category: &r.category,
            quantity_sold: r.quantity_sold,
            unit_price: r.unit_price,
            total_revenue: round2(r.total_revenue),
        })?;
    }

    csv_writer.flush()?;
    Ok(())
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::aggregate_by_sku;

    #[test]
    fn test_export_file_name() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        assert_eq!(export_file_name(date), "top_skus_analysis_20240131.csv");
    }

    #[test]
    fn test_rows_are_rounded() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let records = vec![TransactionRecord::new(date, "A", "Alpha", "X", 3, 3.333)];
        let metrics = aggregate_by_sku(&records).metrics;

        let mut buf = Vec::new();
        write_top_skus(&metrics, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert_eq!(
            text,
            "sku,product_name,category,total_quantity,total_revenue,avg_order_value\nA,Alpha,X,3,10.0,3.33\n"
        );
    }

    #[test]
    fn test_empty_export_has_header() {
        let mut buf = Vec::new();
        write_top_skus(&[], &mut buf).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "sku,product_name,category,total_quantity,total_revenue,avg_order_value\n"
        );
    }
}
