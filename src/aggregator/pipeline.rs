//! The full analysis pass.
//!
//! `analyze` is a pure function of the dataset and the request: filter the
//! window, aggregate per SKU, rank, break down by category and day, total
//! everything, then derive the headline findings.

use super::breakdown::{aggregate_by_category, aggregate_by_date, CategoryMetrics, DailyMetrics};
use super::filter::{filter_by_date, DateRange};
use super::insights::{derive_insights, Insights};
use super::ranker::{rank_top_n, RankMetric};
use super::sku::{aggregate_by_sku, KeyConflict, SkuMetrics};
use super::summary::{calculate_summary, SummaryStats};
use crate::source::{Dataset, IngestReport};
use crate::utils::config::{DEFAULT_TOP_N, SCHEMA_VERSION};
use chrono::Utc;
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// User-controlled inputs for one analysis pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub date_range: DateRange,
    pub metric: RankMetric,
    pub top_n: usize,
}

impl Default for AnalysisRequest {
    fn default() -> Self {
        Self {
            date_range: DateRange::all(),
            metric: RankMetric::TotalRevenue,
            top_n: DEFAULT_TOP_N,
        }
    }
}

/// Everything the presentation layer renders for one request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    /// Report schema version for compatibility checking
    pub schema_version: String,

    /// ISO 8601 timestamp of generation
    pub generated_at: String,

    /// Human-readable description of the data source
    pub source: String,

    pub request: AnalysisRequest,

    /// Window actually applied (the data's full span when the request had none)
    pub window: DateRange,

    /// Records inside the window
    pub record_count: usize,

    /// Distinct SKUs inside the window
    pub sku_count: usize,

    pub ingest: IngestReport,
    pub summary: SummaryStats,

    /// Ranked top-N table
    pub top_skus: Vec<SkuMetrics>,

    pub categories: Vec<CategoryMetrics>,
    pub daily: Vec<DailyMetrics>,
    pub insights: Insights,

    #[serde(default)]
    pub key_conflicts: Vec<KeyConflict>,
}

impl Dashboard {
    /// True when the window holds no sales
    pub fn is_empty(&self) -> bool {
        self.record_count == 0
    }
}

/// Run the whole pipeline for one request
///
/// **Public** - main entry point called by commands and the explore session
pub fn analyze(dataset: &Dataset, request: &AnalysisRequest) -> Dashboard {
    info!(
        "Analyzing {} records: top {} by {} over {}",
        dataset.records.len(),
        request.top_n,
        request.metric,
        request.date_range
    );

    let window = if request.date_range.bounds().is_some() {
        request.date_range
    } else {
        DateRange::spanning(&dataset.records)
    };

    let filtered = filter_by_date(&dataset.records, &request.date_range);
    debug!("{} records in window {}", filtered.len(), window);

    let aggregation = aggregate_by_sku(&filtered);
    let top_skus = rank_top_n(&aggregation.metrics, request.metric, request.top_n);
    let categories = aggregate_by_category(&filtered);
    let daily = aggregate_by_date(&filtered);
    let summary = calculate_summary(&filtered);
    let insights = derive_insights(&top_skus, &categories, &daily, &summary);

    info!("Window totals: {}", summary.summary());

    Dashboard {
        schema_version: SCHEMA_VERSION.to_string(),
        generated_at: Utc::now().to_rfc3339(),
        source: dataset.origin.to_string(),
        request: *request,
        window,
        record_count: filtered.len(),
        sku_count: aggregation.metrics.len(),
        ingest: dataset.report.clone(),
        summary,
        top_skus,
        categories,
        daily,
        insights,
        key_conflicts: aggregation.conflicts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::TransactionRecord;
    use chrono::NaiveDate;

    fn dataset() -> Dataset {
        let d = |day| NaiveDate::from_ymd_opt(2024, 3, day).unwrap();
        Dataset::from_records(vec![
            TransactionRecord::new(d(1), "A", "Alpha", "X", 10, 2.0),
            TransactionRecord::new(d(5), "A", "Alpha", "X", 5, 2.0),
            TransactionRecord::new(d(9), "B", "Beta", "Y", 1, 100.0),
        ])
    }

    #[test]
    fn test_default_window_is_data_span() {
        let dashboard = analyze(&dataset(), &AnalysisRequest::default());

        assert_eq!(dashboard.record_count, 3);
        assert_eq!(dashboard.sku_count, 2);
        assert_eq!(
            dashboard.window.bounds(),
            Some((
                NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
            ))
        );
        assert_eq!(dashboard.schema_version, SCHEMA_VERSION);
    }

    #[test]
    fn test_window_excludes_everything() {
        let request = AnalysisRequest {
            date_range: DateRange::new(
                NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(),
            ),
            ..Default::default()
        };
        let dashboard = analyze(&dataset(), &request);

        assert!(dashboard.is_empty());
        assert!(dashboard.top_skus.is_empty());
        assert!(dashboard.categories.is_empty());
        assert!(dashboard.daily.is_empty());
        assert_eq!(dashboard.summary, SummaryStats::default());
    }
}
