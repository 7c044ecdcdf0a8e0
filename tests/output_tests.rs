use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use sku_insight::aggregator::{analyze, AnalysisRequest, RankMetric};
use sku_insight::chart::render_dashboard_charts;
use sku_insight::output::{
    export_file_name, read_report, write_records_csv, write_report, write_top_skus_csv,
};
use sku_insight::source::Dataset;
use tempfile::tempdir;

fn sample_dataset() -> Dataset {
    Dataset::sample(NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(), 30, 42)
}

#[test]
fn test_report_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested/report.json");

    let dashboard = analyze(&sample_dataset(), &AnalysisRequest::default());
    write_report(&dashboard, &path).unwrap();

    let loaded = read_report(&path).unwrap();
    assert_eq!(loaded.schema_version, dashboard.schema_version);
    assert_eq!(loaded.request, dashboard.request);
    assert_eq!(loaded.window, dashboard.window);
    assert_eq!(loaded.top_skus.len(), dashboard.top_skus.len());
    assert_eq!(loaded.top_skus[0].sku, dashboard.top_skus[0].sku);
}

#[test]
fn test_top_skus_export_columns() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("top.csv");

    let request = AnalysisRequest {
        metric: RankMetric::QuantitySold,
        top_n: 5,
        ..Default::default()
    };
    let dashboard = analyze(&sample_dataset(), &request);
    write_top_skus_csv(&dashboard.top_skus, &path).unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    let mut lines = contents.lines();
    assert_eq!(
        lines.next().unwrap(),
        "sku,product_name,category,total_quantity,total_revenue,avg_order_value"
    );
    assert_eq!(lines.count(), 5);
}

#[test]
fn test_sample_csv_reloads_identically() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("sample.csv");
    let dataset = sample_dataset();

    write_records_csv(&dataset.records, &path).unwrap();
    let reloaded = Dataset::from_csv_file(&path).unwrap();

    assert_eq!(reloaded.records.len(), dataset.records.len());
    assert_eq!(reloaded.report.rows_dropped, 0);
    for (a, b) in reloaded.records.iter().zip(&dataset.records) {
        assert_eq!(a.sku, b.sku);
        assert_eq!(a.date, b.date);
        assert_eq!(a.quantity_sold, b.quantity_sold);
        assert!((a.unit_price - b.unit_price).abs() < 1e-9);
    }
}

#[test]
fn test_export_file_name_is_dated() {
    let date = NaiveDate::from_ymd_opt(2025, 12, 1).unwrap();
    assert_eq!(export_file_name(date), "top_skus_analysis_20251201.csv");
}

#[test]
fn test_dashboard_charts_are_svg() {
    let dashboard = analyze(&sample_dataset(), &AnalysisRequest::default());
    let charts = render_dashboard_charts(&dashboard);

    let names: Vec<&str> = charts.iter().map(|(name, _)| *name).collect();
    assert!(names.contains(&"top_skus_revenue"));
    assert!(names.contains(&"daily_revenue"));
    for (_, svg) in &charts {
        assert!(svg.starts_with("<?xml") || svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }
}
