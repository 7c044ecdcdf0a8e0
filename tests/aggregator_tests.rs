use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use sku_insight::aggregator::{
    aggregate_by_sku, analyze, filter_by_date, rank_top_n, AnalysisRequest, DateRange, RankMetric,
};
use sku_insight::source::{Dataset, TransactionRecord};

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
}

fn worked_example() -> Vec<TransactionRecord> {
    vec![
        TransactionRecord::new(day(1), "A", "Alpha", "Home", 10, 2.0),
        TransactionRecord::new(day(1), "A", "Alpha", "Home", 5, 2.0),
        TransactionRecord::new(day(1), "B", "Beta", "Snacks", 1, 100.0),
    ]
}

fn skus(ranked: &[sku_insight::aggregator::SkuMetrics]) -> Vec<&str> {
    ranked.iter().map(|m| m.sku.as_str()).collect()
}

#[test]
fn test_worked_example_aggregation() {
    let aggregation = aggregate_by_sku(&worked_example());
    assert_eq!(aggregation.metrics.len(), 2);

    let a = aggregation.metrics.iter().find(|m| m.sku == "A").unwrap();
    assert_eq!(a.total_quantity, 15);
    assert!((a.total_revenue - 30.0).abs() < 1e-9);
    assert_eq!(a.days_with_sales, 1);
    assert!((a.avg_order_value - 2.0).abs() < 1e-9);

    let b = aggregation.metrics.iter().find(|m| m.sku == "B").unwrap();
    assert_eq!(b.total_quantity, 1);
    assert!((b.total_revenue - 100.0).abs() < 1e-9);
}

#[test]
fn test_worked_example_ranking() {
    let metrics = aggregate_by_sku(&worked_example()).metrics;

    assert_eq!(skus(&rank_top_n(&metrics, RankMetric::TotalRevenue, 1)), vec!["B"]);
    assert_eq!(skus(&rank_top_n(&metrics, RankMetric::QuantitySold, 1)), vec!["A"]);
    assert_eq!(skus(&rank_top_n(&metrics, RankMetric::AverageOrderValue, 2)), vec!["B", "A"]);
}

#[test]
fn test_revenue_is_conserved() {
    let records = Dataset::sample(day(31), 60, 11).records;
    let expected: f64 = records.iter().map(|r| r.total_revenue).sum();

    let metrics = aggregate_by_sku(&records).metrics;
    let actual: f64 = metrics.iter().map(|m| m.total_revenue).sum();

    assert!((expected - actual).abs() < 1e-6 * expected.max(1.0));
}

#[test]
fn test_ranking_is_sorted_and_bounded() {
    let records = Dataset::sample(day(31), 30, 3).records;
    let metrics = aggregate_by_sku(&records).metrics;

    let metrics_to_check = [
        RankMetric::TotalRevenue,
        RankMetric::QuantitySold,
        RankMetric::AverageOrderValue,
    ];
    for metric in metrics_to_check {
        for n in [0, 1, 5, 20, 100] {
            let ranked = rank_top_n(&metrics, metric, n);
            assert_eq!(ranked.len(), n.min(metrics.len()));
            for pair in ranked.windows(2) {
                assert!(metric.value_of(&pair[0]) >= metric.value_of(&pair[1]));
            }
        }
    }
}

#[test]
fn test_date_filter_is_idempotent() {
    let records = Dataset::sample(day(31), 30, 5).records;
    let range = DateRange::new(day(10), day(20));

    let once = filter_by_date(&records, &range);
    let twice = filter_by_date(&once, &range);

    assert_eq!(once, twice);
    assert!(once.iter().all(|r| r.date >= day(10) && r.date <= day(20)));
}

#[test]
fn test_inverted_range_falls_back_to_all_records() {
    let records = worked_example();
    let inverted = DateRange::new(day(20), day(10));
    assert_eq!(filter_by_date(&records, &inverted).len(), records.len());
}

#[test]
fn test_zero_quantity_sku_is_degenerate() {
    let records = vec![TransactionRecord::new(day(2), "Z", "Zero", "Misc", 0, 9.99)];
    let metrics = aggregate_by_sku(&records).metrics;

    assert_eq!(metrics[0].avg_order_value, 0.0);
    assert!(metrics[0].degenerate);
}

#[test]
fn test_empty_window_yields_empty_dashboard() {
    let dataset = Dataset::from_records(worked_example());
    let request = AnalysisRequest {
        date_range: DateRange::new(day(15), day(16)),
        ..Default::default()
    };

    let dashboard = analyze(&dataset, &request);

    assert!(dashboard.is_empty());
    assert!(dashboard.top_skus.is_empty());
    assert!(dashboard.categories.is_empty());
    assert_eq!(dashboard.summary.total_revenue, 0.0);
    assert_eq!(dashboard.summary.overall_average_order_value, 0.0);
}

#[test]
fn test_analyze_insights_for_worked_example() {
    let dataset = Dataset::from_records(worked_example());
    let dashboard = analyze(&dataset, &AnalysisRequest::default());

    assert_eq!(dashboard.record_count, 3);
    assert_eq!(dashboard.sku_count, 2);
    assert_eq!(skus(&dashboard.top_skus), vec!["B", "A"]);
    assert_eq!(dashboard.insights.strongest_category.as_deref(), Some("Snacks"));
    assert_eq!(dashboard.insights.restock_candidate.as_deref(), Some("A"));
    assert!((dashboard.insights.top_revenue_share - 100.0).abs() < 1e-9);
}
