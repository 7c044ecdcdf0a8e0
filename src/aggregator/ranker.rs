//! Top-N ranking of SKU metrics.

use super::sku::SkuMetrics;
use clap::ValueEnum;
use log::debug;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Metric used to order SKUs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum RankMetric {
    #[serde(alias = "revenue")]
    #[value(name = "revenue", alias = "total-revenue")]
    TotalRevenue,

    #[serde(alias = "quantity")]
    #[value(name = "quantity", alias = "quantity-sold")]
    QuantitySold,

    #[serde(alias = "aov")]
    #[value(name = "aov", alias = "average-order-value")]
    AverageOrderValue,
}

impl RankMetric {
    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            Self::TotalRevenue => "Total Revenue",
            Self::QuantitySold => "Quantity Sold",
            Self::AverageOrderValue => "Average Order Value",
        }
    }

    /// Value of this metric for one SKU
    pub fn value_of(&self, metrics: &SkuMetrics) -> f64 {
        match self {
            Self::TotalRevenue => metrics.total_revenue,
            Self::QuantitySold => metrics.total_quantity as f64,
            Self::AverageOrderValue => metrics.avg_order_value,
        }
    }
}

impl std::str::FromStr for RankMetric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <Self as ValueEnum>::from_str(s.trim(), true)
    }
}

impl std::fmt::Display for RankMetric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Rank SKUs by `metric` and keep the first `top_n`
///
/// **Public** - main entry point for ranking
///
/// # Returns
/// At most `top_n` entries, highest metric first. Equal values are ordered
/// by SKU ascending so the output is deterministic.
pub fn rank_top_n(metrics: &[SkuMetrics], metric: RankMetric, top_n: usize) -> Vec<SkuMetrics> {
    debug!("Ranking {} SKUs by {}, keeping top {}", metrics.len(), metric, top_n);

    let mut ranked: Vec<SkuMetrics> = metrics.to_vec();
    ranked.sort_by(|a, b| {
        compare_desc(metric.value_of(a), metric.value_of(b)).then_with(|| a.sku.cmp(&b.sku))
    });
    ranked.truncate(top_n);

    ranked
}

fn compare_desc(a: f64, b: f64) -> Ordering {
    b.total_cmp(&a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::sku::aggregate_by_sku;
    use crate::source::TransactionRecord;
    use chrono::NaiveDate;

    fn metrics() -> Vec<SkuMetrics> {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let records = vec![
            TransactionRecord::new(date, "C", "Gamma", "X", 4, 5.0),
            TransactionRecord::new(date, "A", "Alpha", "X", 10, 2.0),
            TransactionRecord::new(date, "B", "Beta", "Y", 2, 10.0),
            TransactionRecord::new(date, "D", "Delta", "Y", 1, 50.0),
        ];
        aggregate_by_sku(&records).metrics
    }

    fn skus(ranked: &[SkuMetrics]) -> Vec<&str> {
        ranked.iter().map(|m| m.sku.as_str()).collect()
    }

    #[test]
    fn test_ties_broken_by_sku() {
        // A, B and C all earn 20.0
        let ranked = rank_top_n(&metrics(), RankMetric::TotalRevenue, 10);
        assert_eq!(skus(&ranked), vec!["D", "A", "B", "C"]);
    }

    #[test]
    fn test_rank_by_quantity() {
        let ranked = rank_top_n(&metrics(), RankMetric::QuantitySold, 2);
        assert_eq!(skus(&ranked), vec!["A", "C"]);
    }

    #[test]
    fn test_rank_by_aov() {
        let ranked = rank_top_n(&metrics(), RankMetric::AverageOrderValue, 3);
        assert_eq!(skus(&ranked), vec!["D", "B", "C"]);
    }

    #[test]
    fn test_fewer_than_n() {
        assert_eq!(rank_top_n(&metrics(), RankMetric::TotalRevenue, 20).len(), 4);
        assert!(rank_top_n(&metrics(), RankMetric::TotalRevenue, 0).is_empty());
    }

    #[test]
    fn test_metric_from_str() {
        assert_eq!("revenue".parse::<RankMetric>(), Ok(RankMetric::TotalRevenue));
        assert_eq!("Quantity".parse::<RankMetric>(), Ok(RankMetric::QuantitySold));
        assert_eq!("average-order-value".parse::<RankMetric>(), Ok(RankMetric::AverageOrderValue));
        assert!("profit".parse::<RankMetric>().is_err());
    }
}
