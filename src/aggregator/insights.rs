//! Key findings derived from the ranked table and the breakdowns.

use super::breakdown::{CategoryMetrics, DailyMetrics};
use super::sku::{ratio, SkuMetrics};
use super::summary::SummaryStats;
use crate::utils::config::TOP_SHARE_COUNT;
use chrono::{Datelike, Weekday};
use serde::{Deserialize, Serialize};

/// Headline findings for the current window
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Insights {
    /// Number of leading ranked SKUs the share is computed over
    pub top_share_count: usize,

    /// Percent of window revenue earned by those SKUs
    pub top_revenue_share: f64,

    /// Highest-revenue category
    pub strongest_category: Option<String>,

    /// Ranked SKU selling the most units per active day
    pub restock_candidate: Option<String>,

    /// Weekday with the highest average daily revenue
    #[serde(default)]
    pub peak_weekday: Option<Weekday>,
}

/// Immediate follow-ups printed with every report
pub const IMMEDIATE_ACTIONS: &[&str] = &[
    "Increase inventory for the top 3 performing SKUs",
    "Review pricing for high-volume, low-revenue items",
    "Promote slow-moving items in underperforming categories",
];

/// Longer-term follow-ups printed with every report
pub const STRATEGIC_ACTIONS: &[&str] = &[
    "Bundle deals combining high and low performers",
    "Seasonal adjustments based on trend analysis",
    "Supplier negotiations for top-volume items",
];

/// Derive findings from pipeline outputs
///
/// # Arguments
/// * `ranked` - Top-N SKUs in rank order
/// * `categories` - Category breakdown for the same window
/// * `daily` - Daily series for the same window
/// * `summary` - Window totals
pub fn derive_insights(
    ranked: &[SkuMetrics],
    categories: &[CategoryMetrics],
    daily: &[DailyMetrics],
    summary: &SummaryStats,
) -> Insights {
    let top_share_count = ranked.len().min(TOP_SHARE_COUNT);
    let top_revenue: f64 = ranked.iter().take(top_share_count).map(|m| m.total_revenue).sum();

    let strongest_category = categories
        .iter()
        .max_by(|a, b| {
            a.total_revenue
                .total_cmp(&b.total_revenue)
                .then_with(|| b.category.cmp(&a.category))
        })
        .map(|c| c.category.clone());

    // max_by keeps the last maximum, so scan in reverse to favour rank order
    let restock_candidate = ranked
        .iter()
        .rev()
        .max_by(|a, b| a.avg_daily_quantity.total_cmp(&b.avg_daily_quantity))
        .map(|m| m.sku.clone());

    Insights {
        top_share_count,
        top_revenue_share: ratio(top_revenue, summary.total_revenue) * 100.0,
        strongest_category,
        restock_candidate,
        peak_weekday: peak_weekday(daily),
    }
}

const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Weekday whose sale days average the most revenue; ties go to the earlier weekday
fn peak_weekday(daily: &[DailyMetrics]) -> Option<Weekday> {
    let mut totals = [(0.0_f64, 0_u32); 7];
    for day in daily {
        let slot = &mut totals[day.date.weekday().num_days_from_monday() as usize];
        slot.0 += day.total_revenue;
        slot.1 += 1;
    }

    totals
        .iter()
        .enumerate()
        .rev()
        .filter(|(_, (_, days))| *days > 0)
        .map(|(idx, (revenue, days))| (idx, revenue / f64::from(*days)))
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(idx, _)| WEEK[idx])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::breakdown::{aggregate_by_category, aggregate_by_date};
    use crate::aggregator::ranker::{rank_top_n, RankMetric};
    use crate::aggregator::sku::aggregate_by_sku;
    use crate::aggregator::summary::calculate_summary;
    use crate::source::TransactionRecord;
    use chrono::NaiveDate;

    fn records() -> Vec<TransactionRecord> {
        let d1 = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let d2 = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        vec![
            TransactionRecord::new(d1, "A", "Alpha", "Home", 10, 5.0),
            TransactionRecord::new(d1, "B", "Beta", "Snacks", 30, 1.0),
            TransactionRecord::new(d2, "B", "Beta", "Snacks", 30, 1.0),
            TransactionRecord::new(d1, "C", "Gamma", "Snacks", 5, 2.0),
            TransactionRecord::new(d1, "D", "Delta", "Dairy", 1, 10.0),
        ]
    }

    #[test]
    fn test_insights() {
        let records = records();
        let ranked = rank_top_n(&aggregate_by_sku(&records).metrics, RankMetric::TotalRevenue, 10);
        let categories = aggregate_by_category(&records);
        let daily = aggregate_by_date(&records);
        let summary = calculate_summary(&records);

        let insights = derive_insights(&ranked, &categories, &daily, &summary);

        // Total 130: B 60, A 50, C 10, D 10
        assert_eq!(insights.top_share_count, 3);
        assert!((insights.top_revenue_share - 120.0 / 130.0 * 100.0).abs() < 1e-9);
        assert_eq!(insights.strongest_category.as_deref(), Some("Snacks"));
        assert_eq!(insights.restock_candidate.as_deref(), Some("B"));
        // 2024-01-01 is a Monday (100.0) and 2024-01-02 a Tuesday (30.0)
        assert_eq!(insights.peak_weekday, Some(Weekday::Mon));
    }

    #[test]
    fn test_peak_weekday_uses_daily_average() {
        let day = |d: u32, revenue: f64| DailyMetrics {
            date: NaiveDate::from_ymd_opt(2024, 6, d).unwrap(),
            total_revenue: revenue,
            quantity_sold: 1,
        };
        // Saturdays 1st and 8th average 50; Monday 3rd has 60 once
        let daily = vec![day(1, 40.0), day(3, 60.0), day(8, 60.0)];
        assert_eq!(peak_weekday(&daily), Some(Weekday::Mon));

        let daily = vec![day(1, 80.0), day(3, 60.0), day(8, 60.0)];
        assert_eq!(peak_weekday(&daily), Some(Weekday::Sat));

        assert_eq!(peak_weekday(&[]), None);
    }

    #[test]
    fn test_restock_tie_prefers_rank_order() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let records = vec![
            TransactionRecord::new(date, "A", "Alpha", "X", 4, 1.0),
            TransactionRecord::new(date, "B", "Beta", "X", 4, 2.0),
        ];
        let ranked = rank_top_n(&aggregate_by_sku(&records).metrics, RankMetric::TotalRevenue, 10);
        let insights = derive_insights(&ranked, &[], &[], &calculate_summary(&records));

        assert_eq!(ranked[0].sku, "B");
        assert_eq!(insights.restock_candidate.as_deref(), Some("B"));
        assert!(insights.strongest_category.is_none());
    }

    #[test]
    fn test_empty_window() {
        let insights = derive_insights(&[], &[], &[], &SummaryStats::default());
        assert_eq!(insights, Insights::default());
    }
}
