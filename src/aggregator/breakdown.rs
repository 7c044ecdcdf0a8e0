//! Category and daily breakdowns.
//!
//! Plain sums of revenue and units per group. No ranking is applied:
//! categories come back in name order and days in calendar order.

use crate::source::TransactionRecord;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Revenue and units for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryMetrics {
    pub category: String,
    pub total_revenue: f64,
    pub quantity_sold: u64,
}

/// Revenue and units for one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyMetrics {
    pub date: NaiveDate,
    pub total_revenue: f64,
    pub quantity_sold: u64,
}

fn sum_by<K: Ord>(
    records: &[TransactionRecord],
    key: impl Fn(&TransactionRecord) -> K,
) -> BTreeMap<K, (f64, u64)> {
    let mut groups: BTreeMap<K, (f64, u64)> = BTreeMap::new();
    for record in records {
        let entry = groups.entry(key(record)).or_insert((0.0, 0));
        entry.0 += record.total_revenue;
        entry.1 = entry.1.saturating_add(record.quantity_sold);
    }
    groups
}

/// Sum revenue and units per category
pub fn aggregate_by_category(records: &[TransactionRecord]) -> Vec<CategoryMetrics> {
    sum_by(records, |r| r.category.clone())
        .into_iter()
        .map(|(category, (total_revenue, quantity_sold))| CategoryMetrics {
            category,
            total_revenue,
            quantity_sold,
        })
        .collect()
}

/// Sum revenue and units per day
pub fn aggregate_by_date(records: &[TransactionRecord]) -> Vec<DailyMetrics> {
    sum_by(records, |r| r.date)
        .into_iter()
        .map(|(date, (total_revenue, quantity_sold))| DailyMetrics {
            date,
            total_revenue,
            quantity_sold,
        })
        .collect()
}
