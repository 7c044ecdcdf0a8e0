//! Per-SKU aggregation.
//!
//! Records are grouped by `sku` alone. Name and category are expected to be
//! fixed per SKU; when a later record disagrees with the first one seen, the
//! first values are kept and the disagreement is reported as a
//! [`KeyConflict`] rather than splitting the SKU into two groups.

use crate::source::TransactionRecord;
use chrono::NaiveDate;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Summary statistics for one SKU within the filtered window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkuMetrics {
    pub sku: String,
    pub product_name: String,
    pub category: String,

    /// Units sold, saturating at `u64::MAX`
    pub total_quantity: u64,

    /// Revenue summed from records
    pub total_revenue: f64,

    /// Unweighted mean of per-record unit prices
    pub avg_unit_price: f64,

    /// Distinct dates with at least one sale
    pub days_with_sales: usize,

    /// `total_quantity / days_with_sales`, 0 when no days
    pub avg_daily_quantity: f64,

    /// `total_revenue / total_quantity`, 0 when nothing sold
    pub avg_order_value: f64,

    /// Set when a derived ratio hit a zero divisor
    #[serde(default)]
    pub degenerate: bool,
}

/// A record whose name or category disagrees with its SKU's first record
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyConflict {
    pub sku: String,
    pub expected_name: String,
    pub expected_category: String,
    pub found_name: String,
    pub found_category: String,
    pub date: NaiveDate,
}

/// Output of [`aggregate_by_sku`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SkuAggregation {
    /// One entry per distinct SKU, in SKU order
    pub metrics: Vec<SkuMetrics>,

    /// Distinct name/category disagreements found while grouping
    pub conflicts: Vec<KeyConflict>,
}

struct SkuAccumulator {
    product_name: String,
    category: String,
    total_quantity: u64,
    total_revenue: f64,
    price_sum: f64,
    record_count: usize,
    dates: HashSet<NaiveDate>,
}

impl SkuAccumulator {
    fn new(record: &TransactionRecord) -> Self {
        Self {
            product_name: record.product_name.clone(),
            category: record.category.clone(),
            total_quantity: 0,
            total_revenue: 0.0,
            price_sum: 0.0,
            record_count: 0,
            dates: HashSet::new(),
        }
    }

    fn add(&mut self, record: &TransactionRecord) {
        self.total_quantity = self.total_quantity.saturating_add(record.quantity_sold);
        self.total_revenue += record.total_revenue;
        self.price_sum += record.unit_price;
        self.record_count += 1;
        self.dates.insert(record.date);
    }

    fn finish(self, sku: String) -> SkuMetrics {
        let days_with_sales = self.dates.len();

        let avg_unit_price = ratio(self.price_sum, self.record_count as f64);
        let avg_daily_quantity = ratio(self.total_quantity as f64, days_with_sales as f64);
        let avg_order_value = ratio(self.total_revenue, self.total_quantity as f64);

        SkuMetrics {
            sku,
            product_name: self.product_name,
            category: self.category,
            total_quantity: self.total_quantity,
            total_revenue: self.total_revenue,
            avg_unit_price,
            days_with_sales,
            avg_daily_quantity,
            avg_order_value,
            degenerate: days_with_sales == 0 || self.total_quantity == 0,
        }
    }
}

/// Divide, defining x / 0 as 0
pub(crate) fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// Group records by SKU and compute per-SKU metrics
///
/// **Public** - main entry point for SKU aggregation
///
/// # Arguments
/// * `records` - Records already restricted to the date window
///
/// # Returns
/// One `SkuMetrics` per distinct SKU plus any key conflicts found
pub fn aggregate_by_sku(records: &[TransactionRecord]) -> SkuAggregation {
    debug!("Aggregating {} records by SKU", records.len());

    let mut groups: BTreeMap<String, SkuAccumulator> = BTreeMap::new();
    let mut seen_conflicts: HashSet<(String, String, String)> = HashSet::new();
    let mut conflicts = Vec::new();

    for record in records {
        let acc = groups
            .entry(record.sku.clone())
            .or_insert_with(|| SkuAccumulator::new(record));

        if acc.product_name != record.product_name || acc.category != record.category {
            let key = (
                record.sku.clone(),
                record.product_name.clone(),
                record.category.clone(),
            );
            if seen_conflicts.insert(key) {
                warn!(
                    "SKU {} seen as '{}'/'{}' on {}, keeping '{}'/'{}'",
                    record.sku,
                    record.product_name,
                    record.category,
                    record.date,
                    acc.product_name,
                    acc.category
                );
                conflicts.push(KeyConflict {
                    sku: record.sku.clone(),
                    expected_name: acc.product_name.clone(),
                    expected_category: acc.category.clone(),
                    found_name: record.product_name.clone(),
                    found_category: record.category.clone(),
                    date: record.date,
                });
            }
        }

        acc.add(record);
    }

    let metrics: Vec<SkuMetrics> = groups
        .into_iter()
        .map(|(sku, acc)| acc.finish(sku))
        .collect();

    debug!("Built metrics for {} SKUs", metrics.len());

    SkuAggregation { metrics, conflicts }
}
