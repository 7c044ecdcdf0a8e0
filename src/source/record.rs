//! Transaction record definition.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single sale event for one SKU on one day
///
/// `total_revenue` is always derived from quantity and price, never taken
/// from the input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub date: NaiveDate,
    pub sku: String,
    pub product_name: String,
    pub category: String,
    pub quantity_sold: u64,
    pub unit_price: f64,
    pub total_revenue: f64,
}

impl TransactionRecord {
    /// Create a record, computing `total_revenue`
    pub fn new(
        date: NaiveDate,
        sku: impl Into<String>,
        product_name: impl Into<String>,
        category: impl Into<String>,
        quantity_sold: u64,
        unit_price: f64,
    ) -> Self {
        Self {
            date,
            sku: sku.into(),
            product_name: product_name.into(),
            category: category.into(),
            quantity_sold,
            unit_price,
            total_revenue: quantity_sold as f64 * unit_price,
        }
    }
}
