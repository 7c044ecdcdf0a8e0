//! Window-wide summary statistics.

use super::sku::ratio;
use crate::source::TransactionRecord;
use serde::{Deserialize, Serialize};

/// Totals over every record in the window
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub total_revenue: f64,
    pub total_quantity: u64,

    /// Revenue per unit, 0 when nothing was sold
    pub overall_average_order_value: f64,
}

impl SummaryStats {
    /// Get human-readable summary
    pub fn summary(&self) -> String {
        format!(
            "Revenue: ${:.2} | Units: {} | AOV: ${:.2}",
            self.total_revenue, self.total_quantity, self.overall_average_order_value
        )
    }
}

/// Compute totals and overall average order value
pub fn calculate_summary(records: &[TransactionRecord]) -> SummaryStats {
    let total_revenue: f64 = records.iter().map(|r| r.total_revenue).sum();
    let total_quantity = records
        .iter()
        .fold(0u64, |acc, r| acc.saturating_add(r.quantity_sold));

    SummaryStats {
        total_revenue,
        total_quantity,
        overall_average_order_value: ratio(total_revenue, total_quantity as f64),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_summary() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let records = vec![
            TransactionRecord::new(date, "A", "Alpha", "X", 3, 2.0),
            TransactionRecord::new(date, "B", "Beta", "X", 1, 10.0),
        ];
        let stats = calculate_summary(&records);

        assert_eq!(stats.total_revenue, 16.0);
        assert_eq!(stats.total_quantity, 4);
        assert_eq!(stats.overall_average_order_value, 4.0);
    }

    #[test]
    fn test_empty_summary_is_zero() {
        assert_eq!(calculate_summary(&[]), SummaryStats::default());
    }

    #[test]
    fn test_total_quantity_saturates() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let records = vec![
            TransactionRecord::new(date, "A", "Alpha", "X", 10_000_000_000_000_000_000, 1.0),
            TransactionRecord::new(date, "A", "Alpha", "X", 10_000_000_000_000_000_000, 1.0),
        ];

        assert_eq!(calculate_summary(&records).total_quantity, u64::MAX);
    }
}
