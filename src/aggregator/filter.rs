//! Inclusive date-window filtering.
//!
//! A window with a missing endpoint, or one that ends before it starts, is
//! treated as "no filter" so callers always get something to show.

use crate::source::TransactionRecord;
use chrono::NaiveDate;
use log::debug;
use serde::{Deserialize, Serialize};

/// User-selected date window, both endpoints inclusive
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    /// A range that selects everything
    pub fn all() -> Self {
        Self::default()
    }

    /// The smallest range covering every record, or `all()` when empty
    pub fn spanning(records: &[TransactionRecord]) -> Self {
        let min = records.iter().map(|r| r.date).min();
        let max = records.iter().map(|r| r.date).max();
        Self { start: min, end: max }
    }

    /// Both endpoints when the range is well-formed
    pub fn bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        match (self.start, self.end) {
            (Some(start), Some(end)) if start <= end => Some((start, end)),
            _ => None,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        match self.bounds() {
            Some((start, end)) => start <= date && date <= end,
            None => true,
        }
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.bounds() {
            Some((start, end)) => write!(f, "{} to {}", start, end),
            None => write!(f, "all dates"),
        }
    }
}

/// Keep records whose date lies inside `range`
///
/// **Public** - first stage of the pipeline
///
/// A malformed range returns every record unchanged.
pub fn filter_by_date(records: &[TransactionRecord], range: &DateRange) -> Vec<TransactionRecord> {
    let Some((start, end)) = range.bounds() else {
        if range.start.is_some() || range.end.is_some() {
            debug!("Ignoring malformed date range {:?}, using all records", range);
        }
        return records.to_vec();
    };

    let filtered: Vec<TransactionRecord> = records
        .iter()
        .filter(|r| start <= r.date && r.date <= end)
        .cloned()
        .collect();

    debug!(
        "Date filter {} to {} kept {} of {} records",
        start,
        end,
        filtered.len(),
        records.len()
    );

    filtered
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, d).unwrap()
    }

    fn records() -> Vec<TransactionRecord> {
        (1..=10)
            .map(|d| TransactionRecord::new(day(d), "A", "Alpha", "Cat", 1, 1.0))
            .collect()
    }

    #[test]
    fn test_endpoints_inclusive() {
        let filtered = filter_by_date(&records(), &DateRange::new(day(3), day(5)));
        let dates: Vec<_> = filtered.iter().map(|r| r.date).collect();
        assert_eq!(dates, vec![day(3), day(4), day(5)]);
    }

    #[test]
    fn test_single_day_range() {
        let filtered = filter_by_date(&records(), &DateRange::new(day(7), day(7)));
        assert_eq!(filtered.len(), 1);
    }

    #[test]
    fn test_partial_range_falls_back() {
        let range = DateRange {
            start: Some(day(3)),
            end: None,
        };
        assert_eq!(filter_by_date(&records(), &range).len(), 10);
    }

    #[test]
    fn test_inverted_range_falls_back() {
        assert_eq!(filter_by_date(&records(), &DateRange::new(day(8), day(2))).len(), 10);
    }

    #[test]
    fn test_range_outside_data_is_empty() {
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2023, 1, 31).unwrap(),
        );
        assert!(filter_by_date(&records(), &range).is_empty());
    }

    #[test]
    fn test_filter_is_idempotent() {
        let range = DateRange::new(day(2), day(6));
        let once = filter_by_date(&records(), &range);
        let twice = filter_by_date(&once, &range);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_spanning() {
        let range = DateRange::spanning(&records());
        assert_eq!(range.bounds(), Some((day(1), day(10))));
        assert_eq!(DateRange::spanning(&[]), DateRange::all());
    }
}
