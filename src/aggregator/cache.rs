//! Memoized dashboards keyed by dataset content and request.
//!
//! Entries are never updated in place. Callers drop the whole cache with
//! [`DashboardCache::invalidate`] when the dataset is replaced.

use super::pipeline::{analyze, AnalysisRequest, Dashboard};
use crate::source::Dataset;
use log::debug;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct CacheKey {
    fingerprint: u64,
    request: AnalysisRequest,
}

/// Map from (dataset fingerprint, request) to a computed dashboard
#[derive(Debug, Default)]
pub struct DashboardCache {
    entries: HashMap<CacheKey, Dashboard>,
    hits: u64,
    misses: u64,
}

impl DashboardCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached dashboard or compute and store it
    pub fn get_or_analyze(&mut self, dataset: &Dataset, request: &AnalysisRequest) -> &Dashboard {
        let key = CacheKey {
            fingerprint: dataset.fingerprint(),
            request: *request,
        };

        if self.entries.contains_key(&key) {
            self.hits += 1;
            debug!("Dashboard cache hit ({} entries)", self.entries.len());
        } else {
            self.misses += 1;
            debug!("Dashboard cache miss, computing");
        }

        self.entries
            .entry(key)
            .or_insert_with(|| analyze(dataset, request))
    }

    /// Drop every cached dashboard
    pub fn invalidate(&mut self) {
        debug!("Invalidating {} cached dashboards", self.entries.len());
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::RankMetric;
    use crate::source::TransactionRecord;
    use chrono::NaiveDate;

    fn dataset(qty: u64) -> Dataset {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        Dataset::from_records(vec![TransactionRecord::new(date, "A", "Alpha", "X", qty, 1.0)])
    }

    #[test]
    fn test_repeat_request_hits() {
        let mut cache = DashboardCache::new();
        let data = dataset(3);
        let request = AnalysisRequest::default();

        let first = cache.get_or_analyze(&data, &request).generated_at.clone();
        let second = cache.get_or_analyze(&data, &request).generated_at.clone();

        assert_eq!(first, second);
        assert_eq!(cache.hits(), 1);
        assert_eq!(cache.misses(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_new_request_or_data_misses() {
        let mut cache = DashboardCache::new();
        let request = AnalysisRequest::default();
        let by_quantity = AnalysisRequest {
            metric: RankMetric::QuantitySold,
            ..request
        };

        cache.get_or_analyze(&dataset(3), &request);
        cache.get_or_analyze(&dataset(3), &by_quantity);
        let total = cache.get_or_analyze(&dataset(4), &request).summary.total_quantity;

        assert_eq!(total, 4);
        assert_eq!(cache.misses(), 3);
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn test_invalidate() {
        let mut cache = DashboardCache::new();
        cache.get_or_analyze(&dataset(1), &AnalysisRequest::default());
        cache.invalidate();
        assert!(cache.is_empty());
    }
}
