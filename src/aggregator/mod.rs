//! Aggregation of sales records into ranked SKU metrics and breakdowns.
//!
//! This module transforms loaded records into:
//! - Per-SKU metrics and a top-N ranking
//! - Category and daily breakdowns
//! - Window totals and headline findings

pub mod breakdown;
pub mod cache;
pub mod filter;
pub mod insights;
pub mod pipeline;
pub mod ranker;
pub mod sku;
pub mod summary;

// Re-export main types and functions
pub use breakdown::{aggregate_by_category, aggregate_by_date, CategoryMetrics, DailyMetrics};
pub use cache::DashboardCache;
pub use filter::{filter_by_date, DateRange};
pub use insights::{derive_insights, Insights, IMMEDIATE_ACTIONS, STRATEGIC_ACTIONS};
pub use pipeline::{analyze, AnalysisRequest, Dashboard};
pub use ranker::{rank_top_n, RankMetric};
pub use sku::{aggregate_by_sku, KeyConflict, SkuAggregation, SkuMetrics};
pub use summary::{calculate_summary, SummaryStats};
