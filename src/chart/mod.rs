//! SVG chart rendering.
//!
//! This module converts dashboard series into standalone SVG charts.

pub mod generator;

// Re-export main types
pub use generator::{render_bar_chart, render_dashboard_charts, render_trend_chart, ChartConfig};
