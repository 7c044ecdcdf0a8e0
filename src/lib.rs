//! SKU Insight
//!
//! Per-SKU sales performance analysis: load transaction records from CSV
//! (or generate sample data), aggregate them per SKU, category and day,
//! rank the top performers and report the results as text, CSV, JSON
//! and SVG charts.
//!
//! This crate provides the core implementation for the
//! `sku-insight` CLI tool.
//!
//! ## Getting Started
//!
//! ```bash
//! sku-insight analyze --input sales.csv --top-n 10 --metric revenue
//! sku-insight explore --sample
//! sku-insight --help
//! ```
//!
//! Library users typically build a [`source::Dataset`] and call
//! [`aggregator::analyze`].

pub mod aggregator;
pub mod chart;
pub mod commands;
pub mod output;
pub mod report;
pub mod source;
pub mod utils;
