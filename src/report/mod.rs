//! Human-readable report rendering.

pub mod text;

pub use text::{format_count, format_money, render_dashboard};
