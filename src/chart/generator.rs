//! Hand-written SVG charts for the dashboard.
//!
//! Bar charts for the ranked SKUs and categories, and a line chart for the
//! daily revenue trend. Output is a self-contained SVG string.

use crate::aggregator::{DailyMetrics, Dashboard};
use crate::utils::error::ChartError;
use log::info;

const MARGIN_LEFT: f64 = 70.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 40.0;
const MARGIN_BOTTOM: f64 = 90.0;
const GRID_LINES: usize = 4;

/// Chart configuration
#[derive(Debug, Clone)]
pub struct ChartConfig {
    pub title: String,
    pub width: usize,
    pub height: usize,
    pub color: String,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            title: "SKU Performance".to_string(),
            width: 900,
            height: 480,
            color: "rgb(70, 130, 180)".to_string(),
        }
    }
}

impl ChartConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    fn plot_width(&self) -> f64 {
        (self.width as f64 - MARGIN_LEFT - MARGIN_RIGHT).max(1.0)
    }

    fn plot_height(&self) -> f64 {
        (self.height as f64 - MARGIN_TOP - MARGIN_BOTTOM).max(1.0)
    }
}

/// Render a vertical bar chart of labelled values
pub fn render_bar_chart(
    bars: &[(String, f64)],
    config: &ChartConfig,
) -> Result<String, ChartError> {
    if bars.is_empty() {
        return Err(ChartError::EmptySeries(config.title.clone()));
    }

    let max_value = axis_max(bars.iter().map(|(_, v)| *v));
    let plot_w = config.plot_width();
    let plot_h = config.plot_height();
    let slot = plot_w / bars.len() as f64;
    let bar_w = slot * 0.7;

    let mut svg = open_svg(config);
    render_axes(&mut svg, config, max_value);

    for (i, (label, value)) in bars.iter().enumerate() {
        let h = value / max_value * plot_h;
        let x = MARGIN_LEFT + i as f64 * slot + (slot - bar_w) / 2.0;
        let y = MARGIN_TOP + plot_h - h;

        svg.push_str(&format!(
            r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}" class="bar"><title>{}: {:.2}</title></rect>"#,
            x,
            y,
            bar_w,
            h,
            config.color,
            escape_xml(label),
            value
        ));

        // Labels rotated -45 degrees under each bar
        let label_x = x + bar_w / 2.0;
        let label_y = MARGIN_TOP + plot_h + 14.0;
        svg.push_str(&format!(
            r#"<text x="{:.2}" y="{:.2}" font-size="11" text-anchor="end" transform="rotate(-45 {:.2} {:.2})">{}</text>"#,
            label_x,
            label_y,
            label_x,
            label_y,
            escape_xml(label)
        ));
    }

    svg.push_str("</svg>");
    info!("Bar chart '{}' generated ({} bytes)", config.title, svg.len());
    Ok(svg)
}

/// Render the daily revenue trend as a polyline
pub fn render_trend_chart(
    daily: &[DailyMetrics],
    config: &ChartConfig,
) -> Result<String, ChartError> {
    if daily.is_empty() {
        return Err(ChartError::EmptySeries(config.title.clone()));
    }

    let max_value = axis_max(daily.iter().map(|d| d.total_revenue));
    let plot_w = config.plot_width();
    let plot_h = config.plot_height();
    let step = if daily.len() > 1 {
        plot_w / (daily.len() - 1) as f64
    } else {
        0.0
    };

    let mut svg = open_svg(config);
    render_axes(&mut svg, config, max_value);

    let points: Vec<String> = daily
        .iter()
        .enumerate()
        .map(|(i, d)| {
            let x = MARGIN_LEFT + i as f64 * step;
            let y = MARGIN_TOP + plot_h - d.total_revenue / max_value * plot_h;
            format!("{:.2},{:.2}", x, y)
        })
        .collect();

    svg.push_str(&format!(
        r#"<polyline points="{}" fill="none" stroke="{}" stroke-width="2"/>"#,
        points.join(" "),
        config.color
    ));

    // First and last dates under the x axis
    let axis_y = MARGIN_TOP + plot_h + 18.0;
    if let (Some(first), Some(last)) = (daily.first(), daily.last()) {
        svg.push_str(&format!(
            r#"<text x="{:.2}" y="{:.2}" font-size="11" text-anchor="start">{}</text>"#,
            MARGIN_LEFT, axis_y, first.date
        ));
        svg.push_str(&format!(
            r#"<text x="{:.2}" y="{:.2}" font-size="11" text-anchor="end">{}</text>"#,
            MARGIN_LEFT + plot_w,
            axis_y,
            last.date
        ));
    }

    svg.push_str("</svg>");
    info!("Trend chart '{}' generated ({} bytes)", config.title, svg.len());
    Ok(svg)
}

/// Render every chart the dashboard supports, keyed by file stem
///
/// Charts whose series is empty are skipped.
pub fn render_dashboard_charts(dashboard: &Dashboard) -> Vec<(&'static str, String)> {
    let n = dashboard.top_skus.len();

    let revenue: Vec<(String, f64)> = dashboard
        .top_skus
        .iter()
        .map(|m| (m.sku.clone(), m.total_revenue))
        .collect();
    let quantity: Vec<(String, f64)> = dashboard
        .top_skus
        .iter()
        .map(|m| (m.sku.clone(), m.total_quantity as f64))
        .collect();
    let categories: Vec<(String, f64)> = dashboard
        .categories
        .iter()
        .map(|c| (c.category.clone(), c.total_revenue))
        .collect();

    let charts = [
        (
            "top_skus_revenue",
            render_bar_chart(
                &revenue,
                &ChartConfig::new().with_title(format!("Top {} SKUs by Revenue", n)),
            ),
        ),
        (
            "top_skus_quantity",
            render_bar_chart(
                &quantity,
                &ChartConfig::new()
                    .with_title(format!("Top {} SKUs by Quantity Sold", n))
                    .with_color("rgb(34, 139, 34)"),
            ),
        ),
        (
            "category_revenue",
            render_bar_chart(
                &categories,
                &ChartConfig::new()
                    .with_title("Revenue by Category")
                    .with_color("rgb(255, 140, 0)"),
            ),
        ),
        (
            "daily_revenue",
            render_trend_chart(
                &dashboard.daily,
                &ChartConfig::new()
                    .with_title("Daily Revenue Trend")
                    .with_color("rgb(138, 43, 226)"),
            ),
        ),
    ];

    charts
        .into_iter()
        .filter_map(|(name, result)| result.ok().map(|svg| (name, svg)))
        .collect()
}

fn open_svg(config: &ChartConfig) -> String {
    let mut svg = String::new();

    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        config.width, config.height, config.width, config.height
    ));
    svg.push_str(r#"<style>text { font-family: sans-serif; } .bar:hover { opacity: 0.8; }</style>"#);
    svg.push_str(&format!(
        r#"<text x="{}" y="22" font-size="16" text-anchor="middle" font-weight="bold">{}</text>"#,
        config.width / 2,
        escape_xml(&config.title)
    ));

    svg
}

fn render_axes(svg: &mut String, config: &ChartConfig, max_value: f64) {
    let plot_w = config.plot_width();
    let plot_h = config.plot_height();
    let bottom = MARGIN_TOP + plot_h;

    for i in 0..=GRID_LINES {
        let fraction = i as f64 / GRID_LINES as f64;
        let y = bottom - fraction * plot_h;
        svg.push_str(&format!(
            r##"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="#ddd"/>"##,
            MARGIN_LEFT,
            y,
            MARGIN_LEFT + plot_w,
            y
        ));
        svg.push_str(&format!(
            r#"<text x="{:.2}" y="{:.2}" font-size="11" text-anchor="end">{}</text>"#,
            MARGIN_LEFT - 6.0,
            y + 4.0,
            format_tick(max_value * fraction)
        ));
    }

    svg.push_str(&format!(
        r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="black"/>"#,
        MARGIN_LEFT,
        bottom,
        MARGIN_LEFT + plot_w,
        bottom
    ));
}

/// Top of the value axis; never zero so heights stay finite
fn axis_max(values: impl Iterator<Item = f64>) -> f64 {
    let max = values.fold(0.0_f64, f64::max);
    if max > 0.0 {
        max
    } else {
        1.0
    }
}

fn format_tick(value: f64) -> String {
    if value >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if value >= 1_000.0 {
        format!("{:.1}k", value / 1_000.0)
    } else {
        format!("{:.0}", value)
    }
}

/// Escape text for inclusion in SVG markup
pub fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
