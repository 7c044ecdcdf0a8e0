//! Terminal rendering of a dashboard.

use crate::aggregator::{Dashboard, IMMEDIATE_ACTIONS, STRATEGIC_ACTIONS};
use chrono::Weekday;

const RULE_WIDTH: usize = 80;

/// Render a full human-readable report
///
/// Empty windows produce a short notice instead of empty tables.
pub fn render_dashboard(dashboard: &Dashboard) -> String {
    let mut out = String::new();

    out.push_str(&render_header(dashboard));
    out.push_str(&render_ingest_notes(dashboard));

    if dashboard.is_empty() {
        out.push_str("\nNo sales in the selected date range.\n");
        out.push_str(&"=".repeat(RULE_WIDTH));
        out.push('\n');
        return out;
    }

    out.push_str(&render_totals(dashboard));
    out.push_str(&render_top_table(dashboard));
    out.push_str(&render_categories(dashboard));
    out.push_str(&render_insights(dashboard));
    out.push_str(&render_conflicts(dashboard));
    out.push_str(&render_actions());
    out.push_str(&"=".repeat(RULE_WIDTH));
    out.push('\n');

    out
}

fn render_header(dashboard: &Dashboard) -> String {
    let mut out = String::new();
    out.push_str(&"=".repeat(RULE_WIDTH));
    out.push_str("\nTOP SKU PERFORMANCE\n");
    out.push_str(&"=".repeat(RULE_WIDTH));
    out.push('\n');
    out.push_str(&format!("Source:  {}\n", dashboard.source));
    out.push_str(&format!("Window:  {}\n", dashboard.window));
    out.push_str(&format!(
        "Ranking: top {} by {}\n",
        dashboard.request.top_n, dashboard.request.metric
    ));
    out
}

fn render_ingest_notes(dashboard: &Dashboard) -> String {
    let ingest = &dashboard.ingest;
    let mut out = String::new();

    if ingest.rows_dropped > 0 {
        out.push_str(&format!(
            "\n! {} row(s) dropped because they could not be parsed\n",
            ingest.rows_dropped
        ));
        for dropped in &ingest.dropped_samples {
            out.push_str(&format!("    line {}: {}\n", dropped.line, dropped.reason));
        }
    }
    if ingest.category_defaulted > 0 {
        out.push_str(&format!(
            "! {} row(s) had no category and were grouped as Unknown\n",
            ingest.category_defaulted
        ));
    }

    out
}

fn render_totals(dashboard: &Dashboard) -> String {
    let summary = &dashboard.summary;
    format!(
        "\nTotal Revenue: {}   Total Units Sold: {}   Overall AOV: {}\n",
        format_money(summary.total_revenue),
        format_count(summary.total_quantity),
        format_money(summary.overall_average_order_value)
    )
}

fn render_top_table(dashboard: &Dashboard) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "\nTop {} SKUs by {}\n",
        dashboard.request.top_n, dashboard.request.metric
    ));
    out.push_str(&format!(
        "  {:>3}  {:<10} {:<24} {:<14} {:>8} {:>13} {:>9}\n",
        "#", "SKU", "Product", "Category", "Units", "Revenue", "AOV"
    ));
    out.push_str(&format!("  {}\n", "-".repeat(RULE_WIDTH - 2)));

    for (i, m) in dashboard.top_skus.iter().enumerate() {
        let flag = if m.degenerate { " *" } else { "" };
        out.push_str(&format!(
            "  {:>3}  {:<10} {:<24} {:<14} {:>8} {:>13.2} {:>9.2}{}\n",
            i + 1,
            truncate(&m.sku, 10),
            truncate(&m.product_name, 24),
            truncate(&m.category, 14),
            m.total_quantity,
            m.total_revenue,
            m.avg_order_value,
            flag
        ));
    }

    if dashboard.top_skus.iter().any(|m| m.degenerate) {
        out.push_str("  * no units sold; averages shown as 0\n");
    }
    if dashboard.sku_count > dashboard.top_skus.len() {
        out.push_str(&format!(
            "  (Showing top {} of {} SKUs)\n",
            dashboard.top_skus.len(),
            dashboard.sku_count
        ));
    }

    out
}

fn render_categories(dashboard: &Dashboard) -> String {
    let mut out = String::from("\nPerformance by Category\n");
    let total = dashboard.summary.total_revenue;

    for c in &dashboard.categories {
        let share = if total > 0.0 { c.total_revenue / total * 100.0 } else { 0.0 };
        out.push_str(&format!(
            "  {:<16} {:>13.2} {:>8} units {:>6.1}%\n",
            truncate(&c.category, 16),
            c.total_revenue,
            c.quantity_sold,
            share
        ));
    }

    out
}

fn render_insights(dashboard: &Dashboard) -> String {
    let insights = &dashboard.insights;
    let mut out = String::from("\nKey Findings\n");

    out.push_str(&format!(
        "  - Your top {} SKUs account for {:.1}% of total revenue\n",
        insights.top_share_count, insights.top_revenue_share
    ));
    if let Some(category) = &insights.strongest_category {
        out.push_str(&format!("  - {} category shows the strongest performance\n", category));
    }
    if let Some(sku) = &insights.restock_candidate {
        out.push_str(&format!("  - Consider restocking {} (highest velocity item)\n", sku));
    }
    if let Some(weekday) = insights.peak_weekday {
        let note = if matches!(weekday, Weekday::Sat | Weekday::Sun) {
            " (weekend)"
        } else {
            ""
        };
        out.push_str(&format!(
            "  - Peak sales typically occur on {}s{}\n",
            weekday_name(weekday),
            note
        ));
    }

    out
}

fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

fn render_conflicts(dashboard: &Dashboard) -> String {
    if dashboard.key_conflicts.is_empty() {
        return String::new();
    }

    let mut out = format!(
        "\n! {} SKU attribute conflict(s); first-seen name and category kept\n",
        dashboard.key_conflicts.len()
    );
    for c in &dashboard.key_conflicts {
        out.push_str(&format!(
            "    {} on {}: '{}'/'{}' vs '{}'/'{}'\n",
            c.sku, c.date, c.found_name, c.found_category, c.expected_name, c.expected_category
        ));
    }
    out
}

fn render_actions() -> String {
    let mut out = String::from("\nRecommended Actions\n  Immediate:\n");
    for (i, action) in IMMEDIATE_ACTIONS.iter().enumerate() {
        out.push_str(&format!("    {}. {}\n", i + 1, action));
    }
    out.push_str("  Strategic:\n");
    for (i, action) in STRATEGIC_ACTIONS.iter().enumerate() {
        out.push_str(&format!("    {}. {}\n", i + 1, action));
    }
    out
}

/// `$1,234.56`
pub fn format_money(value: f64) -> String {
    let cents = (value * 100.0).round() as i64;
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();
    format!("{}${}.{:02}", sign, group_thousands(cents / 100), cents % 100)
}

/// `12,345`
pub fn format_count(value: u64) -> String {
    group_thousands(value)
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    } else {
        s.to_string()
    }
}
