use crate::commands::models::SourceArgs;
use crate::output::read_report;
use crate::report::render_dashboard;
use crate::source::{Dataset, IngestReport};
use crate::utils::config::{REQUIRED_COLUMNS, SCHEMA_VERSION, TOP_N_MAX, TOP_N_MIN};
use anyhow::{Context, Result};
use chrono::Local;
use std::path::{Path, PathBuf};

/// Load the dataset described by `source`
pub fn load_dataset(source: &SourceArgs) -> Result<Dataset> {
    match source {
        SourceArgs::Csv(path) => Dataset::from_csv_file(path)
            .with_context(|| format!("Failed to load sales data from {}", path.display())),
        SourceArgs::Sample { end, days, seed } => {
            let end = end.unwrap_or_else(|| Local::now().date_naive());
            Ok(Dataset::sample(end, *days, *seed))
        }
    }
}

/// Ingest a sales CSV and print what was kept and dropped
pub fn validate_sales_file(file_path: &Path) -> Result<IngestReport> {
    println!("Validating sales data: {}", file_path.display());

    let dataset = Dataset::from_csv_file(file_path)
        .with_context(|| format!("Failed to load sales data from {}", file_path.display()))?;
    let report = &dataset.report;

    println!("✓ Required columns present");
    println!("  Rows read:       {}", report.rows_read);
    println!("  Rows loaded:     {}", report.rows_loaded);
    println!("  Rows dropped:    {}", report.rows_dropped);
    println!("  Zero quantity:   {}", report.zero_quantity_skipped);
    println!("  No category:     {}", report.category_defaulted);

    for dropped in &report.dropped_samples {
        println!("    line {}: {}", dropped.line, dropped.reason);
    }

    if let Some((first, last)) = dataset.date_bounds() {
        println!("  Date span:       {} to {}", first, last);
    }

    Ok(dataset.report)
}

/// Print the text summary of a saved JSON report
pub fn show_report(file_path: PathBuf) -> Result<()> {
    let dashboard = read_report(&file_path)
        .with_context(|| format!("Failed to read report {}", file_path.display()))?;

    if dashboard.schema_version != SCHEMA_VERSION {
        log::warn!(
            "Report schema {} differs from current {}",
            dashboard.schema_version,
            SCHEMA_VERSION
        );
    }

    println!("Report generated at {}", dashboard.generated_at);
    print!("{}", render_dashboard(&dashboard));

    Ok(())
}

/// Display input and report format information
pub fn display_schema(show_details: bool) {
    println!("SKU Insight Data Formats");
    println!("Report Schema Version: {}", SCHEMA_VERSION);
    println!();

    if show_details {
        println!("Sales CSV input:");
        println!("  required columns:  {}", REQUIRED_COLUMNS.join(", "));
        println!("  optional columns:  category (defaults to 'Unknown')");
        println!("  date:              YYYY-MM-DD, YYYY/MM/DD, MM/DD/YYYY, DD.MM.YYYY or ISO date-time");
        println!("  quantity_sold:     non-negative whole number (0 rows are skipped)");
        println!("  unit_price:        non-negative decimal");
        println!();
        println!("Top-N CSV export:");
        println!("  sku, product_name, category, total_quantity, total_revenue, avg_order_value");
        println!();
        println!("JSON report:");
        println!("  schema_version: string   - Report schema version");
        println!("  generated_at: string     - ISO 8601 timestamp");
        println!("  request: object          - date_range, metric, top_n");
        println!("  window: object           - Applied date window");
        println!("  summary: object          - total_revenue, total_quantity, overall_average_order_value");
        println!("  top_skus: array          - Ranked per-SKU metrics");
        println!("  categories: array        - Revenue and units per category");
        println!("  daily: array             - Revenue and units per day");
        println!("  insights: object         - Headline findings");
        println!("  key_conflicts: array     - SKUs seen with differing name/category");
        println!();
        println!("Top-N range: {}-{}", TOP_N_MIN, TOP_N_MAX);
    } else {
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
pub fn display_version() {
    println!("SKU Insight v{}", env!("CARGO_PKG_VERSION"));
    println!("Report Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Per-SKU sales performance aggregation and ranking.");
}
