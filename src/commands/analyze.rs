//! Analyze command implementation.
//!
//! The analyze command:
//! 1. Loads records (CSV or sample data)
//! 2. Runs the aggregation pipeline for the requested window and metric
//! 3. Writes the requested CSV, JSON and SVG outputs
//! 4. Prints the text report

use crate::aggregator::{analyze, Dashboard};
use crate::chart::render_dashboard_charts;
use crate::commands::models::{AnalyzeArgs, SourceArgs};
use crate::commands::utils::load_dataset;
use crate::output::{export_file_name, write_report, write_svg, write_top_skus_csv};
use crate::report::render_dashboard;
use crate::utils::config::{TOP_N_MAX, TOP_N_MIN};
use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Execute the analyze command
///
/// **Public** - main entry point called from main.rs
///
/// # Returns
/// The computed dashboard, after all requested outputs are written
///
/// # Errors
/// * CSV load failures (missing columns, unreadable file)
/// * File write errors
pub fn execute_analyze(args: AnalyzeArgs) -> Result<Dashboard> {
    let start_time = Instant::now();

    info!("Loading records...");
    let dataset = load_dataset(&args.source)?;

    if dataset.report.rows_dropped > 0 {
        warn!(
            "{} row(s) could not be parsed and were dropped",
            dataset.report.rows_dropped
        );
    }

    let request = args.request();
    if (request.date_range.start.is_some() || request.date_range.end.is_some())
        && request.date_range.bounds().is_none()
    {
        warn!("Date range is incomplete or inverted, analyzing all dates");
    }

    info!("Running analysis...");
    let dashboard = analyze(&dataset, &request);

    debug!("Top 3 SKUs:");
    for (i, m) in dashboard.top_skus.iter().take(3).enumerate() {
        debug!(
            "  {}. {} revenue {:.2}, {} units",
            i + 1,
            m.sku,
            m.total_revenue,
            m.total_quantity
        );
    }

    write_outputs(&args, &dashboard)?;

    if args.print_summary {
        print!("{}", render_dashboard(&dashboard));
    }

    info!(
        "Analysis completed in {:.2}s",
        start_time.elapsed().as_secs_f64()
    );
    Ok(dashboard)
}

/// Write CSV export, JSON report and charts as requested.
///
/// **Private** - internal helper for execute_analyze
fn write_outputs(args: &AnalyzeArgs, dashboard: &Dashboard) -> Result<()> {
    if let Some(path) = &args.export_csv {
        let path = resolve_export_path(path, Local::now().date_naive());
        write_top_skus_csv(&dashboard.top_skus, &path).context("Failed to write CSV export")?;
        info!("✓ Top SKUs exported to: {}", path.display());
    }

    if let Some(path) = &args.output_json {
        write_report(dashboard, path).context("Failed to write JSON report")?;
        info!("✓ Report written to: {}", path.display());
    }

    if let Some(dir) = &args.charts_dir {
        let charts = render_dashboard_charts(dashboard);
        if charts.is_empty() {
            warn!("Nothing to chart for this window");
        }
        for (name, svg) in charts {
            let path = dir.join(format!("{}.svg", name));
            write_svg(&svg, &path)
                .with_context(|| format!("Failed to write chart {}", path.display()))?;
        }
        info!("✓ Charts written to: {}", dir.display());
    }

    Ok(())
}

/// Turn a directory (or `.`) into `<dir>/top_skus_analysis_YYYYMMDD.csv`
pub fn resolve_export_path(path: &Path, today: NaiveDate) -> PathBuf {
    let is_dir_like = path.is_dir()
        || path.as_os_str().is_empty()
        || path.to_string_lossy().ends_with(std::path::MAIN_SEPARATOR);

    if is_dir_like {
        path.join(export_file_name(today))
    } else {
        path.to_path_buf()
    }
}

/// Validate analyze arguments
///
/// **Public** - can be called before execute_analyze for early validation
pub fn validate_args(args: &AnalyzeArgs) -> Result<()> {
    if !(TOP_N_MIN..=TOP_N_MAX).contains(&args.top_n) {
        anyhow::bail!(
            "top_n must be between {} and {}, got {}",
            TOP_N_MIN,
            TOP_N_MAX,
            args.top_n
        );
    }

    match &args.source {
        SourceArgs::Csv(path) => {
            if !path.is_file() {
                anyhow::bail!("Input file not found: {}", path.display());
            }
        }
        SourceArgs::Sample { days, .. } => {
            if *days == 0 {
                anyhow::bail!("Sample days must be greater than 0");
            }
        }
    }

    if let Some(dir) = &args.charts_dir {
        if dir.is_file() {
            anyhow::bail!("Charts path is a file: {}", dir.display());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_export_path_for_directory() {
        let dir = tempfile::tempdir().unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();

        assert_eq!(
            resolve_export_path(dir.path(), today),
            dir.path().join("top_skus_analysis_20240229.csv")
        );
    }

    #[test]
    fn test_resolve_export_path_keeps_file_names() {
        let today = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        let path = Path::new("out/ranked.csv");
        assert_eq!(resolve_export_path(path, today), PathBuf::from("out/ranked.csv"));
    }
}
