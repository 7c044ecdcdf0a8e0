//! Sample command: write generated sales data as a CSV.

use crate::commands::models::{SampleArgs, SourceArgs};
use crate::commands::utils::load_dataset;
use crate::output::write_records_csv;
use anyhow::{Context, Result};
use log::info;

/// Generate sample records and write them in the ingest layout
///
/// # Returns
/// Number of records written
pub fn execute_sample(args: SampleArgs) -> Result<usize> {
    if args.days == 0 {
        anyhow::bail!("Sample days must be greater than 0");
    }

    let dataset = load_dataset(&SourceArgs::Sample {
        end: args.end,
        days: args.days,
        seed: args.seed,
    })?;

    write_records_csv(&dataset.records, &args.output).context("Failed to write sample CSV")?;
    info!(
        "✓ {} sample records written to: {}",
        dataset.records.len(),
        args.output.display()
    );

    Ok(dataset.records.len())
}
