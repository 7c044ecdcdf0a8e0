//! SKU Insight CLI
//!
//! Aggregates sales transactions per SKU, ranks the top performers and
//! writes text, CSV, JSON and SVG reports.

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::io;
use std::path::PathBuf;

use sku_insight::aggregator::RankMetric;
use sku_insight::commands::{
    display_schema, display_version, execute_analyze, execute_sample, load_dataset, run_explore,
    show_report, validate_args, validate_sales_file, AnalyzeArgs, ExploreSession, SampleArgs,
    SourceArgs,
};
use sku_insight::utils::{load_settings, AnalysisSettings};

/// SKU Insight - per-SKU sales performance analysis
#[derive(Parser, Debug)]
#[command(name = "sku-insight")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Analysis controls shared by `analyze` and `explore`
#[derive(clap::Args, Debug)]
struct ControlArgs {
    /// Sales CSV to analyze (sample data when omitted)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Number of top SKUs to rank (5-20)
    #[arg(short = 'n', long)]
    top_n: Option<usize>,

    /// Ranking metric
    #[arg(short, long, value_enum)]
    metric: Option<RankMetric>,

    /// First day of the window (inclusive)
    #[arg(long)]
    start: Option<NaiveDate>,

    /// Last day of the window (inclusive)
    #[arg(long)]
    end: Option<NaiveDate>,

    /// TOML settings file with default controls
    #[arg(short, long, env = "SKU_INSIGHT_CONFIG")]
    config: Option<PathBuf>,

    /// Seed for generated sample data
    #[arg(long)]
    seed: Option<u64>,

    /// Days of generated sample history
    #[arg(long)]
    days: Option<u32>,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Aggregate, rank and report sales data
    Analyze {
        #[command(flatten)]
        controls: ControlArgs,

        /// Export the ranked table as CSV (dated file name when no path or a directory is given)
        #[arg(long, num_args = 0..=1, default_missing_value = ".")]
        export_csv: Option<PathBuf>,

        /// Output path for the JSON report
        #[arg(short, long)]
        json: Option<PathBuf>,

        /// Directory for SVG charts
        #[arg(long)]
        charts: Option<PathBuf>,

        /// Skip the text summary on stdout
        #[arg(short, long)]
        quiet: bool,
    },

    /// Write generated sample sales data to a CSV file
    Sample {
        /// Output CSV path
        #[arg(short, long, default_value = "sample_sales.csv")]
        output: PathBuf,

        /// Last generated day (defaults to today)
        #[arg(long)]
        end: Option<NaiveDate>,

        /// Days of history
        #[arg(long, default_value_t = sku_insight::utils::config::SAMPLE_DAYS)]
        days: u32,

        /// RNG seed
        #[arg(long, default_value_t = sku_insight::utils::config::DEFAULT_SAMPLE_SEED)]
        seed: u64,
    },

    /// Validate a sales CSV file
    Validate {
        /// Path to sales CSV
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Print the summary of a saved JSON report
    Show {
        /// Path to report JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Interactive session over one dataset
    Explore {
        #[command(flatten)]
        controls: ControlArgs,
    },

    /// Display schema information
    Schema {
        /// Show full schema details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Analyze {
            controls,
            export_csv,
            json,
            charts,
            quiet,
        } => {
            let mut args = build_analyze_args(controls)?;
            args.export_csv = export_csv;
            args.output_json = json;
            args.charts_dir = charts;
            args.print_summary = !quiet;

            // Validate args first
            validate_args(&args)?;

            execute_analyze(args)?;
        }

        Commands::Sample {
            output,
            end,
            days,
            seed,
        } => {
            execute_sample(SampleArgs {
                end,
                days,
                seed,
                output,
            })?;
        }

        Commands::Validate { file } => {
            validate_sales_file(&file)?;
        }

        Commands::Show { file } => {
            show_report(file)?;
        }

        Commands::Explore { controls } => {
            let args = build_analyze_args(controls)?;
            validate_args(&args)?;

            let dataset = load_dataset(&args.source)?;
            let mut session = ExploreSession::new(dataset, args.request());
            run_explore(&mut session, io::stdin().lock(), io::stdout().lock())?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}

/// Merge settings file values with command-line flags
///
/// **Private** - flags always win over the settings file
fn build_analyze_args(controls: ControlArgs) -> Result<AnalyzeArgs> {
    let settings = match &controls.config {
        Some(path) => load_settings(path)?,
        None => AnalysisSettings::default(),
    };

    let mut args = AnalyzeArgs::from_settings(&settings);

    if let Some(top_n) = controls.top_n {
        args.top_n = top_n;
    }
    if let Some(metric) = controls.metric {
        args.metric = metric;
    }
    if controls.start.is_some() {
        args.start = controls.start;
    }
    if controls.end.is_some() {
        args.end = controls.end;
    }

    args.source = match controls.input {
        Some(path) => SourceArgs::Csv(path),
        None => SourceArgs::Sample {
            end: None,
            days: controls.days.unwrap_or(settings.sample_days),
            seed: controls.seed.unwrap_or(settings.seed),
        },
    };

    Ok(args)
}
