use crate::aggregator::{AnalysisRequest, DateRange, RankMetric};
use crate::utils::config::{DEFAULT_SAMPLE_SEED, DEFAULT_TOP_N, SAMPLE_DAYS};
use crate::utils::AnalysisSettings;
use chrono::NaiveDate;
use std::path::PathBuf;

/// Where records come from
#[derive(Debug, Clone, PartialEq)]
pub enum SourceArgs {
    /// Read a sales CSV
    Csv(PathBuf),

    /// Generate sample data ending on `end` (today when `None`)
    Sample {
        end: Option<NaiveDate>,
        days: u32,
        seed: u64,
    },
}

impl Default for SourceArgs {
    fn default() -> Self {
        Self::Sample {
            end: None,
            days: SAMPLE_DAYS,
            seed: DEFAULT_SAMPLE_SEED,
        }
    }
}

/// Arguments for the analyze command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct AnalyzeArgs {
    /// Record source
    pub source: SourceArgs,

    /// Number of ranked SKUs to report
    pub top_n: usize,

    /// Ranking metric
    pub metric: RankMetric,

    /// Inclusive window start
    pub start: Option<NaiveDate>,

    /// Inclusive window end
    pub end: Option<NaiveDate>,

    /// CSV export path; a directory gets the dated default file name
    pub export_csv: Option<PathBuf>,

    /// JSON report path
    pub output_json: Option<PathBuf>,

    /// Directory for SVG charts
    pub charts_dir: Option<PathBuf>,

    /// Print text summary to stdout
    pub print_summary: bool,
}

impl Default for AnalyzeArgs {
    fn default() -> Self {
        Self {
            source: SourceArgs::default(),
            top_n: DEFAULT_TOP_N,
            metric: RankMetric::TotalRevenue,
            start: None,
            end: None,
            export_csv: None,
            output_json: None,
            charts_dir: None,
            print_summary: true,
        }
    }
}

impl AnalyzeArgs {
    /// Start from settings-file values; CLI flags are applied on top
    pub fn from_settings(settings: &AnalysisSettings) -> Self {
        Self {
            source: SourceArgs::Sample {
                end: None,
                days: settings.sample_days,
                seed: settings.seed,
            },
            top_n: settings.top_n,
            metric: settings.metric,
            start: settings.start,
            end: settings.end,
            ..Default::default()
        }
    }

    /// Pipeline request described by these arguments
    pub fn request(&self) -> AnalysisRequest {
        AnalysisRequest {
            date_range: DateRange {
                start: self.start,
                end: self.end,
            },
            metric: self.metric,
            top_n: self.top_n,
        }
    }
}

/// Arguments for the sample command
#[derive(Debug, Clone)]
pub struct SampleArgs {
    /// Last generated day (today when `None`)
    pub end: Option<NaiveDate>,

    /// Days of history before `end`
    pub days: u32,

    /// RNG seed
    pub seed: u64,

    /// Destination CSV
    pub output: PathBuf,
}

impl Default for SampleArgs {
    fn default() -> Self {
        Self {
            end: None,
            days: SAMPLE_DAYS,
            seed: DEFAULT_SAMPLE_SEED,
            output: PathBuf::from("sample_sales.csv"),
        }
    }
}
