//! Interactive exploration session.
//!
//! Reads one command per line, updates the analysis controls and re-renders
//! the dashboard after every change. Results are memoized per
//! (dataset, request); loading a new dataset clears the cache.

use crate::aggregator::{AnalysisRequest, Dashboard, DashboardCache, DateRange, RankMetric};
use crate::commands::analyze::resolve_export_path;
use crate::output::write_top_skus_csv;
use crate::report::render_dashboard;
use crate::source::{parse_date, Dataset};
use crate::utils::config::{DEFAULT_SAMPLE_SEED, SAMPLE_DAYS, TOP_N_MAX, TOP_N_MIN};
use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use log::{debug, info};
use std::io::{BufRead, Write};
use std::path::PathBuf;

const HELP: &str = "\
Commands:
  show                 Render the dashboard
  top <N>              Rank the top N SKUs (5-20)
  metric <M>           Rank by revenue, quantity or aov
  range <START> <END>  Restrict to an inclusive date window
  range all            Use every date
  load <PATH>          Load sales data from a CSV file
  sample [SEED]        Switch to generated sample data
  export [PATH]        Write the ranked table as CSV
  cache                Show cache statistics
  help                 Show this help
  quit                 Leave the session";

/// Result of handling one input line
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Text(String),
    Quit,
}

/// State of one interactive session
pub struct ExploreSession {
    dataset: Dataset,
    request: AnalysisRequest,
    cache: DashboardCache,
    today: NaiveDate,
}

impl ExploreSession {
    pub fn new(dataset: Dataset, request: AnalysisRequest) -> Self {
        Self {
            dataset,
            request,
            cache: DashboardCache::new(),
            today: Local::now().date_naive(),
        }
    }

    /// Pin the date used for sample data and export names
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn request(&self) -> &AnalysisRequest {
        &self.request
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn cache(&self) -> &DashboardCache {
        &self.cache
    }

    /// Current dashboard, computed or taken from the cache
    pub fn dashboard(&mut self) -> &Dashboard {
        self.cache.get_or_analyze(&self.dataset, &self.request)
    }

    /// Apply one command line
    ///
    /// # Errors
    /// Unknown commands and invalid arguments; session state is unchanged
    pub fn handle(&mut self, line: &str) -> Result<Reply> {
        let mut parts = line.split_whitespace();
        let Some(command) = parts.next() else {
            return Ok(Reply::Text(String::new()));
        };
        let args: Vec<&str> = parts.collect();
        debug!("Session command '{}' {:?}", command, args);

        match command.to_lowercase().as_str() {
            "help" | "?" => Ok(Reply::Text(HELP.to_string())),
            "quit" | "exit" | "q" => Ok(Reply::Quit),
            "show" => Ok(self.render()),
            "top" => {
                let n: usize = single_arg(&args, "top <N>")?
                    .parse()
                    .context("top expects a whole number")?;
                if !(TOP_N_MIN..=TOP_N_MAX).contains(&n) {
                    anyhow::bail!("top must be between {} and {}", TOP_N_MIN, TOP_N_MAX);
                }
                self.request.top_n = n;
                Ok(self.render())
            }
            "metric" => {
                let metric: RankMetric = single_arg(&args, "metric <revenue|quantity|aov>")?
                    .parse()
                    .map_err(|e: String| anyhow::anyhow!(e))?;
                self.request.metric = metric;
                Ok(self.render())
            }
            "range" => {
                self.request.date_range = parse_range(&args)?;
                Ok(self.render())
            }
            "load" => {
                let path = PathBuf::from(single_arg(&args, "load <PATH>")?);
                let dataset = Dataset::from_csv_file(&path)
                    .with_context(|| format!("Failed to load {}", path.display()))?;
                self.replace_dataset(dataset);
                Ok(self.render())
            }
            "sample" => {
                let seed = match args.first() {
                    Some(raw) => raw.parse().context("sample expects a numeric seed")?,
                    None => DEFAULT_SAMPLE_SEED,
                };
                self.replace_dataset(Dataset::sample(self.today, SAMPLE_DAYS, seed));
                Ok(self.render())
            }
            "export" => {
                let target = args.first().map(PathBuf::from).unwrap_or_default();
                let path = resolve_export_path(&target, self.today);
                let dashboard = self.dashboard();
                write_top_skus_csv(&dashboard.top_skus, &path)
                    .context("Failed to write CSV export")?;
                Ok(Reply::Text(format!(
                    "Exported {} SKUs to {}",
                    dashboard.top_skus.len(),
                    path.display()
                )))
            }
            "cache" => Ok(Reply::Text(format!(
                "Cache: {} entries, {} hits, {} misses",
                self.cache.len(),
                self.cache.hits(),
                self.cache.misses()
            ))),
            other => anyhow::bail!("Unknown command '{}', type 'help' for a list", other),
        }
    }

    fn render(&mut self) -> Reply {
        Reply::Text(render_dashboard(self.dashboard()))
    }

    fn replace_dataset(&mut self, dataset: Dataset) {
        info!("Switching dataset to {}", dataset.origin);
        self.dataset = dataset;
        self.cache.invalidate();
    }
}

fn single_arg<'a>(args: &[&'a str], usage: &str) -> Result<&'a str> {
    match args {
        [value] => Ok(value),
        _ => anyhow::bail!("usage: {}", usage),
    }
}

fn parse_range(args: &[&str]) -> Result<DateRange> {
    match args {
        [all] if all.eq_ignore_ascii_case("all") => Ok(DateRange::all()),
        [start, end] => {
            let start = parse_date(start)
                .with_context(|| format!("Invalid start date '{}'", start))?;
            let end = parse_date(end).with_context(|| format!("Invalid end date '{}'", end))?;
            Ok(DateRange::new(start, end))
        }
        _ => anyhow::bail!("usage: range <START> <END> | range all"),
    }
}

/// Drive a session from `input` until EOF or `quit`
///
/// Command errors are printed and the session continues.
pub fn run_explore<R: BufRead, W: Write>(
    session: &mut ExploreSession,
    input: R,
    mut output: W,
) -> Result<()> {
    writeln!(output, "{}", HELP)?;
    write!(output, "> ")?;
    output.flush()?;

    for line in input.lines() {
        let line = line.context("Failed to read input")?;

        match session.handle(&line) {
            Ok(Reply::Quit) => break,
            Ok(Reply::Text(text)) => {
                if !text.is_empty() {
                    writeln!(output, "{}", text)?;
                }
            }
            Err(e) => writeln!(output, "error: {:#}", e)?,
        }

        write!(output, "> ")?;
        output.flush()?;
    }

    Ok(())
}
