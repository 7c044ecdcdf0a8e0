//! Optional TOML settings file.
//!
//! Every field has a default, so an empty file is valid. Command-line flags
//! take precedence over values read here.
//!
//! ```toml
//! top_n = 15
//! metric = "quantity"
//! start = "2024-01-01"
//! end = "2024-03-31"
//! seed = 7
//! sample_days = 90
//! ```

use crate::aggregator::RankMetric;
use crate::utils::config::{DEFAULT_SAMPLE_SEED, DEFAULT_TOP_N, SAMPLE_DAYS, TOP_N_MAX, TOP_N_MIN};
use crate::utils::error::ConfigError;
use chrono::NaiveDate;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Analysis defaults loaded from a settings file
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AnalysisSettings {
    /// Number of ranked SKUs to report
    pub top_n: usize,

    /// Ranking metric
    pub metric: RankMetric,

    /// Inclusive window start
    pub start: Option<NaiveDate>,

    /// Inclusive window end
    pub end: Option<NaiveDate>,

    /// Seed for the sample generator
    pub seed: u64,

    /// Days of generated sample history
    pub sample_days: u32,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            metric: RankMetric::TotalRevenue,
            start: None,
            end: None,
            seed: DEFAULT_SAMPLE_SEED,
            sample_days: SAMPLE_DAYS,
        }
    }
}

impl AnalysisSettings {
    /// Check value ranges that serde cannot express
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(TOP_N_MIN..=TOP_N_MAX).contains(&self.top_n) {
            return Err(ConfigError::Invalid(format!(
                "top_n must be between {} and {}, got {}",
                TOP_N_MIN, TOP_N_MAX, self.top_n
            )));
        }

        if self.sample_days == 0 {
            return Err(ConfigError::Invalid("sample_days must be greater than 0".to_string()));
        }

        Ok(())
    }
}

/// Load settings from a TOML file
///
/// # Errors
/// * `ConfigError::IoError` - If file cannot be read
/// * `ConfigError::ParseFailed` - If TOML is invalid
/// * `ConfigError::Invalid` - If a value is out of range
pub fn load_settings(path: impl AsRef<Path>) -> Result<AnalysisSettings, ConfigError> {
    let path = path.as_ref();
    debug!("Loading settings from: {}", path.display());

    let contents = fs::read_to_string(path)?;
    let settings: AnalysisSettings = toml::from_str(&contents)?;
    settings.validate()?;

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_toml(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let file = write_toml("");
        let settings = load_settings(file.path()).unwrap();
        assert_eq!(settings, AnalysisSettings::default());
    }

    #[test]
    fn test_load_full_settings() {
        let file = write_toml(
            "top_n = 15\nmetric = \"quantity\"\nstart = \"2024-01-01\"\nend = \"2024-03-31\"\nseed = 7\n",
        );
        let settings = load_settings(file.path()).unwrap();

        assert_eq!(settings.top_n, 15);
        assert_eq!(settings.metric, RankMetric::QuantitySold);
        assert_eq!(settings.start, NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(settings.end, NaiveDate::from_ymd_opt(2024, 3, 31));
        assert_eq!(settings.seed, 7);
        assert_eq!(settings.sample_days, SAMPLE_DAYS);
    }

    #[test]
    fn test_top_n_out_of_range() {
        let file = write_toml("top_n = 50\n");
        assert!(matches!(load_settings(file.path()), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_bad_toml() {
        let file = write_toml("top_n = \"ten\"\n");
        assert!(matches!(load_settings(file.path()), Err(ConfigError::ParseFailed(_))));
    }
}
