//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors that can occur while loading sales records
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("missing column: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("CSV has no header row")]
    EmptyHeader,

    #[error("Failed to read CSV: {0}")]
    CsvFailed(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Failed to write CSV: {0}")]
    CsvFailed(#[from] csv::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}

/// Errors that can occur while loading a settings file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Settings TOML parse error: {0}")]
    ParseFailed(#[from] toml::de::Error),

    #[error("Invalid settings: {0}")]
    Invalid(String),
}

/// Errors that can occur while rendering charts
#[derive(Error, Debug)]
pub enum ChartError {
    #[error("No data to plot for chart '{0}'")]
    EmptySeries(String),
}
