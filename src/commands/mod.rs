//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod analyze;
pub mod explore;
pub mod models;
pub mod sample;
pub mod utils;

// Re-export main command functions
pub use analyze::{execute_analyze, resolve_export_path, validate_args};
pub use explore::{run_explore, ExploreSession, Reply};
pub use models::{AnalyzeArgs, SampleArgs, SourceArgs};
pub use sample::execute_sample;
pub use utils::{display_schema, display_version, load_dataset, show_report, validate_sales_file};
