//! Configuration and constants for the CLI.

/// Current report schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

// Bounds of the top-N selector exposed to users
pub const TOP_N_MIN: usize = 5;
pub const TOP_N_MAX: usize = 20;
pub const DEFAULT_TOP_N: usize = 10;

/// Bucket used when a record carries no category
pub const UNKNOWN_CATEGORY: &str = "Unknown";

/// Columns every uploaded sales CSV must carry
pub const REQUIRED_COLUMNS: &[&str] =
    &["date", "sku", "product_name", "quantity_sold", "unit_price"];

pub const CATEGORY_COLUMN: &str = "category";

// Accepted calendar date layouts, tried in order
pub const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d.%m.%Y"];

// Date-time layouts whose date part is kept
pub const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// Days of history produced by the sample generator
pub const SAMPLE_DAYS: u32 = 180;
pub const DEFAULT_SAMPLE_SEED: u64 = 42;

/// Prefix of the exported top-N CSV, followed by `_YYYYMMDD.csv`
pub const EXPORT_FILE_PREFIX: &str = "top_skus_analysis";

/// Number of leading ranked SKUs used for the revenue concentration figure
pub const TOP_SHARE_COUNT: usize = 3;

/// Dropped CSV rows echoed back to the user with their reason
pub const MAX_REPORTED_DROPS: usize = 5;
