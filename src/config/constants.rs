//! Configuration constants.
//!
//! Defaults for the connection settings, the two built-in export profiles,
//! and the output layout.

// Connection environment variables
pub const ENV_PG_HOST: &str = "PGHOST";
pub const ENV_PG_PORT: &str = "PGPORT";
pub const ENV_PG_DATABASE: &str = "PGDATABASE";
pub const ENV_PG_USER: &str = "PGUSER";
pub const ENV_PG_PASSWORD: &str = "PGPASSWORD";

// Connection defaults
pub const DEFAULT_PG_HOST: &str = "localhost";
pub const DEFAULT_PG_PORT: u16 = 5432;
pub const DEFAULT_PG_DATABASE: &str = "olist_analytics";

// Customer lifetime value profile
pub const LTV_VIEW: &str = "vw_customer_ltv";
pub const LTV_OUTPUT_DIR: &str = "python/outputs";
pub const LTV_OUTPUT_STEM: &str = "customer_ltv";
pub const LTV_SUMMARY_STEM: &str = "ltv_summary";

// Category monthly metrics profile
pub const CATEGORY_VIEW: &str = "vw_category_monthly_metrics";
pub const CATEGORY_OUTPUT_DIR: &str = "data_exports";
pub const CATEGORY_OUTPUT_STEM: &str = "category_monthly_metrics";
/// Category name column cleaned to [`UNKNOWN_PLACEHOLDER`] when blank
pub const CATEGORY_COLUMN: &str = "product_category_name_english";
/// Month key column used for grouping
pub const MONTH_COLUMN: &str = "year_month";
/// Per-row order count summed per month
pub const ORDER_COUNT_COLUMN: &str = "distinct_orders";
/// Months whose total order count is below this are dropped
pub const MIN_ORDERS_PER_MONTH: f64 = 50.0;

/// Replacement for null, empty, or whitespace-only category values
pub const UNKNOWN_PLACEHOLDER: &str = "Unknown";

/// Worksheet name used for Excel output
pub const DEFAULT_SHEET_NAME: &str = "Sheet1";

/// Excel number format for date cells
pub const DATE_NUM_FORMAT: &str = "yyyy-mm-dd";

/// Excel number format for timestamp cells
pub const TIMESTAMP_NUM_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";
