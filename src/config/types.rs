//! Configuration types.
//!
//! This module defines the enums and structs that describe an export run.
//! The binary maps its command-line options onto [`Config`]; library users
//! construct it directly.

use std::path::PathBuf;

use clap::ValueEnum;

use crate::config::constants::*;
use crate::error_handling::ExportError;
use crate::export::OutputFormat;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Built-in export presets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Profile {
    /// `vw_customer_ltv` plus a metric summary file
    CustomerLtv,
    /// `vw_category_monthly_metrics`, cleaned and filtered, as CSV and Excel
    CategoryMonthly,
}

/// Month-level threshold filter settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdFilter {
    /// Group key column (e.g. the month)
    pub group_column: String,
    /// Numeric column summed per group
    pub measure_column: String,
    /// Groups whose sum is below this are dropped
    pub min_total: f64,
}

/// Library configuration (no CLI dependencies).
///
/// # Examples
///
/// ```no_run
/// use olist_export::{Config, Profile};
/// use std::path::PathBuf;
///
/// let config = Config {
///     output_dir: PathBuf::from("reports"),
///     ..Config::for_profile(Profile::CategoryMonthly)
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Preset the remaining fields were derived from
    pub profile: Profile,

    /// View to export (`[schema.]name`)
    pub view: String,

    /// Directory output files are written to (created on demand)
    pub output_dir: PathBuf,

    /// Output file name without extension
    pub output_stem: String,

    /// Formats to write; one file per format
    pub formats: Vec<OutputFormat>,

    /// Category column normalized to "Unknown" when blank
    pub clean_column: Option<String>,

    /// Group threshold filter
    pub threshold_filter: Option<ThresholdFilter>,

    /// File stem of the metric summary (written as CSV), if enabled
    pub summary_stem: Option<String>,

    /// Whether `PGPASSWORD` must be set
    pub password_required: bool,

    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,
}

impl Config {
    /// Returns the preset configuration for `profile`.
    pub fn for_profile(profile: Profile) -> Self {
        match profile {
            Profile::CustomerLtv => Self {
                profile,
                view: LTV_VIEW.to_string(),
                output_dir: PathBuf::from(LTV_OUTPUT_DIR),
                output_stem: LTV_OUTPUT_STEM.to_string(),
                formats: vec![OutputFormat::Csv],
                clean_column: None,
                threshold_filter: None,
                summary_stem: Some(LTV_SUMMARY_STEM.to_string()),
                password_required: true,
                log_level: LogLevel::Info,
                log_format: LogFormat::Plain,
            },
            Profile::CategoryMonthly => Self {
                profile,
                view: CATEGORY_VIEW.to_string(),
                output_dir: PathBuf::from(CATEGORY_OUTPUT_DIR),
                output_stem: CATEGORY_OUTPUT_STEM.to_string(),
                formats: vec![OutputFormat::Csv, OutputFormat::Xlsx],
                clean_column: Some(CATEGORY_COLUMN.to_string()),
                threshold_filter: Some(ThresholdFilter {
                    group_column: MONTH_COLUMN.to_string(),
                    measure_column: ORDER_COUNT_COLUMN.to_string(),
                    min_total: MIN_ORDERS_PER_MONTH,
                }),
                summary_stem: None,
                password_required: false,
                log_level: LogLevel::Info,
                log_format: LogFormat::Plain,
            },
        }
    }

    /// Checks settings that would otherwise fail silently.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::InvalidSetting` if the filter threshold is NaN,
    /// infinite or negative.
    pub fn validate(&self) -> Result<(), ExportError> {
        if let Some(filter) = &self.threshold_filter {
            if !filter.min_total.is_finite() || filter.min_total < 0.0 {
                return Err(ExportError::InvalidSetting {
                    name: "min_total".to_string(),
                    value: filter.min_total.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Path of the main output file for `format`.
    pub fn output_path(&self, format: OutputFormat) -> PathBuf {
        self.output_dir
            .join(format!("{}.{}", self.output_stem, format.extension()))
    }

    /// Path of the summary file, if the summary is enabled.
    pub fn summary_path(&self) -> Option<PathBuf> {
        self.summary_stem.as_ref().map(|stem| {
            self.output_dir
                .join(format!("{}.{}", stem, OutputFormat::Csv.extension()))
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::for_profile(Profile::CustomerLtv)
    }
}
