//! Command-line options.

use std::path::PathBuf;

use clap::Parser;

use crate::config::constants::*;
use crate::config::types::{Config, LogFormat, LogLevel, Profile, ThresholdFilter};
use crate::export::OutputFormat;

/// Command-line interface of the `olist_export` binary.
///
/// Every option left unset keeps the profile's default.
#[derive(Debug, Parser)]
#[command(
    name = "olist_export",
    version,
    about = "Export an analytics view from PostgreSQL to CSV / Excel",
    after_help = "Connection settings are read from PGHOST, PGPORT, PGDATABASE, PGUSER and PGPASSWORD (a .env file is loaded if present)."
)]
pub struct Cli {
    /// Export preset
    #[arg(value_enum)]
    pub profile: Profile,

    /// View to export instead of the profile's view
    #[arg(long)]
    pub view: Option<String>,

    /// Output directory (created if missing)
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Output file name without extension
    #[arg(long)]
    pub output_stem: Option<String>,

    /// Output format; repeat to write several
    #[arg(long = "format", value_enum)]
    pub formats: Vec<OutputFormat>,

    /// Category column to clean (blank -> "Unknown")
    #[arg(long)]
    pub category_column: Option<String>,

    /// Group key column for threshold filtering
    #[arg(long)]
    pub month_column: Option<String>,

    /// Numeric column summed per group
    #[arg(long)]
    pub measure_column: Option<String>,

    /// Minimum per-group total to keep a group (finite, not negative)
    #[arg(long, value_parser = parse_min_total)]
    pub min_total: Option<f64>,

    /// Write the metric summary file (`<output stem>_summary.csv` unless the profile names one)
    #[arg(long, conflicts_with = "no_summary")]
    pub summary: bool,

    /// Do not write the metric summary file
    #[arg(long)]
    pub no_summary: bool,

    /// Allow connecting without PGPASSWORD
    #[arg(long)]
    pub password_optional: bool,

    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

fn parse_min_total(raw: &str) -> Result<f64, String> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("'{raw}' is not a number"))?;
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(format!("'{raw}' must be a finite, non-negative number"))
    }
}

impl Cli {
    /// Applies the options on top of the profile's preset.
    pub fn into_config(self) -> Config {
        let mut config = Config::for_profile(self.profile);

        if let Some(view) = self.view {
            config.view = view;
        }
        if let Some(dir) = self.output_dir {
            config.output_dir = dir;
        }
        if let Some(stem) = self.output_stem {
            config.output_stem = stem;
        }
        if !self.formats.is_empty() {
            config.formats = self.formats;
        }
        if let Some(column) = self.category_column {
            config.clean_column = Some(column);
        }

        if self.month_column.is_some() || self.measure_column.is_some() || self.min_total.is_some()
        {
            let base = config.threshold_filter.take().unwrap_or(ThresholdFilter {
                group_column: MONTH_COLUMN.to_string(),
                measure_column: ORDER_COUNT_COLUMN.to_string(),
                min_total: MIN_ORDERS_PER_MONTH,
            });
            config.threshold_filter = Some(ThresholdFilter {
                group_column: self.month_column.unwrap_or(base.group_column),
                measure_column: self.measure_column.unwrap_or(base.measure_column),
                min_total: self.min_total.unwrap_or(base.min_total),
            });
        }

        if self.summary && config.summary_stem.is_none() {
            config.summary_stem = Some(format!("{}_summary", config.output_stem));
        }
        if self.no_summary {
            config.summary_stem = None;
        }
        if self.password_optional {
            config.password_required = false;
        }

        config.log_level = self.log_level;
        config.log_format = self.log_format;
        config
    }
}
