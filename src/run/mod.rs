//! Export run orchestration.
//!
//! A run is a single linear pipeline: connect, query, disconnect, clean,
//! filter, summarize, write. Any fatal error aborts the remaining stages;
//! files already written by a failed run are left in place.

mod process;

use std::path::PathBuf;
use std::time::Instant;

use log::{info, warn};
use sqlx::Connection;

use crate::config::{Config, ConnectionConfig};
use crate::error_handling::{ExportError, SchemaWarning};
use crate::storage::{connect, fetch_view, validate_view_name};

pub use process::export_table;

/// Results of an export run.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// View that was exported
    pub view: String,
    /// Rows written to the main output files
    pub rows: usize,
    /// Columns written to the main output files
    pub columns: usize,
    /// Main output files, in write order
    pub outputs: Vec<PathBuf>,
    /// Summary file, if one was written
    pub summary: Option<PathBuf>,
    /// Schema mismatches that caused a stage to be skipped
    pub warnings: Vec<SchemaWarning>,
    /// Elapsed time in seconds
    pub elapsed_seconds: f64,
}

/// Runs an export with the provided configuration.
///
/// Credentials and the view name are validated before any network I/O. The
/// database connection is closed as soon as the view has been fetched, on
/// success and on failure.
///
/// # Errors
///
/// Returns `ExportError::InvalidSetting` for an unusable filter threshold,
/// `ExportError::Configuration` if credentials are missing,
/// `ExportError::Connection` / `ExportError::Query` / `ExportError::Decode`
/// for database failures, and `ExportError::Write` / `ExportError::Csv` /
/// `ExportError::Workbook` if an output file cannot be written.
///
/// # Example
///
/// ```no_run
/// use olist_export::{run_export, Config, ConnectionConfig, Profile};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = Config::for_profile(Profile::CategoryMonthly);
/// let connection = ConnectionConfig::from_env(config.password_required)?;
/// let report = run_export(&config, &connection).await?;
/// println!("Exported {} rows", report.rows);
/// # Ok(())
/// # }
/// ```
pub async fn run_export(
    config: &Config,
    connection: &ConnectionConfig,
) -> Result<RunReport, ExportError> {
    let start_time = Instant::now();

    config.validate()?;
    connection.validate(config.password_required)?;
    validate_view_name(&config.view)?;

    info!("Extracting view: {}", config.view);

    let mut conn = connect(connection, config.password_required).await?;
    let fetched = fetch_view(&mut conn, &config.view).await;
    if let Err(e) = conn.close().await {
        warn!("Failed to close database connection cleanly: {e}");
    }
    let table = fetched?;

    let mut report = export_table(table, config)?;
    report.elapsed_seconds = start_time.elapsed().as_secs_f64();
    Ok(report)
}
