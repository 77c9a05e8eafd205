//! Export functionality.
//!
//! This module writes a materialized [`Table`] to disk in the configured
//! formats (CSV, Excel). Output directories are created on demand and
//! existing files are overwritten.

mod csv;
mod types;
mod xlsx;

use std::path::Path;

use log::debug;

use crate::error_handling::ExportError;
use crate::table::Table;

pub use self::csv::export_csv;
pub use types::OutputFormat;
pub use xlsx::export_xlsx;

/// Creates `dir` and its parents. Succeeds if it already exists.
pub fn ensure_output_dir(dir: &Path) -> Result<(), ExportError> {
    std::fs::create_dir_all(dir).map_err(|source| ExportError::Write {
        path: dir.to_path_buf(),
        source,
    })?;
    debug!("Output directory ready: {}", dir.display());
    Ok(())
}

/// Writes `table` to `path` in `format`.
///
/// # Returns
///
/// Returns the number of data rows written.
pub fn write_table(table: &Table, path: &Path, format: OutputFormat) -> Result<usize, ExportError> {
    match format {
        OutputFormat::Csv => export_csv(table, path),
        OutputFormat::Xlsx => export_xlsx(table, path),
    }
}
