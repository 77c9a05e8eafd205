//! Transform and write stages of a run.
//!
//! This half of the pipeline needs no database, so it can be driven with an
//! in-memory table.

use std::time::Instant;

use log::{info, warn};

use crate::config::Config;
use crate::error_handling::ExportError;
use crate::export::{ensure_output_dir, write_table, OutputFormat};
use crate::table::Table;
use crate::transform::{build_summary, clean_category, filter_by_group_threshold};

use super::RunReport;

/// Cleans, filters, summarizes and writes an extracted table per `config`.
///
/// Skipped stages are recorded in [`RunReport::warnings`]. Each configured
/// format is written once even if listed twice.
///
/// # Errors
///
/// Returns `ExportError::InvalidSetting` before touching the table if the
/// configuration is unusable, otherwise the first write failure; earlier
/// files stay on disk.
pub fn export_table(mut table: Table, config: &Config) -> Result<RunReport, ExportError> {
    let start_time = Instant::now();
    config.validate()?;
    let mut warnings = Vec::new();

    if let Some(column) = &config.clean_column {
        if let Some(w) = clean_category(&mut table, column).warning() {
            warnings.push(w.clone());
        }
    }

    if let Some(filter) = &config.threshold_filter {
        let outcome = filter_by_group_threshold(
            &mut table,
            &filter.group_column,
            &filter.measure_column,
            filter.min_total,
        );
        if let Some(w) = outcome.warning() {
            warnings.push(w.clone());
        }
    }

    ensure_output_dir(&config.output_dir)?;

    let mut formats: Vec<OutputFormat> = Vec::new();
    for format in &config.formats {
        if !formats.contains(format) {
            formats.push(*format);
        }
    }
    if formats.is_empty() {
        warn!("No output formats configured; nothing will be written for the table.");
    }

    let mut outputs = Vec::with_capacity(formats.len());
    for format in formats {
        let path = config.output_path(format);
        write_table(&table, &path, format)?;
        info!("{} exported to: {}", format.label(), path.display());
        outputs.push(path);
    }

    let summary = match config.summary_path() {
        Some(path) => {
            let summary = build_summary(&table);
            write_table(&summary.to_table()?, &path, OutputFormat::Csv)?;
            info!("Summary exported to: {}", path.display());
            Some(path)
        }
        None => None,
    };

    Ok(RunReport {
        view: config.view.clone(),
        rows: table.num_rows(),
        columns: table.num_columns(),
        outputs,
        summary,
        warnings,
        elapsed_seconds: start_time.elapsed().as_secs_f64(),
    })
}
