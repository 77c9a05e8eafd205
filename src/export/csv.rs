//! CSV export functionality.
//!
//! Writes a [`Table`] as UTF-8, comma-delimited CSV with a header row and no
//! index column. NULL cells are written as empty fields.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::Writer;

use crate::error_handling::ExportError;
use crate::table::Table;

/// Writes `table` to `path`, replacing any existing file.
///
/// # Returns
///
/// Returns the number of data rows written.
///
/// # Errors
///
/// Returns `ExportError::Write` if the file cannot be created and
/// `ExportError::Csv` if serialization fails.
pub fn export_csv(table: &Table, path: &Path) -> Result<usize, ExportError> {
    let file = File::create(path).map_err(|source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    let count = write_csv(table, file).map_err(|source| ExportError::Csv {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(count)
}

/// Serializes `table` into any writer.
pub(crate) fn write_csv<W: Write>(table: &Table, out: W) -> Result<usize, csv::Error> {
    let mut writer = Writer::from_writer(out);

    writer.write_record(table.column_names())?;

    let mut record_count = 0;
    for row in table.rows() {
        writer.write_record(row.iter().map(|v| v.to_string()))?;
        record_count += 1;
    }

    writer.flush()?;
    Ok(record_count)
}
