//! Excel export functionality.

use std::path::Path;

use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};

use crate::config::{DATE_NUM_FORMAT, DEFAULT_SHEET_NAME, TIMESTAMP_NUM_FORMAT};
use crate::error_handling::ExportError;
use crate::table::{Table, Value};

/// Writes `table` to a single-sheet workbook at `path`, replacing any existing file.
///
/// Row 0 holds the column names; there is no index column. Numbers are
/// written as numeric cells and dates as date cells; NULL cells are left
/// empty. Integers beyond 2^53 are written as text so no digit is lost.
///
/// # Returns
///
/// Returns the number of data rows written.
pub fn export_xlsx(table: &Table, path: &Path) -> Result<usize, ExportError> {
    let to_err = |source: XlsxError| ExportError::Workbook {
        path: path.to_path_buf(),
        source,
    };

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(DEFAULT_SHEET_NAME).map_err(to_err)?;

    let count = write_sheet(worksheet, table).map_err(to_err)?;

    workbook.save(path).map_err(to_err)?;
    Ok(count)
}

fn write_sheet(ws: &mut Worksheet, table: &Table) -> Result<usize, XlsxError> {
    let formats = CellFormats::new();

    for (col, name) in table.column_names().iter().enumerate() {
        ws.write_string(0, col as u16, *name)?;
    }

    let mut record_count = 0;
    for (row_idx, row) in table.rows().enumerate() {
        let r = (row_idx + 1) as u32;
        for (col, value) in row.into_iter().enumerate() {
            write_value(ws, r, col as u16, value, &formats)?;
        }
        record_count += 1;
    }
    Ok(record_count)
}

/// Number formats for date-like cells.
struct CellFormats {
    date: Format,
    timestamp: Format,
}

impl CellFormats {
    fn new() -> Self {
        Self {
            date: Format::new().set_num_format(DATE_NUM_FORMAT),
            timestamp: Format::new().set_num_format(TIMESTAMP_NUM_FORMAT),
        }
    }
}

/// Largest integer magnitude an Excel number (an f64) holds exactly.
const MAX_EXACT_INT: i64 = 1 << 53;

fn write_value(
    ws: &mut Worksheet,
    row: u32,
    col: u16,
    value: &Value,
    formats: &CellFormats,
) -> Result<(), XlsxError> {
    match value {
        Value::Null => { /* Leave cell empty */ }
        Value::Bool(b) => {
            ws.write_boolean(row, col, *b)?;
        }
        Value::Int(i) if i.unsigned_abs() <= MAX_EXACT_INT as u64 => {
            ws.write_number(row, col, *i as f64)?;
        }
        Value::Int(i) => {
            // Keep every digit; a number cell would round it.
            ws.write_string(row, col, i.to_string())?;
        }
        Value::Float(f) if f.is_finite() => {
            ws.write_number(row, col, *f)?;
        }
        Value::Float(f) => {
            ws.write_string(row, col, f.to_string())?;
        }
        Value::Text(s) => {
            ws.write_string(row, col, s)?;
        }
        Value::Date(d) => {
            ws.write_datetime_with_format(row, col, d, &formats.date)?;
        }
        Value::Timestamp(ts) => {
            ws.write_datetime_with_format(row, col, ts, &formats.timestamp)?;
        }
    }
    Ok(())
}
