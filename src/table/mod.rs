//! In-memory tabular data.
//!
//! A [`Table`] is an ordered list of named [`Column`]s, each carrying an
//! explicit [`ColumnType`] and one [`Value`] per row. Every column holds the
//! same number of values.

mod value;

pub use value::{ColumnType, Value};

use crate::error_handling::TableError;

/// A named, typed column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Column name as reported by the source
    pub name: String,
    /// Declared type
    pub ty: ColumnType,
    /// One value per row
    pub values: Vec<Value>,
}

impl Column {
    /// Creates a column from its parts.
    pub fn new(name: impl Into<String>, ty: ColumnType, values: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            ty,
            values,
        }
    }
}

/// Schema-on-read table materialized from a query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    rows: usize,
}

impl Table {
    /// Creates an empty table with the given schema and no rows.
    pub fn with_schema<I, S>(schema: I) -> Self
    where
        I: IntoIterator<Item = (S, ColumnType)>,
        S: Into<String>,
    {
        let columns = schema
            .into_iter()
            .map(|(name, ty)| Column::new(name, ty, Vec::new()))
            .collect();
        Self { columns, rows: 0 }
    }

    /// Builds a table from columns, checking that every column has the same length.
    pub fn from_columns(columns: Vec<Column>) -> Result<Self, TableError> {
        let mut table = Table::default();
        for column in columns {
            table.push_column(column)?;
        }
        Ok(table)
    }

    /// Appends a column.
    ///
    /// # Errors
    ///
    /// Returns `TableError::DuplicateColumn` if the name is taken and
    /// `TableError::LengthMismatch` if the column length differs from the row count.
    pub fn push_column(&mut self, column: Column) -> Result<(), TableError> {
        if self.column_index(&column.name).is_some() {
            return Err(TableError::DuplicateColumn(column.name));
        }
        if self.columns.is_empty() {
            self.rows = column.values.len();
        } else if column.values.len() != self.rows {
            return Err(TableError::LengthMismatch {
                column: column.name,
                expected: self.rows,
                actual: column.values.len(),
            });
        }
        self.columns.push(column);
        Ok(())
    }

    /// Appends one row. The row must have one value per column, in column order.
    pub fn push_row(&mut self, row: Vec<Value>) -> Result<(), TableError> {
        if row.len() != self.columns.len() {
            return Err(TableError::RowWidth {
                expected: self.columns.len(),
                actual: row.len(),
            });
        }
        for (column, value) in self.columns.iter_mut().zip(row) {
            column.values.push(value);
        }
        self.rows += 1;
        Ok(())
    }

    /// Number of rows.
    pub fn num_rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Returns true when the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Columns in order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Column names in order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Position of the column with this exact name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Looks up a column by exact name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Looks up a column by exact name for in-place edits.
    ///
    /// Callers must not change the number of values.
    pub(crate) fn column_mut(&mut self, name: &str) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| c.name == name)
    }

    /// Keeps only the rows for which `keep(row_index)` returns true, preserving
    /// their relative order.
    pub fn retain_rows<F>(&mut self, mut keep: F)
    where
        F: FnMut(usize) -> bool,
    {
        let mask: Vec<bool> = (0..self.rows).map(&mut keep).collect();
        for column in &mut self.columns {
            let mut flags = mask.iter();
            column.values.retain(|_| flags.next().copied().unwrap_or(false));
        }
        self.rows = mask.iter().filter(|k| **k).count();
    }

    /// Iterates rows as slices of cell references.
    pub fn rows(&self) -> impl Iterator<Item = Vec<&Value>> + '_ {
        (0..self.rows).map(move |i| self.columns.iter().map(|c| &c.values[i]).collect())
    }
}
