//! Error type definitions.
//!
//! This module defines the fatal error types of an export run and the
//! non-fatal schema warnings that are logged and skipped.

use std::fmt;
use std::path::PathBuf;

use log::SetLoggerError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)]
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),
}

/// Structural errors when assembling a [`crate::table::Table`].
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TableError {
    /// A column's length differs from the table's row count.
    #[error("column '{column}' has {actual} values, expected {expected}")]
    LengthMismatch {
        /// Offending column
        column: String,
        /// Table row count
        expected: usize,
        /// Column length
        actual: usize,
    },

    /// Two columns share a name.
    #[error("duplicate column '{0}'")]
    DuplicateColumn(String),

    /// A row does not have one value per column.
    #[error("row has {actual} values, expected {expected}")]
    RowWidth {
        /// Number of columns
        expected: usize,
        /// Number of values supplied
        actual: usize,
    },
}

/// Fatal errors of an export run.
///
/// Any of these aborts the remaining stages. The message of the underlying
/// driver or I/O error is kept as the error source.
#[derive(Error, Debug)]
pub enum ExportError {
    /// Required connection settings are missing. Raised before any network I/O.
    #[error(
        "Missing required env vars: {}. Set them in your shell or create a .env file.",
        .missing.join(", ")
    )]
    Configuration {
        /// Names of every missing variable
        missing: Vec<String>,
    },

    /// A connection setting has an invalid value.
    #[error("Invalid value for {name}: '{value}'")]
    InvalidSetting {
        /// Variable name
        name: String,
        /// Raw value
        value: String,
    },

    /// The database could not be reached or rejected the credentials.
    #[error("Failed to connect to PostgreSQL at {host}:{port}/{database}")]
    Connection {
        /// Host
        host: String,
        /// Port
        port: u16,
        /// Database name
        database: String,
        /// Driver error
        #[source]
        source: sqlx::Error,
    },

    /// The view query failed (missing view, permission denied, ...).
    #[error("Query against view '{view}' failed")]
    Query {
        /// View name
        view: String,
        /// Driver error
        #[source]
        source: sqlx::Error,
    },

    /// A cell could not be decoded into its declared type.
    #[error("Failed to decode column '{column}' (type {type_name})")]
    Decode {
        /// Column name
        column: String,
        /// Database type name
        type_name: String,
        /// Driver error
        #[source]
        source: sqlx::Error,
    },

    /// The view name is not a plain SQL identifier.
    #[error("Invalid view name '{0}': expected [schema.]identifier")]
    InvalidViewName(String),

    /// Table assembly failed.
    #[error(transparent)]
    Table(#[from] TableError),

    /// The output directory or file could not be created.
    #[error("Failed to write {}", .path.display())]
    Write {
        /// Destination
        path: PathBuf,
        /// I/O error
        #[source]
        source: std::io::Error,
    },

    /// CSV serialization failed.
    #[error("Failed to write CSV file {}", .path.display())]
    Csv {
        /// Destination
        path: PathBuf,
        /// CSV error
        #[source]
        source: csv::Error,
    },

    /// Workbook serialization failed.
    #[error("Failed to write Excel file {}", .path.display())]
    Workbook {
        /// Destination
        path: PathBuf,
        /// Writer error
        #[source]
        source: rust_xlsxwriter::XlsxError,
    },
}

/// Non-fatal schema mismatches.
///
/// Different versions of a view may omit columns; the affected stage is
/// skipped and the run continues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaWarning {
    /// The column to clean is absent.
    MissingCleanColumn {
        /// Expected column
        column: String,
    },
    /// The group key or measure column for filtering is absent.
    MissingFilterColumns {
        /// Expected group key column
        group: String,
        /// Expected measure column
        measure: String,
    },
    /// The measure column exists but is not numeric.
    NonNumericMeasure {
        /// Measure column
        column: String,
    },
}

impl fmt::Display for SchemaWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaWarning::MissingCleanColumn { column } => write!(
                f,
                "column '{}' not found. Skipping category cleaning.",
                column
            ),
            SchemaWarning::MissingFilterColumns { group, measure } => write!(
                f,
                "could not find both group column '{}' and measure column '{}'. Skipping threshold filtering.",
                group, measure
            ),
            SchemaWarning::NonNumericMeasure { column } => write!(
                f,
                "measure column '{}' is not numeric. Skipping threshold filtering.",
                column
            ),
        }
    }
}
