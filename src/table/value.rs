//! Cell values and declared column types.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};

/// Declared type of a column.
///
/// Column types come from the database's reported column metadata and are
/// never inferred from the values themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    /// `true` / `false`
    Boolean,
    /// 64-bit signed integers
    Integer,
    /// Double precision floats (also used for NUMERIC)
    Float,
    /// UTF-8 text
    Text,
    /// Calendar date
    Date,
    /// Date and time without zone (zoned values are normalized to UTC)
    Timestamp,
}

impl ColumnType {
    /// Returns true for columns that can be summed and averaged.
    pub fn is_numeric(self) -> bool {
        matches!(self, ColumnType::Integer | ColumnType::Float)
    }
}

/// A single cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// SQL NULL
    Null,
    /// Boolean cell
    Bool(bool),
    /// Integer cell
    Int(i64),
    /// Float cell
    Float(f64),
    /// Text cell
    Text(String),
    /// Date cell
    Date(NaiveDate),
    /// Timestamp cell
    Timestamp(NaiveDateTime),
}

impl Value {
    /// Returns true for SQL NULL.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the cell as a float if it holds a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Builds a float cell, mapping NaN to NULL.
    pub fn from_f64(v: f64) -> Self {
        if v.is_nan() {
            Value::Null
        } else {
            Value::Float(v)
        }
    }
}

/// Renders the cell the way it is written to CSV. NULL renders as an empty string.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(v) => write!(f, "{}", v),
            Value::Text(s) => f.write_str(s),
            Value::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Value::Timestamp(ts) => write!(f, "{}", ts.format("%Y-%m-%d %H:%M:%S%.f")),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}
