//! View extraction.
//!
//! Runs `SELECT * FROM <view>;` once and materializes the full result set as
//! a [`Table`]. Column types are declared from the server's statement
//! metadata, so an empty result still carries its schema.

use bigdecimal::{BigDecimal, ToPrimitive};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use log::{debug, info};
use sqlx::postgres::types::PgInterval;
use sqlx::postgres::{PgConnection, PgRow, PgValueFormat, PgValueRef};
use sqlx::types::{JsonValue, Uuid};
use sqlx::{Column as _, Executor, Row, Statement, TypeInfo, ValueRef};

use crate::error_handling::ExportError;
use crate::table::{ColumnType, Table, Value};

/// Wire-level PostgreSQL type of a result column, used to pick a decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PgKind {
    Bool,
    Int2,
    Int4,
    Int8,
    Float4,
    Float8,
    Numeric,
    Date,
    Time,
    Timestamp,
    TimestampTz,
    Interval,
    Uuid,
    Json,
    TextArray,
    Int4Array,
    Int8Array,
    Float8Array,
    Text,
}

impl PgKind {
    /// Maps a server type name (`INT4`, `NUMERIC`, ...). Unknown types are read as text.
    pub(crate) fn from_type_name(name: &str) -> Self {
        match name.to_ascii_uppercase().as_str() {
            "BOOL" | "BOOLEAN" => PgKind::Bool,
            "INT2" | "SMALLINT" => PgKind::Int2,
            "INT4" | "INT" | "INTEGER" => PgKind::Int4,
            "INT8" | "BIGINT" => PgKind::Int8,
            "FLOAT4" | "REAL" => PgKind::Float4,
            "FLOAT8" | "DOUBLE PRECISION" => PgKind::Float8,
            "NUMERIC" | "DECIMAL" => PgKind::Numeric,
            "DATE" => PgKind::Date,
            "TIME" => PgKind::Time,
            "TIMESTAMP" => PgKind::Timestamp,
            "TIMESTAMPTZ" => PgKind::TimestampTz,
            "INTERVAL" => PgKind::Interval,
            "UUID" => PgKind::Uuid,
            "JSON" | "JSONB" => PgKind::Json,
            "TEXT[]" | "VARCHAR[]" | "BPCHAR[]" | "NAME[]" => PgKind::TextArray,
            "INT4[]" => PgKind::Int4Array,
            "INT8[]" => PgKind::Int8Array,
            "FLOAT8[]" => PgKind::Float8Array,
            _ => PgKind::Text,
        }
    }

    /// Declared table type for this wire type.
    pub(crate) fn column_type(self) -> ColumnType {
        match self {
            PgKind::Bool => ColumnType::Boolean,
            PgKind::Int2 | PgKind::Int4 | PgKind::Int8 => ColumnType::Integer,
            PgKind::Float4 | PgKind::Float8 | PgKind::Numeric => ColumnType::Float,
            PgKind::Date => ColumnType::Date,
            PgKind::Timestamp | PgKind::TimestampTz => ColumnType::Timestamp,
            PgKind::Time
            | PgKind::Interval
            | PgKind::Uuid
            | PgKind::Json
            | PgKind::TextArray
            | PgKind::Int4Array
            | PgKind::Int8Array
            | PgKind::Float8Array
            | PgKind::Text => ColumnType::Text,
        }
    }
}

/// Checks that `view` is a plain `[schema.]identifier` before it is interpolated.
pub fn validate_view_name(view: &str) -> Result<(), ExportError> {
    let parts: Vec<&str> = view.split('.').collect();
    let valid = (1..=2).contains(&parts.len()) && parts.iter().all(|p| is_identifier(p));
    if valid {
        Ok(())
    } else {
        Err(ExportError::InvalidViewName(view.to_string()))
    }
}

fn is_identifier(part: &str) -> bool {
    let mut chars = part.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// The query executed for `view`.
pub fn select_all_sql(view: &str) -> String {
    format!("SELECT * FROM {};", view)
}

/// Fetches every row of `view` into memory.
///
/// # Errors
///
/// Returns `ExportError::InvalidViewName` before touching the connection if
/// the name is not an identifier, `ExportError::Query` if the server rejects
/// the query (e.g. the view does not exist), and `ExportError::Decode` if a
/// cell cannot be read as its column's type.
pub async fn fetch_view(conn: &mut PgConnection, view: &str) -> Result<Table, ExportError> {
    validate_view_name(view)?;
    let sql = select_all_sql(view);
    info!("Running query: {}", sql);

    let query_err = |source: sqlx::Error| ExportError::Query {
        view: view.to_string(),
        source,
    };

    let statement = (&mut *conn).prepare(sql.as_str()).await.map_err(query_err)?;

    let schema: Vec<(String, String, PgKind)> = statement
        .columns()
        .iter()
        .map(|c| {
            let type_name = c.type_info().name().to_string();
            let kind = PgKind::from_type_name(&type_name);
            (c.name().to_string(), type_name, kind)
        })
        .collect();
    for (name, type_name, kind) in &schema {
        debug!("Column {} ({}) -> {:?}", name, type_name, kind.column_type());
    }

    let rows = statement
        .query()
        .fetch_all(&mut *conn)
        .await
        .map_err(query_err)?;

    let mut table = Table::with_schema(
        schema
            .iter()
            .map(|(name, _, kind)| (name.clone(), kind.column_type())),
    );

    for row in &rows {
        let mut cells = Vec::with_capacity(schema.len());
        for (idx, (name, type_name, kind)) in schema.iter().enumerate() {
            let cell = decode_cell(row, idx, *kind).map_err(|source| ExportError::Decode {
                column: name.clone(),
                type_name: type_name.clone(),
                source,
            })?;
            cells.push(cell);
        }
        table.push_row(cells)?;
    }

    info!(
        "Fetched {} rows, {} columns from {}.",
        table.num_rows(),
        table.num_columns(),
        view
    );
    info!("Columns: {:?}", table.column_names());

    Ok(table)
}

fn decode_cell(row: &PgRow, idx: usize, kind: PgKind) -> Result<Value, sqlx::Error> {
    let value = match kind {
        PgKind::Bool => row
            .try_get::<Option<bool>, _>(idx)?
            .map_or(Value::Null, Value::Bool),
        PgKind::Int2 => row
            .try_get::<Option<i16>, _>(idx)?
            .map_or(Value::Null, |v| Value::Int(i64::from(v))),
        PgKind::Int4 => row
            .try_get::<Option<i32>, _>(idx)?
            .map_or(Value::Null, |v| Value::Int(i64::from(v))),
        PgKind::Int8 => row
            .try_get::<Option<i64>, _>(idx)?
            .map_or(Value::Null, Value::Int),
        PgKind::Float4 => row
            .try_get::<Option<f32>, _>(idx)?
            .map_or(Value::Null, |v| Value::Float(f64::from(v))),
        PgKind::Float8 => row
            .try_get::<Option<f64>, _>(idx)?
            .map_or(Value::Null, Value::Float),
        PgKind::Numeric => {
            // BigDecimal has no NaN; NUMERIC 'NaN' becomes NULL.
            if is_numeric_nan(&row.try_get_raw(idx)?) {
                Value::Null
            } else {
                row.try_get::<Option<BigDecimal>, _>(idx)?
                    .and_then(|d| d.to_f64())
                    .map_or(Value::Null, Value::Float)
            }
        }
        PgKind::Date => row
            .try_get::<Option<NaiveDate>, _>(idx)?
            .map_or(Value::Null, Value::Date),
        PgKind::Time => row
            .try_get::<Option<NaiveTime>, _>(idx)?
            .map_or(Value::Null, |t| {
                Value::Text(t.format("%H:%M:%S%.f").to_string())
            }),
        PgKind::Timestamp => row
            .try_get::<Option<NaiveDateTime>, _>(idx)?
            .map_or(Value::Null, Value::Timestamp),
        PgKind::TimestampTz => row
            .try_get::<Option<DateTime<Utc>>, _>(idx)?
            .map_or(Value::Null, |dt| Value::Timestamp(dt.naive_utc())),
        PgKind::Interval => row
            .try_get::<Option<PgInterval>, _>(idx)?
            .map_or(Value::Null, |iv| Value::Text(format_interval(&iv))),
        PgKind::Uuid => row
            .try_get::<Option<Uuid>, _>(idx)?
            .map_or(Value::Null, |u| Value::Text(u.to_string())),
        PgKind::Json => row
            .try_get::<Option<JsonValue>, _>(idx)?
            .map_or(Value::Null, |j| Value::Text(j.to_string())),
        PgKind::TextArray => row
            .try_get::<Option<Vec<Option<String>>>, _>(idx)?
            .map_or(Value::Null, |items| Value::Text(format_text_array(&items))),
        PgKind::Int4Array => row
            .try_get::<Option<Vec<Option<i32>>>, _>(idx)?
            .map_or(Value::Null, |items| Value::Text(format_array(&items))),
        PgKind::Int8Array => row
            .try_get::<Option<Vec<Option<i64>>>, _>(idx)?
            .map_or(Value::Null, |items| Value::Text(format_array(&items))),
        PgKind::Float8Array => row
            .try_get::<Option<Vec<Option<f64>>>, _>(idx)?
            .map_or(Value::Null, |items| Value::Text(format_array(&items))),
        PgKind::Text => {
            // Read the bytes directly so text-like types the driver does not
            // list as compatible (enums, citext, xml) still decode.
            let raw = row.try_get_raw(idx)?;
            if raw.is_null() {
                Value::Null
            } else {
                Value::Text(raw.as_str().map_err(sqlx::Error::Decode)?.to_string())
            }
        }
    };
    Ok(value)
}

fn is_numeric_nan(raw: &PgValueRef<'_>) -> bool {
    if raw.is_null() {
        return false;
    }
    match raw.format() {
        PgValueFormat::Binary => raw.as_bytes().is_ok_and(numeric_bytes_are_nan),
        PgValueFormat::Text => raw.as_str().is_ok_and(|s| s.eq_ignore_ascii_case("nan")),
    }
}

/// Binary NUMERIC header: ndigits, weight, sign, dscale (2 bytes each).
fn numeric_bytes_are_nan(bytes: &[u8]) -> bool {
    const SIGN_NAN: [u8; 2] = [0xC0, 0x00];
    bytes.get(4..6) == Some(&SIGN_NAN[..])
}

/// Renders an interval in PostgreSQL's default output style,
/// e.g. `1 year 2 mons 3 days 04:05:06`.
fn format_interval(interval: &PgInterval) -> String {
    let mut parts = Vec::new();
    let years = interval.months / 12;
    let months = interval.months % 12;
    let plural = |n: i32, unit: &str, units: &str| {
        format!("{} {}", n, if n.abs() == 1 { unit } else { units })
    };
    if years != 0 {
        parts.push(plural(years, "year", "years"));
    }
    if months != 0 {
        parts.push(plural(months, "mon", "mons"));
    }
    if interval.days != 0 {
        parts.push(plural(interval.days, "day", "days"));
    }

    let micros = interval.microseconds;
    if micros != 0 || parts.is_empty() {
        let sign = if micros < 0 { "-" } else { "" };
        let total = micros.unsigned_abs();
        let secs = total / 1_000_000;
        let frac = total % 1_000_000;
        let mut clock = format!(
            "{}{:02}:{:02}:{:02}",
            sign,
            secs / 3600,
            (secs / 60) % 60,
            secs % 60
        );
        if frac != 0 {
            let digits = format!("{:06}", frac);
            clock.push('.');
            clock.push_str(digits.trim_end_matches('0'));
        }
        parts.push(clock);
    }
    parts.join(" ")
}

/// Renders an array as a PostgreSQL array literal, e.g. `{1,NULL,3}`.
fn format_array<T: std::fmt::Display>(items: &[Option<T>]) -> String {
    let inner: Vec<String> = items
        .iter()
        .map(|item| match item {
            Some(v) => v.to_string(),
            None => "NULL".to_string(),
        })
        .collect();
    format!("{{{}}}", inner.join(","))
}

/// Like [`format_array`], quoting elements that would otherwise be ambiguous.
fn format_text_array(items: &[Option<String>]) -> String {
    let inner: Vec<String> = items
        .iter()
        .map(|item| match item {
            None => "NULL".to_string(),
            Some(s) if needs_quotes(s) => {
                format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
            }
            Some(s) => s.clone(),
        })
        .collect();
    format!("{{{}}}", inner.join(","))
}

fn needs_quotes(s: &str) -> bool {
    s.is_empty()
        || s.eq_ignore_ascii_case("null")
        || s.chars()
            .any(|c| c.is_whitespace() || matches!(c, ',' | '{' | '}' | '"' | '\\'))
}
