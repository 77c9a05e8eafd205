// Shared test helpers for building in-memory view extracts.
//
// This module provides tables shaped like the two analytics views so the
// transform and write stages can be tested without a database.

use olist_export::{Column, ColumnType, Table, Value};

/// Rows shaped like `vw_category_monthly_metrics`:
/// (category, year_month, distinct_orders, revenue).
#[allow(dead_code)] // Used by other test files
pub fn category_monthly_table(rows: &[(Option<&str>, &str, i64, f64)]) -> Table {
    Table::from_columns(vec![
        Column::new(
            "product_category_name_english",
            ColumnType::Text,
            rows.iter().map(|r| Value::from(r.0)).collect(),
        ),
        Column::new(
            "year_month",
            ColumnType::Text,
            rows.iter().map(|r| Value::from(r.1)).collect(),
        ),
        Column::new(
            "distinct_orders",
            ColumnType::Integer,
            rows.iter().map(|r| Value::Int(r.2)).collect(),
        ),
        Column::new(
            "revenue",
            ColumnType::Float,
            rows.iter().map(|r| Value::Float(r.3)).collect(),
        ),
    ])
    .expect("Failed to build category table")
}

/// Rows shaped like `vw_customer_ltv`: (customer_unique_id, order_count, ltv).
#[allow(dead_code)] // Used by other test files
pub fn customer_ltv_table(rows: &[(&str, i64, Option<f64>)]) -> Table {
    Table::from_columns(vec![
        Column::new(
            "customer_unique_id",
            ColumnType::Text,
            rows.iter().map(|r| Value::from(r.0)).collect(),
        ),
        Column::new(
            "order_count",
            ColumnType::Integer,
            rows.iter().map(|r| Value::Int(r.1)).collect(),
        ),
        Column::new(
            "ltv",
            ColumnType::Float,
            rows.iter().map(|r| Value::from(r.2)).collect(),
        ),
    ])
    .expect("Failed to build LTV table")
}

/// Reads a CSV file back as (headers, rows of strings).
#[allow(dead_code)] // Used by other test files
pub fn read_csv(path: &std::path::Path) -> (Vec<String>, Vec<Vec<String>>) {
    let mut reader = csv::Reader::from_path(path).expect("Failed to open CSV output");
    let headers = reader
        .headers()
        .expect("Failed to read CSV headers")
        .iter()
        .map(str::to_string)
        .collect();
    let rows = reader
        .records()
        .map(|r| {
            r.expect("Failed to read CSV record")
                .iter()
                .map(str::to_string)
                .collect()
        })
        .collect();
    (headers, rows)
}
