//! Metric summary for customer-level views.
//!
//! Semantic roles (customer identifier, order count, revenue) are matched to
//! columns through a fixed, ordered list of candidate names per role. Names
//! are compared case-insensitively and the first candidate present wins.

use std::collections::HashSet;

use strum::IntoEnumIterator;
use strum_macros::EnumIter;

use crate::error_handling::TableError;
use crate::table::{Column, ColumnType, Table, Value};

/// Semantic role of a column in a customer-level view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Role {
    /// Customer identifier
    Customer,
    /// Number of orders per customer
    Orders,
    /// Revenue per customer (LTV, GMV, ...)
    Revenue,
}

impl Role {
    /// Candidate column names in priority order.
    pub fn candidates(self) -> &'static [&'static str] {
        match self {
            Role::Customer => &["customer_id", "customer_unique_id"],
            Role::Orders => &["order_count", "orders", "distinct_orders", "n_orders"],
            Role::Revenue => &["ltv", "lifetime_value", "total_revenue", "revenue", "gmv"],
        }
    }
}

/// Column matched to each role, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleColumns {
    /// Customer identifier column
    pub customer: Option<String>,
    /// Order count column
    pub orders: Option<String>,
    /// Revenue column
    pub revenue: Option<String>,
}

impl RoleColumns {
    /// Column matched to `role`.
    pub fn get(&self, role: Role) -> Option<&str> {
        match role {
            Role::Customer => self.customer.as_deref(),
            Role::Orders => self.orders.as_deref(),
            Role::Revenue => self.revenue.as_deref(),
        }
    }

    fn set(&mut self, role: Role, column: String) {
        match role {
            Role::Customer => self.customer = Some(column),
            Role::Orders => self.orders = Some(column),
            Role::Revenue => self.revenue = Some(column),
        }
    }
}

/// One summary line.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryMetric {
    /// Metric name, e.g. `total_revenue`
    pub name: &'static str,
    /// Value; NaN when there was nothing to average
    pub value: f64,
}

/// Ordered metric lines produced by [`build_summary`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summary {
    /// Metrics in output order
    pub metrics: Vec<SummaryMetric>,
}

impl Summary {
    /// Looks up a metric by name.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.metrics.iter().find(|m| m.name == name).map(|m| m.value)
    }

    /// Metric names in order.
    pub fn names(&self) -> Vec<&'static str> {
        self.metrics.iter().map(|m| m.name).collect()
    }

    /// Two-column table (`metric`, `value`) for writing. NaN values become NULL.
    pub fn to_table(&self) -> Result<Table, TableError> {
        Table::from_columns(vec![
            Column::new(
                "metric",
                ColumnType::Text,
                self.metrics.iter().map(|m| Value::from(m.name)).collect(),
            ),
            Column::new(
                "value",
                ColumnType::Float,
                self.metrics.iter().map(|m| Value::from_f64(m.value)).collect(),
            ),
        ])
    }

    fn push(&mut self, name: &'static str, value: f64) {
        self.metrics.push(SummaryMetric { name, value });
    }
}

/// Matches every [`Role`] against the table's column names.
pub fn detect_roles(table: &Table) -> RoleColumns {
    let mut roles = RoleColumns::default();
    for role in Role::iter() {
        if let Some(name) = find_any(table, role.candidates()) {
            roles.set(role, name.to_string());
        }
    }
    roles
}

fn find_any<'a>(table: &'a Table, candidates: &[&str]) -> Option<&'a str> {
    candidates.iter().find_map(|candidate| {
        table
            .columns()
            .iter()
            .find(|c| c.name.to_lowercase() == *candidate)
            .map(|c| c.name.as_str())
    })
}

/// Builds the metric summary of a customer-level table.
///
/// Always reports `rows`. Adds `distinct_customers` when a customer column is
/// found, `total_orders` / `avg_orders_per_customer` when a numeric order
/// column is found, and `total_revenue` / `avg_revenue_per_customer` /
/// `median_revenue_per_customer` when a numeric revenue column is found.
/// NULL values are ignored by every aggregate.
pub fn build_summary(table: &Table) -> Summary {
    let roles = detect_roles(table);
    let mut summary = Summary::default();

    summary.push("rows", table.num_rows() as f64);

    if let Some(col) = roles.customer.as_deref().and_then(|n| table.column(n)) {
        summary.push("distinct_customers", distinct_non_null(col) as f64);
    }

    if let Some(values) = numeric_values(table, roles.orders.as_deref()) {
        summary.push("total_orders", values.iter().sum());
        summary.push("avg_orders_per_customer", mean(&values));
    }

    if let Some(values) = numeric_values(table, roles.revenue.as_deref()) {
        summary.push("total_revenue", values.iter().sum());
        summary.push("avg_revenue_per_customer", mean(&values));
        summary.push("median_revenue_per_customer", median(values));
    }

    summary
}

fn distinct_non_null(column: &Column) -> usize {
    column
        .values
        .iter()
        .filter(|v| !v.is_null())
        .map(|v| v.to_string())
        .collect::<HashSet<_>>()
        .len()
}

/// Non-null values of a numeric column, or None if the column is absent or not numeric.
fn numeric_values(table: &Table, name: Option<&str>) -> Option<Vec<f64>> {
    let column = table.column(name?)?;
    if !column.ty.is_numeric() {
        return None;
    }
    Some(
        column
            .values
            .iter()
            .filter_map(Value::as_f64)
            .filter(|v| !v.is_nan())
            .collect(),
    )
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn median(mut values: Vec<f64>) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    }
}
