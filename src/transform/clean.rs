//! Category column cleaning.

use log::{info, warn};

use crate::config::UNKNOWN_PLACEHOLDER;
use crate::error_handling::SchemaWarning;
use crate::table::{ColumnType, Table, Value};

use super::StageOutcome;

/// Counts reported by [`clean_category`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CleanStats {
    /// Null, empty or whitespace-only values found
    pub empty_before: usize,
    /// Empty values left afterwards (always 0)
    pub empty_after: usize,
}

/// Replaces null, empty and whitespace-only values in `column` with `"Unknown"`.
///
/// Other values are trimmed and stored as text; the column's declared type
/// becomes [`ColumnType::Text`]. Applying the rule twice gives the same table
/// as applying it once.
///
/// If `column` is absent the table is left untouched and the outcome carries
/// `SchemaWarning::MissingCleanColumn`.
pub fn clean_category(table: &mut Table, column: &str) -> StageOutcome<CleanStats> {
    let Some(target) = table.column_mut(column) else {
        let warning = SchemaWarning::MissingCleanColumn {
            column: column.to_string(),
        };
        warn!("{}", warning);
        return StageOutcome::Skipped(warning);
    };

    info!("Cleaning category column: {}", column);

    let mut empty_before = 0;
    for value in target.values.iter_mut() {
        let text = match &*value {
            Value::Null => String::new(),
            Value::Text(s) => s.trim().to_string(),
            other => other.to_string().trim().to_string(),
        };
        *value = if text.is_empty() {
            empty_before += 1;
            Value::Text(UNKNOWN_PLACEHOLDER.to_string())
        } else {
            Value::Text(text)
        };
    }
    target.ty = ColumnType::Text;

    let empty_after = target
        .values
        .iter()
        .filter(|v| matches!(v, Value::Text(s) if s.is_empty()))
        .count();

    info!("Empty values before cleaning: {}", empty_before);
    info!("Empty values after cleaning:  {}", empty_after);

    StageOutcome::Applied(CleanStats {
        empty_before,
        empty_after,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Column;

    fn category_table(values: Vec<Value>) -> Table {
        let n = values.len();
        Table::from_columns(vec![
            Column::new("product_category_name_english", ColumnType::Text, values),
            Column::new(
                "distinct_orders",
                ColumnType::Integer,
                (0..n as i64).map(Value::Int).collect(),
            ),
        ])
        .expect("valid table")
    }

    fn categories(table: &Table) -> Vec<String> {
        table
            .column("product_category_name_english")
            .expect("column exists")
            .values
            .iter()
            .map(|v| v.to_string())
            .collect()
    }

    #[test]
    fn test_blank_and_null_become_unknown() {
        let mut table = category_table(vec!["".into(), Value::Null, "electronics".into()]);
        let outcome = clean_category(&mut table, "product_category_name_english");

        assert_eq!(categories(&table), vec!["Unknown", "Unknown", "electronics"]);
        assert_eq!(
            outcome,
            StageOutcome::Applied(CleanStats {
                empty_before: 2,
                empty_after: 0
            })
        );
    }

    #[test]
    fn test_whitespace_only_and_trimming() {
        let mut table = category_table(vec!["   ".into(), "  toys ".into()]);
        clean_category(&mut table, "product_category_name_english");
        assert_eq!(categories(&table), vec!["Unknown", "toys"]);
    }

    #[test]
    fn test_cleaning_is_idempotent() {
        let mut once = category_table(vec![" ".into(), Value::Null, " garden ".into()]);
        clean_category(&mut once, "product_category_name_english");

        let mut twice = once.clone();
        let outcome = clean_category(&mut twice, "product_category_name_english");

        assert_eq!(once, twice);
        assert_eq!(outcome.applied().map(|s| s.empty_before), Some(0));
    }

    #[test]
    fn test_missing_column_is_a_warning() {
        let mut table = category_table(vec!["toys".into()]);
        let before = table.clone();
        let outcome = clean_category(&mut table, "category");

        assert_eq!(table, before);
        assert_eq!(
            outcome.warning(),
            Some(&SchemaWarning::MissingCleanColumn {
                column: "category".to_string()
            })
        );
    }

    #[test]
    fn test_non_text_column_rendered_as_text() {
        let mut table = Table::from_columns(vec![Column::new(
            "code",
            ColumnType::Integer,
            vec![Value::Int(7), Value::Null],
        )])
        .expect("valid table");
        clean_category(&mut table, "code");

        let column = table.column("code").expect("column exists");
        assert_eq!(column.ty, ColumnType::Text);
        assert_eq!(column.values, vec![Value::from("7"), Value::from("Unknown")]);
    }

    #[test]
    fn test_mixed_value_kinds_rewritten_in_place() {
        let day = chrono::NaiveDate::from_ymd_opt(2021, 3, 1).expect("valid date");
        let mut table = Table::from_columns(vec![Column::new(
            "segment",
            ColumnType::Float,
            vec![
                Value::Float(2.5),
                Value::Bool(true),
                Value::Date(day),
                Value::Text(" ".into()),
            ],
        )])
        .expect("valid table");

        let outcome = clean_category(&mut table, "segment");

        assert_eq!(
            table.column("segment").expect("column exists").values,
            vec![
                Value::from("2.5"),
                Value::from("true"),
                Value::from("2021-03-01"),
                Value::from("Unknown"),
            ]
        );
        assert_eq!(outcome.applied().map(|s| s.empty_before), Some(1));
    }
}
