//! Group-level threshold filtering.

use std::collections::HashMap;

use log::{debug, info, warn};

use crate::error_handling::SchemaWarning;
use crate::table::{Table, Value};

use super::StageOutcome;

/// Summed measure of one group.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupTotal {
    /// Group key as rendered in the output
    pub key: String,
    /// Sum of the measure over the group's rows
    pub total: f64,
    /// Whether the group met the threshold
    pub kept: bool,
}

/// Counts reported by [`filter_by_group_threshold`].
#[derive(Debug, Clone, PartialEq)]
pub struct FilterStats {
    /// Per-group totals in order of first appearance
    pub groups: Vec<GroupTotal>,
    /// Rows before filtering
    pub rows_before: usize,
    /// Rows after filtering
    pub rows_after: usize,
}

impl FilterStats {
    /// Number of groups that met the threshold.
    pub fn groups_kept(&self) -> usize {
        self.groups.iter().filter(|g| g.kept).count()
    }
}

/// Keeps only the rows whose group's summed `measure` is at least `min_total`.
///
/// Groups are formed by equal values of `group`. NULL measures count as 0.
/// Rows with a NULL group key belong to no group and are dropped. Retained
/// rows keep their original relative order. If every group falls below the
/// threshold the table ends up with no rows.
///
/// If either column is absent, or `measure` is not numeric, the table is left
/// untouched and the outcome carries the corresponding [`SchemaWarning`].
pub fn filter_by_group_threshold(
    table: &mut Table,
    group: &str,
    measure: &str,
    min_total: f64,
) -> StageOutcome<FilterStats> {
    let (Some(group_col), Some(measure_col)) = (table.column(group), table.column(measure))
    else {
        let warning = SchemaWarning::MissingFilterColumns {
            group: group.to_string(),
            measure: measure.to_string(),
        };
        warn!("{}", warning);
        return StageOutcome::Skipped(warning);
    };

    if !measure_col.ty.is_numeric() {
        let warning = SchemaWarning::NonNumericMeasure {
            column: measure.to_string(),
        };
        warn!("{}", warning);
        return StageOutcome::Skipped(warning);
    }

    info!(
        "Filtering out groups of '{}' with total {} < {}",
        group, measure, min_total
    );

    // Group index per row; None for NULL keys.
    let mut index_of: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<GroupTotal> = Vec::new();
    let mut row_group: Vec<Option<usize>> = Vec::with_capacity(table.num_rows());

    for (key, amount) in group_col.values.iter().zip(&measure_col.values) {
        if key.is_null() {
            row_group.push(None);
            continue;
        }
        let idx = *index_of.entry(group_key(key)).or_insert_with(|| {
            groups.push(GroupTotal {
                key: key.to_string(),
                total: 0.0,
                kept: false,
            });
            groups.len() - 1
        });
        if let Some(v) = amount.as_f64().filter(|v| !v.is_nan()) {
            groups[idx].total += v;
        }
        row_group.push(Some(idx));
    }

    for g in &mut groups {
        g.kept = g.total >= min_total;
        debug!("   {} -> {}", g.key, g.total);
    }

    let rows_before = table.num_rows();
    table.retain_rows(|i| row_group[i].is_some_and(|g| groups[g].kept));
    let rows_after = table.num_rows();

    let stats = FilterStats {
        groups,
        rows_before,
        rows_after,
    };
    info!(
        "Keeping {} of {} group(s) with {} >= {}",
        stats.groups_kept(),
        stats.groups.len(),
        measure,
        min_total
    );
    info!("Rows before filtering: {}", rows_before);
    info!("Rows after filtering:  {}", rows_after);

    StageOutcome::Applied(stats)
}

/// Identity of a group key. Includes the variant so that e.g. `1` and `"1"`
/// never collide.
fn group_key(value: &Value) -> String {
    format!("{:?}", value)
}
