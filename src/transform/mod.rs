//! Cleaning, filtering and summarizing of extracted tables.
//!
//! Each stage works on an in-memory [`crate::table::Table`]. A stage whose
//! expected columns are absent is skipped and reports a
//! [`SchemaWarning`] instead of failing the run.

mod clean;
mod filter;
mod summary;

use crate::error_handling::SchemaWarning;

pub use clean::{clean_category, CleanStats};
pub use filter::{filter_by_group_threshold, FilterStats, GroupTotal};
pub use summary::{build_summary, detect_roles, Role, RoleColumns, Summary, SummaryMetric};

/// Result of a stage that may be skipped on schema mismatch.
#[derive(Debug, Clone, PartialEq)]
pub enum StageOutcome<T> {
    /// The stage ran and produced these statistics.
    Applied(T),
    /// The stage was skipped; the table is unchanged.
    Skipped(SchemaWarning),
}

impl<T> StageOutcome<T> {
    /// Statistics of an applied stage.
    pub fn applied(&self) -> Option<&T> {
        match self {
            StageOutcome::Applied(stats) => Some(stats),
            StageOutcome::Skipped(_) => None,
        }
    }

    /// Warning of a skipped stage.
    pub fn warning(&self) -> Option<&SchemaWarning> {
        match self {
            StageOutcome::Applied(_) => None,
            StageOutcome::Skipped(w) => Some(w),
        }
    }
}
