//! Error handling.
//!
//! This module provides:
//! - Fatal error types for each pipeline stage
//! - Non-fatal schema warnings
//!
//! Errors are categorized into:
//! - **Configuration**: missing credentials, reported before any I/O
//! - **Connection / Query / Decode**: database failures, never retried
//! - **Write / Csv / Workbook**: destination failures
//! - **Warnings**: expected columns absent; the stage is skipped

mod types;

// Re-export public API
pub use types::{ExportError, InitializationError, SchemaWarning, TableError};
