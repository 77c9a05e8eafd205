//! olist_export library: analytical view export
//!
//! This library connects to a PostgreSQL analytics database, pulls a
//! precomputed view (customer lifetime value, category-level monthly
//! metrics), applies light cleaning and threshold filtering, and writes the
//! result to CSV and/or Excel files.
//!
//! # Example
//!
//! ```no_run
//! use olist_export::{run_export, Config, ConnectionConfig, Profile};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::for_profile(Profile::CustomerLtv);
//! let connection = ConnectionConfig::from_env(config.password_required)?;
//!
//! let report = run_export(&config, &connection).await?;
//! println!("Pulled {} rows, {} columns", report.rows, report.columns);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! Database access requires a Tokio runtime. The transform and write stages
//! ([`export_table`]) are synchronous.

#![warn(missing_docs)]

pub mod config;
mod error_handling;
pub mod export;
pub mod initialization;
mod run;
pub mod storage;
pub mod table;
pub mod transform;

// Re-export public API
pub use config::{Config, ConnectionConfig, LogFormat, LogLevel, Profile, ThresholdFilter};
pub use error_handling::{ExportError, InitializationError, SchemaWarning, TableError};
pub use export::OutputFormat;
pub use run::{export_table, run_export, RunReport};
pub use table::{Column, ColumnType, Table, Value};
