// storage/mod.rs
// Database access: connection setup and view extraction

pub mod connection;
pub mod extract;

// Re-export commonly used items
pub use connection::{connect, connect_options};
pub use extract::{fetch_view, select_all_sql, validate_view_name};
