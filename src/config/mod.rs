//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (connection defaults, profile presets)
//! - Connection settings loaded from the environment
//! - Run configuration types and command-line options

mod cli;
mod connection;
mod constants;
mod types;

// Re-export all constants
pub use cli::Cli;
pub use connection::ConnectionConfig;
pub use constants::*;
pub use types::{Config, LogFormat, LogLevel, Profile, ThresholdFilter};
