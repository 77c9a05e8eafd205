//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `olist_export` library that handles:
//! - Environment variable loading (.env file)
//! - Command-line argument parsing
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use olist_export::config::Cli;
use olist_export::initialization::{init_logger_with, load_dotenv};
use olist_export::{run_export, ConnectionConfig};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Keeps PGUSER / PGPASSWORD out of the shell history
    load_dotenv();

    let config = Cli::parse().into_config();

    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    let outcome = match ConnectionConfig::from_env(config.password_required) {
        Ok(connection) => run_export(&config, &connection).await,
        Err(e) => Err(e),
    };

    match outcome {
        Ok(report) => {
            println!(
                "Pulled {} row{}, {} column{} from {} in {:.1}s",
                report.rows,
                if report.rows == 1 { "" } else { "s" },
                report.columns,
                if report.columns == 1 { "" } else { "s" },
                report.view,
                report.elapsed_seconds
            );
            for path in report.outputs.iter().chain(report.summary.iter()) {
                println!("Saved: {}", path.display());
            }
            Ok(())
        }
        Err(e) => {
            let e = anyhow::Error::new(e).context(format!("Export of '{}' failed", config.view));
            eprintln!("\nERROR: {:#}", e);
            process::exit(1);
        }
    }
}
