//! Database connection management.
//!
//! Opens the single PostgreSQL connection an export run uses. Credentials are
//! validated before any network I/O.

use log::{error, info};
use sqlx::postgres::{PgConnectOptions, PgConnection};
use sqlx::Connection;

use crate::config::ConnectionConfig;
use crate::error_handling::ExportError;

/// Builds driver options from validated settings.
pub fn connect_options(config: &ConnectionConfig) -> PgConnectOptions {
    let options = PgConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .database(&config.database)
        .username(&config.user);

    match config.password.as_deref() {
        Some(password) if !password.is_empty() => options.password(password),
        _ => options,
    }
}

/// Opens a connection to the analytics database.
///
/// The caller owns the connection; it is closed when dropped, so every exit
/// path releases it.
///
/// # Errors
///
/// Returns `ExportError::Configuration` without touching the network if the
/// user name is missing, or `ExportError::Connection` if the server is
/// unreachable or rejects the credentials.
pub async fn connect(
    config: &ConnectionConfig,
    password_required: bool,
) -> Result<PgConnection, ExportError> {
    config.validate(password_required)?;

    info!(
        "Connecting to PostgreSQL at {}:{}/{} as {}",
        config.host, config.port, config.database, config.user
    );

    let options = connect_options(config);
    PgConnection::connect_with(&options).await.map_err(|e| {
        error!("Failed to connect to database: {e}");
        ExportError::Connection {
            host: config.host.clone(),
            port: config.port,
            database: config.database.clone(),
            source: e,
        }
    })
}
