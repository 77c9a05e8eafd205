//! Database connection settings.

use std::fmt;

use crate::config::constants::*;
use crate::error_handling::ExportError;

/// Settings for reaching the analytics database.
///
/// Built once at startup, either from the environment ([`ConnectionConfig::from_env`])
/// or from literal values ([`ConnectionConfig::new`]), and validated before
/// any connection attempt.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    /// Database host
    pub host: String,
    /// Database port
    pub port: u16,
    /// Database name
    pub database: String,
    /// User name (empty means missing)
    pub user: String,
    /// Password, if any
    pub password: Option<String>,
}

impl ConnectionConfig {
    /// Creates settings from literal values.
    pub fn new(
        host: impl Into<String>,
        port: u16,
        database: impl Into<String>,
        user: impl Into<String>,
        password: Option<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            database: database.into(),
            user: user.into(),
            password,
        }
    }

    /// Reads `PGHOST`, `PGPORT`, `PGDATABASE`, `PGUSER` and `PGPASSWORD` from
    /// the process environment and validates them.
    pub fn from_env(password_required: bool) -> Result<Self, ExportError> {
        Self::from_lookup(|name| std::env::var(name).ok(), password_required)
    }

    /// Same as [`ConnectionConfig::from_env`] but reads variables through `lookup`.
    ///
    /// Empty values count as unset. Host, port and database fall back to
    /// `localhost`, `5432` and `olist_analytics`.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::Configuration` naming every missing credential,
    /// or `ExportError::InvalidSetting` if `PGPORT` is not a port number.
    pub fn from_lookup<F>(lookup: F, password_required: bool) -> Result<Self, ExportError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let port = match get(ENV_PG_PORT) {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ExportError::InvalidSetting {
                    name: ENV_PG_PORT.to_string(),
                    value: raw.clone(),
                })?,
            None => DEFAULT_PG_PORT,
        };

        let config = Self {
            host: get(ENV_PG_HOST).unwrap_or_else(|| DEFAULT_PG_HOST.to_string()),
            port,
            database: get(ENV_PG_DATABASE).unwrap_or_else(|| DEFAULT_PG_DATABASE.to_string()),
            user: get(ENV_PG_USER).unwrap_or_default(),
            password: get(ENV_PG_PASSWORD),
        };
        config.validate(password_required)?;
        Ok(config)
    }

    /// Names of the required settings that are missing.
    pub fn missing_credentials(&self, password_required: bool) -> Vec<String> {
        let mut missing = Vec::new();
        if self.user.trim().is_empty() {
            missing.push(ENV_PG_USER.to_string());
        }
        let has_password = self
            .password
            .as_deref()
            .is_some_and(|p| !p.is_empty());
        if password_required && !has_password {
            missing.push(ENV_PG_PASSWORD.to_string());
        }
        missing
    }

    /// Fails with `ExportError::Configuration` if any required credential is missing.
    pub fn validate(&self, password_required: bool) -> Result<(), ExportError> {
        let missing = self.missing_credentials(password_required);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ExportError::Configuration { missing })
        }
    }
}

impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_defaults_applied() {
        let config = ConnectionConfig::from_lookup(
            lookup_from(&[("PGUSER", "analyst"), ("PGPASSWORD", "secret")]),
            true,
        )
        .expect("credentials present");
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 5432);
        assert_eq!(config.database, "olist_analytics");
        assert_eq!(config.user, "analyst");
        assert_eq!(config.password.as_deref(), Some("secret"));
    }

    #[test]
    fn test_overrides_applied() {
        let config = ConnectionConfig::from_lookup(
            lookup_from(&[
                ("PGHOST", "db.internal"),
                ("PGPORT", "6543"),
                ("PGDATABASE", "warehouse"),
                ("PGUSER", "analyst"),
            ]),
            false,
        )
        .expect("password optional");
        assert_eq!(config.host, "db.internal");
        assert_eq!(config.port, 6543);
        assert_eq!(config.database, "warehouse");
        assert_eq!(config.password, None);
    }

    #[test]
    fn test_all_missing_credentials_named() {
        let err = ConnectionConfig::from_lookup(lookup_from(&[]), true).unwrap_err();
        match err {
            ExportError::Configuration { missing } => {
                assert_eq!(missing, vec!["PGUSER", "PGPASSWORD"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_values_count_as_missing() {
        let err = ConnectionConfig::from_lookup(
            lookup_from(&[("PGUSER", "  "), ("PGPASSWORD", "")]),
            true,
        )
        .unwrap_err();
        assert!(matches!(err, ExportError::Configuration { ref missing } if missing.len() == 2));
    }

    #[test]
    fn test_password_optional_only_needs_user() {
        let err = ConnectionConfig::from_lookup(lookup_from(&[]), false).unwrap_err();
        match err {
            ExportError::Configuration { missing } => assert_eq!(missing, vec!["PGUSER"]),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_invalid_port_rejected() {
        let err = ConnectionConfig::from_lookup(
            lookup_from(&[("PGPORT", "not-a-port"), ("PGUSER", "a"), ("PGPASSWORD", "b")]),
            true,
        )
        .unwrap_err();
        assert!(matches!(err, ExportError::InvalidSetting { ref name, .. } if name == "PGPORT"));
    }

    #[test]
    fn test_literal_config_validation() {
        let config = ConnectionConfig::new("localhost", 5432, "olist_analytics", "analyst", None);
        assert!(config.validate(false).is_ok());
        assert!(config.validate(true).is_err());
    }

    #[test]
    fn test_debug_redacts_password() {
        let config = ConnectionConfig::new("h", 1, "d", "u", Some("hunter2".to_string()));
        let debug = format!("{:?}", config);
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("<redacted>"));
    }
}
