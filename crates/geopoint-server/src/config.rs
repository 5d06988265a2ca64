//! Configuration for the Geopoint server.
//!
//! All configuration is loaded from environment variables, read once at
//! process startup and never revisited at runtime. The backend mode
//! decides which connection target is actually used, but both targets
//! are always loaded (with defaults) so a missing variable never panics
//! mid-resolution.

use std::str::FromStr;

use geopoint_db::{BackendMode, PostgresSettings};

/// Errors that can occur while loading configuration.
///
/// All of these are fatal at startup: the process must not serve
/// traffic with a half-understood configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An environment variable held a value the server cannot use.
    #[error("invalid value for {key}: {message}")]
    Invalid {
        /// The offending environment variable.
        key: &'static str,
        /// What was wrong with it.
        message: String,
    },
}

/// Complete server configuration loaded from the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Which spatial backend to target (`ENVIRONMENT`).
    pub mode: BackendMode,
    /// Path to the `SpatiaLite` file used in development
    /// (`SPATIALITE_PATH`).
    pub spatialite_path: String,
    /// Connection settings for the production `PostgreSQL` server
    /// (`POSTGRES_*`).
    pub postgres: PostgresSettings,
    /// HTTP bind address (`HOST`).
    pub host: String,
    /// HTTP port (`PORT`).
    pub port: u16,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `ENVIRONMENT` | `development` |
    /// | `SPATIALITE_PATH` | `./geo.db` |
    /// | `POSTGRES_USER` | `postgres` |
    /// | `POSTGRES_PASSWORD` | `postgres` |
    /// | `POSTGRES_HOST` | `localhost` |
    /// | `POSTGRES_PORT` | `5432` |
    /// | `POSTGRES_DB` | `postgres` |
    /// | `HOST` | `0.0.0.0` |
    /// | `PORT` | `8080` |
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if `ENVIRONMENT` is not one of
    /// `development`/`production` (case-insensitive) or a numeric
    /// variable does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mode_raw = env_or("ENVIRONMENT", "development");
        let mode = BackendMode::from_str(&mode_raw).map_err(|e| ConfigError::Invalid {
            key: "ENVIRONMENT",
            message: e.to_string(),
        })?;

        let postgres = PostgresSettings {
            user: env_or("POSTGRES_USER", "postgres"),
            password: env_or("POSTGRES_PASSWORD", "postgres"),
            host: env_or("POSTGRES_HOST", "localhost"),
            port: parse_port("POSTGRES_PORT", &env_or("POSTGRES_PORT", "5432"))?,
            database: env_or("POSTGRES_DB", "postgres"),
        };

        Ok(Self {
            mode,
            spatialite_path: env_or("SPATIALITE_PATH", "./geo.db"),
            postgres,
            host: env_or("HOST", "0.0.0.0"),
            port: parse_port("PORT", &env_or("PORT", "8080"))?,
        })
    }
}

/// Read an environment variable with a fallback default.
fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Parse a port number, reporting the offending variable on failure.
fn parse_port(key: &'static str, raw: &str) -> Result<u16, ConfigError> {
    raw.parse().map_err(|_| ConfigError::Invalid {
        key,
        message: format!("expected a port number, got {raw:?}"),
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn port_parsing_rejects_garbage() {
        assert!(parse_port("PORT", "8080").is_ok());
        assert!(parse_port("PORT", "eighty").is_err());
        assert!(parse_port("PORT", "70000").is_err());
    }

    #[test]
    fn invalid_port_names_the_variable() {
        let err = parse_port("POSTGRES_PORT", "x").unwrap_err();
        assert!(err.to_string().contains("POSTGRES_PORT"));
    }
}
