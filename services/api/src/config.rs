//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing the environment variable {0}")]
    MissingVar(String),
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub log_level: Level,
    /// Directory holding `employee.json`, `food-categories.json` and `users.json`.
    pub data_dir: PathBuf,
    pub session_secret: String,
    pub session_cookie_name: String,
    pub session_cookie_secure: bool,
    /// `None` keeps sessions for the lifetime of the process.
    pub session_ttl: Option<Duration>,
    /// Advertised in the OpenAPI `servers` list when set.
    pub public_url: Option<String>,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // --- Server Settings ---
        let bind_address_str = lookup("BIND_ADDRESS").unwrap_or_else(|| "0.0.0.0:3000".to_string());
        let bind_address = bind_address_str.parse::<SocketAddr>().map_err(|e| {
            ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string())
        })?;

        let log_level_str = lookup("RUST_LOG").unwrap_or_else(|| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let data_dir = lookup("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./DataBase"));

        // --- Session Settings ---
        let session_secret = lookup("SESSION_SECRET")
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ConfigError::MissingVar("SESSION_SECRET".to_string()))?;

        let session_cookie_name =
            lookup("SESSION_COOKIE_NAME").unwrap_or_else(|| "connect.sid".to_string());

        let session_cookie_secure = match lookup("SESSION_COOKIE_SECURE") {
            Some(raw) => raw.parse::<bool>().map_err(|_| {
                ConfigError::InvalidValue(
                    "SESSION_COOKIE_SECURE".to_string(),
                    format!("'{}' is not true or false", raw),
                )
            })?,
            None => false,
        };

        let session_ttl = match lookup("SESSION_TTL_SECS") {
            Some(raw) => {
                let secs = raw.parse::<u64>().map_err(|e| {
                    ConfigError::InvalidValue("SESSION_TTL_SECS".to_string(), e.to_string())
                })?;
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        let public_url = lookup("PUBLIC_URL").filter(|s| !s.is_empty());

        Ok(Self {
            bind_address,
            log_level,
            data_dir,
            session_secret,
            session_cookie_name,
            session_cookie_secure,
            session_ttl,
            public_url,
        })
    }
}
