use std::path::PathBuf;

use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_SESSION_IDLE_SECS: u32 = 30 * 60;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("PORT must be a valid number, got '{0}'")]
    InvalidPort(String),

    #[error("SESSION_IDLE_SECS must be a positive number of seconds, got '{0}'")]
    InvalidSessionIdle(String),
}

/// Runtime settings, read from the environment (and `.env`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// JSON catalog to serve; the catalog is empty when unset.
    pub catalog_path: Option<PathBuf>,
    /// Sessions untouched for this many seconds are dropped.
    pub session_idle_secs: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };
        let catalog_path = lookup("CATALOG_PATH")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);
        let session_idle_secs = match lookup("SESSION_IDLE_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::InvalidSessionIdle(raw))?,
            None => DEFAULT_SESSION_IDLE_SECS,
        };
        Ok(Self {
            host,
            port,
            catalog_path,
            session_idle_secs,
        })
    }
}
