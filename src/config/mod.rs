//! Configuration handling for the application.
//!
//! Everything comes from environment variables with development defaults, so
//! `Config::from_env` works on a bare checkout. Only values that must parse
//! (the default profile, the log format) can fail.

use std::env;
use std::path::{Path, PathBuf};

use crate::profile::Profile;

pub const ENV_BIND_ADDR: &str = "BIND_ADDR";
pub const ENV_FILES_DIR: &str = "FILES_DIR";
pub const ENV_DEFAULT_PROFILE: &str = "DEFAULT_PROFILE";
pub const ENV_LOG_FORMAT: &str = "LOG_FORMAT";

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_FILES_DIR: &str = "./files";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Application runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    bind_addr: String,
    files_dir: PathBuf,
    default_profile: Profile,
    log_format: LogFormat,
}

impl Config {
    pub fn new(
        bind_addr: impl Into<String>,
        files_dir: impl Into<PathBuf>,
        default_profile: Profile,
    ) -> Self {
        Self {
            bind_addr: bind_addr.into(),
            files_dir: files_dir.into(),
            default_profile,
            log_format: LogFormat::default(),
        }
    }

    /// Load from environment variables, falling back to development defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_addr = env::var(ENV_BIND_ADDR).unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let files_dir = env::var(ENV_FILES_DIR).unwrap_or_else(|_| DEFAULT_FILES_DIR.to_string());

        let default_profile = match env::var(ENV_DEFAULT_PROFILE) {
            Ok(raw) => raw.parse::<Profile>().map_err(|reason| ConfigError::InvalidValue {
                field: ENV_DEFAULT_PROFILE,
                reason,
            })?,
            Err(_) => Profile::default(),
        };

        let log_format = match env::var(ENV_LOG_FORMAT).as_deref().map(str::trim) {
            Ok("json") => LogFormat::Json,
            Ok("" | "text" | "pretty") | Err(_) => LogFormat::Text,
            Ok(other) => {
                return Err(ConfigError::InvalidValue {
                    field: ENV_LOG_FORMAT,
                    reason: format!("expected 'json' or 'text', got '{other}'"),
                });
            }
        };

        Ok(Self {
            bind_addr,
            files_dir: PathBuf::from(files_dir),
            default_profile,
            log_format,
        })
    }

    /// TCP bind address (host:port) for the HTTP server.
    pub fn bind_addr(&self) -> &str {
        &self.bind_addr
    }
    /// Root of the public files area images are written to.
    pub fn files_dir(&self) -> &Path {
        &self.files_dir
    }
    /// Profile used when a request does not name one.
    pub fn default_profile(&self) -> Profile {
        self.default_profile
    }
    pub fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Development defaults (mirrors `from_env` with no env overrides).
    pub fn default() -> Self {
        Self::new(DEFAULT_BIND_ADDR, DEFAULT_FILES_DIR, Profile::default())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },
}
