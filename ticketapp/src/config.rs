//! Application configuration loaded via OrthoConfig.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::DEFAULT_AUTH_DELAY;

const DEFAULT_DATA_DIR: &str = ".ticketapp";

/// Error returned when configuration cannot be loaded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to load configuration: {message}")]
pub struct ConfigError {
    message: String,
}

/// Configuration values controlling storage, login delay, and logging.
///
/// Every field may be set through a `TICKETAPP_`-prefixed environment
/// variable.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "TICKETAPP")]
pub struct AppSettings {
    /// Directory holding the key-value store files.
    pub data_dir: Option<PathBuf>,
    /// Artificial login and signup delay, in milliseconds.
    pub auth_delay_ms: Option<u64>,
    /// Optional demo account registry replacing the built-in accounts.
    pub accounts_path: Option<PathBuf>,
    /// Emit logs as JSON lines instead of human-readable text.
    #[ortho_config(default = false)]
    pub log_json: bool,
}

impl AppSettings {
    /// Load settings from the environment and configuration files only.
    ///
    /// Command-line arguments belong to the CLI adapter, so only the program
    /// name is passed to the loader.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a value cannot be parsed.
    pub fn load_from_env() -> Result<Self, ConfigError> {
        Self::load_from_iter([OsString::from("ticketapp")]).map_err(|err| ConfigError {
            message: err.to_string(),
        })
    }

    /// Return the configured data directory, falling back to `.ticketapp`.
    pub fn data_dir(&self) -> &Path {
        self.data_dir
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_DATA_DIR))
    }

    /// Return the configured auth delay, falling back to one second.
    pub fn auth_delay(&self) -> Duration {
        self.auth_delay_ms
            .map_or(DEFAULT_AUTH_DELAY, Duration::from_millis)
    }

    /// Return the registry path, if one is configured.
    pub fn accounts_path(&self) -> Option<&Path> {
        self.accounts_path.as_deref()
    }
}
