//! Client configuration.
//!
//! Defaults can be overridden from the environment with [`ClientConfig::from_env`]
//! and then adjusted with the builder methods.

use std::path::PathBuf;
use std::time::Duration;

use crate::api::DEFAULT_BASE_URL;
use crate::error::MentorError;

pub const API_URL_VAR: &str = "MENTORLINK_API_URL";
pub const TIMEOUT_VAR: &str = "MENTORLINK_TIMEOUT_SECS";
pub const HOME_VAR: &str = "MENTORLINK_HOME";
pub const LOG_VAR: &str = "MENTORLINK_LOG";

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// File holding the persisted session, relative to the storage directory.
const SESSION_FILE: &str = "storage.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API root, e.g. `http://localhost:5000/api`
    pub base_url: String,
    /// Per-request timeout.
    pub timeout_secs: u64,
    /// Directory for the session file. `None` means the home-directory default.
    pub storage_dir: Option<PathBuf>,
    /// `tracing_subscriber::EnvFilter` directive.
    pub log_filter: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            storage_dir: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn with_storage_path(mut self, dir: impl Into<PathBuf>) -> Self {
        self.storage_dir = Some(dir.into());
        self
    }

    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    /// Read overrides from `MENTORLINK_*` variables.
    ///
    /// Empty variables are ignored. A timeout that is not a positive
    /// integer is a configuration error.
    pub fn from_env() -> Result<Self, MentorError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an explicit variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, MentorError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(url) = var(API_URL_VAR) {
            config = config.with_base_url(url.trim());
        }
        if let Some(raw) = var(TIMEOUT_VAR) {
            let secs = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|s| *s > 0)
                .ok_or_else(|| {
                    MentorError::Config(format!("{} must be a positive integer, got '{}'", TIMEOUT_VAR, raw))
                })?;
            config = config.with_timeout_secs(secs);
        }
        if let Some(home) = var(HOME_VAR) {
            config = config.with_storage_path(home);
        }
        if let Some(filter) = var(LOG_VAR) {
            config = config.with_log_filter(filter);
        }
        Ok(config)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Resolved storage directory: the override, else `~/.mentorlink`.
    pub fn storage_dir(&self) -> Option<PathBuf> {
        self.storage_dir
            .clone()
            .or_else(|| dirs::home_dir().map(|home| home.join(".mentorlink")))
    }

    /// Path of the persisted session file.
    pub fn session_path(&self) -> Result<PathBuf, MentorError> {
        self.storage_dir()
            .map(|dir| dir.join(SESSION_FILE))
            .ok_or_else(|| {
                MentorError::Config(format!(
                    "Could not determine a home directory; set {}",
                    HOME_VAR
                ))
            })
    }
}
