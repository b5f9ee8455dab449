//! Viewer configuration.
//!
//! Resolution order, later wins: built-in defaults, the TOML config file,
//! environment variables (a `.env` file is honoured), then CLI flags.
//!
//! ```toml
//! base_url = "http://127.0.0.1:8000"
//! request_timeout_secs = 30
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Default API origin, matching the viewer backend's default bind address.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

const ENV_BASE_URL: &str = "CHAT_VIEWER_BASE_URL";
const ENV_TIMEOUT_SECS: &str = "CHAT_VIEWER_TIMEOUT_SECS";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {key}: {value}")]
    InvalidEnv { key: &'static str, value: String },

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Everything the API client and views need to run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Origin serving `/api/conversations`.
    pub base_url: String,
    /// Per-request timeout; unset means wait forever.
    pub request_timeout_secs: Option<u64>,
    pub user_agent: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: None,
            user_agent: concat!("chat-viewer/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ViewerConfig {
    /// Resolve the full configuration.
    ///
    /// An explicit `config_path` must exist; the default location is optional.
    pub fn load(
        config_path: Option<&Path>,
        base_url_flag: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let mut cfg = match config_path {
            Some(path) => Self::from_file(path)?,
            None => match default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };
        cfg.apply_env()?;
        if let Some(url) = base_url_flag {
            cfg.base_url = url.to_string();
        }
        cfg.validate()?;
        debug!(
            component = "config",
            base_url = %cfg.base_url,
            timeout_secs = ?cfg.request_timeout_secs,
            "Configuration resolved"
        );
        Ok(cfg)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Overlay `CHAT_VIEWER_*` environment variables.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Ok(url) = dotenvy::var(ENV_BASE_URL) {
            self.base_url = url;
        }
        if let Ok(val) = dotenvy::var(ENV_TIMEOUT_SECS) {
            let secs = val.parse::<u64>().map_err(|_| ConfigError::InvalidEnv {
                key: ENV_TIMEOUT_SECS,
                value: val.clone(),
            })?;
            self.request_timeout_secs = Some(secs);
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigError::Validation(format!(
                "base_url must start with http:// or https:// (got '{}')",
                self.base_url
            )));
        }
        if self.request_timeout_secs == Some(0) {
            return Err(ConfigError::Validation(
                "request_timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// `<config dir>/chat-viewer/config.toml` for the current platform.
pub fn default_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("com", "chat-viewer", "chat-viewer")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}
