//! Configuration management for SqlQuest.
//!
//! Handles loading configuration from TOML files and environment variables.
//! All settings are resolved at startup and passed into constructors; nothing
//! reads ambient process state after that.

use crate::error::{QuestError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// Re-export url for endpoint validation
use url::Url;

/// Main configuration structure for SqlQuest.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// HTTP server configuration.
    #[serde(default)]
    pub server: ServerConfig,

    /// Judge service configuration.
    #[serde(default)]
    pub judge: JudgeConfig,

    /// Data backend configuration.
    #[serde(default)]
    pub backend: BackendConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind the listener to.
    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_bind() -> String {
    "0.0.0.0:8000".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

/// Judge service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JudgeConfig {
    /// URL of the judge service's validate endpoint.
    #[serde(default = "default_judge_endpoint")]
    pub endpoint: String,

    /// Request timeout in seconds.
    #[serde(default = "default_judge_timeout")]
    pub timeout_secs: u64,
}

fn default_judge_endpoint() -> String {
    "http://localhost:8090/validate".to_string()
}

fn default_judge_timeout() -> u64 {
    30
}

impl Default for JudgeConfig {
    fn default() -> Self {
        Self {
            endpoint: default_judge_endpoint(),
            timeout_secs: default_judge_timeout(),
        }
    }
}

/// Data backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the data API (without a trailing slash).
    #[serde(default = "default_backend_url")]
    pub url: String,

    /// Service-level key sent as the bearer credential on every call.
    #[serde(default)]
    pub service_key: String,

    /// Timeout for query execution in seconds.
    #[serde(default = "default_execute_timeout")]
    pub execute_timeout_secs: u64,

    /// Timeout for progress record reads/writes in seconds.
    #[serde(default = "default_progress_timeout")]
    pub progress_timeout_secs: u64,
}

fn default_backend_url() -> String {
    "http://localhost:54321".to_string()
}

fn default_execute_timeout() -> u64 {
    15
}

fn default_progress_timeout() -> u64 {
    10
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: default_backend_url(),
            service_key: String::new(),
            execute_timeout_secs: default_execute_timeout(),
            progress_timeout_secs: default_progress_timeout(),
        }
    }
}

impl Config {
    /// Returns the default config file path for the current platform.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("sql-quest")
            .join("config.toml")
    }

    /// Loads configuration from a TOML file.
    ///
    /// A missing file is not an error; defaults apply.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| QuestError::config(format!("Failed to read config file: {e}")))?;

        Self::parse_toml(&content, path)
    }

    /// Parses configuration from a TOML string.
    fn parse_toml(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|e| {
            QuestError::config(format!(
                "Configuration error in {}:\n  {}",
                path.display(),
                e
            ))
        })
    }

    /// Applies environment variable overrides.
    ///
    /// `BIND_ADDR`, `JUDGE_ENDPOINT`, `DATA_API_URL` and `DATA_SERVICE_KEY`
    /// take precedence over file values when set.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(bind) = std::env::var("BIND_ADDR") {
            self.server.bind = bind;
        }
        if let Ok(endpoint) = std::env::var("JUDGE_ENDPOINT") {
            self.judge.endpoint = endpoint;
        }
        if let Ok(url) = std::env::var("DATA_API_URL") {
            self.backend.url = url;
        }
        if let Ok(key) = std::env::var("DATA_SERVICE_KEY") {
            self.backend.service_key = key;
        }
    }

    /// Validates the resolved configuration.
    ///
    /// Both collaborator URLs must parse; timeouts must be non-zero.
    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.judge.endpoint)
            .map_err(|e| QuestError::config(format!("Invalid judge endpoint: {e}")))?;
        Url::parse(&self.backend.url)
            .map_err(|e| QuestError::config(format!("Invalid data API URL: {e}")))?;

        if self.judge.timeout_secs == 0 {
            return Err(QuestError::config("Judge timeout must be non-zero"));
        }
        if self.backend.execute_timeout_secs == 0 || self.backend.progress_timeout_secs == 0 {
            return Err(QuestError::config("Backend timeouts must be non-zero"));
        }

        Ok(())
    }
}
