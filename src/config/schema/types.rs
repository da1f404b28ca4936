use crate::error::ConfigError;
use anyhow::{Context, Result};
use directories::UserDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

pub(super) const DEFAULT_BASE_URL: &str = "https://backend.composio.dev/api";
pub(super) const DEFAULT_WEB_URL: &str = "https://app.composio.dev";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to config.toml - computed from home, not serialized
    #[serde(skip)]
    pub config_path: PathBuf,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_web_url")]
    pub web_url: String,
    #[serde(default = "default_entity_id")]
    pub entity_id: String,

    #[serde(default)]
    pub connection: ConnectionConfig,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.into()
}

fn default_web_url() -> String {
    DEFAULT_WEB_URL.into()
}

fn default_entity_id() -> String {
    "default".into()
}

/// Tuning for connection initiation and the activation wait.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
    /// Unset means wait until the connection is active or the process is interrupted.
    #[serde(default)]
    pub wait_timeout_secs: Option<u64>,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_poll_interval_secs() -> u64 {
    1
}

fn default_request_timeout_secs() -> u64 {
    60
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval_secs(),
            wait_timeout_secs: None,
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl ConnectionConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.max(1))
    }

    pub fn wait_timeout(&self) -> Option<Duration> {
        self.wait_timeout_secs.map(Duration::from_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        let home =
            UserDirs::new().map_or_else(|| PathBuf::from("."), |u| u.home_dir().to_path_buf());
        Self {
            config_path: home.join(".conduit").join("config.toml"),
            api_key: None,
            base_url: default_base_url(),
            web_url: default_web_url(),
            entity_id: default_entity_id(),
            connection: ConnectionConfig::default(),
        }
    }
}

impl Config {
    /// The configured API key, if it is non-blank.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    /// Build a URL on the web dashboard, e.g. the OAuth `redirect` callback.
    pub fn web_url_for(&self, path: &str) -> Result<String> {
        let mut base = Url::parse(&self.web_url)
            .with_context(|| format!("Invalid web_url in config: {}", self.web_url))?;
        if !base.path().ends_with('/') {
            let with_slash = format!("{}/", base.path());
            base.set_path(&with_slash);
        }
        let joined = base
            .join(path.trim_start_matches('/'))
            .with_context(|| format!("Failed to build web URL for path `{path}`"))?;
        Ok(joined.to_string())
    }

    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        for (key, value) in [("base_url", &self.base_url), ("web_url", &self.web_url)] {
            Url::parse(value)
                .map_err(|e| ConfigError::Validation(format!("{key} `{value}`: {e}")))?;
        }
        if self.entity_id.trim().is_empty() {
            return Err(ConfigError::Validation("entity_id must not be empty".into()));
        }
        Ok(())
    }
}
