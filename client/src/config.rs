use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use std::time::Duration;

use reqwest::Url;
use serde::Deserialize;

pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Validation error: {0}")]
    Validation(String),
}

const fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Connection settings for one Grafana instance.
///
/// `host` is the server root (e.g. `https://grafana.example.com`); the API
/// root `{host}/api` is derived from it.
#[derive(Clone, Deserialize)]
pub struct GrafanaConfig {
    pub host: String,
    pub token: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub http2: bool,
}

impl GrafanaConfig {
    #[must_use]
    pub fn new(host: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            token: token.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            http2: false,
        }
    }

    #[must_use]
    pub const fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    #[must_use]
    pub const fn with_http2(mut self, http2: bool) -> Self {
        self.http2 = http2;
        self
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(&path).map_err(ConfigError::Io)?;

        let config: Self = toml::from_str(&content).map_err(ConfigError::Parse)?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::Validation("host is required".to_string()));
        }
        let url = Url::parse(&self.host)
            .map_err(|e| ConfigError::Validation(format!("invalid host '{}': {e}", self.host)))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::Validation(format!(
                "host must use http or https (got '{}')",
                url.scheme()
            )));
        }
        if self.token.is_empty() {
            return Err(ConfigError::Validation("token is required".to_string()));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "timeout_secs must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// `{host}/api`, without a trailing slash.
    #[must_use]
    pub fn api_root(&self) -> String {
        format!("{}/api", self.host.trim_end_matches('/'))
    }
}

impl fmt::Debug for GrafanaConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GrafanaConfig")
            .field("host", &self.host)
            .field("token", &"<redacted>")
            .field("timeout_secs", &self.timeout_secs)
            .field("http2", &self.http2)
            .finish()
    }
}
