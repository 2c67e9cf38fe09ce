//! Client configuration parsed from environment variables.

use std::time::Duration;

use session::api::DEFAULT_API_BASE_URL;

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid API base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("timeout must be at least one second")]
    ZeroTimeout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Timeouts {
    #[must_use]
    pub fn request(&self) -> Duration {
        Duration::from_secs(self.request_secs)
    }

    #[must_use]
    pub fn connect(&self) -> Duration {
        Duration::from_secs(self.connect_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeouts: Timeouts,
}

impl ClientConfig {
    /// Build typed client config from environment variables.
    ///
    /// Optional:
    /// - `ALLERPREDICT_API_URL`: analysis service base URL (default `http://localhost:8000`)
    /// - `ALLERPREDICT_REQUEST_TIMEOUT_SECS`: default 30
    /// - `ALLERPREDICT_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the base URL is not an http(s) URL or a
    /// timeout is zero.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = std::env::var("ALLERPREDICT_API_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_owned());
        let timeouts = Timeouts {
            request_secs: env_parse_u64("ALLERPREDICT_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_secs: env_parse_u64("ALLERPREDICT_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
        };
        Self::new(base_url, timeouts)
    }

    /// Build a validated config.
    ///
    /// # Errors
    ///
    /// Same as [`Self::from_env`].
    pub fn new(base_url: impl Into<String>, timeouts: Timeouts) -> Result<Self, ConfigError> {
        let base_url = normalize_base_url(&base_url.into())?;
        if timeouts.request_secs == 0 || timeouts.connect_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(Self { base_url, timeouts })
    }

    /// Apply command-line overrides on top of this config.
    ///
    /// # Errors
    ///
    /// Same as [`Self::from_env`].
    pub fn with_overrides(self, base_url: Option<String>, request_timeout_secs: Option<u64>) -> Result<Self, ConfigError> {
        let timeouts = Timeouts {
            request_secs: request_timeout_secs.unwrap_or(self.timeouts.request_secs),
            ..self.timeouts
        };
        Self::new(base_url.unwrap_or(self.base_url), timeouts)
    }
}

fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let parsed = reqwest::Url::parse(trimmed)
        .map_err(|e| ConfigError::InvalidBaseUrl { url: raw.to_owned(), reason: e.to_string() })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidBaseUrl { url: raw.to_owned(), reason: "scheme must be http or https".into() });
    }
    Ok(trimmed.to_owned())
}

fn env_parse_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
