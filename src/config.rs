//! Connection settings for the remote task service.

use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// Development address of the task service.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api/v1";

/// Request timeout applied when none is configured.
pub const DEFAULT_TIMEOUT_MS: u64 = 5_000;

/// Environment variable overriding [`GatewayConfig::base_url`].
pub const API_URL_ENV: &str = "BOARDSYNC_API_URL";

/// Environment variable overriding [`GatewayConfig::timeout_ms`].
pub const TIMEOUT_ENV: &str = "BOARDSYNC_TIMEOUT_MS";

/// Errors returned while assembling gateway configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The base URL is empty or lacks an `http://`/`https://` scheme.
    #[error("task service URL '{0}' must start with 'http://' or 'https://'")]
    InvalidBaseUrl(String),

    /// The timeout is not a positive number of milliseconds.
    #[error("invalid {TIMEOUT_ENV} value '{0}', expected a positive integer")]
    InvalidTimeout(String),
}

/// Settings for reaching the task service.
///
/// Deserialises from a host application's config file; absent fields keep
/// their defaults.
///
/// # Examples
///
/// ```
/// use boardsync::config::GatewayConfig;
///
/// let config = GatewayConfig::default();
/// assert_eq!(config.endpoint("/boards"), "http://localhost:8080/api/v1/boards");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Base URL all endpoint paths are joined to.
    pub base_url: String,
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl GatewayConfig {
    /// Creates a configuration for the given base URL with the default
    /// timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] when the URL has no HTTP scheme.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ConfigError> {
        let config = Self {
            base_url: base_url.into(),
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Builds a configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when an override is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a configuration from an arbitrary key lookup, applying
    /// overrides for [`API_URL_ENV`] and [`TIMEOUT_ENV`] over the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when an override is present but invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(url) = lookup(API_URL_ENV) {
            config.base_url = url;
        }
        if let Some(raw) = lookup(TIMEOUT_ENV) {
            config.timeout_ms = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|millis| *millis > 0)
                .ok_or(ConfigError::InvalidTimeout(raw))?;
        }
        config.validate()?;
        Ok(config)
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Returns the request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Joins an endpoint path to the base URL.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Checks the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] when the URL has no HTTP scheme.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl(self.base_url.clone()));
        }
        Ok(())
    }
}
