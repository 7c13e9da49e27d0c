//! Client configuration types.

use directories::ProjectDirs;
use passivetotal_core::{PassiveTotalError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable holding the account username
pub const USERNAME_ENV: &str = "PT_USERNAME";

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "PT_API_KEY";

/// Account credentials used for HTTP basic auth
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Account username (usually an email address)
    pub username: String,

    /// API key
    pub api_key: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    /// Create credentials from a username and API key
    #[must_use]
    pub fn new(username: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            api_key: api_key.into(),
        }
    }

    /// Read credentials from `PT_USERNAME` and `PT_API_KEY`
    pub fn from_env() -> Result<Self> {
        Self::from_vars(
            std::env::var(USERNAME_ENV).ok(),
            std::env::var(API_KEY_ENV).ok(),
        )
    }

    fn from_vars(username: Option<String>, api_key: Option<String>) -> Result<Self> {
        match (username, api_key) {
            (Some(username), Some(api_key)) => Self::new(username, api_key).validated(),
            _ => Err(PassiveTotalError::Config(format!(
                "{USERNAME_ENV} and {API_KEY_ENV} must both be set"
            ))),
        }
    }

    /// Read credentials from a TOML file with `username` and `api_key` keys
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            PassiveTotalError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        let credentials: Self = toml::from_str(&content).map_err(|e| {
            PassiveTotalError::Config(format!("cannot parse {}: {e}", path.display()))
        })?;
        credentials.validated()
    }

    /// Default location of the credentials file
    /// (`<config dir>/passivetotal/config.toml`)
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("org", "passivetotal", "passivetotal")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Load credentials from the environment, falling back to the default file
    pub fn load() -> Result<Self> {
        if let Ok(credentials) = Self::from_env() {
            return Ok(credentials);
        }

        let path = Self::default_path().ok_or_else(|| {
            PassiveTotalError::Config("could not determine config directory".into())
        })?;

        if !path.exists() {
            return Err(PassiveTotalError::Config(format!(
                "no credentials: set {USERNAME_ENV}/{API_KEY_ENV} or create {}",
                path.display()
            )));
        }

        Self::from_file(path)
    }

    fn validated(self) -> Result<Self> {
        if self.username.trim().is_empty() || self.api_key.trim().is_empty() {
            return Err(PassiveTotalError::Config(
                "username and API key must not be empty".into(),
            ));
        }
        Ok(self)
    }
}

/// Retry configuration for failed requests
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts
    pub max_retries: u32,

    /// Initial backoff duration
    pub initial_backoff: Duration,

    /// Maximum backoff duration
    pub max_backoff: Duration,

    /// Whether to retry on rate limit errors
    pub retry_on_rate_limit: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl RetryConfig {
    /// Create a new retry configuration
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_retries: 3,
            initial_backoff: Duration::from_millis(500),
            max_backoff: Duration::from_secs(30),
            retry_on_rate_limit: true,
        }
    }

    /// Never retry
    #[must_use]
    pub const fn disabled() -> Self {
        Self::new().max_retries(0)
    }

    /// Set maximum retries
    #[must_use]
    pub const fn max_retries(mut self, max: u32) -> Self {
        self.max_retries = max;
        self
    }

    /// Set initial backoff duration
    #[must_use]
    pub const fn initial_backoff(mut self, duration: Duration) -> Self {
        self.initial_backoff = duration;
        self
    }

    /// Set maximum backoff duration
    #[must_use]
    pub const fn max_backoff(mut self, duration: Duration) -> Self {
        self.max_backoff = duration;
        self
    }

    /// Set whether rate-limit responses are retried
    #[must_use]
    pub const fn retry_on_rate_limit(mut self, retry: bool) -> Self {
        self.retry_on_rate_limit = retry;
        self
    }

    /// Calculate backoff for a given attempt
    #[must_use]
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        let initial = u64::try_from(self.initial_backoff.as_millis()).unwrap_or(u64::MAX);
        let max = u64::try_from(self.max_backoff.as_millis()).unwrap_or(u64::MAX);
        let backoff = initial.saturating_mul(2u64.saturating_pow(attempt));
        Duration::from_millis(backoff.min(max))
    }
}

/// Client-side request rate limit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Sustained requests per second
    pub requests_per_second: u32,

    /// Requests allowed in a burst
    pub burst_size: u32,
}

impl RateLimitConfig {
    /// Limit to `requests_per_second`, bursting up to the same amount
    #[must_use]
    pub const fn per_second(requests_per_second: u32) -> Self {
        Self {
            requests_per_second,
            burst_size: requests_per_second,
        }
    }

    /// Set the burst size
    #[must_use]
    pub const fn burst(mut self, burst_size: u32) -> Self {
        self.burst_size = burst_size;
        self
    }
}
