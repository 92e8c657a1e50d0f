//! REST API configuration.
//!
//! Native hosts read the environment at startup; the browser bundle bakes the
//! same variables in at compile time.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000/api/v1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

pub const API_URL_ENV: &str = "GRANTHIVE_API_URL";
pub const TIMEOUT_SECS_ENV: &str = "GRANTHIVE_API_TIMEOUT_SECS";

/// Where the REST API lives and how long a call may take.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL without a trailing slash, e.g. `http://host/api/v1`.
    pub base_url: String,
    /// Upper bound for a single request; expiry is a request failure.
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }
}

impl ApiConfig {
    #[must_use]
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        Self { base_url: base_url.trim_end_matches('/').to_owned(), timeout }
    }

    /// Read `GRANTHIVE_API_URL` and `GRANTHIVE_API_TIMEOUT_SECS`, with defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let base_url = std::env::var(API_URL_ENV).ok();
        let timeout = std::env::var(TIMEOUT_SECS_ENV).ok();
        Self::from_values(base_url.as_deref(), timeout.as_deref())
    }

    /// Same variables captured when the crate was compiled.
    #[must_use]
    pub fn from_build_env() -> Self {
        Self::from_values(option_env!("GRANTHIVE_API_URL"), option_env!("GRANTHIVE_API_TIMEOUT_SECS"))
    }

    fn from_values(base_url: Option<&str>, timeout_secs: Option<&str>) -> Self {
        let base_url = base_url.filter(|v| !v.trim().is_empty()).unwrap_or(DEFAULT_API_URL);
        let secs = timeout_secs
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        Self::new(base_url.trim(), Duration::from_secs(secs))
    }

    /// Absolute URL for an API path such as `/auth/login`.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}
