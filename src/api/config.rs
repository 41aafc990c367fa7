//! API client configuration.

use std::env;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

/// Default backend base URL (local dev proxy).
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8080/api";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Value sent in the `X-API-Version` header.
pub const API_VERSION: &str = "2.0.0";

/// Configuration for the API client.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL all request paths are appended to.
    pub base_url: String,
    /// Fixed per-request timeout.
    pub timeout: Duration,
    /// Where the bearer token is persisted, if anywhere.
    pub token_path: Option<PathBuf>,
}

impl ApiConfig {
    /// Loads configuration from the environment, falling back to defaults.
    pub fn load() -> Self {
        let base_url: String = try_load("CARESYNC_API_URL", DEFAULT_API_URL);
        let timeout_secs: u64 = try_load("CARESYNC_TIMEOUT_SECS", &DEFAULT_TIMEOUT_SECS.to_string());
        let token_path = env::var("CARESYNC_TOKEN_FILE").ok().map(PathBuf::from);

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(timeout_secs),
            token_path,
        }
    }

    /// Configuration pointing at a specific base URL, with defaults otherwise.
    pub fn with_base_url(url: impl Into<String>) -> Self {
        Self {
            base_url: url.into().trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            token_path: None,
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::with_base_url(DEFAULT_API_URL)
    }
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    let raw = env::var(key).unwrap_or_else(|_| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    raw.parse().unwrap_or_else(|e| {
        warn!("Invalid {key} value {raw:?}: {e}, using default: {default}");
        default
            .parse()
            .unwrap_or_else(|e| panic!("Default for {key} misconfigured: {e}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ApiConfig::default();
        assert_eq!(config.base_url, DEFAULT_API_URL);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.token_path.is_none());
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let config = ApiConfig::with_base_url("http://example.com/api/");
        assert_eq!(config.base_url, "http://example.com/api");
    }
}
