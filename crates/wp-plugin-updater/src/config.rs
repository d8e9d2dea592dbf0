//! Updater configuration.

use std::env;
use std::time::Duration;

/// License manager API the updater talks to unless told otherwise.
pub const DEFAULT_ENDPOINT: &str = "http://updater.makeweb.com.au/api/license-manager/v1";

pub const ENV_ENDPOINT: &str = "WP_UPDATER_ENDPOINT";
pub const ENV_TIMEOUT_SECS: &str = "WP_UPDATER_TIMEOUT_SECS";
pub const ENV_USER_AGENT: &str = "WP_UPDATER_USER_AGENT";

/// Configuration for the license API client.
/// Priority: explicit values > environment variables > defaults
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdaterConfig {
    /// Base URL of the license manager API, without the action segment
    pub endpoint: String,
    /// Request timeout. `None` keeps the transport default.
    pub timeout: Option<Duration>,
    /// User-Agent header override
    pub user_agent: Option<String>,
}

impl UpdaterConfig {
    /// Load configuration from environment variables only (fallback).
    pub fn from_env() -> Self {
        Self::from_settings_and_env(None, None, None)
    }

    /// Load configuration with priority: explicit values > env vars > defaults.
    pub fn from_settings_and_env(
        endpoint: Option<String>,
        timeout_secs: Option<u64>,
        user_agent: Option<String>,
    ) -> Self {
        Self::resolve(endpoint, timeout_secs, user_agent, |name| env::var(name).ok())
    }

    fn resolve(
        endpoint: Option<String>,
        timeout_secs: Option<u64>,
        user_agent: Option<String>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let endpoint = endpoint
            .or_else(|| lookup(ENV_ENDPOINT))
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        // Unparseable values are ignored, same as a missing variable
        let timeout = timeout_secs
            .or_else(|| lookup(ENV_TIMEOUT_SECS).and_then(|v| v.trim().parse().ok()))
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);

        let user_agent = user_agent
            .or_else(|| lookup(ENV_USER_AGENT))
            .filter(|v| !v.trim().is_empty());

        Self {
            endpoint: endpoint.trim().trim_end_matches('/').to_string(),
            timeout,
            user_agent,
        }
    }

    /// Same defaults, different endpoint. Mostly useful for tests and staging servers.
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self::resolve(Some(endpoint.into()), None, None, |_| None)
    }
}

impl Default for UpdaterConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
