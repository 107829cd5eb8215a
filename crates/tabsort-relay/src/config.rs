//! Relay client configuration

use std::time::Duration;

/// Default relay endpoint served by the companion extension bridge
pub const DEFAULT_RELAY_URL: &str = "http://127.0.0.1:8765";

const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Connection settings for the extension relay
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Base URL of the relay, no trailing slash
    pub server_url: String,
    /// Per-request timeout
    pub request_timeout: Duration,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_RELAY_URL.to_string(),
            request_timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }
}

impl RelayConfig {
    /// Configuration from `TABSORT_RELAY_URL` and `TABSORT_RELAY_TIMEOUT_MS`,
    /// falling back to defaults for anything unset or unparseable
    #[must_use]
    pub fn from_env() -> Self {
        let server_url = std::env::var("TABSORT_RELAY_URL")
            .ok()
            .filter(|value| !value.is_empty())
            .map(|value| value.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_RELAY_URL.to_string());
        let request_timeout = std::env::var("TABSORT_RELAY_TIMEOUT_MS")
            .ok()
            .and_then(|value| value.parse().ok())
            .map(Duration::from_millis)
            .unwrap_or(Duration::from_millis(DEFAULT_TIMEOUT_MS));
        Self {
            server_url,
            request_timeout,
        }
    }

    /// Override the relay endpoint
    #[must_use]
    pub fn with_server_url(mut self, server_url: impl Into<String>) -> Self {
        self.server_url = server_url.into().trim_end_matches('/').to_string();
        self
    }
}
