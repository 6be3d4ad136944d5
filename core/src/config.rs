//! Client Configuration
//!
//! Connection and behavior settings for the finchat client, with
//! environment-variable overrides so deployments can point at a different
//! backend without recompiling.

use std::time::Duration;

/// Client configuration
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Backend host
    pub host: String,
    /// Backend port
    pub port: u16,
    /// Timeout for ask/initialize requests (RAG answers can be slow)
    pub request_timeout: Duration,
    /// Timeout for the lightweight status probe
    pub status_timeout: Duration,
    /// Whether to probe backend readiness on startup
    pub probe_on_start: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5000,
            request_timeout: Duration::from_secs(120),
            status_timeout: Duration::from_secs(5),
            probe_on_start: true,
        }
    }
}

impl ClientConfig {
    /// Create configuration from environment variables
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: std::env::var("FINCHAT_HOST").unwrap_or(defaults.host),
            port: std::env::var("FINCHAT_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
            request_timeout: std::env::var("FINCHAT_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map_or(defaults.request_timeout, Duration::from_secs),
            status_timeout: defaults.status_timeout,
            probe_on_start: std::env::var("FINCHAT_SKIP_PROBE")
                .map(|v| v != "1" && v.to_lowercase() != "true")
                .unwrap_or(true),
        }
    }

    /// The backend base URL
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 5000);
        assert_eq!(config.base_url(), "http://localhost:5000");
        assert!(config.probe_on_start);
    }
}
