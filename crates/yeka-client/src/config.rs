//! Client configuration.

use std::env;
use std::time::Duration;

/// Production API root.
pub const DEFAULT_BASE_URL: &str = "https://yeka.aromaxtrading.com/api";

/// Environment variable that overrides the API root.
pub const BASE_URL_ENV: &str = "YEKA_API_BASE";

/// Requests that take longer than this are abandoned.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(10_000);

/// Connection settings for [`crate::ApiClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    /// Send and store session cookies with every request.
    pub with_credentials: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            with_credentials: true,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Read the base URL from the environment, falling back to the
    /// production root.
    pub fn from_env() -> Self {
        let base_url = env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(base_url)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_millis(10_000));
        assert!(config.with_credentials);
    }

    #[test]
    fn test_with_timeout() {
        let config = ClientConfig::new("http://localhost:3000/api")
            .with_timeout(Duration::from_secs(1));
        assert_eq!(config.timeout, Duration::from_secs(1));
    }
}
