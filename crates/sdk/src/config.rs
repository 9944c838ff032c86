//! Client configuration.

use crate::error::{ApiError, ApiResult};
use std::time::Duration;

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL for the admin API.
    pub base_url: String,

    /// Bearer token for authentication.
    pub bearer_token: Option<String>,

    /// Request timeout.
    pub timeout: Duration,

    /// Retry attempts for idempotent GET requests. Mutations are never
    /// retried automatically.
    pub retry_count: u32,

    /// Initial backoff duration for retries.
    pub retry_initial_backoff: Duration,

    /// Maximum backoff duration for retries.
    pub retry_max_backoff: Duration,

    /// User agent string.
    pub user_agent: String,

    /// Enable request/response logging.
    pub debug: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: crate::DEFAULT_API_URL.to_string(),
            bearer_token: None,
            timeout: Duration::from_secs(30),
            retry_count: 3,
            retry_initial_backoff: Duration::from_millis(100),
            retry_max_backoff: Duration::from_secs(10),
            user_agent: format!("study-console-sdk/{}", crate::VERSION),
            debug: false,
        }
    }
}

impl ClientConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Supported variables:
    /// - `STUDY_CONSOLE_API_URL`: base URL for the admin API
    /// - `STUDY_CONSOLE_TOKEN`: bearer token
    /// - `STUDY_CONSOLE_TIMEOUT`: request timeout in seconds
    /// - `STUDY_CONSOLE_DEBUG`: enable debug logging
    pub fn from_env() -> ApiResult<Self> {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("STUDY_CONSOLE_API_URL") {
            config.base_url = url;
        }

        if let Ok(token) = std::env::var("STUDY_CONSOLE_TOKEN") {
            config.bearer_token = Some(token);
        }

        if let Ok(timeout) = std::env::var("STUDY_CONSOLE_TIMEOUT") {
            let secs: u64 = timeout.parse().map_err(|_| ApiError::Config {
                message: format!("Invalid timeout value: {timeout}"),
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        if std::env::var("STUDY_CONSOLE_DEBUG").is_ok() {
            config.debug = true;
        }

        Ok(config)
    }

    /// Set the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the bearer token.
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the GET retry count.
    pub fn with_retry_count(mut self, count: u32) -> Self {
        self.retry_count = count;
        self
    }

    /// Enable debug mode.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> ApiResult<()> {
        if self.base_url.is_empty() {
            return Err(ApiError::Config {
                message: "Base URL cannot be empty".to_string(),
            });
        }

        url::Url::parse(&self.base_url).map_err(|e| ApiError::Config {
            message: format!("Invalid base URL: {e}"),
        })?;

        Ok(())
    }

    /// Authorization header value, if a token is configured.
    pub fn auth_header(&self) -> Option<String> {
        self.bearer_token
            .as_ref()
            .map(|token| format!("Bearer {token}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, crate::DEFAULT_API_URL);
        assert!(config.bearer_token.is_none());
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.retry_count, 3);
    }

    #[test]
    fn test_config_builder() {
        let config = ClientConfig::new()
            .with_base_url("https://admin.example.com")
            .with_bearer_token("tok")
            .with_timeout(Duration::from_secs(60))
            .with_retry_count(5)
            .with_debug(true);

        assert_eq!(config.base_url, "https://admin.example.com");
        assert_eq!(config.bearer_token, Some("tok".to_string()));
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.retry_count, 5);
        assert!(config.debug);
    }

    #[test]
    fn test_auth_header() {
        let config = ClientConfig::new().with_bearer_token("tok");
        assert_eq!(config.auth_header(), Some("Bearer tok".to_string()));
        assert_eq!(ClientConfig::new().auth_header(), None);
    }

    #[test]
    fn test_config_validation() {
        assert!(ClientConfig::new().validate().is_ok());
        assert!(ClientConfig::new().with_base_url("").validate().is_err());
        assert!(ClientConfig::new()
            .with_base_url("not-a-url")
            .validate()
            .is_err());
    }
}
