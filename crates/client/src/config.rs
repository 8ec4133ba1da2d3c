//! Configuration types for the Desk client.

use std::time::Duration;
use url::Url;

/// Tenant-neutral settings for reaching the Desk API.
///
/// Holds no credential, so one value can be shared by every request; the
/// credential is bound later when a [`crate::DeskClient`] is built.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the Desk API, always ending with `/`.
    pub base_url: Url,
    /// Request timeout.
    pub timeout: Duration,
    /// Retry configuration.
    pub retry_config: RetryConfig,
    /// User agent sent with every request.
    pub user_agent: String,
}

impl ClientConfig {
    /// Create a new configuration with the given base URL.
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url: with_trailing_slash(base_url),
            timeout: Duration::from_secs(30),
            retry_config: RetryConfig::default(),
            user_agent: format!("deskgate/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// `Url::join` replaces the last segment unless the base ends with a slash.
pub(crate) fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

/// Configuration for retry behavior.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retries.
    pub max_retries: u32,
    /// Initial backoff duration.
    pub initial_backoff: Duration,
    /// Maximum backoff duration.
    pub max_backoff: Duration,
    /// Backoff multiplier.
    pub backoff_multiplier: f64,
    /// HTTP status codes to retry on.
    pub retry_on_status_codes: Vec<u16>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 2,
            initial_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_secs(5),
            backoff_multiplier: 2.0,
            retry_on_status_codes: vec![429, 500, 502, 503, 504],
        }
    }
}

impl RetryConfig {
    /// Create a configuration with no retries.
    pub fn no_retry() -> Self {
        Self {
            max_retries: 0,
            ..Default::default()
        }
    }

    /// Calculate backoff duration for a given attempt.
    pub fn backoff_for_attempt(&self, attempt: u32) -> Duration {
        let backoff_ms = self.initial_backoff.as_millis() as f64
            * self.backoff_multiplier.powi(attempt as i32);
        let backoff = Duration::from_millis(backoff_ms as u64);
        std::cmp::min(backoff, self.max_backoff)
    }

    /// Check if a status code should trigger a retry.
    pub fn should_retry_status(&self, status: u16) -> bool {
        self.retry_on_status_codes.contains(&status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_calculation() {
        let config = RetryConfig::default();

        assert_eq!(config.backoff_for_attempt(0), Duration::from_millis(100));
        assert_eq!(config.backoff_for_attempt(1), Duration::from_millis(200));
        assert_eq!(config.backoff_for_attempt(2), Duration::from_millis(400));
    }

    #[test]
    fn test_backoff_capped_at_max() {
        let config = RetryConfig {
            max_backoff: Duration::from_millis(500),
            ..Default::default()
        };

        assert_eq!(config.backoff_for_attempt(10), Duration::from_millis(500));
    }

    #[test]
    fn test_should_retry_status() {
        let config = RetryConfig::default();

        assert!(config.should_retry_status(429));
        assert!(config.should_retry_status(503));
        assert!(!config.should_retry_status(400));
        assert!(!config.should_retry_status(404));
    }

    #[test]
    fn test_client_config_adds_trailing_slash() {
        let config = ClientConfig::new(Url::parse("https://desk.example.com/api/v2").unwrap());
        assert_eq!(config.base_url.as_str(), "https://desk.example.com/api/v2/");

        let config = ClientConfig::new(Url::parse("https://desk.example.com").unwrap());
        assert_eq!(config.base_url.as_str(), "https://desk.example.com/");
    }

    #[test]
    fn test_client_config_defaults() {
        let config = ClientConfig::new(Url::parse("https://desk.example.com").unwrap());

        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.retry_config.max_retries, 2);
        assert!(config.user_agent.starts_with("deskgate/"));
    }
}
