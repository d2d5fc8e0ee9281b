//! Run configuration: portal endpoints, timeouts, and the retry policy.

use std::path::PathBuf;
use std::time::Duration;

/// Retry behavior for the shared HTTP client.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts per logical request, first try included.
    pub max_attempts: u32,
    /// Backoff before retry `n` is `base_delay * 2^(n-1)`.
    pub base_delay: Duration,
    /// HTTP statuses treated as transient.
    pub retry_statuses: Vec<u16>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
            retry_statuses: vec![500, 502, 503, 504],
        }
    }
}

impl RetryPolicy {
    /// Whether a status code warrants another attempt.
    pub fn is_retryable(&self, status: u16) -> bool {
        self.retry_statuses.contains(&status)
    }

    /// Delay before the given 1-based retry.
    pub fn backoff(&self, retry: u32) -> Duration {
        self.base_delay * 2u32.saturating_pow(retry.saturating_sub(1))
    }
}

/// Fixed endpoints and tunables for one resolution run.
///
/// Defaults point at the live municipal sources; tests point the URLs
/// at local fixtures or closed ports. Passed to the orchestrator at
/// construction time.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    pub clarkstown_portal_url: String,
    pub orangetown_portal_url: String,
    pub ramapo_search_url: String,
    /// WebDriver endpoint the browser strategy connects to.
    pub webdriver_url: String,
    pub stony_point_roll_url: String,
    /// Local cache for the downloaded assessment roll; reused when the
    /// file already exists.
    pub roll_cache_path: PathBuf,
    /// Per-request timeout bound for all outbound HTTP.
    pub request_timeout: Duration,
    pub retry: RetryPolicy,
    /// How long the browser strategy waits for results to render.
    pub browser_wait: Duration,
    /// Pause between successive browser lookups.
    pub inter_request_delay: Duration,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        ResolverConfig {
            clarkstown_portal_url: "https://www.townofclarkstown.org/cn/TaxSearch/index.cfm"
                .to_string(),
            orangetown_portal_url:
                "https://www.orangetown.com/departments/receiver-of-taxes/tax-bill-search/"
                    .to_string(),
            ramapo_search_url: "https://ramapo.prosgar.com/".to_string(),
            webdriver_url: "http://localhost:4444".to_string(),
            stony_point_roll_url: "https://www.townofstonypoint.org/files/assessment_roll.xlsx"
                .to_string(),
            roll_cache_path: PathBuf::from("stony_point_roll.xlsx"),
            request_timeout: Duration::from_secs(15),
            retry: RetryPolicy::default(),
            browser_wait: Duration::from_secs(5),
            inter_request_delay: Duration::from_secs(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_values() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 3);
        assert!(policy.is_retryable(500));
        assert!(policy.is_retryable(503));
        assert!(!policy.is_retryable(404));
        assert!(!policy.is_retryable(200));
    }

    #[test]
    fn test_backoff_doubles() {
        let policy = RetryPolicy {
            base_delay: Duration::from_millis(100),
            ..RetryPolicy::default()
        };
        assert_eq!(policy.backoff(1), Duration::from_millis(100));
        assert_eq!(policy.backoff(2), Duration::from_millis(200));
        assert_eq!(policy.backoff(3), Duration::from_millis(400));
    }

    #[test]
    fn test_default_config_bounds() {
        let config = ResolverConfig::default();
        assert_eq!(config.request_timeout, Duration::from_secs(15));
        assert_eq!(config.browser_wait, Duration::from_secs(5));
        assert_eq!(config.inter_request_delay, Duration::from_secs(1));
    }
}
