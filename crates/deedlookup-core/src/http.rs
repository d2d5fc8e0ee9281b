//! HTTP client with bounded retry and exponential backoff for
//! transient upstream failures.

use std::time::Duration;

use tracing::{debug, warn};

use crate::config::RetryPolicy;
use crate::error::{ResolveError, Result};

/// `reqwest` wrapper that retries transient server statuses and
/// transport failures up to a fixed budget, sleeping exponentially
/// longer between attempts.
///
/// Non-transient HTTP statuses fail immediately. Budget exhaustion
/// surfaces as [`ResolveError::Exhausted`]; callers translate terminal
/// errors into `status = error` results.
pub struct RetryingHttpClient {
    client: reqwest::Client,
    policy: RetryPolicy,
}

impl RetryingHttpClient {
    /// Build a client with the given per-request timeout bound.
    pub fn new(timeout: Duration, policy: RetryPolicy) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("deedlookup/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(RetryingHttpClient { client, policy })
    }

    /// POST form-encoded fields and return the response body text.
    pub async fn post_form(&self, url: &str, fields: &[(&str, &str)]) -> Result<String> {
        let response = self
            .execute(url, || self.client.post(url).form(fields))
            .await?;
        Ok(response.text().await?)
    }

    /// GET a binary document.
    pub async fn get_bytes(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.execute(url, || self.client.get(url)).await?;
        Ok(response.bytes().await?.to_vec())
    }

    async fn execute<F>(&self, url: &str, build: F) -> Result<reqwest::Response>
    where
        F: Fn() -> reqwest::RequestBuilder,
    {
        let mut last_failure = String::new();
        for attempt in 1..=self.policy.max_attempts {
            if attempt > 1 {
                let delay = self.policy.backoff(attempt - 1);
                debug!("retrying {} (attempt {}) after {:?}", url, attempt, delay);
                tokio::time::sleep(delay).await;
            }
            match build().send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return Ok(response);
                    }
                    if !self.policy.is_retryable(status.as_u16()) {
                        return Err(ResolveError::HttpStatus {
                            status: status.as_u16(),
                            url: url.to_string(),
                        });
                    }
                    warn!("transient status {} from {}", status, url);
                    last_failure = format!("status {status}");
                }
                Err(err) => {
                    // Connect errors and timeouts share the retry budget.
                    warn!("request to {} failed: {}", url, err);
                    last_failure = err.to_string();
                }
            }
        }
        Err(ResolveError::Exhausted {
            attempts: self.policy.max_attempts,
            url: url.to_string(),
            last: last_failure,
        })
    }
}
