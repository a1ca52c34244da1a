//! Request execution
//!
//! Single entry point for dispatching one API call: rate-limit admission,
//! GET through the shared transport, outcome classification, and a bounded
//! retry loop.
//!
//! Two distinct rate-limit paths exist on purpose: a daily-quota rejection
//! is terminal (retrying cannot help within the same window), while a 429
//! response is retryable with the server-suggested `Retry-After` delay.

use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use super::config::ClientConfig;
use super::params::SearchParams;
use super::rate_limit::{format_reset_wait, Admission, RateLimiter};
use super::{ClientResult, SearchError};

/// HTTP executor for search API calls
pub struct SearchHttpClient {
    client: Arc<Client>,
    config: ClientConfig,
    rate_limiter: Arc<RateLimiter>,
}

impl SearchHttpClient {
    /// Create a new executor
    ///
    /// # Arguments
    /// * `client` - Shared HTTP client (Arc for cheap cloning)
    /// * `config` - Credentials, endpoint, timeout, retry and quota settings
    /// * `rate_limiter` - Shared rate limiter gating every outbound call
    pub fn new(client: Arc<Client>, config: ClientConfig, rate_limiter: Arc<RateLimiter>) -> Self {
        Self {
            client,
            config,
            rate_limiter,
        }
    }

    /// The active configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The rate limiter gating this executor
    pub fn rate_limiter(&self) -> &Arc<RateLimiter> {
        &self.rate_limiter
    }

    /// Execute one search call
    ///
    /// # Returns
    /// The decoded JSON response body
    ///
    /// # Errors
    /// * [`SearchError::RateLimitExceeded`] when the daily quota is
    ///   exhausted, or when 429 retries are exhausted
    /// * [`SearchError::RequestFailed`] when all attempts at a non-429
    ///   failure are exhausted
    pub async fn execute(&self, params: &SearchParams) -> ClientResult<Value> {
        self.admit().await?;

        let query = params.to_query(&self.config);
        let max_attempts = self.config.max_retries + 1;
        let mut last_error = String::new();

        for attempt in 1..=max_attempts {
            debug!(
                "GET {} (attempt {}/{}, {} params)",
                self.config.base_url,
                attempt,
                max_attempts,
                query.len()
            );

            let send_result = self
                .client
                .get(&self.config.base_url)
                .query(&query)
                .timeout(self.config.timeout)
                .send()
                .await;

            match send_result {
                Ok(response) => {
                    // Any response counts against the upstream quota,
                    // success or failure
                    self.rate_limiter.record_request();

                    let status = response.status();

                    if status.is_success() {
                        return response
                            .json::<Value>()
                            .await
                            .map_err(|e| SearchError::InvalidResponse(e.to_string()));
                    }

                    if status == StatusCode::TOO_MANY_REQUESTS {
                        let retry_after = parse_retry_after(response.headers())
                            .unwrap_or(self.config.retry_delay);

                        if attempt < max_attempts {
                            info!(
                                "Rate limited (429), retrying in {:.0}s (attempt {}/{})",
                                retry_after.as_secs_f64(),
                                attempt,
                                max_attempts
                            );
                            sleep(retry_after).await;
                            continue;
                        }

                        return Err(SearchError::RateLimitExceeded(format!(
                            "rate limit exceeded and {} retries exhausted",
                            self.config.max_retries
                        )));
                    }

                    last_error = format!("HTTP status {status}");
                    warn!(
                        "Request failed with {} (attempt {}/{})",
                        status, attempt, max_attempts
                    );
                }
                Err(e) => {
                    // The request never produced a response, so nothing is
                    // recorded against the quota
                    last_error = e.to_string();
                    warn!(
                        "Request error on attempt {}/{}: {}",
                        attempt, max_attempts, e
                    );
                }
            }

            if attempt < max_attempts {
                debug!("Retrying in {:?}", self.config.retry_delay);
                sleep(self.config.retry_delay).await;
            }
        }

        Err(SearchError::RequestFailed {
            attempts: max_attempts,
            message: last_error,
        })
    }

    /// Wait out the per-second window, or fail fast on daily exhaustion
    async fn admit(&self) -> ClientResult<()> {
        loop {
            match self.rate_limiter.admit() {
                Admission::Proceed => return Ok(()),
                Admission::ProceedAfterDelay(wait) => {
                    debug!(
                        "Per-second window full, waiting {:.3}s before dispatch",
                        wait.as_secs_f64()
                    );
                    sleep(wait).await;
                    // Loop re-admits, which re-prunes the window after waking
                }
                Admission::Reject { retry_after } => {
                    return Err(SearchError::RateLimitExceeded(format!(
                        "daily request limit of {} exceeded, resets in {}",
                        self.rate_limiter.requests_per_day(),
                        format_reset_wait(retry_after)
                    )));
                }
            }
        }
    }
}

/// Read a `Retry-After` value (whole seconds) from response headers
fn parse_retry_after(headers: &reqwest::header::HeaderMap) -> Option<Duration> {
    let value = headers.get(reqwest::header::RETRY_AFTER)?.to_str().ok()?;
    value.parse::<u64>().ok().map(Duration::from_secs)
}
