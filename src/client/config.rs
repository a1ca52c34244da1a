//! Client configuration and defaults

use std::time::Duration;
use tracing::warn;

/// Base URL for the Custom Search API
pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/customsearch/v1";

/// Default request timeout in seconds.
/// 30 seconds covers slow responses on congested links without hanging
/// a caller indefinitely.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default maximum number of retries for failed requests.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default delay between retries in seconds.
/// Constant (not exponential): retries are bounded and short-lived, so a
/// fixed 2-second pause is enough for transient failures to clear.
pub const DEFAULT_RETRY_DELAY_SECS: u64 = 2;

/// Default daily request quota (free tier limit).
pub const DEFAULT_REQUESTS_PER_DAY: u32 = 100;

/// Default per-second request quota.
/// Keeps burst traffic well below what the API tolerates.
pub const DEFAULT_REQUESTS_PER_SECOND: u32 = 10;

/// Maximum results per request imposed by the API.
pub const MAX_RESULTS_PER_PAGE: u32 = 10;

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "GOOGLE_API_KEY";

/// Environment variable holding the search engine id
pub const SEARCH_ENGINE_ID_ENV: &str = "GOOGLE_CSE_ID";

const PLACEHOLDER_API_KEY: &str = "YOUR_API_KEY_HERE";
const PLACEHOLDER_SEARCH_ENGINE_ID: &str = "YOUR_SEARCH_ENGINE_ID_HERE";

/// Search client configuration
///
/// Carries credentials, transport settings, and rate-limit quotas. All
/// settings have defaults matching the API free tier; override them with
/// the builder-style methods.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API key
    pub api_key: String,
    /// Custom Search Engine id
    pub search_engine_id: String,
    /// API endpoint (overridable for testing against a mock server)
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// Maximum retries for failed requests (total attempts = max_retries + 1)
    pub max_retries: u32,
    /// Delay between retries for non-429 failures
    pub retry_delay: Duration,
    /// Daily request quota (hard ceiling, enforced client-side)
    pub requests_per_day: u32,
    /// Per-second request quota (0 disables per-second limiting)
    pub requests_per_second: u32,
}

impl ClientConfig {
    /// Create a configuration with explicit credentials and default settings
    pub fn new(api_key: impl Into<String>, search_engine_id: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            search_engine_id: search_engine_id.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay: Duration::from_secs(DEFAULT_RETRY_DELAY_SECS),
            requests_per_day: DEFAULT_REQUESTS_PER_DAY,
            requests_per_second: DEFAULT_REQUESTS_PER_SECOND,
        }
    }

    /// Create a configuration with credentials from the environment
    ///
    /// Reads `GOOGLE_API_KEY` and `GOOGLE_CSE_ID`. Missing variables fall
    /// back to placeholder values, which trigger a warning on client
    /// construction but are not an error.
    pub fn from_env() -> Self {
        let api_key =
            std::env::var(API_KEY_ENV).unwrap_or_else(|_| PLACEHOLDER_API_KEY.to_string());
        let search_engine_id = std::env::var(SEARCH_ENGINE_ID_ENV)
            .unwrap_or_else(|_| PLACEHOLDER_SEARCH_ENGINE_ID.to_string());
        Self::new(api_key, search_engine_id)
    }

    /// Override the API endpoint
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the per-request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the maximum retry count
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Override the delay between retries
    pub fn retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    /// Override the daily request quota
    pub fn requests_per_day(mut self, requests_per_day: u32) -> Self {
        self.requests_per_day = requests_per_day;
        self
    }

    /// Override the per-second request quota (0 disables per-second limiting)
    pub fn requests_per_second(mut self, requests_per_second: u32) -> Self {
        self.requests_per_second = requests_per_second;
        self
    }

    /// True when either credential still holds its placeholder value
    pub fn has_placeholder_credentials(&self) -> bool {
        self.api_key == PLACEHOLDER_API_KEY
            || self.search_engine_id == PLACEHOLDER_SEARCH_ENGINE_ID
    }

    /// Warn (non-fatally) about placeholder credentials
    pub fn warn_placeholder_credentials(&self) {
        if self.api_key == PLACEHOLDER_API_KEY {
            warn!(
                "Using placeholder API key. Set {API_KEY_ENV} or pass an explicit api_key."
            );
        }
        if self.search_engine_id == PLACEHOLDER_SEARCH_ENGINE_ID {
            warn!(
                "Using placeholder search engine id. Set {SEARCH_ENGINE_ID_ENV} or pass an explicit search_engine_id."
            );
        }
    }
}
