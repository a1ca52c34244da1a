//! Search client and request execution
//!
//! # Overview
//!
//! [`SearchClient`] composes the pieces of one API session:
//!
//! 1. **Parameters**: Describe a call with [`params::SearchParams`]
//! 2. **Rate Limiting**: Automatic throttling via [`rate_limit::RateLimiter`]
//! 3. **Execution**: Dispatch and retry through [`http::SearchHttpClient`]
//! 4. **Normalization**: Flatten responses with [`response::SearchParser`]
//! 5. **Pagination**: Multi-page retrieval via [`pagination::Paginator`]
//!
//! # Error Handling
//!
//! All operations return `Result<T, SearchError>`. A daily-quota rejection
//! and exhausted 429 retries both surface as
//! [`SearchError::RateLimitExceeded`]; every other exhausted failure is a
//! [`SearchError::RequestFailed`] wrapping the last underlying error.

use chrono::{NaiveDate, Utc};
use serde_json::Value;
use std::sync::Arc;

pub mod config;
pub mod http;
pub mod pagination;
pub mod params;
pub mod rate_limit;
pub mod response;
pub mod shared;

pub use config::ClientConfig;
pub use http::SearchHttpClient;
pub use pagination::{PageInfo, Paginator};
pub use rate_limit::{Admission, RateLimiter};

use params::{
    exclude_domains_query, file_types_query, multi_domain_query, AdvancedOperators, SearchParams,
    SiteSearchFilter,
};
use response::SearchParser;

/// Search client errors
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// Daily quota exhausted, or 429 retries exhausted
    #[error("rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Non-429 failure after all attempts were used
    #[error("search request failed after {attempts} attempts: {message}")]
    RequestFailed {
        /// Total attempts made (`max_retries + 1`)
        attempts: u32,
        /// Last underlying transport or HTTP error
        message: String,
    },

    /// Response body could not be decoded as JSON
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Invalid caller-supplied argument
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result type for search client operations
pub type ClientResult<T> = Result<T, SearchError>;

/// High-level search client
///
/// One instance owns its rate-limit state; the underlying HTTP transport
/// is shared process-wide for connection pooling.
pub struct SearchClient {
    http: SearchHttpClient,
}

impl SearchClient {
    /// Create a client from an explicit configuration
    ///
    /// Placeholder credentials produce a warning, not an error.
    pub fn new(config: ClientConfig) -> Self {
        config.warn_placeholder_credentials();

        let rate_limiter = Arc::new(RateLimiter::new(
            config.requests_per_day,
            config.requests_per_second,
        ));

        Self {
            http: SearchHttpClient::new(shared::http_client(), config, rate_limiter),
        }
    }

    /// Create a client with credentials from the environment
    pub fn from_env() -> Self {
        Self::new(ClientConfig::from_env())
    }

    /// The active configuration
    pub fn config(&self) -> &ClientConfig {
        self.http.config()
    }

    /// The rate limiter gating this client
    pub fn rate_limiter(&self) -> &Arc<RateLimiter> {
        self.http.rate_limiter()
    }

    /// Execute one search call, returning the raw JSON response
    ///
    /// Use [`response::SearchParser`] to flatten the result.
    pub async fn search(&self, params: &SearchParams) -> ClientResult<Value> {
        self.http.execute(params).await
    }

    /// Search within a date range
    ///
    /// Maps to the `sort=date:r:YYYYMMDD:YYYYMMDD` expression. An absent
    /// end date defaults to today.
    pub async fn search_by_date_range(
        &self,
        query: &str,
        start_date: NaiveDate,
        end_date: Option<NaiveDate>,
    ) -> ClientResult<Value> {
        let end_date = end_date.unwrap_or_else(|| Utc::now().date_naive());
        let sort = format!(
            "date:r:{}:{}",
            start_date.format("%Y%m%d"),
            end_date.format("%Y%m%d")
        );
        self.search(&SearchParams::new(query).sort(sort)).await
    }

    /// Search for results from a specific year (`dateRestrict=y<year>`)
    pub async fn search_by_year(&self, query: &str, year: i32) -> ClientResult<Value> {
        self.search(&SearchParams::new(query).date_restrict(format!("y{year}")))
            .await
    }

    /// Search within a single domain
    pub async fn search_site(&self, query: &str, domain: &str) -> ClientResult<Value> {
        self.search(
            &SearchParams::new(query)
                .site_search(domain)
                .site_search_filter(SiteSearchFilter::Include),
        )
        .await
    }

    /// Search across multiple domains (OR logic via `site:` operators)
    pub async fn search_multiple_domains(
        &self,
        query: &str,
        domains: &[String],
    ) -> ClientResult<Value> {
        self.search(&SearchParams::new(multi_domain_query(query, domains)))
            .await
    }

    /// Search excluding the given domains (`-site:` operators)
    pub async fn search_exclude_domains(
        &self,
        query: &str,
        domains: &[String],
    ) -> ClientResult<Value> {
        self.search(&SearchParams::new(exclude_domains_query(query, domains)))
            .await
    }

    /// Search for specific file types (OR logic via `filetype:` operators)
    pub async fn search_file_types(
        &self,
        query: &str,
        file_types: &[String],
    ) -> ClientResult<Value> {
        self.search(&SearchParams::new(file_types_query(query, file_types)))
            .await
    }

    /// Search with inline advanced operators applied to the query
    pub async fn search_with_operators(
        &self,
        query: &str,
        operators: &AdvancedOperators,
    ) -> ClientResult<Value> {
        self.search(&SearchParams::new(operators.apply(query))).await
    }

    /// Collect up to `max_results` normalized results, paging automatically
    ///
    /// Best-effort: errors abort the loop and return partial results.
    pub async fn collect_up_to(
        &self,
        params: &SearchParams,
        max_results: usize,
    ) -> Vec<crate::SearchResult> {
        Paginator::collect_up_to(self, params, max_results).await
    }

    /// Fetch a single page of normalized results with a pagination summary
    pub async fn get_page(
        &self,
        params: &SearchParams,
        page: u32,
        per_page: u32,
    ) -> ClientResult<(Vec<crate::SearchResult>, PageInfo)> {
        Paginator::get_page(self, params, page, per_page).await
    }

    /// Shorthand: search and return normalized results in one call
    pub async fn search_results(
        &self,
        params: &SearchParams,
    ) -> ClientResult<Vec<crate::SearchResult>> {
        let response = self.search(params).await?;
        Ok(SearchParser::extract_results(&response))
    }
}
