//! Pagination helpers
//!
//! Two retrieval policies on top of the request executor:
//!
//! - [`Paginator::collect_up_to`] is best-effort: any error aborts the loop
//!   and returns whatever was accumulated so far.
//! - [`Paginator::get_page`] is single-shot and propagates errors unchanged
//!   (no partial-result concept applies to one page).

use serde::Serialize;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::SearchResult;

use super::config::MAX_RESULTS_PER_PAGE;
use super::params::SearchParams;
use super::response::SearchParser;
use super::{ClientResult, SearchClient};

/// Pagination summary for one page of results
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    /// The requested page (1-based)
    pub current_page: u32,
    /// Results per page
    pub per_page: u32,
    /// Estimated total result count
    pub total_results: u64,
    /// Total pages at `per_page` results each
    pub total_pages: u32,
    /// Whether a previous page exists
    pub has_previous: bool,
    /// Whether a next page exists
    pub has_next: bool,
    /// Previous page number, clamped to 1
    pub previous_page: u32,
    /// Next page number, clamped to the last page
    pub next_page: u32,
}

impl PageInfo {
    /// Compute pagination facts for a page position
    ///
    /// `total_pages` is `ceil(total_results / per_page)`; previous and next
    /// page numbers are clamped to `[1, total_pages]`.
    pub fn compute(page: u32, per_page: u32, total_results: u64) -> Self {
        let per_page = per_page.max(1);
        let total_pages = total_results
            .div_ceil(u64::from(per_page))
            .min(u64::from(u32::MAX)) as u32;

        Self {
            current_page: page,
            per_page,
            total_results,
            total_pages,
            has_previous: page > 1,
            has_next: page < total_pages,
            previous_page: page.saturating_sub(1).max(1),
            next_page: if total_pages > 0 {
                (page + 1).min(total_pages)
            } else {
                1
            },
        }
    }
}

/// Pagination driver over a [`SearchClient`]
pub struct Paginator;

impl Paginator {
    /// Collect up to `max_results` results, paging automatically
    ///
    /// Starts at offset 1 and advances by the number of results actually
    /// received. Stops on an empty round, a short round (end of the result
    /// set), or when `max_results` is reached. A voluntary pacing delay of
    /// `1/requests_per_second` runs between rounds when that quota is
    /// positive.
    ///
    /// Best-effort: any error aborts the loop and returns what was
    /// accumulated so far (logged, not raised).
    pub async fn collect_up_to(
        client: &SearchClient,
        params: &SearchParams,
        max_results: usize,
    ) -> Vec<SearchResult> {
        let mut all_results: Vec<SearchResult> = Vec::new();
        let per_round = max_results.min(MAX_RESULTS_PER_PAGE as usize);
        let mut start_index = 1u32;

        while all_results.len() < max_results {
            let round_params = params
                .clone()
                .start(start_index)
                .num(per_round as u32);

            let response = match client.search(&round_params).await {
                Ok(response) => response,
                Err(e) => {
                    warn!(
                        "Pagination aborted after {} results: {}",
                        all_results.len(),
                        e
                    );
                    break;
                }
            };

            let results = SearchParser::extract_results(&response);
            if results.is_empty() {
                debug!(
                    "Empty page at offset {}. Total results collected: {}",
                    start_index,
                    all_results.len()
                );
                break;
            }

            let received = results.len();
            debug!("Received {} results at offset {}", received, start_index);

            all_results.extend(results);
            start_index += received as u32;

            // Fewer results than requested signals the end of the set
            if received < per_round {
                break;
            }

            let per_second = client.config().requests_per_second;
            if per_second > 0 {
                sleep(Duration::from_secs_f64(1.0 / f64::from(per_second))).await;
            }
        }

        all_results.truncate(max_results);
        all_results
    }

    /// Fetch a single page of results with a pagination summary
    ///
    /// The offset is `(page - 1) * per_page + 1`. Errors propagate
    /// unchanged.
    pub async fn get_page(
        client: &SearchClient,
        params: &SearchParams,
        page: u32,
        per_page: u32,
    ) -> ClientResult<(Vec<SearchResult>, PageInfo)> {
        let page = page.max(1);
        let per_page = per_page.clamp(1, MAX_RESULTS_PER_PAGE);
        let start_index = (page - 1).saturating_mul(per_page).saturating_add(1);

        let response = client
            .search(&params.clone().start(start_index).num(per_page))
            .await?;

        let results = SearchParser::extract_results(&response);
        let metadata = SearchParser::extract_metadata(&response);

        Ok((
            results,
            PageInfo::compute(page, per_page, metadata.total_results),
        ))
    }
}
