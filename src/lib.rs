//! # Web Search Client Library
//!
//! A client library for the Google Custom Search JSON API. Designed for
//! programmatic web search with result normalization, pagination, and
//! built-in rate limiting.
//!
//! ## Features
//!
//! - **Full Query Surface**: All documented Custom Search parameters plus
//!   arbitrary caller-supplied extras with last-write-wins precedence
//! - **Rate Limiting**: Client-side throttling over a rolling per-second
//!   window and a daily request quota
//! - **Retry Logic**: Bounded retries with `Retry-After` support for 429
//!   responses and a constant delay for transient failures
//! - **Response Normalization**: Flat typed results, search metadata, and
//!   categorized structured data extracted from nested API responses
//! - **Pagination**: Best-effort multi-page collection and single-page
//!   retrieval with pagination summaries
//!
//! ## Quick Start
//!
//! ```no_run
//! use web_search_client::client::SearchClient;
//! use web_search_client::client::params::SearchParams;
//! use web_search_client::client::response::SearchParser;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Credentials from GOOGLE_API_KEY / GOOGLE_CSE_ID environment variables
//! let client = SearchClient::from_env();
//!
//! let params = SearchParams::new("rust async runtime");
//! let response = client.search(&params).await?;
//!
//! for result in SearchParser::extract_results(&response) {
//!     println!("{} - {}", result.title, result.link);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`client`] - Search client, request execution, rate limiting
//! - [`client::params`] - Query parameter assembly
//! - [`client::response`] - Response normalization
//! - [`client::pagination`] - Pagination helpers
//! - [`cli`] - CLI command implementations
//!
//! ## Data Types
//!
//! - [`SearchResult`] - Normalized search result with optional page metadata
//! - [`SearchMetadata`] - Counts, timings, spelling correction, pagination
//!   descriptors
//! - [`StructuredDataCategory`] - Categories of embedded structured data

#![warn(missing_docs)]
#![warn(clippy::all)]

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Search client, request execution, and rate limiting
pub mod client;

/// CLI command implementations
pub mod cli;

// Re-export commonly used types
pub use client::{ClientConfig, SearchClient, SearchError};

/// Thumbnail image attached to a search result
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Thumbnail {
    /// Thumbnail source URL
    pub src: String,
    /// Width in pixels (0 when the API omits or mangles it)
    pub width: u32,
    /// Height in pixels (0 when the API omits or mangles it)
    pub height: u32,
}

/// Article metadata attached to a search result
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArticleInfo {
    /// Publication timestamp as reported by the page markup
    pub published_time: String,
    /// Last-modified timestamp as reported by the page markup
    pub modified_time: String,
    /// Article author
    pub author: String,
    /// Article publisher
    pub publisher: String,
}

/// Normalized search result
///
/// Flattened from one entry of the raw `items` collection. Nested page
/// metadata is optional: absent substructures leave the corresponding
/// fields as `None`, never an error.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResult {
    /// Result title
    pub title: String,
    /// Result URL
    pub link: String,
    /// Abbreviated display URL
    pub display_link: String,
    /// Plain-text snippet
    pub snippet: String,
    /// HTML-formatted snippet
    pub html_snippet: String,
    /// Cache identifier, when the API provides one
    pub cache_id: Option<String>,
    /// Formatted URL
    pub formatted_url: String,
    /// HTML-formatted URL
    pub html_formatted_url: String,
    /// `og:description` (falling back to `description`) from page metatags
    pub meta_description: Option<String>,
    /// `og:title` (falling back to `title`) from page metatags
    pub meta_title: Option<String>,
    /// `og:image` from page metatags
    pub meta_image: Option<String>,
    /// Thumbnail from the `cse_thumbnail` pagemap entry
    pub thumbnail: Option<Thumbnail>,
    /// Article metadata from the `article` pagemap entry
    pub article: Option<ArticleInfo>,
}

/// Descriptor for one page of a query (request, next page, previous page)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PageDescriptor {
    /// Search terms the page was requested with
    pub search_terms: String,
    /// Number of results on the page
    pub count: u64,
    /// 1-based index of the first result on the page
    pub start_index: u64,
    /// Total result estimate at the time of the request
    pub total_results: u64,
}

/// Search response metadata
///
/// Numeric fields coerce leniently: missing or non-numeric values become
/// 0 / 0.0 rather than an error.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchMetadata {
    /// Resource kind reported by the API
    pub kind: String,
    /// URL template type
    pub url_type: String,
    /// Estimated total result count
    pub total_results: u64,
    /// Server-side search time in seconds
    pub search_time: f64,
    /// Human-formatted search time
    pub formatted_search_time: String,
    /// Human-formatted total result count
    pub formatted_total_results: String,
    /// Corrected query when the API suggests a spelling fix
    pub spelling_correction: Option<String>,
    /// Descriptor of the executed request
    pub request: Option<PageDescriptor>,
    /// Descriptor of the next page, when one exists
    pub next_page: Option<PageDescriptor>,
    /// Descriptor of the previous page, when one exists
    pub previous_page: Option<PageDescriptor>,
}

/// Categories of structured data embedded in search results
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StructuredDataCategory {
    /// Images (`cse_image` pagemap entries)
    Images,
    /// Videos (`videoobject` pagemap entries)
    Videos,
    /// People (`person` pagemap entries)
    People,
    /// Organizations (`organization` pagemap entries)
    Organizations,
    /// Locations (`place` pagemap entries)
    Locations,
    /// Events (`event` pagemap entries)
    Events,
    /// Products (`product` pagemap entries)
    Products,
    /// Reviews (`review` pagemap entries)
    Reviews,
}

impl StructuredDataCategory {
    /// All categories, in bundle order
    pub const ALL: [StructuredDataCategory; 8] = [
        StructuredDataCategory::Images,
        StructuredDataCategory::Videos,
        StructuredDataCategory::People,
        StructuredDataCategory::Organizations,
        StructuredDataCategory::Locations,
        StructuredDataCategory::Events,
        StructuredDataCategory::Products,
        StructuredDataCategory::Reviews,
    ];

    /// The raw pagemap key this category is collected from
    pub fn pagemap_key(&self) -> &'static str {
        match self {
            StructuredDataCategory::Images => "cse_image",
            StructuredDataCategory::Videos => "videoobject",
            StructuredDataCategory::People => "person",
            StructuredDataCategory::Organizations => "organization",
            StructuredDataCategory::Locations => "place",
            StructuredDataCategory::Events => "event",
            StructuredDataCategory::Products => "product",
            StructuredDataCategory::Reviews => "review",
        }
    }
}

impl std::fmt::Display for StructuredDataCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            StructuredDataCategory::Images => "images",
            StructuredDataCategory::Videos => "videos",
            StructuredDataCategory::People => "people",
            StructuredDataCategory::Organizations => "organizations",
            StructuredDataCategory::Locations => "locations",
            StructuredDataCategory::Events => "events",
            StructuredDataCategory::Products => "products",
            StructuredDataCategory::Reviews => "reviews",
        };
        write!(f, "{s}")
    }
}

impl FromStr for StructuredDataCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "images" => Ok(StructuredDataCategory::Images),
            "videos" => Ok(StructuredDataCategory::Videos),
            "people" => Ok(StructuredDataCategory::People),
            "organizations" => Ok(StructuredDataCategory::Organizations),
            "locations" => Ok(StructuredDataCategory::Locations),
            "events" => Ok(StructuredDataCategory::Events),
            "products" => Ok(StructuredDataCategory::Products),
            "reviews" => Ok(StructuredDataCategory::Reviews),
            _ => Err(format!("Invalid structured data category: {s}")),
        }
    }
}

/// Categorized structured data extracted from a response
///
/// Categories with zero records are omitted from the map.
pub type StructuredDataBundle = BTreeMap<StructuredDataCategory, Vec<serde_json::Value>>;
