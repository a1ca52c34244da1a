//! Response normalization
//!
//! Stateless parsing functions that flatten raw API responses into the
//! typed structures in the crate root. All functions are total: malformed
//! or partially-missing input degrades to empty or default values, never an
//! error.

use serde_json::Value;

use crate::{
    ArticleInfo, PageDescriptor, SearchMetadata, SearchResult, StructuredDataBundle,
    StructuredDataCategory, Thumbnail,
};

/// Stateless parser for search API responses
pub struct SearchParser;

impl SearchParser {
    /// Extract normalized results from a response
    ///
    /// Returns an empty list when the response has no `items` collection.
    /// Nested pagemap substructures are read defensively: an absent
    /// substructure leaves the corresponding optional fields as `None`.
    pub fn extract_results(response: &Value) -> Vec<SearchResult> {
        let Some(items) = response.get("items").and_then(Value::as_array) else {
            return Vec::new();
        };

        items.iter().map(Self::parse_item).collect()
    }

    /// Extract search metadata from a response
    ///
    /// Count and timing fields coerce leniently: missing or non-numeric
    /// values become 0 / 0.0.
    pub fn extract_metadata(response: &Value) -> SearchMetadata {
        let info = response.get("searchInformation");

        SearchMetadata {
            kind: str_field(response, "kind"),
            url_type: response
                .pointer("/url/type")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            total_results: info.map(|v| u64_field(v, "totalResults")).unwrap_or(0),
            search_time: info.map(|v| f64_field(v, "searchTime")).unwrap_or(0.0),
            formatted_search_time: info
                .map(|v| str_field(v, "formattedSearchTime"))
                .unwrap_or_default(),
            formatted_total_results: info
                .map(|v| str_field(v, "formattedTotalResults"))
                .unwrap_or_default(),
            spelling_correction: response
                .pointer("/spelling/correctedQuery")
                .and_then(Value::as_str)
                .map(str::to_string),
            request: page_descriptor(response, "request"),
            next_page: page_descriptor(response, "nextPage"),
            previous_page: page_descriptor(response, "previousPage"),
        }
    }

    /// Extract categorized structured data from a response
    ///
    /// Scans every item's pagemap for each category's raw key and
    /// concatenates the matching records. The `images` category drops
    /// entries lacking a `src` field; every other category takes raw
    /// entries unfiltered. Empty categories are omitted from the bundle.
    pub fn extract_structured_data(response: &Value) -> StructuredDataBundle {
        let mut bundle = StructuredDataBundle::new();

        let Some(items) = response.get("items").and_then(Value::as_array) else {
            return bundle;
        };

        for category in StructuredDataCategory::ALL {
            let mut records = Vec::new();

            for item in items {
                let Some(entries) = item
                    .pointer(&format!("/pagemap/{}", category.pagemap_key()))
                    .and_then(Value::as_array)
                else {
                    continue;
                };

                for entry in entries {
                    if category == StructuredDataCategory::Images && entry.get("src").is_none() {
                        continue;
                    }
                    records.push(entry.clone());
                }
            }

            if !records.is_empty() {
                bundle.insert(category, records);
            }
        }

        bundle
    }

    fn parse_item(item: &Value) -> SearchResult {
        let pagemap = item.get("pagemap");

        // First metatags record, when present
        let metatags = pagemap
            .and_then(|p| p.get("metatags"))
            .and_then(Value::as_array)
            .and_then(|tags| tags.first());

        let thumbnail = pagemap
            .and_then(|p| p.get("cse_thumbnail"))
            .and_then(Value::as_array)
            .and_then(|thumbs| thumbs.first())
            .map(|thumb| Thumbnail {
                src: str_field(thumb, "src"),
                width: dimension_field(thumb, "width"),
                height: dimension_field(thumb, "height"),
            });

        let article = pagemap
            .and_then(|p| p.get("article"))
            .and_then(Value::as_array)
            .and_then(|articles| articles.first())
            .map(|article| ArticleInfo {
                published_time: str_field(article, "datepublished"),
                modified_time: str_field(article, "datemodified"),
                author: str_field(article, "author"),
                publisher: str_field(article, "publisher"),
            });

        SearchResult {
            title: str_field(item, "title"),
            link: str_field(item, "link"),
            display_link: str_field(item, "displayLink"),
            snippet: str_field(item, "snippet"),
            html_snippet: str_field(item, "htmlSnippet"),
            cache_id: item
                .get("cacheId")
                .and_then(Value::as_str)
                .map(str::to_string),
            formatted_url: str_field(item, "formattedUrl"),
            html_formatted_url: str_field(item, "htmlFormattedUrl"),
            meta_description: metatags
                .and_then(|m| fallback_str(m, "og:description", "description")),
            meta_title: metatags.and_then(|m| fallback_str(m, "og:title", "title")),
            meta_image: metatags
                .and_then(|m| m.get("og:image"))
                .and_then(Value::as_str)
                .map(str::to_string),
            thumbnail,
            article,
        }
    }
}

/// String field with empty-string default
fn str_field(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// First present of two string fields
fn fallback_str(value: &Value, primary: &str, fallback: &str) -> Option<String> {
    value
        .get(primary)
        .and_then(Value::as_str)
        .or_else(|| value.get(fallback).and_then(Value::as_str))
        .map(str::to_string)
}

/// Numeric field that the API may deliver as a string or a number
fn u64_field(value: &Value, key: &str) -> u64 {
    match value.get(key) {
        Some(Value::Number(n)) => n.as_u64().unwrap_or(0),
        Some(Value::String(s)) => s.parse().unwrap_or(0),
        _ => 0,
    }
}

/// Float field that the API may deliver as a string or a number
fn f64_field(value: &Value, key: &str) -> f64 {
    match value.get(key) {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Pixel dimension that the API delivers as a numeric string
fn dimension_field(value: &Value, key: &str) -> u32 {
    u64_field(value, key).min(u64::from(u32::MAX)) as u32
}

/// Read `queries.<kind>[0]` as a page descriptor
fn page_descriptor(response: &Value, kind: &str) -> Option<PageDescriptor> {
    let entry = response
        .pointer(&format!("/queries/{kind}"))
        .and_then(Value::as_array)
        .and_then(|pages| pages.first())?;

    Some(PageDescriptor {
        search_terms: str_field(entry, "searchTerms"),
        count: u64_field(entry, "count"),
        start_index: u64_field(entry, "startIndex"),
        total_results: u64_field(entry, "totalResults"),
    })
}
