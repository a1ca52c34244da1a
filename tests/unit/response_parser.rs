//! Unit tests for response normalization

use serde_json::{json, Value};
use web_search_client::client::response::SearchParser;
use web_search_client::StructuredDataCategory;

/// A realistic response with one fully-populated item and one bare item
fn sample_response() -> Value {
    json!({
        "kind": "customsearch#search",
        "url": { "type": "application/json" },
        "searchInformation": {
            "searchTime": 0.412,
            "formattedSearchTime": "0.41",
            "totalResults": "128000",
            "formattedTotalResults": "128,000"
        },
        "spelling": { "correctedQuery": "rust async runtime" },
        "queries": {
            "request": [{
                "searchTerms": "rust asinc runtime",
                "count": 10,
                "startIndex": 1,
                "totalResults": "128000"
            }],
            "nextPage": [{
                "searchTerms": "rust asinc runtime",
                "count": 10,
                "startIndex": 11,
                "totalResults": "128000"
            }]
        },
        "items": [
            {
                "title": "Tokio - An asynchronous Rust runtime",
                "link": "https://tokio.rs/",
                "displayLink": "tokio.rs",
                "snippet": "Tokio is an asynchronous runtime...",
                "htmlSnippet": "<b>Tokio</b> is an asynchronous runtime...",
                "cacheId": "abc123",
                "formattedUrl": "https://tokio.rs/",
                "htmlFormattedUrl": "https://<b>tokio</b>.rs/",
                "pagemap": {
                    "metatags": [{
                        "og:title": "Tokio",
                        "og:description": "Build reliable network applications",
                        "og:image": "https://tokio.rs/og.png"
                    }],
                    "cse_thumbnail": [{
                        "src": "https://example.com/thumb.png",
                        "width": "225",
                        "height": "225"
                    }],
                    "article": [{
                        "datepublished": "2023-01-15",
                        "datemodified": "2023-06-01",
                        "author": "Tokio Team",
                        "publisher": "tokio.rs"
                    }],
                    "cse_image": [
                        { "src": "https://example.com/a.png" },
                        { "note": "entry without a source url" }
                    ],
                    "person": [{ "name": "Carl Lerche" }]
                }
            },
            {
                "title": "async-std",
                "link": "https://async.rs/",
                "displayLink": "async.rs",
                "snippet": "Async version of the Rust standard library",
                "htmlSnippet": "Async version...",
                "formattedUrl": "https://async.rs/",
                "htmlFormattedUrl": "https://async.rs/"
            }
        ]
    })
}

#[test]
fn test_extract_results_full_item() {
    let results = SearchParser::extract_results(&sample_response());
    assert_eq!(results.len(), 2);

    let first = &results[0];
    assert_eq!(first.title, "Tokio - An asynchronous Rust runtime");
    assert_eq!(first.link, "https://tokio.rs/");
    assert_eq!(first.display_link, "tokio.rs");
    assert_eq!(first.cache_id.as_deref(), Some("abc123"));
    assert_eq!(
        first.meta_description.as_deref(),
        Some("Build reliable network applications")
    );
    assert_eq!(first.meta_title.as_deref(), Some("Tokio"));
    assert_eq!(first.meta_image.as_deref(), Some("https://tokio.rs/og.png"));

    let thumbnail = first.thumbnail.as_ref().expect("thumbnail present");
    assert_eq!(thumbnail.src, "https://example.com/thumb.png");
    assert_eq!(thumbnail.width, 225);
    assert_eq!(thumbnail.height, 225);

    let article = first.article.as_ref().expect("article present");
    assert_eq!(article.published_time, "2023-01-15");
    assert_eq!(article.author, "Tokio Team");
}

#[test]
fn test_extract_results_bare_item_degrades_to_defaults() {
    let results = SearchParser::extract_results(&sample_response());

    let second = &results[1];
    assert_eq!(second.title, "async-std");
    assert_eq!(second.cache_id, None);
    assert_eq!(second.meta_description, None);
    assert_eq!(second.thumbnail, None);
    assert_eq!(second.article, None);
}

#[test]
fn test_extract_results_empty_items() {
    assert!(SearchParser::extract_results(&json!({ "items": [] })).is_empty());
}

#[test]
fn test_extract_results_missing_items() {
    assert!(SearchParser::extract_results(&json!({})).is_empty());
    assert!(SearchParser::extract_results(&json!(null)).is_empty());
    assert!(SearchParser::extract_results(&json!({ "items": "oops" })).is_empty());
}

#[test]
fn test_metatag_description_fallback() {
    let response = json!({
        "items": [{
            "title": "t",
            "pagemap": {
                "metatags": [{ "description": "plain description" }]
            }
        }]
    });
    let results = SearchParser::extract_results(&response);
    assert_eq!(
        results[0].meta_description.as_deref(),
        Some("plain description")
    );
    assert_eq!(results[0].meta_image, None);
}

#[test]
fn test_extract_metadata_fields() {
    let metadata = SearchParser::extract_metadata(&sample_response());

    assert_eq!(metadata.kind, "customsearch#search");
    assert_eq!(metadata.url_type, "application/json");
    assert_eq!(metadata.total_results, 128_000);
    assert!((metadata.search_time - 0.412).abs() < f64::EPSILON);
    assert_eq!(metadata.formatted_total_results, "128,000");
    assert_eq!(
        metadata.spelling_correction.as_deref(),
        Some("rust async runtime")
    );

    let request = metadata.request.expect("request descriptor present");
    assert_eq!(request.search_terms, "rust asinc runtime");
    assert_eq!(request.start_index, 1);
    assert_eq!(request.total_results, 128_000);

    let next = metadata.next_page.expect("next page descriptor present");
    assert_eq!(next.start_index, 11);
    assert!(metadata.previous_page.is_none());
}

#[test]
fn test_extract_metadata_coerces_missing_to_defaults() {
    let metadata = SearchParser::extract_metadata(&json!({}));

    assert_eq!(metadata.kind, "");
    assert_eq!(metadata.total_results, 0);
    assert_eq!(metadata.search_time, 0.0);
    assert!(metadata.spelling_correction.is_none());
    assert!(metadata.request.is_none());
}

#[test]
fn test_extract_metadata_coerces_non_numeric_to_defaults() {
    let metadata = SearchParser::extract_metadata(&json!({
        "searchInformation": {
            "totalResults": "many",
            "searchTime": { "nested": true }
        }
    }));

    assert_eq!(metadata.total_results, 0);
    assert_eq!(metadata.search_time, 0.0);
}

#[test]
fn test_extract_metadata_is_idempotent() {
    let response = sample_response();
    let first = SearchParser::extract_metadata(&response);
    let second = SearchParser::extract_metadata(&response);
    assert_eq!(first, second);
}

#[test]
fn test_structured_data_images_filter_asymmetry() {
    let bundle = SearchParser::extract_structured_data(&sample_response());

    // cse_image entries without src are dropped
    let images = bundle
        .get(&StructuredDataCategory::Images)
        .expect("images category present");
    assert_eq!(images.len(), 1);
    assert_eq!(images[0]["src"], "https://example.com/a.png");

    // other categories take raw entries unfiltered
    let people = bundle
        .get(&StructuredDataCategory::People)
        .expect("people category present");
    assert_eq!(people.len(), 1);
    assert_eq!(people[0]["name"], "Carl Lerche");
}

#[test]
fn test_structured_data_omits_empty_categories() {
    let bundle = SearchParser::extract_structured_data(&sample_response());

    assert!(!bundle.contains_key(&StructuredDataCategory::Videos));
    assert!(!bundle.contains_key(&StructuredDataCategory::Reviews));
}

#[test]
fn test_structured_data_concatenates_across_items() {
    let response = json!({
        "items": [
            { "pagemap": { "product": [{ "name": "a" }] } },
            { "pagemap": { "product": [{ "name": "b" }, { "name": "c" }] } }
        ]
    });
    let bundle = SearchParser::extract_structured_data(&response);
    let products = bundle
        .get(&StructuredDataCategory::Products)
        .expect("products category present");
    assert_eq!(products.len(), 3);
}

#[test]
fn test_structured_data_empty_without_items() {
    assert!(SearchParser::extract_structured_data(&json!({})).is_empty());
}
