//! Unit tests for query parameter assembly

use web_search_client::client::params::{SafeLevel, SearchParams, SearchType, SiteSearchFilter};
use web_search_client::client::ClientConfig;

fn config() -> ClientConfig {
    ClientConfig::new("key-123", "cx-456")
}

fn lookup<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

#[test]
fn test_full_named_filter_surface() {
    let params = SearchParams::new("rust web frameworks")
        .start(11)
        .num(5)
        .safe(SafeLevel::Medium)
        .duplicate_filter(true)
        .search_type(SearchType::Image)
        .fields("items(title,link)")
        .sort("date:r:20230101:20231231")
        .gl("us")
        .cr("countryUS")
        .lr("lang_en")
        .rights("cc_publicdomain")
        .date_restrict("m6")
        .exact_terms("axum")
        .exclude_terms("php")
        .file_type("pdf")
        .site_search("docs.rs")
        .site_search_filter(SiteSearchFilter::Exclude)
        .link_site("https://www.rust-lang.org")
        .or_terms("actix rocket")
        .related_site("https://crates.io")
        .to_query(&config());

    assert_eq!(lookup(&params, "q"), Some("rust web frameworks"));
    assert_eq!(lookup(&params, "start"), Some("11"));
    assert_eq!(lookup(&params, "num"), Some("5"));
    assert_eq!(lookup(&params, "safe"), Some("medium"));
    assert_eq!(lookup(&params, "filter"), Some("1"));
    assert_eq!(lookup(&params, "searchType"), Some("image"));
    assert_eq!(lookup(&params, "fields"), Some("items(title,link)"));
    assert_eq!(lookup(&params, "sort"), Some("date:r:20230101:20231231"));
    assert_eq!(lookup(&params, "gl"), Some("us"));
    assert_eq!(lookup(&params, "cr"), Some("countryUS"));
    assert_eq!(lookup(&params, "lr"), Some("lang_en"));
    assert_eq!(lookup(&params, "rights"), Some("cc_publicdomain"));
    assert_eq!(lookup(&params, "dateRestrict"), Some("m6"));
    assert_eq!(lookup(&params, "exactTerms"), Some("axum"));
    assert_eq!(lookup(&params, "excludeTerms"), Some("php"));
    assert_eq!(lookup(&params, "fileType"), Some("pdf"));
    assert_eq!(lookup(&params, "siteSearch"), Some("docs.rs"));
    assert_eq!(lookup(&params, "siteSearchFilter"), Some("e"));
    assert_eq!(lookup(&params, "linkSite"), Some("https://www.rust-lang.org"));
    assert_eq!(lookup(&params, "orTerms"), Some("actix rocket"));
    assert_eq!(lookup(&params, "relatedSite"), Some("https://crates.io"));
}

#[test]
fn test_credentials_come_from_config() {
    let params = SearchParams::new("rust").to_query(&config());
    assert_eq!(lookup(&params, "key"), Some("key-123"));
    assert_eq!(lookup(&params, "cx"), Some("cx-456"));
}

#[test]
fn test_fixed_parameters_lead_the_list() {
    let params = SearchParams::new("rust").site_search("docs.rs").to_query(&config());

    let keys: Vec<&str> = params.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(
        &keys[..7],
        &["key", "cx", "q", "start", "num", "safe", "filter"]
    );
}

#[test]
fn test_unknown_extra_appended_after_named() {
    let params = SearchParams::new("rust")
        .site_search("docs.rs")
        .extra("imgSize", "large")
        .to_query(&config());

    let keys: Vec<&str> = params.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(keys.last(), Some(&"imgSize"));
}

#[test]
fn test_extra_overrides_credential_parameter() {
    // cx override via extras is how callers target a different engine
    // per-call, exactly like the open-ended parameter merge upstream
    let params = SearchParams::new("rust")
        .extra("cx", "other-engine")
        .to_query(&config());

    assert_eq!(lookup(&params, "cx"), Some("other-engine"));
    assert_eq!(params.iter().filter(|(k, _)| k == "cx").count(), 1);
}

#[test]
fn test_params_are_value_semantics() {
    let base = SearchParams::new("rust");
    let modified = base.clone().start(21).num(5);

    let base_query = base.to_query(&config());
    let modified_query = modified.to_query(&config());

    assert_eq!(lookup(&base_query, "start"), Some("1"));
    assert_eq!(lookup(&modified_query, "start"), Some("21"));
}
