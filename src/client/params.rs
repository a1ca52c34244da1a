//! Query parameter assembly
//!
//! [`SearchParams`] is an immutable value describing one API call. The
//! builder methods cover every documented Custom Search parameter; anything
//! else goes through [`SearchParams::extra`], which merges last with
//! last-write-wins precedence over the named parameters.

use std::str::FromStr;

use super::config::{ClientConfig, MAX_RESULTS_PER_PAGE};

/// Safe search level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SafeLevel {
    /// Safe search disabled
    #[default]
    Off,
    /// Moderate filtering
    Medium,
    /// Strict filtering
    High,
}

impl std::fmt::Display for SafeLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SafeLevel::Off => "off",
            SafeLevel::Medium => "medium",
            SafeLevel::High => "high",
        };
        write!(f, "{s}")
    }
}

impl FromStr for SafeLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "off" => Ok(SafeLevel::Off),
            "medium" => Ok(SafeLevel::Medium),
            "high" => Ok(SafeLevel::High),
            _ => Err(format!(
                "Invalid safe level: {s}. Valid options: off, medium, high"
            )),
        }
    }
}

/// Search type (`searchType` parameter)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchType {
    /// Image search
    Image,
}

impl std::fmt::Display for SearchType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchType::Image => write!(f, "image"),
        }
    }
}

/// Site search filter mode (`siteSearchFilter` parameter)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteSearchFilter {
    /// Include results from the site
    Include,
    /// Exclude results from the site
    Exclude,
}

impl std::fmt::Display for SiteSearchFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SiteSearchFilter::Include => write!(f, "i"),
            SiteSearchFilter::Exclude => write!(f, "e"),
        }
    }
}

/// Parameters for one search call
///
/// Immutable value with no identity beyond its fields. `start` is 1-based;
/// `num` is clamped to the API maximum of 10 at query-build time.
#[derive(Debug, Clone)]
pub struct SearchParams {
    query: String,
    start: u32,
    num: u32,
    safe: SafeLevel,
    duplicate_filter: bool,
    search_type: Option<SearchType>,
    fields: Option<String>,
    sort: Option<String>,
    gl: Option<String>,
    cr: Option<String>,
    lr: Option<String>,
    rights: Option<String>,
    date_restrict: Option<String>,
    exact_terms: Option<String>,
    exclude_terms: Option<String>,
    file_type: Option<String>,
    site_search: Option<String>,
    site_search_filter: Option<SiteSearchFilter>,
    link_site: Option<String>,
    or_terms: Option<String>,
    related_site: Option<String>,
    extra: Vec<(String, String)>,
}

impl SearchParams {
    /// Create parameters for a query with default settings
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            start: 1,
            num: MAX_RESULTS_PER_PAGE,
            safe: SafeLevel::Off,
            duplicate_filter: false,
            search_type: None,
            fields: None,
            sort: None,
            gl: None,
            cr: None,
            lr: None,
            rights: None,
            date_restrict: None,
            exact_terms: None,
            exclude_terms: None,
            file_type: None,
            site_search: None,
            site_search_filter: None,
            link_site: None,
            or_terms: None,
            related_site: None,
            extra: Vec::new(),
        }
    }

    /// The query string
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Replace the query string
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    /// 1-based index of the first result to return
    pub fn start(mut self, start: u32) -> Self {
        self.start = start.max(1);
        self
    }

    /// Number of results to return (clamped to 10 at build time)
    pub fn num(mut self, num: u32) -> Self {
        self.num = num;
        self
    }

    /// Safe search level
    pub fn safe(mut self, safe: SafeLevel) -> Self {
        self.safe = safe;
        self
    }

    /// Enable or disable the duplicate content filter
    pub fn duplicate_filter(mut self, enabled: bool) -> Self {
        self.duplicate_filter = enabled;
        self
    }

    /// Restrict to a search type (e.g. images)
    pub fn search_type(mut self, search_type: SearchType) -> Self {
        self.search_type = Some(search_type);
        self
    }

    /// Partial-response field selector
    pub fn fields(mut self, fields: impl Into<String>) -> Self {
        self.fields = Some(fields.into());
        self
    }

    /// Sort expression (e.g. `date:r:20200101:20201231`)
    pub fn sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    /// End-user geolocation (ISO 3166-1 alpha-2 country code)
    pub fn gl(mut self, gl: impl Into<String>) -> Self {
        self.gl = Some(gl.into());
        self
    }

    /// Country restriction (e.g. `countryUS`)
    pub fn cr(mut self, cr: impl Into<String>) -> Self {
        self.cr = Some(cr.into());
        self
    }

    /// Language restriction (e.g. `lang_en`)
    pub fn lr(mut self, lr: impl Into<String>) -> Self {
        self.lr = Some(lr.into());
        self
    }

    /// Rights filtering (e.g. `cc_publicdomain`)
    pub fn rights(mut self, rights: impl Into<String>) -> Self {
        self.rights = Some(rights.into());
        self
    }

    /// Date restriction (e.g. `d7`, `m3`, `y2023`)
    pub fn date_restrict(mut self, date_restrict: impl Into<String>) -> Self {
        self.date_restrict = Some(date_restrict.into());
        self
    }

    /// Terms that must appear exactly
    pub fn exact_terms(mut self, exact_terms: impl Into<String>) -> Self {
        self.exact_terms = Some(exact_terms.into());
        self
    }

    /// Terms to exclude
    pub fn exclude_terms(mut self, exclude_terms: impl Into<String>) -> Self {
        self.exclude_terms = Some(exclude_terms.into());
        self
    }

    /// File type restriction (e.g. `pdf`)
    pub fn file_type(mut self, file_type: impl Into<String>) -> Self {
        self.file_type = Some(file_type.into());
        self
    }

    /// Site or domain to search within
    pub fn site_search(mut self, site_search: impl Into<String>) -> Self {
        self.site_search = Some(site_search.into());
        self
    }

    /// Include/exclude mode for `site_search`
    pub fn site_search_filter(mut self, filter: SiteSearchFilter) -> Self {
        self.site_search_filter = Some(filter);
        self
    }

    /// Find pages linking to the given URL
    pub fn link_site(mut self, link_site: impl Into<String>) -> Self {
        self.link_site = Some(link_site.into());
        self
    }

    /// Additional terms combined with OR logic
    pub fn or_terms(mut self, or_terms: impl Into<String>) -> Self {
        self.or_terms = Some(or_terms.into());
        self
    }

    /// Find pages related to the given URL
    pub fn related_site(mut self, related_site: impl Into<String>) -> Self {
        self.related_site = Some(related_site.into());
        self
    }

    /// Append an arbitrary parameter, merged after the named ones
    ///
    /// Extras override named parameters by last-write-wins precedence:
    /// an extra with an existing key replaces the earlier value in place.
    pub fn extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.push((key.into(), value.into()));
        self
    }

    /// Build the full wire parameter list
    ///
    /// Fixed parameters (credentials, query, paging, safety, duplicate
    /// filter) come first, followed by the named optional filters, with the
    /// open-ended extras merged last.
    pub fn to_query(&self, config: &ClientConfig) -> Vec<(String, String)> {
        let mut params: Vec<(String, String)> = vec![
            ("key".to_string(), config.api_key.clone()),
            ("cx".to_string(), config.search_engine_id.clone()),
            ("q".to_string(), self.query.clone()),
            ("start".to_string(), self.start.to_string()),
            (
                "num".to_string(),
                self.num.min(MAX_RESULTS_PER_PAGE).to_string(),
            ),
            ("safe".to_string(), self.safe.to_string()),
            (
                "filter".to_string(),
                if self.duplicate_filter { "1" } else { "0" }.to_string(),
            ),
        ];

        let mut push_opt = |key: &str, value: Option<String>| {
            if let Some(value) = value {
                params.push((key.to_string(), value));
            }
        };

        push_opt("searchType", self.search_type.map(|v| v.to_string()));
        push_opt("fields", self.fields.clone());
        push_opt("sort", self.sort.clone());
        push_opt("gl", self.gl.clone());
        push_opt("cr", self.cr.clone());
        push_opt("lr", self.lr.clone());
        push_opt("rights", self.rights.clone());
        push_opt("dateRestrict", self.date_restrict.clone());
        push_opt("exactTerms", self.exact_terms.clone());
        push_opt("excludeTerms", self.exclude_terms.clone());
        push_opt("fileType", self.file_type.clone());
        push_opt("siteSearch", self.site_search.clone());
        push_opt(
            "siteSearchFilter",
            self.site_search_filter.map(|v| v.to_string()),
        );
        push_opt("linkSite", self.link_site.clone());
        push_opt("orTerms", self.or_terms.clone());
        push_opt("relatedSite", self.related_site.clone());

        // Ordered merge of caller extras: last write wins
        for (key, value) in &self.extra {
            if let Some(existing) = params.iter_mut().find(|(k, _)| k == key) {
                existing.1 = value.clone();
            } else {
                params.push((key.clone(), value.clone()));
            }
        }

        params
    }
}

/// Advanced query operators assembled into the query string itself
///
/// These map to Google's inline search operators rather than API
/// parameters, matching how power users refine queries by hand.
#[derive(Debug, Clone, Default)]
pub struct AdvancedOperators {
    /// Phrase that must appear exactly as written
    pub exact_phrase: Option<String>,
    /// Words that must not appear
    pub exclude_words: Vec<String>,
    /// Site or domain to search within
    pub site_or_domain: Option<String>,
    /// File type restriction
    pub file_type: Option<String>,
    /// Text that must appear in the title
    pub in_title: Option<String>,
    /// Text that must appear in the URL
    pub in_url: Option<String>,
    /// Find pages related to this URL
    pub related_to_url: Option<String>,
}

impl AdvancedOperators {
    /// Apply the operators to a base query
    pub fn apply(&self, query: &str) -> String {
        let mut enhanced = query.to_string();

        if let Some(phrase) = &self.exact_phrase {
            enhanced.push_str(&format!(" \"{phrase}\""));
        }
        for word in &self.exclude_words {
            enhanced.push_str(&format!(" -{word}"));
        }
        if let Some(site) = &self.site_or_domain {
            enhanced.push_str(&format!(" site:{site}"));
        }
        if let Some(file_type) = &self.file_type {
            enhanced.push_str(&format!(" filetype:{file_type}"));
        }
        if let Some(title) = &self.in_title {
            enhanced.push_str(&format!(" intitle:{title}"));
        }
        if let Some(url) = &self.in_url {
            enhanced.push_str(&format!(" inurl:{url}"));
        }
        if let Some(url) = &self.related_to_url {
            enhanced.push_str(&format!(" related:{url}"));
        }

        enhanced
    }
}

/// Build a query restricted to any of the given domains (OR logic)
pub fn multi_domain_query(query: &str, domains: &[String]) -> String {
    let domain_query = domains
        .iter()
        .map(|d| format!("site:{d}"))
        .collect::<Vec<_>>()
        .join(" OR ");
    format!("({query}) ({domain_query})")
}

/// Build a query excluding all of the given domains
pub fn exclude_domains_query(query: &str, domains: &[String]) -> String {
    let exclusions = domains
        .iter()
        .map(|d| format!("-site:{d}"))
        .collect::<Vec<_>>()
        .join(" ");
    format!("{query} {exclusions}")
}

/// Build a query restricted to any of the given file types (OR logic)
pub fn file_types_query(query: &str, file_types: &[String]) -> String {
    let type_query = file_types
        .iter()
        .map(|t| format!("filetype:{t}"))
        .collect::<Vec<_>>()
        .join(" OR ");
    format!("{query} ({type_query})")
}
