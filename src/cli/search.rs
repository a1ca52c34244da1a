//! Search command implementations

use clap::{Args, Parser, Subcommand};
use serde_json::json;
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

use crate::client::config::{self, ClientConfig};
use crate::client::params::{SafeLevel, SearchParams, SiteSearchFilter};
use crate::SearchResult;

use super::CliError;

/// Command-line interface for the web search client
#[derive(Debug, Parser)]
#[command(name = "web-search", version, about = "Google Custom Search API client")]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// API key (falls back to the GOOGLE_API_KEY environment variable)
    #[arg(long, global = true, env = config::API_KEY_ENV)]
    pub api_key: Option<String>,

    /// Custom Search Engine id (falls back to GOOGLE_CSE_ID)
    #[arg(long, global = true, env = config::SEARCH_ENGINE_ID_ENV)]
    pub search_engine_id: Option<String>,

    /// Maximum retries for failed requests
    #[arg(long, global = true, default_value_t = config::DEFAULT_MAX_RETRIES)]
    pub max_retries: u32,

    /// Per-request timeout in seconds
    #[arg(long, global = true, default_value_t = config::DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,
}

impl Cli {
    /// Build a client configuration from global flags and the environment
    pub fn client_config(&self) -> ClientConfig {
        let mut base = ClientConfig::from_env();
        if let Some(api_key) = &self.api_key {
            base.api_key = api_key.clone();
        }
        if let Some(search_engine_id) = &self.search_engine_id {
            base.search_engine_id = search_engine_id.clone();
        }
        base.max_retries(self.max_retries)
            .timeout(Duration::from_secs(self.timeout))
    }
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Fetch a single page of results with a pagination summary
    Search(SearchCommand),
    /// Collect results across pages up to a maximum
    Collect(CollectCommand),
}

/// Filter flags shared by both commands
#[derive(Debug, Args)]
pub struct FilterArgs {
    /// Restrict results to a site or domain
    #[arg(long)]
    pub site: Option<String>,

    /// Restrict results to a file type (e.g. pdf)
    #[arg(long)]
    pub file_type: Option<String>,

    /// Date restriction (e.g. d7, m3, y2023)
    #[arg(long)]
    pub date_restrict: Option<String>,

    /// Sort expression (e.g. date:r:20230101:20231231)
    #[arg(long)]
    pub sort: Option<String>,

    /// Language restriction (e.g. lang_en)
    #[arg(long)]
    pub lang: Option<String>,

    /// Country restriction (e.g. countryUS)
    #[arg(long)]
    pub country: Option<String>,

    /// Terms that must appear exactly
    #[arg(long)]
    pub exact_terms: Option<String>,

    /// Terms to exclude
    #[arg(long)]
    pub exclude_terms: Option<String>,

    /// Safe search level: off, medium, high
    #[arg(long, default_value = "off")]
    pub safe: String,
}

impl FilterArgs {
    /// Build search parameters from the query and filter flags
    pub fn to_params(&self, query: &str) -> Result<SearchParams, CliError> {
        let safe = SafeLevel::from_str(&self.safe).map_err(CliError::InvalidArgument)?;

        let mut params = SearchParams::new(query).safe(safe);
        if let Some(site) = &self.site {
            params = params
                .site_search(site)
                .site_search_filter(SiteSearchFilter::Include);
        }
        if let Some(file_type) = &self.file_type {
            params = params.file_type(file_type);
        }
        if let Some(date_restrict) = &self.date_restrict {
            params = params.date_restrict(date_restrict);
        }
        if let Some(sort) = &self.sort {
            params = params.sort(sort);
        }
        if let Some(lang) = &self.lang {
            params = params.lr(lang);
        }
        if let Some(country) = &self.country {
            params = params.cr(country);
        }
        if let Some(exact_terms) = &self.exact_terms {
            params = params.exact_terms(exact_terms);
        }
        if let Some(exclude_terms) = &self.exclude_terms {
            params = params.exclude_terms(exclude_terms);
        }
        Ok(params)
    }
}

/// Fetch one page of results
#[derive(Debug, Args)]
pub struct SearchCommand {
    /// Search query
    pub query: String,

    /// Page number (1-based)
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    /// Results per page (max 10)
    #[arg(long, default_value_t = 10)]
    pub per_page: u32,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,

    /// Shared filter flags
    #[command(flatten)]
    pub filters: FilterArgs,
}

impl SearchCommand {
    /// Execute the search command
    pub async fn execute(&self, cli: &Cli) -> Result<(), CliError> {
        let client = crate::SearchClient::new(cli.client_config());
        let params = self.filters.to_params(&self.query)?;

        let (results, page_info) = client.get_page(&params, self.page, self.per_page).await?;

        if self.json {
            let output = json!({ "results": results, "page_info": page_info });
            println!(
                "{}",
                serde_json::to_string_pretty(&output)
                    .map_err(|e| CliError::OutputError(e.to_string()))?
            );
            return Ok(());
        }

        // current_page is already clamped to 1-based by the pagination driver
        print_results(
            &results,
            (page_info.current_page - 1).saturating_mul(page_info.per_page),
        );
        println!(
            "\nPage {}/{} ({} total results)",
            page_info.current_page, page_info.total_pages, page_info.total_results
        );
        if page_info.has_next {
            println!("Next page: {}", page_info.next_page);
        }
        Ok(())
    }
}

/// Collect results across pages
#[derive(Debug, Args)]
pub struct CollectCommand {
    /// Search query
    pub query: String,

    /// Maximum number of results to collect
    #[arg(long, default_value_t = 30)]
    pub max_results: usize,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,

    /// Shared filter flags
    #[command(flatten)]
    pub filters: FilterArgs,
}

impl CollectCommand {
    /// Execute the collect command
    pub async fn execute(&self, cli: &Cli) -> Result<(), CliError> {
        let client = crate::SearchClient::new(cli.client_config());
        let params = self.filters.to_params(&self.query)?;

        info!(
            "Collecting up to {} results for '{}'",
            self.max_results, self.query
        );
        let results = client.collect_up_to(&params, self.max_results).await;

        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&results)
                    .map_err(|e| CliError::OutputError(e.to_string()))?
            );
            return Ok(());
        }

        print_results(&results, 0);
        println!("\nCollected {} results", results.len());
        Ok(())
    }
}

fn print_results(results: &[SearchResult], offset: u32) {
    for (i, result) in results.iter().enumerate() {
        println!("{}. {}", offset as usize + i + 1, result.title);
        println!("   {}", result.link);
        if !result.snippet.is_empty() {
            println!("   {}", result.snippet);
        }
    }
}
