//! Crawler module for page fetching and link following
//!
//! This module contains the core crawling logic, including:
//! - HEAD/GET fetching with optional basic auth
//! - HTML anchor extraction
//! - Overall crawl coordination over a single shared frontier

mod coordinator;
mod fetcher;
mod parser;

pub use coordinator::{run_crawl, Coordinator, CrawlReport};
pub use fetcher::{
    build_http_client, ContentClass, FetchMethod, FetchedPage, HttpFetcher, PageFetcher,
};
pub use parser::{extract_anchors, HtmlLinkExtractor, LinkExtractor};

use crate::config::{load_seeds, Config, Credentials};
use crate::SpiderError;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Load the seed URIs from the configured URI file
/// 2. Build the HTTP client
/// 3. Fetch pages and follow links until the frontier drains
/// 4. Return the discovered downloads
///
/// # Arguments
///
/// * `config` - The crawler configuration
/// * `credentials` - Optional basic-auth credentials
///
/// # Returns
///
/// * `Ok(CrawlReport)` - Crawl completed
/// * `Err(SpiderError)` - Seeds could not be loaded or the crawl could not start
pub async fn crawl(
    config: &Config,
    credentials: Option<Credentials>,
) -> Result<CrawlReport, SpiderError> {
    let seed_file = config.seed_file_path()?;
    tracing::info!("Loading seeds from: {}", seed_file.display());

    let seeds = load_seeds(&seed_file)?;
    tracing::info!("Loaded {} seed URIs", seeds.len());

    run_crawl(config, seeds, credentials).await
}
