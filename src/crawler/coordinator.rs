//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the crawl loop that drives one fetch at a time:
//! - Popping the next URI from the frontier
//! - Classifying it with a HEAD fetch
//! - Fetching HTML pages and extracting their anchors
//! - Feeding anchors back through resolver, filters and frontier
//! - Recording non-HTML resources as downloads
//!
//! A new fetch is only issued after the previous fetch cycle has fully
//! completed, so at most one fetch is ever outstanding and pages are visited
//! in strict FIFO order of the frontier.

use crate::config::{Config, Credentials};
use crate::crawler::fetcher::{ContentClass, FetchMethod, FetchedPage, HttpFetcher, PageFetcher};
use crate::crawler::parser::{HtmlLinkExtractor, LinkExtractor};
use crate::filter::{FilterSet, FilterVerdict};
use crate::output::{log_statistics, CrawlStatistics};
use crate::state::{CrawlPhase, Frontier};
use crate::url::{resolve, Uri};
use crate::SpiderError;
use std::collections::HashSet;

/// Progress is logged every this many fetch cycles
const PROGRESS_INTERVAL: u64 = 10;

/// Result of a completed crawl
#[derive(Debug)]
pub struct CrawlReport {
    /// Non-HTML resources in discovery order
    pub downloads: Vec<Uri>,

    pub statistics: CrawlStatistics,
}

/// Main crawler coordinator structure
pub struct Coordinator {
    fetcher: Box<dyn PageFetcher>,
    extractor: Box<dyn LinkExtractor>,
    filters: FilterSet,
    frontier: Frontier,
    credentials: Option<Credentials>,
    seed_hrefs: HashSet<String>,
    phase: CrawlPhase,
    stats: CrawlStatistics,
}

impl Coordinator {
    /// Creates a new coordinator with an empty frontier
    ///
    /// # Arguments
    ///
    /// * `fetcher` - Page fetcher used for HEAD and GET requests
    /// * `extractor` - Link extractor applied to fetched HTML pages
    /// * `filters` - Compiled filter pipeline
    /// * `credentials` - Optional basic-auth credentials sent with every fetch
    pub fn new(
        fetcher: Box<dyn PageFetcher>,
        extractor: Box<dyn LinkExtractor>,
        filters: FilterSet,
        credentials: Option<Credentials>,
    ) -> Self {
        Self {
            fetcher,
            extractor,
            filters,
            frontier: Frontier::new(),
            credentials,
            seed_hrefs: HashSet::new(),
            phase: CrawlPhase::Idle,
            stats: CrawlStatistics::default(),
        }
    }

    /// Pushes seed URIs into the shared frontier
    ///
    /// Seeds bypass the filter pipeline. Returns the number of seeds queued;
    /// repeated seeds are queued once.
    pub fn seed<I>(&mut self, seeds: I) -> usize
    where
        I: IntoIterator<Item = Uri>,
    {
        let mut queued = 0;

        for seed in seeds {
            let href = seed.href().to_string();
            if self.frontier.enqueue(seed) {
                tracing::debug!("-> Pushed seed {}", href);
                self.seed_hrefs.insert(href);
                queued += 1;
            } else {
                tracing::debug!("Duplicate seed ignored: {}", href);
            }
        }

        self.stats.seeds_queued += queued as u64;
        queued
    }

    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    pub fn phase(&self) -> CrawlPhase {
        self.phase
    }

    pub fn statistics(&self) -> &CrawlStatistics {
        &self.stats
    }

    /// Runs the crawl loop until the frontier drains
    ///
    /// Per-page failures are logged and never abort the loop.
    pub async fn run(&mut self) -> Result<(), SpiderError> {
        tracing::info!(
            "Starting crawl with {} URIs pending",
            self.frontier.pending_len()
        );
        self.stats.mark_started();

        while let Some(uri) = self.frontier.pop() {
            self.transition(CrawlPhase::FetchHead)?;
            self.fetch_cycle(uri).await?;

            if self.stats.fetch_cycles % PROGRESS_INTERVAL == 0 {
                tracing::info!(
                    "Progress: {} fetched, {} pending, {} downloads",
                    self.stats.fetch_cycles,
                    self.frontier.pending_len(),
                    self.frontier.downloads().len()
                );
            }
        }

        self.transition(CrawlPhase::Done)?;
        self.stats.mark_finished();

        tracing::info!(
            "Crawl completed: {} URIs visited, {} downloads found",
            self.frontier.visited_len(),
            self.frontier.downloads().len()
        );

        Ok(())
    }

    /// Consumes the coordinator, returning downloads and statistics
    pub fn into_report(self) -> CrawlReport {
        CrawlReport {
            downloads: self.frontier.into_downloads(),
            statistics: self.stats,
        }
    }

    /// Processes one popped URI from HEAD through to `CheckPending`
    async fn fetch_cycle(&mut self, uri: Uri) -> Result<(), SpiderError> {
        let href = uri.href().to_string();
        tracing::debug!("<- Shifted {} off the frontier", href);

        self.stats.fetch_cycles += 1;
        if !self.seed_hrefs.contains(&href) {
            self.stats.discovered_fetches += 1;
        }

        let head = match self
            .fetcher
            .fetch(&href, FetchMethod::Head, self.credentials.as_ref())
            .await
        {
            Ok(head) => head,
            Err(e) => {
                tracing::warn!("HEAD failed for {}: {}", href, e);
                self.frontier.mark_visited(&href);
                self.stats.fetch_failures += 1;
                return self.transition(CrawlPhase::CheckPending);
            }
        };

        self.transition(CrawlPhase::Classify)?;
        self.frontier.mark_visited(&href);
        tracing::info!(
            "status: {} | contentType: {} | URI: {}",
            head.status,
            head.content_type.as_deref().unwrap_or("-"),
            head.final_url
        );

        match head.classify() {
            ContentClass::Html => {
                self.transition(CrawlPhase::FetchGet)?;
                self.follow_links(&uri).await?;
            }
            ContentClass::Download => {
                self.transition(CrawlPhase::RecordDownload)?;
                if self.frontier.record_download(uri) {
                    tracing::info!("Actual download: {}", href);
                    self.stats.downloads += 1;
                }
            }
            ContentClass::Unsuccessful => {
                tracing::debug!("Not following {} (HTTP {})", href, head.status);
                self.stats.unsuccessful_responses += 1;
            }
        }

        self.transition(CrawlPhase::CheckPending)
    }

    /// Fetches an HTML page and enqueues its accepted anchors
    async fn follow_links(&mut self, uri: &Uri) -> Result<(), SpiderError> {
        let page = match self
            .fetcher
            .fetch(uri.href(), FetchMethod::Get, self.credentials.as_ref())
            .await
        {
            Ok(page) if page.is_success() => page,
            Ok(page) => {
                tracing::warn!("GET {} returned HTTP {}", uri, page.status);
                self.stats.unsuccessful_responses += 1;
                return Ok(());
            }
            Err(e) => {
                tracing::warn!("GET failed for {}: {}", uri, e);
                self.stats.fetch_failures += 1;
                return Ok(());
            }
        };

        self.stats.pages_fetched += 1;
        tracing::debug!("Fetched {}", page.final_url);

        self.transition(CrawlPhase::Extract)?;
        let base = self.resolution_base(uri, &page);
        let anchors = match self.extractor.extract_anchors(&page) {
            Ok(anchors) => anchors,
            Err(e) => {
                tracing::warn!("Failed to extract anchors from {}: {}", page.final_url, e);
                self.stats.extraction_failures += 1;
                Vec::new()
            }
        };

        self.transition(CrawlPhase::FilterAndEnqueue)?;
        self.enqueue_anchors(&anchors, &base);

        Ok(())
    }

    /// The page's final URL after redirects, or the popped URI if that is unusable
    fn resolution_base(&self, uri: &Uri, page: &FetchedPage) -> Uri {
        match Uri::parse_absolute(&page.final_url) {
            Ok(base) => base,
            Err(e) => {
                tracing::warn!(
                    "Final URL {} unusable as base ({}), resolving against {}",
                    page.final_url,
                    e,
                    uri
                );
                uri.clone()
            }
        }
    }

    /// Resolves, filters and enqueues anchors in document order
    fn enqueue_anchors(&mut self, anchors: &[String], base: &Uri) {
        for raw in anchors {
            self.stats.links_examined += 1;

            let candidate = match resolve(raw, base) {
                Ok(candidate) => candidate,
                Err(e) => {
                    tracing::debug!("Skipping anchor: {}", e);
                    self.stats.resolution_failures += 1;
                    continue;
                }
            };

            tracing::trace!(
                "wasRelative: {} raw href: {} parsed href: {}",
                candidate.was_relative(),
                candidate.raw(),
                candidate.href()
            );

            let verdict = self.filters.evaluate(&candidate);
            if verdict != FilterVerdict::Accepted {
                match self.filters.rejecting_pattern(&candidate, verdict) {
                    Some(pattern) => tracing::debug!(
                        "Skip pending append, {} rejected by {} pattern '{}'",
                        candidate,
                        verdict,
                        pattern
                    ),
                    None => tracing::debug!(
                        "Skip pending append, {} rejected by {}",
                        candidate,
                        verdict
                    ),
                }
                self.stats.record_rejection(verdict);
                continue;
            }

            let href = candidate.href().to_string();
            if self.frontier.enqueue(candidate) {
                tracing::debug!("-> Pushed {} to the frontier", href);
                self.stats.links_enqueued += 1;
            } else {
                tracing::trace!("Skip pending append, already pending or visited: {}", href);
                self.stats.duplicate_links += 1;
            }
        }
    }

    fn transition(&mut self, next: CrawlPhase) -> Result<(), SpiderError> {
        if !self.phase.can_transition_to(next) {
            return Err(SpiderError::InvalidTransition {
                from: self.phase,
                to: next,
            });
        }

        tracing::trace!("Phase {} -> {}", self.phase, next);
        self.phase = next;
        Ok(())
    }
}

/// Runs a complete crawl with the HTTP fetcher and HTML link extractor
///
/// # Arguments
///
/// * `config` - The crawler configuration
/// * `seeds` - Seed URIs, pushed to the frontier in order
/// * `credentials` - Optional basic-auth credentials
///
/// # Returns
///
/// * `Ok(CrawlReport)` - Downloads and statistics of the finished crawl
/// * `Err(SpiderError)` - The crawl could not be set up
///
/// # Example
///
/// ```no_run
/// use link_spider::config::{load_config, load_seeds};
/// use link_spider::crawler::run_crawl;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("config.toml"))?;
/// let seeds = load_seeds(&config.seed_file_path()?)?;
/// let report = run_crawl(&config, seeds, None).await?;
/// println!("{} downloads", report.downloads.len());
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(
    config: &Config,
    seeds: Vec<Uri>,
    credentials: Option<Credentials>,
) -> Result<CrawlReport, SpiderError> {
    let filters = FilterSet::from_config(config)?;
    let fetcher = HttpFetcher::new(&config.fetcher)?;

    let mut coordinator = Coordinator::new(
        Box::new(fetcher),
        Box::new(HtmlLinkExtractor),
        filters,
        credentials,
    );
    coordinator.seed(seeds);
    coordinator.run().await?;

    let report = coordinator.into_report();
    log_statistics(&report.statistics);
    Ok(report)
}
