//! Crawl statistics collected by the coordinator

use crate::filter::FilterVerdict;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Counters for one crawl run
#[derive(Debug, Clone, Default)]
pub struct CrawlStatistics {
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,

    /// Seeds placed in the frontier
    pub seeds_queued: u64,

    /// HEAD fetches issued (one per popped URI)
    pub fetch_cycles: u64,

    /// Fetch cycles for URIs discovered on pages rather than seeded
    pub discovered_fetches: u64,

    /// HTML pages whose body was fetched
    pub pages_fetched: u64,

    /// Non-HTML resources recorded for the manifest
    pub downloads: u64,

    /// Raw anchors examined
    pub links_examined: u64,

    /// Anchors that entered the frontier
    pub links_enqueued: u64,

    /// Accepted anchors that were already visited or pending
    pub duplicate_links: u64,

    /// Anchors that could not be resolved
    pub resolution_failures: u64,

    /// Anchors rejected per filter stage
    pub rejections: HashMap<FilterVerdict, u64>,

    /// Network or protocol failures on HEAD or GET
    pub fetch_failures: u64,

    /// Responses with a non-2xx status
    pub unsuccessful_responses: u64,

    /// Pages whose anchors could not be extracted
    pub extraction_failures: u64,
}

impl CrawlStatistics {
    pub fn mark_started(&mut self) {
        self.started_at = Some(Utc::now());
    }

    pub fn mark_finished(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    pub fn record_rejection(&mut self, verdict: FilterVerdict) {
        *self.rejections.entry(verdict).or_insert(0) += 1;
    }

    pub fn rejected(&self, verdict: FilterVerdict) -> u64 {
        self.rejections.get(&verdict).copied().unwrap_or(0)
    }

    pub fn total_rejected(&self) -> u64 {
        self.rejections.values().sum()
    }

    /// Wall-clock duration in seconds, once finished
    pub fn duration_seconds(&self) -> Option<f64> {
        match (self.started_at, self.finished_at) {
            (Some(started), Some(finished)) => {
                Some((finished - started).num_milliseconds() as f64 / 1000.0)
            }
            _ => None,
        }
    }

    /// Human-readable summary, one line per counter group
    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Seeds: {} queued", self.seeds_queued),
            format!(
                "Fetch cycles: {} ({} discovered), HTML pages: {}, downloads: {}",
                self.fetch_cycles, self.discovered_fetches, self.pages_fetched, self.downloads
            ),
            format!(
                "Links: {} examined, {} enqueued, {} duplicates, {} unresolvable",
                self.links_examined,
                self.links_enqueued,
                self.duplicate_links,
                self.resolution_failures
            ),
            format!(
                "Rejected: {} total ({})",
                self.total_rejected(),
                FilterVerdict::rejections()
                    .iter()
                    .map(|verdict| format!("{} {}", self.rejected(*verdict), verdict))
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            format!(
                "Errors: {} fetch failures, {} unsuccessful responses, {} extraction failures",
                self.fetch_failures, self.unsuccessful_responses, self.extraction_failures
            ),
        ];

        if let Some(seconds) = self.duration_seconds() {
            lines.push(format!("Duration: {:.2}s", seconds));
        }

        lines
    }
}

/// Logs the statistics summary through `tracing`
pub fn log_statistics(stats: &CrawlStatistics) {
    for line in stats.summary_lines() {
        tracing::info!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_rejection() {
        let mut stats = CrawlStatistics::default();
        stats.record_rejection(FilterVerdict::NotWhitelisted);
        stats.record_rejection(FilterVerdict::NotWhitelisted);
        stats.record_rejection(FilterVerdict::Blacklisted);

        assert_eq!(stats.rejected(FilterVerdict::NotWhitelisted), 2);
        assert_eq!(stats.rejected(FilterVerdict::Blacklisted), 1);
        assert_eq!(stats.rejected(FilterVerdict::PathBlacklisted), 0);
        assert_eq!(stats.total_rejected(), 3);
    }

    #[test]
    fn test_duration_requires_both_timestamps() {
        let mut stats = CrawlStatistics::default();
        assert!(stats.duration_seconds().is_none());

        stats.mark_started();
        assert!(stats.duration_seconds().is_none());

        stats.mark_finished();
        assert!(stats.duration_seconds().unwrap() >= 0.0);
    }

    #[test]
    fn test_summary_lines() {
        let mut stats = CrawlStatistics {
            seeds_queued: 1,
            fetch_cycles: 3,
            discovered_fetches: 2,
            downloads: 1,
            ..Default::default()
        };
        stats.record_rejection(FilterVerdict::NotWhitelisted);

        let lines = stats.summary_lines();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "Seeds: 1 queued");
        assert!(lines[1].starts_with("Fetch cycles: 3 (2 discovered)"));
        assert!(lines[3].contains("1 domain_whitelist"));
    }
}
