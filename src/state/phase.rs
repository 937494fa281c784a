//! Crawl phase definitions for the controller's state machine
//!
//! One fetch cycle walks `FetchHead → Classify`, then either
//! `FetchGet → Extract → FilterAndEnqueue` for HTML pages or
//! `RecordDownload` for other resources, and always ends in `CheckPending`.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrawlPhase {
    /// Seeds queued, nothing fetched yet
    Idle,

    // ===== Suspension points =====
    /// Header-only fetch of the popped URI is outstanding
    FetchHead,

    /// Full body fetch of an HTML page is outstanding
    FetchGet,

    // ===== Synchronous steps =====
    /// Deciding between HTML, download and failure
    Classify,

    /// Pulling raw anchors out of the fetched page
    Extract,

    /// Resolving, filtering and queueing extracted anchors
    FilterAndEnqueue,

    /// Adding a non-HTML resource to the downloads
    RecordDownload,

    /// Fetch cycle finished; decide whether to continue
    CheckPending,

    /// Frontier drained
    Done,
}

impl CrawlPhase {
    /// Returns true if the state machine may move from `self` to `next`
    pub fn can_transition_to(&self, next: CrawlPhase) -> bool {
        use CrawlPhase::*;

        matches!(
            (self, next),
            (Idle, FetchHead)
                | (Idle, Done)
                | (FetchHead, Classify)
                | (FetchHead, CheckPending)
                | (Classify, FetchGet)
                | (Classify, RecordDownload)
                | (Classify, CheckPending)
                | (FetchGet, Extract)
                | (FetchGet, CheckPending)
                | (Extract, FilterAndEnqueue)
                | (FilterAndEnqueue, CheckPending)
                | (RecordDownload, CheckPending)
                | (CheckPending, FetchHead)
                | (CheckPending, Done)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::FetchHead => "fetch_head",
            Self::FetchGet => "fetch_get",
            Self::Classify => "classify",
            Self::Extract => "extract",
            Self::FilterAndEnqueue => "filter_and_enqueue",
            Self::RecordDownload => "record_download",
            Self::CheckPending => "check_pending",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for CrawlPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
