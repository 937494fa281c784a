//! Output module for crawl results
//!
//! This module handles:
//! - Rendering discovered downloads into the download-tool manifest
//! - Recording and reporting crawl statistics

mod manifest;
pub mod stats;

pub use manifest::{render, write_manifest, ManifestEntry, CUT_MARKER};
pub use stats::{log_statistics, CrawlStatistics};
