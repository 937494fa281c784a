//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `Frontier`: pending queue, visited set and discovered downloads for one run
//! - `CrawlPhase`: the controller's position in a fetch cycle

mod frontier;
mod phase;

// Re-export main types
pub use frontier::Frontier;
pub use phase::CrawlPhase;
