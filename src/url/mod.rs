//! URI handling module for Link-Spider
//!
//! This module provides the immutable [`Uri`] record used throughout the
//! crawl and the resolver that turns raw anchor strings into absolute URIs.

mod resolve;
mod uri;

// Re-export main types
pub use resolve::resolve;
pub use uri::Uri;
