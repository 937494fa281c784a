//! Link-Spider: a frontier-driven download-manifest crawler
//!
//! This crate walks HTML pages reachable from a list of seed URIs, stays inside
//! a whitelist of domains, and emits a download manifest of every non-HTML
//! resource it encountered for a downstream download tool to execute.

pub mod config;
pub mod crawler;
pub mod filter;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Link-Spider operations
#[derive(Debug, Error)]
pub enum SpiderError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Resolution error: {0}")]
    Resolution(#[from] ResolutionError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Invalid crawl phase transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: state::CrawlPhase,
        to: state::CrawlPhase,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid pattern in {list}: '{pattern}': {source}")]
    InvalidPattern {
        list: &'static str,
        pattern: String,
        source: regex::Error,
    },

    #[error("Invalid seed URI on line {line}: {source}")]
    InvalidSeed {
        line: usize,
        source: ResolutionError,
    },

    #[error("Seed file {0} contains no URIs")]
    NoSeeds(String),
}

/// Errors produced while turning a raw anchor string into a crawlable URI
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    #[error("Failed to parse '{raw}' against {base}: {message}")]
    Parse {
        raw: String,
        base: String,
        message: String,
    },

    #[error("Unsupported scheme '{scheme}' in '{raw}'")]
    UnsupportedScheme { raw: String, scheme: String },

    #[error("Empty href on {0}")]
    Empty(String),
}

/// Network or protocol failure while fetching a page
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Failed to read body of {url}: {message}")]
    Body { url: String, message: String },

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

/// Failure to pull anchors out of fetched page content
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    #[error("No body was fetched for {0}")]
    MissingBody(String),

    #[error("Invalid selector: {0}")]
    Selector(String),
}

/// Result type alias for Link-Spider operations
pub type Result<T> = std::result::Result<T, SpiderError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URI resolution
pub type ResolveResult<T> = std::result::Result<T, ResolutionError>;

// Re-export commonly used types
pub use config::Config;
pub use filter::{FilterSet, FilterVerdict};
pub use state::{CrawlPhase, Frontier};
pub use crate::url::{resolve, Uri};
