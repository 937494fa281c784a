//! Filter pipeline deciding which discovered URIs may enter the frontier
//!
//! Every candidate passes three ordered stages, stopping at the first
//! rejection:
//!
//! 1. URI blacklist, tested against the absolute href
//! 2. Path blacklist, tested against the raw anchor for relative candidates,
//!    or `pathname + query + hash` for absolute ones
//! 3. Domain whitelist, tested against the host of absolute candidates only
//!
//! Relative candidates never reach stage 3: they are taken to share the origin
//! of the page they were found on. An empty whitelist therefore rejects every
//! absolute candidate while still letting a crawl follow relative links.

mod patterns;

pub use patterns::PatternList;

use crate::config::Config;
use crate::url::Uri;
use crate::ConfigError;
use std::fmt;

/// Outcome of running a candidate through the filter pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterVerdict {
    /// Passed every stage
    Accepted,
    /// Stage 1: href matched the URI blacklist
    Blacklisted,
    /// Stage 2: path matched the path blacklist
    PathBlacklisted,
    /// Stage 3: absolute candidate whose host is not whitelisted
    NotWhitelisted,
}

impl FilterVerdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Accepted => "accepted",
            Self::Blacklisted => "uri_blacklist",
            Self::PathBlacklisted => "uri_path_blacklist",
            Self::NotWhitelisted => "domain_whitelist",
        }
    }

    /// Every rejecting verdict, in pipeline order
    pub fn rejections() -> [Self; 3] {
        [Self::Blacklisted, Self::PathBlacklisted, Self::NotWhitelisted]
    }
}

impl fmt::Display for FilterVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compiled filter configuration, immutable for the run
#[derive(Debug, Clone, Default)]
pub struct FilterSet {
    uri_blacklist: PatternList,
    uri_path_blacklist: PatternList,
    domain_whitelist: PatternList,
}

impl FilterSet {
    pub fn new(
        uri_blacklist: PatternList,
        uri_path_blacklist: PatternList,
        domain_whitelist: PatternList,
    ) -> Self {
        Self {
            uri_blacklist,
            uri_path_blacklist,
            domain_whitelist,
        }
    }

    /// Compiles the three pattern lists of a configuration
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        Ok(Self::new(
            PatternList::compile("uri-blacklist", &config.uri_blacklist)?,
            PatternList::compile("uri-path-blacklist", &config.uri_path_blacklist)?,
            PatternList::compile("domain-whitelist", &config.domain_whitelist)?,
        ))
    }

    /// Runs a candidate through the pipeline and reports the deciding stage
    ///
    /// # Examples
    ///
    /// ```
    /// use link_spider::filter::{FilterSet, FilterVerdict, PatternList};
    /// use link_spider::url::Uri;
    ///
    /// let filters = FilterSet::new(
    ///     PatternList::compile("uri-blacklist", &["logout"]).unwrap(),
    ///     PatternList::default(),
    ///     PatternList::compile("domain-whitelist", &["^x\\.tld$"]).unwrap(),
    /// );
    ///
    /// let logout = Uri::parse_absolute("https://x.tld/logout").unwrap();
    /// assert_eq!(filters.evaluate(&logout), FilterVerdict::Blacklisted);
    ///
    /// let file = Uri::parse_absolute("https://x.tld/a.zip").unwrap();
    /// assert_eq!(filters.evaluate(&file), FilterVerdict::Accepted);
    /// ```
    pub fn evaluate(&self, candidate: &Uri) -> FilterVerdict {
        if self.uri_blacklist.matches_any(candidate.href()) {
            return FilterVerdict::Blacklisted;
        }

        if self
            .uri_path_blacklist
            .matches_any(&candidate.path_filter_target())
        {
            return FilterVerdict::PathBlacklisted;
        }

        if !candidate.was_relative() && !self.domain_whitelist.matches_any(candidate.host()) {
            return FilterVerdict::NotWhitelisted;
        }

        FilterVerdict::Accepted
    }

    /// Returns true if the candidate may enter the frontier
    pub fn accept(&self, candidate: &Uri) -> bool {
        self.evaluate(candidate).is_accepted()
    }

    /// The blacklist pattern behind a blacklist verdict
    ///
    /// Whitelist rejections have no single deciding pattern and yield `None`.
    pub fn rejecting_pattern(&self, candidate: &Uri, verdict: FilterVerdict) -> Option<&str> {
        match verdict {
            FilterVerdict::Blacklisted => self.uri_blacklist.first_match(candidate.href()),
            FilterVerdict::PathBlacklisted => self
                .uri_path_blacklist
                .first_match(&candidate.path_filter_target()),
            FilterVerdict::Accepted | FilterVerdict::NotWhitelisted => None,
        }
    }
}
