use crate::{ResolutionError, ResolveResult};
use std::fmt;
use url::Url;

/// A discovered crawl target
///
/// A `Uri` is built once, either from a seed line or from an anchor found on
/// a page, and never changes afterwards. The canonical [`href`](Uri::href)
/// is always absolute and has its fragment removed, which makes it the dedup
/// key for the frontier. The fragment is kept separately in
/// [`hash`](Uri::hash) for path filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Uri {
    raw: String,
    url: Url,
    hash: String,
    was_relative: bool,
}

impl Uri {
    /// Parses an absolute URI such as a seed line
    ///
    /// The input must carry an `http` or `https` scheme and a host.
    ///
    /// # Examples
    ///
    /// ```
    /// use link_spider::url::Uri;
    ///
    /// let uri = Uri::parse_absolute("https://Example.com/files/?C=M#top").unwrap();
    /// assert_eq!(uri.href(), "https://example.com/files/?C=M");
    /// assert_eq!(uri.host(), "example.com");
    /// assert_eq!(uri.hash(), "#top");
    /// assert!(!uri.was_relative());
    /// ```
    pub fn parse_absolute(input: &str) -> ResolveResult<Self> {
        let trimmed = input.trim();
        let url = Url::parse(trimmed).map_err(|e| ResolutionError::Parse {
            raw: input.to_string(),
            base: "(none)".to_string(),
            message: e.to_string(),
        })?;

        Self::from_url(input, url, false)
    }

    /// Builds a `Uri` from an already parsed URL
    ///
    /// Rejects anything that is not crawlable over HTTP.
    pub(crate) fn from_url(raw: &str, mut url: Url, was_relative: bool) -> ResolveResult<Self> {
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ResolutionError::UnsupportedScheme {
                raw: raw.to_string(),
                scheme: url.scheme().to_string(),
            });
        }

        let hash = url
            .fragment()
            .map(|fragment| format!("#{}", fragment))
            .unwrap_or_default();
        url.set_fragment(None);

        Ok(Self {
            raw: raw.to_string(),
            url,
            hash,
            was_relative,
        })
    }

    /// The literal string as discovered, before resolution
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Canonical absolute form, used as the dedup key
    pub fn href(&self) -> &str {
        self.url.as_str()
    }

    pub fn scheme(&self) -> &str {
        self.url.scheme()
    }

    /// Host without port
    pub fn host(&self) -> &str {
        self.url.host_str().unwrap_or_default()
    }

    pub fn pathname(&self) -> &str {
        self.url.path()
    }

    /// Query string including its leading `?`, or empty
    pub fn query(&self) -> String {
        self.url
            .query()
            .map(|query| format!("?{}", query))
            .unwrap_or_default()
    }

    /// Fragment including its leading `#`, or empty
    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// True if the raw form had no host before resolution
    pub fn was_relative(&self) -> bool {
        self.was_relative
    }

    /// The value the path blacklist is tested against
    ///
    /// Relative candidates are tested in the form they were written in;
    /// absolute ones by `pathname + query + hash`.
    pub fn path_filter_target(&self) -> String {
        if self.was_relative {
            self.raw.clone()
        } else {
            format!("{}{}{}", self.pathname(), self.query(), self.hash)
        }
    }

    /// The fragment-free parsed URL, used as a resolution base
    pub fn as_url(&self) -> &Url {
        &self.url
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.href())
    }
}
