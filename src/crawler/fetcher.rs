//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building HTTP clients with the configured user agent and timeouts
//! - HEAD requests to classify a URI by status and Content-Type
//! - GET requests to fetch HTML page content
//! - Error classification

use crate::config::{Credentials, FetcherConfig};
use crate::FetchError;
use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, redirect::Policy, Client};
use std::fmt;
use std::time::Duration;

/// Maximum number of redirects followed per request
const MAX_REDIRECTS: usize = 10;

/// HTTP method of a fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchMethod {
    /// Headers only, used to classify a URI
    Head,
    /// Full body, used for HTML pages
    Get,
}

impl fmt::Display for FetchMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Head => f.write_str("HEAD"),
            Self::Get => f.write_str("GET"),
        }
    }
}

/// What the fetcher learned about one URI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    /// Final URL after redirects
    pub final_url: String,

    /// HTTP status code
    pub status: u16,

    /// Content-Type header value
    pub content_type: Option<String>,

    /// Page body; only present for GET
    pub body: Option<String>,
}

/// Classification of a fetched URI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentClass {
    /// Successful and HTML: follow its links
    Html,
    /// Successful and anything else: record as a download
    Download,
    /// Non-success status: neither
    Unsuccessful,
}

impl FetchedPage {
    /// Returns true for 2xx statuses
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Returns true if the Content-Type names `text/html`, in any case
    pub fn is_html(&self) -> bool {
        self.content_type
            .as_deref()
            .map(|ct| ct.to_ascii_lowercase().contains("text/html"))
            .unwrap_or(false)
    }

    pub fn classify(&self) -> ContentClass {
        if !self.is_success() {
            ContentClass::Unsuccessful
        } else if self.is_html() {
            ContentClass::Html
        } else {
            ContentClass::Download
        }
    }
}

/// Capability to fetch one URI
///
/// The crawl core only depends on this contract. Implementations own their
/// own timeout and redirect policy.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(
        &self,
        href: &str,
        method: FetchMethod,
        auth: Option<&Credentials>,
    ) -> Result<FetchedPage, FetchError>;
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The fetcher configuration
///
/// # Example
///
/// ```no_run
/// use link_spider::config::FetcherConfig;
/// use link_spider::crawler::build_http_client;
///
/// let client = build_http_client(&FetcherConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &FetcherConfig) -> Result<Client, FetchError> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .redirect(Policy::limited(MAX_REDIRECTS))
        .gzip(true)
        .brotli(true)
        .build()
        .map_err(FetchError::Client)
}

/// [`PageFetcher`] backed by a `reqwest` client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &FetcherConfig) -> Result<Self, FetchError> {
        Ok(Self::with_client(build_http_client(config)?))
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(
        &self,
        href: &str,
        method: FetchMethod,
        auth: Option<&Credentials>,
    ) -> Result<FetchedPage, FetchError> {
        let mut request = match method {
            FetchMethod::Head => self.client.head(href),
            FetchMethod::Get => self.client.get(href),
        };

        if let Some(credentials) = auth {
            request = request.basic_auth(&credentials.username, Some(&credentials.password));
        }

        let response = request
            .send()
            .await
            .map_err(|e| classify_error(href, e))?;

        let final_url = response.url().to_string();
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let body = match method {
            FetchMethod::Head => None,
            FetchMethod::Get => Some(response.text().await.map_err(|e| FetchError::Body {
                url: final_url.clone(),
                message: e.to_string(),
            })?),
        };

        Ok(FetchedPage {
            final_url,
            status,
            content_type,
            body,
        })
    }
}

fn classify_error(href: &str, error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout {
            url: href.to_string(),
        }
    } else {
        FetchError::Http {
            url: href.to_string(),
            source: error,
        }
    }
}
