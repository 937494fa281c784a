//! HTML anchor extraction
//!
//! The extractor returns the `href` attribute of every `<a href>` element in
//! document order, exactly as written. Duplicates are kept; resolving and
//! filtering are left to the crawl core.

use crate::crawler::fetcher::FetchedPage;
use crate::ExtractionError;
use scraper::{Html, Selector};

/// Capability to pull raw anchor strings out of a fetched page
pub trait LinkExtractor: Send + Sync {
    fn extract_anchors(&self, page: &FetchedPage) -> Result<Vec<String>, ExtractionError>;
}

/// [`LinkExtractor`] for HTML bodies, backed by `scraper`
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlLinkExtractor;

impl LinkExtractor for HtmlLinkExtractor {
    fn extract_anchors(&self, page: &FetchedPage) -> Result<Vec<String>, ExtractionError> {
        let body = page
            .body
            .as_deref()
            .ok_or_else(|| ExtractionError::MissingBody(page.final_url.clone()))?;

        extract_anchors(body)
    }
}

/// Extracts the raw `href` of every anchor in an HTML document
///
/// # Example
///
/// ```
/// use link_spider::crawler::extract_anchors;
///
/// let html = r##"<html><body><a href="/a.zip">A</a><a href="#top">Top</a><a>none</a></body></html>"##;
/// assert_eq!(extract_anchors(html).unwrap(), vec!["/a.zip", "#top"]);
/// ```
pub fn extract_anchors(html: &str) -> Result<Vec<String>, ExtractionError> {
    let document = Html::parse_document(html);
    let selector =
        Selector::parse("a[href]").map_err(|e| ExtractionError::Selector(format!("{:?}", e)))?;

    Ok(document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .map(str::to_string)
        .collect())
}
