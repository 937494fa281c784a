use crate::url::Uri;
use crate::{ResolutionError, ResolveResult};
use std::borrow::Cow;
use url::{ParseError, Url};

/// Resolves a raw anchor string against the page it was found on
///
/// # Resolution Steps
///
/// 1. A protocol-relative anchor (`//host/path`) gets the base scheme prepended
/// 2. The anchor is parsed on its own; it is relative iff that parse has no host
/// 3. Relative anchors are re-parsed with the base href as the resolution base
///    and only stay relative if the result keeps the base's origin
/// 4. Absolute anchors are used as parsed
///
/// The result's `href` is always absolute. `raw` keeps the anchor exactly as
/// written (not the scheme-expanded form) for path blacklist testing.
///
/// # Errors
///
/// * `ResolutionError::Empty` - The anchor is empty or whitespace
/// * `ResolutionError::Parse` - The anchor cannot be parsed into a URI
/// * `ResolutionError::UnsupportedScheme` - The anchor resolves to a non-HTTP scheme
///
/// # Examples
///
/// ```
/// use link_spider::url::{resolve, Uri};
///
/// let base = Uri::parse_absolute("https://x.tld/p/q").unwrap();
///
/// let relative = resolve("/a/b", &base).unwrap();
/// assert_eq!(relative.href(), "https://x.tld/a/b");
/// assert!(relative.was_relative());
///
/// let protocol_relative = resolve("//y.tld/c", &base).unwrap();
/// assert_eq!(protocol_relative.href(), "https://y.tld/c");
/// assert!(!protocol_relative.was_relative());
/// ```
pub fn resolve(raw: &str, base: &Uri) -> ResolveResult<Uri> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ResolutionError::Empty(base.href().to_string()));
    }

    let expanded: Cow<'_, str> = if trimmed.starts_with("//") {
        Cow::Owned(format!("{}:{}", base.scheme(), trimmed))
    } else {
        Cow::Borrowed(trimmed)
    };

    match Url::parse(&expanded) {
        Ok(url) if url.host_str().is_some_and(|host| !host.is_empty()) => {
            Uri::from_url(raw, url, false)
        }
        // Parsed, but hostless (`mailto:`, `javascript:` and friends)
        Ok(_) | Err(ParseError::RelativeUrlWithoutBase) => {
            let url = base
                .as_url()
                .join(trimmed)
                .map_err(|e| parse_error(raw, base, e))?;
            // `\\host` and `/\host` join as scheme-relative; a foreign origin is not relative
            let same_origin = url.origin() == base.as_url().origin();
            Uri::from_url(raw, url, same_origin)
        }
        Err(e) => Err(parse_error(raw, base, e)),
    }
}

fn parse_error(raw: &str, base: &Uri, error: ParseError) -> ResolutionError {
    ResolutionError::Parse {
        raw: raw.to_string(),
        base: base.href().to_string(),
        message: error.to_string(),
    }
}
