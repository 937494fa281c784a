//! Download manifest rendering
//!
//! The manifest is consumed by an external download tool (aria2c input-file
//! format). After a `==CUT==` marker line, every download is written as its
//! absolute href followed by an indented ` out=` option line naming the
//! URL-decoded destination path.

use crate::url::Uri;
use std::borrow::Cow;
use std::io::{self, Write};

/// Marker line separating crawl chatter from the manifest
pub const CUT_MARKER: &str = "==CUT==";

/// One download instruction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    /// Absolute href to download
    pub href: String,

    /// Decoded destination path
    pub destination: String,
}

/// Renders downloads into manifest entries, in discovery order
///
/// `destination = url_decode(download_path + pathname)`, where the first
/// occurrence of `strip` (if given) is removed from the pathname first.
///
/// # Example
///
/// ```
/// use link_spider::output::render;
/// use link_spider::url::Uri;
///
/// let downloads = vec![Uri::parse_absolute("https://x.tld/pub/My%20File.zip").unwrap()];
/// let entries = render(&downloads, "/srv/mirror", Some("/pub"));
/// assert_eq!(entries[0].href, "https://x.tld/pub/My%20File.zip");
/// assert_eq!(entries[0].destination, "/srv/mirror/My File.zip");
/// ```
pub fn render(downloads: &[Uri], download_path: &str, strip: Option<&str>) -> Vec<ManifestEntry> {
    downloads
        .iter()
        .map(|uri| {
            let pathname = match strip {
                Some(strip) => Cow::Owned(uri.pathname().replacen(strip, "", 1)),
                None => Cow::Borrowed(uri.pathname()),
            };

            ManifestEntry {
                href: uri.href().to_string(),
                destination: url_decode(&format!("{}{}", download_path, pathname)),
            }
        })
        .collect()
}

/// Writes the manifest marker and entries
pub fn write_manifest<W: Write>(writer: &mut W, entries: &[ManifestEntry]) -> io::Result<()> {
    writeln!(writer, "{}", CUT_MARKER)?;
    for entry in entries {
        writeln!(writer, "{}", entry.href)?;
        writeln!(writer, " out={}", entry.destination)?;
    }
    writer.flush()
}

/// Percent-decodes a path, replacing invalid UTF-8 sequences
fn url_decode(value: &str) -> String {
    match urlencoding::decode(value) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => String::from_utf8_lossy(&urlencoding::decode_binary(value.as_bytes())).into_owned(),
    }
}
