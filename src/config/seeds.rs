use crate::config::parser::read_file;
use crate::url::Uri;
use crate::ConfigError;
use std::path::Path;

/// Loads the seed list from a file
///
/// # Arguments
///
/// * `path` - Path to the seed list, one absolute URI per line
///
/// # Returns
///
/// * `Ok(Vec<Uri>)` - Seeds in file order
/// * `Err(ConfigError)` - The file is unreadable, empty, or has a malformed line
pub fn load_seeds(path: &Path) -> Result<Vec<Uri>, ConfigError> {
    let content = read_file(path)?;
    let seeds = parse_seeds(&content)?;

    if seeds.is_empty() {
        return Err(ConfigError::NoSeeds(path.display().to_string()));
    }

    Ok(seeds)
}

/// Parses seed list content
///
/// Blank lines and lines starting with `#` are skipped. Every other line must
/// be an absolute `http`/`https` URI.
///
/// # Example
///
/// ```
/// use link_spider::config::parse_seeds;
///
/// let seeds = parse_seeds("# mirrors\nhttps://x.tld/pub/\n\nhttps://y.tld/\n").unwrap();
/// assert_eq!(seeds.len(), 2);
/// assert_eq!(seeds[0].href(), "https://x.tld/pub/");
/// ```
pub fn parse_seeds(content: &str) -> Result<Vec<Uri>, ConfigError> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .map(|(index, line)| {
            Uri::parse_absolute(line).map_err(|source| ConfigError::InvalidSeed {
                line: index + 1,
                source,
            })
        })
        .collect()
}
