use crate::ConfigError;
use regex::{Regex, RegexBuilder};

/// An ordered list of compiled, case-insensitive patterns
///
/// Patterns are unanchored: a pattern matches if it is found anywhere in the
/// tested value. Anchor with `^`/`$` for exact matches.
#[derive(Debug, Clone, Default)]
pub struct PatternList {
    patterns: Vec<Regex>,
}

impl PatternList {
    /// Compiles every source string of a configuration list
    ///
    /// # Arguments
    ///
    /// * `list` - Name of the configuration list, used in error messages
    /// * `sources` - Pattern strings in configuration order
    ///
    /// # Returns
    ///
    /// * `Ok(PatternList)` - All patterns compiled
    /// * `Err(ConfigError::InvalidPattern)` - The first pattern that failed to compile
    ///
    /// # Example
    ///
    /// ```
    /// use link_spider::filter::PatternList;
    ///
    /// let list = PatternList::compile("uri-blacklist", &["LOGOUT".to_string()]).unwrap();
    /// assert!(list.matches_any("https://x.tld/logout"));
    /// ```
    pub fn compile<S: AsRef<str>>(list: &'static str, sources: &[S]) -> Result<Self, ConfigError> {
        let patterns = sources
            .iter()
            .map(|source| {
                let source = source.as_ref();
                RegexBuilder::new(source)
                    .case_insensitive(true)
                    .build()
                    .map_err(|e| ConfigError::InvalidPattern {
                        list,
                        pattern: source.to_string(),
                        source: e,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { patterns })
    }

    /// Returns true if at least one pattern matches the value
    pub fn matches_any(&self, value: &str) -> bool {
        self.patterns.iter().any(|pattern| pattern.is_match(value))
    }

    /// Returns the source of the first pattern matching the value
    pub fn first_match(&self, value: &str) -> Option<&str> {
        self.patterns
            .iter()
            .find(|pattern| pattern.is_match(value))
            .map(Regex::as_str)
    }
}
