use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use link_spider::config::load_config;
///
/// let config = load_config(Path::new("config.toml")).unwrap();
/// println!("Whitelisted domains: {}", config.domain_whitelist.len());
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = read_file(path)?;

    let config: Config = toml::from_str(&content)?;

    validate(&config)?;

    Ok(config)
}

/// Computes a SHA-256 hash of the configuration file content
///
/// # Returns
///
/// * `Ok(String)` - Hex-encoded SHA-256 hash of the file content
/// * `Err(ConfigError)` - Failed to read the file
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = read_file(path)?;
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let result = hasher.finalize();
    Ok(hex::encode(result))
}

/// Loads a configuration and returns both the config and its hash
pub fn load_config_with_hash(path: &Path) -> Result<(Config, String), ConfigError> {
    let config = load_config(path)?;
    let hash = compute_config_hash(path)?;
    Ok((config, hash))
}

/// Replaces a leading `~` with the given home directory
///
/// Only a tilde followed by the end of the string, `/` or `\` is expanded;
/// `~user/...` and paths without a home directory are returned unchanged.
///
/// # Examples
///
/// ```
/// use link_spider::config::expand_tilde;
/// use std::path::PathBuf;
///
/// assert_eq!(expand_tilde("~/uris.txt", Some("/home/me")), PathBuf::from("/home/me/uris.txt"));
/// assert_eq!(expand_tilde("~other/uris.txt", Some("/home/me")), PathBuf::from("~other/uris.txt"));
/// ```
pub fn expand_tilde(path: &str, home: Option<&str>) -> PathBuf {
    match (path.strip_prefix('~'), home) {
        (Some(rest), Some(home)) if rest.is_empty() || rest.starts_with(['/', '\\']) => {
            PathBuf::from(format!("{}{}", home, rest))
        }
        _ => PathBuf::from(path),
    }
}

pub(crate) fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })
}

impl Config {
    /// Location of the seed list with `~` expanded against `$HOME`
    ///
    /// Fails if no seed list was configured in the file or on the command line.
    pub fn seed_file_path(&self) -> Result<PathBuf, ConfigError> {
        if self.uri_file.trim().is_empty() {
            return Err(ConfigError::Validation(
                "uri-file is not set (use the config file, --uri-file or URI_FILE)".to_string(),
            ));
        }

        let home = std::env::var("HOME").ok();
        Ok(expand_tilde(&self.uri_file, home.as_deref()))
    }
}
