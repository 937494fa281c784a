use crate::config::types::{Config, FetcherConfig};
use crate::filter::FilterSet;
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_paths(config)?;
    validate_strip_paths(config.uri_strip_paths.as_deref())?;
    validate_fetcher_config(&config.fetcher)?;

    // Compiling the filter lists is the pattern validation
    FilterSet::from_config(config)?;

    if config.domain_whitelist.is_empty() {
        tracing::warn!(
            "domain-whitelist is empty: every absolute link will be rejected"
        );
    }

    Ok(())
}

fn validate_paths(config: &Config) -> Result<(), ConfigError> {
    if config.download_path.is_empty() {
        return Err(ConfigError::Validation(
            "download-path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

fn validate_strip_paths(strip: Option<&str>) -> Result<(), ConfigError> {
    if let Some(strip) = strip {
        if strip.is_empty() {
            return Err(ConfigError::Validation(
                "uri-strip-paths cannot be empty when set".to_string(),
            ));
        }
    }

    Ok(())
}

fn validate_fetcher_config(config: &FetcherConfig) -> Result<(), ConfigError> {
    if config.timeout_secs < 1 || config.timeout_secs > 600 {
        return Err(ConfigError::Validation(format!(
            "timeout-secs must be between 1 and 600, got {}",
            config.timeout_secs
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}
