use crate::config::types::{Config, OutputConfig, ScrapperConfig, UserAgentConfig};
use crate::ConfigError;
use url::Url;

/// Upper bound for the per-item timeout (seconds)
const MAX_ITEM_TIMEOUT_SECS: u64 = 300;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_scrapper_config(&config.scrapper)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates scrap run configuration
fn validate_scrapper_config(config: &ScrapperConfig) -> Result<(), ConfigError> {
    if config.item_timeout_secs < 1 || config.item_timeout_secs > MAX_ITEM_TIMEOUT_SECS {
        return Err(ConfigError::Validation(format!(
            "item_timeout_secs must be between 1 and {}, got {}",
            MAX_ITEM_TIMEOUT_SECS, config.item_timeout_secs
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // Name: non-empty, alphanumeric + hyphens only
    if config.name.is_empty() {
        return Err(ConfigError::Validation("name cannot be empty".to_string()));
    }

    if !config.name.chars().all(|c| c.is_alphanumeric() || c == '-') {
        return Err(ConfigError::Validation(format!(
            "name must contain only alphanumeric characters and hyphens, got '{}'",
            config.name
        )));
    }

    if config.version.trim().is_empty() || config.version.contains(char::is_whitespace) {
        return Err(ConfigError::Validation(format!(
            "version must be a single non-empty token, got '{}'",
            config.version
        )));
    }

    if let Some(contact_url) = &config.contact_url {
        Url::parse(contact_url)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.summary_path.is_empty() {
        return Err(ConfigError::Validation(
            "summary_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}
