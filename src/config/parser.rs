//! Configuration loading and validation
//!
//! Reads a TOML configuration file, deserializes it into [`Config`], and
//! validates the values before the engine is allowed to start.

use crate::config::Config;
use crate::{ConfigError, ConfigResult};
use std::fs;
use std::path::Path;

/// Loads and validates a configuration file
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to read, parse, or validate
pub fn load_config(path: &Path) -> ConfigResult<Config> {
    let contents = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&contents)?;
    validate_config(&config)?;
    Ok(config)
}

/// Validates configuration values
///
/// Checks that timeouts, budgets, and limits are non-zero and that the
/// user agent and database path are non-empty.
pub fn validate_config(config: &Config) -> ConfigResult<()> {
    if config.crawler.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "crawler.user-agent must not be empty".to_string(),
        ));
    }

    if config.crawler.fetch_timeout_ms == 0 {
        return Err(ConfigError::Validation(
            "crawler.fetch-timeout-ms must be greater than zero".to_string(),
        ));
    }

    if config.crawler.robots_timeout_ms == 0 {
        return Err(ConfigError::Validation(
            "crawler.robots-timeout-ms must be greater than zero".to_string(),
        ));
    }

    if config.crawler.default_max_pages == 0 {
        return Err(ConfigError::Validation(
            "crawler.default-max-pages must be greater than zero".to_string(),
        ));
    }

    if config.search.result_limit == 0 {
        return Err(ConfigError::Validation(
            "search.result-limit must be greater than zero".to_string(),
        ));
    }

    if config.search.cache_ttl_secs == 0 {
        return Err(ConfigError::Validation(
            "search.cache-ttl-secs must be greater than zero".to_string(),
        ));
    }

    if config.storage.database_path.trim().is_empty() {
        return Err(ConfigError::Validation(
            "storage.database-path must not be empty".to_string(),
        ));
    }

    Ok(())
}
