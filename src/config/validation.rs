//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use super::Settings;
use crate::utils::errors::{EwmError, Result};

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_database_config(&settings.database)?;
    validate_stats_config(settings)?;
    validate_logging_config(&settings.logging)?;
    Ok(())
}

/// Validate database configuration
fn validate_database_config(config: &super::DatabaseConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(EwmError::Config("Database URL is required".to_string()));
    }

    if config.max_connections == 0 {
        return Err(EwmError::Config(
            "Max connections must be greater than 0".to_string(),
        ));
    }

    if config.min_connections > config.max_connections {
        return Err(EwmError::Config(
            "Min connections cannot be greater than max connections".to_string(),
        ));
    }

    Ok(())
}

/// Validate stats client and stats server configuration
fn validate_stats_config(settings: &Settings) -> Result<()> {
    if settings.stats.server_url.is_empty() {
        return Err(EwmError::Config(
            "Stats server URL is required".to_string(),
        ));
    }

    if settings.stats.timeout_seconds == 0 {
        return Err(EwmError::Config(
            "Stats client timeout must be greater than 0".to_string(),
        ));
    }

    if settings.stats_server.database_url.is_empty() {
        return Err(EwmError::Config(
            "Stats database URL is required".to_string(),
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(EwmError::Config(format!(
            "Invalid log level '{}', expected one of: {}",
            config.level,
            valid_levels.join(", ")
        )));
    }

    Ok(())
}
