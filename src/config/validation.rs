//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use super::Settings;
use crate::utils::errors::{FestplanError, Result};

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_database_config(&settings.database)?;
    validate_site_config(&settings.site)?;
    validate_limits_config(&settings.limits)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate database configuration
fn validate_database_config(config: &super::DatabaseConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(FestplanError::Config(
            "Database URL is required".to_string(),
        ));
    }

    if config.max_connections == 0 {
        return Err(FestplanError::Config(
            "Max connections must be greater than 0".to_string(),
        ));
    }

    if config.min_connections > config.max_connections {
        return Err(FestplanError::Config(
            "Min connections cannot be greater than max connections".to_string(),
        ));
    }

    Ok(())
}

/// Validate public site configuration
fn validate_site_config(config: &super::SiteConfig) -> Result<()> {
    if config.base_url.is_empty() {
        return Err(FestplanError::Config(
            "Site base URL is required".to_string(),
        ));
    }

    if !config.base_url.starts_with("http://") && !config.base_url.starts_with("https://") {
        return Err(FestplanError::Config(format!(
            "Site base URL must start with http:// or https://, got: {}",
            config.base_url
        )));
    }

    Ok(())
}

/// Validate bulk operation limits
fn validate_limits_config(config: &super::LimitsConfig) -> Result<()> {
    if config.import_max_rows == 0 {
        return Err(FestplanError::Config(
            "Import row limit must be greater than 0".to_string(),
        ));
    }

    if config.batch_tables_max == 0 {
        return Err(FestplanError::Config(
            "Batch table limit must be greater than 0".to_string(),
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(FestplanError::Config("Log level is required".to_string()));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(FestplanError::Config(format!(
            "Invalid log level: {}. Valid levels: {:?}",
            config.level, valid_levels
        )));
    }

    Ok(())
}
