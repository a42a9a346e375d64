//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub database: DatabaseConfig,
    pub site: SiteConfig,
    pub limits: LimitsConfig,
    pub logging: LoggingConfig,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Public site configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SiteConfig {
    pub base_url: String,
    pub reserved_slugs: Vec<String>,
}

/// Operational limits for bulk operations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LimitsConfig {
    pub import_max_rows: usize,
    pub batch_tables_max: u32,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file_path: String,
    pub max_file_size: String,
    pub max_files: u32,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::with_prefix("FESTPLAN"))
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::FestplanError> {
        super::validation::validate_settings(self)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                url: "postgresql://localhost/festplan".to_string(),
                max_connections: 10,
                min_connections: 1,
            },
            site: SiteConfig {
                base_url: "https://festplan.no".to_string(),
                reserved_slugs: vec![
                    "admin".to_string(),
                    "api".to_string(),
                    "www".to_string(),
                    "static".to_string(),
                ],
            },
            limits: LimitsConfig {
                import_max_rows: 500,
                batch_tables_max: 50,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: "/var/log/festplan".to_string(),
                max_file_size: "10MB".to_string(),
                max_files: 5,
            },
        }
    }
}
