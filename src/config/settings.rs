//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use serde::{Deserialize, Serialize};

/// Main application configuration structure, shared by both binaries
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub stats: StatsClientConfig,
    pub stats_server: StatsServerConfig,
    pub logging: LoggingConfig,
}

/// Main service HTTP listener configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Database configuration for the main service
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Stats client configuration (used by the main service)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StatsClientConfig {
    pub server_url: String,
    pub timeout_seconds: u64,
}

/// Stats service configuration: its own listener and its own database
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StatsServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub max_connections: u32,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file_path: Option<String>,
}

impl Settings {
    /// Load settings from the configuration file and environment variables.
    ///
    /// Environment overrides use the `EWM` prefix with `__` separators,
    /// e.g. `EWM__DATABASE__URL`.
    pub fn new() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::with_prefix("EWM").separator("__"))
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::EwmError> {
        super::validation::validate_settings(self)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
            },
            database: DatabaseConfig {
                url: "postgresql://localhost/ewm".to_string(),
                max_connections: 10,
                min_connections: 1,
            },
            stats: StatsClientConfig {
                server_url: "http://localhost:9090".to_string(),
                timeout_seconds: 5,
            },
            stats_server: StatsServerConfig {
                host: "0.0.0.0".to_string(),
                port: 9090,
                database_url: "postgresql://localhost/ewm_stats".to_string(),
                max_connections: 10,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: None,
            },
        }
    }
}
