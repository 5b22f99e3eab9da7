//! Configuration management for the Recetario Stock Service
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with RECETARIO_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Google-Sheets endpoint configuration
    pub sheet: SheetConfig,

    /// Local persistence configuration
    pub storage: StorageConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SheetConfig {
    /// Apps-Script endpoint URL. Sync endpoints fail with a configuration
    /// error when unset.
    pub endpoint: Option<String>,

    /// Request timeout in seconds
    pub timeout_seconds: u64,

    /// Number of additional attempts after a failed push
    pub retry_attempts: u32,

    /// Delay between retry attempts in milliseconds
    pub retry_delay_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Path of the JSON data file the store is snapshotted to. Unset runs
    /// fully in memory (used by tests).
    pub data_file: Option<String>,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("RECETARIO_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("sheet.timeout_seconds", 10)?
            .set_default("sheet.retry_attempts", 2)?
            .set_default("sheet.retry_delay_ms", 500)?
            .set_default("storage.data_file", "data/recetario.json")?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (RECETARIO_ prefix)
            .add_source(
                Environment::with_prefix("RECETARIO")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}
