//! # Configuration Management for chronomap
//!
//! This crate provides the configuration structures for the mapping layer.
//!
//! ## Quick Start
//!
//! ### Programmatic Configuration
//! ```rust
//! use config::{AppConfig, MappingConfig};
//!
//! let config = AppConfig {
//!     mapping: MappingConfig::new(true, "AnsiString".to_string()),
//! };
//! ```
//!
//! ### TOML File Configuration
//! ```toml
//! [mapping]
//! install_timestamp_handler = true
//! default_parameter_type = "AnsiString"
//! ```
//!
//! Load configuration:
//! ```rust,no_run
//! use config::AppConfig;
//!
//! // Load from chronomap.toml
//! let config = AppConfig::load()?;
//!
//! // Or load from custom path
//! let config = AppConfig::from_file("config/production.toml")?;
//! # Ok::<(), config::ConfigError>(())
//! ```

use serde::{Deserialize, Serialize};
use std::{env, path::Path};
use thiserror::Error;

const DEFAULT_CONFIG_PATH: &str = "./chronomap.toml";
const CONFIG_PATH_ENV: &str = "CHRONOMAP_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Environment variable error: {0}")]
    Env(#[from] env::VarError),
    #[error("Dotenvy error: {0}")]
    Dotenvy(#[from] dotenvy::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub mapping: MappingConfig,
}

/// Mapping layer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappingConfig {
    /// Install the UTC timestamp handler during bootstrap
    #[serde(default = "default_install")]
    pub install_timestamp_handler: bool,
    /// Column type for parameters with neither a declared nor a mapped type
    #[serde(default = "default_parameter_type")]
    pub default_parameter_type: String,
}

fn default_install() -> bool {
    true
}

fn default_parameter_type() -> String {
    "AnsiString".to_string()
}

impl Default for MappingConfig {
    fn default() -> Self {
        Self {
            install_timestamp_handler: default_install(),
            default_parameter_type: default_parameter_type(),
        }
    }
}

impl AppConfig {
    /// Load configuration from TOML file specified in .env or defaults
    pub fn load() -> Result<Self, ConfigError> {
        // A missing .env file is fine; the variable may be set directly
        match dotenvy::dotenv() {
            Ok(_) => {}
            Err(err) if err.not_found() => {}
            Err(err) => return Err(err.into()),
        }

        if let Ok(config_path) = env::var(CONFIG_PATH_ENV) {
            Self::from_file(&config_path)
        } else if Path::new(DEFAULT_CONFIG_PATH).exists() {
            Self::from_file(DEFAULT_CONFIG_PATH)
        } else {
            Err(ConfigError::Invalid(format!(
                "Config path must be specified in .env file as {} or in {} file",
                CONFIG_PATH_ENV, DEFAULT_CONFIG_PATH
            )))
        }
    }

    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        // The column type name itself is resolved when the registry is bootstrapped
        if self.mapping.default_parameter_type.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "Mapping default_parameter_type cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

impl MappingConfig {
    /// Create a new mapping configuration
    pub fn new(install_timestamp_handler: bool, default_parameter_type: String) -> Self {
        Self {
            install_timestamp_handler,
            default_parameter_type,
        }
    }
}
