//! Core chronomap functionality
//!
//! Startup wiring for the data-access layer: applies configuration to the
//! global registry and installs the timestamp handler.

use type_mapping::{registry_mut, DbType};

use crate::errors::ChronomapError;
use crate::timestamp;
use config::{AppConfig, ConfigError};

/// Configure the global registry from `config`
///
/// Safe to call more than once; the handler install is idempotent and the
/// default parameter type is simply overwritten.
pub fn bootstrap(config: &AppConfig) -> Result<(), ChronomapError> {
    config.validate()?;

    let default_type: DbType = config
        .mapping
        .default_parameter_type
        .parse()
        .map_err(ConfigError::Invalid)?;
    registry_mut().set_default_db_type(default_type);

    if config.mapping.install_timestamp_handler {
        timestamp::install();
    }

    crate::debug_log!(
        "Bootstrapped mapping registry (default parameter type: {}, timestamp handler: {})",
        default_type,
        timestamp::is_installed()
    );
    Ok(())
}

/// Load configuration the default way and bootstrap from it
pub fn bootstrap_from_env() -> Result<AppConfig, ChronomapError> {
    let config = AppConfig::load()?;
    bootstrap(&config)?;
    Ok(config)
}
