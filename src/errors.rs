//! Error types for the chronomap crate
//!
//! This module contains all error types that can be returned by chronomap operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChronomapError {
    #[error("Mapping error: {0}")]
    Mapping(#[from] type_mapping::MappingError),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}
