//! Convenience re-exports for common chronomap usage
//!
//! # Example
//!
//! ```rust
//! use chronomap::prelude::*;
//!
//! chronomap::install();
//! assert!(registry().has_type_handler::<chrono::DateTime<chrono::FixedOffset>>());
//! ```

// Core chronomap components
pub use crate::core::{bootstrap, bootstrap_from_env};
pub use crate::errors::ChronomapError;
pub use crate::mysql::{bind_parameter, bind_value, native_value, read_column, read_nullable_column};
pub use crate::timestamp::{install, is_installed, DateTimeOffsetHandler};

// Re-export centralized config
pub use config::{AppConfig, ConfigError, MappingConfig};

// Registry types and traits
pub use type_mapping::{
    registry, registry_mut, DbParameter, DbType, FromNative, MappingError, NativeValue, ToNative,
    TypeHandler, TypeRegistry,
};

// Commonly used sqlx types
pub use sqlx::{MySqlPool, Row};
