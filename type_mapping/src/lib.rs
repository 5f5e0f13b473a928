//! Unified type mapping between Rust values and database column values
//! This crate provides the registry the chronomap ecosystem binds parameters and reads columns through

/// Registry diagnostics, compiled in only with the `debug-logging` feature
#[cfg(feature = "debug-logging")]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}

pub mod convert;
pub mod errors;
pub mod registry;
pub mod sql;
pub mod types;
pub mod validate;

// Re-export commonly used items
pub use convert::{FromNative, ToNative};
pub use errors::MappingError;
pub use registry::{registry, registry_mut, TypeHandler, TypeRegistry};
pub use sql::mysql_type_to_db_type;
pub use types::{DbParameter, DbType, NativeValue};
pub use validate::{stores_utc_datetime, supports_offset};
