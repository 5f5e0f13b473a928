//! # chronomap
//!
//! Maps offset-aware timestamps (`chrono::DateTime<FixedOffset>`) onto MySQL
//! datetime columns, which carry no offset. Values are written as their UTC
//! instant and read back pinned to UTC.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chronomap::prelude::*;
//! use chrono::{DateTime, FixedOffset};
//!
//! # async fn run(pool: MySqlPool, ended_at: DateTime<FixedOffset>) -> Result<(), ChronomapError> {
//! // Once at startup, before the first query touching timestamps
//! chronomap::install();
//!
//! let query = sqlx::query("UPDATE scores SET ended_at = ? WHERE id = ?");
//! let query = bind_value(query, "ended_at", &ended_at, Some(DbType::DateTime))?;
//! query.bind(42i64).execute(&pool).await?;
//!
//! let row = sqlx::query("SELECT ended_at FROM scores WHERE id = 42")
//!     .fetch_one(&pool)
//!     .await?;
//! let ended_at: DateTime<FixedOffset> = read_column(&row, "ended_at")?;
//! assert_eq!(ended_at.offset().local_minus_utc(), 0);
//! # Ok(())
//! # }
//! ```

/// Conditional debug logging macros
/// These macros only compile in code when the `debug-logging` feature is enabled
#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}

pub mod core;
pub mod errors;
pub mod mysql;
pub mod prelude;
pub mod timestamp;

// Re-export the main public API for convenience
pub use crate::core::{bootstrap, bootstrap_from_env};
pub use crate::errors::ChronomapError;
pub use crate::timestamp::{install, is_installed, DateTimeOffsetHandler};

// Re-export centralized config
pub use config::{AppConfig, MappingConfig};

// Re-export internal crates used in the public API
pub use type_mapping;

// Re-export external dependencies used in public API
pub use chrono;
pub use sqlx;
