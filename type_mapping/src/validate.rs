//! Validation utilities for type mapping
//!
//! This module provides checks on column types
//! used before values are handed to the driver.

use crate::types::DbType;

/// Check if a column type receives offset-aware timestamps as their UTC instant
///
/// `AnsiString` is what the MySQL driver reports for undeclared parameters.
pub fn stores_utc_datetime(db_type: DbType) -> bool {
    matches!(
        db_type,
        DbType::DateTime | DbType::DateTime2 | DbType::AnsiString
    )
}

/// Check if a column type keeps the UTC offset of a value
pub fn supports_offset(db_type: DbType) -> bool {
    matches!(db_type, DbType::DateTimeOffset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utc_datetime_column_types() {
        assert!(stores_utc_datetime(DbType::DateTime));
        assert!(stores_utc_datetime(DbType::DateTime2));
        assert!(stores_utc_datetime(DbType::AnsiString));
        assert!(!stores_utc_datetime(DbType::DateTimeOffset));
        assert!(!stores_utc_datetime(DbType::Date));
        assert!(!stores_utc_datetime(DbType::String));
    }

    #[test]
    fn test_only_offset_column_keeps_offset() {
        assert!(supports_offset(DbType::DateTimeOffset));
        assert!(!supports_offset(DbType::DateTime2));
        assert!(!supports_offset(DbType::AnsiString));
    }
}
