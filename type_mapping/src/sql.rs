//! SQL type conversion utilities
//!
//! This module maps the column type names the MySQL driver
//! reports onto column types.

use crate::types::DbType;

/// Map a MySQL column type name, as reported by the driver, to a column type
pub fn mysql_type_to_db_type(mysql_type: &str) -> Option<DbType> {
    // Normalize e.g. "int unsigned" / "DATETIME(6)" for consistent matching
    let upper = mysql_type.trim().to_ascii_uppercase();
    let base = upper
        .split(|c: char| c == '(' || c.is_whitespace())
        .next()
        .unwrap_or_default();
    match base {
        "CHAR" | "VARCHAR" | "TEXT" | "TINYTEXT" | "MEDIUMTEXT" | "LONGTEXT" | "ENUM" | "SET" => {
            Some(DbType::String)
        }
        "BINARY" | "VARBINARY" | "BLOB" | "TINYBLOB" | "MEDIUMBLOB" | "LONGBLOB" => {
            Some(DbType::Binary)
        }
        "BOOLEAN" | "BOOL" => Some(DbType::Boolean),
        "TINYINT" if upper.starts_with("TINYINT(1)") => Some(DbType::Boolean),
        "TINYINT" | "SMALLINT" => Some(DbType::Int16),
        "MEDIUMINT" | "INT" | "INTEGER" => Some(DbType::Int32),
        "BIGINT" => Some(DbType::Int64),
        "FLOAT" | "DOUBLE" | "REAL" => Some(DbType::Double),
        "DECIMAL" | "NUMERIC" => Some(DbType::Decimal),
        "DATE" => Some(DbType::Date),
        "TIME" => Some(DbType::Time),
        "DATETIME" | "TIMESTAMP" if upper.contains('(') => Some(DbType::DateTime2),
        "DATETIME" | "TIMESTAMP" => Some(DbType::DateTime),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_driver_names_map_to_column_types() {
        assert_eq!(mysql_type_to_db_type("DATETIME"), Some(DbType::DateTime));
        assert_eq!(mysql_type_to_db_type("timestamp"), Some(DbType::DateTime));
        assert_eq!(mysql_type_to_db_type("DATETIME(6)"), Some(DbType::DateTime2));
        assert_eq!(mysql_type_to_db_type("INT UNSIGNED"), Some(DbType::Int32));
        assert_eq!(mysql_type_to_db_type("TINYINT(1)"), Some(DbType::Boolean));
        assert_eq!(mysql_type_to_db_type("TINYINT"), Some(DbType::Int16));
        assert_eq!(mysql_type_to_db_type("GEOMETRY"), None);
    }
}
