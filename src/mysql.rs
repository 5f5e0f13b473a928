//! MySQL driver glue
//!
//! Hands registry parameters to sqlx queries and turns MySQL columns back
//! into [`NativeValue`]s for the registry to decode.

use chrono::{DateTime, FixedOffset};
use sqlx::mysql::{MySql, MySqlArguments, MySqlRow};
use sqlx::query::Query;
use sqlx::{Column, ColumnIndex, Row, TypeInfo, ValueRef};
use std::fmt::Debug;
use type_mapping::{
    mysql_type_to_db_type, registry, DbParameter, DbType, FromNative, MappingError, NativeValue,
    ToNative,
};

use crate::errors::ChronomapError;

pub type MySqlQuery<'q> = Query<'q, MySql, MySqlArguments>;

// MySQL 8.0.19+ accepts an offset suffix on datetime literals
const OFFSET_LITERAL_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f%:z";

fn offset_literal(value: &DateTime<FixedOffset>) -> String {
    value.format(OFFSET_LITERAL_FORMAT).to_string()
}

/// Bind a registry parameter to a query
pub fn bind_parameter<'q>(query: MySqlQuery<'q>, parameter: DbParameter) -> MySqlQuery<'q> {
    match parameter.value {
        NativeValue::Null => query.bind(None::<String>),
        NativeValue::Text(s) => query.bind(s),
        NativeValue::Integer(i) => query.bind(i),
        NativeValue::Float(f) => query.bind(f),
        NativeValue::Boolean(b) => query.bind(b),
        NativeValue::Bytes(bytes) => query.bind(bytes),
        NativeValue::Date(date) => query.bind(date),
        NativeValue::Time(time) => query.bind(time),
        NativeValue::DateTime(naive) => query.bind(naive),
        NativeValue::DateTimeOffset(dt) => query.bind(offset_literal(&dt)),
    }
}

/// Encode `value` through the global registry and bind it
pub fn bind_value<'q, T>(
    query: MySqlQuery<'q>,
    name: &str,
    value: &T,
    declared: Option<DbType>,
) -> Result<MySqlQuery<'q>, ChronomapError>
where
    T: ToNative + 'static,
{
    let parameter = registry().bind(name, value, declared)?;
    Ok(bind_parameter(query, parameter))
}

/// Read a column as the driver's native value
pub fn native_value<I>(row: &MySqlRow, index: I) -> Result<NativeValue, sqlx::Error>
where
    I: ColumnIndex<MySqlRow> + Copy + Debug,
{
    if row.try_get_raw(index)?.is_null() {
        return Ok(NativeValue::Null);
    }

    let type_name = row.try_column(index)?.type_info().name().to_string();
    let unsigned = type_name.contains("UNSIGNED");

    let value = match mysql_type_to_db_type(&type_name) {
        Some(DbType::String | DbType::AnsiString) => NativeValue::Text(row.try_get(index)?),
        Some(DbType::Binary) => NativeValue::Bytes(row.try_get(index)?),
        Some(DbType::Boolean) => NativeValue::Boolean(row.try_get(index)?),
        Some(DbType::Int16 | DbType::Int32 | DbType::Int64) if unsigned => {
            let raw: u64 = row.try_get(index)?;
            let value = i64::try_from(raw).map_err(|err| sqlx::Error::ColumnDecode {
                index: format!("{:?}", index),
                source: Box::new(err),
            })?;
            NativeValue::Integer(value)
        }
        Some(DbType::Int16 | DbType::Int32 | DbType::Int64) => {
            NativeValue::Integer(row.try_get(index)?)
        }
        Some(DbType::Double) => NativeValue::Float(row.try_get(index)?),
        Some(DbType::Decimal) => NativeValue::Text(row.try_get_unchecked(index)?),
        Some(DbType::Date) => NativeValue::Date(row.try_get(index)?),
        Some(DbType::Time) => NativeValue::Time(row.try_get(index)?),
        Some(DbType::DateTime | DbType::DateTime2 | DbType::DateTimeOffset) => {
            NativeValue::DateTime(row.try_get(index)?)
        }
        None => {
            return Err(sqlx::Error::ColumnDecode {
                index: format!("{:?}", index),
                source: Box::new(MappingError::InvalidConfiguration(format!(
                    "unsupported MySQL column type {}",
                    type_name
                ))),
            })
        }
    };
    Ok(value)
}

/// Read and decode a non-nullable column through the global registry
pub fn read_column<T, I>(row: &MySqlRow, index: I) -> Result<T, ChronomapError>
where
    T: FromNative + 'static,
    I: ColumnIndex<MySqlRow> + Copy + Debug,
{
    let value = native_value(row, index)?;
    Ok(registry().read(value)?)
}

/// Read and decode a nullable column through the global registry
pub fn read_nullable_column<T, I>(row: &MySqlRow, index: I) -> Result<Option<T>, ChronomapError>
where
    T: FromNative + 'static,
    I: ColumnIndex<MySqlRow> + Copy + Debug,
{
    let value = native_value(row, index)?;
    Ok(registry().read_nullable(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_offset_literal_keeps_offset() {
        let ts = FixedOffset::east_opt(2 * 3600)
            .unwrap()
            .with_ymd_and_hms(2024, 1, 1, 10, 0, 0)
            .unwrap();
        assert_eq!(offset_literal(&ts), "2024-01-01 10:00:00.000000+02:00");
    }

    #[test]
    fn test_offset_literal_negative_offset() {
        let ts = FixedOffset::west_opt(5 * 3600 + 30 * 60)
            .unwrap()
            .with_ymd_and_hms(2023, 12, 31, 23, 59, 59)
            .unwrap();
        assert_eq!(offset_literal(&ts), "2023-12-31 23:59:59.000000-05:30");
    }
}
