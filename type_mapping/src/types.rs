//! Type mapping definitions
//!
//! This module provides the column types, driver values and parameters
//! exchanged between application code and the database driver.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use std::fmt;
use std::str::FromStr;

/// Declared storage type of a parameter or column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DbType {
    AnsiString,
    String,
    Binary,
    Boolean,
    Int16,
    Int32,
    Int64,
    Double,
    Decimal,
    Date,
    Time,
    DateTime,
    DateTime2,
    DateTimeOffset,
}

impl DbType {
    pub const ALL: [DbType; 14] = [
        DbType::AnsiString,
        DbType::String,
        DbType::Binary,
        DbType::Boolean,
        DbType::Int16,
        DbType::Int32,
        DbType::Int64,
        DbType::Double,
        DbType::Decimal,
        DbType::Date,
        DbType::Time,
        DbType::DateTime,
        DbType::DateTime2,
        DbType::DateTimeOffset,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            DbType::AnsiString => "AnsiString",
            DbType::String => "String",
            DbType::Binary => "Binary",
            DbType::Boolean => "Boolean",
            DbType::Int16 => "Int16",
            DbType::Int32 => "Int32",
            DbType::Int64 => "Int64",
            DbType::Double => "Double",
            DbType::Decimal => "Decimal",
            DbType::Date => "Date",
            DbType::Time => "Time",
            DbType::DateTime => "DateTime",
            DbType::DateTime2 => "DateTime2",
            DbType::DateTimeOffset => "DateTimeOffset",
        }
    }
}

impl fmt::Display for DbType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DbType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        DbType::ALL
            .iter()
            .copied()
            .find(|db_type| db_type.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| format!("Unknown column type: {}", trimmed))
    }
}

/// Raw value handed to or received from the database driver
#[derive(Debug, Clone, PartialEq)]
pub enum NativeValue {
    Null,
    Text(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Bytes(Vec<u8>),
    Date(NaiveDate),
    Time(NaiveTime),
    /// Offset-less date and time, as MySQL DATETIME/TIMESTAMP columns carry it
    DateTime(NaiveDateTime),
    DateTimeOffset(DateTime<FixedOffset>),
}

impl NativeValue {
    /// Variant name, used in mismatch diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            NativeValue::Null => "Null",
            NativeValue::Text(_) => "Text",
            NativeValue::Integer(_) => "Integer",
            NativeValue::Float(_) => "Float",
            NativeValue::Boolean(_) => "Boolean",
            NativeValue::Bytes(_) => "Bytes",
            NativeValue::Date(_) => "Date",
            NativeValue::Time(_) => "Time",
            NativeValue::DateTime(_) => "DateTime",
            NativeValue::DateTimeOffset(_) => "DateTimeOffset",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, NativeValue::Null)
    }
}

/// A bound query parameter
///
/// `db_type` is fixed when the parameter is created; handlers only write `value`.
#[derive(Debug, Clone, PartialEq)]
pub struct DbParameter {
    pub name: String,
    pub db_type: DbType,
    pub value: NativeValue,
}

impl DbParameter {
    pub fn new(name: impl Into<String>, db_type: DbType) -> Self {
        Self {
            name: name.into(),
            db_type,
            value: NativeValue::Null,
        }
    }
}

impl From<String> for NativeValue {
    fn from(val: String) -> Self {
        NativeValue::Text(val)
    }
}

impl From<&str> for NativeValue {
    fn from(val: &str) -> Self {
        NativeValue::Text(val.to_string())
    }
}

impl From<i16> for NativeValue {
    fn from(val: i16) -> Self {
        NativeValue::Integer(val as i64)
    }
}

impl From<i32> for NativeValue {
    fn from(val: i32) -> Self {
        NativeValue::Integer(val as i64)
    }
}

impl From<i64> for NativeValue {
    fn from(val: i64) -> Self {
        NativeValue::Integer(val)
    }
}

impl From<f64> for NativeValue {
    fn from(val: f64) -> Self {
        NativeValue::Float(val)
    }
}

impl From<bool> for NativeValue {
    fn from(val: bool) -> Self {
        NativeValue::Boolean(val)
    }
}

impl From<Vec<u8>> for NativeValue {
    fn from(val: Vec<u8>) -> Self {
        NativeValue::Bytes(val)
    }
}

impl From<NaiveDate> for NativeValue {
    fn from(val: NaiveDate) -> Self {
        NativeValue::Date(val)
    }
}

impl From<NaiveTime> for NativeValue {
    fn from(val: NaiveTime) -> Self {
        NativeValue::Time(val)
    }
}

impl From<NaiveDateTime> for NativeValue {
    fn from(val: NaiveDateTime) -> Self {
        NativeValue::DateTime(val)
    }
}

// MySQL stores UTC timestamps without an offset
impl From<DateTime<Utc>> for NativeValue {
    fn from(val: DateTime<Utc>) -> Self {
        NativeValue::DateTime(val.naive_utc())
    }
}

impl From<DateTime<FixedOffset>> for NativeValue {
    fn from(val: DateTime<FixedOffset>) -> Self {
        NativeValue::DateTimeOffset(val)
    }
}

impl<T> From<Option<T>> for NativeValue
where
    T: Into<NativeValue>,
{
    fn from(val: Option<T>) -> Self {
        match val {
            Some(v) => v.into(),
            None => NativeValue::Null,
        }
    }
}
