//! Conversion traits
//!
//! Fallback conversions the registry uses for types that have no
//! registered [`TypeHandler`](crate::registry::TypeHandler).

use crate::errors::MappingError;
use crate::types::NativeValue;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Utc};

/// Convert a Rust value into the driver representation
pub trait ToNative {
    fn to_native(&self) -> NativeValue;
}

/// Convert a driver value back into a Rust value
pub trait FromNative: Sized {
    /// Name used in error messages
    const TYPE_NAME: &'static str;

    fn from_native(value: NativeValue) -> Result<Self, MappingError>;
}

impl<T> ToNative for T
where
    T: Clone + Into<NativeValue>,
{
    fn to_native(&self) -> NativeValue {
        self.clone().into()
    }
}

fn mismatch<T>(expected: &'static str, value: &NativeValue) -> Result<T, MappingError> {
    match value {
        NativeValue::Null => Err(MappingError::UnexpectedNull(expected)),
        other => Err(MappingError::TypeMismatch {
            expected,
            found: other.kind(),
        }),
    }
}

/// Implements `FromNative` for types read straight out of a single variant
macro_rules! from_native_variant {
    ($ty:ty, $name:literal, $variant:ident) => {
        impl FromNative for $ty {
            const TYPE_NAME: &'static str = $name;

            fn from_native(value: NativeValue) -> Result<Self, MappingError> {
                match value {
                    NativeValue::$variant(v) => Ok(v),
                    other => mismatch(Self::TYPE_NAME, &other),
                }
            }
        }
    };
}

from_native_variant!(String, "String", Text);
from_native_variant!(i64, "i64", Integer);
from_native_variant!(Vec<u8>, "Vec<u8>", Bytes);
from_native_variant!(NaiveDate, "NaiveDate", Date);
from_native_variant!(NaiveTime, "NaiveTime", Time);
from_native_variant!(NaiveDateTime, "NaiveDateTime", DateTime);
from_native_variant!(DateTime<FixedOffset>, "DateTime<FixedOffset>", DateTimeOffset);

impl FromNative for i32 {
    const TYPE_NAME: &'static str = "i32";

    fn from_native(value: NativeValue) -> Result<Self, MappingError> {
        match value {
            NativeValue::Integer(v) => i32::try_from(v).map_err(|_| MappingError::TypeMismatch {
                expected: Self::TYPE_NAME,
                found: "out of range Integer",
            }),
            other => mismatch(Self::TYPE_NAME, &other),
        }
    }
}

impl FromNative for i16 {
    const TYPE_NAME: &'static str = "i16";

    fn from_native(value: NativeValue) -> Result<Self, MappingError> {
        match value {
            NativeValue::Integer(v) => i16::try_from(v).map_err(|_| MappingError::TypeMismatch {
                expected: Self::TYPE_NAME,
                found: "out of range Integer",
            }),
            other => mismatch(Self::TYPE_NAME, &other),
        }
    }
}

impl FromNative for f64 {
    const TYPE_NAME: &'static str = "f64";

    fn from_native(value: NativeValue) -> Result<Self, MappingError> {
        match value {
            NativeValue::Float(v) => Ok(v),
            NativeValue::Integer(v) => Ok(v as f64),
            other => mismatch(Self::TYPE_NAME, &other),
        }
    }
}

impl FromNative for bool {
    const TYPE_NAME: &'static str = "bool";

    fn from_native(value: NativeValue) -> Result<Self, MappingError> {
        match value {
            NativeValue::Boolean(v) => Ok(v),
            // TINYINT(1)
            NativeValue::Integer(v) => Ok(v != 0),
            other => mismatch(Self::TYPE_NAME, &other),
        }
    }
}

impl FromNative for DateTime<Utc> {
    const TYPE_NAME: &'static str = "DateTime<Utc>";

    fn from_native(value: NativeValue) -> Result<Self, MappingError> {
        match value {
            NativeValue::DateTime(naive) => Ok(naive.and_utc()),
            NativeValue::DateTimeOffset(dt) => Ok(dt.with_timezone(&Utc)),
            other => mismatch(Self::TYPE_NAME, &other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_null_reports_unexpected_null() {
        assert_eq!(
            String::from_native(NativeValue::Null),
            Err(MappingError::UnexpectedNull("String"))
        );
    }

    #[test]
    fn test_wrong_variant_reports_mismatch() {
        assert_eq!(
            NaiveDateTime::from_native(NativeValue::Text("2024-01-01".to_string())),
            Err(MappingError::TypeMismatch {
                expected: "NaiveDateTime",
                found: "Text",
            })
        );
    }

    #[test]
    fn test_narrow_integers_are_range_checked() {
        assert_eq!(i32::from_native(NativeValue::Integer(42)), Ok(42));
        assert!(i16::from_native(NativeValue::Integer(i64::from(i16::MAX) + 1)).is_err());
    }

    #[test]
    fn test_tinyint_reads_as_bool() {
        assert_eq!(bool::from_native(NativeValue::Integer(1)), Ok(true));
        assert_eq!(bool::from_native(NativeValue::Integer(0)), Ok(false));
    }

    #[test]
    fn test_utc_datetime_reads_naive_as_utc() {
        let naive = NaiveDate::from_ymd_opt(2024, 6, 15)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .unwrap();

        let read = DateTime::<Utc>::from_native(NativeValue::DateTime(naive)).unwrap();
        assert_eq!(read.naive_utc(), naive);
    }

    #[test]
    fn test_to_native_uses_from_impls() {
        assert_eq!(5i16.to_native(), NativeValue::Integer(5));
        assert_eq!("abc".to_string().to_native(), NativeValue::Text("abc".to_string()));
    }
}
