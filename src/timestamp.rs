//! UTC timestamp handler
//!
//! MySQL has no offset-aware temporal column, so offset-aware timestamps are
//! written as their UTC instant and read back pinned to UTC. The handler is
//! installed once per process into the global registry by [`install`].

use chrono::{DateTime, FixedOffset};
use std::sync::atomic::{AtomicBool, Ordering};
use type_mapping::{
    registry_mut, stores_utc_datetime, supports_offset, DbType, MappingError, NativeValue,
    TypeHandler,
};

static INSTALLED: AtomicBool = AtomicBool::new(false);

/// Maps `DateTime<FixedOffset>` (and its `Option`) onto MySQL datetime columns
#[derive(Debug, Default, Clone, Copy)]
pub struct DateTimeOffsetHandler;

impl TypeHandler<DateTime<FixedOffset>> for DateTimeOffsetHandler {
    fn encode(
        &self,
        value: &DateTime<FixedOffset>,
        db_type: DbType,
    ) -> Result<NativeValue, MappingError> {
        if supports_offset(db_type) {
            Ok(NativeValue::DateTimeOffset(*value))
        } else if stores_utc_datetime(db_type) {
            Ok(NativeValue::DateTime(value.naive_utc()))
        } else {
            Err(MappingError::InvalidConfiguration(
                "DateTimeOffset must be assigned to a DbType.DateTime SQL field.".to_string(),
            ))
        }
    }

    fn decode(&self, value: NativeValue) -> Result<DateTime<FixedOffset>, MappingError> {
        match value {
            NativeValue::DateTime(naive) => Ok(naive.and_utc().fixed_offset()),
            NativeValue::DateTimeOffset(dt) => Ok(dt),
            _ => Err(MappingError::InvalidConfiguration(
                "Must be DateTime or DateTimeOffset object to be mapped.".to_string(),
            )),
        }
    }
}

/// Install [`DateTimeOffsetHandler`] into the global registry
///
/// Only the first call changes the registry. Every caller returns after the
/// handler is in place. Assumes the registry's handlers are never reset
/// afterwards; if they are, the handler is not re-installed.
pub fn install() {
    // Held across the flag flip so no caller returns before the winner has
    // finished mutating the table
    let mut registry = registry_mut();
    if INSTALLED
        .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
        .is_err()
    {
        return;
    }

    // The default map targets DateTimeOffset columns, which MySQL lacks
    registry.remove_type_map::<DateTime<FixedOffset>>();
    registry.remove_type_map::<Option<DateTime<FixedOffset>>>();
    registry.add_type_handler::<DateTime<FixedOffset>, _>(DateTimeOffsetHandler);

    crate::debug_log!("Installed UTC timestamp handler for DateTime<FixedOffset>");
}

/// Whether [`install`] has run in this process
pub fn is_installed() -> bool {
    INSTALLED.load(Ordering::Acquire)
}
