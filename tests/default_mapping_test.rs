//! Behaviour of offset-aware timestamps before the handler is installed

use chrono::{DateTime, FixedOffset, TimeZone};
use chronomap::prelude::*;
use pretty_assertions::assert_eq;

#[test]
fn test_uninstalled_registry_targets_offset_columns() {
    assert!(!chronomap::is_installed());

    let ts = FixedOffset::east_opt(2 * 3600)
        .unwrap()
        .with_ymd_and_hms(2024, 1, 1, 10, 0, 0)
        .unwrap();

    let registry = registry();
    assert!(!registry.has_type_handler::<DateTime<FixedOffset>>());

    let param = registry.bind("ended_at", &ts, None).unwrap();
    assert_eq!(param.db_type, DbType::DateTimeOffset);
    assert_eq!(param.value, NativeValue::DateTimeOffset(ts));

    // Without the handler, offset-less driver values are not accepted
    let naive = ts.naive_utc();
    assert!(registry
        .read::<DateTime<FixedOffset>>(NativeValue::DateTime(naive))
        .is_err());
}
