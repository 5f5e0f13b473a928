//! Process-wide mapping registry
//!
//! Routes values to and from the driver by Rust type. A type either has a
//! registered [`TypeHandler`], or falls back to [`ToNative`]/[`FromNative`].
//! The column type of a bound parameter comes from the caller, then from
//! the type map, then from the registry default.

use crate::convert::{FromNative, ToNative};
use crate::errors::MappingError;
use crate::types::{DbParameter, DbType, NativeValue};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use once_cell::sync::Lazy;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Encode/decode pair registered for one application type
///
/// A handler registered for `T` also serves `Option<T>`.
pub trait TypeHandler<T>: Send + Sync {
    /// Convert `value` for a parameter declared as `db_type`
    fn encode(&self, value: &T, db_type: DbType) -> Result<NativeValue, MappingError>;

    /// Convert a value returned by the driver
    fn decode(&self, value: NativeValue) -> Result<T, MappingError>;

    /// Write `value` into `parameter`, keeping its declared column type
    fn set_value(&self, parameter: &mut DbParameter, value: &T) -> Result<(), MappingError> {
        parameter.value = self.encode(value, parameter.db_type)?;
        Ok(())
    }
}

pub struct TypeRegistry {
    type_maps: HashMap<TypeId, DbType>,
    // Each entry is an `Arc<dyn TypeHandler<T>>` keyed by `TypeId::of::<T>()`
    handlers: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
    default_db_type: DbType,
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    /// Create a registry seeded with the default type maps
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.seed::<String>(DbType::String);
        registry.seed::<bool>(DbType::Boolean);
        registry.seed::<i16>(DbType::Int16);
        registry.seed::<i32>(DbType::Int32);
        registry.seed::<i64>(DbType::Int64);
        registry.seed::<f64>(DbType::Double);
        registry.seed::<Vec<u8>>(DbType::Binary);
        registry.seed::<NaiveDate>(DbType::Date);
        registry.seed::<NaiveTime>(DbType::Time);
        registry.seed::<NaiveDateTime>(DbType::DateTime);
        registry.seed::<DateTime<Utc>>(DbType::DateTime);
        registry.seed::<DateTime<FixedOffset>>(DbType::DateTimeOffset);
        registry
    }

    /// Create a registry with no type maps and no handlers
    pub fn empty() -> Self {
        Self {
            type_maps: HashMap::new(),
            handlers: HashMap::new(),
            default_db_type: DbType::AnsiString,
        }
    }

    fn seed<T: 'static>(&mut self, db_type: DbType) {
        self.add_type_map::<T>(db_type);
        self.add_type_map::<Option<T>>(db_type);
    }

    pub fn add_type_map<T: 'static>(&mut self, db_type: DbType) {
        self.type_maps.insert(TypeId::of::<T>(), db_type);
    }

    /// Remove the default column type for `T`; returns whether one was set
    pub fn remove_type_map<T: 'static>(&mut self) -> bool {
        let removed = self.type_maps.remove(&TypeId::of::<T>()).is_some();
        debug_log!(
            "removed type map for {}: {}",
            std::any::type_name::<T>(),
            removed
        );
        removed
    }

    pub fn type_map_for<T: 'static>(&self) -> Option<DbType> {
        self.type_maps.get(&TypeId::of::<T>()).copied()
    }

    /// Register `handler` for `T` and, implicitly, `Option<T>`
    pub fn add_type_handler<T, H>(&mut self, handler: H)
    where
        T: 'static,
        H: TypeHandler<T> + 'static,
    {
        let handler: Arc<dyn TypeHandler<T>> = Arc::new(handler);
        self.handlers.insert(TypeId::of::<T>(), Box::new(handler));
        debug_log!("installed type handler for {}", std::any::type_name::<T>());
    }

    pub fn remove_type_handler<T: 'static>(&mut self) -> bool {
        self.handlers.remove(&TypeId::of::<T>()).is_some()
    }

    pub fn has_type_handler<T: 'static>(&self) -> bool {
        self.handler_for::<T>().is_some()
    }

    /// Drop every registered handler
    ///
    /// Handlers installed through one-time guards are not re-installed afterwards.
    pub fn reset_type_handlers(&mut self) {
        self.handlers.clear();
    }

    pub fn default_db_type(&self) -> DbType {
        self.default_db_type
    }

    pub fn set_default_db_type(&mut self, db_type: DbType) {
        self.default_db_type = db_type;
    }

    fn handler_for<T: 'static>(&self) -> Option<Arc<dyn TypeHandler<T>>> {
        self.handlers
            .get(&TypeId::of::<T>())
            .and_then(|handler| handler.downcast_ref::<Arc<dyn TypeHandler<T>>>())
            .cloned()
    }

    fn resolve_db_type<T: 'static>(&self, declared: Option<DbType>) -> DbType {
        declared
            .or_else(|| self.type_map_for::<T>())
            .unwrap_or(self.default_db_type)
    }

    /// Build a query parameter for `value`
    pub fn bind<T>(
        &self,
        name: &str,
        value: &T,
        declared: Option<DbType>,
    ) -> Result<DbParameter, MappingError>
    where
        T: ToNative + 'static,
    {
        let mut parameter = DbParameter::new(name, self.resolve_db_type::<T>(declared));
        self.write_value(&mut parameter, value)?;
        Ok(parameter)
    }

    /// Build a query parameter for a nullable value
    pub fn bind_nullable<T>(
        &self,
        name: &str,
        value: Option<&T>,
        declared: Option<DbType>,
    ) -> Result<DbParameter, MappingError>
    where
        T: ToNative + 'static,
    {
        let mut parameter = DbParameter::new(name, self.resolve_db_type::<Option<T>>(declared));
        if let Some(value) = value {
            self.write_value(&mut parameter, value)?;
        }
        Ok(parameter)
    }

    fn write_value<T>(&self, parameter: &mut DbParameter, value: &T) -> Result<(), MappingError>
    where
        T: ToNative + 'static,
    {
        match self.handler_for::<T>() {
            Some(handler) => handler.set_value(parameter, value),
            None => {
                parameter.value = value.to_native();
                Ok(())
            }
        }
    }

    /// Materialize a non-nullable column value
    pub fn read<T>(&self, value: NativeValue) -> Result<T, MappingError>
    where
        T: FromNative + 'static,
    {
        if value.is_null() {
            return Err(MappingError::UnexpectedNull(T::TYPE_NAME));
        }
        match self.handler_for::<T>() {
            Some(handler) => handler.decode(value),
            None => T::from_native(value),
        }
    }

    /// Materialize a nullable column value
    pub fn read_nullable<T>(&self, value: NativeValue) -> Result<Option<T>, MappingError>
    where
        T: FromNative + 'static,
    {
        if value.is_null() {
            return Ok(None);
        }
        self.read(value).map(Some)
    }
}

static REGISTRY: Lazy<RwLock<TypeRegistry>> = Lazy::new(|| RwLock::new(TypeRegistry::new()));

/// Shared access to the process-wide registry
///
/// Every mutation is a single map operation, so a poisoned lock still
/// guards a consistent table and is recovered.
pub fn registry() -> RwLockReadGuard<'static, TypeRegistry> {
    REGISTRY.read().unwrap_or_else(PoisonError::into_inner)
}

/// Exclusive access to the process-wide registry
pub fn registry_mut() -> RwLockWriteGuard<'static, TypeRegistry> {
    REGISTRY.write().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Stores booleans as 'Y'/'N' characters
    struct YesNoHandler;

    impl TypeHandler<bool> for YesNoHandler {
        fn encode(&self, value: &bool, _db_type: DbType) -> Result<NativeValue, MappingError> {
            Ok(NativeValue::Text(if *value { "Y" } else { "N" }.to_string()))
        }

        fn decode(&self, value: NativeValue) -> Result<bool, MappingError> {
            match value {
                NativeValue::Text(s) if s == "Y" => Ok(true),
                NativeValue::Text(s) if s == "N" => Ok(false),
                other => Err(MappingError::InvalidConfiguration(format!(
                    "cannot read {} as Y/N",
                    other.kind()
                ))),
            }
        }
    }

    #[test]
    fn test_defaults_seed_nullable_variants() {
        let registry = TypeRegistry::new();
        assert_eq!(registry.type_map_for::<i32>(), Some(DbType::Int32));
        assert_eq!(registry.type_map_for::<Option<i32>>(), Some(DbType::Int32));
        assert_eq!(
            registry.type_map_for::<DateTime<FixedOffset>>(),
            Some(DbType::DateTimeOffset)
        );
        assert_eq!(registry.type_map_for::<u8>(), None);
    }

    #[test]
    fn test_bind_resolves_declared_then_map_then_default() {
        let mut registry = TypeRegistry::new();

        let declared = registry.bind("n", &5i32, Some(DbType::Int64)).unwrap();
        assert_eq!(declared.db_type, DbType::Int64);

        let mapped = registry.bind("n", &5i32, None).unwrap();
        assert_eq!(mapped.db_type, DbType::Int32);

        assert!(registry.remove_type_map::<i32>());
        let fallback = registry.bind("n", &5i32, None).unwrap();
        assert_eq!(fallback.db_type, DbType::AnsiString);
        assert_eq!(fallback.value, NativeValue::Integer(5));
    }

    #[test]
    fn test_remove_type_map_reports_absence() {
        let mut registry = TypeRegistry::empty();
        assert!(!registry.remove_type_map::<String>());
    }

    #[test]
    fn test_handler_overrides_fallback_conversion() {
        let mut registry = TypeRegistry::new();
        registry.add_type_handler::<bool, _>(YesNoHandler);

        let param = registry.bind("active", &true, None).unwrap();
        assert_eq!(param.db_type, DbType::Boolean);
        assert_eq!(param.value, NativeValue::Text("Y".to_string()));

        let read: bool = registry.read(NativeValue::Text("N".to_string())).unwrap();
        assert!(!read);
    }

    #[test]
    fn test_handler_serves_nullable_variant() {
        let mut registry = TypeRegistry::new();
        registry.add_type_handler::<bool, _>(YesNoHandler);

        let param = registry.bind_nullable("active", Some(&false), None).unwrap();
        assert_eq!(param.value, NativeValue::Text("N".to_string()));

        let read: Option<bool> = registry
            .read_nullable(NativeValue::Text("Y".to_string()))
            .unwrap();
        assert_eq!(read, Some(true));
    }

    #[test]
    fn test_nullable_none_binds_null() {
        let registry = TypeRegistry::new();
        let param = registry.bind_nullable::<String>("note", None, None).unwrap();
        assert_eq!(param.db_type, DbType::String);
        assert_eq!(param.value, NativeValue::Null);

        let read: Option<String> = registry.read_nullable(NativeValue::Null).unwrap();
        assert_eq!(read, None);
    }

    #[test]
    fn test_read_rejects_null_for_non_nullable() {
        let registry = TypeRegistry::new();
        assert_eq!(
            registry.read::<i64>(NativeValue::Null),
            Err(MappingError::UnexpectedNull("i64"))
        );
    }

    #[test]
    fn test_reset_drops_handlers_but_keeps_maps() {
        let mut registry = TypeRegistry::new();
        registry.add_type_handler::<bool, _>(YesNoHandler);
        assert!(registry.has_type_handler::<bool>());

        registry.reset_type_handlers();
        assert!(!registry.has_type_handler::<bool>());
        assert_eq!(registry.type_map_for::<bool>(), Some(DbType::Boolean));
    }

    #[test]
    fn test_remove_type_handler() {
        let mut registry = TypeRegistry::new();
        registry.add_type_handler::<bool, _>(YesNoHandler);
        assert!(registry.remove_type_handler::<bool>());
        assert!(!registry.remove_type_handler::<bool>());
    }

    #[test]
    fn test_default_db_type_is_configurable() {
        let mut registry = TypeRegistry::empty();
        assert_eq!(registry.default_db_type(), DbType::AnsiString);
        registry.set_default_db_type(DbType::String);
        let param = registry.bind("s", &"x".to_string(), None).unwrap();
        assert_eq!(param.db_type, DbType::String);
    }
}
