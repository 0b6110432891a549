//! Runtime registration of erased capability entries.
//!
//! The dynamic entry points in [`dispatch`](crate::dispatch) cannot name the
//! concrete type of the value they handle, so the capabilities are erased
//! into plain function pointers keyed by [`TypeId`]. Registration is
//! per-capability: a type may be registered for serialization only, for
//! deserialization only, or for both.

use std::any::{Any, TypeId};
use std::collections::HashMap;

use crate::de::Deserialize;
use crate::error::{DeserializeError, SerializeError};
use crate::ser::Serialize;
use crate::value::{Value, ValueDeserializer, ValueSerializer};

// -----------------------------------------------------------------------------
// Erased capability entries

type ErasedSerialize = fn(&dyn Any) -> Result<Value, SerializeError>;
type ErasedDeserialize = fn(Value) -> Result<Box<dyn Any>, DeserializeError>;

/// The erased capabilities registered for one concrete type.
#[derive(Clone, Copy)]
pub struct Entry {
    type_name: &'static str,
    serialize: Option<ErasedSerialize>,
    deserialize: Option<ErasedDeserialize>,
}

impl Entry {
    /// The registered type's name, for diagnostics.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    #[inline]
    pub fn serialize_fn(&self) -> Option<ErasedSerialize> {
        self.serialize
    }

    #[inline]
    pub fn deserialize_fn(&self) -> Option<ErasedDeserialize> {
        self.deserialize
    }
}

fn erased_serialize<T: Serialize + Any>(value: &dyn Any) -> Result<Value, SerializeError> {
    match value.downcast_ref::<T>() {
        Some(typed) => typed.serialize(ValueSerializer),
        None => Err(SerializeError::custom(format!(
            "erased value is not a `{}`",
            std::any::type_name::<T>(),
        ))),
    }
}

fn erased_deserialize<T: Deserialize + Any>(
    value: Value,
) -> Result<Box<dyn Any>, DeserializeError> {
    T::deserialize(ValueDeserializer::new(value)).map(|typed| Box::new(typed) as Box<dyn Any>)
}

// -----------------------------------------------------------------------------
// Registry

/// A table of erased capability entries, keyed by [`TypeId`].
///
/// # Examples
///
/// ```
/// use forma_core::value::ValueSerializer;
/// use forma_core::{Registry, Value};
///
/// let mut registry = Registry::new();
/// registry.register::<String>();
///
/// let raw = forma_core::serialize_unknown(&"hi".to_string(), ValueSerializer, &registry).unwrap();
/// assert_eq!(raw, Value::String("hi".into()));
/// ```
#[derive(Default)]
pub struct Registry {
    entries: HashMap<TypeId, Entry>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers both capabilities for `T` in one call.
    pub fn register<T: Serialize + Deserialize + Any>(&mut self) {
        self.register_serialize::<T>();
        self.register_deserialize::<T>();
    }

    /// Registers the serialize capability for `T`. Re-registration replaces
    /// the previous function.
    pub fn register_serialize<T: Serialize + Any>(&mut self) {
        log::trace!("registering serialize for `{}`", std::any::type_name::<T>());
        self.entry_mut::<T>().serialize = Some(erased_serialize::<T>);
    }

    /// Registers the deserialize capability for `T`. Re-registration replaces
    /// the previous function.
    pub fn register_deserialize<T: Deserialize + Any>(&mut self) {
        log::trace!(
            "registering deserialize for `{}`",
            std::any::type_name::<T>(),
        );
        self.entry_mut::<T>().deserialize = Some(erased_deserialize::<T>);
    }

    /// The entry for `T`, if any capability was registered for it.
    pub fn get<T: Any>(&self) -> Option<&Entry> {
        self.entries.get(&TypeId::of::<T>())
    }

    /// The number of registered types.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry_mut<T: Any>(&mut self) -> &mut Entry {
        self.entries.entry(TypeId::of::<T>()).or_insert(Entry {
            type_name: std::any::type_name::<T>(),
            serialize: None,
            deserialize: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unregistered_type_has_no_entry() {
        let registry = Registry::new();
        assert!(registry.get::<String>().is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn partial_registration_exposes_one_capability() {
        let mut registry = Registry::new();
        registry.register_serialize::<String>();

        let entry = registry.get::<String>().unwrap();
        assert!(entry.serialize_fn().is_some());
        assert!(entry.deserialize_fn().is_none());
    }

    #[test]
    fn reregistration_does_not_duplicate() {
        let mut registry = Registry::new();
        registry.register::<String>();
        registry.register::<String>();
        assert_eq!(registry.len(), 1);
    }
}
