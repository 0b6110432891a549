//! Statically-typed and dynamically-checked entry points.
//!
//! The checked functions are thin wrappers over the trait calls, present so
//! both flavors of call site read the same. The unchecked functions accept
//! any `Any` value and consult a [`Registry`] for the erased capability,
//! failing with a missing-capability error that names the offending type
//! when no entry exists. The erased path round-trips through the neutral raw
//! representation: erased serialization lowers to a [`Value`] which is then
//! fed to the caller's serializer, and erased deserialization extracts a
//! [`Value`] from the caller's deserializer before decoding it.

use std::any::Any;

use crate::de::{Deserialize, Deserializer};
use crate::error::{DeserializeError, SerializeError};
use crate::registry::Registry;
use crate::ser::{Serialize, Serializer};
use crate::value::Value;

// -----------------------------------------------------------------------------
// Checked entry points

/// Serializes a statically-known value through the given serializer.
#[inline]
pub fn serialize<T: Serialize + ?Sized, S: Serializer>(
    value: &T,
    serializer: S,
) -> Result<S::Ok, SerializeError> {
    value.serialize(serializer)
}

/// Deserializes a statically-known type from the given deserializer.
#[inline]
pub fn deserialize<T: Deserialize, D: Deserializer>(
    deserializer: D,
) -> Result<T, DeserializeError> {
    T::deserialize(deserializer)
}

// -----------------------------------------------------------------------------
// Unchecked entry points

/// Serializes a value whose capability is only known at runtime.
///
/// Fails with [`SerializeError::MissingCapability`] when `T` has no
/// registered serialize entry.
pub fn serialize_unknown<T: Any, S: Serializer>(
    value: &T,
    serializer: S,
    registry: &Registry,
) -> Result<S::Ok, SerializeError> {
    let missing = || SerializeError::MissingCapability {
        type_name: std::any::type_name::<T>(),
    };
    let erased = registry
        .get::<T>()
        .and_then(|entry| entry.serialize_fn())
        .ok_or_else(missing)?;
    let raw = erased(value)?;
    raw.serialize(serializer)
}

/// Deserializes into a type whose capability is only known at runtime.
///
/// Fails with [`DeserializeError::MissingCapability`] when `T` has no
/// registered deserialize entry.
pub fn deserialize_unknown<T: Any, D: Deserializer>(
    deserializer: D,
    registry: &Registry,
) -> Result<T, DeserializeError> {
    let missing = || DeserializeError::MissingCapability {
        type_name: std::any::type_name::<T>(),
    };
    let erased = registry
        .get::<T>()
        .and_then(|entry| entry.deserialize_fn())
        .ok_or_else(missing)?;
    let raw = Value::deserialize(deserializer)?;
    let boxed = erased(raw)?;
    // The registry keys entries by TypeId, so the downcast only fails if an
    // erased function was registered under the wrong key.
    boxed
        .downcast::<T>()
        .map(|typed| *typed)
        .map_err(|_| missing())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Map, ValueDeserializer, ValueSerializer};

    #[test]
    fn checked_round_trip() {
        let raw = serialize(&vec![1u32, 2, 3], ValueSerializer).unwrap();
        assert_eq!(
            raw,
            Value::Seq(vec![
                Value::Number(1.0),
                Value::Number(2.0),
                Value::Number(3.0),
            ]),
        );

        let back: Vec<u32> = deserialize(ValueDeserializer::new(raw)).unwrap();
        assert_eq!(back, vec![1, 2, 3]);
    }

    #[test]
    fn unknown_serialize_requires_registration() {
        let registry = Registry::new();
        let err = serialize_unknown(&42u32, ValueSerializer, &registry).unwrap_err();
        assert!(err.to_string().contains("u32"), "{err}");
        assert!(err.to_string().contains("serialize capability"), "{err}");
    }

    #[test]
    fn unknown_deserialize_requires_registration() {
        let registry = Registry::new();
        let de = ValueDeserializer::new(Value::Number(1.0));
        let err = deserialize_unknown::<u32, _>(de, &registry).unwrap_err();
        assert!(err.to_string().contains("deserialize capability"), "{err}");
    }

    #[test]
    fn unknown_round_trip_through_registry() {
        let mut registry = Registry::new();
        registry.register::<Vec<String>>();

        let value = vec!["a".to_string(), "b".to_string()];
        let raw = serialize_unknown(&value, ValueSerializer, &registry).unwrap();
        let back: Vec<String> =
            deserialize_unknown(ValueDeserializer::new(raw), &registry).unwrap();
        assert_eq!(back, value);
    }

    #[test]
    fn unknown_deserialize_reports_paths() {
        let mut registry = Registry::new();
        registry.register::<Vec<String>>();

        let mut map = Map::new();
        map.insert("oops", Value::Null);
        let de = ValueDeserializer::new(Value::Map(map));
        let err = deserialize_unknown::<Vec<String>, _>(de, &registry).unwrap_err();
        assert!(err.to_string().contains("expected sequence"), "{err}");
    }
}
