#![doc = include_str!("../README.md")]

pub use forma_core::{
    Bytes, Deserialize, DeserializeError, Deserializer, FieldPath, Map, Registry, Serialize,
    SerializeError, Serializer, ValidationError, Value, ValueKind, Visitor, deserialize,
    deserialize_unknown, serialize, serialize_unknown,
};
pub use forma_core::{de, dispatch, impls, registry, ser, validate, value};

#[cfg(feature = "json")]
pub use forma_json as json;

#[cfg(feature = "yaml")]
pub use forma_yaml as yaml;

#[cfg(feature = "derive")]
pub use forma_derive::{Deserialize, Serialize};
