//! The tree-building serializer over [`Value`].
//!
//! This is the reference implementation of the output contract and the
//! accumulation half of the dynamically-checked dispatch path: anything with
//! the serialize capability can be lowered to a [`Value`] and fed onward to
//! any other backend. Unlike the text backends it keeps `Bytes` and `Date`
//! lossless.

use chrono::{DateTime, Utc};

use crate::error::SerializeError;
use crate::ser::{
    Serialize, SerializeMap, SerializeSeq, SerializeStruct, Serializer, StringKeySerializer,
};
use crate::value::{Map, Value};

// -----------------------------------------------------------------------------
// ValueSerializer

/// A [`Serializer`] whose output is the neutral [`Value`] tree.
///
/// # Examples
///
/// ```
/// use forma_core::value::ValueSerializer;
/// use forma_core::{Serialize, Value};
///
/// let raw = "hello".serialize(ValueSerializer).unwrap();
/// assert_eq!(raw, Value::String("hello".to_owned()));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ValueSerializer;

impl Serializer for ValueSerializer {
    type Ok = Value;

    type SerializeSeq = ValueSeqSerializer;
    type SerializeMap = ValueMapSerializer;
    type SerializeStruct = ValueStructSerializer;

    fn serialize_null(self) -> Result<Value, SerializeError> {
        Ok(Value::Null)
    }

    fn serialize_bool(self, v: bool) -> Result<Value, SerializeError> {
        Ok(Value::Bool(v))
    }

    fn serialize_number(self, v: f64) -> Result<Value, SerializeError> {
        Ok(Value::Number(v))
    }

    fn serialize_string(self, v: &str) -> Result<Value, SerializeError> {
        Ok(Value::String(v.to_owned()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value, SerializeError> {
        Ok(Value::Bytes(v.to_vec()))
    }

    fn serialize_date(self, v: DateTime<Utc>) -> Result<Value, SerializeError> {
        Ok(Value::Date(v))
    }

    fn serialize_none(self) -> Result<Value, SerializeError> {
        Ok(Value::Null)
    }

    fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> Result<Value, SerializeError> {
        value.serialize(self)
    }

    fn serialize_newtype<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<Value, SerializeError> {
        value.serialize(self)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        variant: &'static str,
    ) -> Result<Value, SerializeError> {
        Ok(Value::String(variant.to_owned()))
    }

    fn serialize_data_variant<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        variant: &'static str,
        data: &T,
    ) -> Result<Value, SerializeError> {
        let mut map = Map::with_capacity(1);
        map.insert(variant, data.serialize(self)?);
        Ok(Value::Map(map))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<Self::SerializeSeq, SerializeError> {
        Ok(ValueSeqSerializer {
            items: Vec::with_capacity(len.unwrap_or(0)),
        })
    }

    fn serialize_map(self, len: Option<usize>) -> Result<Self::SerializeMap, SerializeError> {
        Ok(ValueMapSerializer {
            entries: Map::with_capacity(len.unwrap_or(0)),
            pending_key: None,
        })
    }

    fn serialize_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<Self::SerializeStruct, SerializeError> {
        Ok(ValueStructSerializer {
            entries: Map::with_capacity(len),
        })
    }
}

// -----------------------------------------------------------------------------
// Sub-serializers

pub struct ValueSeqSerializer {
    items: Vec<Value>,
}

impl SerializeSeq for ValueSeqSerializer {
    type Ok = Value;

    fn serialize_element<T: Serialize + ?Sized>(
        &mut self,
        value: &T,
    ) -> Result<(), SerializeError> {
        self.items.push(value.serialize(ValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Value, SerializeError> {
        Ok(Value::Seq(self.items))
    }
}

pub struct ValueMapSerializer {
    entries: Map,
    pending_key: Option<String>,
}

impl SerializeMap for ValueMapSerializer {
    type Ok = Value;

    fn serialize_key<T: Serialize + ?Sized>(&mut self, key: &T) -> Result<(), SerializeError> {
        if self.pending_key.is_some() {
            return Err(SerializeError::unsupported(
                "serialize_key called twice without an intervening value",
            ));
        }
        self.pending_key = Some(key.serialize(StringKeySerializer)?);
        Ok(())
    }

    fn serialize_value<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), SerializeError> {
        let Some(key) = self.pending_key.take() else {
            return Err(SerializeError::unsupported(
                "serialize_value called without a preceding key",
            ));
        };
        self.entries.insert(key, value.serialize(ValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Value, SerializeError> {
        if self.pending_key.is_some() {
            return Err(SerializeError::unsupported(
                "map ended with a dangling key",
            ));
        }
        Ok(Value::Map(self.entries))
    }
}

pub struct ValueStructSerializer {
    entries: Map,
}

impl SerializeStruct for ValueStructSerializer {
    type Ok = Value;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        name: &'static str,
        value: &T,
    ) -> Result<(), SerializeError> {
        self.entries.insert(name, value.serialize(ValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Value, SerializeError> {
        Ok(Value::Map(self.entries))
    }
}
