use std::fmt;

use chrono::{DateTime, Utc};

use crate::de::{Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use crate::error::{DeserializeError, SerializeError};
use crate::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use crate::value::{Map, Value};

// -----------------------------------------------------------------------------
// Value as Serialize

/// Serializing a [`Value`] drives any serializer with the value's own shape,
/// which is what makes it the transcoding hub between backends.
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, SerializeError> {
        match self {
            Value::Null => serializer.serialize_null(),
            Value::Bool(v) => serializer.serialize_bool(*v),
            Value::Number(v) => serializer.serialize_number(*v),
            Value::String(v) => serializer.serialize_string(v),
            Value::Bytes(v) => serializer.serialize_bytes(v),
            Value::Date(v) => serializer.serialize_date(*v),
            Value::Seq(elements) => {
                let mut seq = serializer.serialize_seq(Some(elements.len()))?;
                for element in elements {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
            Value::Map(map) => {
                let mut state = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map.iter() {
                    state.serialize_entry(key, value)?;
                }
                state.end()
            }
        }
    }
}

// -----------------------------------------------------------------------------
// Value as Deserialize

/// Deserializing a [`Value`] extracts the raw value from any deserializer
/// via `deserialize_any`, shape untouched.
impl Deserialize for Value {
    fn deserialize<D: Deserializer>(deserializer: D) -> Result<Self, DeserializeError> {
        struct ValueVisitor;

        impl Visitor for ValueVisitor {
            type Output = Value;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("any value")
            }

            fn visit_null(self) -> Result<Value, DeserializeError> {
                Ok(Value::Null)
            }

            fn visit_bool(self, v: bool) -> Result<Value, DeserializeError> {
                Ok(Value::Bool(v))
            }

            fn visit_number(self, v: f64) -> Result<Value, DeserializeError> {
                Ok(Value::Number(v))
            }

            fn visit_string(self, v: String) -> Result<Value, DeserializeError> {
                Ok(Value::String(v))
            }

            fn visit_bytes(self, v: Vec<u8>) -> Result<Value, DeserializeError> {
                Ok(Value::Bytes(v))
            }

            fn visit_date(self, v: DateTime<Utc>) -> Result<Value, DeserializeError> {
                Ok(Value::Date(v))
            }

            fn visit_some<D: Deserializer>(
                self,
                deserializer: D,
            ) -> Result<Value, DeserializeError> {
                deserializer.deserialize_any(self)
            }

            fn visit_seq<A: SeqAccess>(self, mut seq: A) -> Result<Value, DeserializeError> {
                let mut elements = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(element) = seq.next_element()? {
                    elements.push(element);
                }
                Ok(Value::Seq(elements))
            }

            fn visit_map<A: MapAccess>(self, mut map: A) -> Result<Value, DeserializeError> {
                let mut out = Map::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, value)) = map.next_entry()? {
                    out.insert(key, value);
                }
                Ok(Value::Map(out))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

#[cfg(test)]
mod tests {
    use crate::de::Deserialize;
    use crate::ser::Serialize;
    use crate::value::{Map, Value, ValueDeserializer, ValueSerializer};

    fn sample() -> Value {
        let mut author = Map::new();
        author.insert("name", Value::String("Ada".into()));
        author.insert("tags", Value::Seq(vec![Value::String("x".into())]));

        let mut root = Map::new();
        root.insert("author", Value::Map(author));
        root.insert("count", Value::Number(2.0));
        root.insert("flag", Value::Bool(false));
        root.insert("none", Value::Null);
        Value::Map(root)
    }

    #[test]
    fn value_round_trips_through_itself() {
        let original = sample();
        let serialized = original.serialize(ValueSerializer).unwrap();
        assert_eq!(serialized, original);

        let recovered = Value::deserialize(ValueDeserializer::new(serialized)).unwrap();
        assert_eq!(recovered, original);
    }
}
