//! The deserializer over an owned [`Value`], shared by every backend.
//!
//! All backends in this workspace parse into [`Value`], so they share one
//! deserializer body. The only scalar convention they disagree on is how a
//! byte sequence arrives — native [`Value::Bytes`] in the raw tree, base64
//! strings in the text formats — so that is the single piece
//! [`RawDeserializer`] leaves open, through [`ByteDecoding`].

use std::marker::PhantomData;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;

use crate::de::{Deserializer, EnumCursor, MapCursor, SeqCursor, Visitor};
use crate::error::{DeserializeError, ValidationError};
use crate::path::FieldPath;
use crate::validate;
use crate::value::{Value, ValueKind};

// -----------------------------------------------------------------------------
// ByteDecoding

/// How a deserializer turns a raw value into a byte sequence.
pub trait ByteDecoding {
    fn decode(value: Value, path: &FieldPath) -> Result<Vec<u8>, DeserializeError>;
}

/// The strict convention: bytes must already be [`Value::Bytes`].
#[derive(Debug)]
pub struct NativeBytes;

impl ByteDecoding for NativeBytes {
    fn decode(value: Value, path: &FieldPath) -> Result<Vec<u8>, DeserializeError> {
        match value {
            Value::Bytes(v) => Ok(v),
            other => {
                Err(ValidationError::type_mismatch(path, ValueKind::Bytes, other.kind()).into())
            }
        }
    }
}

/// The text-format convention: bytes arrive as base64 strings.
#[derive(Debug)]
pub struct Base64Bytes;

impl ByteDecoding for Base64Bytes {
    fn decode(value: Value, path: &FieldPath) -> Result<Vec<u8>, DeserializeError> {
        match value {
            Value::String(text) => BASE64.decode(&text).map_err(|detail| {
                DeserializeError::custom(format!("invalid base64 for field `{path}`: {detail}"))
            }),
            Value::Bytes(bytes) => Ok(bytes),
            other => {
                Err(ValidationError::type_mismatch(path, ValueKind::Bytes, other.kind()).into())
            }
        }
    }
}

// -----------------------------------------------------------------------------
// RawDeserializer

/// A [`Deserializer`] scoped to one raw [`Value`] at a known field path,
/// generic over the backend's [`ByteDecoding`] convention.
///
/// # Examples
///
/// ```
/// use forma_core::value::ValueDeserializer;
/// use forma_core::{Deserialize, Value};
///
/// let raw = Value::Number(30.0);
/// let age = f64::deserialize(ValueDeserializer::new(raw)).unwrap();
/// assert_eq!(age, 30.0);
/// ```
#[derive(Debug)]
pub struct RawDeserializer<B: ByteDecoding> {
    value: Value,
    path: FieldPath,
    _bytes: PhantomData<B>,
}

/// The reference deserializer: strict scalars over the raw tree itself.
pub type ValueDeserializer = RawDeserializer<NativeBytes>;

impl<B: ByteDecoding> RawDeserializer<B> {
    /// A deserializer positioned at the document root.
    pub fn new(value: Value) -> Self {
        Self {
            value,
            path: FieldPath::root(),
            _bytes: PhantomData,
        }
    }

    /// A deserializer positioned at a known path, for nested raw values.
    pub fn at(value: Value, path: FieldPath) -> Self {
        Self {
            value,
            path,
            _bytes: PhantomData,
        }
    }

    /// Splits into the raw value and a scoping template holding the path.
    fn into_parts(self) -> (Value, Self) {
        let template = Self {
            value: Value::Null,
            path: self.path.clone(),
            _bytes: PhantomData,
        };
        (self.value, template)
    }

    fn mismatch(&self, expected: ValueKind) -> DeserializeError {
        ValidationError::type_mismatch(&self.path, expected, self.value.kind()).into()
    }
}

impl<B: ByteDecoding> Deserializer for RawDeserializer<B> {
    fn deserialize_any<V: Visitor>(self, visitor: V) -> Result<V::Output, DeserializeError> {
        let (value, template) = self.into_parts();
        match value {
            Value::Null => visitor.visit_null(),
            Value::Bool(v) => visitor.visit_bool(v),
            Value::Number(v) => visitor.visit_number(v),
            Value::String(v) => visitor.visit_string(v),
            Value::Bytes(v) => visitor.visit_bytes(v),
            Value::Date(v) => visitor.visit_date(v),
            Value::Seq(elements) => {
                let path = template.path.clone();
                visitor.visit_seq(SeqCursor::new(elements, template, path))
            }
            Value::Map(map) => {
                let path = template.path.clone();
                visitor.visit_map(MapCursor::new(map.into_iter().collect(), template, path))
            }
        }
    }

    fn deserialize_bool<V: Visitor>(self, visitor: V) -> Result<V::Output, DeserializeError> {
        let v = validate::boolean(&self.value, &self.path)?;
        visitor.visit_bool(v)
    }

    fn deserialize_number<V: Visitor>(self, visitor: V) -> Result<V::Output, DeserializeError> {
        let v = validate::number(&self.value, &self.path)?;
        visitor.visit_number(v)
    }

    fn deserialize_string<V: Visitor>(self, visitor: V) -> Result<V::Output, DeserializeError> {
        match self.value {
            Value::String(v) => visitor.visit_string(v),
            _ => Err(self.mismatch(ValueKind::String)),
        }
    }

    fn deserialize_bytes<V: Visitor>(self, visitor: V) -> Result<V::Output, DeserializeError> {
        let bytes = B::decode(self.value, &self.path)?;
        visitor.visit_bytes(bytes)
    }

    fn deserialize_date<V: Visitor>(self, visitor: V) -> Result<V::Output, DeserializeError> {
        let v = validate::date(&self.value, &self.path)?;
        visitor.visit_date(v)
    }

    fn deserialize_seq<V: Visitor>(self, visitor: V) -> Result<V::Output, DeserializeError> {
        match self.value {
            Value::Seq(elements) => {
                let path = self.path.clone();
                let template = Self {
                    value: Value::Null,
                    path: self.path,
                    _bytes: PhantomData,
                };
                visitor.visit_seq(SeqCursor::new(elements, template, path))
            }
            _ => Err(self.mismatch(ValueKind::Seq)),
        }
    }

    fn deserialize_map<V: Visitor>(self, visitor: V) -> Result<V::Output, DeserializeError> {
        match self.value {
            Value::Map(map) => {
                let path = self.path.clone();
                let template = Self {
                    value: Value::Null,
                    path: self.path,
                    _bytes: PhantomData,
                };
                visitor.visit_map(MapCursor::new(map.into_iter().collect(), template, path))
            }
            _ => Err(self.mismatch(ValueKind::Map)),
        }
    }

    fn deserialize_option<V: Visitor>(self, visitor: V) -> Result<V::Output, DeserializeError> {
        if self.value.is_null() {
            visitor.visit_null()
        } else {
            visitor.visit_some(self)
        }
    }

    fn deserialize_struct<V: Visitor>(
        self,
        _name: &'static str,
        _fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Output, DeserializeError> {
        self.deserialize_map(visitor)
    }

    fn deserialize_enum<V: Visitor>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Output, DeserializeError> {
        let (value, template) = self.into_parts();
        let path = template.path.clone();
        match value {
            Value::String(variant) => {
                visitor.visit_enum(EnumCursor::new(variant, None, template, path))
            }
            Value::Map(map) if map.len() == 1 => {
                let mut entries = map.into_iter();
                let (variant, data) = match entries.next() {
                    Some(entry) => entry,
                    None => {
                        return Err(DeserializeError::custom(
                            "single-entry mapping yielded no entry",
                        ));
                    }
                };
                visitor.visit_enum(EnumCursor::new(variant, Some(data), template, path))
            }
            other => Err(DeserializeError::InvalidEnum {
                found: other.kind(),
            }),
        }
    }

    fn path(&self) -> &FieldPath {
        &self.path
    }

    fn scoped(&self, value: Value, path: FieldPath) -> Self {
        Self {
            value,
            path,
            _bytes: PhantomData,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::de::Deserialize;
    use crate::impls::Bytes;
    use crate::value::{Value, ValueDeserializer};

    use super::{Base64Bytes, RawDeserializer};

    #[test]
    fn native_convention_rejects_byte_strings() {
        let raw = Value::String("aGVsbG8=".into());
        assert!(Bytes::deserialize(ValueDeserializer::new(raw)).is_err());

        let raw = Value::Bytes(b"hello".to_vec());
        let bytes = Bytes::deserialize(ValueDeserializer::new(raw)).unwrap();
        assert_eq!(&*bytes, b"hello");
    }

    #[test]
    fn base64_convention_accepts_both_forms() {
        let raw = Value::String("aGVsbG8=".into());
        let bytes = Bytes::deserialize(RawDeserializer::<Base64Bytes>::new(raw)).unwrap();
        assert_eq!(&*bytes, b"hello");

        let raw = Value::Bytes(b"hello".to_vec());
        let bytes = Bytes::deserialize(RawDeserializer::<Base64Bytes>::new(raw)).unwrap();
        assert_eq!(&*bytes, b"hello");
    }
}
