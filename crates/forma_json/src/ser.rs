//! The streaming JSON serializer.
//!
//! Output is written directly into a caller-owned `String` in a single pass;
//! no intermediate tree is built. The rendering is compact (no whitespace)
//! and deterministic: the same value graph always produces the same bytes.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;

use forma_core::SerializeError;
use forma_core::ser::{
    Serialize, SerializeMap, SerializeSeq, SerializeStruct, Serializer, StringKeySerializer,
};

// -----------------------------------------------------------------------------
// JsonSerializer

/// A [`Serializer`] writing compact JSON into a borrowed buffer.
///
/// Scalar conventions: byte sequences render as base64 strings, dates as
/// RFC 3339 strings, and non-finite numbers are rejected because JSON has no
/// representation for them.
pub struct JsonSerializer<'a> {
    out: &'a mut String,
}

impl<'a> JsonSerializer<'a> {
    pub fn new(out: &'a mut String) -> Self {
        Self { out }
    }
}

fn write_escaped(out: &mut String, v: &str) {
    out.push('"');
    for c in v.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            c if (c as u32) < 0x20 => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

impl<'a> Serializer for JsonSerializer<'a> {
    type Ok = ();

    type SerializeSeq = JsonSeqSerializer<'a>;
    type SerializeMap = JsonMapSerializer<'a>;
    type SerializeStruct = JsonStructSerializer<'a>;

    fn serialize_null(self) -> Result<(), SerializeError> {
        self.out.push_str("null");
        Ok(())
    }

    fn serialize_bool(self, v: bool) -> Result<(), SerializeError> {
        self.out.push_str(if v { "true" } else { "false" });
        Ok(())
    }

    fn serialize_number(self, v: f64) -> Result<(), SerializeError> {
        if !v.is_finite() {
            return Err(SerializeError::unsupported(format!(
                "non-finite number `{v}` has no JSON representation",
            )));
        }
        self.out.push_str(&v.to_string());
        Ok(())
    }

    fn serialize_string(self, v: &str) -> Result<(), SerializeError> {
        write_escaped(self.out, v);
        Ok(())
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<(), SerializeError> {
        write_escaped(self.out, &BASE64.encode(v));
        Ok(())
    }

    fn serialize_none(self) -> Result<(), SerializeError> {
        self.out.push_str("null");
        Ok(())
    }

    fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> Result<(), SerializeError> {
        value.serialize(self)
    }

    fn serialize_newtype<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<(), SerializeError> {
        value.serialize(self)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        variant: &'static str,
    ) -> Result<(), SerializeError> {
        write_escaped(self.out, variant);
        Ok(())
    }

    fn serialize_data_variant<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        variant: &'static str,
        data: &T,
    ) -> Result<(), SerializeError> {
        self.out.push('{');
        write_escaped(self.out, variant);
        self.out.push(':');
        data.serialize(JsonSerializer { out: &mut *self.out })?;
        self.out.push('}');
        Ok(())
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq, SerializeError> {
        self.out.push('[');
        Ok(JsonSeqSerializer {
            out: self.out,
            first: true,
        })
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap, SerializeError> {
        self.out.push('{');
        Ok(JsonMapSerializer {
            out: self.out,
            first: true,
            expecting_value: false,
        })
    }

    fn serialize_struct(
        self,
        name: &'static str,
        len: usize,
    ) -> Result<Self::SerializeStruct, SerializeError> {
        self.out.push('{');
        Ok(JsonStructSerializer {
            out: self.out,
            name,
            declared: len,
            written: 0,
        })
    }
}

// -----------------------------------------------------------------------------
// Sub-serializers

pub struct JsonSeqSerializer<'a> {
    out: &'a mut String,
    first: bool,
}

impl SerializeSeq for JsonSeqSerializer<'_> {
    type Ok = ();

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), SerializeError> {
        if !self.first {
            self.out.push(',');
        }
        self.first = false;
        value.serialize(JsonSerializer { out: &mut *self.out })
    }

    fn end(self) -> Result<(), SerializeError> {
        self.out.push(']');
        Ok(())
    }
}

pub struct JsonMapSerializer<'a> {
    out: &'a mut String,
    first: bool,
    expecting_value: bool,
}

impl SerializeMap for JsonMapSerializer<'_> {
    type Ok = ();

    fn serialize_key<T: Serialize + ?Sized>(&mut self, key: &T) -> Result<(), SerializeError> {
        if self.expecting_value {
            return Err(SerializeError::unsupported(
                "serialize_key called twice without an intervening value",
            ));
        }
        let key = key.serialize(StringKeySerializer)?;
        if !self.first {
            self.out.push(',');
        }
        self.first = false;
        write_escaped(self.out, &key);
        self.out.push(':');
        self.expecting_value = true;
        Ok(())
    }

    fn serialize_value<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), SerializeError> {
        if !self.expecting_value {
            return Err(SerializeError::unsupported(
                "serialize_value called without a preceding key",
            ));
        }
        self.expecting_value = false;
        value.serialize(JsonSerializer { out: &mut *self.out })
    }

    fn end(self) -> Result<(), SerializeError> {
        if self.expecting_value {
            return Err(SerializeError::unsupported("map ended with a dangling key"));
        }
        self.out.push('}');
        Ok(())
    }
}

pub struct JsonStructSerializer<'a> {
    out: &'a mut String,
    name: &'static str,
    declared: usize,
    written: usize,
}

impl SerializeStruct for JsonStructSerializer<'_> {
    type Ok = ();

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        name: &'static str,
        value: &T,
    ) -> Result<(), SerializeError> {
        if self.written > 0 {
            self.out.push(',');
        }
        write_escaped(self.out, name);
        self.out.push(':');
        value.serialize(JsonSerializer { out: &mut *self.out })?;
        self.written += 1;
        Ok(())
    }

    fn end(self) -> Result<(), SerializeError> {
        if self.written != self.declared {
            return Err(SerializeError::LengthMismatch {
                name: self.name,
                declared: self.declared,
                received: self.written,
            });
        }
        self.out.push('}');
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use forma_core::Value;
    use forma_core::ser::{Serialize, SerializeStruct, Serializer};
    use forma_core::value::Map;

    use super::*;

    fn render<T: Serialize>(value: &T) -> String {
        let mut out = String::new();
        value.serialize(JsonSerializer::new(&mut out)).unwrap();
        out
    }

    #[test]
    fn scalars_render_compact() {
        assert_eq!(render(&Value::Null), "null");
        assert_eq!(render(&true), "true");
        assert_eq!(render(&30u32), "30");
        assert_eq!(render(&1.5f64), "1.5");
        assert_eq!(render(&"a\"b\nc"), "\"a\\\"b\\nc\"");
    }

    #[test]
    fn non_finite_numbers_are_rejected() {
        let mut out = String::new();
        let err = f64::NAN
            .serialize(JsonSerializer::new(&mut out))
            .unwrap_err();
        assert!(err.to_string().contains("non-finite"), "{err}");
    }

    #[test]
    fn bytes_render_as_base64() {
        assert_eq!(
            render(&forma_core::Bytes::from(&b"hello"[..])),
            "\"aGVsbG8=\"",
        );
    }

    #[test]
    fn maps_preserve_insertion_order() {
        let mut map = Map::new();
        map.insert("z", Value::Number(1.0));
        map.insert("a", Value::Bool(true));
        assert_eq!(render(&Value::Map(map)), r#"{"z":1,"a":true}"#);
    }

    #[test]
    fn struct_field_count_is_enforced() {
        let mut out = String::new();
        let mut state = JsonSerializer::new(&mut out)
            .serialize_struct("User", 2)
            .unwrap();
        state.serialize_field("name", &"ada").unwrap();
        let err = state.end().unwrap_err();
        assert!(err.to_string().contains("declared 2"), "{err}");
        assert!(err.to_string().contains("received 1"), "{err}");
    }
}
