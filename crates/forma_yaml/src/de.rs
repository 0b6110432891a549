//! The YAML deserializer.
//!
//! Shares the text scalar conventions with the JSON side: byte sequences
//! base64-decode from strings and dates parse from RFC 3339 (or
//! `YYYY-MM-DD`) text. Both are the same instantiation of the shared
//! raw-tree deserializer.

use forma_core::value::{Base64Bytes, RawDeserializer};

/// A [`Deserializer`](forma_core::Deserializer) scoped to one raw value
/// parsed from YAML text.
pub type YamlDeserializer = RawDeserializer<Base64Bytes>;

#[cfg(test)]
mod tests {
    use forma_core::{Bytes, Deserialize, Value};

    use super::YamlDeserializer;

    #[test]
    fn bytes_decode_from_base64_strings() {
        let raw = Value::String("aGVsbG8=".into());
        let bytes = Bytes::deserialize(YamlDeserializer::new(raw)).unwrap();
        assert_eq!(&*bytes, b"hello");
    }
}
