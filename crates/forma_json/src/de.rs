//! The JSON deserializer.
//!
//! The shared raw-tree deserializer with the text scalar conventions layered
//! on top: a byte-sequence request base64-decodes a string, and a date
//! request parses RFC 3339 (or plain `YYYY-MM-DD`) text.

use forma_core::value::{Base64Bytes, RawDeserializer};

/// A [`Deserializer`](forma_core::Deserializer) scoped to one raw value
/// parsed from JSON text.
pub type JsonDeserializer = RawDeserializer<Base64Bytes>;

#[cfg(test)]
mod tests {
    use forma_core::{Bytes, Deserialize, Deserializer, FieldPath, Value};

    use super::JsonDeserializer;

    #[test]
    fn bytes_decode_from_base64_strings() {
        let raw = Value::String("aGVsbG8=".into());
        let bytes = Bytes::deserialize(JsonDeserializer::new(raw)).unwrap();
        assert_eq!(&*bytes, b"hello");
    }

    #[test]
    fn invalid_base64_reports_the_path() {
        let de = JsonDeserializer::new(Value::Null)
            .scoped(Value::String("!!!".into()), FieldPath::root().field("blob"));
        let err = Bytes::deserialize(de).unwrap_err();
        assert!(err.to_string().contains("`blob`"), "{err}");
    }

    #[test]
    fn dates_parse_from_strings() {
        use chrono::{DateTime, TimeZone, Utc};

        let raw = Value::String("2024-05-17T10:30:00Z".into());
        let parsed = DateTime::<Utc>::deserialize(JsonDeserializer::new(raw)).unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 5, 17, 10, 30, 0).unwrap());
    }
}
