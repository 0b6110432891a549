//! The JSON backend.
//!
//! Serialization streams compact text straight into a `String`; parsing goes
//! through the neutral raw representation and decoding applies the JSON
//! scalar conventions (base64 byte strings, RFC 3339 date strings).
//!
//! # Examples
//!
//! ```
//! use forma_core::Value;
//! use forma_core::value::Map;
//!
//! let mut user = Map::new();
//! user.insert("name", Value::from("John Doe"));
//! user.insert("age", Value::from(30.0));
//!
//! let text = forma_json::to_string(&Value::Map(user)).unwrap();
//! assert_eq!(text, r#"{"name":"John Doe","age":30}"#);
//!
//! let back = forma_json::parse(&text).unwrap();
//! assert_eq!(forma_json::to_string(&back).unwrap(), text);
//! ```

mod de;
mod error;
mod parse;
mod ser;

pub use de::JsonDeserializer;
pub use error::Error;
pub use parse::MAX_DEPTH;
pub use ser::JsonSerializer;

use forma_core::{Deserialize, Serialize, SerializeError, Value};

// -----------------------------------------------------------------------------
// Entry points

/// Serializes a value to compact JSON text.
pub fn to_string<T: Serialize + ?Sized>(value: &T) -> Result<String, SerializeError> {
    let mut out = String::new();
    value.serialize(JsonSerializer::new(&mut out))?;
    Ok(out)
}

/// Serializes a value to compact JSON bytes.
pub fn to_vec<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, SerializeError> {
    to_string(value).map(String::into_bytes)
}

/// Parses JSON text into the neutral raw representation.
pub fn parse(input: &str) -> Result<Value, Error> {
    let value = parse::Parser::new(input).parse_document()?;
    log::trace!("parsed {} bytes of JSON", input.len());
    Ok(value)
}

/// Parses JSON text and reconstructs a typed value from it.
pub fn from_str<T: Deserialize>(input: &str) -> Result<T, Error> {
    let raw = parse(input)?;
    Ok(T::deserialize(JsonDeserializer::new(raw))?)
}

/// Parses JSON bytes and reconstructs a typed value from them.
pub fn from_slice<T: Deserialize>(input: &[u8]) -> Result<T, Error> {
    let text = std::str::from_utf8(input).map_err(|detail| {
        // The prefix up to the failure is valid by definition, so the
        // position of the offending byte can be computed from it.
        let prefix = std::str::from_utf8(&input[..detail.valid_up_to()]).unwrap_or("");
        let line = prefix.bytes().filter(|&b| b == b'\n').count() + 1;
        let rest = prefix.rfind('\n').map_or(prefix, |i| &prefix[i + 1..]);
        Error::Parse {
            line,
            column: rest.chars().count() + 1,
            message: format!("input is not valid UTF-8: {detail}"),
        }
    })?;
    from_str(text)
}
