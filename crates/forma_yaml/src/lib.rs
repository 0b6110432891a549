//! The YAML backend.
//!
//! Serialization lowers the value graph to the neutral raw tree and renders
//! it as block-style YAML; parsing accepts the same subset back. The scalar
//! conventions match the JSON backend (base64 byte strings, RFC 3339 date
//! strings), so a value round-trips identically through either format.
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
//! let text = forma_yaml::to_string(&Value::Map(user)).unwrap();
//! assert_eq!(text, "name: John Doe\nage: 30\n");
//! ```

mod de;
mod error;
mod parse;
mod render;

pub use de::YamlDeserializer;
pub use error::Error;

use forma_core::value::ValueSerializer;
use forma_core::{Deserialize, Serialize, SerializeError, Value};

// -----------------------------------------------------------------------------
// Entry points

/// Serializes a value to block-style YAML text.
pub fn to_string<T: Serialize + ?Sized>(value: &T) -> Result<String, SerializeError> {
    let raw = value.serialize(ValueSerializer)?;
    Ok(render::render(&raw))
}

/// Parses YAML text into the neutral raw representation.
pub fn parse(input: &str) -> Result<Value, Error> {
    let value = parse::Parser::new(input)?.parse_document()?;
    log::trace!("parsed {} bytes of YAML", input.len());
    Ok(value)
}

/// Parses YAML text and reconstructs a typed value from it.
pub fn from_str<T: Deserialize>(input: &str) -> Result<T, Error> {
    let raw = parse(input)?;
    Ok(T::deserialize(YamlDeserializer::new(raw))?)
}
