//! The neutral raw representation shared by every backend.
//!
//! A parsed document decodes into a [`Value`] tree; the deserialization
//! contract hands raw `Value`s to visitors and the validation layer turns
//! them into typed fields. `Value` also implements both capabilities itself,
//! which makes it the transcoding hub of the dynamically-checked dispatch
//! path: any serializer can consume it and any deserializer can produce it.

mod de;
mod ser;

pub use de::{Base64Bytes, ByteDecoding, NativeBytes, RawDeserializer, ValueDeserializer};
pub use ser::ValueSerializer;

use std::fmt;

use chrono::{DateTime, Utc};

// -----------------------------------------------------------------------------
// ValueKind

/// The shape of a [`Value`], used in expected-vs-found error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Null,
    Bool,
    Number,
    String,
    Bytes,
    Date,
    Seq,
    Map,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Null => "null",
            Self::Bool => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::Bytes => "bytes",
            Self::Date => "date",
            Self::Seq => "sequence",
            Self::Map => "object",
        };
        f.write_str(name)
    }
}

// -----------------------------------------------------------------------------
// Value

/// A dynamically-shaped value covering the full capability set of the core:
/// `{null, bool, number, string, bytes, date, sequence, map}`.
///
/// Numbers are a single `f64` kind. Maps are string-keyed and preserve
/// insertion order so that re-serialization of a round-tripped document is
/// byte-identical to the first rendering.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Bytes(Vec<u8>),
    Date(DateTime<Utc>),
    Seq(Vec<Value>),
    Map(Map),
}

impl Value {
    /// The shape of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Bool(_) => ValueKind::Bool,
            Self::Number(_) => ValueKind::Number,
            Self::String(_) => ValueKind::String,
            Self::Bytes(_) => ValueKind::Bytes,
            Self::Date(_) => ValueKind::Date,
            Self::Seq(_) => ValueKind::Seq,
            Self::Map(_) => ValueKind::Map,
        }
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_seq(&self) -> Option<&[Value]> {
        match self {
            Self::Seq(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Self::Map(v) => Some(v),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Number(v as f64)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Self::Seq(v)
    }
}

impl From<Map> for Value {
    fn from(v: Map) -> Self {
        Self::Map(v)
    }
}

// -----------------------------------------------------------------------------
// Map

/// A string-keyed, insertion-ordered mapping.
///
/// Lookup is linear; documents this core deals with are small field sets,
/// and order stability matters more than lookup speed here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Map {
    entries: Vec<(String, Value)>,
}

impl Map {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Inserts an entry, replacing the value of an existing key in place.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Removes and returns the value for `key`, preserving remaining order.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let at = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(at).1)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl IntoIterator for Map {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl FromIterator<(String, Value)> for Map {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::{Map, Value, ValueKind};

    #[test]
    fn map_preserves_insertion_order() {
        let mut map = Map::new();
        map.insert("z", Value::Number(1.0));
        map.insert("a", Value::Number(2.0));
        map.insert("m", Value::Number(3.0));

        let keys: Vec<_> = map.iter().map(|(k, _)| k.to_owned()).collect();
        assert_eq!(keys, ["z", "a", "m"]);
    }

    #[test]
    fn map_insert_replaces_in_place() {
        let mut map = Map::new();
        map.insert("a", Value::Number(1.0));
        map.insert("b", Value::Number(2.0));
        map.insert("a", Value::Number(9.0));

        assert_eq!(map.len(), 2);
        assert_eq!(map.get("a"), Some(&Value::Number(9.0)));
        let keys: Vec<_> = map.iter().map(|(k, _)| k.to_owned()).collect();
        assert_eq!(keys, ["a", "b"]);
    }

    #[test]
    fn kind_names() {
        assert_eq!(Value::Null.kind(), ValueKind::Null);
        assert_eq!(Value::Seq(vec![]).kind().to_string(), "sequence");
        assert_eq!(Value::Map(Map::new()).kind().to_string(), "object");
    }
}
