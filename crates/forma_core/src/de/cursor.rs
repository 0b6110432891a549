//! Shared cursor implementations over raw [`Value`] composites.
//!
//! Every backend in this workspace parses into [`Value`], so the cursors a
//! backend hands to visitors are the same three types, parameterized by the
//! backend's deserializer. The template deserializer carries the backend's
//! configuration; `scoped` delegates to it so element decoding recurses with
//! the right scalar conventions.

use crate::de::{Deserializer, EnumAccess, MapAccess, SeqAccess};
use crate::error::DeserializeError;
use crate::path::FieldPath;
use crate::value::Value;

// -----------------------------------------------------------------------------
// SeqCursor

/// A [`SeqAccess`] over an owned vector of raw elements.
pub struct SeqCursor<D: Deserializer> {
    iter: std::vec::IntoIter<Value>,
    template: D,
    path: FieldPath,
}

impl<D: Deserializer> SeqCursor<D> {
    pub fn new(elements: Vec<Value>, template: D, path: FieldPath) -> Self {
        Self {
            iter: elements.into_iter(),
            template,
            path,
        }
    }
}

impl<D: Deserializer> SeqAccess for SeqCursor<D> {
    type De = D;

    fn next_element(&mut self) -> Result<Option<Value>, DeserializeError> {
        Ok(self.iter.next())
    }

    fn path(&self) -> &FieldPath {
        &self.path
    }

    fn scoped(&self, value: Value, path: FieldPath) -> D {
        self.template.scoped(value, path)
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

// -----------------------------------------------------------------------------
// MapCursor

/// A [`MapAccess`] over an owned list of raw entries.
pub struct MapCursor<D: Deserializer> {
    iter: std::vec::IntoIter<(String, Value)>,
    template: D,
    path: FieldPath,
}

impl<D: Deserializer> MapCursor<D> {
    pub fn new(entries: Vec<(String, Value)>, template: D, path: FieldPath) -> Self {
        Self {
            iter: entries.into_iter(),
            template,
            path,
        }
    }
}

impl<D: Deserializer> MapAccess for MapCursor<D> {
    type De = D;

    fn next_entry(&mut self) -> Result<Option<(String, Value)>, DeserializeError> {
        Ok(self.iter.next())
    }

    fn path(&self) -> &FieldPath {
        &self.path
    }

    fn scoped(&self, value: Value, path: FieldPath) -> D {
        self.template.scoped(value, path)
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

// -----------------------------------------------------------------------------
// EnumCursor

/// An [`EnumAccess`] over a decoded variant name and optional payload.
pub struct EnumCursor<D: Deserializer> {
    variant: Option<(String, Option<Value>)>,
    template: D,
    path: FieldPath,
}

impl<D: Deserializer> EnumCursor<D> {
    pub fn new(name: String, data: Option<Value>, template: D, path: FieldPath) -> Self {
        Self {
            variant: Some((name, data)),
            template,
            path,
        }
    }
}

impl<D: Deserializer> EnumAccess for EnumCursor<D> {
    type De = D;

    fn variant(&mut self) -> Result<Option<(String, Option<Value>)>, DeserializeError> {
        Ok(self.variant.take())
    }

    fn path(&self) -> &FieldPath {
        &self.path
    }

    fn scoped(&self, value: Value, path: FieldPath) -> D {
        self.template.scoped(value, path)
    }
}

#[cfg(test)]
mod tests {
    use super::{EnumCursor, MapCursor, SeqCursor};
    use crate::de::{EnumAccess, MapAccess, SeqAccess};
    use crate::path::FieldPath;
    use crate::value::{Value, ValueDeserializer};

    fn template() -> ValueDeserializer {
        ValueDeserializer::new(Value::Null)
    }

    #[test]
    fn seq_cursor_stays_exhausted() {
        let mut cursor = SeqCursor::new(
            vec![Value::Number(1.0)],
            template(),
            FieldPath::root(),
        );
        assert!(cursor.next_element().unwrap().is_some());
        assert!(cursor.next_element().unwrap().is_none());
        assert!(cursor.next_element().unwrap().is_none());
    }

    #[test]
    fn map_cursor_yields_entries_in_order() {
        let mut cursor = MapCursor::new(
            vec![
                ("a".to_owned(), Value::Bool(true)),
                ("b".to_owned(), Value::Null),
            ],
            template(),
            FieldPath::root(),
        );
        assert_eq!(cursor.size_hint(), Some(2));
        assert_eq!(cursor.next_entry().unwrap().unwrap().0, "a");
        assert_eq!(cursor.next_entry().unwrap().unwrap().0, "b");
        assert!(cursor.next_entry().unwrap().is_none());
        assert!(cursor.next_entry().unwrap().is_none());
    }

    #[test]
    fn enum_cursor_is_single_use() {
        let mut cursor = EnumCursor::new("Active".to_owned(), None, template(), FieldPath::root());
        assert_eq!(cursor.variant().unwrap(), Some(("Active".to_owned(), None)));
        assert_eq!(cursor.variant().unwrap(), None);
    }
}
