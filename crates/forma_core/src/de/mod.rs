//! The input-side contract.
//!
//! A [`Deserializer`] owns one raw value and exposes type-directed entry
//! points; each entry point inspects the raw shape and hands the single
//! matching `visit_*` call to the caller's [`Visitor`]. Composite shapes are
//! walked through the [`SeqAccess`]/[`MapAccess`]/[`EnumAccess`] cursors,
//! which also carry the explicit child-scoping operation nested decoding
//! recurses through.
//!
//! A visitor is a short-lived, single-use strategy object: exactly one
//! `visit_*` method runs per `deserialize_*` call, and every unsupported
//! shape fails with an expected-vs-found error built from the visitor's
//! [`expecting`](Visitor::expecting) self-description. `expecting` is only
//! consulted when an error must be constructed, never eagerly.

mod cursor;

pub use cursor::{EnumCursor, MapCursor, SeqCursor};

use std::fmt;

use chrono::{DateTime, Utc};

use crate::error::DeserializeError;
use crate::path::FieldPath;
use crate::value::{Value, ValueKind};

// -----------------------------------------------------------------------------
// Deserialize

/// The capability of reconstructing exactly one value of a type from a
/// [`Deserializer`].
///
/// The type owns the reconstruction logic; the deserializer owns the raw
/// input; the visitor created inside an implementation lives for a single
/// call.
pub trait Deserialize: Sized {
    fn deserialize<D: Deserializer>(deserializer: D) -> Result<Self, DeserializeError>;
}

// -----------------------------------------------------------------------------
// Deserializer

/// Type-directed access to one raw value of a parsed document.
///
/// Every `deserialize_*` method consumes the deserializer and invokes the
/// single `visit_*` method matching the raw value's actual shape, or fails
/// with a type-mismatch error when the shape does not match what the method
/// name promises. [`deserialize_any`](Self::deserialize_any) is the
/// exception: it dispatches purely on the raw shape.
///
/// [`scoped`](Self::scoped) is the explicit child-scoping operation: it
/// creates a deserializer over a nested raw value at an extended field path,
/// sharing this deserializer's configuration. Nested-object decoding and the
/// validation layer rely on it instead of assuming a backend's deserializer
/// is constructible from a raw value alone.
pub trait Deserializer: Sized {
    /// Dispatches on the raw value's own shape, for callers with no static
    /// expectation.
    fn deserialize_any<V: Visitor>(self, visitor: V) -> Result<V::Output, DeserializeError>;

    fn deserialize_bool<V: Visitor>(self, visitor: V) -> Result<V::Output, DeserializeError>;

    fn deserialize_number<V: Visitor>(self, visitor: V) -> Result<V::Output, DeserializeError>;

    fn deserialize_string<V: Visitor>(self, visitor: V) -> Result<V::Output, DeserializeError>;

    fn deserialize_bytes<V: Visitor>(self, visitor: V) -> Result<V::Output, DeserializeError>;

    fn deserialize_date<V: Visitor>(self, visitor: V) -> Result<V::Output, DeserializeError>;

    fn deserialize_seq<V: Visitor>(self, visitor: V) -> Result<V::Output, DeserializeError>;

    fn deserialize_map<V: Visitor>(self, visitor: V) -> Result<V::Output, DeserializeError>;

    /// Treats an absent/null raw value as the valid "none" case (invoking
    /// [`Visitor::visit_null`]) and any present value as the general case
    /// (invoking [`Visitor::visit_some`] with this deserializer).
    fn deserialize_option<V: Visitor>(self, visitor: V) -> Result<V::Output, DeserializeError>;

    /// Deserializes a struct. `fields` is a diagnostics hint, not a hard
    /// filter — backends may ignore unknown keys.
    fn deserialize_struct<V: Visitor>(
        self,
        name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Output, DeserializeError>;

    /// Deserializes an enum: a bare string is a data-less variant, a
    /// single-entry mapping is a variant with data, anything else fails with
    /// an invalid-enum-format error.
    fn deserialize_enum<V: Visitor>(
        self,
        name: &'static str,
        variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Output, DeserializeError>;

    /// The path of this deserializer's raw value within the document.
    fn path(&self) -> &FieldPath;

    /// Creates a child deserializer scoped to a nested raw value.
    fn scoped(&self, value: Value, path: FieldPath) -> Self;
}

// -----------------------------------------------------------------------------
// Visitor

/// A polymorphic handler over the raw capability set, reconstructing one
/// typed value from exactly one recognized shape.
///
/// Every `visit_*` method defaults to the descriptive mismatch error, so an
/// implementation overrides only the shapes it supports.
pub trait Visitor: Sized {
    type Output;

    /// Describes what this visitor expects, in the form "a string",
    /// "struct `User`". Used solely to build error messages.
    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;

    fn visit_null(self) -> Result<Self::Output, DeserializeError> {
        Err(invalid_type(&self, ValueKind::Null))
    }

    fn visit_bool(self, v: bool) -> Result<Self::Output, DeserializeError> {
        let _ = v;
        Err(invalid_type(&self, ValueKind::Bool))
    }

    fn visit_number(self, v: f64) -> Result<Self::Output, DeserializeError> {
        let _ = v;
        Err(invalid_type(&self, ValueKind::Number))
    }

    fn visit_string(self, v: String) -> Result<Self::Output, DeserializeError> {
        let _ = v;
        Err(invalid_type(&self, ValueKind::String))
    }

    fn visit_bytes(self, v: Vec<u8>) -> Result<Self::Output, DeserializeError> {
        let _ = v;
        Err(invalid_type(&self, ValueKind::Bytes))
    }

    fn visit_date(self, v: DateTime<Utc>) -> Result<Self::Output, DeserializeError> {
        let _ = v;
        Err(invalid_type(&self, ValueKind::Date))
    }

    /// The present case of an optional value. The child deserializer is
    /// positioned on the raw value itself.
    fn visit_some<D: Deserializer>(self, deserializer: D) -> Result<Self::Output, DeserializeError> {
        let _ = deserializer;
        Err(DeserializeError::custom(format!(
            "invalid type: expected {}, found an optional value",
            Expecting(&self)
        )))
    }

    fn visit_seq<A: SeqAccess>(self, seq: A) -> Result<Self::Output, DeserializeError> {
        let _ = seq;
        Err(invalid_type(&self, ValueKind::Seq))
    }

    fn visit_map<A: MapAccess>(self, map: A) -> Result<Self::Output, DeserializeError> {
        let _ = map;
        Err(invalid_type(&self, ValueKind::Map))
    }

    fn visit_enum<A: EnumAccess>(self, data: A) -> Result<Self::Output, DeserializeError> {
        let _ = data;
        Err(DeserializeError::custom(format!(
            "invalid type: expected {}, found an enum value",
            Expecting(&self)
        )))
    }
}

// -----------------------------------------------------------------------------
// Error helpers

struct Expecting<'a, V: Visitor>(&'a V);

impl<V: Visitor> fmt::Display for Expecting<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.expecting(f)
    }
}

fn expecting_to_string<V: Visitor>(visitor: &V) -> String {
    Expecting(visitor).to_string()
}

/// Builds the standard expected-vs-found error from a visitor's
/// self-description and the raw shape actually seen.
pub fn invalid_type<V: Visitor>(visitor: &V, found: ValueKind) -> DeserializeError {
    DeserializeError::InvalidType {
        expected: expecting_to_string(visitor),
        found,
    }
}

// -----------------------------------------------------------------------------
// Access cursors

/// A cursor over the elements of a raw sequence.
///
/// Once `next_element` reports exhaustion it stays exhausted; the cursor is
/// never revived.
pub trait SeqAccess {
    type De: Deserializer;

    /// The next raw element, or `None` when the sequence is exhausted.
    fn next_element(&mut self) -> Result<Option<Value>, DeserializeError>;

    /// The path of the sequence itself.
    fn path(&self) -> &FieldPath;

    /// A child deserializer over a raw value drawn from this sequence.
    fn scoped(&self, value: Value, path: FieldPath) -> Self::De;

    /// The number of remaining elements, if known.
    fn size_hint(&self) -> Option<usize> {
        None
    }
}

/// A cursor over the entries of a raw mapping.
pub trait MapAccess {
    type De: Deserializer;

    /// The next raw entry, or `None` when the mapping is exhausted.
    fn next_entry(&mut self) -> Result<Option<(String, Value)>, DeserializeError>;

    /// The path of the mapping itself.
    fn path(&self) -> &FieldPath;

    /// A child deserializer over a raw value drawn from this mapping.
    fn scoped(&self, value: Value, path: FieldPath) -> Self::De;

    /// The number of remaining entries, if known.
    fn size_hint(&self) -> Option<usize> {
        None
    }
}

/// A cursor over a raw enum value: the variant name and its optional data.
pub trait EnumAccess {
    type De: Deserializer;

    /// The variant name and raw payload, or `None` once already consumed.
    fn variant(&mut self) -> Result<Option<(String, Option<Value>)>, DeserializeError>;

    /// The path of the enum value itself.
    fn path(&self) -> &FieldPath;

    /// A child deserializer over the variant's raw payload.
    fn scoped(&self, value: Value, path: FieldPath) -> Self::De;
}
