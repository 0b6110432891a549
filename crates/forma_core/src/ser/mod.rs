//! The output-side contract.
//!
//! A format backend implements [`Serializer`] plus the three sub-serializer
//! traits; a data type implements [`Serialize`] by driving whichever
//! serializer it is handed. Rendering is a single depth-first pass: a
//! sub-serializer accepts its elements and is then finalized by exactly one
//! `end` call, which move semantics enforce at compile time.

use chrono::{DateTime, Utc};

use crate::error::SerializeError;

// -----------------------------------------------------------------------------
// Serialize

/// The capability of rendering oneself through any [`Serializer`].
///
/// # Examples
///
/// Hand-written implementation for a struct with two fields:
///
/// ```
/// use forma_core::ser::{Serialize, SerializeStruct, Serializer};
/// use forma_core::SerializeError;
///
/// struct Point { x: f64, y: f64 }
///
/// impl Serialize for Point {
///     fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, SerializeError> {
///         let mut state = serializer.serialize_struct("Point", 2)?;
///         state.serialize_field("x", &self.x)?;
///         state.serialize_field("y", &self.y)?;
///         state.end()
///     }
/// }
/// ```
pub trait Serialize {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, SerializeError>;
}

// -----------------------------------------------------------------------------
// Serializer

/// The complete vocabulary a format backend must support.
///
/// A serializer is single-use: every method consumes it and produces either
/// the backend's accumulated output (`Ok`) or a sub-serializer that will.
/// Implementations mutate only their own accumulation buffer.
pub trait Serializer: Sized {
    /// The backend's accumulated output (a native value, rendered text, or
    /// `()` for serializers writing into a caller-owned buffer).
    type Ok;

    type SerializeSeq: SerializeSeq<Ok = Self::Ok>;
    type SerializeMap: SerializeMap<Ok = Self::Ok>;
    type SerializeStruct: SerializeStruct<Ok = Self::Ok>;

    fn serialize_null(self) -> Result<Self::Ok, SerializeError>;

    fn serialize_bool(self, v: bool) -> Result<Self::Ok, SerializeError>;

    fn serialize_number(self, v: f64) -> Result<Self::Ok, SerializeError>;

    fn serialize_string(self, v: &str) -> Result<Self::Ok, SerializeError>;

    fn serialize_bytes(self, v: &[u8]) -> Result<Self::Ok, SerializeError>;

    /// Serializes a date.
    ///
    /// The provided implementation renders the RFC 3339 text form, which is
    /// the convention text backends share; backends with a native date
    /// representation override this.
    fn serialize_date(self, v: DateTime<Utc>) -> Result<Self::Ok, SerializeError> {
        self.serialize_string(&v.to_rfc3339())
    }

    /// Serializes the absent case of an optional value.
    fn serialize_none(self) -> Result<Self::Ok, SerializeError>;

    /// Serializes the present case of an optional value.
    fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> Result<Self::Ok, SerializeError>;

    /// Serializes a single-value wrapper transparently as its content.
    fn serialize_newtype<T: Serialize + ?Sized>(
        self,
        name: &'static str,
        value: &T,
    ) -> Result<Self::Ok, SerializeError>;

    /// Serializes a data-less enum variant as a bare token.
    fn serialize_unit_variant(
        self,
        name: &'static str,
        variant: &'static str,
    ) -> Result<Self::Ok, SerializeError>;

    /// Serializes a variant carrying data as a single-entry mapping from the
    /// variant name to the data.
    fn serialize_data_variant<T: Serialize + ?Sized>(
        self,
        name: &'static str,
        variant: &'static str,
        data: &T,
    ) -> Result<Self::Ok, SerializeError>;

    /// Opens a sequence. When a length hint is given, the sub-serializer
    /// must receive exactly that many elements.
    fn serialize_seq(self, len: Option<usize>) -> Result<Self::SerializeSeq, SerializeError>;

    /// Opens a string-keyed mapping.
    fn serialize_map(self, len: Option<usize>) -> Result<Self::SerializeMap, SerializeError>;

    /// Opens a struct with a declared field count. Skipped fields do not
    /// count toward `len`.
    fn serialize_struct(
        self,
        name: &'static str,
        len: usize,
    ) -> Result<Self::SerializeStruct, SerializeError>;
}

// -----------------------------------------------------------------------------
// Sub-serializers

/// Accumulates sequence elements, finalized by [`end`](Self::end).
pub trait SerializeSeq {
    type Ok;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T)
    -> Result<(), SerializeError>;

    fn end(self) -> Result<Self::Ok, SerializeError>;
}

/// Accumulates map entries, finalized by [`end`](Self::end).
///
/// Backends that only support whole-entry serialization fail
/// [`serialize_key`](Self::serialize_key)/[`serialize_value`](Self::serialize_value)
/// with a [`SerializeError`] rather than silently dropping data.
pub trait SerializeMap {
    type Ok;

    fn serialize_key<T: Serialize + ?Sized>(&mut self, key: &T) -> Result<(), SerializeError>;

    fn serialize_value<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), SerializeError>;

    fn serialize_entry<K: Serialize + ?Sized, V: Serialize + ?Sized>(
        &mut self,
        key: &K,
        value: &V,
    ) -> Result<(), SerializeError> {
        self.serialize_key(key)?;
        self.serialize_value(value)
    }

    fn end(self) -> Result<Self::Ok, SerializeError>;
}

/// Accumulates named struct fields, finalized by [`end`](Self::end).
pub trait SerializeStruct {
    type Ok;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        name: &'static str,
        value: &T,
    ) -> Result<(), SerializeError>;

    /// Marks a field as intentionally excluded. The field must not appear in
    /// the output and does not count toward the declared field count.
    fn skip_field(&mut self, name: &'static str) -> Result<(), SerializeError> {
        let _ = name;
        Ok(())
    }

    fn end(self) -> Result<Self::Ok, SerializeError>;
}

// -----------------------------------------------------------------------------
// Impossible

enum Void {}

/// A sub-serializer for serializers that support no composite shapes.
///
/// This type cannot be constructed; it exists to satisfy the associated
/// types of serializers such as [`StringKeySerializer`].
pub struct Impossible<Ok> {
    void: Void,
    _ok: std::marker::PhantomData<Ok>,
}

impl<Ok> SerializeSeq for Impossible<Ok> {
    type Ok = Ok;

    fn serialize_element<T: Serialize + ?Sized>(
        &mut self,
        _value: &T,
    ) -> Result<(), SerializeError> {
        match self.void {}
    }

    fn end(self) -> Result<Self::Ok, SerializeError> {
        match self.void {}
    }
}

impl<Ok> SerializeMap for Impossible<Ok> {
    type Ok = Ok;

    fn serialize_key<T: Serialize + ?Sized>(&mut self, _key: &T) -> Result<(), SerializeError> {
        match self.void {}
    }

    fn serialize_value<T: Serialize + ?Sized>(&mut self, _value: &T) -> Result<(), SerializeError> {
        match self.void {}
    }

    fn end(self) -> Result<Self::Ok, SerializeError> {
        match self.void {}
    }
}

impl<Ok> SerializeStruct for Impossible<Ok> {
    type Ok = Ok;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        _name: &'static str,
        _value: &T,
    ) -> Result<(), SerializeError> {
        match self.void {}
    }

    fn end(self) -> Result<Self::Ok, SerializeError> {
        match self.void {}
    }
}

// -----------------------------------------------------------------------------
// StringKeySerializer

/// A serializer that accepts exactly one string and nothing else.
///
/// Map-capable backends run keys through this to enforce the string-keyed
/// mapping model; any non-string key fails with a descriptive error instead
/// of being coerced or dropped.
pub struct StringKeySerializer;

fn key_error(found: &'static str) -> SerializeError {
    SerializeError::unsupported(format!("map keys must be strings, found {found}"))
}

impl Serializer for StringKeySerializer {
    type Ok = String;

    type SerializeSeq = Impossible<String>;
    type SerializeMap = Impossible<String>;
    type SerializeStruct = Impossible<String>;

    fn serialize_null(self) -> Result<String, SerializeError> {
        Err(key_error("null"))
    }

    fn serialize_bool(self, _v: bool) -> Result<String, SerializeError> {
        Err(key_error("a boolean"))
    }

    fn serialize_number(self, _v: f64) -> Result<String, SerializeError> {
        Err(key_error("a number"))
    }

    fn serialize_string(self, v: &str) -> Result<String, SerializeError> {
        Ok(v.to_owned())
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<String, SerializeError> {
        Err(key_error("bytes"))
    }

    fn serialize_none(self) -> Result<String, SerializeError> {
        Err(key_error("an absent optional"))
    }

    fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> Result<String, SerializeError> {
        value.serialize(self)
    }

    fn serialize_newtype<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<String, SerializeError> {
        value.serialize(self)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        variant: &'static str,
    ) -> Result<String, SerializeError> {
        Ok(variant.to_owned())
    }

    fn serialize_data_variant<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        _variant: &'static str,
        _data: &T,
    ) -> Result<String, SerializeError> {
        Err(key_error("an enum variant with data"))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq, SerializeError> {
        Err(key_error("a sequence"))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap, SerializeError> {
        Err(key_error("an object"))
    }

    fn serialize_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStruct, SerializeError> {
        Err(key_error("a struct"))
    }
}
