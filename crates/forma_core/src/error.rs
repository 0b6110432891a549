use std::borrow::Cow;
use std::fmt;

use thiserror::Error;

use crate::value::ValueKind;

// -----------------------------------------------------------------------------
// SerializeError

/// An enumeration of all error outcomes on the output side.
#[derive(Debug, Error)]
pub enum SerializeError {
    /// The backend cannot express the requested shape.
    #[error("unsupported shape: {0}")]
    Unsupported(Cow<'static, str>),

    /// A struct serializer received a different number of fields than it
    /// declared at open time.
    #[error("struct `{name}` declared {declared} fields but received {received}")]
    LengthMismatch {
        name: &'static str,
        declared: usize,
        received: usize,
    },

    /// Dynamic call site: the value's type has no registered serialize
    /// capability.
    #[error("type `{type_name}` does not have the serialize capability")]
    MissingCapability { type_name: &'static str },

    #[error("{0}")]
    Custom(String),
}

impl SerializeError {
    /// Creates an error for a shape the backend cannot represent.
    #[inline]
    pub fn unsupported(what: impl Into<Cow<'static, str>>) -> Self {
        Self::Unsupported(what.into())
    }

    /// Creates an error from an arbitrary message.
    pub fn custom(msg: impl fmt::Display) -> Self {
        Self::Custom(msg.to_string())
    }
}

// -----------------------------------------------------------------------------
// DeserializeError

/// An enumeration of all error outcomes on the input side.
///
/// Validation failures keep their own type and are carried transparently, so
/// the field path embedded in the message survives propagation verbatim.
#[derive(Debug, Error)]
pub enum DeserializeError {
    /// The raw value's shape did not match what the visitor supports.
    ///
    /// `expected` is the visitor's own description of itself, rendered from
    /// [`Visitor::expecting`](crate::Visitor::expecting) at the moment the
    /// error is built.
    #[error("invalid type: expected {expected}, found {found}")]
    InvalidType { expected: String, found: ValueKind },

    /// An enum was neither a bare variant name nor a single-entry mapping.
    #[error("invalid enum format: expected a variant name or a single-entry mapping, found {found}")]
    InvalidEnum { found: ValueKind },

    /// A variant name outside the declared set.
    #[error("unknown variant `{variant}`, expected one of {expected:?}")]
    UnknownVariant {
        variant: String,
        expected: &'static [&'static str],
    },

    /// Dynamic call site: the target type has no registered deserialize
    /// capability.
    #[error("type `{type_name}` does not have the deserialize capability")]
    MissingCapability { type_name: &'static str },

    /// A field-level validation failure, path included.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    Custom(String),
}

impl DeserializeError {
    /// Creates an error from an arbitrary message.
    pub fn custom(msg: impl fmt::Display) -> Self {
        Self::Custom(msg.to_string())
    }
}

// -----------------------------------------------------------------------------
// ValidationError

/// A raw value had the wrong shape for a specific declared field.
///
/// The `path` is the dotted/indexed location of the offending field within
/// the document (`author`, `tags[1]`), built incrementally as validation
/// descends and never persisted beyond the failing call.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Wrong shape for the field.
    #[error("invalid type for field `{path}`: expected {expected}, found {found}")]
    Type {
        path: String,
        expected: ValueKind,
        found: ValueKind,
    },

    /// A number field held the not-a-number sentinel.
    #[error("invalid number for field `{path}`: NaN is not a valid value")]
    NotANumber { path: String },

    /// A date field held a value that could not be read as a date.
    #[error("invalid date for field `{path}`: {detail}")]
    Date { path: String, detail: String },
}

impl ValidationError {
    /// Creates the standard shape-mismatch error.
    pub fn type_mismatch(
        path: &crate::FieldPath,
        expected: ValueKind,
        found: ValueKind,
    ) -> Self {
        Self::Type {
            path: path.to_string(),
            expected,
            found,
        }
    }
}
