//! Format-agnostic serialization built on a visitor-pattern core.
//!
//! Data types expose themselves through the [`Serialize`] and [`Deserialize`]
//! capabilities; format backends implement the [`Serializer`] and
//! [`Deserializer`] contracts. The two sides never learn about each other:
//! a value graph is walked exactly once regardless of the target format, and
//! a parsed document is reconstructed through a [`Visitor`] that handles
//! exactly one raw shape per call.
//!
//! # Overview
//!
//! - [`ser`]: the output-side contract — [`Serializer`] plus the
//!   [`SerializeSeq`]/[`SerializeMap`]/[`SerializeStruct`] sub-serializers.
//! - [`de`]: the input-side contract — [`Deserializer`], [`Visitor`], and the
//!   [`SeqAccess`]/[`MapAccess`]/[`EnumAccess`] cursors over raw input.
//! - [`validate`]: typed runtime checks that turn raw values into typed
//!   fields, attaching a [`FieldPath`] to every possible failure.
//! - [`dispatch`]: statically-typed and dynamically-checked entry points,
//!   the latter backed by a [`Registry`] of erased capability entries.
//! - [`value`]: the neutral raw representation ([`Value`]) parsed documents
//!   decode from, together with a reference backend over it.
//!
//! [`SerializeSeq`]: ser::SerializeSeq
//! [`SerializeMap`]: ser::SerializeMap
//! [`SerializeStruct`]: ser::SerializeStruct
//! [`SeqAccess`]: de::SeqAccess
//! [`MapAccess`]: de::MapAccess
//! [`EnumAccess`]: de::EnumAccess

// -----------------------------------------------------------------------------
// Modules

mod error;
mod path;

pub mod de;
pub mod dispatch;
pub mod impls;
pub mod registry;
pub mod ser;
pub mod validate;
pub mod value;

// -----------------------------------------------------------------------------
// Top-level exports

pub use de::{Deserialize, Deserializer, Visitor};
pub use dispatch::{deserialize, deserialize_unknown, serialize, serialize_unknown};
pub use error::{DeserializeError, SerializeError, ValidationError};
pub use impls::Bytes;
pub use path::FieldPath;
pub use registry::Registry;
pub use ser::{Serialize, Serializer};
pub use value::{Map, Value, ValueKind};
