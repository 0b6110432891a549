//! Capability implementations for standard types.
//!
//! Coverage follows the core's capability set: scalars, strings, dates,
//! byte sequences (through the [`Bytes`] wrapper), options, sequences and
//! string-keyed maps. Containers recurse with indexed/field-extended paths
//! so element failures report their exact location.

mod bytes;
mod collections;
mod scalars;
mod value;

pub use bytes::Bytes;
