//! Derive macros for the `forma` serialization capabilities.
//!
//! The generated code refers to items through the `::forma` facade, so these
//! derives are used together with that crate (they are re-exported from it
//! behind the `derive` feature).
//!
//! Field and variant behavior is controlled with `#[forma(...)]`:
//!
//! - `rename = "..."` — wire name differing from the Rust identifier
//! - `skip` / `skip_serializing` / `skip_deserializing`
//! - `default` or `default = "path"` — fallback when the field is absent
//! - `serialize_with = "path"` / `deserialize_with = "path"`

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod attr;
mod de;
mod ser;

#[proc_macro_derive(Serialize, attributes(forma))]
pub fn derive_serialize(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    ser::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

#[proc_macro_derive(Deserialize, attributes(forma))]
pub fn derive_deserialize(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    de::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
