//! Parsing of `#[forma(...)]` attributes on fields and variants.

use syn::{Field, LitStr, Path, Result, Token, Variant};

// -----------------------------------------------------------------------------
// Field attributes

pub(crate) enum DefaultAttr {
    /// `#[forma(default)]` — fall back to `Default::default()`.
    Trait,
    /// `#[forma(default = "path")]` — fall back to calling `path()`.
    Path(Path),
}

#[derive(Default)]
pub(crate) struct FieldAttrs {
    pub rename: Option<String>,
    pub skip_serializing: bool,
    pub skip_deserializing: bool,
    pub default: Option<DefaultAttr>,
    pub serialize_with: Option<Path>,
    pub deserialize_with: Option<Path>,
}

impl FieldAttrs {
    pub(crate) fn from_field(field: &Field) -> Result<Self> {
        let mut out = Self::default();
        for attr in &field.attrs {
            if !attr.path().is_ident("forma") {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    let lit: LitStr = meta.value()?.parse()?;
                    out.rename = Some(lit.value());
                } else if meta.path.is_ident("skip") {
                    out.skip_serializing = true;
                    out.skip_deserializing = true;
                } else if meta.path.is_ident("skip_serializing") {
                    out.skip_serializing = true;
                } else if meta.path.is_ident("skip_deserializing") {
                    out.skip_deserializing = true;
                } else if meta.path.is_ident("default") {
                    if meta.input.peek(Token![=]) {
                        let lit: LitStr = meta.value()?.parse()?;
                        out.default = Some(DefaultAttr::Path(lit.parse()?));
                    } else {
                        out.default = Some(DefaultAttr::Trait);
                    }
                } else if meta.path.is_ident("serialize_with") {
                    let lit: LitStr = meta.value()?.parse()?;
                    out.serialize_with = Some(lit.parse()?);
                } else if meta.path.is_ident("deserialize_with") {
                    let lit: LitStr = meta.value()?.parse()?;
                    out.deserialize_with = Some(lit.parse()?);
                } else {
                    return Err(meta.error("unknown forma attribute"));
                }
                Ok(())
            })?;
        }
        Ok(out)
    }

    /// The wire name of the field: the rename when given, the Rust
    /// identifier otherwise.
    pub(crate) fn wire_name(&self, field: &Field) -> String {
        match (&self.rename, &field.ident) {
            (Some(rename), _) => rename.clone(),
            (None, Some(ident)) => ident.to_string(),
            (None, None) => String::new(),
        }
    }
}

// -----------------------------------------------------------------------------
// Variant attributes

#[derive(Default)]
pub(crate) struct VariantAttrs {
    pub rename: Option<String>,
}

impl VariantAttrs {
    pub(crate) fn from_variant(variant: &Variant) -> Result<Self> {
        let mut out = Self::default();
        for attr in &variant.attrs {
            if !attr.path().is_ident("forma") {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    let lit: LitStr = meta.value()?.parse()?;
                    out.rename = Some(lit.value());
                    Ok(())
                } else {
                    Err(meta.error("unknown forma attribute"))
                }
            })?;
        }
        Ok(out)
    }

    pub(crate) fn wire_name(&self, variant: &Variant) -> String {
        self.rename
            .clone()
            .unwrap_or_else(|| variant.ident.to_string())
    }
}
