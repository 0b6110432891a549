//! Expansion of `#[derive(Deserialize)]`.
//!
//! Structs decode through `visit_map`: known keys deserialize at their
//! extended field path, unknown keys are ignored, and a missing field decodes
//! from a null scoped at the field's path (so `Option` fields become `None`
//! and required fields fail with a path-qualified error). Enums decode
//! through `visit_enum` with the bare-string / single-entry-mapping wire
//! convention.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{Data, DataEnum, DataStruct, DeriveInput, Error, Fields, Generics, Ident, Result};

use crate::attr::{DefaultAttr, FieldAttrs, VariantAttrs};

pub(crate) fn expand(input: &DeriveInput) -> Result<TokenStream> {
    let name = &input.ident;
    let mut generics = input.generics.clone();
    for param in generics.type_params_mut() {
        param.bounds.push(syn::parse_quote!(::forma::Deserialize));
    }

    let body = match &input.data {
        Data::Struct(data) => expand_struct(name, data, &generics)?,
        Data::Enum(data) => expand_enum(name, data, &generics)?,
        Data::Union(_) => {
            return Err(Error::new_spanned(name, "unions cannot derive Deserialize"));
        }
    };

    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    Ok(quote! {
        #[automatically_derived]
        impl #impl_generics ::forma::Deserialize for #name #ty_generics #where_clause {
            fn deserialize<__D: ::forma::Deserializer>(
                __deserializer: __D,
            ) -> ::core::result::Result<Self, ::forma::DeserializeError> {
                #body
            }
        }
    })
}

// -----------------------------------------------------------------------------
// Structs

fn expand_struct(name: &Ident, data: &DataStruct, generics: &Generics) -> Result<TokenStream> {
    let fields = match &data.fields {
        Fields::Named(fields) => &fields.named,
        Fields::Unnamed(fields) if fields.unnamed.len() == 1 => {
            return Ok(quote! {
                ::forma::Deserialize::deserialize(__deserializer).map(Self)
            });
        }
        _ => {
            return Err(Error::new_spanned(
                name,
                "Deserialize supports structs with named fields and single-field newtypes",
            ));
        }
    };

    let name_str = name.to_string();
    let expecting = format!("struct `{name_str}`");

    let mut locals = Vec::new();
    let mut arms = Vec::new();
    let mut resolutions = Vec::new();
    let mut constructors = Vec::new();
    let mut field_names = Vec::new();

    for (i, field) in fields.iter().enumerate() {
        let attrs = FieldAttrs::from_field(field)?;
        let ident = field
            .ident
            .as_ref()
            .ok_or_else(|| Error::new_spanned(field, "expected a named field"))?;
        let local = format_ident!("__field{}", i);
        let ty = &field.ty;
        let wire_name = attrs.wire_name(field);

        constructors.push(quote! { #ident: #local });

        if attrs.skip_deserializing {
            let fallback = fallback_expr(&attrs);
            resolutions.push(quote! { let #local: #ty = #fallback; });
            continue;
        }
        field_names.push(wire_name.clone());

        locals.push(quote! { let mut #local: ::core::option::Option<#ty> = ::core::option::Option::None; });

        let decode = decode_expr(&attrs, quote! { __scoped });
        arms.push(quote! {
            #wire_name => {
                let __path = ::forma::de::MapAccess::path(&__map).field(#wire_name);
                let __scoped = ::forma::de::MapAccess::scoped(&__map, __value, __path);
                #local = ::core::option::Option::Some(#decode);
            }
        });

        let resolve_missing = match attrs.default {
            Some(_) => fallback_expr(&attrs),
            None => {
                // Absent fields decode from null at their own path, so
                // optional fields become None and required fields fail with
                // the path in the message.
                let decode = decode_expr(&attrs, quote! { __scoped });
                quote! {
                    {
                        let __path = ::forma::de::MapAccess::path(&__map).field(#wire_name);
                        let __scoped = ::forma::de::MapAccess::scoped(
                            &__map,
                            ::forma::Value::Null,
                            __path,
                        );
                        #decode
                    }
                }
            }
        };
        resolutions.push(quote! {
            let #local: #ty = match #local {
                ::core::option::Option::Some(__v) => __v,
                ::core::option::Option::None => #resolve_missing,
            };
        });
    }

    let field_name_slice = quote! { &[#(#field_names),*] };
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    Ok(quote! {
        struct __Visitor #impl_generics (
            ::core::marker::PhantomData<fn() -> #name #ty_generics>,
        ) #where_clause;

        impl #impl_generics ::forma::Visitor for __Visitor #ty_generics #where_clause {
            type Output = #name #ty_generics;

            fn expecting(&self, __f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                __f.write_str(#expecting)
            }

            fn visit_map<__A: ::forma::de::MapAccess>(
                self,
                mut __map: __A,
            ) -> ::core::result::Result<#name #ty_generics, ::forma::DeserializeError> {
                #(#locals)*
                while let ::core::option::Option::Some((__key, __value)) =
                    ::forma::de::MapAccess::next_entry(&mut __map)?
                {
                    match __key.as_str() {
                        #(#arms)*
                        _ => {
                            // Unknown keys are ignored.
                            let _ = __value;
                        }
                    }
                }
                #(#resolutions)*
                ::core::result::Result::Ok(#name { #(#constructors),* })
            }
        }

        ::forma::Deserializer::deserialize_struct(
            __deserializer,
            #name_str,
            #field_name_slice,
            __Visitor(::core::marker::PhantomData),
        )
    })
}

/// The expression decoding one field from a scoped child deserializer.
fn decode_expr(attrs: &FieldAttrs, scoped: TokenStream) -> TokenStream {
    match &attrs.deserialize_with {
        Some(with) => quote! { #with(#scoped)? },
        None => quote! { ::forma::Deserialize::deserialize(#scoped)? },
    }
}

/// The expression producing a field value without consulting the input.
fn fallback_expr(attrs: &FieldAttrs) -> TokenStream {
    match &attrs.default {
        Some(DefaultAttr::Path(path)) => quote! { #path() },
        _ => quote! { ::core::default::Default::default() },
    }
}

// -----------------------------------------------------------------------------
// Enums

fn expand_enum(name: &Ident, data: &DataEnum, generics: &Generics) -> Result<TokenStream> {
    let name_str = name.to_string();
    let expecting = format!("enum `{name_str}`");

    let mut arms = Vec::new();
    let mut variant_names = Vec::new();

    for variant in &data.variants {
        let attrs = VariantAttrs::from_variant(variant)?;
        let ident = &variant.ident;
        let wire_name = attrs.wire_name(variant);
        variant_names.push(wire_name.clone());

        match &variant.fields {
            Fields::Unit => {
                arms.push(quote! {
                    #wire_name => {
                        if __payload.is_some() {
                            return ::core::result::Result::Err(
                                ::forma::DeserializeError::custom(::std::format!(
                                    "variant `{}` carries no data",
                                    #wire_name,
                                )),
                            );
                        }
                        ::core::result::Result::Ok(#name::#ident)
                    }
                });
            }
            Fields::Unnamed(fields) if fields.unnamed.len() == 1 => {
                arms.push(quote! {
                    #wire_name => {
                        let __value = __payload.unwrap_or(::forma::Value::Null);
                        let __path = ::forma::de::EnumAccess::path(&__data).field(#wire_name);
                        let __scoped = ::forma::de::EnumAccess::scoped(&__data, __value, __path);
                        ::core::result::Result::Ok(#name::#ident(
                            ::forma::Deserialize::deserialize(__scoped)?,
                        ))
                    }
                });
            }
            Fields::Named(_) => {
                return Err(Error::new_spanned(
                    variant,
                    "struct variants are not supported; wrap the fields in their own \
                     struct and use a newtype variant",
                ));
            }
            Fields::Unnamed(_) => {
                return Err(Error::new_spanned(
                    variant,
                    "tuple variants with multiple fields are not supported; wrap the \
                     fields in their own struct and use a newtype variant",
                ));
            }
        }
    }

    let variant_name_slice = quote! { &[#(#variant_names),*] };
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    Ok(quote! {
        struct __Visitor #impl_generics (
            ::core::marker::PhantomData<fn() -> #name #ty_generics>,
        ) #where_clause;

        impl #impl_generics ::forma::Visitor for __Visitor #ty_generics #where_clause {
            type Output = #name #ty_generics;

            fn expecting(&self, __f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                __f.write_str(#expecting)
            }

            fn visit_enum<__A: ::forma::de::EnumAccess>(
                self,
                mut __data: __A,
            ) -> ::core::result::Result<#name #ty_generics, ::forma::DeserializeError> {
                let ::core::option::Option::Some((__variant, __payload)) =
                    ::forma::de::EnumAccess::variant(&mut __data)?
                else {
                    return ::core::result::Result::Err(::forma::DeserializeError::custom(
                        "enum value already consumed",
                    ));
                };
                match __variant.as_str() {
                    #(#arms)*
                    __other => ::core::result::Result::Err(
                        ::forma::DeserializeError::UnknownVariant {
                            variant: __other.to_owned(),
                            expected: #variant_name_slice,
                        },
                    ),
                }
            }
        }

        ::forma::Deserializer::deserialize_enum(
            __deserializer,
            #name_str,
            #variant_name_slice,
            __Visitor(::core::marker::PhantomData),
        )
    })
}
