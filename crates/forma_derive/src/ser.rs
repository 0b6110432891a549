//! Expansion of `#[derive(Serialize)]`.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DataEnum, DataStruct, DeriveInput, Error, Fields, Ident, Result};

use crate::attr::{FieldAttrs, VariantAttrs};

pub(crate) fn expand(input: &DeriveInput) -> Result<TokenStream> {
    let name = &input.ident;
    let body = match &input.data {
        Data::Struct(data) => expand_struct(name, data)?,
        Data::Enum(data) => expand_enum(name, data)?,
        Data::Union(_) => {
            return Err(Error::new_spanned(name, "unions cannot derive Serialize"));
        }
    };

    let mut generics = input.generics.clone();
    for param in generics.type_params_mut() {
        param.bounds.push(syn::parse_quote!(::forma::Serialize));
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    Ok(quote! {
        #[automatically_derived]
        impl #impl_generics ::forma::Serialize for #name #ty_generics #where_clause {
            fn serialize<__S: ::forma::Serializer>(
                &self,
                __serializer: __S,
            ) -> ::core::result::Result<__S::Ok, ::forma::SerializeError> {
                #body
            }
        }
    })
}

// -----------------------------------------------------------------------------
// Structs

fn expand_struct(name: &Ident, data: &DataStruct) -> Result<TokenStream> {
    let fields = match &data.fields {
        Fields::Named(fields) => &fields.named,
        Fields::Unnamed(fields) if fields.unnamed.len() == 1 => {
            let name_str = name.to_string();
            return Ok(quote! {
                ::forma::Serializer::serialize_newtype(__serializer, #name_str, &self.0)
            });
        }
        _ => {
            return Err(Error::new_spanned(
                name,
                "Serialize supports structs with named fields and single-field newtypes",
            ));
        }
    };

    let name_str = name.to_string();
    let mut statements = Vec::new();
    let mut len = 0usize;

    for field in fields {
        let attrs = FieldAttrs::from_field(field)?;
        let ident = field
            .ident
            .as_ref()
            .ok_or_else(|| Error::new_spanned(field, "expected a named field"))?;
        let wire_name = attrs.wire_name(field);

        if attrs.skip_serializing {
            statements.push(quote! {
                ::forma::ser::SerializeStruct::skip_field(&mut __state, #wire_name)?;
            });
            continue;
        }
        len += 1;

        if let Some(with) = &attrs.serialize_with {
            let ty = &field.ty;
            statements.push(quote! {
                {
                    struct __FieldWith<'__a>(&'__a #ty);
                    impl ::forma::Serialize for __FieldWith<'_> {
                        fn serialize<__S: ::forma::Serializer>(
                            &self,
                            __serializer: __S,
                        ) -> ::core::result::Result<__S::Ok, ::forma::SerializeError> {
                            #with(self.0, __serializer)
                        }
                    }
                    ::forma::ser::SerializeStruct::serialize_field(
                        &mut __state,
                        #wire_name,
                        &__FieldWith(&self.#ident),
                    )?;
                }
            });
        } else {
            statements.push(quote! {
                ::forma::ser::SerializeStruct::serialize_field(
                    &mut __state,
                    #wire_name,
                    &self.#ident,
                )?;
            });
        }
    }

    Ok(quote! {
        let mut __state = ::forma::Serializer::serialize_struct(__serializer, #name_str, #len)?;
        #(#statements)*
        ::forma::ser::SerializeStruct::end(__state)
    })
}

// -----------------------------------------------------------------------------
// Enums

fn expand_enum(name: &Ident, data: &DataEnum) -> Result<TokenStream> {
    if data.variants.is_empty() {
        return Ok(quote! { match *self {} });
    }

    let name_str = name.to_string();
    let mut arms = Vec::new();

    for variant in &data.variants {
        let attrs = VariantAttrs::from_variant(variant)?;
        let ident = &variant.ident;
        let wire_name = attrs.wire_name(variant);

        match &variant.fields {
            Fields::Unit => {
                arms.push(quote! {
                    #name::#ident => ::forma::Serializer::serialize_unit_variant(
                        __serializer,
                        #name_str,
                        #wire_name,
                    ),
                });
            }
            Fields::Unnamed(fields) if fields.unnamed.len() == 1 => {
                arms.push(quote! {
                    #name::#ident(__data) => ::forma::Serializer::serialize_data_variant(
                        __serializer,
                        #name_str,
                        #wire_name,
                        __data,
                    ),
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

    Ok(quote! {
        match self {
            #(#arms)*
        }
    })
}
