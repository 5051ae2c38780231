// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Enum codec generation.
//!
//! # Unit Enums
//!
//! ```rust,ignore
//! #[derive(Document)]
//! #[document(rename_all = "snake_case")]
//! enum Status { Active, OnHold }
//! // Status::OnHold <-> "on_hold"
//! ```
//!
//! Generates `BsonValue`, `MapKey` and a scalar `PathTarget`.
//!
//! # Tagged Enums
//!
//! ```rust,ignore
//! #[derive(Document)]
//! #[document(tag = "_t")]
//! enum Payment { Card(CardPayment), Transfer(BankPayment) }
//! // Payment::Card(card) <-> { "_t": "Card", ..card fields }
//! ```
//!
//! Generates `BsonValue` and a `PathTarget` addressing the union as a
//! whole. The schema type is `TypeRef::Polymorphic`.

use proc_macro2::TokenStream;
use quote::quote;

use super::parse::{DocumentDef, VariantDef};

/// Generate the impls of a unit-only enum.
pub fn generate_unit(def: &DocumentDef, variants: &[VariantDef]) -> TokenStream {
    let krate = &def.krate;
    let ident = &def.ident;
    let class = &def.class;
    let idents: Vec<_> = variants.iter().map(|variant| &variant.ident).collect();
    let wires: Vec<_> = variants.iter().map(|variant| &variant.wire).collect();

    quote! {
        impl #krate::value::BsonValue for #ident {
            fn type_ref() -> #krate::schema::TypeRef {
                #krate::schema::TypeRef::Enum {
                    name:     #class,
                    variants: ::std::vec![#(#wires),*]
                }
            }

            fn to_bson(&self, _options: &#krate::codec::EncodeOptions) -> #krate::bson::Bson {
                #krate::bson::Bson::String(#krate::value::MapKey::to_key(self))
            }

            fn from_bson(
                value: &#krate::bson::Bson
            ) -> ::core::result::Result<Self, #krate::error::ValueError> {
                <Self as #krate::value::MapKey>::from_key(
                    #krate::codec::variant_name(value, #class)?
                )
            }
        }

        impl #krate::value::MapKey for #ident {
            fn to_key(&self) -> ::std::string::String {
                let key = match self {
                    #(Self::#idents => #wires,)*
                };
                ::std::borrow::ToOwned::to_owned(key)
            }

            fn from_key(
                key: &str
            ) -> ::core::result::Result<Self, #krate::error::ValueError> {
                match key {
                    #(#wires => ::core::result::Result::Ok(Self::#idents),)*
                    other => ::core::result::Result::Err(#krate::codec::unknown_variant(#class, other))
                }
            }
        }

        impl #krate::path::PathTarget for #ident {
            const KIND: #krate::schema::ContainerKind = #krate::schema::ContainerKind::Scalar;
            type Handle<__R> = #krate::path::Path<__R, Self>;

            fn handle<__R>(
                segments: ::std::vec::Vec<#krate::path::Segment>
            ) -> Self::Handle<__R> {
                #krate::path::Path::from_segments(segments)
            }
        }
    }
}

/// Generate the impls of a tagged enum.
pub fn generate_tagged(def: &DocumentDef, tag: &str, variants: &[VariantDef]) -> TokenStream {
    let krate = &def.krate;
    let ident = &def.ident;
    let class = &def.class;
    let idents: Vec<_> = variants.iter().map(|variant| &variant.ident).collect();
    let wires: Vec<_> = variants.iter().map(|variant| &variant.wire).collect();
    let types: Vec<_> = variants.iter().filter_map(|variant| variant.inner.as_ref()).collect();

    quote! {
        impl #krate::value::BsonValue for #ident {
            fn type_ref() -> #krate::schema::TypeRef {
                #krate::schema::TypeRef::Polymorphic {
                    name:     #class,
                    tag:      #tag,
                    variants: ::std::vec![
                        #((#wires, #krate::schema::ClassRef::of::<#types>())),*
                    ]
                }
            }

            fn to_bson(&self, options: &#krate::codec::EncodeOptions) -> #krate::bson::Bson {
                match self {
                    #(Self::#idents(inner) => #krate::codec::tagged(#tag, #wires, inner, options),)*
                }
            }

            fn from_bson(
                value: &#krate::bson::Bson
            ) -> ::core::result::Result<Self, #krate::error::ValueError> {
                match #krate::codec::variant_tag(value, #class, #tag)? {
                    #(#wires => #krate::codec::embedded(value).map(Self::#idents),)*
                    other => ::core::result::Result::Err(#krate::codec::unknown_variant(#class, other))
                }
            }
        }

        impl #krate::path::PathTarget for #ident {
            const KIND: #krate::schema::ContainerKind = #krate::schema::ContainerKind::Object;
            type Handle<__R> = #krate::path::Path<__R, Self>;

            fn handle<__R>(
                segments: ::std::vec::Vec<#krate::path::Segment>
            ) -> Self::Handle<__R> {
                #krate::path::Path::from_segments(segments)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use syn::{DeriveInput, parse_quote};

    use super::*;
    use crate::document::parse::Shape;

    fn expand(input: DeriveInput) -> String {
        let def = DocumentDef::from_derive_input(&input).unwrap();
        match &def.shape {
            Shape::Unit(variants) => generate_unit(&def, variants),
            Shape::Tagged { tag, variants } => generate_tagged(&def, tag, variants),
            Shape::Struct(_) => panic!("expected an enum")
        }
        .to_string()
    }

    #[test]
    fn unit_variants_round_trip_through_keys() {
        let output = expand(parse_quote! {
            #[document(rename_all = "snake_case")]
            enum Status {
                Active,
                OnHold,
                #[variant(rename = "gone")]
                Archived,
            }
        });
        assert!(output.contains("Self :: OnHold => \"on_hold\""));
        assert!(output.contains("\"gone\" => :: core :: result :: Result :: Ok (Self :: Archived)"));
        assert!(output.contains("variants : :: std :: vec ! [\"active\" , \"on_hold\" , \"gone\"]"));
        assert!(output.contains("impl :: docmodel :: value :: MapKey for Status"));
        assert!(output.contains("ContainerKind :: Scalar"));
    }

    #[test]
    fn tagged_variants_carry_the_discriminator() {
        let output = expand(parse_quote! {
            #[document(tag = "_t", rename_all = "snake_case")]
            enum Payment {
                Card(CardPayment),
                BankTransfer(BankPayment),
            }
        });
        assert!(output.contains(
            "Self :: BankTransfer (inner) => :: docmodel :: codec :: tagged (\"_t\" , \"bank_transfer\" , inner , options)"
        ));
        assert!(output.contains("(\"card\" , :: docmodel :: schema :: ClassRef :: of :: < CardPayment > ())"));
        assert!(output.contains("variant_tag (value , \"Payment\" , \"_t\") ?"));
        assert!(output.contains("embedded (value) . map (Self :: Card)"));
        assert!(!output.contains("MapKey for"));
    }
}
