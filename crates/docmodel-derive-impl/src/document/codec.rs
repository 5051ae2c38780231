// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Codec generation for structs.
//!
//! | Generated | Behavior |
//! |-----------|----------|
//! | `write_fields` | flattened bases first, then own fields in declaration order |
//! | `read_fields` | by wire name, in any input order, defaults for absent fields |
//! | `assign_identifier` | own `Option<I>` identifier, else delegated to flattened bases |
//! | `BsonValue` | embedded document |
//! | `PathTarget` | `ObjectPath` handle |

use proc_macro2::TokenStream;
use quote::quote;

use super::{
    bounds,
    parse::{DocumentDef, FieldDef, FieldDefault}
};

/// Generate `DocumentCodec`, `BsonValue` and `PathTarget` for a struct.
pub fn generate(def: &DocumentDef, fields: &[FieldDef]) -> TokenStream {
    let krate = &def.krate;
    let ident = &def.ident;
    let class = &def.class;

    let generics = bounds::generics(def);
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let bases = fields.iter().filter(|field| field.flatten).map(|field| {
        let member = &field.ident;
        quote! { writer.flatten(&self.#member); }
    });
    let writes = fields.iter().filter(|field| field.is_plain()).map(write);
    let reads = fields.iter().map(read);
    let assign = assign_identifier(def, fields);

    quote! {
        impl #impl_generics #krate::codec::DocumentCodec for #ident #ty_generics #where_clause {
            fn class_name() -> &'static str {
                #class
            }

            fn ensure_schema() -> ::core::result::Result<(), #krate::error::SchemaError> {
                #krate::registry::resolve::<Self>().map(::core::mem::drop)
            }

            fn write_fields(&self, writer: &mut #krate::codec::DocumentWriter<'_>) {
                #(#bases)*
                #(#writes)*
            }

            fn read_fields(
                reader: &#krate::codec::DocumentReader<'_>
            ) -> ::core::result::Result<Self, #krate::error::DecodeError> {
                ::core::result::Result::Ok(Self {
                    #(#reads),*
                })
            }

            #assign
        }

        impl #impl_generics #krate::value::BsonValue for #ident #ty_generics #where_clause {
            fn type_ref() -> #krate::schema::TypeRef {
                #krate::schema::TypeRef::Object(#krate::schema::ClassRef::of::<Self>())
            }

            fn to_bson(&self, options: &#krate::codec::EncodeOptions) -> #krate::bson::Bson {
                #krate::codec::embed(self, options)
            }

            fn from_bson(
                value: &#krate::bson::Bson
            ) -> ::core::result::Result<Self, #krate::error::ValueError> {
                #krate::codec::embedded(value)
            }
        }

        impl #impl_generics #krate::path::PathTarget for #ident #ty_generics #where_clause {
            const KIND: #krate::schema::ContainerKind = #krate::schema::ContainerKind::Object;
            type Handle<__R> = #krate::path::ObjectPath<__R, Self>;

            fn handle<__R>(
                segments: ::std::vec::Vec<#krate::path::Segment>
            ) -> Self::Handle<__R> {
                #krate::path::ObjectPath::from_segments(segments)
            }
        }
    }
}

fn write(field: &FieldDef) -> TokenStream {
    let member = &field.ident;
    let wire = &field.wire;
    if field.generated_identifier().is_some() {
        quote! { writer.identifier(#wire, self.#member.as_ref()); }
    } else {
        quote! { writer.field(#wire, &self.#member); }
    }
}

fn read(field: &FieldDef) -> TokenStream {
    let member = &field.ident;
    let ty = &field.ty;
    let wire = &field.wire;

    if field.skip {
        return quote! { #member: ::core::default::Default::default() };
    }
    if field.flatten {
        return quote! { #member: reader.flatten::<#ty>()? };
    }
    match &field.default {
        FieldDefault::None => quote! { #member: reader.field(#wire)? },
        FieldDefault::Trait => {
            quote! { #member: reader.field_or_else(#wire, ::core::default::Default::default)? }
        }
        FieldDefault::Path(path) => quote! { #member: reader.field_or_else(#wire, #path)? }
    }
}

fn assign_identifier(def: &DocumentDef, fields: &[FieldDef]) -> Option<TokenStream> {
    let krate = &def.krate;

    let body = if let Some(own) = fields.iter().find(|field| field.generated_identifier().is_some()) {
        let member = &own.ident;
        quote! {
            self.#member = ::core::option::Option::Some(#krate::id::assign(value)?);
        }
    } else {
        let bases: Vec<_> = fields
            .iter()
            .filter(|field| field.flatten)
            .map(|field| {
                let member = &field.ident;
                quote! { #krate::codec::DocumentCodec::assign_identifier(&mut self.#member, value)?; }
            })
            .collect();
        if bases.is_empty() {
            return None;
        }
        quote! { #(#bases)* }
    };

    Some(quote! {
        fn assign_identifier(
            &mut self,
            value: &#krate::bson::Bson
        ) -> ::core::result::Result<(), #krate::error::IdError> {
            #body
            ::core::result::Result::Ok(())
        }
    })
}
