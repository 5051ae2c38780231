// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! `impl Document` generation.
//!
//! `describe()` lists the stored fields in declaration order:
//!
//! ```rust,ignore
//! fn describe() -> SchemaBuilder {
//!     SchemaBuilder::new("Shop")
//!         .collection("shops")
//!         .flatten::<Audit>()
//!         .field(FieldDescriptor::of::<Option<Id<Shop>>>("id", "_id").identifier())
//!         .field(FieldDescriptor::of::<i32>("rank", "rank").with_default())
//! }
//! ```
//!
//! The builder splices flattened bases ahead of the own fields; the codec
//! writes in that same order.

use proc_macro2::TokenStream;
use quote::quote;

use super::{
    bounds,
    parse::{DocumentDef, FieldDef, FieldDefault},
    paths
};

/// Generate `impl Document` for a struct.
pub fn generate(def: &DocumentDef, fields: &[FieldDef]) -> TokenStream {
    let krate = &def.krate;
    let ident = &def.ident;
    let class = &def.class;
    let fields_ident = paths::fields_ident(def);
    let params = def.generics.type_params().map(|param| &param.ident);

    let generics = bounds::generics(def);
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let collection = def
        .collection
        .as_ref()
        .map(|collection| quote! { .collection(#collection) });
    let steps = fields.iter().filter(|field| field.is_stored()).map(|field| step(def, field));

    quote! {
        impl #impl_generics #krate::document::Document for #ident #ty_generics #where_clause {
            type Fields<__R> = #fields_ident<__R, #(#params),*>;

            fn describe() -> #krate::schema::SchemaBuilder {
                #krate::schema::SchemaBuilder::new(#class)
                    #collection
                    #(#steps)*
            }
        }
    }
}

fn step(def: &DocumentDef, field: &FieldDef) -> TokenStream {
    let krate = &def.krate;
    let ty = &field.ty;

    if field.flatten {
        return quote! { .flatten::<#ty>() };
    }

    let member = &field.member;
    let wire = &field.wire;
    let identifier = field.is_id.then(|| quote! { .identifier() });
    let default = (field.default != FieldDefault::None).then(|| quote! { .with_default() });
    quote! {
        .field(#krate::schema::FieldDescriptor::of::<#ty>(#member, #wire) #identifier #default)
    }
}
