// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Field set generation.
//!
//! For
//!
//! ```rust,ignore
//! pub struct Shop {
//!     #[id]
//!     pub id: Option<Id<Shop>>,
//!     pub address: Address,
//!     #[field(flatten)]
//!     pub audit: Audit,
//! }
//! ```
//!
//! generates
//!
//! ```rust,ignore
//! pub struct ShopFields<__R> { prefix: Vec<Segment>, _marker: PhantomData<..> }
//!
//! impl<__R> ShopFields<__R> {
//!     pub fn id(&self) -> <Option<Id<Shop>> as PathTarget>::Handle<__R>;  // Path
//!     pub fn address(&self) -> <Address as PathTarget>::Handle<__R>;      // ObjectPath
//!     pub fn audit(&self) -> <Audit as Document>::Fields<__R>;            // same prefix
//! }
//!
//! impl<__R> FieldSet<__R> for ShopFields<__R> { type Owner = Shop; .. }
//! ```
//!
//! Skipped fields get no accessor. Flattened bases are reached through an
//! accessor returning the base's field set at the same prefix, so
//! `fields::<Shop>().audit().created()` renders `created`.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{GenericParam, Generics, Ident, parse_quote};

use super::{
    bounds,
    parse::{DocumentDef, FieldDef}
};

/// Name of the generated field set.
pub fn fields_ident(def: &DocumentDef) -> Ident {
    format_ident!("{}Fields", def.ident)
}

/// Document generics with the root parameter `__R` in front.
pub fn rooted_generics(def: &DocumentDef) -> Generics {
    let mut generics = bounds::generics(def);
    let root: GenericParam = parse_quote!(__R);
    generics.params.insert(0, root);
    generics
}

/// Generate the field set struct, its accessors and its `FieldSet` impl.
pub fn generate(def: &DocumentDef, fields: &[FieldDef]) -> TokenStream {
    let krate = &def.krate;
    let vis = &def.vis;
    let ident = &def.ident;
    let fields_ident = fields_ident(def);
    let phantom = bounds::phantom_params(def);
    let struct_params = def.generics.type_params().map(|param| &param.ident);

    let rooted = rooted_generics(def);
    let (impl_generics, ty_generics, where_clause) = rooted.split_for_impl();
    let (_, doc_generics, _) = def.generics.split_for_impl();

    let struct_doc = format!("Field paths of [`{ident}`], rooted at documents of type `__R`.");
    let accessors = fields.iter().filter(|field| field.is_stored()).map(|field| accessor(def, field));

    quote! {
        #[doc = #struct_doc]
        #vis struct #fields_ident<__R, #(#struct_params),*> {
            prefix:  ::std::vec::Vec<#krate::path::Segment>,
            _marker: ::core::marker::PhantomData<fn() -> (__R, #phantom)>
        }

        impl #impl_generics #fields_ident #ty_generics #where_clause {
            #(#accessors)*
        }

        impl #impl_generics #krate::path::FieldSet<__R> for #fields_ident #ty_generics #where_clause {
            type Owner = #ident #doc_generics;

            fn at(prefix: ::std::vec::Vec<#krate::path::Segment>) -> Self {
                Self {
                    prefix,
                    _marker: ::core::marker::PhantomData
                }
            }

            fn prefix(&self) -> &[#krate::path::Segment] {
                &self.prefix
            }
        }
    }
}

fn accessor(def: &DocumentDef, field: &FieldDef) -> TokenStream {
    let krate = &def.krate;
    let vis = &field.vis;
    let method = &field.ident;
    let ty = &field.ty;
    let wire = &field.wire;

    if field.flatten {
        let doc = field.doc.clone().unwrap_or_else(|| {
            format!("Fields of the flattened `{}`, stored inline.", field.member)
        });
        return quote! {
            #[doc = #doc]
            #vis fn #method(&self) -> <#ty as #krate::document::Document>::Fields<__R> {
                <<#ty as #krate::document::Document>::Fields<__R> as #krate::path::FieldSet<__R>>::at(
                    ::core::clone::Clone::clone(&self.prefix)
                )
            }
        };
    }

    let doc = field
        .doc
        .clone()
        .unwrap_or_else(|| format!("Path to `{wire}`."));
    quote! {
        #[doc = #doc]
        #vis fn #method(&self) -> <#ty as #krate::path::PathTarget>::Handle<__R> {
            #krate::path::descend::<#ty, __R>(&self.prefix, #wire)
        }
    }
}

#[cfg(test)]
mod tests {
    use syn::DeriveInput;

    use super::*;

    fn expand(input: DeriveInput) -> String {
        let def = DocumentDef::from_derive_input(&input).unwrap();
        generate(&def, def.fields()).to_string()
    }

    #[test]
    fn one_accessor_per_stored_field() {
        let output = expand(parse_quote! {
            #[document(rename_all = "camelCase")]
            pub struct Article {
                pub title: String,
                pub shop_id: ObjectId,
                #[field(skip)]
                pub cache: Vec<u8>,
            }
        });
        assert!(output.contains("pub struct ArticleFields < __R , >"));
        assert!(output.contains("pub fn title (& self)"));
        assert!(output.contains("descend :: < ObjectId , __R > (& self . prefix , \"shopId\")"));
        assert!(!output.contains("fn cache"));
        assert!(output.contains("type Owner = Article"));
    }

    #[test]
    fn flattened_base_shares_the_prefix() {
        let output = expand(parse_quote! {
            struct Shop {
                #[field(flatten)]
                audit: Audit,
            }
        });
        assert!(output.contains("fn audit (& self) -> < Audit as :: docmodel :: document :: Document > :: Fields < __R >"));
        assert!(output.contains("Clone :: clone (& self . prefix)"));
    }

    #[test]
    fn generic_documents_thread_their_parameters() {
        let output = expand(parse_quote! {
            pub struct Page<T> {
                pub items: Vec<T>,
            }
        });
        assert!(output.contains("pub struct PageFields < __R , T >"));
        assert!(output.contains("PhantomData < fn () -> (__R , (T ,)) >"));
        assert!(output.contains("type Owner = Page < T >"));
    }

    #[test]
    fn docs_are_copied() {
        let output = expand(parse_quote! {
            struct Shop {
                /// Display name.
                name: String,
                rank: i32,
            }
        });
        assert!(output.contains("\"Display name.\""));
        assert!(output.contains("\"Path to `rank`.\""));
    }
}
