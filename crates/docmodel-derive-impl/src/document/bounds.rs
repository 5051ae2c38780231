// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Where clauses for generic documents.
//!
//! A non-generic struct gets its own where clause unchanged. A generic one
//! additionally requires, per type parameter and stored field:
//!
//! | Item | Bound |
//! |------|-------|
//! | type parameter `T` | `T: 'static` |
//! | plain field `ty` | `ty: BsonValue + PathTarget` |
//! | flattened field `ty` | `ty: Document` |
//! | `Option<I>` identifier | `I: Identifier` |
//! | skipped or `#[field(default)]` field `ty` | `ty: Default` |

use quote::quote;
use syn::{GenericParam, Generics, WherePredicate, parse_quote};

use super::parse::{DocumentDef, FieldDefault};

/// Generics of every generated impl.
pub fn generics(def: &DocumentDef) -> Generics {
    let mut generics = def.generics.clone();
    let params: Vec<_> = def
        .generics
        .params
        .iter()
        .filter_map(|param| match param {
            GenericParam::Type(param) => Some(param.ident.clone()),
            GenericParam::Lifetime(_) | GenericParam::Const(_) => None
        })
        .collect();
    if params.is_empty() {
        return generics;
    }

    let krate = &def.krate;
    let mut predicates: Vec<WherePredicate> = params
        .iter()
        .map(|param| parse_quote!(#param: 'static))
        .collect();

    for field in def.fields() {
        let ty = &field.ty;
        if field.skip || field.default == FieldDefault::Trait {
            predicates.push(parse_quote!(#ty: ::core::default::Default));
        }
        if field.skip {
            continue;
        }
        if field.flatten {
            predicates.push(parse_quote!(#ty: #krate::document::Document));
            continue;
        }
        predicates.push(parse_quote!(
            #ty: #krate::value::BsonValue + #krate::path::PathTarget
        ));
        if let Some(inner) = field.generated_identifier() {
            predicates.push(parse_quote!(#inner: #krate::id::Identifier));
        }
    }

    generics.make_where_clause().predicates.extend(predicates);
    generics
}

/// `PhantomData` payload tying a field set to the document's parameters.
pub fn phantom_params(def: &DocumentDef) -> proc_macro2::TokenStream {
    let params = def.generics.type_params().map(|param| &param.ident);
    quote! { (#(#params,)*) }
}
