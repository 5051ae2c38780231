// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Document derive macro implementation.
//!
//! # Architecture
//!
//! ```text
//! document.rs (orchestrator)
//! │
//! ├── parse/     → DocumentDef, FieldDef, VariantDef
//! │
//! ├── paths.rs   → {Name}Fields<R> and its FieldSet impl
//! ├── schema.rs  → impl Document (describe)
//! ├── codec.rs   → impl DocumentCodec, BsonValue, PathTarget
//! ├── enums.rs   → unit and tagged enums
//! └── bounds.rs  → where clauses for generic documents
//! ```
//!
//! # Generated Code
//!
//! For a struct, every generator walks the same parsed field list, so the
//! accessors, the schema and the codec cannot disagree on a wire name.
//!
//! | Generator | Struct | Unit enum | Tagged enum |
//! |-----------|--------|-----------|-------------|
//! | `paths` | yes | | |
//! | `schema` | yes | | |
//! | `codec` | yes | | |
//! | `enums` | | yes | yes |

mod bounds;
mod codec;
mod enums;
mod parse;
mod paths;
mod schema;

use proc_macro::TokenStream;
use quote::quote;
use syn::{DeriveInput, parse_macro_input};

use self::parse::{DocumentDef, Shape};

/// Main entry point for the Document derive macro.
pub fn derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match DocumentDef::from_derive_input(&input) {
        Ok(def) => generate(&def).into(),
        Err(err) => err.write_errors().into()
    }
}

fn generate(def: &DocumentDef) -> proc_macro2::TokenStream {
    match &def.shape {
        Shape::Struct(fields) => {
            let paths = paths::generate(def, fields);
            let schema = schema::generate(def, fields);
            let codec = codec::generate(def, fields);
            quote! {
                #paths
                #schema
                #codec
            }
        }
        Shape::Unit(variants) => enums::generate_unit(def, variants),
        Shape::Tagged { tag, variants } => enums::generate_tagged(def, tag, variants)
    }
}
