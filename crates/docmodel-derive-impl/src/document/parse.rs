// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Parsing of `#[derive(Document)]` input.
//!
//! # Architecture
//!
//! ```text
//! parse.rs (DocumentDef)
//! ├── attrs.rs    - #[document(...)] via darling
//! ├── rename.rs   - rename_all rules
//! ├── field.rs    - #[id] and #[field(...)]
//! └── variant.rs  - #[variant(...)]
//! ```
//!
//! Every misuse found is reported, not just the first one.

mod attrs;
mod field;
mod rename;
mod variant;


use std::collections::HashSet;

use darling::FromDeriveInput;
pub use field::{FieldDef, FieldDefault};
pub use rename::RenameRule;
use syn::{Data, DeriveInput, GenericParam, Generics, Ident, Visibility};
pub use variant::VariantDef;

use self::attrs::DocumentAttrs;

/// What the derive generates for.
#[derive(Debug)]
pub enum Shape {
    /// Struct with named fields.
    Struct(Vec<FieldDef>),
    /// Enum of unit variants, stored as the variant name.
    Unit(Vec<VariantDef>),
    /// Enum of document-wrapping variants, stored with a discriminator.
    Tagged {
        /// Discriminator key.
        tag:      String,
        /// Variants, each wrapping one document type.
        variants: Vec<VariantDef>
    }
}

/// Complete parsed definition.
#[derive(Debug)]
pub struct DocumentDef {
    /// Type identifier.
    pub ident: Ident,

    /// Type visibility.
    pub vis: Visibility,

    /// Type parameters (no lifetimes or consts).
    pub generics: Generics,

    /// Class name.
    pub class: String,

    /// Explicit collection name.
    pub collection: Option<String>,

    /// Runtime crate path.
    pub krate: syn::Path,

    /// Struct or enum layout.
    pub shape: Shape
}

impl DocumentDef {
    /// Parse the derive input.
    ///
    /// # Errors
    ///
    /// Every misuse found, accumulated into one darling error.
    pub fn from_derive_input(input: &DeriveInput) -> darling::Result<Self> {
        let attrs = DocumentAttrs::from_derive_input(input)?;
        let mut errors = darling::Error::accumulator();

        for param in &attrs.generics.params {
            match param {
                GenericParam::Lifetime(lifetime) => errors.push(
                    darling::Error::custom("lifetime parameters are not supported")
                        .with_span(lifetime)
                ),
                GenericParam::Const(constant) => errors.push(
                    darling::Error::custom("const parameters are not supported")
                        .with_span(constant)
                ),
                GenericParam::Type(_) => {}
            }
        }

        let shape = match &input.data {
            Data::Struct(data) => {
                if attrs.tag.is_some() {
                    errors.push(
                        darling::Error::custom("`tag` applies to enums").with_span(&attrs.ident)
                    );
                }
                let fields: Vec<FieldDef> = data
                    .fields
                    .iter()
                    .filter_map(|field| {
                        errors.handle(FieldDef::from_field(field, attrs.rename_all))
                    })
                    .collect();
                for extra in fields.iter().filter(|field| field.is_id).skip(1) {
                    errors.push(
                        darling::Error::custom("more than one `#[id]` field")
                            .with_span(&extra.ident)
                    );
                }
                Shape::Struct(fields)
            }
            Data::Enum(data) => {
                if attrs.collection.is_some() {
                    errors.push(
                        darling::Error::custom("`collection` applies to structs")
                            .with_span(&attrs.ident)
                    );
                }
                if !attrs.generics.params.is_empty() {
                    errors.push(
                        darling::Error::custom("generic enums are not supported")
                            .with_span(&attrs.generics)
                    );
                }
                let variants: Vec<VariantDef> = data
                    .variants
                    .iter()
                    .filter_map(|variant| {
                        errors.handle(VariantDef::from_variant(variant, attrs.rename_all))
                    })
                    .collect();
                let mut seen = HashSet::new();
                for variant in &variants {
                    if !seen.insert(variant.wire.as_str()) {
                        errors.push(
                            darling::Error::custom(format!(
                                "duplicate variant name `{}`",
                                variant.wire
                            ))
                            .with_span(&variant.ident)
                        );
                    }
                }
                errors
                    .handle(enum_shape(&attrs, variants))
                    .unwrap_or(Shape::Unit(Vec::new()))
            }
            Data::Union(_) => {
                errors.push(
                    darling::Error::custom("unions are not supported").with_span(&attrs.ident)
                );
                Shape::Unit(Vec::new())
            }
        };

        errors.finish_with(Self {
            class: attrs.rename.unwrap_or_else(|| attrs.ident.to_string()),
            ident: attrs.ident,
            vis: attrs.vis,
            generics: attrs.generics,
            collection: attrs.collection,
            krate: attrs.krate,
            shape
        })
    }

    /// Stored fields of a struct; empty for enums.
    pub fn fields(&self) -> &[FieldDef] {
        match &self.shape {
            Shape::Struct(fields) => fields,
            Shape::Unit(_) | Shape::Tagged { .. } => &[]
        }
    }
}

fn enum_shape(attrs: &DocumentAttrs, variants: Vec<VariantDef>) -> darling::Result<Shape> {
    if variants.is_empty() {
        return Err(
            darling::Error::custom("enums need at least one variant").with_span(&attrs.ident)
        );
    }

    let units = variants.iter().filter(|variant| variant.is_unit()).count();
    if units == variants.len() {
        if attrs.tag.is_some() {
            return Err(darling::Error::custom(
                "`tag` requires variants wrapping documents; unit enums are stored as strings"
            )
            .with_span(&attrs.ident));
        }
        return Ok(Shape::Unit(variants));
    }
    if units > 0 {
        return Err(darling::Error::custom(
            "enums cannot mix unit variants and variants wrapping documents"
        )
        .with_span(&attrs.ident));
    }

    match &attrs.tag {
        Some(tag) => Ok(Shape::Tagged {
            tag: tag.clone(),
            variants
        }),
        None => Err(darling::Error::custom(
            "enums with variants wrapping documents need `#[document(tag = \"...\")]`"
        )
        .with_span(&attrs.ident))
    }
}
