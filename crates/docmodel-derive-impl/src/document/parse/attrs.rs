// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Type-level attribute parsing with darling.
//!
//! This module defines the internal [`DocumentAttrs`] structure used for
//! parsing `#[document(...)]`. The public API is
//! [`DocumentDef`](super::DocumentDef).
//!
//! # Supported Attributes
//!
//! | Attribute | Required | Default | Description |
//! |-----------|----------|---------|-------------|
//! | `collection` | No | naming rule of the class name | Collection name |
//! | `rename_all` | No | none | Wire name rule for fields or variants |
//! | `rename` | No | type name | Class name |
//! | `tag` | Enums with data variants | none | Discriminator key |
//! | `crate` | No | `docmodel` | Runtime crate path |

use darling::FromDeriveInput;
use syn::{Generics, Ident, Visibility};

use super::RenameRule;

/// Default runtime crate path.
pub fn default_crate() -> syn::Path {
    syn::parse_quote!(::docmodel)
}

/// Type-level attributes parsed from `#[document(...)]`.
///
/// # Example
///
/// ```rust,ignore
/// #[document(collection = "shops", rename_all = "camelCase")]
/// ```
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(document), supports(struct_named, enum_any))]
pub struct DocumentAttrs {
    /// Type identifier.
    pub ident: Ident,

    /// Type visibility, inherited by the generated field set.
    pub vis: Visibility,

    /// Type parameters.
    pub generics: Generics,

    /// Explicit collection name.
    #[darling(default)]
    pub collection: Option<String>,

    /// Wire name rule for fields or variants.
    #[darling(default)]
    pub rename_all: Option<RenameRule>,

    /// Class name override.
    #[darling(default)]
    pub rename: Option<String>,

    /// Discriminator key of a tagged enum.
    #[darling(default)]
    pub tag: Option<String>,

    /// Path to the runtime crate, for crates that rename the dependency.
    #[darling(rename = "crate", default = "default_crate")]
    pub krate: syn::Path
}
