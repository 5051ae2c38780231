// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Procedural macro behind `docmodel`.
//!
//! This crate is an implementation detail. Depend on `docmodel`, which
//! re-exports the derive together with the runtime it generates code for.
//!
//! # Attribute Quick Reference
//!
//! ## Type-Level `#[document(...)]`
//!
//! ```rust,ignore
//! #[derive(Document)]
//! #[document(
//!     collection = "shops",      // Optional: explicit collection name
//!     rename_all = "camelCase",  // Optional: wire name rule for fields or variants
//!     rename = "Store",          // Optional: class name (default: type name)
//!     tag = "_t",                // Enums with data variants: discriminator key
//!     crate = "docmodel"         // Optional: path to the runtime crate
//! )]
//! pub struct Shop { /* ... */ }
//! ```
//!
//! ## Field-Level Attributes
//!
//! ```rust,ignore
//! pub struct Shop {
//!     #[id]                               // Identifier, wire name `_id`
//!     pub id: Option<Id<Shop>>,
//!
//!     #[field(rename = "n")]              // Explicit wire name
//!     pub name: String,
//!
//!     #[field(default)]                   // Default::default() when absent
//!     pub rank: i32,
//!
//!     #[field(default = "default_tags")]  // Function called when absent
//!     pub tags: Vec<String>,
//!
//!     #[field(skip)]                      // Never stored
//!     pub cache: Vec<u8>,
//!
//!     #[field(flatten)]                   // Base fields spliced into this document
//!     pub audit: Audit,
//! }
//! ```
//!
//! ## Variant-Level `#[variant(...)]`
//!
//! ```rust,ignore
//! #[derive(Document)]
//! pub enum Status {
//!     #[variant(rename = "on")]
//!     Active,
//!     Archived,
//! }
//! ```
//!
//! # Generated Code Overview
//!
//! For a struct `Shop`:
//!
//! | Generated Item | Description |
//! |----------------|-------------|
//! | `ShopFields<R>` | Path handles, one method per stored field |
//! | `impl Document for Shop` | Schema description for the registry |
//! | `impl DocumentCodec for Shop` | Field writer, field reader, identifier assignment |
//! | `impl BsonValue for Shop` | Embedding as a nested document |
//! | `impl PathTarget for Shop` | Addressing as a nested field |
//!
//! For an enum, `BsonValue` and `PathTarget`, plus `MapKey` when every
//! variant is a unit variant.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(
    missing_docs,
    rustdoc::missing_crate_level_docs,
    rustdoc::broken_intra_doc_links,
    rust_2018_idioms
)]
#![deny(unsafe_code)]

mod document;
mod utils;

use proc_macro::TokenStream;

/// Derive schema, typed field paths and a BSON codec from one definition.
///
/// # Overview
///
/// One walk over the declared fields produces every generated item, so the
/// path handles, the schema and the codec always agree on field names, order
/// and nullability.
///
/// # Type Attributes
///
/// | Attribute | Applies To | Default | Description |
/// |-----------|------------|---------|-------------|
/// | `collection` | structs | naming rule of the class name | Collection name |
/// | `rename_all` | all | none | `camelCase`, `snake_case`, `PascalCase`, `SCREAMING_SNAKE_CASE`, `kebab-case`, `lowercase`, `UPPERCASE` |
/// | `rename` | all | type name | Class name in schemas and errors |
/// | `tag` | enums with data variants | required | Discriminator key |
/// | `crate` | all | `docmodel` | Path to the runtime crate |
///
/// # Field Attributes
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | `#[id]` | Identifier field. Wire name `_id`; generated on encode when `None`. |
/// | `#[field(rename = "x")]` | Explicit wire name. Wins over `rename_all` and `#[id]`. |
/// | `#[field(default)]` | `Default::default()` when absent or null. |
/// | `#[field(default = "path")]` | Call `path()` when absent or null. |
/// | `#[field(skip)]` | Not stored. Decodes to its default. |
/// | `#[field(flatten)]` | Splice a derived base document's fields into this one. |
///
/// # Enums
///
/// Unit-only enums encode as the variant's wire name and can key maps.
/// Enums whose variants each wrap one derived document need a `tag` and
/// encode as the wrapped document plus the discriminator:
///
/// ```rust,ignore
/// #[derive(Document)]
/// #[document(tag = "_t", rename_all = "snake_case")]
/// pub enum Payment {
///     Card(CardPayment),
///     BankTransfer(BankPayment),
/// }
/// // { "_t": "bank_transfer", "iban": "..." }
/// ```
///
/// # Errors
///
/// Misuse is reported at compile time, pointing at the offending item:
///
/// - tuple and unit structs, unions
/// - lifetime or const parameters
/// - more than one `#[id]`, or `#[id]` on a skipped or flattened field
/// - enums mixing unit and data variants
/// - data variants without `tag`, or with other than one unnamed field
/// - an unsupported `rename_all` rule
#[proc_macro_derive(Document, attributes(document, id, field, variant))]
pub fn derive_document(input: TokenStream) -> TokenStream {
    document::derive(input)
}
