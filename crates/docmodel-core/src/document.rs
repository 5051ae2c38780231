// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! The [`Document`] trait tying schema, paths and codec together.

use crate::{
    codec::DocumentCodec,
    error::SchemaError,
    path::{FieldSet, PathTarget},
    registry,
    schema::SchemaBuilder,
    value::BsonValue
};

/// A type stored as a top-level or embedded document.
///
/// Implemented by `#[derive(Document)]`. The derive generates every
/// supertrait from one walk over the struct fields, which is what keeps the
/// path handles and the codec in agreement.
///
/// # Generated Items
///
/// | Item | Purpose |
/// |------|---------|
/// | `{Name}Fields<R>` | Path handles, one method per field |
/// | `impl Document` | Schema description |
/// | `impl DocumentCodec` | Field writer and reader |
/// | `impl BsonValue` | Embedding as a nested value |
/// | `impl PathTarget` | Addressing as a nested field |
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Document)]
/// #[document(collection = "shops")]
/// pub struct Shop {
///     #[id]
///     pub id: Option<Id<Shop>>,
///     pub name: String,
/// }
///
/// let filter = docmodel::fields::<Shop>().name().eq("Acme");
/// ```
pub trait Document: DocumentCodec + BsonValue + PathTarget + 'static {
    /// Field handles rooted at `R`.
    type Fields<R>: FieldSet<R, Owner = Self>;

    /// Describe the fields for the registry.
    fn describe() -> SchemaBuilder;
}

/// Collection name of `D`.
///
/// # Errors
///
/// Returns the schema error of `D`.
pub fn collection_name<D: Document>() -> Result<String, SchemaError> {
    registry::resolve::<D>().map(|schema| schema.collection_name())
}
