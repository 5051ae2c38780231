// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Enum encodings used by generated code.
//!
//! | Enum shape | Wire value |
//! |------------|------------|
//! | unit variants only | variant wire name as a string |
//! | `#[document(tag = "_t")]` with one document per variant | inner document plus discriminator key |

use bson::{Bson, Document};

use super::{DocumentCodec, DocumentWriter, EncodeOptions, reader::DocumentReader};
use crate::error::ValueError;

/// Wire name of a unit variant.
///
/// # Errors
///
/// Returns [`ValueError::Mismatch`] when `value` is not a string.
pub fn variant_name<'a>(value: &'a Bson, enum_name: &str) -> Result<&'a str, ValueError> {
    match value {
        Bson::String(name) | Bson::Symbol(name) => Ok(name),
        other => Err(ValueError::mismatch(enum_name, other))
    }
}

/// Error for a name that matches no variant.
#[must_use]
pub fn unknown_variant(enum_name: &str, variant: &str) -> ValueError {
    ValueError::UnknownVariant {
        enum_name: enum_name.to_owned(),
        variant:   variant.to_owned()
    }
}

/// Encode a variant's document with its discriminator written first.
#[must_use]
pub fn tagged<D: DocumentCodec>(
    tag: &str,
    variant: &str,
    value: &D,
    options: &EncodeOptions
) -> Bson {
    let mut writer = DocumentWriter::nested(D::class_name(), options);
    writer.put(tag, Bson::String(variant.to_owned()));
    value.write_fields(&mut writer);
    Bson::Document(writer.into_document())
}

/// Discriminator of a tagged document.
///
/// # Errors
///
/// - [`ValueError::Mismatch`] when `value` is not a document
/// - the reader's missing or mistyped discriminator failure
pub fn variant_tag<'a>(value: &'a Bson, enum_name: &'static str, tag: &str) -> Result<&'a str, ValueError> {
    let document: &'a Document = match value {
        Bson::Document(document) => document,
        other => return Err(ValueError::mismatch(enum_name, other))
    };
    Ok(DocumentReader::new(enum_name, document).tag(tag)?)
}
