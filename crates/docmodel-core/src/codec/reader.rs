// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Field-by-field document decoding.

use bson::{Bson, Document};

use super::DocumentCodec;
use crate::{
    error::DecodeError,
    value::{BsonValue, preview, wire_type_name}
};

/// Read access to one encoded document.
///
/// Field order in the input is irrelevant and unknown keys are ignored.
/// Every failure names the class being decoded and the field's wire name.
#[derive(Debug, Clone, Copy)]
pub struct DocumentReader<'a> {
    class:    &'static str,
    document: &'a Document
}

impl<'a> DocumentReader<'a> {
    /// Reader for `document`, decoded as `class`.
    #[must_use]
    pub const fn new(class: &'static str, document: &'a Document) -> Self {
        Self {
            class,
            document
        }
    }

    /// Class being decoded.
    #[must_use]
    pub const fn class(&self) -> &'static str {
        self.class
    }

    /// Raw document.
    #[must_use]
    pub const fn document(&self) -> &'a Document {
        self.document
    }

    /// Decode a field.
    ///
    /// An absent field falls back to [`BsonValue::absent`], which is `None`
    /// for `Option` fields.
    ///
    /// # Errors
    ///
    /// - [`DecodeError::MissingField`] when the field is absent and required
    /// - any conversion failure, located at the field
    pub fn field<T: BsonValue>(&self, name: &str) -> Result<T, DecodeError> {
        match self.document.get(name) {
            Some(value) => T::from_bson(value).map_err(|error| error.in_field(self.class, name)),
            None => T::absent().ok_or_else(|| DecodeError::MissingField {
                class: self.class.to_owned(),
                field: name.to_owned()
            })
        }
    }

    /// Decode a field, using `default` when it is absent or null.
    ///
    /// # Errors
    ///
    /// Any conversion failure, located at the field.
    pub fn field_or_else<T: BsonValue>(
        &self,
        name: &str,
        default: impl FnOnce() -> T
    ) -> Result<T, DecodeError> {
        match self.document.get(name) {
            None | Some(Bson::Null) => Ok(default()),
            Some(value) => T::from_bson(value).map_err(|error| error.in_field(self.class, name))
        }
    }

    /// Decode a flattened base from the same document.
    ///
    /// # Errors
    ///
    /// Any failure of the base's fields.
    pub fn flatten<B: DocumentCodec>(&self) -> Result<B, DecodeError> {
        B::read_fields(self)
    }

    /// Read a string discriminator.
    ///
    /// # Errors
    ///
    /// - [`DecodeError::MissingField`] when the key is absent
    /// - [`DecodeError::TypeMismatch`] when it is not a string
    pub fn tag(&self, key: &str) -> Result<&'a str, DecodeError> {
        match self.document.get(key) {
            Some(Bson::String(tag)) => Ok(tag),
            Some(other) => Err(DecodeError::TypeMismatch {
                class:    self.class.to_owned(),
                field:    key.to_owned(),
                expected: "string".to_owned(),
                actual:   wire_type_name(other),
                value:    preview(other)
            }),
            None => Err(DecodeError::MissingField {
                class: self.class.to_owned(),
                field: key.to_owned()
            })
        }
    }
}
