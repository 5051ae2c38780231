// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Schema construction and validation.

use std::collections::HashSet;

use super::{ClassRef, ClassSchema, FieldDescriptor, ID_FIELD};
use crate::{document::Document, error::SchemaError};

/// Builder for a [`ClassSchema`].
///
/// Generated `Document::describe()` implementations return a builder; the
/// registry calls [`build`](Self::build) once per type. The builder is also
/// the runtime registration route for schemas with no Rust type.
///
/// # Example
///
/// ```rust
/// use docmodel_core::schema::{FieldDescriptor, SchemaBuilder};
///
/// let schema = SchemaBuilder::new("Shop")
///     .collection("shops")
///     .field(FieldDescriptor::of::<String>("name", "name"))
///     .build()
///     .unwrap();
/// assert_eq!(schema.collection_name(), "shops");
/// ```
#[derive(Debug)]
pub struct SchemaBuilder {
    class:      String,
    collection: Option<String>,
    bases:      Vec<ClassRef>,
    fields:     Vec<FieldDescriptor>
}

impl SchemaBuilder {
    /// Start a schema for `class`.
    #[must_use]
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            class:      class.into(),
            collection: None,
            bases:      Vec::new(),
            fields:     Vec::new()
        }
    }

    /// Store documents in an explicit collection.
    #[must_use]
    pub fn collection(mut self, name: impl Into<String>) -> Self {
        self.collection = Some(name.into());
        self
    }

    /// Append an own field.
    #[must_use]
    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// Splice the fields of base type `B` ahead of the own fields.
    #[must_use]
    pub fn flatten<B: Document>(self) -> Self {
        self.flatten_ref(ClassRef::of::<B>())
    }

    /// Splice the fields of an already referenced base.
    #[must_use]
    pub fn flatten_ref(mut self, base: ClassRef) -> Self {
        self.bases.push(base);
        self
    }

    /// Resolve bases and validate the field list.
    ///
    /// # Errors
    ///
    /// - [`SchemaError::Base`] when a flattened base is itself invalid
    /// - [`SchemaError::DuplicateField`] when two fields share a wire name
    /// - [`SchemaError::AmbiguousIdentifier`] when more than one field is an
    ///   identifier, whether by annotation, by the `_id` name or by
    ///   inheritance
    pub fn build(self) -> Result<ClassSchema, SchemaError> {
        let mut fields = Vec::with_capacity(self.fields.len());

        for base in &self.bases {
            let schema = base.schema().map_err(|source| SchemaError::Base {
                class:  self.class.clone(),
                source: Box::new(source)
            })?;
            fields.extend(schema.fields().iter().cloned().map(|mut field| {
                field
                    .inherited_from
                    .get_or_insert_with(|| schema.class_name().to_owned());
                field
            }));
        }

        for mut field in self.fields {
            if field.name == ID_FIELD {
                field.is_identifier = true;
            }
            fields.push(field);
        }

        let mut seen = HashSet::new();
        if let Some(duplicate) = fields.iter().find(|field| !seen.insert(field.name.as_str())) {
            return Err(SchemaError::DuplicateField {
                class: self.class,
                field: duplicate.name.clone()
            });
        }

        let candidates: Vec<String> = fields
            .iter()
            .filter(|field| field.is_identifier)
            .map(|field| field.member.clone())
            .collect();
        if candidates.len() > 1 {
            return Err(SchemaError::AmbiguousIdentifier {
                class: self.class,
                candidates
            });
        }

        Ok(ClassSchema {
            class: self.class,
            collection: self.collection,
            fields
        })
    }
}
