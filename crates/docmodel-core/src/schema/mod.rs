// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Class schemas: the ordered field list shared by paths and codecs.
//!
//! A [`ClassSchema`] is the single description of a document type that both
//! the path handles and the encoder/decoder pair are generated from. Each
//! field is a [`FieldDescriptor`].
//!
//! # Architecture
//!
//! ```text
//! #[derive(Document)] ──► Document::describe() ──► SchemaBuilder
//!                                                      │ build()
//!                                                      ▼
//!                         registry (TypeId → Arc<ClassSchema>)
//!                              │                  │
//!                   FieldSet::field(name)    codec::encode / decode
//! ```
//!
//! # Field Order
//!
//! Fields of flattened bases come first, in base order, followed by the
//! type's own fields in declaration order. The order is fixed once the schema
//! is built and defines the encoded document layout.

mod builder;
mod types;

pub use builder::SchemaBuilder;
use bson::Document;
pub use types::{ClassRef, ContainerKind, ScalarKind, TypeRef};

use crate::{
    config,
    error::{DecodeError, PathError},
    value::{BsonValue, preview, wire_type_name}
};

/// Wire name recognised as the identifier without annotation.
pub const ID_FIELD: &str = "_id";

/// One field of a class schema.
///
/// # Example
///
/// ```rust
/// use docmodel_core::schema::FieldDescriptor;
///
/// let field = FieldDescriptor::of::<Option<i32>>("stock", "stock");
/// assert!(field.is_nullable());
/// assert!(field.has_default());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    name:           String,
    member:         String,
    declared_type:  TypeRef,
    nullable:       bool,
    has_default:    bool,
    is_identifier:  bool,
    inherited_from: Option<String>
}

impl FieldDescriptor {
    /// Describe member `member`, stored under wire name `name`.
    #[must_use]
    pub fn new(member: impl Into<String>, name: impl Into<String>, declared_type: TypeRef) -> Self {
        let nullable = declared_type.is_nullable();
        Self {
            name: name.into(),
            member: member.into(),
            declared_type,
            nullable,
            has_default: nullable,
            is_identifier: false,
            inherited_from: None
        }
    }

    /// Describe a member whose Rust type is `T`.
    #[must_use]
    pub fn of<T: BsonValue>(member: &str, name: &str) -> Self {
        Self::new(member, name, T::type_ref())
    }

    /// Mark the field as the document identifier.
    #[must_use]
    pub fn identifier(mut self) -> Self {
        self.is_identifier = true;
        self
    }

    /// Mark the field as optional on input.
    #[must_use]
    pub fn with_default(mut self) -> Self {
        self.has_default = true;
        self
    }

    /// Wire name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rust member name.
    #[must_use]
    pub fn member(&self) -> &str {
        &self.member
    }

    /// Declared type.
    #[must_use]
    pub const fn declared_type(&self) -> &TypeRef {
        &self.declared_type
    }

    /// Wire shape of the field.
    #[must_use]
    pub fn kind(&self) -> ContainerKind {
        self.declared_type.container_kind()
    }

    /// Whether the field admits null.
    #[must_use]
    pub const fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// Whether the field may be omitted from input.
    #[must_use]
    pub const fn has_default(&self) -> bool {
        self.has_default
    }

    /// Whether the field must be present on input.
    #[must_use]
    pub const fn is_required(&self) -> bool {
        !self.has_default
    }

    /// Whether the field is the document identifier.
    #[must_use]
    pub const fn is_identifier(&self) -> bool {
        self.is_identifier
    }

    /// Class of the flattened base the field was copied from.
    #[must_use]
    pub fn inherited_from(&self) -> Option<&str> {
        self.inherited_from.as_deref()
    }
}

/// Resolved, flattened schema of one document type.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassSchema {
    class:      String,
    collection: Option<String>,
    fields:     Vec<FieldDescriptor>
}

impl ClassSchema {
    /// Class name.
    #[must_use]
    pub fn class_name(&self) -> &str {
        &self.class
    }

    /// Collection the documents are stored in.
    ///
    /// An explicit collection wins; otherwise the process-wide
    /// [`CollectionNaming`](crate::config::CollectionNaming) rule is applied to
    /// the class name at call time.
    #[must_use]
    pub fn collection_name(&self) -> String {
        self.collection
            .clone()
            .unwrap_or_else(|| config::collection_name(&self.class))
    }

    /// Fields in encode order.
    #[must_use]
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the schema has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Wire names in encode order.
    #[must_use]
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(FieldDescriptor::name).collect()
    }

    /// The identifier field, if the schema has one.
    #[must_use]
    pub fn identifier(&self) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.is_identifier())
    }

    /// Find a field by wire name or member name.
    ///
    /// This is the name-based fallback for fields that have no generated
    /// handle, such as private members.
    ///
    /// # Errors
    ///
    /// - [`PathError::UnknownField`] when nothing matches
    /// - [`PathError::Ambiguous`] when the name is the wire name of one field
    ///   and the member name of another
    pub fn lookup(&self, name: &str) -> Result<&FieldDescriptor, PathError> {
        let by_wire = self.fields.iter().find(|field| field.name == name);
        let by_member = self.fields.iter().find(|field| field.member == name);
        match (by_wire, by_member) {
            (Some(wire), Some(member)) if !std::ptr::eq(wire, member) => Err(PathError::Ambiguous {
                class:        self.class.clone(),
                name:         name.to_owned(),
                wire_match:   wire.member.clone(),
                member_match: member.member.clone()
            }),
            (Some(field), _) | (None, Some(field)) => Ok(field),
            (None, None) => Err(PathError::UnknownField {
                class:     self.class.clone(),
                name:      name.to_owned(),
                available: self.fields.iter().map(|field| field.name.clone()).collect()
            })
        }
    }

    /// Check a document against the schema without decoding it.
    ///
    /// Used for runtime-registered schemas that have no Rust type to decode
    /// into. Unknown document fields are ignored, as in decoding.
    ///
    /// # Errors
    ///
    /// - [`DecodeError::MissingField`] for an absent required field
    /// - [`DecodeError::TypeMismatch`] for a value the declared type rejects
    pub fn validate(&self, document: &Document) -> Result<(), DecodeError> {
        for field in &self.fields {
            match document.get(field.name()) {
                None if field.is_required() && !field.is_identifier() => {
                    return Err(DecodeError::MissingField {
                        class: self.class.clone(),
                        field: field.name.clone()
                    });
                }
                Some(value) if !field.declared_type.accepts(value) => {
                    return Err(DecodeError::TypeMismatch {
                        class:    self.class.clone(),
                        field:    field.name.clone(),
                        expected: field.declared_type.to_string(),
                        actual:   wire_type_name(value),
                        value:    preview(value)
                    });
                }
                _ => {}
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use bson::doc;

    use super::*;

    fn shop() -> ClassSchema {
        SchemaBuilder::new("Shop")
            .field(FieldDescriptor::of::<Option<bson::oid::ObjectId>>("id", "_id").identifier())
            .field(FieldDescriptor::of::<String>("name", "name"))
            .field(FieldDescriptor::of::<String>("display", "label"))
            .field(FieldDescriptor::of::<i32>("label", "rank").with_default())
            .build()
            .unwrap()
    }

    #[test]
    fn lookup_by_wire_or_member_name() {
        let schema = shop();
        assert_eq!(schema.lookup("_id").unwrap().member(), "id");
        assert_eq!(schema.lookup("id").unwrap().name(), "_id");
        assert_eq!(schema.lookup("name").unwrap().name(), "name");
    }

    #[test]
    fn lookup_reports_unknown_names() {
        let error = shop().lookup("missing").unwrap_err();
        let PathError::UnknownField {
            available, ..
        } = error
        else {
            panic!("expected UnknownField");
        };
        assert_eq!(available, ["_id", "name", "label", "rank"]);
    }

    #[test]
    fn lookup_rejects_ambiguous_names() {
        let error = shop().lookup("label").unwrap_err();
        assert!(matches!(
            error,
            PathError::Ambiguous { ref wire_match, ref member_match, .. }
                if wire_match == "display" && member_match == "label"
        ));
    }

    #[test]
    fn validate_checks_required_and_types() {
        let schema = shop();
        assert!(schema.validate(&doc! { "name": "a", "label": "b" }).is_ok());
        assert!(matches!(
            schema.validate(&doc! { "label": "b" }),
            Err(DecodeError::MissingField { .. })
        ));
        assert!(matches!(
            schema.validate(&doc! { "name": 1, "label": "b" }),
            Err(DecodeError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn nullable_fields_have_defaults() {
        let schema = shop();
        let id = schema.identifier().unwrap();
        assert!(id.is_nullable());
        assert!(id.has_default());
        assert!(schema.lookup("rank").unwrap().has_default());
        assert!(schema.lookup("name").unwrap().is_required());
    }
}
