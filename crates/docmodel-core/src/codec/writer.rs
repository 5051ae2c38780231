// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Field-by-field document encoding.

use bson::{Bson, Document};
use tracing::trace;

use super::{DocumentCodec, EncodeOptions};
use crate::{error::EncodeError, id::Identifier, value::BsonValue};

/// Identifier generated while encoding a root document.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignedId {
    field: String,
    value: Bson
}

impl AssignedId {
    /// Wire name of the identifier field.
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Generated wire value.
    #[must_use]
    pub const fn value(&self) -> &Bson {
        &self.value
    }
}

/// Result of encoding a root document.
#[derive(Debug, Clone, PartialEq)]
pub struct Encoded {
    document: Document,
    assigned: Option<AssignedId>
}

impl Encoded {
    /// The encoded document.
    #[must_use]
    pub const fn document(&self) -> &Document {
        &self.document
    }

    /// Take the encoded document.
    #[must_use]
    pub fn into_document(self) -> Document {
        self.document
    }

    /// Identifier generated during the call, if any.
    ///
    /// The source value is left untouched by
    /// [`encode`](crate::codec::encode); the caller decides whether to
    /// store this back.
    #[must_use]
    pub fn assigned_id(&self) -> Option<&Bson> {
        self.assigned.as_ref().map(AssignedId::value)
    }

    /// Generated identifier together with its field name.
    #[must_use]
    pub const fn assigned(&self) -> Option<&AssignedId> {
        self.assigned.as_ref()
    }
}

/// Accumulates the fields of one document in schema order.
///
/// Generated `write_fields` implementations call one method per field. The
/// writer applies the null policy and, for root documents only, identifier
/// generation. A generation failure is held until [`finish`](Self::finish),
/// so field writers stay infallible.
#[derive(Debug)]
pub struct DocumentWriter<'a> {
    class:    &'static str,
    options:  &'a EncodeOptions,
    root:     bool,
    document: Document,
    assigned: Option<AssignedId>,
    failure:  Option<EncodeError>
}

impl<'a> DocumentWriter<'a> {
    /// Writer for a top-level document. Missing identifiers are generated.
    #[must_use]
    pub fn root(class: &'static str, options: &'a EncodeOptions) -> Self {
        Self::with_role(class, options, true)
    }

    /// Writer for an embedded document. Missing identifiers stay absent.
    #[must_use]
    pub fn nested(class: &'static str, options: &'a EncodeOptions) -> Self {
        Self::with_role(class, options, false)
    }

    fn with_role(class: &'static str, options: &'a EncodeOptions, root: bool) -> Self {
        Self {
            class,
            options,
            root,
            document: Document::new(),
            assigned: None,
            failure: None
        }
    }

    /// Options of the current encode call.
    #[must_use]
    pub const fn options(&self) -> &'a EncodeOptions {
        self.options
    }

    /// Encode and write one field.
    pub fn field<T: BsonValue>(&mut self, name: &str, value: &T) {
        let encoded = value.to_bson(self.options);
        self.put(name, encoded);
    }

    /// Write an already encoded value, applying the null policy.
    pub fn put(&mut self, name: &str, value: Bson) {
        if matches!(value, Bson::Null) && !self.options.serialize_nulls() {
            return;
        }
        self.document.insert(name, value);
    }

    /// Write the identifier field, generating it when absent at the root.
    pub fn identifier<I: Identifier>(&mut self, name: &str, value: Option<&I>) {
        if let Some(value) = value {
            self.field(name, value);
            return;
        }
        if !self.root {
            self.put(name, Bson::Null);
            return;
        }

        let options = self.options;
        let generator = options.generator();
        match generator.generate().and_then(I::from_generated) {
            Ok(generated) => {
                let wire = generated.to_bson(options);
                trace!(
                    class = self.class,
                    field = name,
                    generator = generator.name(),
                    "identifier generated"
                );
                self.assigned = Some(AssignedId {
                    field: name.to_owned(),
                    value: wire.clone()
                });
                self.document.insert(name, wire);
            }
            Err(source) if self.failure.is_none() => {
                self.failure = Some(EncodeError::Identifier {
                    class: self.class.to_owned(),
                    field: name.to_owned(),
                    source
                });
            }
            Err(_) => {}
        }
    }

    /// Splice the fields of a flattened base into this document.
    pub fn flatten<B: DocumentCodec>(&mut self, base: &B) {
        base.write_fields(self);
    }

    /// Finish a root document.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::Identifier`] when identifier generation failed.
    pub fn finish(self) -> Result<Encoded, EncodeError> {
        if let Some(failure) = self.failure {
            return Err(failure);
        }
        Ok(Encoded {
            document: self.document,
            assigned: self.assigned
        })
    }

    /// Finish an embedded document.
    #[must_use]
    pub fn into_document(self) -> Document {
        self.document
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use bson::oid::ObjectId;

    use super::*;
    use crate::{
        error::IdError,
        id::{IdGenerator, IdValue, UuidStringGenerator}
    };

    struct Failing;

    impl IdGenerator for Failing {
        fn name(&self) -> &str {
            "failing"
        }

        fn generate(&self) -> Result<IdValue, IdError> {
            Err(IdError::Generation {
                generator: "failing".into(),
                reason:    "exhausted".into()
            })
        }
    }

    #[test]
    fn nulls_are_omitted_by_default() {
        let options = EncodeOptions::default();
        let mut writer = DocumentWriter::nested("Shop", &options);
        writer.field("name", &"Acme".to_owned());
        writer.field("stock", &None::<i32>);
        assert_eq!(writer.into_document(), bson::doc! { "name": "Acme" });
    }

    #[test]
    fn nulls_are_written_when_enabled() {
        let options = EncodeOptions::default().with_serialize_nulls(true);
        let mut writer = DocumentWriter::nested("Shop", &options);
        writer.field("stock", &None::<i32>);
        assert_eq!(writer.into_document(), bson::doc! { "stock": null });
    }

    #[test]
    fn root_generates_missing_identifier() {
        let options = EncodeOptions::default();
        let mut writer = DocumentWriter::root("Shop", &options);
        writer.identifier::<ObjectId>("_id", None);
        let encoded = writer.finish().unwrap();
        let assigned = encoded.assigned_id().cloned().unwrap();
        assert!(matches!(assigned, Bson::ObjectId(_)));
        assert_eq!(encoded.document().get("_id"), Some(&assigned));
    }

    #[test]
    fn nested_never_generates_identifier() {
        let options = EncodeOptions::default();
        let mut writer = DocumentWriter::nested("Line", &options);
        writer.identifier::<ObjectId>("_id", None);
        assert!(writer.into_document().is_empty());
    }

    #[test]
    fn present_identifier_is_kept() {
        let options = EncodeOptions::default();
        let id = ObjectId::new();
        let mut writer = DocumentWriter::root("Shop", &options);
        writer.identifier("_id", Some(&id));
        let encoded = writer.finish().unwrap();
        assert!(encoded.assigned_id().is_none());
        assert_eq!(encoded.document().get_object_id("_id").unwrap(), id);
    }

    #[test]
    fn generation_failure_surfaces_on_finish() {
        let options = EncodeOptions::default().with_generator(Arc::new(Failing));
        let mut writer = DocumentWriter::root("Shop", &options);
        writer.identifier::<ObjectId>("_id", None);
        let error = writer.finish().unwrap_err();
        assert!(matches!(
            error,
            EncodeError::Identifier { source: IdError::Generation { .. }, .. }
        ));
    }

    #[test]
    fn uuid_generator_cannot_feed_object_id_field() {
        let options = EncodeOptions::default().with_generator(Arc::new(UuidStringGenerator));
        let mut writer = DocumentWriter::root("Shop", &options);
        writer.identifier::<ObjectId>("_id", None);
        assert!(matches!(
            writer.finish(),
            Err(EncodeError::Identifier { source: IdError::Incompatible { .. }, .. })
        ));
    }
}
