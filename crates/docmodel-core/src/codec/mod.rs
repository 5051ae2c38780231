// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Encoder/decoder pairs.
//!
//! `#[derive(Document)]` walks the struct fields once and emits both halves
//! of [`DocumentCodec`] from that walk, so the encoded layout and the decoded
//! fields can never disagree with each other or with the schema.
//!
//! # Data Flow
//!
//! ```text
//!           encode / encode_mut                      decode / decode_bson
//! value ──► DocumentWriter::root ──► write_fields ──► bson::Document
//!                │ null policy                          │
//!                │ identifier generation                ▼
//!                ▼                          DocumentReader ──► read_fields ──► value
//!             Encoded { document, assigned_id }
//! ```
//!
//! # Identifier Assignment
//!
//! | Call | Missing root identifier |
//! |------|-------------------------|
//! | [`encode`] | generated, reported in [`Encoded::assigned_id`], source untouched |
//! | [`encode_mut`] | generated and stored back on the value |
//! | nested documents | never generated |

mod erased;
mod options;
mod reader;
mod variant;
mod writer;

use std::{fmt, marker::PhantomData, sync::Arc};

use bson::{Bson, Document};
pub use erased::{CodecRegistry, ErasedCodec};
pub use options::EncodeOptions;
pub use reader::DocumentReader;
use tracing::trace;
pub use variant::{tagged, unknown_variant, variant_name, variant_tag};
pub use writer::{AssignedId, DocumentWriter, Encoded};

use crate::{
    document::Document as DocumentType,
    error::{DecodeError, EncodeError, IdError, SchemaError, ValueError},
    registry,
    schema::ClassSchema,
    value::wire_type_name
};

/// Field-level encoder and decoder of a document type.
///
/// Implemented by `#[derive(Document)]`. Hand-written implementations must
/// write and read the same wire names in the same order as the type's
/// schema.
pub trait DocumentCodec: Sized {
    /// Class name used in schemas and errors.
    fn class_name() -> &'static str;

    /// Resolve the schema so schema errors surface before any field is
    /// touched.
    ///
    /// # Errors
    ///
    /// Returns the type's [`SchemaError`].
    fn ensure_schema() -> Result<(), SchemaError> {
        Ok(())
    }

    /// Write every field in schema order.
    fn write_fields(&self, writer: &mut DocumentWriter<'_>);

    /// Read every field.
    ///
    /// # Errors
    ///
    /// Returns the first field failure.
    fn read_fields(reader: &DocumentReader<'_>) -> Result<Self, DecodeError>;

    /// Store a generated identifier on the value.
    ///
    /// # Errors
    ///
    /// Returns [`IdError::Incompatible`] when the value does not fit the
    /// identifier field.
    fn assign_identifier(&mut self, _value: &Bson) -> Result<(), IdError> {
        Ok(())
    }
}

/// Encode a root document with the process-wide settings.
///
/// # Errors
///
/// - [`EncodeError::Schema`] when the type's schema is invalid
/// - [`EncodeError::Identifier`] when a missing identifier cannot be
///   generated
pub fn encode<T: DocumentCodec>(value: &T) -> Result<Encoded, EncodeError> {
    encode_with(value, &EncodeOptions::current())
}

/// Encode a root document with explicit options.
///
/// # Errors
///
/// Same as [`encode`].
pub fn encode_with<T: DocumentCodec>(
    value: &T,
    options: &EncodeOptions
) -> Result<Encoded, EncodeError> {
    T::ensure_schema()?;
    let mut writer = DocumentWriter::root(T::class_name(), options);
    value.write_fields(&mut writer);
    let encoded = writer.finish()?;
    trace!(
        class = T::class_name(),
        fields = encoded.document().len(),
        "document encoded"
    );
    Ok(encoded)
}

/// Encode a root document and store a generated identifier back on it.
///
/// # Errors
///
/// Same as [`encode`], plus [`EncodeError::Identifier`] when the generated
/// value cannot be assigned to the identifier field.
pub fn encode_mut<T: DocumentCodec>(value: &mut T) -> Result<Document, EncodeError> {
    let encoded = encode(value)?;
    if let Some(assigned) = encoded.assigned() {
        value
            .assign_identifier(assigned.value())
            .map_err(|source| EncodeError::Identifier {
                class: T::class_name().to_owned(),
                field: assigned.field().to_owned(),
                source
            })?;
    }
    Ok(encoded.into_document())
}

/// Decode a document.
///
/// # Errors
///
/// - [`DecodeError::Schema`] when the type's schema is invalid
/// - [`DecodeError::MissingField`], [`DecodeError::TypeMismatch`] and the
///   other field failures
pub fn decode<T: DocumentCodec>(document: &Document) -> Result<T, DecodeError> {
    T::ensure_schema()?;
    let value = T::read_fields(&DocumentReader::new(T::class_name(), document))?;
    trace!(
        class = T::class_name(),
        fields = document.len(),
        "document decoded"
    );
    Ok(value)
}

/// Decode a value that must be a document.
///
/// # Errors
///
/// [`DecodeError::NotADocument`] for any other wire type, then the errors of
/// [`decode`].
pub fn decode_bson<T: DocumentCodec>(value: &Bson) -> Result<T, DecodeError> {
    match value {
        Bson::Document(document) => decode(document),
        other => Err(DecodeError::NotADocument {
            class:  T::class_name().to_owned(),
            actual: wire_type_name(other)
        })
    }
}

/// Encode an embedded document.
///
/// Used by generated [`BsonValue`](crate::value::BsonValue) implementations.
#[must_use]
pub fn embed<D: DocumentCodec>(value: &D, options: &EncodeOptions) -> Bson {
    let mut writer = DocumentWriter::nested(D::class_name(), options);
    value.write_fields(&mut writer);
    Bson::Document(writer.into_document())
}

/// Decode an embedded document.
///
/// # Errors
///
/// A [`ValueError`] carrying the nested [`DecodeError`], so the outer reader
/// can prefix the field path.
pub fn embedded<D: DocumentCodec>(value: &Bson) -> Result<D, ValueError> {
    match value {
        Bson::Document(document) => {
            D::read_fields(&DocumentReader::new(D::class_name(), document)).map_err(ValueError::from)
        }
        other => Err(ValueError::mismatch(D::class_name(), other))
    }
}

/// Encoding half of a [`CodecPair`].
pub struct Encoder<T> {
    _type: PhantomData<fn(&T)>
}

impl<T: DocumentCodec> Encoder<T> {
    /// See [`encode`].
    ///
    /// # Errors
    ///
    /// Same as [`encode`].
    pub fn encode(&self, value: &T) -> Result<Encoded, EncodeError> {
        encode(value)
    }

    /// See [`encode_with`].
    ///
    /// # Errors
    ///
    /// Same as [`encode`].
    pub fn encode_with(&self, value: &T, options: &EncodeOptions) -> Result<Encoded, EncodeError> {
        encode_with(value, options)
    }

    /// See [`encode_mut`].
    ///
    /// # Errors
    ///
    /// Same as [`encode_mut`].
    pub fn encode_mut(&self, value: &mut T) -> Result<Document, EncodeError> {
        encode_mut(value)
    }
}

/// Decoding half of a [`CodecPair`].
pub struct Decoder<T> {
    _type: PhantomData<fn() -> T>
}

impl<T: DocumentCodec> Decoder<T> {
    /// See [`decode`].
    ///
    /// # Errors
    ///
    /// Same as [`decode`].
    pub fn decode(&self, document: &Document) -> Result<T, DecodeError> {
        decode(document)
    }

    /// See [`decode_bson`].
    ///
    /// # Errors
    ///
    /// Same as [`decode_bson`].
    pub fn decode_bson(&self, value: &Bson) -> Result<T, DecodeError> {
        decode_bson(value)
    }
}

impl<T> Clone for Encoder<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Encoder<T> {}

impl<T> Clone for Decoder<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Decoder<T> {}

/// Schema plus the encoder and decoder derived from it.
///
/// # Example
///
/// ```rust,ignore
/// let pair = codec::pair::<Shop>()?;
/// assert_eq!(pair.schema().collection_name(), "shops");
/// let document = pair.encoder().encode(&shop)?.into_document();
/// let back = pair.decoder().decode(&document)?;
/// ```
pub struct CodecPair<T> {
    schema:  Arc<ClassSchema>,
    encoder: Encoder<T>,
    decoder: Decoder<T>
}

impl<T: DocumentType> CodecPair<T> {
    /// Resolved schema.
    #[must_use]
    pub fn schema(&self) -> &ClassSchema {
        &self.schema
    }

    /// Encoding half.
    #[must_use]
    pub const fn encoder(&self) -> Encoder<T> {
        self.encoder
    }

    /// Decoding half.
    #[must_use]
    pub const fn decoder(&self) -> Decoder<T> {
        self.decoder
    }
}

impl<T> Clone for CodecPair<T> {
    fn clone(&self) -> Self {
        Self {
            schema:  Arc::clone(&self.schema),
            encoder: self.encoder,
            decoder: self.decoder
        }
    }
}

impl<T> fmt::Debug for CodecPair<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodecPair")
            .field("class", &self.schema.class_name())
            .finish_non_exhaustive()
    }
}

/// Codec pair of `T`.
///
/// # Errors
///
/// Returns the type's [`SchemaError`].
pub fn pair<T: DocumentType>() -> Result<CodecPair<T>, SchemaError> {
    Ok(CodecPair {
        schema:  registry::resolve::<T>()?,
        encoder: Encoder {
            _type: PhantomData
        },
        decoder: Decoder {
            _type: PhantomData
        }
    })
}
