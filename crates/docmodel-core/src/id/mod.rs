// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Identifier values and the identifier strategy.
//!
//! The path/codec core treats identifiers as opaque values with equality and
//! a generation hook. [`Id<T>`] is the typed identifier of documents of type
//! `T`; raw `ObjectId`, `String` and `Uuid` identifier fields are supported
//! as well through [`Identifier`].
//!
//! # Generation
//!
//! When a root document is encoded with an absent identifier, the writer asks
//! the active [`IdGenerator`] for an [`IdValue`] and converts it to the
//! field's type with [`Identifier::from_generated`]. Nested documents never
//! generate identifiers.

mod generator;

use std::{fmt, hash::Hash, marker::PhantomData};

use bson::{Bson, oid::ObjectId};
pub use generator::{
    IdGenerator, ObjectIdGenerator, ObjectIdToStringGenerator, UuidStringGenerator,
    generate_ids_as_object_ids, generate_ids_as_strings, generator, set_generator
};
use uuid::Uuid;

use crate::{
    codec::EncodeOptions,
    error::{IdError, ValueError},
    path::{Path, PathTarget, Segment},
    schema::{ContainerKind, TypeRef},
    value::{BsonValue, MapKey, preview, unwrap_extended}
};

/// Raw identifier produced by a generator or stored in an [`Id<T>`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IdValue {
    /// Native store identifier.
    ObjectId(ObjectId),
    /// Opaque string identifier.
    String(String)
}

impl IdValue {
    /// Wire representation.
    #[must_use]
    pub fn to_bson(&self) -> Bson {
        match self {
            Self::ObjectId(id) => Bson::ObjectId(*id),
            Self::String(text) => Bson::String(text.clone())
        }
    }
}

impl fmt::Display for IdValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ObjectId(id) => write!(f, "{}", id.to_hex()),
            Self::String(text) => f.write_str(text)
        }
    }
}

/// Typed identifier of a document of type `T`.
///
/// The phantom owner keeps `Id<Shop>` and `Id<Order>` apart at compile time
/// while both encode to the same wire value.
///
/// # Example
///
/// ```rust
/// use docmodel_core::id::Id;
///
/// struct Shop;
///
/// let id: Id<Shop> = Id::parse("5f1d7f3b9c1e4a2b3c4d5e6f");
/// assert!(id.as_object_id().is_some());
///
/// let named: Id<Shop> = Id::parse("flagship");
/// assert_eq!(named.to_string(), "flagship");
/// ```
pub struct Id<T> {
    value:  IdValue,
    _owner: PhantomData<fn() -> T>
}

impl<T> Id<T> {
    /// Generate a fresh identifier with the active generator.
    ///
    /// # Errors
    ///
    /// Returns the generator's [`IdError`].
    pub fn generate() -> Result<Self, IdError> {
        generator().generate().map(Self::from_value)
    }

    /// Wrap a raw value.
    #[must_use]
    pub const fn from_value(value: IdValue) -> Self {
        Self {
            value,
            _owner: PhantomData
        }
    }

    /// Wrap a native identifier.
    #[must_use]
    pub const fn from_object_id(id: ObjectId) -> Self {
        Self::from_value(IdValue::ObjectId(id))
    }

    /// Wrap a string identifier.
    #[must_use]
    pub fn from_string(text: impl Into<String>) -> Self {
        Self::from_value(IdValue::String(text.into()))
    }

    /// Parse rendered text: 24-digit hex becomes a native identifier, anything
    /// else stays a string.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        ObjectId::parse_str(text).map_or_else(|_| Self::from_string(text), Self::from_object_id)
    }

    /// Raw value.
    #[must_use]
    pub const fn value(&self) -> &IdValue {
        &self.value
    }

    /// Native identifier, when the value is one.
    #[must_use]
    pub const fn as_object_id(&self) -> Option<&ObjectId> {
        match &self.value {
            IdValue::ObjectId(id) => Some(id),
            IdValue::String(_) => None
        }
    }

    /// Unwrap the raw value.
    #[must_use]
    pub fn into_value(self) -> IdValue {
        self.value
    }

    /// Reinterpret as the identifier of another type.
    #[must_use]
    pub fn cast<U>(self) -> Id<U> {
        Id::from_value(self.value)
    }
}

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        Self::from_value(self.value.clone())
    }
}

/// Identifiers compare by rendered text, so a string id spelling an object
/// id's hex equals that object id.
impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        match (&self.value, &other.value) {
            (IdValue::ObjectId(left), IdValue::ObjectId(right)) => left == right,
            (IdValue::String(left), IdValue::String(right)) => left == right,
            (IdValue::ObjectId(id), IdValue::String(text))
            | (IdValue::String(text), IdValue::ObjectId(id)) => id.to_hex() == *text
        }
    }
}

impl<T> Eq for Id<T> {}

impl<T> Hash for Id<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        match &self.value {
            IdValue::ObjectId(id) => id.to_hex().hash(state),
            IdValue::String(text) => text.hash(state)
        }
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.value)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.value.fmt(f)
    }
}

impl<T> From<ObjectId> for Id<T> {
    fn from(id: ObjectId) -> Self {
        Self::from_object_id(id)
    }
}

impl<T> BsonValue for Id<T> {
    fn type_ref() -> TypeRef {
        TypeRef::Identifier
    }

    fn to_bson(&self, _options: &EncodeOptions) -> Bson {
        self.value.to_bson()
    }

    fn from_bson(value: &Bson) -> Result<Self, ValueError> {
        let value = unwrap_extended(value)?;
        match value.as_ref() {
            Bson::ObjectId(id) => Ok(Self::from_object_id(*id)),
            Bson::String(text) => Ok(Self::from_string(text.clone())),
            other => Err(ValueError::mismatch("id", other))
        }
    }
}

impl<T: 'static> PathTarget for Id<T> {
    const KIND: ContainerKind = ContainerKind::Scalar;
    type Handle<R> = Path<R, Self>;

    fn handle<R>(segments: Vec<Segment>) -> Self::Handle<R> {
        Path::from_segments(segments)
    }
}

impl<T> MapKey for Id<T> {
    fn to_key(&self) -> String {
        self.value.to_string()
    }

    fn from_key(key: &str) -> Result<Self, ValueError> {
        Ok(match ObjectId::parse_str(key) {
            Ok(id) if id.to_hex() == key => Self::from_object_id(id),
            _ => Self::from_string(key)
        })
    }
}

/// A type usable as the identifier field.
pub trait Identifier: BsonValue {
    /// Convert a generated value to this type.
    ///
    /// # Errors
    ///
    /// Returns [`IdError::Incompatible`] when the generator's output cannot
    /// represent this type, for instance a string generator feeding an
    /// `ObjectId` field.
    fn from_generated(value: IdValue) -> Result<Self, IdError>;
}

fn incompatible(value: &IdValue, target: &str) -> IdError {
    IdError::Incompatible {
        value:  value.to_string(),
        target: target.to_owned()
    }
}

impl<T> Identifier for Id<T> {
    fn from_generated(value: IdValue) -> Result<Self, IdError> {
        Ok(Self::from_value(value))
    }
}

impl Identifier for ObjectId {
    fn from_generated(value: IdValue) -> Result<Self, IdError> {
        match value {
            IdValue::ObjectId(id) => Ok(id),
            IdValue::String(ref text) => {
                Self::parse_str(text).map_err(|_| incompatible(&value, "objectId"))
            }
        }
    }
}

/// Native identifiers are rendered as hex.
impl Identifier for String {
    fn from_generated(value: IdValue) -> Result<Self, IdError> {
        Ok(value.to_string())
    }
}

impl Identifier for Uuid {
    fn from_generated(value: IdValue) -> Result<Self, IdError> {
        match value {
            IdValue::String(ref text) => {
                Self::parse_str(text).map_err(|_| incompatible(&value, "uuid"))
            }
            IdValue::ObjectId(_) => Err(incompatible(&value, "uuid"))
        }
    }
}

/// Convert a generated wire value back into the identifier field's type.
///
/// Used by generated `assign_identifier` implementations.
///
/// # Errors
///
/// Returns [`IdError::Incompatible`] when `value` does not decode as `I`.
pub fn assign<I: Identifier>(value: &Bson) -> Result<I, IdError> {
    I::from_bson(value).map_err(|_| IdError::Incompatible {
        value:  preview(value),
        target: I::type_ref().to_string()
    })
}
