// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Declared field types.

use std::{fmt, sync::Arc};

use bson::Bson;

use super::ClassSchema;
use crate::{document::Document, error::SchemaError, registry};

/// Wire shape a path segment addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerKind {
    /// A single value.
    Scalar,
    /// An embedded document.
    Object,
    /// An array, addressed element-wise by dotted paths.
    Collection,
    /// A document keyed by rendered map keys.
    Map
}

/// Native BSON scalar a field encodes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    /// Boolean.
    Bool,
    /// 32-bit integer.
    Int32,
    /// 64-bit integer.
    Int64,
    /// Double.
    Double,
    /// UTF-8 string.
    String,
    /// Native identifier.
    ObjectId,
    /// Millisecond UTC date.
    DateTime,
    /// 128-bit decimal.
    Decimal128,
    /// Binary blob.
    Binary,
    /// UUID stored as binary subtype 4.
    Uuid,
    /// Untyped embedded document.
    Document
}

impl ScalarKind {
    /// Lowercase name used in messages.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Double => "double",
            Self::String => "string",
            Self::ObjectId => "objectId",
            Self::DateTime => "date",
            Self::Decimal128 => "decimal",
            Self::Binary => "binData",
            Self::Uuid => "uuid",
            Self::Document => "object"
        }
    }

    /// Whether `value` is this kind or converts to it.
    #[must_use]
    pub fn accepts(self, value: &Bson) -> bool {
        match (self, value) {
            (Self::Bool, Bson::Boolean(_))
            | (Self::Int32 | Self::Int64 | Self::Double, Bson::Int32(_) | Bson::Int64(_))
            | (Self::Double, Bson::Double(_))
            | (Self::String, Bson::String(_) | Bson::Symbol(_))
            | (Self::ObjectId, Bson::ObjectId(_) | Bson::String(_))
            | (Self::DateTime, Bson::DateTime(_) | Bson::Int64(_) | Bson::String(_))
            | (Self::Decimal128, Bson::Decimal128(_))
            | (Self::Binary, Bson::Binary(_))
            | (Self::Uuid, Bson::Binary(_) | Bson::String(_))
            | (Self::Document, Bson::Document(_)) => true,
            (Self::Int32 | Self::Int64, Bson::Double(number)) => number.fract() == 0.0,
            _ => false
        }
    }
}

/// Lazily resolved reference to another document type's schema.
///
/// Holding a function pointer instead of the schema itself keeps recursive
/// types (`Node { children: Vec<Node> }`) finite.
#[derive(Clone, Copy)]
pub struct ClassRef {
    name:    &'static str,
    resolve: fn() -> Result<Arc<ClassSchema>, SchemaError>
}

impl ClassRef {
    /// Reference the schema of `D`.
    #[must_use]
    pub fn of<D: Document>() -> Self {
        Self {
            name:    D::class_name(),
            resolve: registry::resolve::<D>
        }
    }

    /// Referenced class name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Resolve the referenced schema through the registry.
    ///
    /// # Errors
    ///
    /// Returns the referenced type's [`SchemaError`].
    pub fn schema(&self) -> Result<Arc<ClassSchema>, SchemaError> {
        (self.resolve)()
    }
}

impl PartialEq for ClassRef {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl fmt::Debug for ClassRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClassRef").field(&self.name).finish()
    }
}

/// Declared type of a field.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeRef {
    /// Native scalar.
    Scalar(ScalarKind),
    /// Typed identifier (`Id<T>`), objectId or string on the wire.
    Identifier,
    /// Embedded document with its own schema.
    Object(ClassRef),
    /// Unit-only enum stored as the variant name.
    Enum {
        /// Enum type name.
        name:     &'static str,
        /// Variant wire names.
        variants: Vec<&'static str>
    },
    /// Tagged union of document types.
    Polymorphic {
        /// Enum type name.
        name:     &'static str,
        /// Discriminator key.
        tag:      &'static str,
        /// Discriminator values and their document types.
        variants: Vec<(&'static str, ClassRef)>
    },
    /// Nullable value.
    Optional(Box<TypeRef>),
    /// Ordered array.
    List(Box<TypeRef>),
    /// Array without duplicates.
    Set(Box<TypeRef>),
    /// Document keyed by rendered keys.
    Map {
        /// Key type before stringification.
        key:   Box<TypeRef>,
        /// Value type.
        value: Box<TypeRef>
    },
    /// Pair or triple, `{ first, second[, third] }`.
    Tuple(Vec<TypeRef>),
    /// Unknown element type: any value, handled dynamically.
    Dynamic,
    /// Reference to a runtime-registered schema by class name.
    Named(String)
}

impl TypeRef {
    /// Wire shape addressed by a path to a field of this type.
    #[must_use]
    pub fn container_kind(&self) -> ContainerKind {
        match self {
            Self::Optional(inner) => inner.container_kind(),
            Self::List(_) | Self::Set(_) => ContainerKind::Collection,
            Self::Map {
                ..
            } => ContainerKind::Map,
            Self::Object(_)
            | Self::Polymorphic {
                ..
            }
            | Self::Tuple(_)
            | Self::Named(_)
            | Self::Scalar(ScalarKind::Document) => ContainerKind::Object,
            Self::Scalar(_)
            | Self::Identifier
            | Self::Enum {
                ..
            }
            | Self::Dynamic => ContainerKind::Scalar
        }
    }

    /// Whether the type admits null.
    #[must_use]
    pub const fn is_nullable(&self) -> bool {
        matches!(self, Self::Optional(_) | Self::Dynamic)
    }

    /// Whether `value` is acceptable for this type, without decoding it.
    ///
    /// Embedded documents are checked shallowly; their own fields are only
    /// validated for [`TypeRef::Named`] references.
    #[must_use]
    pub fn accepts(&self, value: &Bson) -> bool {
        match (self, value) {
            (Self::Dynamic, _) | (Self::Optional(_), Bson::Null) => true,
            (Self::Optional(inner), present) => inner.accepts(present),
            (Self::Scalar(kind), present) => kind.accepts(present),
            (Self::Identifier, Bson::ObjectId(_) | Bson::String(_)) => true,
            (
                Self::Enum {
                    variants, ..
                },
                Bson::String(name)
            ) => variants.iter().any(|variant| variant == name),
            (Self::List(element) | Self::Set(element), Bson::Array(items)) => {
                items.iter().all(|item| element.accepts(item))
            }
            (
                Self::Map {
                    value: element, ..
                },
                Bson::Document(entries)
            ) => entries.values().all(|item| element.accepts(item)),
            (Self::Named(name), Bson::Document(document)) => registry::resolve_named(name)
                .is_some_and(|schema| schema.validate(document).is_ok()),
            (
                Self::Object(_)
                | Self::Polymorphic {
                    ..
                }
                | Self::Tuple(_),
                Bson::Document(_)
            ) => true,
            _ => false
        }
    }

    /// Names of every [`TypeRef::Named`] reference, depth first.
    pub(crate) fn named_references<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Self::Named(name) => out.push(name),
            Self::Optional(inner) | Self::List(inner) | Self::Set(inner) => {
                inner.named_references(out);
            }
            Self::Map {
                key,
                value
            } => {
                key.named_references(out);
                value.named_references(out);
            }
            Self::Tuple(members) => {
                for member in members {
                    member.named_references(out);
                }
            }
            _ => {}
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(kind) => f.write_str(kind.name()),
            Self::Identifier => f.write_str("id"),
            Self::Object(class) => f.write_str(class.name()),
            Self::Enum {
                name, ..
            }
            | Self::Polymorphic {
                name, ..
            } => f.write_str(name),
            Self::Optional(inner) => write!(f, "{inner}?"),
            Self::List(inner) => write!(f, "list<{inner}>"),
            Self::Set(inner) => write!(f, "set<{inner}>"),
            Self::Map {
                key,
                value
            } => write!(f, "map<{key}, {value}>"),
            Self::Tuple(members) => {
                f.write_str("(")?;
                for (index, member) in members.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{member}")?;
                }
                f.write_str(")")
            }
            Self::Dynamic => f.write_str("any"),
            Self::Named(name) => f.write_str(name)
        }
    }
}
