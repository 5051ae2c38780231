// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Error types for schema construction, path lookup, encoding and decoding.
//!
//! Every fallible operation in this crate reports synchronously to its caller.
//! Nothing is retried and nothing is converted into an empty result.
//!
//! # Taxonomy
//!
//! | Error | Raised by | Typical cause |
//! |-------|-----------|---------------|
//! | [`SchemaError`] | [`registry::resolve`](crate::registry::resolve) | Two identifier candidates, unknown named type |
//! | [`PathError`] | [`FieldSet::field`](crate::path::FieldSet::field) | String lookup of a field that does not exist |
//! | [`DecodeError`] | [`decode`](crate::codec::decode) | Missing required field, type mismatch, malformed wrapper |
//! | [`EncodeError`] | [`encode`](crate::codec::encode) | Identifier generation failed |
//! | [`IdError`] | [`IdGenerator`](crate::id::IdGenerator) | Generator misconfigured or incompatible with the field |
//! | [`ConfigError`] | [`MappingConfig`](crate::config::MappingConfig) | Invalid configuration input |
//!
//! [`ValueError`] is the context-free failure of a single value conversion.
//! The document reader lifts it into a [`DecodeError`] that names the class
//! and the dotted field path.

use bson::Bson;
use thiserror::Error;

use crate::value::{preview, wire_type_name};

/// Schema construction failure.
///
/// Fatal at class-first-use time. The registry caches the failure so later
/// resolutions of the same type report the same error without rebuilding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// More than one field qualifies as the document identifier.
    #[error("`{class}` has more than one identifier field: {}", .candidates.join(", "))]
    AmbiguousIdentifier {
        /// Class being built.
        class:      String,
        /// Member names of every candidate.
        candidates: Vec<String>
    },

    /// Two members map onto the same wire field name.
    #[error("`{class}` maps more than one member onto wire field `{field}`")]
    DuplicateField {
        /// Class being built.
        class: String,
        /// Conflicting wire name.
        field: String
    },

    /// A field references a type with no encoding strategy and no schema.
    #[error("field `{class}.{field}` has type `{type_name}` with no encoding and no registered schema")]
    UnencodableField {
        /// Class being built.
        class:     String,
        /// Offending field.
        field:     String,
        /// Referenced type name.
        type_name: String
    },

    /// A flattened base type failed to build.
    #[error("flattened base of `{class}` is invalid: {source}")]
    Base {
        /// Class being built.
        class:  String,
        /// Failure of the base schema.
        source: Box<SchemaError>
    }
}

/// Failure to resolve a field path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    /// No field with the requested name exists.
    #[error("`{class}` has no field `{name}` (available: {})", .available.join(", "))]
    UnknownField {
        /// Class searched.
        class:     String,
        /// Requested name.
        name:      String,
        /// Wire names of every field of the class.
        available: Vec<String>
    },

    /// The name matches one field by wire name and another by member name.
    #[error(
        "`{name}` is ambiguous in `{class}`: wire name of `{wire_match}`, member name of `{member_match}`"
    )]
    Ambiguous {
        /// Class searched.
        class:        String,
        /// Requested name.
        name:         String,
        /// Member whose wire name matched.
        wire_match:   String,
        /// Member whose own name matched.
        member_match: String
    },

    /// A positional operator was requested on a path without collections.
    #[error("path `{path}` has no collection segment to receive a positional operator")]
    NotPositional {
        /// Rendered path.
        path: String
    },

    /// The owning schema could not be built.
    #[error(transparent)]
    Schema(#[from] SchemaError)
}

/// Identifier generation or assignment failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdError {
    /// The active generator could not produce a value.
    #[error("identifier generator `{generator}` failed: {reason}")]
    Generation {
        /// Generator name.
        generator: String,
        /// Reported cause.
        reason:    String
    },

    /// The generated value does not fit the identifier field's type.
    #[error("identifier {value} cannot be stored as {target}")]
    Incompatible {
        /// Generated value, rendered.
        value:  String,
        /// Declared identifier type.
        target: String
    }
}

/// Encoding failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// The value's schema is invalid.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// The identifier could not be generated or assigned back.
    #[error("cannot assign identifier `{field}` of `{class}`: {source}")]
    Identifier {
        /// Encoded class.
        class:  String,
        /// Identifier wire name.
        field:  String,
        /// Underlying failure.
        source: IdError
    },

    /// A type-erased codec received a value of another type.
    #[error("codec for `{expected}` received a value of a different type")]
    WrongType {
        /// Class the codec was registered for.
        expected: String
    },

    /// No codec is registered for the value's type.
    #[error("no codec registered for `{type_name}`")]
    Unregistered {
        /// Rust type name, as far as it is known.
        type_name: String
    },

    /// The encoded document could not be rendered as JSON.
    #[error("cannot render extended JSON: {0}")]
    Json(String)
}

/// Decoding failure.
///
/// Field paths are dotted from the class named in `class`, so a failure deep
/// inside a nested list reads like `orders.2.total`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    /// A required field is absent.
    #[error("missing required field `{field}` in `{class}`")]
    MissingField {
        /// Decoded class.
        class: String,
        /// Dotted field path.
        field: String
    },

    /// A field holds a wire type that cannot be converted.
    #[error("type mismatch at `{class}.{field}`: expected {expected}, found {actual} ({value})")]
    TypeMismatch {
        /// Decoded class.
        class:    String,
        /// Dotted field path.
        field:    String,
        /// Declared type.
        expected: String,
        /// Wire type found.
        actual:   &'static str,
        /// Offending value, rendered and truncated.
        value:    String
    },

    /// An extended JSON wrapper object is malformed.
    #[error("malformed `{wrapper}` wrapper at `{class}.{field}`: {reason}")]
    MalformedWrapper {
        /// Decoded class.
        class:   String,
        /// Dotted field path.
        field:   String,
        /// Wrapper key, such as `$date`.
        wrapper: String,
        /// Parser message.
        reason:  String
    },

    /// An enum value or polymorphic tag names no known variant.
    #[error("unknown variant `{variant}` of `{enum_name}` at `{class}.{field}`")]
    UnknownVariant {
        /// Decoded class.
        class:     String,
        /// Dotted field path.
        field:     String,
        /// Enum type.
        enum_name: String,
        /// Variant found.
        variant:   String
    },

    /// The top-level value is not a document.
    #[error("expected a document for `{class}`, found {actual}")]
    NotADocument {
        /// Decoded class.
        class:  String,
        /// Wire type found.
        actual: &'static str
    },

    /// No codec is registered under the class name.
    #[error("no codec registered for class `{class}`")]
    Unregistered {
        /// Requested class.
        class: String
    },

    /// The value's schema is invalid.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Input text is not valid extended JSON.
    #[error("invalid extended JSON: {0}")]
    Json(String)
}

impl DecodeError {
    /// Re-anchor the error at `prefix` inside `class`.
    ///
    /// Used when a nested document fails so that the outer reader reports the
    /// outer class and the full dotted path.
    #[must_use]
    pub fn at(self, class: &str, prefix: &str) -> Self {
        let class = class.to_owned();
        let join = |field: String| format!("{prefix}.{field}");
        match self {
            Self::MissingField {
                field, ..
            } => Self::MissingField {
                class,
                field: join(field)
            },
            Self::TypeMismatch {
                field,
                expected,
                actual,
                value,
                ..
            } => Self::TypeMismatch {
                class,
                field: join(field),
                expected,
                actual,
                value
            },
            Self::MalformedWrapper {
                field,
                wrapper,
                reason,
                ..
            } => Self::MalformedWrapper {
                class,
                field: join(field),
                wrapper,
                reason
            },
            Self::UnknownVariant {
                field,
                enum_name,
                variant,
                ..
            } => Self::UnknownVariant {
                class,
                field: join(field),
                enum_name,
                variant
            },
            other => other
        }
    }

    /// Dotted field path the error refers to, when it has one.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::MissingField {
                field, ..
            }
            | Self::TypeMismatch {
                field, ..
            }
            | Self::MalformedWrapper {
                field, ..
            }
            | Self::UnknownVariant {
                field, ..
            } => Some(field),
            _ => None
        }
    }
}

/// Context-free failure converting one BSON value.
///
/// Produced by [`BsonValue::from_bson`](crate::value::BsonValue::from_bson),
/// which has no knowledge of the enclosing class or field. The reader turns
/// it into a [`DecodeError`] with [`ValueError::in_field`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValueError {
    /// The wire type cannot be converted into the declared type.
    #[error("expected {expected}, found {actual} ({value})")]
    Mismatch {
        /// Declared type.
        expected: String,
        /// Wire type found.
        actual:   &'static str,
        /// Offending value, rendered and truncated.
        value:    String
    },

    /// A required key of a composite value is absent.
    #[error("missing key `{key}`")]
    Missing {
        /// Absent key.
        key: String
    },

    /// An extended JSON wrapper object is malformed.
    #[error("malformed `{wrapper}` wrapper: {reason}")]
    MalformedWrapper {
        /// Wrapper key.
        wrapper: String,
        /// Parser message.
        reason:  String
    },

    /// A string names no variant of the enum.
    #[error("unknown variant `{variant}` of `{enum_name}`")]
    UnknownVariant {
        /// Enum type.
        enum_name: String,
        /// Variant found.
        variant:   String
    },

    /// Failure inside a list element, map entry or tuple member.
    #[error("at `{segment}`: {source}")]
    Within {
        /// Index or key.
        segment: String,
        /// Inner failure.
        source:  Box<ValueError>
    },

    /// Failure inside a nested document.
    #[error(transparent)]
    Document(Box<DecodeError>)
}

impl ValueError {
    /// Build a [`ValueError::Mismatch`] for `actual`.
    #[must_use]
    pub fn mismatch(expected: impl Into<String>, actual: &Bson) -> Self {
        Self::Mismatch {
            expected: expected.into(),
            actual:   wire_type_name(actual),
            value:    preview(actual)
        }
    }

    /// Wrap the error with the index or key it occurred under.
    #[must_use]
    pub fn within(self, segment: impl ToString) -> Self {
        Self::Within {
            segment: segment.to_string(),
            source:  Box::new(self)
        }
    }

    /// Lift into a [`DecodeError`] for field `field` of `class`.
    #[must_use]
    pub fn in_field(self, class: &str, field: &str) -> DecodeError {
        let mut path = field.to_owned();
        let mut current = self;
        loop {
            match current {
                Self::Within {
                    segment,
                    source
                } => {
                    path.push('.');
                    path.push_str(&segment);
                    current = *source;
                }
                Self::Mismatch {
                    expected,
                    actual,
                    value
                } => {
                    return DecodeError::TypeMismatch {
                        class: class.to_owned(),
                        field: path,
                        expected,
                        actual,
                        value
                    };
                }
                Self::Missing {
                    key
                } => {
                    return DecodeError::MissingField {
                        class: class.to_owned(),
                        field: format!("{path}.{key}")
                    };
                }
                Self::MalformedWrapper {
                    wrapper,
                    reason
                } => {
                    return DecodeError::MalformedWrapper {
                        class: class.to_owned(),
                        field: path,
                        wrapper,
                        reason
                    };
                }
                Self::UnknownVariant {
                    enum_name,
                    variant
                } => {
                    return DecodeError::UnknownVariant {
                        class: class.to_owned(),
                        field: path,
                        enum_name,
                        variant
                    };
                }
                Self::Document(inner) => return inner.at(class, &path)
            }
        }
    }
}

impl From<DecodeError> for ValueError {
    fn from(error: DecodeError) -> Self {
        Self::Document(Box::new(error))
    }
}

/// Invalid mapping configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration text could not be parsed.
    #[error("invalid mapping configuration: {0}")]
    Parse(#[from] serde_json::Error)
}
