// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Conversion between Rust values and BSON.
//!
//! [`BsonValue`] is the single encoding strategy every field type goes
//! through. Derived documents implement it by delegating to their generated
//! codec; scalars, containers and identifiers are implemented here.
//!
//! # Wire Conventions
//!
//! | Rust type | Wire value |
//! |-----------|------------|
//! | `bool` | boolean |
//! | `i8`, `i16`, `i32`, `u8`, `u16` | int32 |
//! | `i64`, `u32` | int64 |
//! | `f32`, `f64` | double |
//! | `String`, `char` | string |
//! | `ObjectId`, `Id<T>` | objectId (or string for string identifiers) |
//! | `bson::DateTime`, `chrono::DateTime<Utc>` | date |
//! | `uuid::Uuid` | binary, subtype 4 |
//! | `Option<T>` | `T` or null |
//! | `Vec<T>`, `VecDeque<T>`, sets | array |
//! | `HashMap<K, V>`, `BTreeMap<K, V>` | document keyed by [`MapKey`] |
//! | `(A, B)` | `{ first, second }` |
//! | `(A, B, C)` | `{ first, second, third }` |
//! | `bson::Bson` | any, decoded dynamically |
//!
//! `u64` and `usize` are deliberately absent: BSON has no unsigned 64-bit
//! type and silent truncation would break the round-trip law.
//!
//! # Declared Conversions
//!
//! Decoding accepts the declared type plus these conversions:
//!
//! - integers of any width when the value fits, and integral doubles
//! - integers as doubles
//! - hex strings as `ObjectId`, hyphenated strings as `Uuid`
//! - RFC 3339 strings and epoch milliseconds as dates
//! - extended JSON wrapper documents (`{"$oid": ..}`, `{"$date": ..}`,
//!   `{"$numberLong": ..}`, ...) as the scalar they wrap

mod container;
mod scalar;

use std::borrow::Cow;

use bson::Bson;

use crate::{codec::EncodeOptions, error::ValueError, schema::TypeRef};

/// A type that converts to and from a single BSON value.
///
/// # Example
///
/// ```rust
/// use docmodel_core::{codec::EncodeOptions, value::BsonValue};
///
/// let options = EncodeOptions::default();
/// let wire = 42_i32.to_bson(&options);
/// assert_eq!(i64::from_bson(&wire).unwrap(), 42);
/// ```
pub trait BsonValue: Sized {
    /// Schema type of the value.
    fn type_ref() -> TypeRef;

    /// Encode the value.
    ///
    /// Encoding never fails: every failure mode of the encoder (identifier
    /// generation) is handled by the document writer.
    fn to_bson(&self, options: &EncodeOptions) -> Bson;

    /// Decode a value, applying the declared conversions.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError`] when the wire value cannot be converted.
    fn from_bson(value: &Bson) -> Result<Self, ValueError>;

    /// Value used when the field is absent from the document.
    ///
    /// `None` means the field is required. `Option<T>` returns `Some(None)`.
    fn absent() -> Option<Self> {
        None
    }
}

/// A type usable as a map key.
///
/// BSON document keys are strings, so every key goes through a
/// deterministic stringification rule:
///
/// | Key type | Rule |
/// |----------|------|
/// | `String` | verbatim |
/// | integers, `bool`, `char` | `to_string()` |
/// | `ObjectId` | 24-digit lowercase hex |
/// | `Uuid` | hyphenated lowercase |
/// | `Id<T>` | hex or the string value |
/// | derived unit enums | variant wire name |
pub trait MapKey: BsonValue {
    /// Render the key.
    fn to_key(&self) -> String;

    /// Parse a rendered key.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError`] when `key` was not produced by [`to_key`](Self::to_key).
    fn from_key(key: &str) -> Result<Self, ValueError>;
}

/// Short wire type name, as used in error messages and `$type` queries.
#[must_use]
pub fn wire_type_name(value: &Bson) -> &'static str {
    match value {
        Bson::Double(_) => "double",
        Bson::String(_) => "string",
        Bson::Array(_) => "array",
        Bson::Document(_) => "object",
        Bson::Boolean(_) => "bool",
        Bson::Null => "null",
        Bson::RegularExpression(_) => "regex",
        Bson::JavaScriptCode(_) | Bson::JavaScriptCodeWithScope(_) => "javascript",
        Bson::Int32(_) => "int",
        Bson::Int64(_) => "long",
        Bson::Timestamp(_) => "timestamp",
        Bson::Binary(_) => "binData",
        Bson::ObjectId(_) => "objectId",
        Bson::DateTime(_) => "date",
        Bson::Symbol(_) => "symbol",
        Bson::Decimal128(_) => "decimal",
        Bson::Undefined => "undefined",
        Bson::MaxKey => "maxKey",
        Bson::MinKey => "minKey",
        Bson::DbPointer(_) => "dbPointer"
    }
}

/// Render a value for an error message, truncated to 64 characters.
#[must_use]
pub fn preview(value: &Bson) -> String {
    const LIMIT: usize = 64;
    let rendered = value.to_string();
    if rendered.chars().count() <= LIMIT {
        return rendered;
    }
    let mut short: String = rendered.chars().take(LIMIT).collect();
    short.push('…');
    short
}

/// Replace an extended JSON wrapper document by the scalar it wraps.
///
/// A document whose first key starts with `$` is re-read through the
/// extended JSON parser. Documents the parser keeps as documents are returned
/// unchanged; wrappers it rejects are reported as malformed.
///
/// # Errors
///
/// Returns [`ValueError::MalformedWrapper`] for a recognised wrapper key
/// whose payload is missing or invalid.
pub fn unwrap_extended(value: &Bson) -> Result<Cow<'_, Bson>, ValueError> {
    let Bson::Document(document) = value else {
        return Ok(Cow::Borrowed(value));
    };
    let Some(wrapper) = document.keys().next().filter(|key| key.starts_with('$')) else {
        return Ok(Cow::Borrowed(value));
    };
    match Bson::try_from(value.clone().into_relaxed_extjson()) {
        Ok(Bson::Document(_)) => Ok(Cow::Borrowed(value)),
        Ok(scalar) => Ok(Cow::Owned(scalar)),
        Err(error) => Err(ValueError::MalformedWrapper {
            wrapper: wrapper.clone(),
            reason:  error.to_string()
        })
    }
}
