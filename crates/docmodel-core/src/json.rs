// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Extended JSON rendering and parsing.
//!
//! Relaxed output keeps numbers and strings native and wraps only the types
//! JSON cannot express (`{"$oid": ..}`, `{"$date": ..}`). Canonical output
//! wraps every non-string scalar so that types survive a round trip through
//! any JSON tool.

use bson::{Bson, Document};

use crate::{
    codec::{self, DocumentCodec},
    error::{DecodeError, EncodeError},
    value::wire_type_name
};

/// Render a document as relaxed extended JSON.
///
/// # Errors
///
/// The errors of [`codec::encode`], or [`EncodeError::Json`].
pub fn to_json<T: DocumentCodec>(value: &T) -> Result<String, EncodeError> {
    let document = codec::encode(value)?.into_document();
    serde_json::to_string(&Bson::Document(document).into_relaxed_extjson())
        .map_err(|error| EncodeError::Json(error.to_string()))
}

/// Render a document as canonical extended JSON.
///
/// # Errors
///
/// The errors of [`codec::encode`], or [`EncodeError::Json`].
pub fn to_canonical_json<T: DocumentCodec>(value: &T) -> Result<String, EncodeError> {
    let document = codec::encode(value)?.into_document();
    serde_json::to_string(&Bson::Document(document).into_canonical_extjson())
        .map_err(|error| EncodeError::Json(error.to_string()))
}

/// Parse extended JSON and decode it as `T`.
///
/// # Errors
///
/// [`DecodeError::Json`] for invalid input, then the errors of
/// [`codec::decode`].
pub fn from_json<T: DocumentCodec>(text: &str) -> Result<T, DecodeError> {
    codec::decode(&document_from_json(text)?)
}

/// Parse extended JSON into an untyped document.
///
/// # Errors
///
/// [`DecodeError::Json`] for invalid JSON, malformed wrappers or a top-level
/// value that is not an object.
pub fn document_from_json(text: &str) -> Result<Document, DecodeError> {
    let json: serde_json::Value =
        serde_json::from_str(text).map_err(|error| DecodeError::Json(error.to_string()))?;
    match Bson::try_from(json) {
        Ok(Bson::Document(document)) => Ok(document),
        Ok(other) => Err(DecodeError::Json(format!(
            "expected an object, found {}",
            wire_type_name(&other)
        ))),
        Err(error) => Err(DecodeError::Json(error.to_string()))
    }
}
