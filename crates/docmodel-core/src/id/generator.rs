// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Pluggable identifier generation.
//!
//! The active generator is process-wide and swappable at runtime. Encoders
//! read it once per encode call, so swapping it never requires rebuilding
//! schemas or codecs.
//!
//! # Built-in Generators
//!
//! | Generator | Produces |
//! |-----------|----------|
//! | [`ObjectIdGenerator`] | native `ObjectId` (default) |
//! | [`ObjectIdToStringGenerator`] | `ObjectId` rendered as 24-digit hex |
//! | [`UuidStringGenerator`] | random UUID v4, hyphenated |
//!
//! # Example
//!
//! ```rust
//! use docmodel_core::id;
//!
//! id::generate_ids_as_strings();
//! assert_eq!(id::generator().name(), "object-id-string");
//! id::generate_ids_as_object_ids();
//! ```

use std::{
    fmt,
    sync::{Arc, LazyLock, PoisonError, RwLock}
};

use bson::oid::ObjectId;
use tracing::debug;
use uuid::Uuid;

use super::IdValue;
use crate::error::IdError;

/// Source of fresh identifier values.
///
/// Implementations must be cheap and thread-safe; they are called from every
/// encode of a document whose identifier is absent.
pub trait IdGenerator: Send + Sync {
    /// Short name used in logs and errors.
    fn name(&self) -> &str;

    /// Produce a new identifier.
    ///
    /// # Errors
    ///
    /// Returns [`IdError::Generation`] when the generator cannot produce a
    /// value. The failure aborts the encode call and is not retried.
    fn generate(&self) -> Result<IdValue, IdError>;
}

impl fmt::Debug for dyn IdGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IdGenerator").field(&self.name()).finish()
    }
}

/// Generates native `ObjectId` values.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectIdGenerator;

impl IdGenerator for ObjectIdGenerator {
    fn name(&self) -> &str {
        "object-id"
    }

    fn generate(&self) -> Result<IdValue, IdError> {
        Ok(IdValue::ObjectId(ObjectId::new()))
    }
}

/// Generates `ObjectId` values rendered as hex strings.
///
/// For schemas whose identifier is declared as a plain string.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectIdToStringGenerator {
    inner: ObjectIdGenerator
}

impl IdGenerator for ObjectIdToStringGenerator {
    fn name(&self) -> &str {
        "object-id-string"
    }

    fn generate(&self) -> Result<IdValue, IdError> {
        Ok(match self.inner.generate()? {
            IdValue::ObjectId(id) => IdValue::String(id.to_hex()),
            other => other
        })
    }
}

/// Generates random UUID v4 strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidStringGenerator;

impl IdGenerator for UuidStringGenerator {
    fn name(&self) -> &str {
        "uuid-string"
    }

    fn generate(&self) -> Result<IdValue, IdError> {
        Ok(IdValue::String(Uuid::new_v4().to_string()))
    }
}

static ACTIVE: LazyLock<RwLock<Arc<dyn IdGenerator>>> =
    LazyLock::new(|| RwLock::new(Arc::new(ObjectIdGenerator)));

/// The active generator.
#[must_use]
pub fn generator() -> Arc<dyn IdGenerator> {
    Arc::clone(&ACTIVE.read().unwrap_or_else(PoisonError::into_inner))
}

/// Replace the active generator.
///
/// Visible to every encode call that starts afterwards. Callers that swap and
/// later restore the generator must not race concurrent encodes.
pub fn set_generator(generator: Arc<dyn IdGenerator>) {
    debug!(generator = generator.name(), "identifier generator replaced");
    *ACTIVE.write().unwrap_or_else(PoisonError::into_inner) = generator;
}

/// Use [`ObjectIdToStringGenerator`].
pub fn generate_ids_as_strings() {
    set_generator(Arc::new(ObjectIdToStringGenerator::default()));
}

/// Use [`ObjectIdGenerator`], the default.
pub fn generate_ids_as_object_ids() {
    set_generator(Arc::new(ObjectIdGenerator));
}
