// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Per-call encoding options.

use std::{fmt, sync::Arc};

use crate::{
    config,
    id::{self, IdGenerator, ObjectIdGenerator}
};

/// Snapshot of the encoding policy for one encode call.
///
/// [`EncodeOptions::current`] reads the process-wide settings once; nested
/// documents reuse the same snapshot so a concurrent configuration change
/// never splits one document across two policies.
#[derive(Clone)]
pub struct EncodeOptions {
    serialize_nulls: bool,
    generator:       Arc<dyn IdGenerator>
}

impl EncodeOptions {
    /// Snapshot the process-wide settings.
    #[must_use]
    pub fn current() -> Self {
        Self {
            serialize_nulls: config::serialize_nulls(),
            generator:       id::generator()
        }
    }

    /// Override the null policy.
    #[must_use]
    pub const fn with_serialize_nulls(mut self, enabled: bool) -> Self {
        self.serialize_nulls = enabled;
        self
    }

    /// Override the identifier generator.
    #[must_use]
    pub fn with_generator(mut self, generator: Arc<dyn IdGenerator>) -> Self {
        self.generator = generator;
        self
    }

    /// Whether absent values are written as explicit nulls.
    #[must_use]
    pub const fn serialize_nulls(&self) -> bool {
        self.serialize_nulls
    }

    /// Generator used for missing root identifiers.
    #[must_use]
    pub fn generator(&self) -> &dyn IdGenerator {
        self.generator.as_ref()
    }
}

/// Nulls omitted, native `ObjectId` identifiers.
impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            serialize_nulls: false,
            generator:       Arc::new(ObjectIdGenerator)
        }
    }
}

impl fmt::Debug for EncodeOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncodeOptions")
            .field("serialize_nulls", &self.serialize_nulls)
            .field("generator", &self.generator.name())
            .finish()
    }
}
