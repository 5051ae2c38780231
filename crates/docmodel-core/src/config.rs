// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Process-wide mapping configuration.
//!
//! Three knobs affect how documents are mapped, and all of them are read at
//! call time, so changing one never requires rebuilding schemas:
//!
//! | Setting | Default | Read by |
//! |---------|---------|---------|
//! | serialize nulls | off | [`EncodeOptions::current`](crate::codec::EncodeOptions::current) |
//! | identifier strategy | [`IdStrategy::ObjectId`] | [`id::generator`](crate::id::generator) |
//! | collection naming | [`CollectionNaming::CamelCase`] | [`ClassSchema::collection_name`](crate::schema::ClassSchema::collection_name) |
//!
//! # Loading
//!
//! ```rust
//! use docmodel_core::config::{CollectionNaming, MappingConfig};
//!
//! let config = MappingConfig::from_json(r#"{ "collection_naming": "snake_case" }"#).unwrap();
//! assert_eq!(config.collection_naming, CollectionNaming::SnakeCase);
//! assert!(!config.serialize_nulls);
//! ```

use std::sync::{
    Arc, PoisonError, RwLock,
    atomic::{AtomicBool, Ordering}
};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    error::ConfigError,
    id::{self, IdGenerator, ObjectIdGenerator, ObjectIdToStringGenerator, UuidStringGenerator}
};

static SERIALIZE_NULLS: AtomicBool = AtomicBool::new(false);

static NAMING: RwLock<CollectionNaming> = RwLock::new(CollectionNaming::CamelCase);

/// Whether absent values are written as explicit nulls.
#[must_use]
pub fn serialize_nulls() -> bool {
    SERIALIZE_NULLS.load(Ordering::Acquire)
}

/// Turn null serialization on or off for subsequent encode calls.
pub fn set_serialize_nulls(enabled: bool) {
    SERIALIZE_NULLS.store(enabled, Ordering::Release);
}

/// The active collection naming rule.
#[must_use]
pub fn collection_naming() -> CollectionNaming {
    *NAMING.read().unwrap_or_else(PoisonError::into_inner)
}

/// Replace the collection naming rule.
pub fn set_collection_naming(naming: CollectionNaming) {
    *NAMING.write().unwrap_or_else(PoisonError::into_inner) = naming;
}

/// Collection name for `class` under the active rule.
#[must_use]
pub fn collection_name(class: &str) -> String {
    collection_naming().apply(class)
}

/// Rule deriving a collection name from a class name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionNaming {
    /// Lowercase the leading run of capitals: `OrderLine` → `orderLine`,
    /// `URLCache` → `urlcache`.
    #[default]
    CamelCase,
    /// Underscore before each capital that follows a lowercase letter:
    /// `OrderLine` → `order_line`.
    SnakeCase,
    /// Lowercase everything: `OrderLine` → `orderline`.
    Lowercase
}

impl CollectionNaming {
    /// Apply the rule to `class`.
    #[must_use]
    pub fn apply(self, class: &str) -> String {
        let chars: Vec<char> = class.chars().collect();
        let mut out = String::with_capacity(class.len() + 4);
        for (index, &current) in chars.iter().enumerate() {
            let previous = index.checked_sub(1).map(|at| chars[at]);
            match self {
                Self::CamelCase => {
                    if current.is_uppercase()
                        && (index == 0 || previous.is_some_and(char::is_uppercase))
                    {
                        out.extend(current.to_lowercase());
                    } else {
                        out.push(current);
                    }
                }
                Self::SnakeCase => {
                    if current.is_uppercase() {
                        if previous.is_some_and(char::is_lowercase) {
                            out.push('_');
                        }
                        out.extend(current.to_lowercase());
                    } else {
                        out.push(current);
                    }
                }
                Self::Lowercase => out.extend(current.to_lowercase())
            }
        }
        out
    }
}

/// Built-in identifier strategy, as named in configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdStrategy {
    /// [`ObjectIdGenerator`].
    #[default]
    ObjectId,
    /// [`ObjectIdToStringGenerator`].
    ObjectIdString,
    /// [`UuidStringGenerator`].
    UuidString
}

impl IdStrategy {
    /// Generator implementing the strategy.
    #[must_use]
    pub fn generator(self) -> Arc<dyn IdGenerator> {
        match self {
            Self::ObjectId => Arc::new(ObjectIdGenerator),
            Self::ObjectIdString => Arc::new(ObjectIdToStringGenerator::default()),
            Self::UuidString => Arc::new(UuidStringGenerator)
        }
    }
}

/// Serializable mapping configuration.
///
/// Every key is optional. A missing `id_strategy` leaves the active
/// generator untouched, which keeps custom generators installed through
/// [`id::set_generator`] in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MappingConfig {
    /// Write absent values as explicit nulls.
    pub serialize_nulls:   bool,
    /// Identifier strategy to install.
    pub id_strategy:       Option<IdStrategy>,
    /// Collection naming rule.
    pub collection_naming: CollectionNaming
}

impl MappingConfig {
    /// Parse a JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON or unknown values.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Install the configuration process-wide.
    pub fn apply(&self) {
        set_serialize_nulls(self.serialize_nulls);
        set_collection_naming(self.collection_naming);
        if let Some(strategy) = self.id_strategy {
            id::set_generator(strategy.generator());
        }
        info!(
            serialize_nulls = self.serialize_nulls,
            id_strategy = ?self.id_strategy,
            collection_naming = ?self.collection_naming,
            "mapping configuration applied"
        );
    }
}
