// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Runtime support for docmodel.
//!
//! This crate holds everything `#[derive(Document)]` generates code against:
//! the class schema registry, typed field paths, the query builders and the
//! document codec. It can also be used standalone with hand-written
//! [`Document`] implementations.
//!
//! # Overview
//!
//! - [`schema`]: Field descriptors, class schemas and the schema builder
//! - [`registry`]: Process-wide schema cache
//! - [`path`]: Typed field paths and dotted rendering
//! - [`query`]: Filter, update, projection, sort and pipeline builders
//! - [`codec`]: Field writer/reader, encode/decode entry points, codec registry
//! - [`id`]: Typed identifiers and the swappable identifier strategy
//! - [`value`]: Scalar and container encodings
//! - [`config`]: Mapping configuration
//! - [`json`]: Extended JSON helpers
//! - [`prelude`]: Convenient re-exports
//!
//! # Architecture
//!
//! ```text
//!              #[derive(Document)]
//!                      │
//!        ┌─────────────┼──────────────────┐
//!        ▼             ▼                  ▼
//!   describe()    {Name}Fields<R>     DocumentCodec
//!        │             │                  │
//!        ▼             ▼                  ▼
//!   registry ◄──── FieldSet::field    encode / decode
//!   (schema)           │                  │
//!                      ▼                  ▼
//!               Filter / Update     bson::Document
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod codec;
pub mod config;
pub mod document;
pub mod error;
pub mod id;
pub mod json;
pub mod path;
pub mod prelude;
pub mod query;
pub mod registry;
pub mod schema;
pub mod value;

#[cfg(test)]
mod fixtures;

/// Re-export of the BSON crate used on the wire.
pub use bson;
pub use codec::{DocumentCodec, Encoded, decode, encode, encode_mut};
pub use document::{Document, collection_name};
pub use error::{
    ConfigError, DecodeError, EncodeError, IdError, PathError, SchemaError, ValueError
};
pub use id::Id;
pub use path::{Path, fields};
pub use query::{Filter, Pipeline, Projection, Sort, Update};
