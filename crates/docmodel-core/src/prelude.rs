// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Convenient re-exports for common usage.
//!
//! # Usage
//!
//! ```rust,ignore
//! use docmodel_core::prelude::*;
//! ```

pub use crate::{
    Document, Id,
    codec::{DocumentCodec, EncodeOptions, decode, encode, encode_mut},
    error::{DecodeError, EncodeError, PathError, SchemaError},
    path::{FieldSet, Path, Positional, fields},
    query::{Accumulator, Filter, GroupKey, Pipeline, Projection, Sort, Update},
    value::{BsonValue, MapKey}
};
