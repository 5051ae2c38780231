// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Typed query, update, projection, sort and aggregation builders.
//!
//! Every builder is parameterized by the root document type `R` and accepts
//! only paths rooted at `R`, so mixing paths from two document types in one
//! expression is a compile error. The operator keyword always comes from the
//! method called; operand values are encoded through
//! [`BsonValue`](crate::value::BsonValue), which is the only place the
//! runtime value influences the output.
//!
//! # Operators
//!
//! | Builder | Entry points |
//! |---------|--------------|
//! | [`Filter<R>`] | `path.eq(v)`, `path.gt(v)`, `path.is_in(vs)`, `lines.elem_match(f)`, `a.and(b)` |
//! | [`Update<R>`] | `path.set(v)`, `path.inc(v)`, `lines.push(v)`, `a.combine(b)` |
//! | [`Projection<R>`] | `path.include()`, `path.exclude()`, `lines.slice(n)` |
//! | [`Sort<R>`] | `path.ascending()`, `path.descending()`, `a.then(b)` |
//! | [`Pipeline<R>`] | `match_`, `project`, `sort`, `group`, `unwind`, `lookup` |
//!
//! # Example
//!
//! ```rust,ignore
//! let shop = fields::<Shop>();
//! let filter = shop.name().eq("Acme").and(shop.rank().gte(3));
//! assert_eq!(filter.into_document(), doc! { "$and": [{ "name": "Acme" }, { "rank": { "$gte": 3 } }] });
//!
//! let update = shop.rank().inc(1).combine(shop.tags().push("new"));
//! assert_eq!(update.into_document(), doc! { "$inc": { "rank": 1 }, "$push": { "tags": "new" } });
//! ```

mod aggregate;
mod filter;
mod projection;
mod update;

pub use aggregate::{Accumulator, GroupKey, Pipeline};
use bson::{Bson, Document};
pub use bson::spec::ElementType;
pub use filter::Filter;
pub use projection::{Projection, Sort};
pub use update::Update;

use crate::{codec::EncodeOptions, value::BsonValue};

/// Encode an operand with the current settings.
fn operand<T: BsonValue>(value: &T) -> Bson {
    value.to_bson(&EncodeOptions::current())
}

/// Encode a list of operands.
fn operands<T: BsonValue, V: Into<T>>(values: impl IntoIterator<Item = V>) -> Bson {
    let options = EncodeOptions::current();
    Bson::Array(
        values
            .into_iter()
            .map(|value| value.into().to_bson(&options))
            .collect()
    )
}

/// `{ key: value }`.
fn entry(key: impl Into<String>, value: impl Into<Bson>) -> Document {
    let mut document = Document::new();
    document.insert(key, value);
    document
}
