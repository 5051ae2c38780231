// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Aggregation pipelines.
//!
//! A [`Pipeline<R>`] is typed by the shape of the documents flowing out of
//! its last stage. Stages that keep the shape return `Pipeline<R>`; `group`
//! switches to the output type chosen by its accumulators, whose output paths
//! come from the field set of that type.
//!
//! ```rust,ignore
//! let order = fields::<Order>();
//! let total = fields::<SkuTotal>();
//! let pipeline = Pipeline::<Order>::new()
//!     .unwind(&order.lines())
//!     .group(
//!         GroupKey::field(&order.lines().fields().sku()),
//!         [Accumulator::sum(&total.qty(), &order.lines().fields().qty())]
//!     )
//!     .sort(total.qty().descending());
//! ```

use std::{fmt, marker::PhantomData};

use bson::{Bson, Document};
use tracing::warn;

use super::{Filter, Projection, Sort, entry};
use crate::{
    document::Document as DocumentType,
    error::SchemaError,
    path::{CollectionPath, Path},
    registry,
    schema::ID_FIELD
};

/// Grouping key of a `$group` stage over input documents `R`.
pub struct GroupKey<R> {
    value: Bson,
    _root: PhantomData<fn() -> R>
}

impl<R> GroupKey<R> {
    /// Single group over every input document.
    #[must_use]
    pub const fn all() -> Self {
        Self::of(Bson::Null)
    }

    /// Group by the value at `path`.
    #[must_use]
    pub fn field<T>(path: &Path<R, T>) -> Self {
        Self::of(Bson::String(path.expr()))
    }

    /// Group by a compound key; each part names one component of `_id`.
    #[must_use]
    pub fn compound<'a>(parts: impl IntoIterator<Item = (&'a str, Self)>) -> Self {
        let mut key = Document::new();
        for (name, part) in parts {
            key.insert(name, part.value);
        }
        Self::of(Bson::Document(key))
    }

    /// Group by a constant or an explicit expression.
    #[must_use]
    pub fn constant(value: impl Into<Bson>) -> Self {
        Self::of(value.into())
    }

    const fn of(value: Bson) -> Self {
        Self {
            value,
            _root: PhantomData
        }
    }
}

/// Accumulator reading input documents `R` and writing a field of `O`.
pub struct Accumulator<R, O> {
    field:      String,
    expression: Document,
    _types:     PhantomData<fn() -> (R, O)>
}

macro_rules! accumulators {
    ($($(#[$meta:meta])* $method:ident => $operator:literal),* $(,)?) => {$(
        $(#[$meta])*
        #[must_use]
        pub fn $method<T, U>(output: &Path<O, U>, input: &Path<R, T>) -> Self {
            Self::new(output, $operator, Bson::String(input.expr()))
        }
    )*};
}

impl<R, O> Accumulator<R, O> {
    accumulators! {
        /// `{ output: { $sum: "$input" } }`
        sum => "$sum",
        /// `{ output: { $avg: "$input" } }`
        avg => "$avg",
        /// `{ output: { $min: "$input" } }`
        min => "$min",
        /// `{ output: { $max: "$input" } }`
        max => "$max",
        /// `{ output: { $first: "$input" } }`
        first => "$first",
        /// `{ output: { $last: "$input" } }`
        last => "$last",
        /// `{ output: { $push: "$input" } }`
        push => "$push",
        /// `{ output: { $addToSet: "$input" } }`
        add_to_set => "$addToSet",
    }

    /// `{ output: { $sum: 1 } }`
    #[must_use]
    pub fn count<U>(output: &Path<O, U>) -> Self {
        Self::new(output, "$sum", Bson::Int32(1))
    }

    fn new<U>(output: &Path<O, U>, operator: &str, argument: Bson) -> Self {
        Self {
            field:      output.render(),
            expression: entry(operator, argument),
            _types:     PhantomData
        }
    }

    /// Output field name.
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }
}

/// Aggregation pipeline whose current stage emits documents of type `R`.
pub struct Pipeline<R> {
    stages: Vec<Document>,
    _root:  PhantomData<fn() -> R>
}

impl<R> Pipeline<R> {
    /// Pipeline without stages.
    #[must_use]
    pub const fn new() -> Self {
        Self::from_stages(Vec::new())
    }

    const fn from_stages(stages: Vec<Document>) -> Self {
        Self {
            stages,
            _root: PhantomData
        }
    }

    fn push(mut self, stage: &str, body: impl Into<Bson>) -> Self {
        self.stages.push(entry(stage, body));
        self
    }

    /// `{ $match: filter }`
    #[must_use]
    pub fn match_(self, filter: Filter<R>) -> Self {
        self.push("$match", filter.into_document())
    }

    /// `{ $project: projection }`
    #[must_use]
    pub fn project(self, projection: Projection<R>) -> Self {
        self.push("$project", projection.into_document())
    }

    /// `{ $sort: sort }`
    #[must_use]
    pub fn sort(self, sort: Sort<R>) -> Self {
        self.push("$sort", sort.into_document())
    }

    /// `{ $skip: count }`
    #[must_use]
    pub fn skip(self, count: u32) -> Self {
        self.push("$skip", i64::from(count))
    }

    /// `{ $limit: count }`
    #[must_use]
    pub fn limit(self, count: u32) -> Self {
        self.push("$limit", i64::from(count))
    }

    /// `{ $sample: { size } }`
    #[must_use]
    pub fn sample(self, size: u32) -> Self {
        self.push("$sample", entry("size", i64::from(size)))
    }

    /// `{ $unwind: "$path" }`
    ///
    /// Each output document carries one element in place of the array, so
    /// element fields stay reachable through the same paths.
    #[must_use]
    pub fn unwind<C, E>(self, path: &CollectionPath<R, C, E>) -> Self {
        self.push("$unwind", path.expr())
    }

    /// `{ $lookup: { from, localField, foreignField, as } }` joining the
    /// collection of `F`.
    ///
    /// # Errors
    ///
    /// Returns the [`SchemaError`] of `F`.
    pub fn lookup<F: DocumentType, T, U>(
        self,
        local: &Path<R, T>,
        foreign: &Path<F, U>,
        into: &str
    ) -> Result<Self, SchemaError> {
        let from = registry::resolve::<F>()?.collection_name();
        let mut body = Document::new();
        body.insert("from", from);
        body.insert("localField", local.render());
        body.insert("foreignField", foreign.render());
        body.insert("as", into);
        Ok(self.push("$lookup", body))
    }

    /// `{ $group: { _id: key, ...accumulators } }`, emitting documents of
    /// type `O`.
    ///
    /// `_id` always holds the group key. An accumulator whose output field is
    /// `_id` is dropped with a warning.
    #[must_use]
    pub fn group<O>(
        self,
        key: GroupKey<R>,
        accumulators: impl IntoIterator<Item = Accumulator<R, O>>
    ) -> Pipeline<O> {
        let mut body = entry(ID_FIELD, key.value);
        for accumulator in accumulators {
            if accumulator.field == ID_FIELD {
                warn!(expression = %accumulator.expression, "accumulator on `_id` ignored");
                continue;
            }
            body.insert(accumulator.field, accumulator.expression);
        }
        Pipeline::from_stages(self.push("$group", body).stages)
    }

    /// `{ $count: field }`
    #[must_use]
    pub fn count(self, field: &str) -> Pipeline<Document> {
        Pipeline::from_stages(self.push("$count", field).stages)
    }

    /// Append an untyped stage that keeps the document shape.
    #[must_use]
    pub fn stage(mut self, stage: Document) -> Self {
        self.stages.push(stage);
        self
    }

    /// Reinterpret the output as documents of type `O`, after a raw stage
    /// that reshaped them.
    #[must_use]
    pub fn cast<O>(self) -> Pipeline<O> {
        Pipeline::from_stages(self.stages)
    }

    /// Rendered stages.
    #[must_use]
    pub fn stages(&self) -> &[Document] {
        &self.stages
    }

    /// Take the rendered stages.
    #[must_use]
    pub fn into_stages(self) -> Vec<Document> {
        self.stages
    }
}

impl<R> Default for Pipeline<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> Clone for Pipeline<R> {
    fn clone(&self) -> Self {
        Self::from_stages(self.stages.clone())
    }
}

impl<R> fmt::Debug for Pipeline<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.stages).finish()
    }
}
