// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Query filters.

use std::{fmt, marker::PhantomData};

use bson::{Bson, Document, Regex, spec::ElementType};

use super::{entry, operand, operands};
use crate::{
    path::{CollectionPath, Path},
    schema::ID_FIELD,
    value::BsonValue
};

/// Query filter over documents of type `R`.
///
/// # Combination Rules
///
/// | Expression | Result |
/// |------------|--------|
/// | `a.and(b).and(c)` | `{ $and: [a, b, c] }` |
/// | `a.or(b).and(c)` | `{ $and: [{ $or: [a, b] }, c] }` |
/// | `Filter::empty().and(a)` | `a` |
/// | `path.eq(v).not()` | `{ path: { $ne: v } }` |
/// | `path.gt(v).not()` | `{ path: { $not: { $gt: v } } }` |
/// | `a.and(b).not()` | `{ $nor: [{ $and: [a, b] }] }` |
pub struct Filter<R> {
    document: Document,
    _root:    PhantomData<fn() -> R>
}

impl<R> Filter<R> {
    /// Filter matching every document.
    #[must_use]
    pub fn empty() -> Self {
        Self::raw(Document::new())
    }

    /// Filter over an explicit document.
    ///
    /// The escape hatch for operators without a typed builder. Nothing is
    /// checked against the schema of `R`.
    #[must_use]
    pub const fn raw(document: Document) -> Self {
        Self {
            document,
            _root: PhantomData
        }
    }

    /// Match the document whose identifier is `id`.
    #[must_use]
    pub fn by_id<I: BsonValue>(id: &I) -> Self {
        Self::raw(entry(ID_FIELD, operand(id)))
    }

    /// Full-text search over the collection's text index.
    #[must_use]
    pub fn text(search: &str) -> Self {
        Self::raw(entry("$text", entry("$search", search)))
    }

    /// Aggregation expression evaluated per document.
    #[must_use]
    pub fn expr(expression: impl Into<Bson>) -> Self {
        Self::raw(entry("$expr", expression))
    }

    fn condition(path: String, value: Bson) -> Self {
        Self::raw(entry(path, value))
    }

    fn operator(path: String, operator: &str, value: impl Into<Bson>) -> Self {
        Self::condition(path, Bson::Document(entry(operator, value)))
    }

    /// Whether the filter matches everything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.document.is_empty()
    }

    /// Rendered filter document.
    #[must_use]
    pub const fn as_document(&self) -> &Document {
        &self.document
    }

    /// Take the rendered filter document.
    #[must_use]
    pub fn into_document(self) -> Document {
        self.document
    }

    /// Both filters must match.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        Self::and_all([self, other])
    }

    /// Either filter must match.
    #[must_use]
    pub fn or(self, other: Self) -> Self {
        Self::or_all([self, other])
    }

    /// Neither filter may match.
    #[must_use]
    pub fn nor(self, other: Self) -> Self {
        Self::nor_all([self, other])
    }

    /// Every filter must match. Nested conjunctions are flattened and empty
    /// filters are dropped.
    #[must_use]
    pub fn and_all(filters: impl IntoIterator<Item = Self>) -> Self {
        Self::join("$and", filters)
    }

    /// At least one filter must match. Nested disjunctions are flattened and
    /// empty filters are dropped.
    #[must_use]
    pub fn or_all(filters: impl IntoIterator<Item = Self>) -> Self {
        Self::join("$or", filters)
    }

    /// No filter may match.
    #[must_use]
    pub fn nor_all(filters: impl IntoIterator<Item = Self>) -> Self {
        let clauses: Vec<Bson> = filters
            .into_iter()
            .map(|filter| Bson::Document(filter.document))
            .collect();
        if clauses.is_empty() {
            return Self::empty();
        }
        Self::raw(entry("$nor", clauses))
    }

    fn join(operator: &str, filters: impl IntoIterator<Item = Self>) -> Self {
        let mut clauses = Vec::new();
        for filter in filters {
            if filter.is_empty() {
                continue;
            }
            if filter.document.len() == 1
                && let Ok(nested) = filter.document.get_array(operator)
            {
                clauses.extend(nested.iter().cloned());
            } else {
                clauses.push(Bson::Document(filter.document));
            }
        }
        match <[Bson; 1]>::try_from(clauses) {
            Ok([Bson::Document(single)]) => Self::raw(single),
            Ok([other]) => Self::raw(entry(operator, vec![other])),
            Err(clauses) if clauses.is_empty() => Self::empty(),
            Err(clauses) => Self::raw(entry(operator, clauses))
        }
    }

    /// Negate the filter.
    #[must_use]
    pub fn not(self) -> Self {
        if self.document.len() == 1
            && let Some((path, condition)) = self.document.iter().next()
            && !path.starts_with('$')
        {
            let negated = match condition {
                Bson::Document(operators) => match operators.iter().next() {
                    Some((operator, value)) if operators.len() == 1 && operator == "$eq" => {
                        entry("$ne", value.clone())
                    }
                    Some((operator, _)) if operator.starts_with('$') => {
                        entry("$not", operators.clone())
                    }
                    _ => entry("$ne", condition.clone())
                },
                Bson::RegularExpression(_) => entry("$not", condition.clone()),
                other => entry("$ne", other.clone())
            };
            return Self::raw(entry(path.clone(), negated));
        }
        Self::raw(entry("$nor", vec![Bson::Document(self.document)]))
    }
}

impl<R> Clone for Filter<R> {
    fn clone(&self) -> Self {
        Self::raw(self.document.clone())
    }
}

impl<R> PartialEq for Filter<R> {
    fn eq(&self, other: &Self) -> bool {
        self.document == other.document
    }
}

impl<R> fmt::Debug for Filter<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Filter").field(&self.document).finish()
    }
}

impl<R> fmt::Display for Filter<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.document.fmt(f)
    }
}

impl<R> Default for Filter<R> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<R> From<Filter<R>> for Document {
    fn from(filter: Filter<R>) -> Self {
        filter.document
    }
}

/// Comparison, membership and element operators.
impl<R, T: BsonValue> Path<R, T> {
    /// `{ path: value }`
    #[must_use]
    pub fn eq(&self, value: impl Into<T>) -> Filter<R> {
        Filter::condition(self.render(), operand(&value.into()))
    }

    /// `{ path: { $ne: value } }`
    #[must_use]
    pub fn ne(&self, value: impl Into<T>) -> Filter<R> {
        Filter::operator(self.render(), "$ne", operand(&value.into()))
    }

    /// `{ path: { $lt: value } }`
    #[must_use]
    pub fn lt(&self, value: impl Into<T>) -> Filter<R> {
        Filter::operator(self.render(), "$lt", operand(&value.into()))
    }

    /// `{ path: { $lte: value } }`
    #[must_use]
    pub fn lte(&self, value: impl Into<T>) -> Filter<R> {
        Filter::operator(self.render(), "$lte", operand(&value.into()))
    }

    /// `{ path: { $gt: value } }`
    #[must_use]
    pub fn gt(&self, value: impl Into<T>) -> Filter<R> {
        Filter::operator(self.render(), "$gt", operand(&value.into()))
    }

    /// `{ path: { $gte: value } }`
    #[must_use]
    pub fn gte(&self, value: impl Into<T>) -> Filter<R> {
        Filter::operator(self.render(), "$gte", operand(&value.into()))
    }

    /// `{ path: { $in: [values] } }`
    #[must_use]
    pub fn is_in<V: Into<T>>(&self, values: impl IntoIterator<Item = V>) -> Filter<R> {
        Filter::operator(self.render(), "$in", operands::<T, V>(values))
    }

    /// `{ path: { $nin: [values] } }`
    #[must_use]
    pub fn not_in<V: Into<T>>(&self, values: impl IntoIterator<Item = V>) -> Filter<R> {
        Filter::operator(self.render(), "$nin", operands::<T, V>(values))
    }

    /// `{ path: { $exists: present } }`
    #[must_use]
    pub fn exists(&self, present: bool) -> Filter<R> {
        Filter::operator(self.render(), "$exists", present)
    }

    /// `{ path: null }`, matching null and absent values.
    #[must_use]
    pub fn is_null(&self) -> Filter<R> {
        Filter::condition(self.render(), Bson::Null)
    }

    /// `{ path: { $type: code } }`
    #[must_use]
    pub fn has_type(&self, element_type: ElementType) -> Filter<R> {
        Filter::operator(self.render(), "$type", element_type as i32)
    }

    /// `{ path: { $mod: [divisor, remainder] } }`
    #[must_use]
    pub fn modulo(&self, divisor: i64, remainder: i64) -> Filter<R> {
        Filter::operator(self.render(), "$mod", vec![divisor, remainder])
    }

    /// `{ path: { $bitsAllSet: mask } }`
    #[must_use]
    pub fn bits_all_set(&self, mask: i64) -> Filter<R> {
        Filter::operator(self.render(), "$bitsAllSet", mask)
    }

    /// `{ path: { $bitsAnySet: mask } }`
    #[must_use]
    pub fn bits_any_set(&self, mask: i64) -> Filter<R> {
        Filter::operator(self.render(), "$bitsAnySet", mask)
    }

    /// `{ path: { $bitsAllClear: mask } }`
    #[must_use]
    pub fn bits_all_clear(&self, mask: i64) -> Filter<R> {
        Filter::operator(self.render(), "$bitsAllClear", mask)
    }

    /// `{ path: { $bitsAnyClear: mask } }`
    #[must_use]
    pub fn bits_any_clear(&self, mask: i64) -> Filter<R> {
        Filter::operator(self.render(), "$bitsAnyClear", mask)
    }
}

/// Pattern matching on string fields.
impl<R> Path<R, String> {
    /// `{ path: { $regex: pattern } }`
    #[must_use]
    pub fn regex(&self, pattern: &str) -> Filter<R> {
        Filter::operator(self.render(), "$regex", pattern)
    }

    /// `{ path: /pattern/options }`
    #[must_use]
    pub fn regex_with(&self, pattern: &str, options: &str) -> Filter<R> {
        Filter::condition(
            self.render(),
            Bson::RegularExpression(Regex {
                pattern: pattern.to_owned(),
                options: options.to_owned(),
            })
        )
    }
}

/// Array operators.
impl<R, C, E: BsonValue> CollectionPath<R, C, E> {
    /// `{ path: item }`, matching arrays that contain `item`.
    #[must_use]
    pub fn contains(&self, item: impl Into<E>) -> Filter<R> {
        Filter::condition(self.render(), operand(&item.into()))
    }

    /// `{ path: { $all: [items] } }`
    #[must_use]
    pub fn all<V: Into<E>>(&self, items: impl IntoIterator<Item = V>) -> Filter<R> {
        Filter::operator(self.render(), "$all", operands::<E, V>(items))
    }

    /// `{ path: { $size: size } }`
    #[must_use]
    pub fn size(&self, size: usize) -> Filter<R> {
        Filter::operator(self.render(), "$size", i64::try_from(size).unwrap_or(i64::MAX))
    }

    /// `{ path: { $elemMatch: filter } }`, with `filter` rooted at the
    /// element type.
    #[must_use]
    pub fn elem_match(&self, filter: Filter<E>) -> Filter<R> {
        Filter::operator(self.render(), "$elemMatch", filter.document)
    }
}
