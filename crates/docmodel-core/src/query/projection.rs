// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Projections and sort orders.

use std::{fmt, marker::PhantomData};

use bson::{Bson, Document};

use super::{Filter, entry};
use crate::{
    path::{CollectionPath, Path},
    schema::ID_FIELD
};

/// Projection over documents of type `R`.
pub struct Projection<R> {
    document: Document,
    _root:    PhantomData<fn() -> R>
}

impl<R> Projection<R> {
    /// Projection returning whole documents.
    #[must_use]
    pub fn empty() -> Self {
        Self::raw(Document::new())
    }

    /// Projection over an explicit document.
    #[must_use]
    pub const fn raw(document: Document) -> Self {
        Self {
            document,
            _root: PhantomData
        }
    }

    fn single(path: String, value: impl Into<Bson>) -> Self {
        Self::raw(entry(path, value))
    }

    /// `{ _id: 0 }`
    #[must_use]
    pub fn exclude_id() -> Self {
        Self::single(ID_FIELD.to_owned(), 0)
    }

    /// `{ path: { $elemMatch: filter } }`, keeping only the first matching
    /// element.
    #[must_use]
    pub fn elem_match<C, E>(path: &CollectionPath<R, C, E>, filter: Filter<E>) -> Self {
        Self::single(path.render(), entry("$elemMatch", filter.into_document()))
    }

    /// Merge `other` into this projection.
    #[must_use]
    pub fn and(mut self, other: Self) -> Self {
        for (path, value) in other.document {
            self.document.insert(path, value);
        }
        self
    }

    /// Whether the projection keeps every field.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.document.is_empty()
    }

    /// Rendered projection document.
    #[must_use]
    pub const fn as_document(&self) -> &Document {
        &self.document
    }

    /// Take the rendered projection document.
    #[must_use]
    pub fn into_document(self) -> Document {
        self.document
    }
}

/// Sort order over documents of type `R`.
///
/// Keys keep the order they were added in, which is the order the store
/// applies them.
pub struct Sort<R> {
    document: Document,
    _root:    PhantomData<fn() -> R>
}

impl<R> Sort<R> {
    /// Natural order.
    #[must_use]
    pub fn empty() -> Self {
        Self::raw(Document::new())
    }

    /// Sort over an explicit document.
    #[must_use]
    pub const fn raw(document: Document) -> Self {
        Self {
            document,
            _root: PhantomData
        }
    }

    /// Break ties with `other`.
    #[must_use]
    pub fn then(mut self, other: Self) -> Self {
        for (path, direction) in other.document {
            if !self.document.contains_key(&path) {
                self.document.insert(path, direction);
            }
        }
        self
    }

    /// Whether no key is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.document.is_empty()
    }

    /// Rendered sort document.
    #[must_use]
    pub const fn as_document(&self) -> &Document {
        &self.document
    }

    /// Take the rendered sort document.
    #[must_use]
    pub fn into_document(self) -> Document {
        self.document
    }
}

macro_rules! document_builder {
    ($($name:ident),*) => {$(
        impl<R> Clone for $name<R> {
            fn clone(&self) -> Self {
                Self::raw(self.document.clone())
            }
        }

        impl<R> PartialEq for $name<R> {
            fn eq(&self, other: &Self) -> bool {
                self.document == other.document
            }
        }

        impl<R> fmt::Debug for $name<R> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_tuple(stringify!($name)).field(&self.document).finish()
            }
        }

        impl<R> Default for $name<R> {
            fn default() -> Self {
                Self::empty()
            }
        }

        impl<R> From<$name<R>> for Document {
            fn from(value: $name<R>) -> Self {
                value.document
            }
        }
    )*};
}

document_builder!(Projection, Sort);

impl<R, T> Path<R, T> {
    /// `{ path: 1 }`
    #[must_use]
    pub fn include(&self) -> Projection<R> {
        Projection::single(self.render(), 1)
    }

    /// `{ path: 0 }`
    #[must_use]
    pub fn exclude(&self) -> Projection<R> {
        Projection::single(self.render(), 0)
    }

    /// `{ path: 1 }`
    #[must_use]
    pub fn ascending(&self) -> Sort<R> {
        Sort::raw(entry(self.render(), 1))
    }

    /// `{ path: -1 }`
    #[must_use]
    pub fn descending(&self) -> Sort<R> {
        Sort::raw(entry(self.render(), -1))
    }
}

impl<R, C, E> CollectionPath<R, C, E> {
    /// `{ path: { $slice: limit } }`; negative limits count from the end.
    #[must_use]
    pub fn slice(&self, limit: i64) -> Projection<R> {
        Projection::single(self.render(), entry("$slice", limit))
    }

    /// `{ path: { $slice: [skip, limit] } }`
    #[must_use]
    pub fn slice_range(&self, skip: i64, limit: i64) -> Projection<R> {
        Projection::single(self.render(), entry("$slice", vec![skip, limit]))
    }
}
