// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Field handles returned by generated `{Name}Fields<R>` methods.

use std::{fmt, marker::PhantomData, ops::Deref};

use bson::Bson;

use super::{Path, PathTarget, Positional, Segment};
use crate::{
    document::Document,
    error::{PathError, SchemaError},
    registry,
    value::MapKey
};

/// Handle for field `name` of type `T` below `prefix`.
///
/// Generated field methods are one call to this function.
#[must_use]
pub fn descend<T: PathTarget, R>(prefix: &[Segment], name: &str) -> T::Handle<R> {
    let mut segments = Vec::with_capacity(prefix.len() + 1);
    segments.extend_from_slice(prefix);
    segments.push(Segment::new(name, T::KIND));
    T::handle(segments)
}

/// Root field set of `D`.
///
/// # Example
///
/// ```rust,ignore
/// let city = fields::<Shop>().address().fields().city();
/// assert_eq!(city.render(), "address.city");
/// ```
#[must_use]
pub fn fields<D: Document>() -> D::Fields<D> {
    <D::Fields<D> as FieldSet<D>>::at(Vec::new())
}

/// Generated accessor table of one document type, rooted at `R`.
///
/// Typed accessors are inherent methods on the generated struct. This trait
/// adds the explicitly fallible name-based lookup, which reaches fields that
/// have no public accessor.
pub trait FieldSet<R>: Sized {
    /// Document type whose fields are listed.
    type Owner: Document;

    /// Field set below `prefix`.
    fn at(prefix: Vec<Segment>) -> Self;

    /// Segments leading to the owner document.
    fn prefix(&self) -> &[Segment];

    /// Path to the field with wire or member name `name`.
    ///
    /// # Errors
    ///
    /// - [`PathError::UnknownField`] when no field matches
    /// - [`PathError::Ambiguous`] when the name matches two fields
    /// - [`PathError::Schema`] when the owner's schema is invalid
    fn field(&self, name: &str) -> Result<Path<R, Bson>, PathError> {
        let schema = registry::resolve::<Self::Owner>()?;
        let field = schema.lookup(name)?;
        let mut segments = self.prefix().to_vec();
        segments.push(Segment::new(field.name(), field.kind()));
        Ok(Path::from_segments(segments))
    }

    /// Paths to every field, in schema order.
    ///
    /// # Errors
    ///
    /// Returns the owner's [`SchemaError`].
    fn all(&self) -> Result<Vec<Path<R, Bson>>, SchemaError> {
        let schema = registry::resolve::<Self::Owner>()?;
        Ok(schema
            .fields()
            .iter()
            .map(|field| {
                let mut segments = self.prefix().to_vec();
                segments.push(Segment::new(field.name(), field.kind()));
                Path::from_segments(segments)
            })
            .collect())
    }
}

/// Handle to an embedded document field.
///
/// Dereferences to the document's own path; [`fields`](Self::fields)
/// descends into it.
pub struct ObjectPath<R, D> {
    path: Path<R, D>
}

impl<R, D> ObjectPath<R, D> {
    /// Handle over explicit segments.
    #[must_use]
    pub const fn from_segments(segments: Vec<Segment>) -> Self {
        Self {
            path: Path::from_segments(segments)
        }
    }

    /// The document's own path.
    #[must_use]
    pub const fn path(&self) -> &Path<R, D> {
        &self.path
    }
}

impl<R, D: Document> ObjectPath<R, D> {
    /// Fields of the embedded document.
    #[must_use]
    pub fn fields(&self) -> D::Fields<R> {
        <D::Fields<R> as FieldSet<R>>::at(self.path.segments.clone())
    }
}

impl<R, D> Deref for ObjectPath<R, D> {
    type Target = Path<R, D>;

    fn deref(&self) -> &Self::Target {
        &self.path
    }
}

impl<R, D> Clone for ObjectPath<R, D> {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone()
        }
    }
}

impl<R, D> fmt::Debug for ObjectPath<R, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ObjectPath").field(&self.path.render()).finish()
    }
}

/// Handle to an array field of container type `C` with elements `E`.
///
/// Dereferences to the path of the whole array. Element methods return the
/// element type's own handle, so nested documents keep their typed fields.
///
/// | Method | Renders |
/// |--------|---------|
/// | [`element`](Self::element) | `lines` (implicit traversal) |
/// | [`positional`](Self::positional) | `lines.$` |
/// | [`all_positional`](Self::all_positional) | `lines.$[]` |
/// | [`filtered`](Self::filtered) | `lines.$[name]` |
/// | [`at`](Self::at) | `lines.3` |
pub struct CollectionPath<R, C, E> {
    path:     Path<R, C>,
    _element: PhantomData<fn() -> E>
}

impl<R, C, E> CollectionPath<R, C, E> {
    /// Handle over explicit segments.
    #[must_use]
    pub const fn from_segments(segments: Vec<Segment>) -> Self {
        Self {
            path:     Path::from_segments(segments),
            _element: PhantomData
        }
    }

    /// Path of the whole array.
    #[must_use]
    pub const fn path(&self) -> &Path<R, C> {
        &self.path
    }
}

impl<R, C, E: PathTarget> CollectionPath<R, C, E> {
    /// Elements, addressed through implicit array traversal.
    #[must_use]
    pub fn element(&self) -> E::Handle<R> {
        E::handle(self.path.segments.clone())
    }

    /// First element matched by the query, `$`.
    #[must_use]
    pub fn positional(&self) -> E::Handle<R> {
        self.matcher(&Positional::First)
    }

    /// Every element, `$[]`.
    #[must_use]
    pub fn all_positional(&self) -> E::Handle<R> {
        self.matcher(&Positional::All)
    }

    /// Elements matched by array filter `name`, `$[name]`.
    #[must_use]
    pub fn filtered(&self, name: &str) -> E::Handle<R> {
        self.matcher(&Positional::Filtered(name.to_owned()))
    }

    /// Element at `index`.
    #[must_use]
    pub fn at(&self, index: usize) -> E::Handle<R> {
        self.matcher(&Positional::Index(index))
    }

    fn matcher(&self, positional: &Positional) -> E::Handle<R> {
        descend::<E, R>(&self.path.segments, &positional.token())
    }
}

impl<R, C, E: Document> CollectionPath<R, C, E> {
    /// Fields of the element documents.
    #[must_use]
    pub fn fields(&self) -> E::Fields<R> {
        <E::Fields<R> as FieldSet<R>>::at(self.path.segments.clone())
    }
}

impl<R, C, E> Deref for CollectionPath<R, C, E> {
    type Target = Path<R, C>;

    fn deref(&self) -> &Self::Target {
        &self.path
    }
}

impl<R, C, E> Clone for CollectionPath<R, C, E> {
    fn clone(&self) -> Self {
        Self::from_segments(self.path.segments.clone())
    }
}

impl<R, C, E> fmt::Debug for CollectionPath<R, C, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CollectionPath").field(&self.path.render()).finish()
    }
}

/// Handle to a map field of type `M` with keys `K` and values `V`.
pub struct MapPath<R, M, K, V> {
    path:     Path<R, M>,
    _entries: PhantomData<fn() -> (K, V)>
}

impl<R, M, K, V> MapPath<R, M, K, V> {
    /// Handle over explicit segments.
    #[must_use]
    pub const fn from_segments(segments: Vec<Segment>) -> Self {
        Self {
            path:     Path::from_segments(segments),
            _entries: PhantomData
        }
    }

    /// Path of the whole map.
    #[must_use]
    pub const fn path(&self) -> &Path<R, M> {
        &self.path
    }
}

impl<R, M, K: MapKey, V: PathTarget> MapPath<R, M, K, V> {
    /// Value stored under `key`, rendered with [`MapKey::to_key`].
    #[must_use]
    pub fn key(&self, key: &K) -> V::Handle<R> {
        descend::<V, R>(&self.path.segments, &key.to_key())
    }
}

impl<R, M, K, V> Deref for MapPath<R, M, K, V> {
    type Target = Path<R, M>;

    fn deref(&self) -> &Self::Target {
        &self.path
    }
}

impl<R, M, K, V> Clone for MapPath<R, M, K, V> {
    fn clone(&self) -> Self {
        Self::from_segments(self.path.segments.clone())
    }
}

impl<R, M, K, V> fmt::Debug for MapPath<R, M, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("MapPath").field(&self.path.render()).finish()
    }
}
