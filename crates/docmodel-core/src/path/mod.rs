// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Typed field paths and their dotted rendering.
//!
//! A [`Path<R, T>`] addresses a value of type `T` inside documents of root
//! type `R`. Paths are built only through generated field handles, so every
//! segment is a wire name that exists in the schema, and a path from one root
//! cannot be used in a query over another.
//!
//! # Handles
//!
//! ```text
//! fields::<Shop>()            ShopFields<Shop>
//!     .address()              ObjectPath<Shop, Address>      "address"
//!     .fields().city()        Path<Shop, String>             "address.city"
//!
//! fields::<Shop>()
//!     .lines()                CollectionPath<Shop, Vec<Line>, Line>   "lines"
//!     .fields().qty()         Path<Shop, i32>                "lines.qty"
//!
//! fields::<Shop>()
//!     .stock()                MapPath<Shop, HashMap<String, i32>, String, i32>
//!     .key(&"bolts".into())   Path<Shop, i32>                "stock.bolts"
//! ```
//!
//! # Rendering
//!
//! Collection and map segments render exactly like object segments; array
//! traversal is implicit in the store's dotted-path semantics. Positional
//! matchers are appended explicitly with the collection handle methods or
//! inserted afterwards with [`Path::render_positional`].

mod handle;

use std::{
    fmt,
    hash::{Hash, Hasher},
    marker::PhantomData
};

use bson::Bson;
pub use handle::{CollectionPath, FieldSet, MapPath, ObjectPath, descend, fields};

use crate::{error::PathError, schema::ContainerKind};

/// A type that can be addressed by a path.
///
/// The associated handle decides what a path to a field of this type offers:
/// plain [`Path`] for scalars, [`ObjectPath`] for embedded documents,
/// [`CollectionPath`] for arrays and [`MapPath`] for maps.
pub trait PathTarget: Sized + 'static {
    /// Wire shape of the addressed value.
    const KIND: ContainerKind;

    /// Handle returned for a field of this type.
    type Handle<R>;

    /// Build the handle for `segments`.
    fn handle<R>(segments: Vec<Segment>) -> Self::Handle<R>;
}

/// One step of a path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Segment {
    name: String,
    kind: ContainerKind
}

impl Segment {
    /// Segment addressing wire name `name`.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: ContainerKind) -> Self {
        Self {
            name: name.into(),
            kind
        }
    }

    /// Wire name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Shape of the value the segment addresses.
    #[must_use]
    pub const fn kind(&self) -> ContainerKind {
        self.kind
    }
}

/// Array element matcher used in update paths.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Positional {
    /// First element matched by the query, `$`.
    First,
    /// Every element, `$[]`.
    All,
    /// Elements matched by a named array filter, `$[name]`.
    Filtered(String),
    /// Element at a fixed index.
    Index(usize)
}

impl Positional {
    /// Rendered token.
    #[must_use]
    pub fn token(&self) -> String {
        match self {
            Self::First => "$".to_owned(),
            Self::All => "$[]".to_owned(),
            Self::Filtered(name) => format!("$[{name}]"),
            Self::Index(index) => index.to_string()
        }
    }
}

/// Path to a value of type `T` inside root documents of type `R`.
///
/// Immutable and cheap to clone. Equality and hashing compare the rendered
/// dotted path.
pub struct Path<R, T> {
    segments: Vec<Segment>,
    _types:   PhantomData<fn() -> (R, T)>
}

impl<R, T> Path<R, T> {
    /// Path over explicit segments.
    #[must_use]
    pub const fn from_segments(segments: Vec<Segment>) -> Self {
        Self {
            segments,
            _types: PhantomData
        }
    }

    /// Segments from the root.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Append a segment for field `name` of type `U`.
    #[must_use]
    pub fn child<U: PathTarget>(&self, name: &str) -> U::Handle<R> {
        descend::<U, R>(&self.segments, name)
    }

    /// Dotted wire path, such as `address.city`.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (index, segment) in self.segments.iter().enumerate() {
            if index > 0 {
                out.push('.');
            }
            out.push_str(&segment.name);
        }
        out
    }

    /// Dotted path with `positional` inserted after the first collection
    /// segment.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::NotPositional`] when no segment is a collection.
    ///
    /// # Example
    ///
    /// ```rust
    /// use docmodel_core::{
    ///     path::{Path, Positional, Segment},
    ///     schema::ContainerKind
    /// };
    ///
    /// let qty: Path<(), i32> = Path::from_segments(vec![
    ///     Segment::new("lines", ContainerKind::Collection),
    ///     Segment::new("qty", ContainerKind::Scalar),
    /// ]);
    /// assert_eq!(qty.render_positional(&Positional::All).unwrap(), "lines.$[].qty");
    /// ```
    pub fn render_positional(&self, positional: &Positional) -> Result<String, PathError> {
        let at = self
            .segments
            .iter()
            .position(|segment| segment.kind == ContainerKind::Collection)
            .ok_or_else(|| PathError::NotPositional {
                path: self.render()
            })?;
        let mut names: Vec<String> = self.segments.iter().map(|segment| segment.name.clone()).collect();
        names.insert(at + 1, positional.token());
        Ok(names.join("."))
    }

    /// Aggregation field reference, such as `$address.city`.
    #[must_use]
    pub fn expr(&self) -> String {
        format!("${}", self.render())
    }

    /// Same path, typed as an untyped value.
    #[must_use]
    pub fn erase(&self) -> Path<R, Bson> {
        Path::from_segments(self.segments.clone())
    }
}

impl<R, T> Clone for Path<R, T> {
    fn clone(&self) -> Self {
        Self::from_segments(self.segments.clone())
    }
}

impl<R, T> PartialEq for Path<R, T> {
    fn eq(&self, other: &Self) -> bool {
        self.render() == other.render()
    }
}

impl<R, T> Eq for Path<R, T> {}

impl<R, T> Hash for Path<R, T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.render().hash(state);
    }
}

impl<R, T> fmt::Debug for Path<R, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Path").field(&self.render()).finish()
    }
}

impl<R, T> fmt::Display for Path<R, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
