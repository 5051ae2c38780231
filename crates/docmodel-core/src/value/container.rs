// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Container encodings: optionals, sequences, sets, maps and tuples.
//!
//! Containers encode element-wise through the element's own [`BsonValue`]
//! and decode in reverse. Decoding failures are wrapped with the index or key
//! of the offending element so the final error reads `lines.2.total`.

use std::{
    collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque},
    hash::Hash
};

use bson::{Bson, Document};

use super::{BsonValue, MapKey};
use crate::{
    codec::EncodeOptions,
    error::ValueError,
    path::{CollectionPath, MapPath, Path, PathTarget, Segment},
    schema::{ContainerKind, TypeRef}
};

impl<T: BsonValue> BsonValue for Option<T> {
    fn type_ref() -> TypeRef {
        TypeRef::Optional(Box::new(T::type_ref()))
    }

    fn to_bson(&self, options: &EncodeOptions) -> Bson {
        self.as_ref()
            .map_or(Bson::Null, |value| value.to_bson(options))
    }

    fn from_bson(value: &Bson) -> Result<Self, ValueError> {
        match value {
            Bson::Null | Bson::Undefined => Ok(None),
            present => T::from_bson(present).map(Some)
        }
    }

    fn absent() -> Option<Self> {
        Some(None)
    }
}

/// Nullable fields are addressed exactly like their inner type.
impl<T: PathTarget> PathTarget for Option<T> {
    const KIND: ContainerKind = T::KIND;
    type Handle<R> = T::Handle<R>;

    fn handle<R>(segments: Vec<Segment>) -> Self::Handle<R> {
        T::handle(segments)
    }
}

impl<T: BsonValue> BsonValue for Box<T> {
    fn type_ref() -> TypeRef {
        T::type_ref()
    }

    fn to_bson(&self, options: &EncodeOptions) -> Bson {
        self.as_ref().to_bson(options)
    }

    fn from_bson(value: &Bson) -> Result<Self, ValueError> {
        T::from_bson(value).map(Box::new)
    }

    fn absent() -> Option<Self> {
        T::absent().map(Box::new)
    }
}

impl<T: PathTarget> PathTarget for Box<T> {
    const KIND: ContainerKind = T::KIND;
    type Handle<R> = T::Handle<R>;

    fn handle<R>(segments: Vec<Segment>) -> Self::Handle<R> {
        T::handle(segments)
    }
}

fn elements<'a>(value: &'a Bson, expected: &TypeRef) -> Result<&'a [Bson], ValueError> {
    match value {
        Bson::Array(items) => Ok(items),
        other => Err(ValueError::mismatch(expected.to_string(), other))
    }
}

fn decode_elements<E: BsonValue, C: FromIterator<E>>(
    value: &Bson,
    expected: &TypeRef
) -> Result<C, ValueError> {
    elements(value, expected)?
        .iter()
        .enumerate()
        .map(|(index, item)| E::from_bson(item).map_err(|error| error.within(index)))
        .collect()
}

macro_rules! sequence_value {
    ($wrap:ident; $($container:ident<E $(: $bound:path)*>),*) => {$(
        impl<E: BsonValue $(+ $bound)*> BsonValue for $container<E> {
            fn type_ref() -> TypeRef {
                TypeRef::$wrap(Box::new(E::type_ref()))
            }

            fn to_bson(&self, options: &EncodeOptions) -> Bson {
                Bson::Array(self.iter().map(|item| item.to_bson(options)).collect())
            }

            fn from_bson(value: &Bson) -> Result<Self, ValueError> {
                decode_elements(value, &Self::type_ref())
            }
        }

        impl<E: BsonValue + PathTarget $(+ $bound)*> PathTarget for $container<E> {
            const KIND: ContainerKind = ContainerKind::Collection;
            type Handle<R> = CollectionPath<R, Self, E>;

            fn handle<R>(segments: Vec<Segment>) -> Self::Handle<R> {
                CollectionPath::from_segments(segments)
            }
        }
    )*};
}

sequence_value!(List; Vec<E>, VecDeque<E>);
sequence_value!(Set; HashSet<E: Eq: Hash>, BTreeSet<E: Ord>);

fn entries<'a>(value: &'a Bson, expected: &TypeRef) -> Result<&'a Document, ValueError> {
    match value {
        Bson::Document(document) => Ok(document),
        other => Err(ValueError::mismatch(expected.to_string(), other))
    }
}

fn decode_entries<K: MapKey, V: BsonValue, M: FromIterator<(K, V)>>(
    value: &Bson,
    expected: &TypeRef
) -> Result<M, ValueError> {
    entries(value, expected)?
        .iter()
        .map(|(key, item)| -> Result<(K, V), ValueError> {
            let parsed = K::from_key(key).map_err(|error| error.within(key))?;
            let decoded = V::from_bson(item).map_err(|error| error.within(key))?;
            Ok((parsed, decoded))
        })
        .collect()
}

fn map_type<K: BsonValue, V: BsonValue>() -> TypeRef {
    TypeRef::Map {
        key:   Box::new(K::type_ref()),
        value: Box::new(V::type_ref())
    }
}

/// Keys are sorted so that the encoded document does not depend on hash
/// iteration order.
impl<K: MapKey + Eq + Hash, V: BsonValue> BsonValue for HashMap<K, V> {
    fn type_ref() -> TypeRef {
        map_type::<K, V>()
    }

    fn to_bson(&self, options: &EncodeOptions) -> Bson {
        let mut rendered: Vec<(String, Bson)> = self
            .iter()
            .map(|(key, value)| (key.to_key(), value.to_bson(options)))
            .collect();
        rendered.sort_by(|left, right| left.0.cmp(&right.0));
        Bson::Document(rendered.into_iter().collect())
    }

    fn from_bson(value: &Bson) -> Result<Self, ValueError> {
        decode_entries(value, &Self::type_ref())
    }
}

impl<K: MapKey + Ord, V: BsonValue> BsonValue for BTreeMap<K, V> {
    fn type_ref() -> TypeRef {
        map_type::<K, V>()
    }

    fn to_bson(&self, options: &EncodeOptions) -> Bson {
        Bson::Document(
            self.iter()
                .map(|(key, value)| (key.to_key(), value.to_bson(options)))
                .collect()
        )
    }

    fn from_bson(value: &Bson) -> Result<Self, ValueError> {
        decode_entries(value, &Self::type_ref())
    }
}

impl<K: MapKey + Eq + Hash + PathTarget, V: BsonValue + PathTarget> PathTarget for HashMap<K, V> {
    const KIND: ContainerKind = ContainerKind::Map;
    type Handle<R> = MapPath<R, Self, K, V>;

    fn handle<R>(segments: Vec<Segment>) -> Self::Handle<R> {
        MapPath::from_segments(segments)
    }
}

impl<K: MapKey + Ord + PathTarget, V: BsonValue + PathTarget> PathTarget for BTreeMap<K, V> {
    const KIND: ContainerKind = ContainerKind::Map;
    type Handle<R> = MapPath<R, Self, K, V>;

    fn handle<R>(segments: Vec<Segment>) -> Self::Handle<R> {
        MapPath::from_segments(segments)
    }
}

const TUPLE_KEYS: [&str; 3] = ["first", "second", "third"];

fn member<T: BsonValue>(document: &Document, key: &str) -> Result<T, ValueError> {
    match document.get(key) {
        Some(value) => T::from_bson(value).map_err(|error| error.within(key)),
        None => T::absent().ok_or_else(|| ValueError::Missing {
            key: key.to_owned()
        })
    }
}

/// Pairs encode as `{ first, second }`.
impl<A: BsonValue, B: BsonValue> BsonValue for (A, B) {
    fn type_ref() -> TypeRef {
        TypeRef::Tuple(vec![A::type_ref(), B::type_ref()])
    }

    fn to_bson(&self, options: &EncodeOptions) -> Bson {
        let mut document = Document::new();
        document.insert(TUPLE_KEYS[0], self.0.to_bson(options));
        document.insert(TUPLE_KEYS[1], self.1.to_bson(options));
        Bson::Document(document)
    }

    fn from_bson(value: &Bson) -> Result<Self, ValueError> {
        let document = entries(value, &Self::type_ref())?;
        Ok((
            member(document, TUPLE_KEYS[0])?,
            member(document, TUPLE_KEYS[1])?
        ))
    }
}

/// Triples encode as `{ first, second, third }`.
impl<A: BsonValue, B: BsonValue, C: BsonValue> BsonValue for (A, B, C) {
    fn type_ref() -> TypeRef {
        TypeRef::Tuple(vec![A::type_ref(), B::type_ref(), C::type_ref()])
    }

    fn to_bson(&self, options: &EncodeOptions) -> Bson {
        let mut document = Document::new();
        document.insert(TUPLE_KEYS[0], self.0.to_bson(options));
        document.insert(TUPLE_KEYS[1], self.1.to_bson(options));
        document.insert(TUPLE_KEYS[2], self.2.to_bson(options));
        Bson::Document(document)
    }

    fn from_bson(value: &Bson) -> Result<Self, ValueError> {
        let document = entries(value, &Self::type_ref())?;
        Ok((
            member(document, TUPLE_KEYS[0])?,
            member(document, TUPLE_KEYS[1])?,
            member(document, TUPLE_KEYS[2])?
        ))
    }
}

impl<A: 'static, B: 'static> PathTarget for (A, B) {
    const KIND: ContainerKind = ContainerKind::Object;
    type Handle<R> = Path<R, Self>;

    fn handle<R>(segments: Vec<Segment>) -> Self::Handle<R> {
        Path::from_segments(segments)
    }
}

impl<A: 'static, B: 'static, C: 'static> PathTarget for (A, B, C) {
    const KIND: ContainerKind = ContainerKind::Object;
    type Handle<R> = Path<R, Self>;

    fn handle<R>(segments: Vec<Segment>) -> Self::Handle<R> {
        Path::from_segments(segments)
    }
}
