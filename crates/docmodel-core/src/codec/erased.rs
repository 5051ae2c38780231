// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Type-erased codecs for transport-layer lookup.
//!
//! A driver that resolves codecs at runtime holds a [`CodecRegistry`] and
//! asks it for the codec of a value's type or of a class name. Values cross
//! the boundary as `dyn Any`.

use std::{
    any::{Any, TypeId, type_name},
    collections::HashMap,
    fmt,
    marker::PhantomData,
    sync::Arc
};

use bson::Document;
use tracing::debug;

use super::{Encoded, decode, encode};
use crate::{
    document::Document as DocumentType,
    error::{DecodeError, EncodeError, SchemaError},
    registry
};

/// Codec of one document type, addressed without its static type.
pub trait ErasedCodec: Send + Sync {
    /// Class name of the encoded type.
    fn class_name(&self) -> &'static str;

    /// Rust type identity of the encoded type.
    fn value_type(&self) -> TypeId;

    /// Encode a value of the registered type.
    ///
    /// # Errors
    ///
    /// [`EncodeError::WrongType`] when `value` has another type, then the
    /// errors of [`encode`].
    fn encode_any(&self, value: &dyn Any) -> Result<Encoded, EncodeError>;

    /// Decode into a boxed value of the registered type.
    ///
    /// # Errors
    ///
    /// The errors of [`decode`].
    fn decode_any(&self, document: &Document) -> Result<Box<dyn Any + Send>, DecodeError>;
}

struct Erased<T> {
    _type: PhantomData<fn() -> T>
}

impl<T: DocumentType + Send> ErasedCodec for Erased<T> {
    fn class_name(&self) -> &'static str {
        T::class_name()
    }

    fn value_type(&self) -> TypeId {
        TypeId::of::<T>()
    }

    fn encode_any(&self, value: &dyn Any) -> Result<Encoded, EncodeError> {
        let value = value.downcast_ref::<T>().ok_or_else(|| EncodeError::WrongType {
            expected: T::class_name().to_owned()
        })?;
        encode(value)
    }

    fn decode_any(&self, document: &Document) -> Result<Box<dyn Any + Send>, DecodeError> {
        Ok(Box::new(decode::<T>(document)?))
    }
}

/// Codecs keyed by type identity and by class name.
///
/// # Example
///
/// ```rust,ignore
/// let mut codecs = CodecRegistry::new();
/// codecs.register::<Shop>()?.register::<Order>()?;
///
/// let encoded = codecs.encode_any(&shop)?;
/// let back = codecs.decode_any("Shop", encoded.document())?;
/// assert!(back.downcast_ref::<Shop>().is_some());
/// ```
#[derive(Default, Clone)]
pub struct CodecRegistry {
    by_type: HashMap<TypeId, Arc<dyn ErasedCodec>>,
    by_name: HashMap<&'static str, Arc<dyn ErasedCodec>>
}

impl CodecRegistry {
    /// Empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the codec of `T`, resolving its schema first.
    ///
    /// Registering a type twice replaces nothing: the first codec stays.
    ///
    /// # Errors
    ///
    /// Returns the type's [`SchemaError`].
    pub fn register<T: DocumentType + Send>(&mut self) -> Result<&mut Self, SchemaError> {
        registry::resolve::<T>()?;
        let codec: Arc<dyn ErasedCodec> = Arc::new(Erased::<T> {
            _type: PhantomData
        });
        if !self.by_type.contains_key(&TypeId::of::<T>()) {
            debug!(class = T::class_name(), "codec registered");
            self.by_type.insert(TypeId::of::<T>(), Arc::clone(&codec));
            self.by_name.entry(T::class_name()).or_insert(codec);
        }
        Ok(self)
    }

    /// Codec of the type identified by `id`.
    #[must_use]
    pub fn by_type(&self, id: TypeId) -> Option<&dyn ErasedCodec> {
        self.by_type.get(&id).map(|codec| &**codec)
    }

    /// Codec of `T`.
    #[must_use]
    pub fn get<T: 'static>(&self) -> Option<&dyn ErasedCodec> {
        self.by_type(TypeId::of::<T>())
    }

    /// Codec registered under class name `class`.
    #[must_use]
    pub fn by_name(&self, class: &str) -> Option<&dyn ErasedCodec> {
        self.by_name.get(class).map(|codec| &**codec)
    }

    /// Number of registered codecs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_type.len()
    }

    /// Whether nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_type.is_empty()
    }

    /// Encode a value of any registered type.
    ///
    /// # Errors
    ///
    /// [`EncodeError::Unregistered`] when the value's type has no codec, then
    /// the errors of [`encode`].
    pub fn encode_any<T: Any>(&self, value: &T) -> Result<Encoded, EncodeError> {
        self.get::<T>()
            .ok_or_else(|| EncodeError::Unregistered {
                type_name: type_name::<T>().to_owned()
            })?
            .encode_any(value)
    }

    /// Decode a document of the class named `class`.
    ///
    /// # Errors
    ///
    /// [`DecodeError::Unregistered`] when no codec is registered under
    /// `class`, then the errors of [`decode`].
    pub fn decode_any(
        &self,
        class: &str,
        document: &Document
    ) -> Result<Box<dyn Any + Send>, DecodeError> {
        self.by_name(class)
            .ok_or_else(|| DecodeError::Unregistered {
                class: class.to_owned()
            })?
            .decode_any(document)
    }
}

impl fmt::Debug for CodecRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut classes: Vec<&str> = self.by_name.keys().copied().collect();
        classes.sort_unstable();
        f.debug_struct("CodecRegistry")
            .field("classes", &classes)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use bson::doc;

    use super::*;
    use crate::fixtures::{Address, Shop};

    fn registry() -> CodecRegistry {
        let mut codecs = CodecRegistry::new();
        codecs.register::<Shop>().unwrap().register::<Address>().unwrap();
        codecs
    }

    #[test]
    fn lookup_by_type_and_name() {
        let codecs = registry();
        assert_eq!(codecs.len(), 2);
        assert_eq!(codecs.get::<Shop>().map(ErasedCodec::class_name), Some("Shop"));
        assert_eq!(
            codecs.by_name("Address").map(ErasedCodec::value_type),
            Some(TypeId::of::<Address>())
        );
    }

    #[test]
    fn registering_twice_keeps_one_codec() {
        let mut codecs = registry();
        codecs.register::<Shop>().unwrap();
        assert_eq!(codecs.len(), 2);
    }

    #[test]
    fn decode_any_boxes_the_registered_type() {
        let codecs = registry();
        let value = codecs
            .decode_any("Address", &doc! { "city": "Oslo" })
            .unwrap();
        let address = value.downcast_ref::<Address>().unwrap();
        assert_eq!(address.city, "Oslo");
    }

    #[test]
    fn encode_any_rejects_unregistered_types() {
        let codecs = registry();
        assert!(matches!(
            codecs.encode_any(&42_i32),
            Err(EncodeError::Unregistered { .. })
        ));
    }

    #[test]
    fn erased_codec_rejects_other_types() {
        let codecs = registry();
        let codec = codecs.get::<Shop>().unwrap();
        let address = Address {
            city: "Oslo".into(),
            zip:  None
        };
        assert!(matches!(
            codec.encode_any(&address),
            Err(EncodeError::WrongType { .. })
        ));
    }

    #[test]
    fn unknown_class_is_unregistered() {
        assert!(matches!(
            registry().decode_any("Nowhere", &doc! {}),
            Err(DecodeError::Unregistered { .. })
        ));
    }
}
