// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Process-wide class schema registry.
//!
//! Schemas are built on first use and cached for the life of the process.
//! The cache is keyed by [`TypeId`], so every monomorphized generic
//! (`Page<Shop>`, `Page<Order>`) owns its own schema. A secondary index by
//! class name serves [`TypeRef::Named`](crate::schema::TypeRef::Named)
//! references and runtime-registered schemas.
//!
//! # Concurrency
//!
//! Schemas are built outside the lock, so building a type whose bases must
//! also be resolved never deadlocks. Two threads racing on the first
//! resolution may both build; the first insert wins and every caller receives
//! that same `Arc`. Failed builds are cached as well and are never retried.

use std::{
    any::TypeId,
    collections::HashMap,
    sync::{Arc, LazyLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard}
};

use tracing::{debug, warn};

use crate::{document::Document, error::SchemaError, schema::ClassSchema};

type Slot = Result<Arc<ClassSchema>, SchemaError>;

static BY_TYPE: LazyLock<RwLock<HashMap<TypeId, Slot>>> = LazyLock::new(RwLock::default);

static BY_NAME: LazyLock<RwLock<HashMap<String, Arc<ClassSchema>>>> =
    LazyLock::new(RwLock::default);

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

/// Resolve the schema of `D`, building it on first use.
///
/// # Errors
///
/// Returns the [`SchemaError`] of the first build attempt.
///
/// # Example
///
/// ```rust,ignore
/// let schema = registry::resolve::<Shop>()?;
/// assert_eq!(schema.field_names(), ["_id", "name"]);
/// ```
pub fn resolve<D: Document>() -> Result<Arc<ClassSchema>, SchemaError> {
    let key = TypeId::of::<D>();
    if let Some(slot) = read(&BY_TYPE).get(&key) {
        return slot.clone();
    }

    let built = D::describe().build().map(Arc::new);
    match &built {
        Ok(schema) => debug!(
            class = schema.class_name(),
            fields = schema.len(),
            "class schema built"
        ),
        Err(error) => warn!(class = D::class_name(), %error, "class schema rejected")
    }

    let slot = write(&BY_TYPE).entry(key).or_insert(built).clone();
    if let Ok(schema) = &slot {
        write(&BY_NAME)
            .entry(schema.class_name().to_owned())
            .or_insert_with(|| Arc::clone(schema));
    }
    slot
}

/// Register a schema built at runtime.
///
/// Registration is keyed by class name. Registering a name twice keeps the
/// first schema and returns it.
///
/// # Errors
///
/// Returns [`SchemaError::UnencodableField`] when a field references a
/// [`TypeRef::Named`](crate::schema::TypeRef::Named) class that is neither
/// registered nor the schema itself.
pub fn register(schema: ClassSchema) -> Result<Arc<ClassSchema>, SchemaError> {
    for field in schema.fields() {
        let mut names = Vec::new();
        field.declared_type().named_references(&mut names);
        if let Some(missing) = names
            .into_iter()
            .find(|name| *name != schema.class_name() && resolve_named(name).is_none())
        {
            return Err(SchemaError::UnencodableField {
                class:     schema.class_name().to_owned(),
                field:     field.name().to_owned(),
                type_name: missing.to_owned()
            });
        }
    }

    let mut index = write(&BY_NAME);
    let stored = index
        .entry(schema.class_name().to_owned())
        .or_insert_with(|| {
            debug!(
                class = schema.class_name(),
                fields = schema.len(),
                "runtime schema registered"
            );
            Arc::new(schema)
        });
    Ok(Arc::clone(stored))
}

/// Find a resolved or registered schema by class name.
#[must_use]
pub fn resolve_named(name: &str) -> Option<Arc<ClassSchema>> {
    read(&BY_NAME).get(name).cloned()
}

#[cfg(test)]
mod tests {
    use bson::doc;

    use super::*;
    use crate::schema::{FieldDescriptor, SchemaBuilder, TypeRef};

    #[test]
    fn runtime_schema_is_found_by_name() {
        let schema = SchemaBuilder::new("RegistryTestLine")
            .field(FieldDescriptor::of::<String>("sku", "sku"))
            .build()
            .unwrap();
        let stored = register(schema).unwrap();
        let found = resolve_named("RegistryTestLine").unwrap();
        assert!(Arc::ptr_eq(&stored, &found));
    }

    #[test]
    fn unknown_named_reference_is_unencodable() {
        let schema = SchemaBuilder::new("RegistryTestOrder")
            .field(FieldDescriptor::new(
                "lines",
                "lines",
                TypeRef::List(Box::new(TypeRef::Named("RegistryTestNowhere".into())))
            ))
            .build()
            .unwrap();
        let error = register(schema).unwrap_err();
        assert!(matches!(
            error,
            SchemaError::UnencodableField { ref type_name, .. } if type_name == "RegistryTestNowhere"
        ));
    }

    #[test]
    fn named_references_validate_nested_documents() {
        register(
            SchemaBuilder::new("RegistryTestItem")
                .field(FieldDescriptor::of::<i64>("qty", "qty"))
                .build()
                .unwrap()
        )
        .unwrap();
        let cart = register(
            SchemaBuilder::new("RegistryTestCart")
                .field(FieldDescriptor::new(
                    "items",
                    "items",
                    TypeRef::List(Box::new(TypeRef::Named("RegistryTestItem".into())))
                ))
                .build()
                .unwrap()
        )
        .unwrap();

        assert!(cart.validate(&doc! { "items": [{ "qty": 1 }] }).is_ok());
        assert!(cart.validate(&doc! { "items": [{ "qty": "one" }] }).is_err());
    }

    #[test]
    fn self_reference_is_allowed() {
        let schema = SchemaBuilder::new("RegistryTestNode")
            .field(FieldDescriptor::new(
                "children",
                "children",
                TypeRef::List(Box::new(TypeRef::Named("RegistryTestNode".into())))
            ))
            .build()
            .unwrap();
        assert!(register(schema).is_ok());
    }
}
