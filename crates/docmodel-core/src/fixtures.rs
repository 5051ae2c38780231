// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Hand-written document types for unit tests.
//!
//! The implementations mirror what `#[derive(Document)]` emits, since the
//! derive cannot be used inside this crate.

#![allow(dead_code)]

use std::{collections::HashMap, marker::PhantomData};

use bson::{Bson, oid::ObjectId};

use crate::{
    codec::{self, DocumentCodec, DocumentReader, DocumentWriter, EncodeOptions},
    document::Document,
    error::{DecodeError, IdError, SchemaError, ValueError},
    id::{self, Id},
    path::{FieldSet, ObjectPath, PathTarget, Segment, descend},
    registry,
    schema::{ClassRef, ContainerKind, FieldDescriptor, SchemaBuilder, TypeRef},
    value::BsonValue
};

macro_rules! embeddable {
    ($($name:ident),*) => {$(
        impl BsonValue for $name {
            fn type_ref() -> TypeRef {
                TypeRef::Object(ClassRef::of::<Self>())
            }

            fn to_bson(&self, options: &EncodeOptions) -> Bson {
                codec::embed(self, options)
            }

            fn from_bson(value: &Bson) -> Result<Self, ValueError> {
                codec::embedded(value)
            }
        }

        impl PathTarget for $name {
            const KIND: ContainerKind = ContainerKind::Object;
            type Handle<R> = ObjectPath<R, Self>;

            fn handle<R>(segments: Vec<Segment>) -> Self::Handle<R> {
                ObjectPath::from_segments(segments)
            }
        }
    )*};
}

macro_rules! field_set {
    ($fields:ident, $owner:ident) => {
        pub struct $fields<R> {
            prefix: Vec<Segment>,
            _root:  PhantomData<fn() -> R>
        }

        impl<R> FieldSet<R> for $fields<R> {
            type Owner = $owner;

            fn at(prefix: Vec<Segment>) -> Self {
                Self {
                    prefix,
                    _root: PhantomData
                }
            }

            fn prefix(&self) -> &[Segment] {
                &self.prefix
            }
        }
    };
}

#[derive(Debug, Clone, PartialEq)]
pub struct Address {
    pub city: String,
    pub zip:  Option<String>
}

field_set!(AddressFields, Address);

impl<R> AddressFields<R> {
    pub fn city(&self) -> <String as PathTarget>::Handle<R> {
        descend::<String, R>(&self.prefix, "city")
    }
}

impl Document for Address {
    type Fields<R> = AddressFields<R>;

    fn describe() -> SchemaBuilder {
        SchemaBuilder::new("Address")
            .field(FieldDescriptor::of::<String>("city", "city"))
            .field(FieldDescriptor::of::<Option<String>>("zip", "zip"))
    }
}

impl DocumentCodec for Address {
    fn class_name() -> &'static str {
        "Address"
    }

    fn ensure_schema() -> Result<(), SchemaError> {
        registry::resolve::<Self>().map(drop)
    }

    fn write_fields(&self, writer: &mut DocumentWriter<'_>) {
        writer.field("city", &self.city);
        writer.field("zip", &self.zip);
    }

    fn read_fields(reader: &DocumentReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            city: reader.field("city")?,
            zip:  reader.field("zip")?
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Shop {
    pub id:      Option<ObjectId>,
    pub name:    String,
    pub address: Address,
    pub tags:    Vec<String>
}

field_set!(ShopFields, Shop);

impl<R> ShopFields<R> {
    pub fn id(&self) -> <Option<ObjectId> as PathTarget>::Handle<R> {
        descend::<Option<ObjectId>, R>(&self.prefix, "_id")
    }

    pub fn name(&self) -> <String as PathTarget>::Handle<R> {
        descend::<String, R>(&self.prefix, "name")
    }

    pub fn address(&self) -> <Address as PathTarget>::Handle<R> {
        descend::<Address, R>(&self.prefix, "address")
    }

    pub fn tags(&self) -> <Vec<String> as PathTarget>::Handle<R> {
        descend::<Vec<String>, R>(&self.prefix, "tags")
    }
}

impl Document for Shop {
    type Fields<R> = ShopFields<R>;

    fn describe() -> SchemaBuilder {
        SchemaBuilder::new("Shop")
            .collection("shops")
            .field(FieldDescriptor::of::<Option<ObjectId>>("id", "_id").identifier())
            .field(FieldDescriptor::of::<String>("name", "name"))
            .field(FieldDescriptor::of::<Address>("address", "address"))
            .field(FieldDescriptor::of::<Vec<String>>("tags", "tags"))
    }
}

impl DocumentCodec for Shop {
    fn class_name() -> &'static str {
        "Shop"
    }

    fn ensure_schema() -> Result<(), SchemaError> {
        registry::resolve::<Self>().map(drop)
    }

    fn write_fields(&self, writer: &mut DocumentWriter<'_>) {
        writer.identifier("_id", self.id.as_ref());
        writer.field("name", &self.name);
        writer.field("address", &self.address);
        writer.field("tags", &self.tags);
    }

    fn read_fields(reader: &DocumentReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            id:      reader.field("_id")?,
            name:    reader.field("name")?,
            address: reader.field("address")?,
            tags:    reader.field("tags")?
        })
    }

    fn assign_identifier(&mut self, value: &Bson) -> Result<(), IdError> {
        self.id = Some(id::assign(value)?);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub sku: String,
    pub qty: i32
}

field_set!(LineFields, Line);

impl<R> LineFields<R> {
    pub fn sku(&self) -> <String as PathTarget>::Handle<R> {
        descend::<String, R>(&self.prefix, "sku")
    }

    pub fn qty(&self) -> <i32 as PathTarget>::Handle<R> {
        descend::<i32, R>(&self.prefix, "qty")
    }
}

impl Document for Line {
    type Fields<R> = LineFields<R>;

    fn describe() -> SchemaBuilder {
        SchemaBuilder::new("Line")
            .field(FieldDescriptor::of::<String>("sku", "sku"))
            .field(FieldDescriptor::of::<i32>("qty", "qty"))
    }
}

impl DocumentCodec for Line {
    fn class_name() -> &'static str {
        "Line"
    }

    fn ensure_schema() -> Result<(), SchemaError> {
        registry::resolve::<Self>().map(drop)
    }

    fn write_fields(&self, writer: &mut DocumentWriter<'_>) {
        writer.field("sku", &self.sku);
        writer.field("qty", &self.qty);
    }

    fn read_fields(reader: &DocumentReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            sku: reader.field("sku")?,
            qty: reader.field("qty")?
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id:    Option<Id<Order>>,
    pub lines: Vec<Line>,
    pub stock: HashMap<String, i32>
}

field_set!(OrderFields, Order);

impl<R> OrderFields<R> {
    pub fn id(&self) -> <Option<Id<Order>> as PathTarget>::Handle<R> {
        descend::<Option<Id<Order>>, R>(&self.prefix, "_id")
    }

    pub fn lines(&self) -> <Vec<Line> as PathTarget>::Handle<R> {
        descend::<Vec<Line>, R>(&self.prefix, "lines")
    }

    pub fn stock(&self) -> <HashMap<String, i32> as PathTarget>::Handle<R> {
        descend::<HashMap<String, i32>, R>(&self.prefix, "stock")
    }
}

impl Document for Order {
    type Fields<R> = OrderFields<R>;

    fn describe() -> SchemaBuilder {
        SchemaBuilder::new("Order")
            .field(FieldDescriptor::of::<Option<Id<Order>>>("id", "_id").identifier())
            .field(FieldDescriptor::of::<Vec<Line>>("lines", "lines"))
            .field(FieldDescriptor::of::<HashMap<String, i32>>("stock", "stock"))
    }
}

impl DocumentCodec for Order {
    fn class_name() -> &'static str {
        "Order"
    }

    fn ensure_schema() -> Result<(), SchemaError> {
        registry::resolve::<Self>().map(drop)
    }

    fn write_fields(&self, writer: &mut DocumentWriter<'_>) {
        writer.identifier("_id", self.id.as_ref());
        writer.field("lines", &self.lines);
        writer.field("stock", &self.stock);
    }

    fn read_fields(reader: &DocumentReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            id:    reader.field("_id")?,
            lines: reader.field("lines")?,
            stock: reader.field("stock")?
        })
    }

    fn assign_identifier(&mut self, value: &Bson) -> Result<(), IdError> {
        self.id = Some(id::assign(value)?);
        Ok(())
    }
}

embeddable!(Address, Shop, Line, Order);
