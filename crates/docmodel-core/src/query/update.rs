// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Update documents.

use std::{fmt, marker::PhantomData};

use bson::{Bson, Document};

use super::{Filter, entry, operand, operands};
use crate::{
    codec::{DocumentWriter, EncodeOptions},
    document::Document as DocumentType,
    error::{EncodeError, PathError},
    path::{CollectionPath, Path, Positional},
    registry,
    schema::ID_FIELD,
    value::BsonValue
};

/// Update over documents of type `R`.
///
/// Updates are grouped by operator: combining `a.set(1)` with `b.set(2)`
/// yields one `$set` with both paths. When two updates touch the same path
/// under the same operator, the later one wins.
pub struct Update<R> {
    document: Document,
    _root:    PhantomData<fn() -> R>
}

impl<R> Update<R> {
    /// Update that changes nothing.
    #[must_use]
    pub fn empty() -> Self {
        Self::raw(Document::new())
    }

    /// Update over an explicit document.
    #[must_use]
    pub const fn raw(document: Document) -> Self {
        Self {
            document,
            _root: PhantomData
        }
    }

    fn operator(operator: &str, path: String, value: impl Into<Bson>) -> Self {
        Self::raw(entry(operator, entry(path, value)))
    }

    /// Whether the update changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.document.is_empty()
    }

    /// Rendered update document.
    #[must_use]
    pub const fn as_document(&self) -> &Document {
        &self.document
    }

    /// Take the rendered update document.
    #[must_use]
    pub fn into_document(self) -> Document {
        self.document
    }

    /// Merge `other` into this update, grouping by operator.
    #[must_use]
    pub fn combine(mut self, other: Self) -> Self {
        for (operator, changes) in other.document {
            let unmerged = match (self.document.get_mut(&operator), changes) {
                (Some(Bson::Document(existing)), Bson::Document(changes)) => {
                    for (path, value) in changes {
                        existing.insert(path, value);
                    }
                    None
                }
                (_, changes) => Some(changes)
            };
            if let Some(changes) = unmerged {
                self.document.insert(operator, changes);
            }
        }
        self
    }

    /// Merge every update in order.
    #[must_use]
    pub fn combine_all(updates: impl IntoIterator<Item = Self>) -> Self {
        updates.into_iter().fold(Self::empty(), Self::combine)
    }
}

impl<R: DocumentType> Update<R> {
    /// `$set` of every field of `value` except the identifier.
    ///
    /// Absent optional fields follow the null policy: skipped by default,
    /// set to null when nulls are serialized.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::Schema`] when the schema of `R` is invalid.
    pub fn replace_fields(value: &R) -> Result<Self, EncodeError> {
        let schema = registry::resolve::<R>()?;
        let options = EncodeOptions::current();
        let mut writer = DocumentWriter::nested(R::class_name(), &options);
        value.write_fields(&mut writer);
        let mut fields = writer.into_document();
        let identifier = schema.identifier().map_or(ID_FIELD, |field| field.name());
        fields.remove(identifier);
        Ok(Self::raw(entry("$set", fields)))
    }
}

impl<R> Clone for Update<R> {
    fn clone(&self) -> Self {
        Self::raw(self.document.clone())
    }
}

impl<R> PartialEq for Update<R> {
    fn eq(&self, other: &Self) -> bool {
        self.document == other.document
    }
}

impl<R> fmt::Debug for Update<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Update").field(&self.document).finish()
    }
}

impl<R> fmt::Display for Update<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.document.fmt(f)
    }
}

impl<R> Default for Update<R> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<R> From<Update<R>> for Document {
    fn from(update: Update<R>) -> Self {
        update.document
    }
}

/// Field update operators.
impl<R, T: BsonValue> Path<R, T> {
    /// `{ $set: { path: value } }`
    #[must_use]
    pub fn set(&self, value: impl Into<T>) -> Update<R> {
        Update::operator("$set", self.render(), operand(&value.into()))
    }

    /// `{ $set: { path: null } }`
    #[must_use]
    pub fn set_null(&self) -> Update<R> {
        Update::operator("$set", self.render(), Bson::Null)
    }

    /// `{ $set: { "lines.$.qty": value } }` with the matcher inserted after
    /// the first array segment.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::NotPositional`] when the path crosses no array.
    pub fn set_positional(
        &self,
        positional: &Positional,
        value: impl Into<T>
    ) -> Result<Update<R>, PathError> {
        let path = self.render_positional(positional)?;
        Ok(Update::operator("$set", path, operand(&value.into())))
    }

    /// `{ $setOnInsert: { path: value } }`
    #[must_use]
    pub fn set_on_insert(&self, value: impl Into<T>) -> Update<R> {
        Update::operator("$setOnInsert", self.render(), operand(&value.into()))
    }

    /// `{ $unset: { path: "" } }`
    #[must_use]
    pub fn unset(&self) -> Update<R> {
        Update::operator("$unset", self.render(), "")
    }

    /// `{ $rename: { path: to } }`
    #[must_use]
    pub fn rename(&self, to: &str) -> Update<R> {
        Update::operator("$rename", self.render(), to)
    }

    /// `{ $inc: { path: amount } }`
    #[must_use]
    pub fn inc(&self, amount: impl Into<T>) -> Update<R> {
        Update::operator("$inc", self.render(), operand(&amount.into()))
    }

    /// `{ $mul: { path: factor } }`
    #[must_use]
    pub fn mul(&self, factor: impl Into<T>) -> Update<R> {
        Update::operator("$mul", self.render(), operand(&factor.into()))
    }

    /// `{ $min: { path: value } }`
    #[must_use]
    pub fn min(&self, value: impl Into<T>) -> Update<R> {
        Update::operator("$min", self.render(), operand(&value.into()))
    }

    /// `{ $max: { path: value } }`
    #[must_use]
    pub fn max(&self, value: impl Into<T>) -> Update<R> {
        Update::operator("$max", self.render(), operand(&value.into()))
    }

    /// `{ $currentDate: { path: true } }`
    #[must_use]
    pub fn current_date(&self) -> Update<R> {
        Update::operator("$currentDate", self.render(), true)
    }
}

/// Array update operators.
impl<R, C, E: BsonValue> CollectionPath<R, C, E> {
    /// `{ $push: { path: item } }`
    #[must_use]
    pub fn push(&self, item: impl Into<E>) -> Update<R> {
        Update::operator("$push", self.render(), operand(&item.into()))
    }

    /// `{ $push: { path: { $each: [items] } } }`
    #[must_use]
    pub fn push_each<V: Into<E>>(&self, items: impl IntoIterator<Item = V>) -> Update<R> {
        Update::operator("$push", self.render(), entry("$each", operands::<E, V>(items)))
    }

    /// `{ $addToSet: { path: item } }`
    #[must_use]
    pub fn add_to_set(&self, item: impl Into<E>) -> Update<R> {
        Update::operator("$addToSet", self.render(), operand(&item.into()))
    }

    /// `{ $addToSet: { path: { $each: [items] } } }`
    #[must_use]
    pub fn add_each_to_set<V: Into<E>>(&self, items: impl IntoIterator<Item = V>) -> Update<R> {
        Update::operator("$addToSet", self.render(), entry("$each", operands::<E, V>(items)))
    }

    /// `{ $pull: { path: item } }`
    #[must_use]
    pub fn pull(&self, item: impl Into<E>) -> Update<R> {
        Update::operator("$pull", self.render(), operand(&item.into()))
    }

    /// `{ $pull: { path: filter } }`, removing elements matching an
    /// element-rooted filter.
    #[must_use]
    pub fn pull_where(&self, filter: Filter<E>) -> Update<R> {
        Update::operator("$pull", self.render(), filter.into_document())
    }

    /// `{ $pullAll: { path: [items] } }`
    #[must_use]
    pub fn pull_all<V: Into<E>>(&self, items: impl IntoIterator<Item = V>) -> Update<R> {
        Update::operator("$pullAll", self.render(), operands::<E, V>(items))
    }

    /// `{ $pop: { path: -1 } }`
    #[must_use]
    pub fn pop_first(&self) -> Update<R> {
        Update::operator("$pop", self.render(), -1)
    }

    /// `{ $pop: { path: 1 } }`
    #[must_use]
    pub fn pop_last(&self) -> Update<R> {
        Update::operator("$pop", self.render(), 1)
    }
}

#[cfg(test)]
mod tests {
    use bson::{doc, oid::ObjectId};

    use super::*;
    use crate::{
        fixtures::{Address, Line, Order, Shop},
        path::fields
    };

    #[test]
    fn same_operator_groups() {
        let shop = fields::<Shop>();
        let update = shop
            .name()
            .set("Acme")
            .combine(shop.address().fields().city().set("Oslo"))
            .combine(shop.tags().push("new"));
        assert_eq!(
            update.into_document(),
            doc! {
                "$set": { "name": "Acme", "address.city": "Oslo" },
                "$push": { "tags": "new" }
            }
        );
    }

    #[test]
    fn later_value_wins() {
        let name = fields::<Shop>().name();
        let update = Update::combine_all([name.set("a"), name.set("b")]);
        assert_eq!(update.into_document(), doc! { "$set": { "name": "b" } });
    }

    #[test]
    fn positional_set() {
        let qty = fields::<Order>().lines().fields().qty();
        let update = qty.set_positional(&Positional::First, 4).unwrap();
        assert_eq!(update.into_document(), doc! { "$set": { "lines.$.qty": 4 } });
        assert!(matches!(
            fields::<Shop>().name().set_positional(&Positional::All, "x"),
            Err(PathError::NotPositional { .. })
        ));
    }

    #[test]
    fn array_operators() {
        let lines = fields::<Order>().lines();
        let line = fields::<Line>();
        assert_eq!(
            lines.pull_where(line.qty().lt(1)).into_document(),
            doc! { "$pull": { "lines": { "qty": { "$lt": 1 } } } }
        );
        assert_eq!(lines.pop_first().into_document(), doc! { "$pop": { "lines": -1 } });
        assert_eq!(
            fields::<Shop>().tags().add_each_to_set(["a", "b"]).into_document(),
            doc! { "$addToSet": { "tags": { "$each": ["a", "b"] } } }
        );
    }

    #[test]
    fn embedded_values_encode_as_documents() {
        let update = fields::<Shop>().address().set(Address {
            city: "Oslo".into(),
            zip:  None
        });
        assert_eq!(update.into_document(), doc! { "$set": { "address": { "city": "Oslo" } } });
    }

    #[test]
    fn replace_fields_skips_identifier() {
        let shop = Shop {
            id:      Some(ObjectId::new()),
            name:    "Acme".into(),
            address: Address {
                city: "Oslo".into(),
                zip:  None
            },
            tags:    vec![]
        };
        let update = Update::replace_fields(&shop).unwrap();
        assert_eq!(
            update.into_document(),
            doc! { "$set": { "name": "Acme", "address": { "city": "Oslo" }, "tags": [] } }
        );
    }

    #[test]
    fn map_values_update_by_key() {
        let order = fields::<Order>();
        let update = order.stock().key(&"bolts".to_owned()).inc(5);
        assert_eq!(update.into_document(), doc! { "$inc": { "stock.bolts": 5 } });
    }
}
