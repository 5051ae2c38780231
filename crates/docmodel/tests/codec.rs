// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Encoding and decoding of derived documents.

mod common;

use bson::{Bson, doc, oid::ObjectId};
use common::{Address, Audit, Card, Invoice, Line, Order, Payment, Status, Transfer, order};
use docmodel::{
    DecodeError, Document, decode,
    codec::{self, EncodeOptions, decode_bson, encode_with},
    encode, encode_mut,
    value::{BsonValue, MapKey}
};

fn encoded_order() -> bson::Document {
    encode(&order()).unwrap().into_document()
}

#[test]
fn order_round_trips() {
    let mut value = order();
    let document = encode_mut(&mut value).unwrap();
    assert!(value.id.is_some());
    assert_eq!(decode::<Order>(&document).unwrap(), value);
}

#[test]
fn keys_follow_schema_order() {
    let document = encoded_order();
    let keys: Vec<&str> = document.keys().map(String::as_str).collect();
    assert_eq!(
        keys,
        [
            "createdBy", "revision", "_id", "address", "lines", "status", "stock", "byStatus",
            "labels", "priority", "notes"
        ]
    );
    let schema = docmodel::registry::resolve::<Order>().unwrap();
    assert_eq!(schema.field_names(), keys);
}

#[test]
fn nested_values_use_their_own_codecs() {
    let document = encoded_order();
    assert_eq!(
        document.get_document("address").unwrap(),
        &doc! { "city": "Lyon", "zip": "69001" }
    );
    assert_eq!(
        document.get_array("lines").unwrap(),
        &vec![
            Bson::Document(doc! { "sku": "bolt", "qty": 2 }),
            Bson::Document(doc! { "sku": "nut", "qty": 10 }),
        ]
    );
    assert_eq!(document.get_str("status").unwrap(), "on_hold");
    let by_status = document.get_document("byStatus").unwrap();
    assert_eq!(by_status.get_i32("open").unwrap(), 1);
    assert_eq!(by_status.get_i32("done").unwrap(), 4);
    assert_eq!(document.get_document("stock").unwrap(), &doc! { "bolt": 40 });
}

#[test]
fn skipped_fields_are_neither_written_nor_read() {
    let mut value = order();
    value.cached = Some("stale".into());
    let document = encode(&value).unwrap().into_document();
    assert!(!document.contains_key("cached"));
    assert_eq!(decode::<Order>(&document).unwrap().cached, None);
}

#[test]
fn absent_optional_fields_are_omitted() {
    let address = Address {
        city: "Lyon".into(),
        zip:  None
    };
    let encoded = address.to_bson(&EncodeOptions::default());
    assert_eq!(encoded, Bson::Document(doc! { "city": "Lyon" }));

    let with_nulls = address.to_bson(&EncodeOptions::default().with_serialize_nulls(true));
    assert_eq!(with_nulls, Bson::Document(doc! { "city": "Lyon", "zip": Bson::Null }));
}

#[test]
fn defaults_fill_missing_fields() {
    let mut document = encoded_order();
    document.remove("priority");
    document.remove("notes");
    let decoded: Order = decode(&document).unwrap();
    assert_eq!(decoded.priority, 3);
    assert!(decoded.notes.is_empty());

    document.insert("priority", Bson::Null);
    assert_eq!(decode::<Order>(&document).unwrap().priority, 3);
}

#[test]
fn missing_required_field_is_named() {
    let mut document = encoded_order();
    document.remove("address");
    assert_eq!(
        decode::<Order>(&document).unwrap_err(),
        DecodeError::MissingField {
            class: "Order".into(),
            field: "address".into()
        }
    );
}

#[test]
fn nested_failures_carry_the_dotted_path() {
    let mut document = encoded_order();
    document.insert("address", doc! { "city": 5 });
    let error = decode::<Order>(&document).unwrap_err();
    assert!(matches!(
        error,
        DecodeError::TypeMismatch { ref class, ref field, ref expected, actual: "int", .. }
            if class == "Order" && field == "address.city" && expected == "string"
    ));

    let mut document = encoded_order();
    document.insert(
        "lines",
        vec![Bson::Document(doc! { "sku": "bolt", "qty": 1 }), Bson::Document(doc! { "sku": "nut" })]
    );
    assert_eq!(
        decode::<Order>(&document).unwrap_err(),
        DecodeError::MissingField {
            class: "Order".into(),
            field: "lines.1.qty".into()
        }
    );
}

#[test]
fn declared_conversions_apply() {
    let line: Line = decode(&doc! { "sku": "bolt", "qty": 4_i64 }).unwrap();
    assert_eq!(line.qty, 4);
    let line: Line = decode(&doc! { "sku": "bolt", "qty": 4.0 }).unwrap();
    assert_eq!(line.qty, 4);
    assert!(matches!(
        decode::<Line>(&doc! { "sku": "bolt", "qty": 4.5 }),
        Err(DecodeError::TypeMismatch { .. })
    ));
    assert!(matches!(
        decode::<Line>(&doc! { "sku": "bolt", "qty": i64::from(i32::MAX) + 1 }),
        Err(DecodeError::TypeMismatch { .. })
    ));
}

#[test]
fn identifier_from_string_hex() {
    let mut document = encoded_order();
    let id = ObjectId::new();
    document.insert("_id", id.to_hex());
    assert_eq!(decode::<Order>(&document).unwrap().id, Some(id));
}

#[test]
fn unknown_fields_and_order_are_ignored() {
    let line: Line = decode(&doc! { "extra": true, "qty": 1, "sku": "bolt" }).unwrap();
    assert_eq!(
        line,
        Line {
            sku: "bolt".into(),
            qty: 1
        }
    );
}

#[test]
fn flattened_base_is_inline() {
    let document = encoded_order();
    assert_eq!(document.get_str("createdBy").unwrap(), "ops");
    assert_eq!(document.get_i64("revision").unwrap(), 7);
    assert!(!document.contains_key("audit"));

    let schema = docmodel::registry::resolve::<Order>().unwrap();
    let created = schema.lookup("createdBy").unwrap();
    assert_eq!(created.inherited_from(), Some("Audit"));
    assert_eq!(decode::<Order>(&document).unwrap().audit, Audit {
        created_by: "ops".into(),
        revision:   7
    });
}

#[test]
fn unit_enums_encode_as_names() {
    let options = EncodeOptions::default();
    assert_eq!(Status::Closed.to_bson(&options), Bson::String("done".into()));
    assert_eq!(Status::from_bson(&Bson::String("on_hold".into())).unwrap(), Status::OnHold);
    assert_eq!(Status::Open.to_key(), "open");
    assert_eq!(Status::from_key("done").unwrap(), Status::Closed);

    let mut document = encoded_order();
    document.insert("status", "lost");
    assert!(matches!(
        decode::<Order>(&document).unwrap_err(),
        DecodeError::UnknownVariant { ref field, ref variant, .. }
            if field == "status" && variant == "lost"
    ));
}

#[test]
fn tagged_enums_carry_a_discriminator() {
    let invoice = Invoice {
        id:       Some("inv-1".into()),
        payment:  Payment::BankTransfer(Transfer {
            iban:      "FR76".into(),
            reference: None
        }),
        payments: vec![Payment::Card(Card {
            last4: "4242".into()
        })]
    };
    let document = encode(&invoice).unwrap().into_document();
    assert_eq!(
        document,
        doc! {
            "_id": "inv-1",
            "payment": { "_t": "bank_transfer", "iban": "FR76" },
            "payments": [{ "_t": "card", "last4": "4242" }]
        }
    );
    assert_eq!(decode::<Invoice>(&document).unwrap(), invoice);
}

#[test]
fn unknown_discriminator_is_reported() {
    let document = doc! {
        "_id": "inv-1",
        "payment": { "_t": "cheque" },
        "payments": []
    };
    assert!(matches!(
        decode::<Invoice>(&document).unwrap_err(),
        DecodeError::UnknownVariant { ref field, ref enum_name, .. }
            if field == "payment" && enum_name == "Payment"
    ));
}

#[test]
fn nested_documents_never_generate_identifiers() {
    let document = Order::describe().build().unwrap();
    assert!(document.identifier().is_some());

    let mut value = order();
    value.id = None;
    let embedded = codec::embed(&value, &EncodeOptions::default());
    let Bson::Document(embedded) = embedded else {
        panic!("expected a document");
    };
    assert!(!embedded.contains_key("_id"));
}

#[test]
fn explicit_options_and_bson_entry_points() {
    let encoded = encode_with(&order(), &EncodeOptions::default().with_serialize_nulls(true))
        .unwrap()
        .into_document();
    assert_eq!(encoded.get_document("address").unwrap().get_str("zip").unwrap(), "69001");

    let decoded: Order = decode_bson(&Bson::Document(encoded.clone())).unwrap();
    assert_eq!(decoded.address.city, "Lyon");
    assert!(matches!(
        decode_bson::<Order>(&Bson::Int32(1)),
        Err(DecodeError::NotADocument { actual: "int", .. })
    ));
}

#[derive(Debug, Clone, PartialEq, Document)]
pub struct Blob {
    pub name:  String,
    pub extra: Bson,
    pub meta:  Option<Bson>
}

#[test]
fn dynamic_fields_round_trip() {
    let null = Blob {
        name:  "empty".into(),
        extra: Bson::Null,
        meta:  None
    };
    let document = encode(&null).unwrap().into_document();
    assert_eq!(document, doc! { "name": "empty" });
    assert_eq!(decode::<Blob>(&document).unwrap(), null);

    let nested = Blob {
        name:  "full".into(),
        extra: Bson::Document(doc! { "depth": { "level": 2 }, "tags": ["a", 1] }),
        meta:  Some(Bson::String("note".into()))
    };
    let document = encode(&nested).unwrap().into_document();
    assert_eq!(
        document,
        doc! {
            "name": "full",
            "extra": { "depth": { "level": 2 }, "tags": ["a", 1] },
            "meta": "note"
        }
    );
    assert_eq!(decode::<Blob>(&document).unwrap(), nested);
}

#[test]
fn dynamic_fields_keep_nulls_when_asked() {
    let value = Blob {
        name:  "empty".into(),
        extra: Bson::Null,
        meta:  None
    };
    let options = EncodeOptions::default().with_serialize_nulls(true);
    let document = encode_with(&value, &options).unwrap().into_document();
    assert_eq!(
        document,
        doc! { "name": "empty", "extra": Bson::Null, "meta": Bson::Null }
    );
    assert_eq!(decode::<Blob>(&document).unwrap(), value);
}

#[test]
fn dynamic_fields_are_optional_in_the_schema() {
    let schema = docmodel::registry::resolve::<Blob>().unwrap();
    let extra = schema.lookup("extra").unwrap();
    assert!(extra.has_default());
    assert_eq!(extra.declared_type().to_string(), "any");
    assert!(schema.validate(&doc! { "name": "x" }).is_ok());
}
