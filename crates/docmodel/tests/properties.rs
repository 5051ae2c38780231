// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Property tests over generated documents.

mod common;

use std::collections::{BTreeSet, HashMap};

use bson::oid::ObjectId;
use common::{Address, Audit, Line, Order, Status};
use docmodel::{decode, encode, fields, registry};
use proptest::prelude::*;

fn status() -> impl Strategy<Value = Status> {
    prop_oneof![Just(Status::Open), Just(Status::OnHold), Just(Status::Closed)]
}

fn line() -> impl Strategy<Value = Line> {
    ("[a-z]{1,8}", any::<i32>()).prop_map(|(sku, qty)| Line {
        sku,
        qty
    })
}

prop_compose! {
    fn order()(
        id in proptest::option::of(any::<[u8; 12]>()),
        city in ".{0,16}",
        zip in proptest::option::of("[0-9]{5}"),
        lines in proptest::collection::vec(line(), 0..4),
        status in status(),
        stock in proptest::collection::hash_map("[a-z]{1,6}", any::<i32>(), 0..4),
        by_status in proptest::collection::hash_map(status(), any::<i32>(), 0..3),
        labels in proptest::collection::btree_set("[a-z]{1,6}", 0..4),
        priority in any::<i32>(),
        notes in proptest::collection::vec(".{0,12}", 0..3),
        created_by in "[a-z]{0,8}",
        revision in any::<i64>(),
    ) -> Order {
        Order {
            id: id.map(ObjectId::from_bytes),
            address: Address { city, zip },
            lines,
            status,
            stock: stock.into_iter().collect::<HashMap<_, _>>(),
            by_status,
            labels: labels.into_iter().collect::<BTreeSet<_>>(),
            priority,
            notes,
            cached: None,
            audit: Audit { created_by, revision },
        }
    }
}

proptest! {
    #[test]
    fn decode_inverts_encode(value in order()) {
        let encoded = encode(&value).unwrap();
        let mut decoded: Order = decode(encoded.document()).unwrap();
        if value.id.is_none() {
            prop_assert!(encoded.assigned_id().is_some());
            decoded.id = None;
        }
        prop_assert_eq!(decoded, value);
    }

    #[test]
    fn encoded_keys_are_schema_fields(value in order()) {
        let schema = registry::resolve::<Order>().unwrap();
        let document = encode(&value).unwrap().into_document();
        for key in document.keys() {
            prop_assert!(schema.lookup(key).is_ok(), "unexpected key {}", key);
        }
    }

    #[test]
    fn key_paths_render_the_stringified_key(status in status(), key in "[a-z]{1,6}") {
        let order = fields::<Order>();
        let by_status = order.by_status().key(&status).render();
        prop_assert!(by_status.starts_with("byStatus."));
        prop_assert_eq!(order.stock().key(&key).render(), format!("stock.{key}"));
    }
}
