// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Document types shared by the integration tests.

#![allow(dead_code)]

use std::collections::{BTreeSet, HashMap};

use bson::oid::ObjectId;
use docmodel::{Document, Id};

#[derive(Debug, Clone, PartialEq, Document)]
#[document(collection = "shops")]
pub struct Shop {
    pub name: String,
    #[id]
    pub id:   Option<Id<Shop>>
}

#[derive(Debug, Clone, PartialEq, Document)]
#[document(rename_all = "camelCase")]
pub struct Article {
    pub title:   String,
    pub shop_id: Option<Id<Shop>>
}

#[derive(Debug, Clone, PartialEq, Document)]
pub struct Address {
    pub city: String,
    pub zip:  Option<String>
}

#[derive(Debug, Clone, PartialEq, Document)]
pub struct Line {
    pub sku: String,
    pub qty: i32
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Document)]
#[document(rename_all = "snake_case")]
pub enum Status {
    Open,
    OnHold,
    #[variant(rename = "done")]
    Closed
}

fn default_priority() -> i32 {
    3
}

/// Audit stamps shared by several documents.
#[derive(Debug, Clone, PartialEq, Default, Document)]
#[document(rename_all = "camelCase")]
pub struct Audit {
    pub created_by: String,
    pub revision:   i64
}

#[derive(Debug, Clone, PartialEq, Document)]
#[document(collection = "orders", rename_all = "camelCase")]
pub struct Order {
    #[id]
    pub id:         Option<ObjectId>,
    /// Customer shipping address.
    pub address:    Address,
    pub lines:      Vec<Line>,
    pub status:     Status,
    pub stock:      HashMap<String, i32>,
    pub by_status:  HashMap<Status, i32>,
    pub labels:     BTreeSet<String>,
    #[field(default = "default_priority")]
    pub priority:   i32,
    #[field(default)]
    pub notes:      Vec<String>,
    #[field(skip)]
    pub cached:     Option<String>,
    #[field(flatten)]
    pub audit:      Audit
}

#[derive(Debug, Clone, PartialEq, Document)]
pub struct Card {
    pub last4: String
}

#[derive(Debug, Clone, PartialEq, Document)]
#[document(rename_all = "camelCase")]
pub struct Transfer {
    pub iban:      String,
    pub reference: Option<String>
}

#[derive(Debug, Clone, PartialEq, Document)]
#[document(tag = "_t", rename_all = "snake_case")]
pub enum Payment {
    Card(Card),
    BankTransfer(Transfer)
}

#[derive(Debug, Clone, PartialEq, Document)]
#[document(collection = "invoices")]
pub struct Invoice {
    #[id]
    pub id:       Option<String>,
    pub payment:  Payment,
    pub payments: Vec<Payment>
}

pub fn order() -> Order {
    Order {
        id:        None,
        address:   Address {
            city: "Lyon".into(),
            zip:  Some("69001".into())
        },
        lines:     vec![
            Line {
                sku: "bolt".into(),
                qty: 2
            },
            Line {
                sku: "nut".into(),
                qty: 10
            },
        ],
        status:    Status::OnHold,
        stock:     HashMap::from([("bolt".to_owned(), 40)]),
        by_status: HashMap::from([(Status::Open, 1), (Status::Closed, 4)]),
        labels:    BTreeSet::from(["fragile".to_owned()]),
        priority:  1,
        notes:     vec!["ring twice".into()],
        cached:    None,
        audit:     Audit {
            created_by: "ops".into(),
            revision:   7
        }
    }
}
