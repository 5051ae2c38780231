// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use bson::oid::ObjectId;
use docmodel::{Document, decode, encode_mut, fields};

#[derive(Debug, Clone, PartialEq, Document)]
pub struct Entity {
    #[id]
    pub id: Option<ObjectId>,
    pub version: i64
}

#[derive(Debug, Clone, PartialEq, Document)]
#[document(collection = "notes")]
pub struct Note {
    #[field(flatten)]
    pub entity: Entity,
    pub body: String
}

fn main() {
    let mut note = Note {
        entity: Entity {
            id:      None,
            version: 1
        },
        body:   "hello".to_owned()
    };
    let document = encode_mut(&mut note).unwrap();
    assert!(note.entity.id.is_some());
    let keys: Vec<&str> = document.keys().map(String::as_str).collect();
    assert_eq!(keys, ["_id", "version", "body"]);
    assert_eq!(decode::<Note>(&document).unwrap(), note);
    assert_eq!(fields::<Note>().entity().version().render(), "version");
}
