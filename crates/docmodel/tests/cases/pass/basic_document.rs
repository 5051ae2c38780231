// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use bson::doc;
use chrono::{DateTime, Utc};
use docmodel::{Document, Id, decode, encode_mut, fields};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Document)]
#[document(collection = "users", rename_all = "camelCase")]
pub struct User {
    #[id]
    pub id: Option<Id<User>>,

    /// Login name.
    pub user_name: String,

    #[field(rename = "mail")]
    pub email: String,

    pub api_key: Uuid,

    pub created_at: DateTime<Utc>,

    #[field(default)]
    pub tags: Vec<String>,

    #[field(skip)]
    pub password_hash: String
}

fn main() {
    let mut user = User {
        id:            None,
        user_name:     "john".to_owned(),
        email:         "john@example.com".to_owned(),
        api_key:       Uuid::nil(),
        created_at:    DateTime::<Utc>::from_timestamp_millis(0).unwrap(),
        tags:          Vec::new(),
        password_hash: "secret".to_owned()
    };
    let document = encode_mut(&mut user).unwrap();
    assert!(user.id.is_some());
    assert_eq!(document.get_str("userName").unwrap(), "john");
    assert!(!document.contains_key("passwordHash"));

    let back: User = decode(&document).unwrap();
    assert_eq!(back.email, user.email);
    assert!(back.password_hash.is_empty());

    let filter = fields::<User>().email().eq("john@example.com");
    assert_eq!(filter.into_document(), doc! { "mail": "john@example.com" });
    assert_eq!(docmodel::collection_name::<User>().unwrap(), "users");
}
