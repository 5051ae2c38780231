// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use docmodel::{Document, decode, encode, fields};

#[derive(Debug, Clone, PartialEq, Document)]
pub struct Tag {
    pub label: String
}

#[derive(Debug, Clone, PartialEq, Document)]
pub struct Envelope<T, M> {
    pub payload: T,
    pub meta: Option<M>,
    #[field(default)]
    pub hops: u8
}

fn main() {
    let value: Envelope<Tag, String> = Envelope {
        payload: Tag {
            label: "a".to_owned()
        },
        meta:    None,
        hops:    1
    };
    let document = encode(&value).unwrap().into_document();
    assert_eq!(decode::<Envelope<Tag, String>>(&document).unwrap(), value);

    let label = fields::<Envelope<Tag, String>>().payload().fields().label();
    assert_eq!(label.render(), "payload.label");
}
