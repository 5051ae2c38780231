// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use std::collections::BTreeMap;

use bson::{Bson, doc};
use docmodel::{Document, codec::EncodeOptions, fields, value::BsonValue};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Document)]
#[document(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Level {
    Low,
    VeryHigh
}

#[derive(Debug, Clone, PartialEq, Document)]
pub struct Circle {
    pub radius: f64
}

#[derive(Debug, Clone, PartialEq, Document)]
pub struct Square {
    pub side: f64
}

#[derive(Debug, Clone, PartialEq, Document)]
#[document(tag = "kind", rename_all = "lowercase")]
pub enum Shape {
    Circle(Circle),
    #[variant(rename = "box")]
    Square(Square)
}

#[derive(Debug, Clone, PartialEq, Document)]
pub struct Drawing {
    pub shapes: Vec<Shape>,
    pub levels: BTreeMap<Level, i32>
}

fn main() {
    let options = EncodeOptions::default();
    assert_eq!(Level::VeryHigh.to_bson(&options), Bson::String("VERY_HIGH".into()));

    let shape = Shape::Square(Square {
        side: 2.0
    });
    assert_eq!(shape.to_bson(&options), Bson::Document(doc! { "kind": "box", "side": 2.0 }));
    assert_eq!(Shape::from_bson(&shape.to_bson(&options)).unwrap(), shape);

    let drawing = fields::<Drawing>();
    assert_eq!(drawing.levels().key(&Level::Low).render(), "levels.LOW");
    assert_eq!(drawing.shapes().render(), "shapes");
}
