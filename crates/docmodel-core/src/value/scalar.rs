// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Scalar encodings: numbers, strings, native identifiers, dates, binary.

use bson::{Binary, Bson, Decimal128, Document, oid::ObjectId, spec::BinarySubtype};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{BsonValue, MapKey, unwrap_extended};
use crate::{
    codec::EncodeOptions,
    error::ValueError,
    path::{Path, PathTarget, Segment},
    schema::{ContainerKind, ScalarKind, TypeRef}
};

macro_rules! scalar_target {
    ($($ty:ty),* $(,)?) => {$(
        impl PathTarget for $ty {
            const KIND: ContainerKind = ContainerKind::Scalar;
            type Handle<R> = Path<R, Self>;

            fn handle<R>(segments: Vec<Segment>) -> Self::Handle<R> {
                Path::from_segments(segments)
            }
        }
    )*};
}

scalar_target!(
    bool,
    i8,
    i16,
    i32,
    i64,
    u8,
    u16,
    u32,
    f32,
    f64,
    String,
    char,
    ObjectId,
    bson::DateTime,
    DateTime<Utc>,
    Decimal128,
    Binary,
    Uuid,
    Bson
);

impl PathTarget for Document {
    const KIND: ContainerKind = ContainerKind::Object;
    type Handle<R> = Path<R, Self>;

    fn handle<R>(segments: Vec<Segment>) -> Self::Handle<R> {
        Path::from_segments(segments)
    }
}

/// Read any integer wire value, widening or narrowing as declared.
fn integer(value: &Bson, expected: &str) -> Result<i64, ValueError> {
    let value = unwrap_extended(value)?;
    match value.as_ref() {
        Bson::Int32(number) => Ok(i64::from(*number)),
        Bson::Int64(number) => Ok(*number),
        #[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
        Bson::Double(number)
            if number.is_finite()
                && number.fract() == 0.0
                && *number >= i64::MIN as f64
                && *number < i64::MAX as f64 =>
        {
            Ok(*number as i64)
        }
        other => Err(ValueError::mismatch(expected, other))
    }
}

fn parse_key<T: std::str::FromStr>(key: &str, expected: &str) -> Result<T, ValueError> {
    key.parse()
        .map_err(|_| ValueError::mismatch(expected, &Bson::String(key.to_owned())))
}

macro_rules! integer_value {
    ($variant:ident, $kind:ident, $wire:ty => $($ty:ty),*) => {$(
        impl BsonValue for $ty {
            fn type_ref() -> TypeRef {
                TypeRef::Scalar(ScalarKind::$kind)
            }

            fn to_bson(&self, _options: &EncodeOptions) -> Bson {
                Bson::$variant(<$wire>::from(*self))
            }

            fn from_bson(value: &Bson) -> Result<Self, ValueError> {
                let wide = integer(value, stringify!($ty))?;
                Self::try_from(wide).map_err(|_| ValueError::mismatch(stringify!($ty), value))
            }
        }

        impl MapKey for $ty {
            fn to_key(&self) -> String {
                self.to_string()
            }

            fn from_key(key: &str) -> Result<Self, ValueError> {
                parse_key(key, stringify!($ty))
            }
        }
    )*};
}

integer_value!(Int32, Int32, i32 => i8, i16, i32, u8, u16);
integer_value!(Int64, Int64, i64 => i64, u32);

impl BsonValue for f64 {
    fn type_ref() -> TypeRef {
        TypeRef::Scalar(ScalarKind::Double)
    }

    fn to_bson(&self, _options: &EncodeOptions) -> Bson {
        Bson::Double(*self)
    }

    #[allow(clippy::cast_precision_loss)]
    fn from_bson(value: &Bson) -> Result<Self, ValueError> {
        let value = unwrap_extended(value)?;
        match value.as_ref() {
            Bson::Double(number) => Ok(*number),
            Bson::Int32(number) => Ok(Self::from(*number)),
            Bson::Int64(number) => Ok(*number as Self),
            other => Err(ValueError::mismatch("f64", other))
        }
    }
}

impl BsonValue for f32 {
    fn type_ref() -> TypeRef {
        TypeRef::Scalar(ScalarKind::Double)
    }

    fn to_bson(&self, _options: &EncodeOptions) -> Bson {
        Bson::Double(f64::from(*self))
    }

    #[allow(clippy::cast_possible_truncation)]
    fn from_bson(value: &Bson) -> Result<Self, ValueError> {
        f64::from_bson(value).map(|number| number as Self)
    }
}

impl BsonValue for bool {
    fn type_ref() -> TypeRef {
        TypeRef::Scalar(ScalarKind::Bool)
    }

    fn to_bson(&self, _options: &EncodeOptions) -> Bson {
        Bson::Boolean(*self)
    }

    fn from_bson(value: &Bson) -> Result<Self, ValueError> {
        match value {
            Bson::Boolean(flag) => Ok(*flag),
            other => Err(ValueError::mismatch("bool", other))
        }
    }
}

impl MapKey for bool {
    fn to_key(&self) -> String {
        self.to_string()
    }

    fn from_key(key: &str) -> Result<Self, ValueError> {
        parse_key(key, "bool")
    }
}

impl BsonValue for String {
    fn type_ref() -> TypeRef {
        TypeRef::Scalar(ScalarKind::String)
    }

    fn to_bson(&self, _options: &EncodeOptions) -> Bson {
        Bson::String(self.clone())
    }

    fn from_bson(value: &Bson) -> Result<Self, ValueError> {
        match value {
            Bson::String(text) | Bson::Symbol(text) => Ok(text.clone()),
            other => Err(ValueError::mismatch("string", other))
        }
    }
}

impl MapKey for String {
    fn to_key(&self) -> String {
        self.clone()
    }

    fn from_key(key: &str) -> Result<Self, ValueError> {
        Ok(key.to_owned())
    }
}

impl BsonValue for char {
    fn type_ref() -> TypeRef {
        TypeRef::Scalar(ScalarKind::String)
    }

    fn to_bson(&self, _options: &EncodeOptions) -> Bson {
        Bson::String(self.to_string())
    }

    fn from_bson(value: &Bson) -> Result<Self, ValueError> {
        if let Bson::String(text) = value {
            let mut chars = text.chars();
            if let (Some(single), None) = (chars.next(), chars.next()) {
                return Ok(single);
            }
        }
        Err(ValueError::mismatch("char", value))
    }
}

impl MapKey for char {
    fn to_key(&self) -> String {
        self.to_string()
    }

    fn from_key(key: &str) -> Result<Self, ValueError> {
        Self::from_bson(&Bson::String(key.to_owned()))
    }
}

impl BsonValue for ObjectId {
    fn type_ref() -> TypeRef {
        TypeRef::Scalar(ScalarKind::ObjectId)
    }

    fn to_bson(&self, _options: &EncodeOptions) -> Bson {
        Bson::ObjectId(*self)
    }

    fn from_bson(value: &Bson) -> Result<Self, ValueError> {
        let value = unwrap_extended(value)?;
        match value.as_ref() {
            Bson::ObjectId(id) => Ok(*id),
            Bson::String(hex) => {
                Self::parse_str(hex).map_err(|_| ValueError::mismatch("objectId", &value))
            }
            other => Err(ValueError::mismatch("objectId", other))
        }
    }
}

impl MapKey for ObjectId {
    fn to_key(&self) -> String {
        self.to_hex()
    }

    fn from_key(key: &str) -> Result<Self, ValueError> {
        Self::from_bson(&Bson::String(key.to_owned()))
    }
}

impl BsonValue for bson::DateTime {
    fn type_ref() -> TypeRef {
        TypeRef::Scalar(ScalarKind::DateTime)
    }

    fn to_bson(&self, _options: &EncodeOptions) -> Bson {
        Bson::DateTime(*self)
    }

    fn from_bson(value: &Bson) -> Result<Self, ValueError> {
        let value = unwrap_extended(value)?;
        match value.as_ref() {
            Bson::DateTime(date) => Ok(*date),
            Bson::Int64(millis) => Ok(Self::from_millis(*millis)),
            Bson::Int32(millis) => Ok(Self::from_millis(i64::from(*millis))),
            Bson::String(text) => {
                Self::parse_rfc3339_str(text).map_err(|_| ValueError::mismatch("date", &value))
            }
            other => Err(ValueError::mismatch("date", other))
        }
    }
}

/// Stored with millisecond precision, like every BSON date.
impl BsonValue for DateTime<Utc> {
    fn type_ref() -> TypeRef {
        TypeRef::Scalar(ScalarKind::DateTime)
    }

    fn to_bson(&self, _options: &EncodeOptions) -> Bson {
        Bson::DateTime(bson::DateTime::from_millis(self.timestamp_millis()))
    }

    fn from_bson(value: &Bson) -> Result<Self, ValueError> {
        let date = bson::DateTime::from_bson(value)?;
        Self::from_timestamp_millis(date.timestamp_millis())
            .ok_or_else(|| ValueError::mismatch("date", value))
    }
}

impl BsonValue for Decimal128 {
    fn type_ref() -> TypeRef {
        TypeRef::Scalar(ScalarKind::Decimal128)
    }

    fn to_bson(&self, _options: &EncodeOptions) -> Bson {
        Bson::Decimal128(self.clone())
    }

    fn from_bson(value: &Bson) -> Result<Self, ValueError> {
        let value = unwrap_extended(value)?;
        match value.as_ref() {
            Bson::Decimal128(decimal) => Ok(decimal.clone()),
            other => Err(ValueError::mismatch("decimal", other))
        }
    }
}

impl BsonValue for Binary {
    fn type_ref() -> TypeRef {
        TypeRef::Scalar(ScalarKind::Binary)
    }

    fn to_bson(&self, _options: &EncodeOptions) -> Bson {
        Bson::Binary(self.clone())
    }

    fn from_bson(value: &Bson) -> Result<Self, ValueError> {
        let value = unwrap_extended(value)?;
        match value.as_ref() {
            Bson::Binary(binary) => Ok(binary.clone()),
            other => Err(ValueError::mismatch("binData", other))
        }
    }
}

impl BsonValue for Uuid {
    fn type_ref() -> TypeRef {
        TypeRef::Scalar(ScalarKind::Uuid)
    }

    fn to_bson(&self, _options: &EncodeOptions) -> Bson {
        Bson::Binary(Binary {
            subtype: BinarySubtype::Uuid,
            bytes:   self.as_bytes().to_vec()
        })
    }

    fn from_bson(value: &Bson) -> Result<Self, ValueError> {
        let value = unwrap_extended(value)?;
        match value.as_ref() {
            Bson::Binary(Binary {
                subtype: BinarySubtype::Uuid | BinarySubtype::UuidOld,
                bytes
            }) => Self::from_slice(bytes).map_err(|_| ValueError::mismatch("uuid", &value)),
            Bson::String(text) => {
                Self::parse_str(text).map_err(|_| ValueError::mismatch("uuid", &value))
            }
            other => Err(ValueError::mismatch("uuid", other))
        }
    }
}

impl MapKey for Uuid {
    fn to_key(&self) -> String {
        self.to_string()
    }

    fn from_key(key: &str) -> Result<Self, ValueError> {
        parse_key(key, "uuid")
    }
}

impl BsonValue for Document {
    fn type_ref() -> TypeRef {
        TypeRef::Scalar(ScalarKind::Document)
    }

    fn to_bson(&self, _options: &EncodeOptions) -> Bson {
        Bson::Document(self.clone())
    }

    fn from_bson(value: &Bson) -> Result<Self, ValueError> {
        match value {
            Bson::Document(document) => Ok(document.clone()),
            other => Err(ValueError::mismatch("object", other))
        }
    }
}

/// Unknown element type: any wire value is accepted and kept as is.
impl BsonValue for Bson {
    fn type_ref() -> TypeRef {
        TypeRef::Dynamic
    }

    fn to_bson(&self, _options: &EncodeOptions) -> Bson {
        self.clone()
    }

    fn from_bson(value: &Bson) -> Result<Self, ValueError> {
        Ok(value.clone())
    }

    fn absent() -> Option<Self> {
        Some(Bson::Null)
    }
}

#[cfg(test)]
mod tests {
    use bson::doc;

    use super::*;

    fn options() -> EncodeOptions {
        EncodeOptions::default()
    }

    #[test]
    fn absent_dynamic_value_reads_as_null() {
        assert_eq!(Bson::absent(), Some(Bson::Null));
        assert_eq!(String::absent(), None);
    }

    #[test]
    fn small_integers_widen_and_narrow() {
        assert_eq!(i64::from_bson(&Bson::Int32(7)).unwrap(), 7);
        assert_eq!(i32::from_bson(&Bson::Int64(7)).unwrap(), 7);
        assert_eq!(i32::from_bson(&Bson::Double(7.0)).unwrap(), 7);
        assert!(i32::from_bson(&Bson::Int64(i64::MAX)).is_err());
        assert!(u8::from_bson(&Bson::Int32(-1)).is_err());
        assert!(i64::from_bson(&Bson::Double(1.5)).is_err());
    }

    #[test]
    fn integers_encode_to_declared_width() {
        assert_eq!(7_u8.to_bson(&options()), Bson::Int32(7));
        assert_eq!(7_u32.to_bson(&options()), Bson::Int64(7));
        assert_eq!(7_i64.to_bson(&options()), Bson::Int64(7));
    }

    #[test]
    fn doubles_accept_integers() {
        assert!((f64::from_bson(&Bson::Int64(3)).unwrap() - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn number_long_wrapper_is_read() {
        let wrapped = Bson::Document(doc! { "$numberLong": "42" });
        assert_eq!(i64::from_bson(&wrapped).unwrap(), 42);
    }

    #[test]
    fn object_id_accepts_hex_string() {
        let id = ObjectId::new();
        assert_eq!(ObjectId::from_bson(&Bson::String(id.to_hex())).unwrap(), id);
        assert!(ObjectId::from_bson(&Bson::String("nope".into())).is_err());
    }

    #[test]
    fn dates_accept_millis_and_rfc3339() {
        let millis = 1_700_000_000_000_i64;
        let from_millis = bson::DateTime::from_bson(&Bson::Int64(millis)).unwrap();
        assert_eq!(from_millis.timestamp_millis(), millis);

        let parsed = DateTime::<Utc>::from_bson(&Bson::String("2024-01-02T03:04:05Z".into()))
            .unwrap();
        assert_eq!(parsed.timestamp(), 1_704_164_645);
    }

    #[test]
    fn chrono_dates_round_trip_at_millisecond_precision() {
        let now = DateTime::<Utc>::from_timestamp_millis(1_700_000_000_123).unwrap();
        let wire = now.to_bson(&options());
        assert_eq!(DateTime::<Utc>::from_bson(&wire).unwrap(), now);
    }

    #[test]
    fn uuid_is_binary_subtype_four() {
        let id = Uuid::new_v4();
        let wire = id.to_bson(&options());
        assert!(matches!(
            &wire,
            Bson::Binary(Binary {
                subtype: BinarySubtype::Uuid,
                ..
            })
        ));
        assert_eq!(Uuid::from_bson(&wire).unwrap(), id);
        assert_eq!(Uuid::from_bson(&Bson::String(id.to_string())).unwrap(), id);
    }

    #[test]
    fn char_requires_single_character() {
        assert_eq!(char::from_bson(&Bson::String("x".into())).unwrap(), 'x');
        assert!(char::from_bson(&Bson::String("xy".into())).is_err());
    }

    #[test]
    fn strings_do_not_coerce_numbers() {
        let error = String::from_bson(&Bson::Int32(1)).unwrap_err();
        assert!(matches!(error, ValueError::Mismatch { actual: "int", .. }));
    }

    #[test]
    fn map_keys_are_stable() {
        let id = ObjectId::new();
        assert_eq!(id.to_key(), id.to_hex());
        assert_eq!(ObjectId::from_key(&id.to_key()).unwrap(), id);
        assert_eq!(42_i32.to_key(), "42");
        assert_eq!(i32::from_key("42").unwrap(), 42);
        assert!(i32::from_key("x").is_err());
    }

    #[test]
    fn dynamic_values_pass_through() {
        let value = Bson::Document(doc! { "any": [1, "two"] });
        assert_eq!(Bson::from_bson(&value).unwrap(), value);
        assert_eq!(Bson::type_ref(), TypeRef::Dynamic);
    }
}
