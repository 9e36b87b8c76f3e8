//! Object model → native value mapping.
//!
//! The destination's static shape decides which wire types are acceptable,
//! per revision: a `bool` takes a Boolean under version 3 but an Integer
//! under version 2, a sequence takes only an Array whose elements all share
//! one wire type, and so on. [`from_bytes`] is the strict top-level entry:
//! it extracts exactly one value, rejects trailing bytes, and enforces the
//! revision before shaping.

use std::collections::BTreeMap;

use resp_wire::{parse_double, Object, Version, WireError, WireType};

use crate::encode::ToResp;
use crate::error::ValueError;
use crate::json::json_to_value;
use crate::value::{Binary, Value};

/// Builds a native value from a decoded RESP object under a protocol
/// revision.
pub trait FromResp: Sized {
    fn from_resp(object: &Object, version: Version) -> Result<Self, ValueError>;
}

/// Decodes wire bytes into a native destination type. One complete value,
/// no trailing bytes, revision enforced over the whole tree.
pub fn from_bytes<T: FromResp>(src: &[u8], version: Version) -> Result<T, ValueError> {
    let object = resp_wire::decode(src, version)?;
    T::from_resp(&object, version)
}

impl FromResp for bool {
    fn from_resp(object: &Object, version: Version) -> Result<Self, ValueError> {
        match (version, object) {
            (Version::V3, Object::Boolean(b)) => Ok(*b),
            (Version::V2, Object::Integer(n)) if *n >= 0 => Ok(*n > 0),
            _ => Err(mismatch("boolean", object)),
        }
    }
}

macro_rules! impl_from_resp_int {
    ($($ty:ty),*) => {$(
        impl FromResp for $ty {
            fn from_resp(object: &Object, _version: Version) -> Result<Self, ValueError> {
                match object {
                    Object::Integer(n) => {
                        <$ty>::try_from(*n).map_err(|_| ValueError::IntegerRange(*n))
                    }
                    _ => Err(mismatch("integer", object)),
                }
            }
        }
    )*};
}

impl_from_resp_int!(i8, i16, i32, i64, isize, u8, u16, u32, usize);

// Values past i64::MAX travel as their decimal text, so the unsigned decode
// accepts both the integer wire form and that textual fallback.
impl FromResp for u64 {
    fn from_resp(object: &Object, _version: Version) -> Result<Self, ValueError> {
        match object {
            Object::Integer(n) => u64::try_from(*n).map_err(|_| ValueError::IntegerRange(*n)),
            Object::SimpleString(text) => std::str::from_utf8(text)
                .ok()
                .and_then(|text| text.parse::<u64>().ok())
                .ok_or_else(|| mismatch("unsigned integer", object)),
            _ => Err(mismatch("integer", object)),
        }
    }
}

impl FromResp for f64 {
    fn from_resp(object: &Object, version: Version) -> Result<Self, ValueError> {
        match (version, object) {
            (Version::V3, Object::Double(f)) => Ok(*f),
            (Version::V2, Object::SimpleString(text)) => {
                parse_double(text).ok_or(ValueError::Wire(WireError::MalformedDouble))
            }
            _ => Err(mismatch("float", object)),
        }
    }
}

impl FromResp for f32 {
    fn from_resp(object: &Object, version: Version) -> Result<Self, ValueError> {
        f64::from_resp(object, version).map(|f| f as f32)
    }
}

impl FromResp for String {
    fn from_resp(object: &Object, _version: Version) -> Result<Self, ValueError> {
        let bytes = string_payload(object)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| ValueError::InvalidUtf8)
    }
}

impl FromResp for Binary {
    fn from_resp(object: &Object, _version: Version) -> Result<Self, ValueError> {
        Ok(Binary(string_payload(object)?.to_vec()))
    }
}

impl<T: FromResp> FromResp for Vec<T> {
    fn from_resp(object: &Object, version: Version) -> Result<Self, ValueError> {
        let Object::Array(items) = object else {
            return Err(mismatch("sequence", object));
        };
        check_homogeneous(items)?;
        items
            .iter()
            .map(|item| T::from_resp(item, version))
            .collect()
    }
}

impl<T: FromResp> FromResp for Option<T> {
    fn from_resp(object: &Object, version: Version) -> Result<Self, ValueError> {
        match object {
            Object::Null => Ok(None),
            other => T::from_resp(other, version).map(Some),
        }
    }
}

impl<T: FromResp> FromResp for BTreeMap<String, T> {
    fn from_resp(object: &Object, version: Version) -> Result<Self, ValueError> {
        match (version, object) {
            (Version::V3, Object::Map(pairs)) => {
                check_homogeneous_values(pairs)?;
                let mut map = BTreeMap::new();
                for (key, value) in pairs {
                    let key = String::from_utf8(string_payload(key)?.to_vec())
                        .map_err(|_| ValueError::InvalidUtf8)?;
                    map.insert(key, T::from_resp(value, version)?);
                }
                Ok(map)
            }
            (Version::V2, Object::BulkString(bytes)) => {
                // The v2 record fallback: a JSON object inside a bulk
                // string. Values re-enter through the v3 object shapes.
                let json: serde_json::Value = serde_json::from_slice(bytes)?;
                let serde_json::Value::Object(fields) = json else {
                    return Err(mismatch("record", object));
                };
                let mut map = BTreeMap::new();
                for (key, value) in &fields {
                    let object = json_to_value(value).to_resp(Version::V3)?;
                    map.insert(key.clone(), T::from_resp(&object, Version::V3)?);
                }
                Ok(map)
            }
            _ => Err(mismatch("record", object)),
        }
    }
}

impl FromResp for Value {
    fn from_resp(object: &Object, version: Version) -> Result<Self, ValueError> {
        Ok(match object {
            Object::Null => Value::Null,
            Object::Boolean(b) => Value::Bool(*b),
            Object::Integer(n) => Value::Int(*n),
            Object::Double(f) => Value::Float(*f),
            Object::BigNumber(text) => Value::BigInt(text.clone()),
            Object::SimpleString(bytes) | Object::BulkString(bytes) => {
                match String::from_utf8(bytes.clone()) {
                    Ok(text) => Value::Str(text),
                    Err(err) => Value::Bytes(err.into_bytes()),
                }
            }
            Object::SimpleError(bytes) | Object::BulkError(bytes) => {
                Value::Error(String::from_utf8_lossy(bytes).into_owned())
            }
            Object::VerbatimString { text, .. } => {
                match String::from_utf8(text.clone()) {
                    Ok(text) => Value::Str(text),
                    Err(err) => Value::Bytes(err.into_bytes()),
                }
            }
            Object::Array(items) | Object::Set(items) | Object::Push(items) => Value::Array(
                items
                    .iter()
                    .map(|item| Value::from_resp(item, version))
                    .collect::<Result<_, _>>()?,
            ),
            Object::Map(pairs) => {
                let mut fields = Vec::with_capacity(pairs.len());
                for (key, value) in pairs {
                    let key = String::from_utf8(string_payload(key)?.to_vec())
                        .map_err(|_| ValueError::InvalidUtf8)?;
                    fields.push((key, Value::from_resp(value, version)?));
                }
                Value::Record(fields)
            }
        })
    }
}

pub(crate) fn mismatch(expected: &'static str, found: &Object) -> ValueError {
    ValueError::TypeMismatch {
        expected,
        found: found.wire_type(),
    }
}

/// The raw payload of any string-like object. Everything else is a type
/// mismatch; map keys in particular must be string-like to act as lookup
/// names.
pub(crate) fn string_payload(object: &Object) -> Result<&[u8], ValueError> {
    match object {
        Object::SimpleString(bytes) | Object::BulkString(bytes) => Ok(bytes),
        Object::VerbatimString { text, .. } => Ok(text),
        other => Err(mismatch("string", other)),
    }
}

/// Sequence elements must all share one wire type when the destination is
/// homogeneous.
fn check_homogeneous(items: &[Object]) -> Result<(), ValueError> {
    let Some(first) = items.first() else {
        return Ok(());
    };
    let expected = first.wire_type();
    for (index, item) in items.iter().enumerate().skip(1) {
        let found = item.wire_type();
        if found != expected {
            return Err(ValueError::HeterogeneousContainer {
                expected,
                found,
                index,
            });
        }
    }
    Ok(())
}

fn check_homogeneous_values(pairs: &[(Object, Object)]) -> Result<(), ValueError> {
    let Some((_, first)) = pairs.first() else {
        return Ok(());
    };
    let expected = first.wire_type();
    for (index, (_, value)) in pairs.iter().enumerate().skip(1) {
        let found = value.wire_type();
        if found != expected {
            return Err(ValueError::HeterogeneousContainer {
                expected,
                found,
                index,
            });
        }
    }
    Ok(())
}
