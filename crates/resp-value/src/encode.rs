//! Native value → object model mapping.
//!
//! [`ToResp`] is the closed, compile-time rendition of shape dispatch: each
//! native shape category (boolean, integer, float, string, sequence, record,
//! optional) carries its own impl, and implementing the trait directly on a
//! user type is the custom-marshaler escape hatch that wins over every
//! built-in rule. Version fallbacks live here: under version 2, booleans
//! become integers, floats become textual simple strings, and record shapes
//! degrade to JSON inside a bulk string. Children of a sequence or record
//! always inherit the outer call's version.

use std::collections::BTreeMap;
use std::fmt::Display;

use resp_wire::{format_double, Object, Version};

use crate::error::ValueError;
use crate::json::value_to_json;
use crate::value::{Binary, Value};

/// Maps a native value onto the RESP object model under a protocol
/// revision.
pub trait ToResp {
    fn to_resp(&self, version: Version) -> Result<Object, ValueError>;
}

/// Encodes a native value straight to wire bytes, enforcing the revision
/// over the produced tree.
pub fn to_bytes<T: ToResp + ?Sized>(value: &T, version: Version) -> Result<Vec<u8>, ValueError> {
    let object = value.to_resp(version)?;
    Ok(object.encode(version)?)
}

impl<T: ToResp + ?Sized> ToResp for &T {
    fn to_resp(&self, version: Version) -> Result<Object, ValueError> {
        (**self).to_resp(version)
    }
}

impl ToResp for bool {
    fn to_resp(&self, version: Version) -> Result<Object, ValueError> {
        Ok(match version {
            Version::V3 => Object::Boolean(*self),
            Version::V2 => Object::Integer(i64::from(*self)),
        })
    }
}

macro_rules! impl_to_resp_int {
    ($($ty:ty),*) => {$(
        impl ToResp for $ty {
            fn to_resp(&self, _version: Version) -> Result<Object, ValueError> {
                Ok(Object::Integer(i64::from(*self)))
            }
        }
    )*};
}

impl_to_resp_int!(i8, i16, i32, i64, u8, u16, u32);

impl ToResp for isize {
    fn to_resp(&self, _version: Version) -> Result<Object, ValueError> {
        Ok(Object::Integer(*self as i64))
    }
}

impl ToResp for u64 {
    fn to_resp(&self, _version: Version) -> Result<Object, ValueError> {
        // Beyond i64 the integer wire type cannot carry it; fall back to
        // the textual form.
        Ok(match i64::try_from(*self) {
            Ok(n) => Object::Integer(n),
            Err(_) => Object::simple_string(self.to_string()),
        })
    }
}

impl ToResp for usize {
    fn to_resp(&self, version: Version) -> Result<Object, ValueError> {
        (*self as u64).to_resp(version)
    }
}

impl ToResp for f64 {
    fn to_resp(&self, version: Version) -> Result<Object, ValueError> {
        Ok(match version {
            Version::V3 => Object::Double(*self),
            Version::V2 => Object::simple_string(format_double(*self)),
        })
    }
}

impl ToResp for f32 {
    fn to_resp(&self, version: Version) -> Result<Object, ValueError> {
        f64::from(*self).to_resp(version)
    }
}

impl ToResp for str {
    fn to_resp(&self, _version: Version) -> Result<Object, ValueError> {
        Ok(string_object(self))
    }
}

impl ToResp for String {
    fn to_resp(&self, version: Version) -> Result<Object, ValueError> {
        self.as_str().to_resp(version)
    }
}

impl ToResp for Binary {
    fn to_resp(&self, _version: Version) -> Result<Object, ValueError> {
        Ok(Object::BulkString(self.0.clone()))
    }
}

impl<T: ToResp> ToResp for [T] {
    fn to_resp(&self, version: Version) -> Result<Object, ValueError> {
        let mut items = Vec::with_capacity(self.len());
        for item in self {
            items.push(item.to_resp(version)?);
        }
        Ok(Object::Array(items))
    }
}

impl<T: ToResp> ToResp for Vec<T> {
    fn to_resp(&self, version: Version) -> Result<Object, ValueError> {
        self.as_slice().to_resp(version)
    }
}

impl<T: ToResp> ToResp for Option<T> {
    fn to_resp(&self, version: Version) -> Result<Object, ValueError> {
        match self {
            Some(inner) => inner.to_resp(version),
            // Null has no version-2 spelling; the encode entry point will
            // report it as unavailable rather than invent a sentinel.
            None => Ok(Object::Null),
        }
    }
}

impl<T: ToResp> ToResp for BTreeMap<String, T> {
    fn to_resp(&self, version: Version) -> Result<Object, ValueError> {
        match version {
            Version::V3 => {
                let mut pairs = Vec::with_capacity(self.len());
                for (key, value) in self {
                    pairs.push((string_object(key), value.to_resp(version)?));
                }
                Ok(Object::Map(pairs))
            }
            Version::V2 => {
                // No map wire type under v2: degrade through the JSON view
                // of the v3 shape.
                let mut pairs = Vec::with_capacity(self.len());
                for (key, value) in self {
                    pairs.push((string_object(key), value.to_resp(Version::V3)?));
                }
                let json = crate::json::object_to_json(&Object::Map(pairs));
                Ok(Object::BulkString(serde_json::to_vec(&json)?))
            }
        }
    }
}

impl ToResp for Value {
    fn to_resp(&self, version: Version) -> Result<Object, ValueError> {
        match self {
            Value::Null => Ok(Object::Null),
            Value::Bool(b) => b.to_resp(version),
            Value::Int(n) => n.to_resp(version),
            Value::UInt(n) => n.to_resp(version),
            Value::Float(f) => f.to_resp(version),
            Value::BigInt(text) => Ok(Object::big_number(text.clone())?),
            Value::Str(s) => s.as_str().to_resp(version),
            Value::Error(message) => Ok(error_object(message, version)),
            Value::Bytes(bytes) => Ok(Object::BulkString(bytes.clone())),
            Value::Array(items) => items.to_resp(version),
            Value::Record(fields) => match version {
                Version::V3 => {
                    let mut pairs = Vec::with_capacity(fields.len());
                    for (name, value) in fields {
                        pairs.push((string_object(name), value.to_resp(version)?));
                    }
                    Ok(Object::Map(pairs))
                }
                Version::V2 => {
                    let json = value_to_json(self);
                    Ok(Object::BulkString(serde_json::to_vec(&json)?))
                }
            },
        }
    }
}

/// Textual-marshaling fallback: wraps any `Display` type so its text form
/// travels as a string, for shapes with no structural rule of their own.
pub struct AsText<T: Display>(pub T);

impl<T: Display> ToResp for AsText<T> {
    fn to_resp(&self, _version: Version) -> Result<Object, ValueError> {
        Ok(string_object(&self.0.to_string()))
    }
}

/// JSON-marshaling fallback: carries an already-serialized JSON document
/// through the native value mapping.
pub struct AsJson(pub serde_json::Value);

impl ToResp for AsJson {
    fn to_resp(&self, version: Version) -> Result<Object, ValueError> {
        crate::json::json_to_value(&self.0).to_resp(version)
    }
}

/// Short terminator-free strings ride as simple strings, everything else as
/// a length-framed bulk string.
pub(crate) fn string_object(text: &str) -> Object {
    if text.len() < 64 && !text.bytes().any(|b| b == b'\r' || b == b'\n') {
        Object::simple_string(text)
    } else {
        Object::bulk_string(text)
    }
}

/// Same split for error messages, over the error wire types. Bulk error is
/// v3-only, so long messages under v2 degrade to a bulk string instead.
pub(crate) fn error_object(message: &str, version: Version) -> Object {
    if message.len() < 64 && !message.bytes().any(|b| b == b'\r' || b == b'\n') {
        Object::simple_error(message)
    } else if version == Version::V3 {
        Object::bulk_error(message)
    } else {
        Object::bulk_string(message)
    }
}
