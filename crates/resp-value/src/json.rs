//! JSON bridging for the version-2 record fallback.
//!
//! RESP2 has no map type, so record-shaped data degrades to a JSON document
//! carried inside a bulk string. These conversions are also useful on their
//! own for callers that already live in `serde_json::Value`.

use resp_wire::{format_double, Object};

use crate::value::Value;

/// Converts a native value into JSON. Shapes JSON cannot carry are spelled
/// out textually: non-finite floats and out-of-range big integers become
/// strings, raw bytes become an array of numbers.
pub fn value_to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Int(n) => serde_json::Value::from(*n),
        Value::UInt(n) => serde_json::Value::from(*n),
        Value::Float(f) => match serde_json::Number::from_f64(*f) {
            Some(number) => serde_json::Value::Number(number),
            None => serde_json::Value::String(format_double(*f)),
        },
        Value::BigInt(text) => {
            if let Ok(n) = text.parse::<i64>() {
                serde_json::Value::from(n)
            } else if let Ok(n) = text.parse::<u64>() {
                serde_json::Value::from(n)
            } else {
                serde_json::Value::String(text.clone())
            }
        }
        Value::Str(s) | Value::Error(s) => serde_json::Value::String(s.clone()),
        Value::Bytes(bytes) => {
            serde_json::Value::Array(bytes.iter().map(|&b| serde_json::Value::from(b)).collect())
        }
        Value::Array(items) => serde_json::Value::Array(items.iter().map(value_to_json).collect()),
        Value::Record(fields) => {
            let mut object = serde_json::Map::with_capacity(fields.len());
            for (name, value) in fields {
                object.insert(name.clone(), value_to_json(value));
            }
            serde_json::Value::Object(object)
        }
    }
}

/// Converts JSON back into a native value. Numbers pick the narrowest of
/// integer, unsigned, then float.
pub fn json_to_value(json: &serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(*b),
        serde_json::Value::Number(number) => {
            if let Some(n) = number.as_i64() {
                Value::Int(n)
            } else if let Some(n) = number.as_u64() {
                Value::UInt(n)
            } else {
                Value::Float(number.as_f64().unwrap_or(f64::NAN))
            }
        }
        serde_json::Value::String(s) => Value::Str(s.clone()),
        serde_json::Value::Array(items) => Value::Array(items.iter().map(json_to_value).collect()),
        serde_json::Value::Object(fields) => Value::Record(
            fields
                .iter()
                .map(|(name, value)| (name.clone(), json_to_value(value)))
                .collect(),
        ),
    }
}

/// Structural view of a decoded object tree as JSON, used when a version-3
/// shape has to degrade into the version-2 JSON fallback. String-like
/// contents are taken as UTF-8 (lossily), containers recurse, and map keys
/// are stringified from their contents.
pub fn object_to_json(object: &Object) -> serde_json::Value {
    match object {
        Object::Null => serde_json::Value::Null,
        Object::Boolean(b) => serde_json::Value::Bool(*b),
        Object::Integer(n) => serde_json::Value::from(*n),
        Object::Double(f) => match serde_json::Number::from_f64(*f) {
            Some(number) => serde_json::Value::Number(number),
            None => serde_json::Value::String(format_double(*f)),
        },
        Object::BigNumber(text) => {
            if let Ok(n) = text.parse::<i64>() {
                serde_json::Value::from(n)
            } else if let Ok(n) = text.parse::<u64>() {
                serde_json::Value::from(n)
            } else {
                serde_json::Value::String(text.clone())
            }
        }
        Object::SimpleString(bytes)
        | Object::SimpleError(bytes)
        | Object::BulkString(bytes)
        | Object::BulkError(bytes) => {
            serde_json::Value::String(String::from_utf8_lossy(bytes).into_owned())
        }
        Object::VerbatimString { text, .. } => {
            serde_json::Value::String(String::from_utf8_lossy(text).into_owned())
        }
        Object::Array(items) | Object::Set(items) | Object::Push(items) => {
            serde_json::Value::Array(items.iter().map(object_to_json).collect())
        }
        Object::Map(pairs) => {
            let mut object = serde_json::Map::with_capacity(pairs.len());
            for (key, value) in pairs {
                object.insert(key_text(key), object_to_json(value));
            }
            serde_json::Value::Object(object)
        }
    }
}

/// Stringifies a map key for the JSON view. Scalar keys use their textual
/// payload; composite keys fall back to their own JSON rendering.
fn key_text(key: &Object) -> String {
    match key {
        Object::SimpleString(bytes)
        | Object::SimpleError(bytes)
        | Object::BulkString(bytes)
        | Object::BulkError(bytes) => String::from_utf8_lossy(bytes).into_owned(),
        Object::VerbatimString { text, .. } => String::from_utf8_lossy(text).into_owned(),
        Object::Integer(n) => n.to_string(),
        Object::Double(f) => format_double(*f),
        Object::BigNumber(text) => text.clone(),
        Object::Boolean(b) => if *b { "t" } else { "f" }.to_owned(),
        Object::Null => String::new(),
        other => object_to_json(other).to_string(),
    }
}
