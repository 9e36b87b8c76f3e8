//! Record types with named fields, bridged through an explicit field table.
//!
//! A record maps to the Map wire type under version 3 and to a JSON object
//! inside a bulk string under version 2. Each field may carry a naming
//! directive that replaces its output name; a directive is a bare
//! replacement name and nothing more — structured options are rejected, not
//! ignored.

use resp_wire::{Object, Version};

use crate::decode::{mismatch, string_payload, FromResp};
use crate::encode::{string_object, ToResp};
use crate::error::ValueError;
use crate::json::{json_to_value, value_to_json};
use crate::value::Value;

/// One entry in a record's field table.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// The field's own name in the native type.
    pub name: &'static str,
    /// Optional naming directive replacing the output name.
    pub directive: Option<&'static str>,
}

impl FieldSpec {
    pub const fn new(name: &'static str) -> FieldSpec {
        FieldSpec {
            name,
            directive: None,
        }
    }

    pub const fn renamed(name: &'static str, directive: &'static str) -> FieldSpec {
        FieldSpec {
            name,
            directive: Some(directive),
        }
    }

    /// The name this field carries on the wire. Only the bare
    /// single-replacement-name directive form is supported; anything that
    /// smells of structured options fails.
    pub fn output_name(&self) -> Result<&'static str, ValueError> {
        match self.directive {
            None => Ok(self.name),
            Some(directive) => {
                if directive.is_empty()
                    || directive
                        .chars()
                        .any(|c| matches!(c, ',' | ' ' | '=' | ':') || c.is_whitespace())
                {
                    Err(ValueError::UnsupportedDirective(directive.to_owned()))
                } else {
                    Ok(directive)
                }
            }
        }
    }

    /// Whether a wire key addresses this field: the directive name when one
    /// is set, or the field's own name.
    fn matches(&self, key: &str) -> Result<bool, ValueError> {
        Ok(self.output_name()? == key || self.name == key)
    }
}

/// A native type with labeled fields, enumerated by a static field table.
/// This is the explicit registration-table form of record introspection:
/// the table is fixed at compile time and the accessors move dynamic
/// [`Value`]s in and out.
pub trait RespRecord: Default {
    const FIELDS: &'static [FieldSpec];

    /// Reads a field by its native name.
    fn field(&self, name: &str) -> Option<Value>;

    /// Writes a field by its native name.
    fn set_field(&mut self, name: &str, value: Value) -> Result<(), ValueError>;
}

/// Encodes a record through its field table. Intended as the body of a
/// record type's [`ToResp`] impl.
pub fn record_to_resp<T: RespRecord>(record: &T, version: Version) -> Result<Object, ValueError> {
    let mut fields = Vec::with_capacity(T::FIELDS.len());
    for spec in T::FIELDS {
        let name = spec.output_name()?;
        let value = record
            .field(spec.name)
            .ok_or_else(|| ValueError::UnknownField(spec.name.to_owned()))?;
        fields.push((name, value));
    }
    match version {
        Version::V3 => {
            let mut pairs = Vec::with_capacity(fields.len());
            for (name, value) in fields {
                pairs.push((string_object(name), value.to_resp(version)?));
            }
            Ok(Object::Map(pairs))
        }
        Version::V2 => {
            let mut object = serde_json::Map::with_capacity(fields.len());
            for (name, value) in fields {
                object.insert(name.to_owned(), value_to_json(&value));
            }
            let json = serde_json::Value::Object(object);
            Ok(Object::BulkString(serde_json::to_vec(&json)?))
        }
    }
}

/// Decodes a record through its field table. Unknown wire keys are an
/// error, never silently dropped. Intended as the body of a record type's
/// [`FromResp`](crate::FromResp) impl.
pub fn record_from_resp<T: RespRecord>(
    object: &Object,
    version: Version,
) -> Result<T, ValueError> {
    let mut record = T::default();
    match (version, object) {
        (Version::V3, Object::Map(pairs)) => {
            for (key, value) in pairs {
                let key = String::from_utf8(string_payload(key)?.to_vec())
                    .map_err(|_| ValueError::InvalidUtf8)?;
                let spec = find_field::<T>(&key)?;
                let value = Value::from_resp(value, version)?;
                record.set_field(spec.name, value)?;
            }
            Ok(record)
        }
        (Version::V2, Object::BulkString(bytes)) => {
            let json: serde_json::Value = serde_json::from_slice(bytes)?;
            let serde_json::Value::Object(fields) = json else {
                return Err(mismatch("record", object));
            };
            for (key, value) in &fields {
                let spec = find_field::<T>(key)?;
                record.set_field(spec.name, json_to_value(value))?;
            }
            Ok(record)
        }
        _ => Err(mismatch("record", object)),
    }
}

fn find_field<T: RespRecord>(key: &str) -> Result<&'static FieldSpec, ValueError> {
    for spec in T::FIELDS {
        if spec.matches(key)? {
            return Ok(spec);
        }
    }
    Err(ValueError::UnknownField(key.to_owned()))
}
