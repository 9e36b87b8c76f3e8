//! The dynamic native value: every shape the mapper knows how to bridge.

/// A dynamically-typed native value, for callers that build or inspect data
/// without a static destination type. Each variant corresponds to one shape
/// rule of the mapper.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    /// Arbitrary-precision integer as base-10 text.
    BigInt(String),
    Str(String),
    /// An error message, mapped to the simple/bulk error wire types.
    Error(String),
    Bytes(Vec<u8>),
    Array(Vec<Value>),
    /// Labeled fields in order, the record shape.
    Record(Vec<(String, Value)>),
}

impl Value {
    /// Short shape name used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Int(_) | Value::UInt(_) => "integer",
            Value::Float(_) => "float",
            Value::BigInt(_) => "big integer",
            Value::Str(_) => "string",
            Value::Error(_) => "error",
            Value::Bytes(_) => "bytes",
            Value::Array(_) => "sequence",
            Value::Record(_) => "record",
        }
    }

    pub fn record(fields: impl Into<Vec<(String, Value)>>) -> Value {
        Value::Record(fields.into())
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Value {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Value {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Value {
        Value::Int(v.into())
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Value {
        Value::UInt(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Value {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Value {
        Value::Str(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Value {
        Value::Str(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Value {
        Value::Bytes(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Value {
        Value::Array(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Value {
        match v {
            Some(inner) => inner.into(),
            None => Value::Null,
        }
    }
}

/// Binary payload wrapper. `Vec<u8>` cannot get its own mapper impls next to
/// the blanket sequence impls, so byte strings opt in through this wrapper
/// and always travel as bulk strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binary(pub Vec<u8>);

impl From<Binary> for Vec<u8> {
    fn from(b: Binary) -> Vec<u8> {
        b.0
    }
}
