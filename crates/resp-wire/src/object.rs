//! The RESP object model: one variant per wire type.
//!
//! An [`Object`] is immutable once constructed. It is built either by the
//! extraction engine ([`extract`](crate::extract)) or by the constructors
//! here when assembling an outgoing message. Composite variants own their
//! children outright; re-decoding always builds a fresh tree.

use crate::constants::EOL;
use crate::error::WireError;
use crate::version::Version;
use crate::wire_type::WireType;

/// A decoded or to-be-encoded RESP value.
///
/// Simple strings and simple errors must not contain the terminator
/// sequence; the encoder does not validate this and leaves it to the
/// caller.
#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    SimpleString(Vec<u8>),
    SimpleError(Vec<u8>),
    Integer(i64),
    BulkString(Vec<u8>),
    Array(Vec<Object>),
    Null,
    Boolean(bool),
    Double(f64),
    /// Arbitrary-precision integer kept as its validated ASCII base-10 text
    /// (optional sign plus digits). Use [`Object::big_number`] to build one.
    BigNumber(String),
    BulkError(Vec<u8>),
    VerbatimString {
        /// The mandatory 3-byte encoding tag, e.g. `txt` or `mkd`.
        encoding: [u8; 3],
        text: Vec<u8>,
    },
    /// Key/value pairs in construction order. Wire order is whatever order
    /// the pairs are stored in; the protocol treats entries as unordered.
    Map(Vec<(Object, Object)>),
    Set(Vec<Object>),
    Push(Vec<Object>),
}

impl Object {
    pub fn simple_string(bytes: impl Into<Vec<u8>>) -> Object {
        Object::SimpleString(bytes.into())
    }

    pub fn simple_error(bytes: impl Into<Vec<u8>>) -> Object {
        Object::SimpleError(bytes.into())
    }

    pub fn bulk_string(bytes: impl Into<Vec<u8>>) -> Object {
        Object::BulkString(bytes.into())
    }

    pub fn bulk_error(bytes: impl Into<Vec<u8>>) -> Object {
        Object::BulkError(bytes.into())
    }

    /// Builds a verbatim string. The encoding tag is exactly three bytes by
    /// construction, which is what keeps the colon at offset 3 on the wire.
    pub fn verbatim(encoding: [u8; 3], text: impl Into<Vec<u8>>) -> Object {
        Object::VerbatimString {
            encoding,
            text: text.into(),
        }
    }

    /// Validates and stores an arbitrary-precision base-10 integer. The
    /// text must be an optional `+`/`-` sign followed by one or more ASCII
    /// digits and nothing else.
    pub fn big_number(text: impl Into<String>) -> Result<Object, WireError> {
        let text = text.into();
        if !is_big_number_text(text.as_bytes()) {
            return Err(WireError::MalformedBigNumber);
        }
        Ok(Object::BigNumber(text))
    }

    pub fn array(items: impl Into<Vec<Object>>) -> Object {
        Object::Array(items.into())
    }

    pub fn set(items: impl Into<Vec<Object>>) -> Object {
        Object::Set(items.into())
    }

    pub fn push(items: impl Into<Vec<Object>>) -> Object {
        Object::Push(items.into())
    }

    pub fn map(pairs: impl Into<Vec<(Object, Object)>>) -> Object {
        Object::Map(pairs.into())
    }

    /// The identifier byte this value carries on the wire.
    pub fn wire_type(&self) -> WireType {
        match self {
            Object::SimpleString(_) => WireType::SimpleString,
            Object::SimpleError(_) => WireType::SimpleError,
            Object::Integer(_) => WireType::Integer,
            Object::BulkString(_) => WireType::BulkString,
            Object::Array(_) => WireType::Array,
            Object::Null => WireType::Null,
            Object::Boolean(_) => WireType::Boolean,
            Object::Double(_) => WireType::Double,
            Object::BigNumber(_) => WireType::BigNumber,
            Object::BulkError(_) => WireType::BulkError,
            Object::VerbatimString { .. } => WireType::VerbatimString,
            Object::Map(_) => WireType::Map,
            Object::Set(_) => WireType::Set,
            Object::Push(_) => WireType::Push,
        }
    }

    /// The body bytes of the serialized form: everything between the leading
    /// type byte and the trailing terminator. Two-part forms (bulk and
    /// verbatim strings, errors) include their internal length header and
    /// intermediate terminator.
    pub fn contents(&self) -> Vec<u8> {
        let bytes = self.to_bytes();
        bytes[1..bytes.len() - EOL.len()].to_vec()
    }

    /// Serializes to the full wire form using the complete version-3
    /// repertoire. Use [`Object::encode`] when a protocol revision must be
    /// enforced.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.write_bytes(&mut out);
        out
    }

    /// Serializes under the given protocol revision, failing with
    /// [`WireError::VersionUnavailable`] if this value or any descendant
    /// uses a version-3-only type under version 2.
    pub fn encode(&self, version: Version) -> Result<Vec<u8>, WireError> {
        self.check_version(version)?;
        Ok(self.to_bytes())
    }

    /// Recursively verifies that every wire type in this tree exists under
    /// the given revision.
    pub fn check_version(&self, version: Version) -> Result<(), WireError> {
        let wire_type = self.wire_type();
        if !wire_type.available_in(version) {
            return Err(WireError::VersionUnavailable(wire_type, version));
        }
        match self {
            Object::Array(items) | Object::Set(items) | Object::Push(items) => {
                for item in items {
                    item.check_version(version)?;
                }
            }
            Object::Map(pairs) => {
                for (key, value) in pairs {
                    key.check_version(version)?;
                    value.check_version(version)?;
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Looks a value up by key in a `Map`. Keys compare by value equality;
    /// entries are scanned in stored order. Returns `None` for non-map
    /// objects and absent keys.
    pub fn get(&self, key: &Object) -> Option<&Object> {
        match self {
            Object::Map(pairs) => pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    fn write_bytes(&self, out: &mut Vec<u8>) {
        out.push(self.wire_type().byte());
        match self {
            Object::SimpleString(bytes)
            | Object::SimpleError(bytes) => {
                out.extend_from_slice(bytes);
            }
            Object::Integer(n) => {
                out.extend_from_slice(n.to_string().as_bytes());
            }
            Object::Null => {}
            Object::Boolean(b) => {
                out.push(if *b { b't' } else { b'f' });
            }
            Object::Double(f) => {
                out.extend_from_slice(format_double(*f).as_bytes());
            }
            Object::BigNumber(text) => {
                out.extend_from_slice(text.as_bytes());
            }
            Object::BulkString(payload) | Object::BulkError(payload) => {
                out.extend_from_slice(payload.len().to_string().as_bytes());
                out.extend_from_slice(EOL);
                out.extend_from_slice(payload);
            }
            Object::VerbatimString { encoding, text } => {
                let declared = encoding.len() + 1 + text.len();
                out.extend_from_slice(declared.to_string().as_bytes());
                out.extend_from_slice(EOL);
                out.extend_from_slice(encoding);
                out.push(b':');
                out.extend_from_slice(text);
            }
            Object::Array(items) | Object::Set(items) | Object::Push(items) => {
                out.extend_from_slice(items.len().to_string().as_bytes());
                out.extend_from_slice(EOL);
                for item in items {
                    item.write_bytes(out);
                }
                return; // children already carry their terminators
            }
            Object::Map(pairs) => {
                out.extend_from_slice(pairs.len().to_string().as_bytes());
                out.extend_from_slice(EOL);
                for (key, value) in pairs {
                    key.write_bytes(out);
                    value.write_bytes(out);
                }
                return;
            }
        }
        out.extend_from_slice(EOL);
    }
}

/// Formats a double the way RESP3 spells it: `inf`, `-inf`, and `nan` for
/// the non-finite values, shortest round-trip-safe decimal otherwise.
pub fn format_double(value: f64) -> String {
    if value.is_nan() {
        "nan".to_owned()
    } else if value.is_infinite() {
        if value > 0.0 { "inf" } else { "-inf" }.to_owned()
    } else {
        value.to_string()
    }
}

/// Parses RESP3 double text, accepting the `inf`/`-inf`/`nan` spellings on
/// top of ordinary decimal and exponent notation.
pub fn parse_double(text: &[u8]) -> Option<f64> {
    let text = std::str::from_utf8(text).ok()?;
    match text {
        "inf" | "+inf" => Some(f64::INFINITY),
        "-inf" => Some(f64::NEG_INFINITY),
        "nan" | "-nan" => Some(f64::NAN),
        other => other.parse::<f64>().ok(),
    }
}

pub(crate) fn is_big_number_text(text: &[u8]) -> bool {
    let digits = match text.first() {
        Some(b'+') | Some(b'-') => &text[1..],
        _ => text,
    };
    !digits.is_empty() && digits.iter().all(u8::is_ascii_digit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_wire_forms() {
        assert_eq!(Object::simple_string("OK").to_bytes(), b"+OK\r\n");
        assert_eq!(Object::simple_error("ERR nope").to_bytes(), b"-ERR nope\r\n");
        assert_eq!(Object::Integer(-42).to_bytes(), b":-42\r\n");
        assert_eq!(Object::Null.to_bytes(), b"_\r\n");
        assert_eq!(Object::Boolean(true).to_bytes(), b"#t\r\n");
        assert_eq!(Object::Boolean(false).to_bytes(), b"#f\r\n");
        assert_eq!(Object::Double(1.5).to_bytes(), b",1.5\r\n");
        assert_eq!(Object::Double(f64::INFINITY).to_bytes(), b",inf\r\n");
        assert_eq!(
            Object::big_number("3492890328409238509324850943850943825024385")
                .unwrap()
                .to_bytes(),
            b"(3492890328409238509324850943850943825024385\r\n".as_slice()
        );
    }

    #[test]
    fn two_part_wire_forms() {
        assert_eq!(Object::bulk_string("foobar").to_bytes(), b"$6\r\nfoobar\r\n");
        assert_eq!(Object::bulk_string("").to_bytes(), b"$0\r\n\r\n");
        assert_eq!(Object::bulk_error("SYNTAX").to_bytes(), b"!6\r\nSYNTAX\r\n");
        assert_eq!(
            Object::verbatim(*b"txt", "Hello!!").to_bytes(),
            b"=11\r\ntxt:Hello!!\r\n"
        );
    }

    #[test]
    fn composite_wire_forms() {
        let arr = Object::array(vec![Object::bulk_string("foo"), Object::Integer(42)]);
        assert_eq!(arr.to_bytes(), b"*2\r\n$3\r\nfoo\r\n:42\r\n");
        assert_eq!(Object::array(vec![]).to_bytes(), b"*0\r\n");

        let map = Object::map(vec![(
            Object::simple_string("key"),
            Object::Integer(1),
        )]);
        assert_eq!(map.to_bytes(), b"%1\r\n+key\r\n:1\r\n");

        let set = Object::set(vec![Object::Integer(1)]);
        assert_eq!(set.to_bytes(), b"~1\r\n:1\r\n");
        let push = Object::push(vec![Object::simple_string("msg")]);
        assert_eq!(push.to_bytes(), b">1\r\n+msg\r\n");
    }

    #[test]
    fn contents_excludes_type_byte_and_trailing_terminator() {
        assert_eq!(Object::simple_string("OK").contents(), b"OK");
        assert_eq!(Object::Null.contents(), b"");
        assert_eq!(Object::bulk_string("foobar").contents(), b"6\r\nfoobar");
        assert_eq!(Object::array(vec![]).contents(), b"0");
    }

    #[test]
    fn version_gate_is_recursive() {
        let nested = Object::array(vec![Object::Integer(1), Object::Boolean(true)]);
        assert!(nested.check_version(Version::V3).is_ok());
        let err = nested.check_version(Version::V2).unwrap_err();
        assert!(matches!(
            err,
            WireError::VersionUnavailable(WireType::Boolean, Version::V2)
        ));
        assert!(nested.encode(Version::V2).is_err());
        assert_eq!(
            nested.encode(Version::V3).unwrap(),
            nested.to_bytes()
        );
    }

    #[test]
    fn map_lookup_by_value_equality() {
        let map = Object::map(vec![
            (Object::simple_string("a"), Object::Integer(1)),
            (Object::bulk_string("b"), Object::Integer(2)),
        ]);
        assert_eq!(
            map.get(&Object::bulk_string("b")),
            Some(&Object::Integer(2))
        );
        assert_eq!(map.get(&Object::simple_string("c")), None);
        assert_eq!(Object::Integer(1).get(&Object::Null), None);
    }

    #[test]
    fn big_number_rejects_non_integer_text() {
        assert!(Object::big_number("123").is_ok());
        assert!(Object::big_number("-123").is_ok());
        assert!(Object::big_number("+7").is_ok());
        assert!(Object::big_number("").is_err());
        assert!(Object::big_number("-").is_err());
        assert!(Object::big_number("12.5").is_err());
        assert!(Object::big_number("0x10").is_err());
    }

    #[test]
    fn double_text_roundtrip() {
        for value in [0.0, -1.25, 1e300, f64::MIN_POSITIVE, 3.15] {
            let text = format_double(value);
            assert_eq!(parse_double(text.as_bytes()), Some(value));
        }
        assert_eq!(parse_double(b"inf"), Some(f64::INFINITY));
        assert_eq!(parse_double(b"-inf"), Some(f64::NEG_INFINITY));
        assert!(parse_double(b"nan").unwrap().is_nan());
        assert_eq!(parse_double(b"bogus"), None);
    }
}
