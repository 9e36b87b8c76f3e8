//! The wire type table: one identifier byte per value kind, each tied to
//! the protocol revision that introduced it.

use std::fmt;

use crate::version::Version;

/// The single identifying byte at the start of every encoded RESP value.
///
/// The version-2 repertoire is `+ - : $ *`; version 3 adds the remaining
/// nine identifiers without overlapping any version-2 byte. Push carries its
/// own dedicated `>` tag and is never conflated with Set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum WireType {
    SimpleString = b'+',
    SimpleError = b'-',
    Integer = b':',
    BulkString = b'$',
    Array = b'*',
    Null = b'_',
    Boolean = b'#',
    Double = b',',
    BigNumber = b'(',
    BulkError = b'!',
    VerbatimString = b'=',
    Map = b'%',
    Set = b'~',
    Push = b'>',
}

impl WireType {
    /// Every wire type, version-2 repertoire first.
    pub const ALL: [WireType; 14] = [
        WireType::SimpleString,
        WireType::SimpleError,
        WireType::Integer,
        WireType::BulkString,
        WireType::Array,
        WireType::Null,
        WireType::Boolean,
        WireType::Double,
        WireType::BigNumber,
        WireType::BulkError,
        WireType::VerbatimString,
        WireType::Map,
        WireType::Set,
        WireType::Push,
    ];

    /// Looks up an identifier byte in the type table. Returns `None` for
    /// bytes outside the combined v2 + v3 repertoire.
    pub fn from_byte(byte: u8) -> Option<WireType> {
        match byte {
            b'+' => Some(WireType::SimpleString),
            b'-' => Some(WireType::SimpleError),
            b':' => Some(WireType::Integer),
            b'$' => Some(WireType::BulkString),
            b'*' => Some(WireType::Array),
            b'_' => Some(WireType::Null),
            b'#' => Some(WireType::Boolean),
            b',' => Some(WireType::Double),
            b'(' => Some(WireType::BigNumber),
            b'!' => Some(WireType::BulkError),
            b'=' => Some(WireType::VerbatimString),
            b'%' => Some(WireType::Map),
            b'~' => Some(WireType::Set),
            b'>' => Some(WireType::Push),
            _ => None,
        }
    }

    /// The identifier byte written to the wire.
    pub fn byte(self) -> u8 {
        self as u8
    }

    /// The protocol revision that introduced this type.
    pub fn version(self) -> Version {
        match self {
            WireType::SimpleString
            | WireType::SimpleError
            | WireType::Integer
            | WireType::BulkString
            | WireType::Array => Version::V2,
            _ => Version::V3,
        }
    }

    /// True for the original version-2 repertoire.
    pub fn is_v2(self) -> bool {
        self.version() == Version::V2
    }

    /// True for the identifiers added by version 3.
    pub fn is_v3(self) -> bool {
        self.version() == Version::V3
    }

    /// Whether this type may appear on the wire under the given revision.
    /// Version 3 is a strict superset of version 2.
    pub fn available_in(self, version: Version) -> bool {
        self.version() <= version
    }
}

impl fmt::Display for WireType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WireType::SimpleString => "Simple String",
            WireType::SimpleError => "Simple Error",
            WireType::Integer => "Integer",
            WireType::BulkString => "Bulk String",
            WireType::Array => "Array",
            WireType::Null => "Null",
            WireType::Boolean => "Boolean",
            WireType::Double => "Double",
            WireType::BigNumber => "Big Number",
            WireType::BulkError => "Bulk Error",
            WireType::VerbatimString => "Verbatim String",
            WireType::Map => "Map",
            WireType::Set => "Set",
            WireType::Push => "Push",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_roundtrip() {
        for wire_type in WireType::ALL {
            assert_eq!(WireType::from_byte(wire_type.byte()), Some(wire_type));
        }
        assert_eq!(WireType::from_byte(b'@'), None);
        assert_eq!(WireType::from_byte(0), None);
    }

    #[test]
    fn version_membership() {
        assert!(WireType::BulkString.is_v2());
        assert!(WireType::Push.is_v3());
        assert_eq!(
            WireType::ALL.iter().filter(|t| t.is_v2()).count(),
            5,
            "version 2 repertoire is exactly five types"
        );
        for wire_type in WireType::ALL {
            assert!(wire_type.available_in(Version::V3));
            assert_eq!(wire_type.available_in(Version::V2), wire_type.is_v2());
        }
    }

    #[test]
    fn push_and_set_have_distinct_tags() {
        assert_ne!(WireType::Push.byte(), WireType::Set.byte());
        assert_eq!(WireType::Push.byte(), b'>');
        assert_eq!(WireType::Set.byte(), b'~');
    }
}
