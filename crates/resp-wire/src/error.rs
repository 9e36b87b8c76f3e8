//! Codec error type.

use thiserror::Error;

use crate::version::Version;
use crate::wire_type::WireType;

/// Everything that can go wrong while encoding or decoding RESP bytes.
///
/// All variants are ordinary recoverable results; the codec never panics on
/// hostile input. [`WireError::Incomplete`] is special: it means the buffer
/// simply ended before one complete value, so a buffering caller (such as
/// [`StreamingDecoder`](crate::StreamingDecoder)) may retry with more bytes.
#[derive(Debug, Error)]
pub enum WireError {
    #[error("unrecognized type identifier byte 0x{0:02x}")]
    UnrecognizedType(u8),
    #[error("malformed length header for {0}")]
    MalformedLength(WireType),
    #[error("missing terminator at end of {0}")]
    MissingTerminator(WireType),
    #[error("input ends before a complete value")]
    Incomplete,
    #[error("failed to extract {wire_type} element at index {index}: {source}")]
    LengthMismatch {
        wire_type: WireType,
        index: usize,
        #[source]
        source: Box<WireError>,
    },
    #[error("{0} is not available in RESP {1}")]
    VersionUnavailable(WireType, Version),
    #[error("{0} trailing bytes after a complete value")]
    TrailingData(usize),
    #[error("integer content is not a base-10 signed 64-bit number")]
    MalformedInteger,
    #[error("invalid boolean content byte 0x{0:02x}, expected `t` or `f`")]
    InvalidBoolean(u8),
    #[error("double content is not a decodable float")]
    MalformedDouble,
    #[error("big number content is not a base-10 integer")]
    MalformedBigNumber,
    #[error("verbatim string encoding separator is not at offset 3")]
    MalformedVerbatim,
    #[error("null carries unexpected content bytes")]
    NonEmptyNull,
    #[error("unsupported RESP version {0}")]
    UnsupportedVersion(u8),
}
