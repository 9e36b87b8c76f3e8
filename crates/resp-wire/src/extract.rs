//! Recursive-descent extraction of RESP objects out of byte buffers.
//!
//! [`extract`] pulls exactly one complete value off the front of a buffer
//! and hands back the unconsumed remainder, so callers can thread it through
//! a larger stream. [`decode`] is the strict single-value entry point: it
//! additionally rejects trailing bytes and enforces the protocol revision.
//!
//! Bulk payloads are framed by their declared length, never by scanning for
//! terminator bytes, so payloads containing `\r\n` decode correctly. A
//! declared length is validated against the bytes actually remaining before
//! anything is allocated, which keeps hostile headers from driving large
//! pre-allocations.

use crate::constants::{EOL, MIN_VALUE_LEN};
use crate::error::WireError;
use crate::object::{is_big_number_text, parse_double, Object};
use crate::version::Version;
use crate::wire_type::WireType;

/// Extracts the first complete RESP object from `src`, returning it together
/// with the remaining bytes after its terminator.
///
/// Truncated input yields [`WireError::Incomplete`]; a buffering caller may
/// retry with more bytes. All other errors are hard protocol violations.
pub fn extract(src: &[u8]) -> Result<(Object, &[u8]), WireError> {
    let Some(&first) = src.first() else {
        return Err(WireError::Incomplete);
    };
    let wire_type = WireType::from_byte(first).ok_or(WireError::UnrecognizedType(first))?;
    match wire_type {
        WireType::SimpleString | WireType::SimpleError => extract_simple(src, wire_type),
        WireType::Integer => extract_integer(src),
        WireType::Null => extract_null(src),
        WireType::Boolean => extract_boolean(src),
        WireType::Double => extract_double(src),
        WireType::BigNumber => extract_big_number(src),
        WireType::BulkString | WireType::BulkError => extract_bulk(src, wire_type),
        WireType::VerbatimString => extract_verbatim(src),
        WireType::Array | WireType::Set | WireType::Push => extract_sequence(src, wire_type),
        WireType::Map => extract_map(src),
    }
}

/// Decodes exactly one value under the given protocol revision. Unconsumed
/// bytes are a [`WireError::TrailingData`] error, and every wire type in the
/// decoded tree must exist under `version`.
pub fn decode(src: &[u8], version: Version) -> Result<Object, WireError> {
    let (object, rest) = extract(src)?;
    if !rest.is_empty() {
        return Err(WireError::TrailingData(rest.len()));
    }
    object.check_version(version)?;
    Ok(object)
}

/// Splits off the line after the type byte, up to (excluding) the first
/// terminator. Returns the line and the bytes after the terminator. A buffer
/// with no terminator is simply incomplete: a line value can never be proven
/// malformed before its terminator arrives.
fn split_line(src: &[u8]) -> Result<(&[u8], &[u8]), WireError> {
    debug_assert!(!src.is_empty());
    match find_eol(&src[1..]) {
        Some(at) => {
            let term = 1 + at;
            Ok((&src[1..term], &src[term + EOL.len()..]))
        }
        None => Err(WireError::Incomplete),
    }
}

fn find_eol(src: &[u8]) -> Option<usize> {
    src.windows(EOL.len()).position(|pair| pair == EOL)
}

/// Parses a decimal length header. Negative, empty, and non-numeric headers
/// are malformed; RESP2's `-1` null sentinel is deliberately not a length.
fn parse_length(line: &[u8], wire_type: WireType) -> Result<usize, WireError> {
    if line.is_empty() {
        return Err(WireError::MalformedLength(wire_type));
    }
    let mut length: usize = 0;
    for &byte in line {
        if !byte.is_ascii_digit() {
            return Err(WireError::MalformedLength(wire_type));
        }
        length = length
            .checked_mul(10)
            .and_then(|n| n.checked_add(usize::from(byte - b'0')))
            .ok_or(WireError::MalformedLength(wire_type))?;
    }
    Ok(length)
}

fn extract_simple(src: &[u8], wire_type: WireType) -> Result<(Object, &[u8]), WireError> {
    let (line, rest) = split_line(src)?;
    let object = match wire_type {
        WireType::SimpleString => Object::SimpleString(line.to_vec()),
        _ => Object::SimpleError(line.to_vec()),
    };
    Ok((object, rest))
}

fn extract_integer(src: &[u8]) -> Result<(Object, &[u8]), WireError> {
    let (line, rest) = split_line(src)?;
    let text = std::str::from_utf8(line).map_err(|_| WireError::MalformedInteger)?;
    let value = text.parse::<i64>().map_err(|_| WireError::MalformedInteger)?;
    Ok((Object::Integer(value), rest))
}

fn extract_null(src: &[u8]) -> Result<(Object, &[u8]), WireError> {
    let (line, rest) = split_line(src)?;
    if !line.is_empty() {
        return Err(WireError::NonEmptyNull);
    }
    Ok((Object::Null, rest))
}

fn extract_boolean(src: &[u8]) -> Result<(Object, &[u8]), WireError> {
    let (line, rest) = split_line(src)?;
    let value = match line {
        b"t" => true,
        b"f" => false,
        other => {
            return Err(WireError::InvalidBoolean(other.first().copied().unwrap_or(0)));
        }
    };
    Ok((Object::Boolean(value), rest))
}

fn extract_double(src: &[u8]) -> Result<(Object, &[u8]), WireError> {
    let (line, rest) = split_line(src)?;
    let value = parse_double(line).ok_or(WireError::MalformedDouble)?;
    Ok((Object::Double(value), rest))
}

fn extract_big_number(src: &[u8]) -> Result<(Object, &[u8]), WireError> {
    let (line, rest) = split_line(src)?;
    if !is_big_number_text(line) {
        return Err(WireError::MalformedBigNumber);
    }
    // Validated as sign + ASCII digits above, so UTF-8 holds.
    let text = String::from_utf8(line.to_vec()).map_err(|_| WireError::MalformedBigNumber)?;
    Ok((Object::BigNumber(text), rest))
}

/// Two-part forms: decimal length header, terminator, exactly that many
/// payload bytes, terminator. The declared length is the frame; the payload
/// may itself contain `\r\n`.
fn extract_bulk(src: &[u8], wire_type: WireType) -> Result<(Object, &[u8]), WireError> {
    let (payload, rest) = extract_framed(src, wire_type)?;
    let object = match wire_type {
        WireType::BulkString => Object::BulkString(payload.to_vec()),
        _ => Object::BulkError(payload.to_vec()),
    };
    Ok((object, rest))
}

fn extract_verbatim(src: &[u8]) -> Result<(Object, &[u8]), WireError> {
    let (payload, rest) = extract_framed(src, WireType::VerbatimString)?;
    // The 3-byte encoding tag and its colon are part of the declared length.
    if payload.len() < 4 || payload[3] != b':' {
        return Err(WireError::MalformedVerbatim);
    }
    if payload[..3].contains(&b':') {
        return Err(WireError::MalformedVerbatim);
    }
    Ok((
        Object::VerbatimString {
            encoding: [payload[0], payload[1], payload[2]],
            text: payload[4..].to_vec(),
        },
        rest,
    ))
}

fn extract_framed(src: &[u8], wire_type: WireType) -> Result<(&[u8], &[u8]), WireError> {
    let (header, rest) = split_line(src)?;
    let length = parse_length(header, wire_type)?;
    // Check before touching the payload: a length the buffer cannot hold is
    // just an incomplete frame, and nothing gets allocated for it. The
    // comparison must not overflow for headers near `usize::MAX`.
    if length > rest.len().saturating_sub(EOL.len()) {
        return Err(WireError::Incomplete);
    }
    let payload = &rest[..length];
    if &rest[length..length + EOL.len()] != EOL {
        return Err(WireError::MissingTerminator(wire_type));
    }
    Ok((payload, &rest[length + EOL.len()..]))
}

fn extract_sequence(src: &[u8], wire_type: WireType) -> Result<(Object, &[u8]), WireError> {
    let (header, mut rest) = split_line(src)?;
    let count = parse_length(header, wire_type)?;
    reserve_check(count, rest.len())?;
    let mut items = Vec::with_capacity(count);
    for index in 0..count {
        let (item, tail) = extract_element(rest, wire_type, index)?;
        items.push(item);
        rest = tail;
    }
    let object = match wire_type {
        WireType::Array => Object::Array(items),
        WireType::Set => Object::Set(items),
        _ => Object::Push(items),
    };
    Ok((object, rest))
}

fn extract_map(src: &[u8]) -> Result<(Object, &[u8]), WireError> {
    let (header, mut rest) = split_line(src)?;
    let count = parse_length(header, WireType::Map)?;
    reserve_check(count.saturating_mul(2), rest.len())?;
    let mut pairs = Vec::with_capacity(count);
    for index in 0..count {
        let (key, tail) = extract_element(rest, WireType::Map, index)?;
        let (value, tail) = extract_element(tail, WireType::Map, index)?;
        pairs.push((key, value));
        rest = tail;
    }
    Ok((Object::Map(pairs), rest))
}

/// Every element occupies at least [`MIN_VALUE_LEN`] wire bytes, so a
/// declared count the remaining buffer cannot possibly satisfy is reported
/// as incomplete before any allocation happens.
fn reserve_check(elements: usize, remaining: usize) -> Result<(), WireError> {
    match elements.checked_mul(MIN_VALUE_LEN) {
        Some(need) if need <= remaining => Ok(()),
        _ => Err(WireError::Incomplete),
    }
}

fn extract_element(
    src: &[u8],
    wire_type: WireType,
    index: usize,
) -> Result<(Object, &[u8]), WireError> {
    match extract(src) {
        Ok(extracted) => Ok(extracted),
        // Incomplete must surface unwrapped so streaming callers can wait
        // for more bytes instead of treating the container as corrupt.
        Err(WireError::Incomplete) => Err(WireError::Incomplete),
        Err(err) => Err(WireError::LengthMismatch {
            wire_type,
            index,
            source: Box::new(err),
        }),
    }
}
