//! Incremental decoding over chunked input.
//!
//! The transport hands over whatever bytes it has; [`StreamingDecoder`]
//! buffers them and yields one complete [`Object`] per [`read`] call,
//! returning `Ok(None)` while no complete value has arrived yet.
//!
//! [`read`]: StreamingDecoder::read

use crate::error::WireError;
use crate::extract::extract;
use crate::object::Object;
use crate::version::Version;

/// Accumulates protocol bytes across chunk boundaries and decodes values as
/// they complete. The decoder itself does no I/O.
pub struct StreamingDecoder {
    buffer: Vec<u8>,
    offset: usize,
}

impl Default for StreamingDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl StreamingDecoder {
    pub fn new() -> Self {
        Self {
            buffer: Vec::new(),
            offset: 0,
        }
    }

    /// Appends a chunk of raw protocol bytes.
    pub fn push(&mut self, data: &[u8]) {
        self.buffer.extend_from_slice(data);
    }

    /// Bytes buffered but not yet consumed by a decoded value.
    pub fn pending(&self) -> usize {
        self.buffer.len() - self.offset
    }

    /// Decodes the next complete value, or `Ok(None)` if the buffered input
    /// does not yet hold one. Hard protocol errors are returned as-is and
    /// leave the buffer untouched.
    pub fn read(&mut self) -> Result<Option<Object>, WireError> {
        if self.offset >= self.buffer.len() {
            return Ok(None);
        }
        let input = &self.buffer[self.offset..];
        let (object, consumed) = match extract(input) {
            Ok((object, rest)) => (object, input.len() - rest.len()),
            Err(WireError::Incomplete) => return Ok(None),
            Err(err) => return Err(err),
        };
        self.offset += consumed;
        self.compact();
        Ok(Some(object))
    }

    /// Like [`read`](Self::read), but additionally enforces the protocol
    /// revision over the decoded tree. The value is consumed either way: a
    /// well-formed frame of the wrong revision is a semantic error, not a
    /// framing one.
    pub fn read_versioned(&mut self, version: Version) -> Result<Option<Object>, WireError> {
        match self.read()? {
            Some(object) => {
                object.check_version(version)?;
                Ok(Some(object))
            }
            None => Ok(None),
        }
    }

    /// Drops consumed bytes once they dominate the buffer, same thresholds
    /// as a read cursor compaction in any long-lived connection loop.
    fn compact(&mut self) {
        if self.offset == 0 {
            return;
        }
        if self.offset == self.buffer.len() {
            self.buffer.clear();
            self.offset = 0;
            return;
        }
        if self.offset >= 8192 || self.offset * 2 >= self.buffer.len() {
            self.buffer.drain(..self.offset);
            self.offset = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire_type::WireType;

    #[test]
    fn value_split_across_chunks() {
        let mut decoder = StreamingDecoder::new();
        decoder.push(b"$6\r\nfoo");
        assert!(decoder.read().unwrap().is_none());
        decoder.push(b"bar\r\n");
        assert_eq!(decoder.read().unwrap(), Some(Object::bulk_string("foobar")));
        assert!(decoder.read().unwrap().is_none());
        assert_eq!(decoder.pending(), 0);
    }

    #[test]
    fn multiple_values_in_one_chunk() {
        let mut decoder = StreamingDecoder::new();
        decoder.push(b":1\r\n:2\r\n:3\r\n");
        assert_eq!(decoder.read().unwrap(), Some(Object::Integer(1)));
        assert_eq!(decoder.read().unwrap(), Some(Object::Integer(2)));
        assert_eq!(decoder.read().unwrap(), Some(Object::Integer(3)));
        assert!(decoder.read().unwrap().is_none());
    }

    #[test]
    fn container_waits_for_all_elements() {
        let mut decoder = StreamingDecoder::new();
        decoder.push(b"*2\r\n+first\r\n");
        assert!(decoder.read().unwrap().is_none());
        decoder.push(b"+second\r\n");
        assert_eq!(
            decoder.read().unwrap(),
            Some(Object::array(vec![
                Object::simple_string("first"),
                Object::simple_string("second"),
            ]))
        );
    }

    #[test]
    fn byte_at_a_time_delivery() {
        let wire = b"%1\r\n+k\r\n$3\r\nv\r\n\r\n";
        let mut decoder = StreamingDecoder::new();
        let mut decoded = None;
        for &byte in wire.iter() {
            decoder.push(&[byte]);
            if let Some(object) = decoder.read().unwrap() {
                decoded = Some(object);
            }
        }
        assert_eq!(
            decoded,
            Some(Object::map(vec![(
                Object::simple_string("k"),
                Object::bulk_string(b"v\r\n".as_slice()),
            )]))
        );
    }

    #[test]
    fn hard_errors_are_not_retried_as_incomplete() {
        let mut decoder = StreamingDecoder::new();
        decoder.push(b"@nope\r\n");
        assert!(matches!(
            decoder.read(),
            Err(WireError::UnrecognizedType(b'@'))
        ));
    }

    #[test]
    fn versioned_read_gates_v3_types() {
        let mut decoder = StreamingDecoder::new();
        decoder.push(b"#t\r\n:5\r\n");
        assert!(matches!(
            decoder.read_versioned(Version::V2),
            Err(WireError::VersionUnavailable(WireType::Boolean, Version::V2))
        ));
        // The offending value was consumed; the stream continues.
        assert_eq!(
            decoder.read_versioned(Version::V2).unwrap(),
            Some(Object::Integer(5))
        );
    }
}
