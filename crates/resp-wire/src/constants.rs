//! Wire-level constants shared by the encoder and decoder.

/// The two-byte terminator closing every RESP value and every length header.
pub const EOL: &[u8; 2] = b"\r\n";

/// Smallest possible complete wire value, `_\r\n`. Container decode uses
/// this to bound pre-allocation against the bytes actually present.
pub(crate) const MIN_VALUE_LEN: usize = 3;
