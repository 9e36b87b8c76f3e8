//! RESP version 2 and 3 wire codec.
//!
//! RESP is the length-prefixed, text/binary hybrid protocol spoken between
//! Redis-compatible clients and servers. This crate provides the codec core:
//! a typed [`Object`] model over every protocol value kind, a recursive
//! [`extract`] engine that pulls one complete value out of a buffer and
//! reports the unconsumed remainder, encoders back to wire bytes, and the
//! version table gating the types that exist only under RESP3.
//!
//! The crate performs no I/O and holds no shared state; every call is a
//! pure transformation over its input buffer. Transports that read in
//! chunks can sit a [`StreamingDecoder`] in front of [`extract`].
//!
//! ```
//! use resp_wire::{decode, Object, Version};
//!
//! let object = decode(b"*2\r\n$3\r\nfoo\r\n:42\r\n", Version::V2).unwrap();
//! assert_eq!(
//!     object,
//!     Object::array(vec![Object::bulk_string("foo"), Object::Integer(42)])
//! );
//! assert_eq!(object.encode(Version::V2).unwrap(), b"*2\r\n$3\r\nfoo\r\n:42\r\n");
//! ```

mod constants;
mod error;
mod extract;
mod object;
mod streaming;
mod version;
mod wire_type;

pub use constants::EOL;
pub use error::WireError;
pub use extract::{decode, extract};
pub use object::{format_double, parse_double, Object};
pub use streaming::StreamingDecoder;
pub use version::Version;
pub use wire_type::WireType;
