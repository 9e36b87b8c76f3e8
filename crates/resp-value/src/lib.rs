//! Generic value mapping between native Rust shapes and the RESP object
//! model.
//!
//! [`ToResp`] and [`FromResp`] bridge native values (booleans, numbers,
//! strings, sequences, records, optionals) to and from [`resp_wire::Object`]
//! trees, honoring the protocol revision: version-3-only wire types degrade
//! to version-2-safe encodings where the mapping rules define one (booleans
//! as integers, floats as textual simple strings, records as JSON inside a
//! bulk string) and fail with a version error where they do not.
//!
//! ```
//! use resp_value::{from_bytes, to_bytes, Value};
//! use resp_wire::Version;
//!
//! let wire = to_bytes(&vec![1i64, 2, 3], Version::V2).unwrap();
//! assert_eq!(wire, b"*3\r\n:1\r\n:2\r\n:3\r\n");
//! let back: Vec<i64> = from_bytes(&wire, Version::V2).unwrap();
//! assert_eq!(back, vec![1, 2, 3]);
//!
//! let record = Value::record(vec![("Name".into(), Value::Str("a".into()))]);
//! assert_eq!(
//!     to_bytes(&record, Version::V2).unwrap(),
//!     b"$12\r\n{\"Name\":\"a\"}\r\n"
//! );
//! ```

mod decode;
mod encode;
mod error;
mod json;
mod record;
mod value;

pub use decode::{from_bytes, FromResp};
pub use encode::{to_bytes, AsJson, AsText, ToResp};
pub use error::ValueError;
pub use json::{json_to_value, object_to_json, value_to_json};
pub use record::{record_from_resp, record_to_resp, FieldSpec, RespRecord};
pub use value::{Binary, Value};

pub use resp_wire::{Object, Version, WireError, WireType};
