//! Mapper error type.

use resp_wire::{WireError, WireType};
use thiserror::Error;

/// Errors raised while bridging native values and the RESP object model.
/// Wire-level failures pass through transparently.
#[derive(Debug, Error)]
pub enum ValueError {
    #[error(transparent)]
    Wire(#[from] WireError),
    #[error("expected {expected} but decoded {found}")]
    TypeMismatch {
        expected: &'static str,
        found: WireType,
    },
    #[error("container elements must share one wire type: expected {expected} but found {found} at index {index}")]
    HeterogeneousContainer {
        expected: WireType,
        found: WireType,
        index: usize,
    },
    #[error("unknown record field `{0}`")]
    UnknownField(String),
    #[error("no RESP encoding rule applies to {0}")]
    UnsupportedShape(&'static str),
    #[error("unsupported field directive `{0}`: only a bare replacement name is allowed")]
    UnsupportedDirective(String),
    #[error("integer {0} does not fit the destination width")]
    IntegerRange(i64),
    #[error("string contents are not valid UTF-8")]
    InvalidUtf8,
    #[error("JSON fallback failed: {0}")]
    Json(#[from] serde_json::Error),
}
