//! RESP protocol revisions.

use std::fmt;

use crate::error::WireError;

/// A RESP protocol revision. Only versions 2 and 3 exist; anything else is
/// rejected at the boundary by the [`TryFrom`] impl.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Version {
    V2,
    V3,
}

impl Version {
    /// The numeric revision, as used in `HELLO` handshakes.
    pub fn as_u8(self) -> u8 {
        match self {
            Version::V2 => 2,
            Version::V3 => 3,
        }
    }
}

impl TryFrom<u8> for Version {
    type Error = WireError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(Version::V2),
            3 => Ok(Version::V3),
            other => Err(WireError::UnsupportedVersion(other)),
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}
