//! Attribute protocol error codes reported back to the peer.
use core::fmt::Display;

use crate::codec;

/// Attribute Error Code
///
/// The error code carried by an `ATT_ERROR_RSP` PDU, see Bluetooth Core Specification
/// Version 6.0 | Vol 3, Part F, 3.4.1.1. Access handlers return one of these when a read or
/// write cannot be served; the attribute server turns it into the error response.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct AttErrorCode {
    value: u8,
}

impl AttErrorCode {
    /// Attempted to use a handle that isn't valid on this server
    pub const INVALID_HANDLE: Self = Self { value: 0x01 };
    /// The attribute cannot be written
    pub const WRITE_NOT_PERMITTED: Self = Self { value: 0x03 };
    /// The attribute value length is invalid for the operation
    pub const INVALID_ATTRIBUTE_VALUE_LENGTH: Self = Self { value: 0x0d };
    /// The request encountered an error that was unlikely, and could not be completed
    pub const UNLIKELY_ERROR: Self = Self { value: 0x0e };
    /// Insufficient Resources to complete the request
    pub const INSUFFICIENT_RESOURCES: Self = Self { value: 0x11 };
    /// The attribute parameter value was not allowed
    pub const VALUE_NOT_ALLOWED: Self = Self { value: 0x13 };

    /// Wrap a raw error code, e.g. an application error in the `0x80..=0x9f` range.
    pub const fn new(value: u8) -> Self {
        Self { value }
    }

    /// The raw error code as sent on the wire.
    pub const fn into_inner(self) -> u8 {
        self.value
    }
}

impl Display for AttErrorCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match *self {
            Self::INVALID_HANDLE => f.write_str("invalid handle"),
            Self::WRITE_NOT_PERMITTED => f.write_str("write not permitted"),
            Self::INVALID_ATTRIBUTE_VALUE_LENGTH => f.write_str("invalid attribute value length"),
            Self::UNLIKELY_ERROR => f.write_str("unlikely error"),
            Self::INSUFFICIENT_RESOURCES => f.write_str("insufficient resources"),
            Self::VALUE_NOT_ALLOWED => f.write_str("value not allowed"),
            other => write!(f, "error code {:#04x}", other.value),
        }
    }
}

impl From<codec::Error> for AttErrorCode {
    fn from(error: codec::Error) -> Self {
        match error {
            codec::Error::InsufficientSpace => Self::INSUFFICIENT_RESOURCES,
        }
    }
}
