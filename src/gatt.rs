//! GATT server seams.
//!
//! The attribute server itself lives in the host stack. Services plug into it through two
//! traits: the server implements [`GattRegistry`] so services can be registered at startup,
//! and every service implements [`AccessHandler`] so the server can forward peer reads and
//! writes to it.
use core::fmt::Debug;

use crate::att::AttErrorCode;
use crate::attribute::{GattResources, ServiceDescriptor};
use crate::cursor::WriteCursor;

/// Kind of access requested by the peer.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessOp {
    /// Read of a characteristic value.
    ReadCharacteristic,
    /// Write of a characteristic value.
    WriteCharacteristic,
    /// Read of a characteristic descriptor.
    ReadDescriptor,
    /// Write of a characteristic descriptor.
    WriteDescriptor,
}

/// An access request forwarded by the attribute server.
///
/// Reads carry the response buffer the value has to be appended to, writes carry the payload
/// received from the peer.
pub enum AttributeAccess<'a, 'r> {
    /// Read of a characteristic value.
    ReadCharacteristic(&'a mut WriteCursor<'r>),
    /// Write of a characteristic value.
    WriteCharacteristic(&'a [u8]),
    /// Read of a characteristic descriptor.
    ReadDescriptor(&'a mut WriteCursor<'r>),
    /// Write of a characteristic descriptor.
    WriteDescriptor(&'a [u8]),
}

impl AttributeAccess<'_, '_> {
    /// The operation tag of this request.
    pub fn op(&self) -> AccessOp {
        match self {
            Self::ReadCharacteristic(_) => AccessOp::ReadCharacteristic,
            Self::WriteCharacteristic(_) => AccessOp::WriteCharacteristic,
            Self::ReadDescriptor(_) => AccessOp::ReadDescriptor,
            Self::WriteDescriptor(_) => AccessOp::WriteDescriptor,
        }
    }
}

/// Handles peer access to the attributes of a registered service.
///
/// Called synchronously from the attribute server. An `Err` is sent to the peer as an
/// `ATT_ERROR_RSP` with the returned code.
pub trait AccessHandler {
    /// Serve one access to the attribute at `handle`.
    fn access(&self, handle: u16, access: AttributeAccess<'_, '_>) -> Result<(), AttErrorCode>;
}

/// Registration interface of an attribute server.
///
/// Servers with statically sized tables get told the footprint of a service before it is
/// added, so they can size or validate their storage.
pub trait GattRegistry<'d> {
    /// Error returned when the server rejects a registration step.
    type Error: Debug;

    /// Reserve room for the given resources.
    fn reserve(&mut self, resources: GattResources) -> Result<(), Self::Error>;

    /// Add a service, with `handler` serving accesses to its characteristics.
    fn add_service(
        &mut self,
        service: &'d ServiceDescriptor<'d>,
        handler: &'d dyn AccessHandler,
    ) -> Result<(), Self::Error>;
}
