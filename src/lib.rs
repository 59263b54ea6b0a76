//! Link Loss Service for Bluetooth LE peripherals.
//!
//! The service exposes an alert level characteristic (UUID `0x2A06`) in the Link Loss Service
//! (UUID `0x1803`). A peer writes the level it wants the device to alert with; when the link to
//! that peer is later lost to a supervision timeout, the application gets called with the level.
//!
//! The attribute server and the GAP event loop belong to the host stack. The service plugs into
//! them through [`gatt::GattRegistry`], [`gatt::AccessHandler`] and
//! [`LinkLossService::on_disconnect`](link_loss::LinkLossService::on_disconnect).
#![no_std]

// This mod MUST go first, so that the others see its macros.
mod fmt;

pub mod codec;

pub mod att;
pub mod attribute;
pub mod cursor;
pub mod gatt;
pub mod link_loss;
pub(crate) mod types;

pub use types::gatt_traits::{AsGatt, FixedGattValue, FromGatt, FromGattError};
pub use types::uuid::Uuid;

/// Errors returned by the link loss service.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The value is not a valid alert level (0, 1 or 2).
    InvalidAlertLevel(u8),
    /// The service has already been added to an attribute server.
    AlreadyRegistered,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::InvalidAlertLevel(value) => write!(f, "invalid alert level {}", value),
            Error::AlreadyRegistered => f.write_str("service already registered"),
        }
    }
}

/// Errors raised while registering the service with an attribute server.
#[derive(Debug, PartialEq, Eq)]
pub enum RegistrationError<E> {
    /// The server cannot provide the resources the service needs.
    Footprint(E),
    /// The server rejected the service definition.
    AddService(E),
    /// The service refused to register.
    Service(Error),
}

impl<E> From<Error> for RegistrationError<E> {
    fn from(error: Error) -> Self {
        Self::Service(error)
    }
}

impl<E: core::fmt::Debug> core::fmt::Display for RegistrationError<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            RegistrationError::Footprint(e) => write!(f, "resources rejected by attribute server: {:?}", e),
            RegistrationError::AddService(e) => write!(f, "service rejected by attribute server: {:?}", e),
            RegistrationError::Service(e) => write!(f, "{}", e),
        }
    }
}

#[cfg(feature = "defmt")]
impl<E> defmt::Format for RegistrationError<E>
where
    E: defmt::Format,
{
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            RegistrationError::Footprint(e) => {
                defmt::write!(fmt, "Footprint({})", e)
            }
            RegistrationError::AddService(e) => {
                defmt::write!(fmt, "AddService({})", e)
            }
            RegistrationError::Service(e) => {
                defmt::write!(fmt, "Service({})", e)
            }
        }
    }
}

/// Re-exports of the types needed to embed the service.
pub mod prelude {
    pub use crate::att::AttErrorCode;
    pub use crate::attribute::{CharacteristicProp, GattResources, ServiceDescriptor};
    pub use crate::cursor::WriteCursor;
    pub use crate::gatt::{AccessHandler, AccessOp, AttributeAccess, GattRegistry};
    pub use crate::link_loss::{
        AlertLevel, Config, LinkLossHandler, LinkLossService, TerminationReason, LINK_LOSS_SERVICE,
    };
    pub use crate::{Error, RegistrationError};
}
