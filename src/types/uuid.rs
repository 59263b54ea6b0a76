//! UUID types.

use bt_hci::uuid::BluetoothUuid16;

/// A 16-bit, 32-bit or 128-bit UUID, stored little endian as it goes on the wire.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Uuid {
    /// 16-bit UUID
    Uuid16([u8; 2]),
    /// 32-bit UUID
    Uuid32([u8; 4]),
    /// 128-bit UUID
    Uuid128([u8; 16]),
}

impl From<BluetoothUuid16> for Uuid {
    fn from(data: BluetoothUuid16) -> Self {
        Uuid::Uuid16(data.into())
    }
}

impl From<u16> for Uuid {
    fn from(data: u16) -> Self {
        Uuid::new_short(data)
    }
}

impl Uuid {
    /// Create a new 16-bit UUID.
    pub const fn new_short(val: u16) -> Self {
        Self::Uuid16(val.to_le_bytes())
    }

    /// Get the 16-bit UUID value, if this is a short UUID.
    pub fn as_short(&self) -> Option<u16> {
        match self {
            Uuid::Uuid16(data) => Some(u16::from_le_bytes(*data)),
            _ => None,
        }
    }

    /// The UUID bytes, little endian.
    pub fn as_raw(&self) -> &[u8] {
        match self {
            Uuid::Uuid16(uuid) => uuid,
            Uuid::Uuid32(uuid) => uuid,
            Uuid::Uuid128(uuid) => uuid,
        }
    }
}
