use core::fmt;

use embassy_sync::blocking_mutex::raw::RawMutex;

use super::LinkLossService;
use crate::types::gatt_traits::{AsGatt, FixedGattValue, FromGatt, FromGattError};
use crate::Error;

/// Alert level, as written by the peer into the alert level characteristic.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum AlertLevel {
    /// No alert.
    NoAlert = 0x00,
    /// Mild alert.
    MildAlert = 0x01,
    /// High alert.
    HighAlert = 0x02,
}

impl Default for AlertLevel {
    fn default() -> Self {
        Self::NoAlert
    }
}

impl TryFrom<u8> for AlertLevel {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x00 => Ok(Self::NoAlert),
            0x01 => Ok(Self::MildAlert),
            0x02 => Ok(Self::HighAlert),
            other => Err(Error::InvalidAlertLevel(other)),
        }
    }
}

impl From<AlertLevel> for u8 {
    fn from(level: AlertLevel) -> Self {
        level as u8
    }
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NoAlert => "no alert",
            Self::MildAlert => "mild alert",
            Self::HighAlert => "high alert",
        })
    }
}

impl FixedGattValue for AlertLevel {
    const SIZE: usize = 1;
}

impl AsGatt for AlertLevel {
    const MIN_SIZE: usize = Self::SIZE;
    const MAX_SIZE: usize = Self::SIZE;

    fn as_gatt(&self) -> &[u8] {
        match self {
            Self::NoAlert => &[0x00],
            Self::MildAlert => &[0x01],
            Self::HighAlert => &[0x02],
        }
    }
}

impl FromGatt for AlertLevel {
    fn from_gatt(data: &[u8]) -> Result<Self, FromGattError> {
        let raw = u8::from_gatt(data)?;
        Self::try_from(raw).map_err(|_| FromGattError::InvalidValue)
    }
}

impl<'d, M: RawMutex> LinkLossService<'d, M> {
    /// Current alert level.
    pub fn alert_level(&self) -> AlertLevel {
        self.with_state(|state| state.level)
    }

    /// Set the alert level.
    ///
    /// Anything but 0 (no alert), 1 (mild alert) or 2 (high alert) is rejected with
    /// [`Error::InvalidAlertLevel`] and leaves the current level untouched.
    pub fn set_alert_level<L: Into<u8>>(&self, level: L) -> Result<(), Error> {
        let raw = level.into();
        let level = AlertLevel::try_from(raw).inspect_err(|_| {
            warn!("[lls] rejecting alert level {}", raw);
        })?;
        self.with_state(|state| state.level = level);
        debug!("[lls] alert level set to {:?}", level);
        Ok(())
    }
}
