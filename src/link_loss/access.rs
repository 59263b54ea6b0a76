use embassy_sync::blocking_mutex::raw::RawMutex;

use super::{AlertLevel, LinkLossService};
use crate::att::AttErrorCode;
use crate::gatt::{AccessHandler, AttributeAccess};
use crate::types::gatt_traits::{AsGatt, FixedGattValue, FromGatt};

impl<'d, M: RawMutex> AccessHandler for LinkLossService<'d, M> {
    fn access(&self, handle: u16, access: AttributeAccess<'_, '_>) -> Result<(), AttErrorCode> {
        let op = access.op();
        trace!("[lls] {:?} on handle {}", op, handle);
        match access {
            AttributeAccess::ReadCharacteristic(response) => {
                let level = self.alert_level();
                response.append(level.as_gatt())?;
                Ok(())
            }
            AttributeAccess::WriteCharacteristic(data) => {
                if data.len() != AlertLevel::SIZE {
                    warn!("[lls] rejecting {} byte alert level write", data.len());
                    return Err(AttErrorCode::INVALID_ATTRIBUTE_VALUE_LENGTH);
                }
                let raw = u8::from_gatt(data).map_err(|_| AttErrorCode::UNLIKELY_ERROR)?;
                self.set_alert_level(raw)
                    .map_err(|_| self.config.rejected_value_error)
            }
            // The service has no descriptors, so the server should never route these here
            AttributeAccess::ReadDescriptor(_) | AttributeAccess::WriteDescriptor(_) => {
                warn!("[lls] unexpected {:?} on handle {}", op, handle);
                Err(AttErrorCode::UNLIKELY_ERROR)
            }
        }
    }
}
