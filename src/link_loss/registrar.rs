use embassy_sync::blocking_mutex::raw::RawMutex;

use super::LinkLossService;
use crate::attribute::{
    CharacteristicDescriptor, CharacteristicProp, CharacteristicProps, ServiceDescriptor, ALERT_LEVEL_UUID16,
    LINK_LOSS_SERVICE_UUID16,
};
use crate::gatt::GattRegistry;
use crate::{Error, RegistrationError};

static CHARACTERISTICS: [CharacteristicDescriptor; 1] = [CharacteristicDescriptor::new(
    ALERT_LEVEL_UUID16,
    CharacteristicProps::new(&[CharacteristicProp::Read, CharacteristicProp::Write]),
)];

/// The link loss service: one primary service holding a readable and writable alert level.
pub static LINK_LOSS_SERVICE: ServiceDescriptor<'static> =
    ServiceDescriptor::primary(LINK_LOSS_SERVICE_UUID16, &CHARACTERISTICS);

impl<'d, M: RawMutex> LinkLossService<'d, M> {
    /// Register the service with the attribute server.
    ///
    /// Reserves the resources of [`LINK_LOSS_SERVICE`] and then adds it with `self` as access
    /// handler. Must be called once, before the server accepts connections.
    pub fn try_init<R: GattRegistry<'d>>(&'d self, registry: &mut R) -> Result<(), RegistrationError<R::Error>> {
        // Claimed in one lock section; released again if the server rejects the service
        let claimed = self.with_state(|state| !core::mem::replace(&mut state.registered, true));
        if !claimed {
            return Err(RegistrationError::Service(Error::AlreadyRegistered));
        }

        let service: &'d ServiceDescriptor<'d> = &LINK_LOSS_SERVICE;
        let result = registry
            .reserve(service.resources())
            .map_err(|e| {
                error!("[lls] attribute server rejected the service resources");
                RegistrationError::Footprint(e)
            })
            .and_then(|_| {
                registry.add_service(service, self).map_err(|e| {
                    error!("[lls] attribute server rejected the service");
                    RegistrationError::AddService(e)
                })
            });
        if result.is_err() {
            self.with_state(|state| state.registered = false);
        }
        result?;

        info!("[lls] service registered");
        Ok(())
    }

    /// Register the service with the attribute server, panicking if that fails.
    ///
    /// Nothing can work without the service being in the attribute table, so a rejected
    /// registration is a startup invariant violation. Use [`Self::try_init`] to handle it instead.
    pub fn init<R: GattRegistry<'d>>(&'d self, registry: &mut R) {
        if let Err(e) = self.try_init(registry) {
            panic!("link loss service registration failed: {:?}", e);
        }
    }

    /// True once the service has been added to an attribute server.
    pub fn is_registered(&self) -> bool {
        self.with_state(|state| state.registered)
    }
}
