//! GATT schema description.
//!
//! A [`ServiceDescriptor`] is the static shape of a service as handed to the attribute server:
//! its UUID and the ordered list of characteristics it contains. The server owns handle
//! allocation; the descriptor only says what has to be allocated.
pub use crate::types::uuid::Uuid;

/// UUID for primary service
pub const PRIMARY_SERVICE_UUID16: Uuid = Uuid::new_short(0x2800);

/// UUID for characteristic declaration
pub const CHARACTERISTIC_UUID16: Uuid = Uuid::new_short(0x2803);

/// UUID for the link loss service
pub const LINK_LOSS_SERVICE_UUID16: Uuid = Uuid::new_short(0x1803);

/// UUID for the alert level characteristic
pub const ALERT_LEVEL_UUID16: Uuid = Uuid::new_short(0x2A06);

/// Characteristic properties
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum CharacteristicProp {
    /// Broadcast
    Broadcast = 0x01,
    /// Read
    Read = 0x02,
    /// Write without response
    WriteWithoutResponse = 0x04,
    /// Write
    Write = 0x08,
    /// Notify
    Notify = 0x10,
    /// Indicate
    Indicate = 0x20,
    /// Authenticated writes
    AuthenticatedWrite = 0x40,
    /// Extended properties
    Extended = 0x80,
}

/// Properties of a characteristic, as carried in its declaration.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharacteristicProps(u8);

impl CharacteristicProps {
    /// Combine a set of properties. Usable in `const` and `static` items.
    pub const fn new(props: &[CharacteristicProp]) -> Self {
        let mut val: u8 = 0;
        let mut i = 0;
        while i < props.len() {
            val |= props[i] as u8;
            i += 1;
        }
        Self(val)
    }

    /// Check if any of the properties are set.
    pub fn any(&self, props: &[CharacteristicProp]) -> bool {
        props.iter().any(|p| (*p as u8) & self.0 != 0)
    }

    /// Raw property bits.
    pub fn bits(&self) -> u8 {
        self.0
    }
}

impl<'a> From<&'a [CharacteristicProp]> for CharacteristicProps {
    fn from(props: &'a [CharacteristicProp]) -> Self {
        Self::new(props)
    }
}

impl<const T: usize> From<[CharacteristicProp; T]> for CharacteristicProps {
    fn from(props: [CharacteristicProp; T]) -> Self {
        Self::new(&props)
    }
}

/// A characteristic within a service.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone)]
pub struct CharacteristicDescriptor {
    /// Characteristic type.
    pub uuid: Uuid,
    /// Operations a peer may perform on the value.
    pub props: CharacteristicProps,
}

impl CharacteristicDescriptor {
    /// Create a characteristic descriptor.
    pub const fn new(uuid: Uuid, props: CharacteristicProps) -> Self {
        Self { uuid, props }
    }

    /// True if the characteristic gets a client characteristic configuration descriptor.
    pub fn has_cccd(&self) -> bool {
        self.props.any(&[CharacteristicProp::Notify, CharacteristicProp::Indicate])
    }
}

/// A primary GATT service and its characteristics, in declaration order.
///
/// Servers declare it with an attribute of type [`PRIMARY_SERVICE_UUID16`].
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug)]
pub struct ServiceDescriptor<'d> {
    /// UUID of the service.
    pub uuid: Uuid,
    /// Characteristics of the service.
    pub characteristics: &'d [CharacteristicDescriptor],
}

impl<'d> ServiceDescriptor<'d> {
    /// Describe a primary service.
    pub const fn primary(uuid: Uuid, characteristics: &'d [CharacteristicDescriptor]) -> Self {
        Self { uuid, characteristics }
    }

    /// Resources an attribute server has to reserve to host this service.
    ///
    /// One attribute for the service declaration, then for every characteristic a declaration
    /// and a value attribute, plus a CCCD when it can notify or indicate.
    pub fn resources(&self) -> GattResources {
        let mut res = GattResources {
            services: 1,
            attributes: 1,
            ..GattResources::default()
        };
        for chr in self.characteristics {
            res.characteristics += 1;
            res.attributes += 2;
            if chr.has_cccd() {
                res.cccds += 1;
                res.descriptors += 1;
                res.attributes += 1;
            }
        }
        res
    }
}

/// Configuration footprint of one or more services.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GattResources {
    /// Service declarations.
    pub services: u16,
    /// Characteristics.
    pub characteristics: u16,
    /// Descriptors, CCCDs included.
    pub descriptors: u16,
    /// Client characteristic configuration descriptors.
    pub cccds: u16,
    /// Total attribute handles.
    pub attributes: u16,
}

impl core::ops::Add for GattResources {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            services: self.services + rhs.services,
            characteristics: self.characteristics + rhs.characteristics,
            descriptors: self.descriptors + rhs.descriptors,
            cccds: self.cccds + rhs.cccds,
            attributes: self.attributes + rhs.attributes,
        }
    }
}
