#![allow(dead_code)]

use heapless::Vec;
use trouble_link_loss::att::AttErrorCode;
use trouble_link_loss::attribute::{GattResources, ServiceDescriptor, CHARACTERISTIC_UUID16, PRIMARY_SERVICE_UUID16};
use trouble_link_loss::cursor::WriteCursor;
use trouble_link_loss::gatt::{AccessHandler, AttributeAccess, GattRegistry};
use trouble_link_loss::Uuid;

/// Default ATT MTU.
pub const ATT_MTU: usize = 23;

const ATT_READ_RSP: u8 = 0x0b;
const MAX_ATTRIBUTES: usize = 16;
const MAX_SERVICES: usize = 4;

#[derive(Debug, PartialEq, Eq)]
pub enum ServerError {
    OutOfAttributes,
    NotReserved,
}

enum Entry {
    Declaration(Vec<u8, 19>),
    Value { service: usize },
}

struct Attribute {
    handle: u16,
    uuid: Uuid,
    entry: Entry,
}

/// Minimal attribute server: hands out handles in declaration order and forwards value
/// accesses to the handler of the owning service.
pub struct MockServer<'d> {
    capacity: u16,
    reserved: GattResources,
    attributes: Vec<Attribute, MAX_ATTRIBUTES>,
    handlers: Vec<&'d dyn AccessHandler, MAX_SERVICES>,
}

impl<'d> MockServer<'d> {
    pub fn new(capacity: u16) -> Self {
        Self {
            capacity,
            reserved: GattResources::default(),
            attributes: Vec::new(),
            handlers: Vec::new(),
        }
    }

    pub fn reserved(&self) -> GattResources {
        self.reserved
    }

    pub fn attribute_count(&self) -> usize {
        self.attributes.len()
    }

    /// Handle of the first attribute with the given type.
    pub fn find(&self, uuid: &Uuid) -> Option<u16> {
        self.attributes.iter().find(|a| &a.uuid == uuid).map(|a| a.handle)
    }

    /// Serve an ATT read request, returning the full read response PDU.
    pub fn read(&self, handle: u16) -> Result<Vec<u8, ATT_MTU>, AttErrorCode> {
        let attr = self.lookup(handle)?;
        let mut buf = [0; ATT_MTU];
        let mut response = WriteCursor::new(&mut buf);
        response.append(&[ATT_READ_RSP])?;
        match attr.entry {
            Entry::Declaration(ref value) => response.append(value)?,
            Entry::Value { service } => {
                self.handlers[service].access(handle, AttributeAccess::ReadCharacteristic(&mut response))?
            }
        }
        Ok(Vec::from_slice(response.written()).unwrap())
    }

    /// Serve an ATT write request.
    pub fn write(&self, handle: u16, data: &[u8]) -> Result<(), AttErrorCode> {
        let attr = self.lookup(handle)?;
        match attr.entry {
            Entry::Declaration(_) => Err(AttErrorCode::WRITE_NOT_PERMITTED),
            Entry::Value { service } => self.handlers[service].access(handle, AttributeAccess::WriteCharacteristic(data)),
        }
    }

    fn lookup(&self, handle: u16) -> Result<&Attribute, AttErrorCode> {
        self.attributes
            .iter()
            .find(|a| a.handle == handle)
            .ok_or(AttErrorCode::INVALID_HANDLE)
    }

    fn push(&mut self, uuid: Uuid, entry: Entry) -> Result<(), ServerError> {
        let handle = self.attributes.len() as u16 + 1;
        self.attributes
            .push(Attribute { handle, uuid, entry })
            .map_err(|_| ServerError::OutOfAttributes)
    }
}

impl<'d> GattRegistry<'d> for MockServer<'d> {
    type Error = ServerError;

    fn reserve(&mut self, resources: GattResources) -> Result<(), ServerError> {
        let total = self.reserved + resources;
        if total.attributes > self.capacity {
            return Err(ServerError::OutOfAttributes);
        }
        self.reserved = total;
        Ok(())
    }

    fn add_service(
        &mut self,
        service: &'d ServiceDescriptor<'d>,
        handler: &'d dyn AccessHandler,
    ) -> Result<(), ServerError> {
        let needed = self.attributes.len() as u16 + service.resources().attributes;
        if needed > self.reserved.attributes {
            return Err(ServerError::NotReserved);
        }

        let index = self.handlers.len();
        self.handlers.push(handler).map_err(|_| ServerError::OutOfAttributes)?;
        self.push(
            PRIMARY_SERVICE_UUID16,
            Entry::Declaration(Vec::from_slice(service.uuid.as_raw()).unwrap()),
        )?;
        for chr in service.characteristics {
            // Properties, value handle, characteristic UUID
            let value_handle = self.attributes.len() as u16 + 2;
            let mut decl = Vec::new();
            decl.push(chr.props.bits()).unwrap();
            decl.extend_from_slice(&value_handle.to_le_bytes()).unwrap();
            decl.extend_from_slice(chr.uuid.as_raw()).unwrap();
            self.push(CHARACTERISTIC_UUID16, Entry::Declaration(decl))?;
            self.push(chr.uuid.clone(), Entry::Value { service: index })?;
        }
        Ok(())
    }
}
