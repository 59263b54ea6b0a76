use core::slice;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Error type to signify an issue when converting from GATT bytes to a concrete type
pub enum FromGattError {
    /// Byte array's length did not match what was expected for the converted type
    InvalidLength,
    /// The bytes have the right length but do not encode a value of the type
    InvalidValue,
}

/// Trait to allow conversion of a fixed size type to and from a byte slice
pub trait FixedGattValue: FromGatt {
    /// Size of the type in bytes
    const SIZE: usize;
}

/// Trait to allow conversion of a type to gatt bytes
pub trait AsGatt {
    /// The minimum size the type might be
    const MIN_SIZE: usize;
    /// The maximum size the type might be
    const MAX_SIZE: usize;
    /// Converts to gatt bytes.
    /// Must return a slice of len in MIN_SIZE..=MAX_SIZE
    fn as_gatt(&self) -> &[u8];
}

/// Trait to allow conversion of gatt bytes into a type
///
/// Requires that the type implements AsGatt
pub trait FromGatt: AsGatt + Sized {
    /// Converts from gatt bytes.
    /// Must return FromGattError::InvalidLength if data.len not in MIN_SIZE..=MAX_SIZE
    fn from_gatt(data: &[u8]) -> Result<Self, FromGattError>;
}

impl FixedGattValue for u8 {
    const SIZE: usize = 1;
}

impl FromGatt for u8 {
    fn from_gatt(data: &[u8]) -> Result<Self, FromGattError> {
        match data {
            [value] => Ok(*value),
            _ => Err(FromGattError::InvalidLength),
        }
    }
}

impl AsGatt for u8 {
    const MIN_SIZE: usize = Self::SIZE;
    const MAX_SIZE: usize = Self::SIZE;

    fn as_gatt(&self) -> &[u8] {
        slice::from_ref(self)
    }
}
