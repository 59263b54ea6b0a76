//! Common types.

/// Traits for conversion between types and their GATT representations
pub mod gatt_traits;

pub mod uuid;
