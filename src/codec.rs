//! Errors raised while writing attribute values into a response buffer.

/// Errors raised while encoding into or decoding from a byte buffer.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The destination buffer has no room left for the value.
    InsufficientSpace,
}
