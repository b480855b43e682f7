use thiserror::Error;

use crate::MAX_ARRAY_LEN;

/// Reasons raw key text could not be read as a search key.
///
/// [`crate::initialize`] never surfaces these; it substitutes a fallback key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum KeyParseError {
    /// Nothing left to parse after trimming and prefix removal.
    #[error("key text is empty")]
    Empty,
    /// Text does not start with a digit of the selected base.
    #[error("key text does not start with a valid digit")]
    InvalidDigit,
    /// Parsed value does not fit in 32 bits.
    #[error("key does not fit in 32 bits")]
    OutOfRange,
}

/// Rejected [`crate::SimulatorConfig`] contents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
pub enum ConfigError {
    /// `array[index]` is smaller than `array[index - 1]`.
    #[error("array is not sorted ascending at index {index}")]
    UnsortedArray {
        /// First out-of-order position.
        index: usize,
    },
    /// Array indices would not fit the 8-bit index registers.
    #[error("array holds {len} values but at most {max} fit the index registers", max = MAX_ARRAY_LEN)]
    ArrayTooLong {
        /// Rejected array length.
        len: usize,
    },
    /// `base + len` runs past the 16-bit address space.
    #[error("array of {len} values at {base:#06X} overflows the 16-bit address space")]
    AddressOverflow {
        /// Configured base address.
        base: u16,
        /// Array length.
        len: usize,
    },
}
