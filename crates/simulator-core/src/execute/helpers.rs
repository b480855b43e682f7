//! Register-width conversions shared by the initializer and the step engine.
//!
//! The simulated registers are 8 bits wide and `HL` is 16 bits wide; values
//! wrap exactly as `INR`/`DCR`/`DAD` would on the real part.

/// Low byte of a signed interval bound, as loaded into `B` or `C`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub const fn index_register(bound: i32) -> u8 {
    bound as u8
}

/// Low byte of an array index, as loaded into `A` or `D`.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub const fn offset_register(index: usize) -> u8 {
    index as u8
}

/// Low byte of the search key, as loaded into `E`.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub const fn key_register(key: u32) -> u8 {
    key as u8
}

/// `HL` value addressing `array[index]`.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub const fn element_address(base: u16, index: usize) -> u16 {
    base.wrapping_add(index as u16)
}

#[cfg(test)]
mod tests {
    use super::{element_address, index_register, key_register, offset_register};

    #[test]
    fn index_register_wraps_negative_high_to_ff() {
        assert_eq!(index_register(-1), 0xFF);
        assert_eq!(index_register(0), 0);
        assert_eq!(index_register(9), 9);
    }

    #[test]
    fn offset_register_keeps_low_byte() {
        assert_eq!(offset_register(5), 5);
        assert_eq!(offset_register(0x1FF), 0xFF);
    }

    #[test]
    fn key_register_keeps_low_byte() {
        assert_eq!(key_register(0x66), 0x66);
        assert_eq!(key_register(0x100), 0x00);
        assert_eq!(key_register(u32::MAX), 0xFF);
    }

    #[test]
    fn element_address_adds_offset_to_base() {
        assert_eq!(element_address(0x3000, 0), 0x3000);
        assert_eq!(element_address(0x3000, 7), 0x3007);
        assert_eq!(element_address(0xFFFF, 1), 0x0000);
    }
}
