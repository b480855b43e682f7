/// Number of 8-bit registers traced by the simulator (`A..E`).
pub const REGISTER_COUNT: usize = 5;

/// 8-bit register identifier in the simulated 8085-style register file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[repr(u8)]
pub enum Register {
    /// Accumulator: last value read from memory, the found index, or `0xFF`.
    A = 0,
    /// Low bound of the search interval.
    B = 1,
    /// High bound of the search interval.
    C = 2,
    /// Midpoint index of the current probe.
    D = 3,
    /// Search key.
    E = 4,
}

impl Register {
    /// Ordered list of all traced registers.
    pub const ALL: [Self; REGISTER_COUNT] = [Self::A, Self::B, Self::C, Self::D, Self::E];

    /// Returns the array index for this register (`0..=4`).
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Single-letter register name as it appears in the trace.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::E => "E",
        }
    }

    /// Role the register plays in the binary search program.
    #[must_use]
    pub const fn role(self) -> &'static str {
        match self {
            Self::A => "Accumulator",
            Self::B => "low",
            Self::C => "high",
            Self::D => "mid",
            Self::E => "Key",
        }
    }
}

/// Register file snapshot: five 8-bit registers plus the `HL` memory pointer.
///
/// Updates are by value: every setter consumes the file and returns the
/// modified copy so transitions never alias an older snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct RegisterFile {
    regs: [u8; REGISTER_COUNT],
    hl: u16,
}

impl RegisterFile {
    /// Reads an 8-bit register.
    #[must_use]
    pub const fn get(&self, reg: Register) -> u8 {
        self.regs[reg.index()]
    }

    /// Returns a copy with `reg` set to `value`.
    #[must_use]
    pub const fn with(mut self, reg: Register, value: u8) -> Self {
        self.regs[reg.index()] = value;
        self
    }

    /// Reads the `HL` memory pointer.
    #[must_use]
    pub const fn hl(&self) -> u16 {
        self.hl
    }

    /// Returns a copy with `HL` set to `value`.
    #[must_use]
    pub const fn with_hl(mut self, value: u16) -> Self {
        self.hl = value;
        self
    }
}
