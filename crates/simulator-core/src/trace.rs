//! Assembly-flavored trace lines for the simulated search program.
//!
//! Every line the simulator appends to a snapshot log is produced by the
//! [`fmt::Display`] impl of [`TraceLine`], so the log text is a pure function
//! of the transition that emitted it.

use std::fmt;

/// Log line shown by a snapshot that has not been initialized yet.
pub const READY_MESSAGE: &str = "Simulation ready. Enter a key and press \"Initialize\".";

/// Zero-padding width for hexadecimal values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HexWidth {
    /// Two digits, for 8-bit registers and array values.
    Byte,
    /// Four digits, for the 16-bit memory pointer.
    Word,
}

impl HexWidth {
    /// Minimum number of hex digits rendered for this width.
    #[must_use]
    pub const fn digits(self) -> usize {
        match self {
            Self::Byte => 2,
            Self::Word => 4,
        }
    }
}

/// Renders `value` as `0x` followed by uppercase hex, zero-padded to `width`.
///
/// Values wider than `width` are printed in full, never truncated.
#[must_use]
pub fn hex(value: u64, width: HexWidth) -> String {
    format!("0x{value:0digits$X}", digits = width.digits())
}

fn byte(value: u8) -> String {
    hex(u64::from(value), HexWidth::Byte)
}

fn key_hex(key: u32) -> String {
    hex(u64::from(key), HexWidth::Byte)
}

fn word(value: u16) -> String {
    hex(u64::from(value), HexWidth::Word)
}

/// One line of the execution trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TraceLine {
    /// Placeholder shown before the first `initialize`.
    Ready,
    /// Header opening a new run.
    Initialized,
    /// `LXI H`: load the array base address into `HL`.
    LoadPointer {
        /// Array base address.
        base: u16,
    },
    /// `MVI E`: load the search key.
    LoadKey {
        /// Parsed key.
        key: u32,
    },
    /// `MVI B`: clear the low bound.
    LoadLow,
    /// `MVI C`: load the high bound.
    LoadHigh {
        /// Value written to register `C`.
        register: u8,
        /// Signed high bound.
        high: i32,
    },
    /// Loop check found `low > high`.
    IntervalExhausted {
        /// Low bound at the check.
        low: i32,
        /// High bound at the check.
        high: i32,
    },
    /// `MVI A, FFH` on the not-found path.
    NotFound,
    /// Header for one probe iteration.
    LoopIteration,
    /// Midpoint computation.
    CalcMid {
        /// Low bound before the probe.
        low: i32,
        /// High bound before the probe.
        high: i32,
        /// Computed midpoint.
        mid: usize,
    },
    /// `MOV D`: latch the midpoint.
    LoadMid {
        /// Value written to register `D`.
        register: u8,
    },
    /// Address computation for `array[mid]`.
    Address {
        /// Array base address.
        base: u16,
        /// Probed index.
        mid: usize,
        /// Resulting `HL` value.
        address: u16,
    },
    /// `MOV A, M`: read `array[mid]`.
    ReadMemory {
        /// Value read.
        value: u8,
    },
    /// `CMP E`: compare the read value with the key.
    Compare {
        /// Value read.
        value: u8,
        /// Search key.
        key: u32,
    },
    /// `JZ FOUND`: values equal.
    Found {
        /// Matched index.
        mid: usize,
    },
    /// `JC IS_SMALLER`: value below key.
    SearchUpper {
        /// Value read.
        value: u8,
        /// Search key.
        key: u32,
    },
    /// `INR B`: new low bound.
    IncrementLow {
        /// New low bound.
        low: i32,
    },
    /// `IS_LARGER`: value above key.
    SearchLower {
        /// Value read.
        value: u8,
        /// Search key.
        key: u32,
    },
    /// `DCR C`: new high bound.
    DecrementHigh {
        /// New high bound.
        high: i32,
    },
}

impl fmt::Display for TraceLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Ready => f.write_str(READY_MESSAGE),
            Self::Initialized => f.write_str("--- Simulation Initialized ---"),
            Self::LoadPointer { base } => {
                let base = word(base);
                write!(f, "LXI H, {base}   ; HL (base addr) = {base}")
            }
            Self::LoadKey { key } => {
                let key = key_hex(key);
                write!(f, "MVI E, {key}      ; E (key) = {key}")
            }
            Self::LoadLow => f.write_str("MVI B, 00H        ; B (low) = 0"),
            Self::LoadHigh { register, high } => {
                write!(f, "MVI C, {}H        ; C (high) = {high}", byte(register))
            }
            Self::IntervalExhausted { low, high } => {
                write!(f, "LOOP CHECK: low ({low}) > high ({high}). Key not found.")
            }
            Self::NotFound => f.write_str("NOT_FOUND: MVI A, FFH"),
            Self::LoopIteration => f.write_str("--- New Loop Iteration ---"),
            Self::CalcMid { low, high, mid } => {
                write!(f, "CALC MID: (low:{low} + high:{high}) / 2 = {mid}")
            }
            Self::LoadMid { register } => {
                let mid = byte(register);
                write!(f, "MOV D, {mid}          ; D (mid) = {mid}")
            }
            Self::Address { base, mid, address } => {
                write!(f, "GET M: HL = {} + {mid} = {}", word(base), word(address))
            }
            Self::ReadMemory { value } => {
                write!(f, "MOV A, M          ; A = ARRAY[mid] = {}", byte(value))
            }
            Self::Compare { value, key } => write!(
                f,
                "CMP E             ; Compare A ({}) with E ({})",
                byte(value),
                key_hex(key)
            ),
            Self::Found { mid } => write!(
                f,
                "JZ FOUND          ; Values are equal. Key found at index {mid}."
            ),
            Self::SearchUpper { value, key } => write!(
                f,
                "JC IS_SMALLER     ; {} < {}. Search upper half.",
                byte(value),
                key_hex(key)
            ),
            Self::IncrementLow { low } => {
                write!(f, "INR B             ; new low = mid + 1 = {low}")
            }
            Self::SearchLower { value, key } => write!(
                f,
                "IS_LARGER         ; {} > {}. Search lower half.",
                byte(value),
                key_hex(key)
            ),
            Self::DecrementHigh { high } => {
                write!(f, "DCR C             ; new high = mid - 1 = {high}")
            }
        }
    }
}
