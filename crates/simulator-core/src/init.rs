//! Key parsing and construction of initial snapshots.

use tracing::{debug, warn};

use crate::execute::helpers::{index_register, key_register};
use crate::trace::TraceLine;
use crate::{
    KeyParseError, Register, RegisterFile, RunState, SearchInterval, SimulationState,
    SimulatorConfig, BASE_ADDRESS,
};

/// Parses raw key text into a search key.
///
/// Text starting with `0x` (any case) is read as hexadecimal, anything else as
/// decimal. The prefix is checked on the raw text, so `"  0x66"` takes the
/// decimal path and reads as `0`. The decimal path skips leading whitespace.
/// Parsing stops at the first character that is not a digit of the selected
/// base, so `"12abc"` reads as `12`.
///
/// Keys wider than a byte are kept as is: they are legal input and simply
/// never match an array element.
///
/// # Errors
///
/// Returns [`KeyParseError::Empty`] when no digits remain,
/// [`KeyParseError::InvalidDigit`] when the text does not begin with a digit
/// and [`KeyParseError::OutOfRange`] when the value exceeds `u32::MAX`.
pub fn parse_key(raw: &str) -> Result<u32, KeyParseError> {
    let (digits, radix) = strip_hex_prefix(raw).map_or((raw.trim_start(), 10), |rest| (rest, 16));

    if digits.is_empty() {
        return Err(KeyParseError::Empty);
    }

    let end = digits
        .find(|c: char| !c.is_digit(radix))
        .unwrap_or(digits.len());
    if end == 0 {
        return Err(KeyParseError::InvalidDigit);
    }

    u32::from_str_radix(&digits[..end], radix).map_err(|_| KeyParseError::OutOfRange)
}

fn strip_hex_prefix(text: &str) -> Option<&str> {
    let prefix = text.get(..2)?;
    if prefix.eq_ignore_ascii_case("0x") {
        text.get(2..)
    } else {
        None
    }
}

/// Key used in place of text that [`parse_key`] rejected.
///
/// Non-numeric text becomes `0`; numbers too wide to hold saturate, so they
/// still cannot match any byte.
const fn fallback_key(error: KeyParseError) -> u32 {
    match error {
        KeyParseError::OutOfRange => u32::MAX,
        KeyParseError::Empty | KeyParseError::InvalidDigit => 0,
    }
}

/// Parses key text, substituting a fallback key for rejected text.
#[must_use]
pub fn parse_key_lossy(raw: &str) -> u32 {
    parse_key(raw).unwrap_or_else(|error| {
        let key = fallback_key(error);
        warn!(input = raw, %error, key, "key text rejected; using fallback key");
        key
    })
}

/// Builds the pre-initialization snapshot for `config`.
#[must_use]
pub fn ready_state(config: &SimulatorConfig) -> SimulationState {
    ready_state_with_input(config, &config.default_key_input)
}

/// Builds the pre-initialization snapshot carrying `key_input` as its text.
#[must_use]
pub fn ready_state_with_input(config: &SimulatorConfig, key_input: &str) -> SimulationState {
    SimulationState {
        array: config.array.clone(),
        base_address: config.base_address,
        key_input: key_input.to_owned(),
        key_to_search: parse_key(key_input).unwrap_or_else(fallback_key),
        registers: RegisterFile::default(),
        interval: None,
        mid: None,
        run_state: RunState::Ready,
        log: vec![TraceLine::Ready.to_string()],
    }
}

/// Starts a run over `array` at the default [`BASE_ADDRESS`].
///
/// Non-numeric key text yields key `0`; this never fails.
#[must_use]
pub fn initialize(raw_key_input: &str, array: &[u8]) -> SimulationState {
    initialize_at(raw_key_input, array, BASE_ADDRESS)
}

/// Starts a run over `array` placed at `base_address`.
#[must_use]
pub fn initialize_at(raw_key_input: &str, array: &[u8], base_address: u16) -> SimulationState {
    let key = parse_key_lossy(raw_key_input);
    let interval = SearchInterval::spanning(array.len());
    let high_register = index_register(interval.high());

    let registers = RegisterFile::default()
        .with(Register::C, high_register)
        .with(Register::E, key_register(key))
        .with_hl(base_address);

    let log = [
        TraceLine::Initialized,
        TraceLine::LoadPointer { base: base_address },
        TraceLine::LoadKey { key },
        TraceLine::LoadLow,
        TraceLine::LoadHigh {
            register: high_register,
            high: interval.high(),
        },
    ]
    .iter()
    .map(ToString::to_string)
    .collect();

    debug!(
        key,
        base = base_address,
        len = array.len(),
        "simulation initialized"
    );

    SimulationState {
        array: array.to_vec(),
        base_address,
        key_input: raw_key_input.to_owned(),
        key_to_search: key,
        registers,
        interval: Some(interval),
        mid: None,
        run_state: RunState::Searching,
        log,
    }
}
