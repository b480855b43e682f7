//! Simulation snapshot model.

/// Search interval bounds and midpoint arithmetic.
pub mod interval;
/// Traced register file types.
pub mod registers;
/// Run lifecycle and terminal results.
pub mod run_state;

pub use interval::SearchInterval;
pub use registers::{Register, RegisterFile, REGISTER_COUNT};
pub use run_state::{RunState, SearchResult};

use crate::trace::TraceLine;

/// One immutable snapshot of the simulated machine.
///
/// Snapshots are produced by [`crate::initialize`], [`crate::step`] and
/// [`crate::reset`] and are never modified afterwards; hosts read them through
/// accessors and replace them wholesale on every transition.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct SimulationState {
    pub(crate) array: Vec<u8>,
    pub(crate) base_address: u16,
    pub(crate) key_input: String,
    pub(crate) key_to_search: u32,
    pub(crate) registers: RegisterFile,
    pub(crate) interval: Option<SearchInterval>,
    pub(crate) mid: Option<usize>,
    pub(crate) run_state: RunState,
    pub(crate) log: Vec<String>,
}

impl Default for SimulationState {
    fn default() -> Self {
        crate::reset()
    }
}

impl SimulationState {
    /// Sorted array being searched; fixed for the session.
    #[must_use]
    pub fn array(&self) -> &[u8] {
        &self.array
    }

    /// Simulated address of `array[0]`.
    #[must_use]
    pub const fn base_address(&self) -> u16 {
        self.base_address
    }

    /// Raw key text this snapshot was built from.
    #[must_use]
    pub fn key_input(&self) -> &str {
        &self.key_input
    }

    /// Parsed search key; may exceed a byte, in which case it matches nothing.
    #[must_use]
    pub const fn key_to_search(&self) -> u32 {
        self.key_to_search
    }

    /// Reads one 8-bit register.
    #[must_use]
    pub const fn register(&self, reg: Register) -> u8 {
        self.registers.get(reg)
    }

    /// Simulated memory pointer.
    #[must_use]
    pub const fn hl(&self) -> u16 {
        self.registers.hl()
    }

    /// Current search interval; `None` before initialization.
    #[must_use]
    pub const fn interval(&self) -> Option<SearchInterval> {
        self.interval
    }

    /// Lower interval bound, if initialized.
    #[must_use]
    pub fn low(&self) -> Option<i32> {
        self.interval.map(SearchInterval::low)
    }

    /// Upper interval bound, if initialized.
    #[must_use]
    pub fn high(&self) -> Option<i32> {
        self.interval.map(SearchInterval::high)
    }

    /// Index probed by the most recent step.
    #[must_use]
    pub const fn mid(&self) -> Option<usize> {
        self.mid
    }

    /// Terminal result, once finished.
    #[must_use]
    pub const fn result(&self) -> Option<SearchResult> {
        self.run_state.result()
    }

    /// Found index with `-1` meaning "not found"; `None` while running.
    #[must_use]
    pub fn found_index(&self) -> Option<i64> {
        self.result().map(SearchResult::as_index)
    }

    /// Trace log, oldest line first.
    #[must_use]
    pub fn log(&self) -> &[String] {
        &self.log
    }

    /// `true` once `initialize` has produced this run.
    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.run_state.is_initialized()
    }

    /// `true` for terminal snapshots.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.run_state.is_finished()
    }

    pub(crate) fn push_line(&mut self, line: &TraceLine) {
        self.log.push(line.to_string());
    }
}
