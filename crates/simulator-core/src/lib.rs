//! Core simulator crate: binary search replayed on an 8085-style register machine.
//!
//! The simulator is a pure state machine over immutable [`SimulationState`]
//! snapshots: [`initialize`] builds the first snapshot from raw key text,
//! [`step`] advances it by one loop iteration and [`reset`] returns the
//! pre-initialization default. Each transition appends assembly-flavored lines
//! to the snapshot's trace log.

/// Host-facing configuration, constants and session owner.
pub mod api;
pub use api::{
    reset, Session, SimulatorConfig, ADDRESS_SPACE_BYTES, BASE_ADDRESS, DEFAULT_ARRAY,
    DEFAULT_KEY_INPUT, MAX_ARRAY_LEN, NOT_FOUND_MARKER,
};

/// Snapshot, register file and interval model.
pub mod state;
pub use state::{
    Register, RegisterFile, RunState, SearchInterval, SearchResult, SimulationState,
    REGISTER_COUNT,
};

/// Error taxonomy for key parsing and configuration.
pub mod error;
pub use error::{ConfigError, KeyParseError};

/// Key parsing and initial snapshot construction.
pub mod init;
pub use init::{initialize, initialize_at, parse_key, parse_key_lossy};

/// Step engine.
pub mod execute;
pub use execute::{run_to_completion, step, step_with_outcome, RunOutcome, StepOutcome};

/// Trace line formatting.
pub mod trace;
pub use trace::{hex, HexWidth, TraceLine, READY_MESSAGE};

/// Display projections for presentation hosts.
pub mod view;
pub use view::{result_banner, CellView, RegisterRow, StateView};

#[cfg(test)]
use proptest as _;
