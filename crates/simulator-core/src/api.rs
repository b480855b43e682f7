//! Host-facing configuration and session contract.
//!
//! Hosts either thread snapshots through [`crate::initialize`] and
//! [`crate::step`] themselves, or hold a [`Session`] which owns the single
//! current snapshot and enables initialize and step only when they would take
//! effect.

use crate::init::{initialize_at, ready_state, ready_state_with_input};
use crate::view::StateView;
use crate::{
    run_to_completion, step_with_outcome, ConfigError, RunOutcome, SimulationState, StepOutcome,
};

/// Sorted array searched by default.
pub const DEFAULT_ARRAY: [u8; 10] = [0x10, 0x20, 0x35, 0x42, 0x58, 0x66, 0x73, 0x89, 0x91, 0xA4];

/// Simulated address of `array[0]`.
pub const BASE_ADDRESS: u16 = 0x3000;

/// Key text shown before the first initialization.
pub const DEFAULT_KEY_INPUT: &str = "0x66";

/// Accumulator value written when the key is not found.
pub const NOT_FOUND_MARKER: u8 = 0xFF;

/// Longest array whose indices (and `index + 1`) fit the 8-bit registers.
pub const MAX_ARRAY_LEN: usize = 255;

/// Size of the simulated 16-bit address space.
pub const ADDRESS_SPACE_BYTES: usize = 0x1_0000;

/// Configuration constants for one embedding of the simulator.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct SimulatorConfig {
    /// Sorted array searched by every run.
    pub array: Vec<u8>,
    /// Simulated address of `array[0]`.
    pub base_address: u16,
    /// Key text shown by a freshly reset session.
    pub default_key_input: String,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            array: DEFAULT_ARRAY.to_vec(),
            base_address: BASE_ADDRESS,
            default_key_input: DEFAULT_KEY_INPUT.to_owned(),
        }
    }
}

impl SimulatorConfig {
    /// Checks that the array can be searched on the simulated machine.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ArrayTooLong`] when indices would not fit the
    /// 8-bit registers, [`ConfigError::UnsortedArray`] when the array is not
    /// ascending and [`ConfigError::AddressOverflow`] when the array would run
    /// past `0xFFFF`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let len = self.array.len();
        if len > MAX_ARRAY_LEN {
            return Err(ConfigError::ArrayTooLong { len });
        }

        if let Some(position) = self.array.windows(2).position(|pair| pair[0] > pair[1]) {
            return Err(ConfigError::UnsortedArray {
                index: position + 1,
            });
        }

        if usize::from(self.base_address) + len > ADDRESS_SPACE_BYTES {
            return Err(ConfigError::AddressOverflow {
                base: self.base_address,
                len,
            });
        }

        Ok(())
    }
}

/// Returns the default pre-initialization snapshot.
#[must_use]
pub fn reset() -> SimulationState {
    ready_state(&SimulatorConfig::default())
}

/// Owner of the current snapshot for one interactive session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    config: SimulatorConfig,
    state: SimulationState,
}

impl Default for Session {
    fn default() -> Self {
        let config = SimulatorConfig::default();
        let state = ready_state(&config);
        Self { config, state }
    }
}

impl Session {
    /// Creates a session in the ready state.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] reported by [`SimulatorConfig::validate`].
    pub fn new(config: SimulatorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let state = ready_state(&config);
        Ok(Self { config, state })
    }

    /// Current snapshot.
    #[must_use]
    pub const fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Render-ready projection of the current snapshot.
    #[must_use]
    pub fn view(&self) -> StateView {
        StateView::from_state(&self.state)
    }

    /// `true` when no run is in progress.
    #[must_use]
    pub const fn can_initialize(&self) -> bool {
        !self.state.is_initialized() || self.state.is_finished()
    }

    /// `true` while a run is in progress.
    #[must_use]
    pub const fn can_step(&self) -> bool {
        self.state.is_initialized() && !self.state.is_finished()
    }

    /// Replaces the key text, discarding any run in progress.
    pub fn set_key_input(&mut self, key_input: &str) -> &SimulationState {
        self.state = ready_state_with_input(&self.config, key_input);
        &self.state
    }

    /// Starts a run with the current key text.
    ///
    /// Ignored while a run is in progress.
    pub fn initialize(&mut self) -> &SimulationState {
        if self.can_initialize() {
            self.state = initialize_at(
                &self.state.key_input,
                &self.config.array,
                self.config.base_address,
            );
        }
        &self.state
    }

    /// Advances the current run by one step.
    pub fn step(&mut self) -> StepOutcome {
        let (next, outcome) = step_with_outcome(&self.state);
        self.state = next;
        outcome
    }

    /// Steps the current run until it finishes.
    ///
    /// The returned outcome counts only the steps taken by this call; its
    /// snapshot becomes the session's current state.
    pub fn run_to_end(&mut self) -> RunOutcome {
        let run = run_to_completion(&self.state);
        self.state = run.state.clone();
        run
    }

    /// Discards the current snapshot and returns to the ready state.
    pub fn reset(&mut self) -> &SimulationState {
        self.state = ready_state(&self.config);
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::{
        reset, Session, SimulatorConfig, BASE_ADDRESS, DEFAULT_ARRAY, DEFAULT_KEY_INPUT,
        MAX_ARRAY_LEN,
    };
    use crate::{ConfigError, StepOutcome};

    #[test]
    fn default_config_matches_published_constants() {
        let config = SimulatorConfig::default();

        assert_eq!(config.array, DEFAULT_ARRAY);
        assert_eq!(config.base_address, BASE_ADDRESS);
        assert_eq!(config.default_key_input, DEFAULT_KEY_INPUT);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_unsorted_array() {
        let config = SimulatorConfig {
            array: vec![1, 2, 5, 4],
            ..SimulatorConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::UnsortedArray { index: 3 })
        );
    }

    #[test]
    fn validate_accepts_duplicates_and_empty_arrays() {
        for array in [vec![], vec![7], vec![3, 3, 3]] {
            let config = SimulatorConfig {
                array,
                ..SimulatorConfig::default()
            };
            assert_eq!(config.validate(), Ok(()));
        }
    }

    #[test]
    fn validate_rejects_arrays_beyond_register_width() {
        let config = SimulatorConfig {
            array: vec![0; MAX_ARRAY_LEN + 1],
            ..SimulatorConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::ArrayTooLong {
                len: MAX_ARRAY_LEN + 1
            })
        );
    }

    #[test]
    fn validate_rejects_address_overflow() {
        let config = SimulatorConfig {
            base_address: 0xFFF8,
            ..SimulatorConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::AddressOverflow {
                base: 0xFFF8,
                len: 10
            })
        );

        let fits = SimulatorConfig {
            base_address: 0xFFF6,
            ..SimulatorConfig::default()
        };
        assert_eq!(fits.validate(), Ok(()));
    }

    #[test]
    fn session_gates_initialize_and_step() {
        let mut session = Session::default();
        assert!(session.can_initialize());
        assert!(!session.can_step());
        assert_eq!(session.step(), StepOutcome::Idle);

        session.initialize();
        assert!(!session.can_initialize());
        assert!(session.can_step());

        while session.can_step() {
            session.step();
        }
        assert!(session.can_initialize());
        assert_eq!(session.state().found_index(), Some(5));
    }

    #[test]
    fn run_to_end_finishes_the_current_run() {
        let mut session = Session::default();
        session.initialize();
        session.step();

        let run = session.run_to_end();
        assert_eq!(run.steps, 2);
        assert_eq!(run.final_step, StepOutcome::Found { index: 5 });
        assert_eq!(session.state(), &run.state);
        assert!(session.can_initialize());

        let again = session.run_to_end();
        assert_eq!(again.steps, 0);
        assert_eq!(again.final_step, StepOutcome::Idle);
    }

    #[test]
    fn initialize_is_ignored_during_a_run() {
        let mut session = Session::default();
        session.initialize();
        session.step();
        let mid_run = session.state().clone();

        session.initialize();
        assert_eq!(session.state(), &mid_run);
    }

    #[test]
    fn set_key_input_discards_run_and_keeps_text() {
        let mut session = Session::default();
        session.initialize();
        session.step();

        let state = session.set_key_input("0x99").clone();
        assert!(!state.is_initialized());
        assert_eq!(state.key_input(), "0x99");

        session.initialize();
        assert_eq!(session.state().key_to_search(), 0x99);
    }

    #[test]
    fn reset_restores_default_key_text() {
        let mut session = Session::default();
        session.set_key_input("12");
        session.initialize();

        assert_eq!(session.reset(), &reset());
    }

    #[test]
    fn session_new_validates_config() {
        let config = SimulatorConfig {
            array: vec![9, 1],
            ..SimulatorConfig::default()
        };
        assert_eq!(
            Session::new(config),
            Err(ConfigError::UnsortedArray { index: 1 })
        );
    }

    #[test]
    fn session_uses_configured_array_and_base() {
        let config = SimulatorConfig {
            array: vec![2, 4, 6, 8],
            base_address: 0x4000,
            default_key_input: "6".to_owned(),
        };
        let mut session = Session::new(config).expect("sorted config is valid");

        session.initialize();
        assert_eq!(session.state().hl(), 0x4000);
        assert_eq!(session.state().key_to_search(), 6);

        assert_eq!(session.step(), StepOutcome::NarrowedUpper { mid: 1, low: 2 });
        assert_eq!(session.step(), StepOutcome::Found { index: 2 });
        assert_eq!(session.state().hl(), 0x4002);
    }
}
