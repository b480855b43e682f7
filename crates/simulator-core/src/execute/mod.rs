//! Step engine: advances a snapshot by one iteration of the search loop.

/// Register-width conversions.
pub mod helpers;

use std::cmp::Ordering;

use tracing::{debug, instrument};

use self::helpers::{element_address, index_register, offset_register};
use crate::trace::TraceLine;
use crate::{
    Register, RunState, SearchInterval, SearchResult, SimulationState, NOT_FOUND_MARKER,
};

/// Branch taken by one [`step_with_outcome`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum StepOutcome {
    /// Snapshot was not initialized or already finished; nothing changed.
    Idle,
    /// `array[mid] < key`; search continues in the upper half.
    NarrowedUpper {
        /// Probed index.
        mid: usize,
        /// New low bound (`mid + 1`).
        low: i32,
    },
    /// `array[mid] > key`; search continues in the lower half.
    NarrowedLower {
        /// Probed index.
        mid: usize,
        /// New high bound (`mid - 1`).
        high: i32,
    },
    /// Key matched `array[index]`.
    Found {
        /// Matched index.
        index: usize,
    },
    /// Interval exhausted without a match.
    NotFound,
}

impl StepOutcome {
    /// Returns `true` for branches that finish the run.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Found { .. } | Self::NotFound)
    }
}

/// Aggregated result of stepping a run until it terminates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    /// Number of non-idle steps taken.
    pub steps: u32,
    /// Branch taken by the last step, or [`StepOutcome::Idle`] if none ran.
    pub final_step: StepOutcome,
    /// Terminal snapshot (or the input, unchanged, when it could not step).
    pub state: SimulationState,
}

/// Advances `state` by one loop iteration.
///
/// Returns an equal snapshot when `state` is not initialized or is finished.
#[must_use]
pub fn step(state: &SimulationState) -> SimulationState {
    step_with_outcome(state).0
}

/// Advances `state` by one loop iteration and reports which branch ran.
#[must_use]
#[instrument(level = "trace", skip_all, fields(low = ?state.low(), high = ?state.high()))]
pub fn step_with_outcome(state: &SimulationState) -> (SimulationState, StepOutcome) {
    let interval = match (state.run_state, state.interval) {
        (RunState::Searching, Some(interval)) => interval,
        _ => return (state.clone(), StepOutcome::Idle),
    };

    let probe = interval
        .midpoint()
        .and_then(|mid| state.array.get(mid).map(|&value| (mid, value)));

    let mut next = state.clone();
    let outcome = match probe {
        // An interval reaching past the array can only come from a hand-built
        // snapshot; it is treated like an empty one.
        None => exhaust(&mut next, interval),
        Some((mid, value)) => probe_mid(&mut next, interval, mid, value),
    };
    (next, outcome)
}

fn exhaust(next: &mut SimulationState, interval: SearchInterval) -> StepOutcome {
    next.push_line(&TraceLine::IntervalExhausted {
        low: interval.low(),
        high: interval.high(),
    });
    next.push_line(&TraceLine::NotFound);
    next.registers = next.registers.with(Register::A, NOT_FOUND_MARKER);
    next.run_state = RunState::Finished(SearchResult::NotFound);

    debug!(
        low = interval.low(),
        high = interval.high(),
        "interval exhausted; key not found"
    );
    StepOutcome::NotFound
}

fn probe_mid(
    next: &mut SimulationState,
    interval: SearchInterval,
    mid: usize,
    value: u8,
) -> StepOutcome {
    let key = next.key_to_search;
    let base = next.base_address;
    let address = element_address(base, mid);
    let mid_register = offset_register(mid);

    for line in [
        TraceLine::LoopIteration,
        TraceLine::CalcMid {
            low: interval.low(),
            high: interval.high(),
            mid,
        },
        TraceLine::LoadMid {
            register: mid_register,
        },
        TraceLine::Address { base, mid, address },
        TraceLine::ReadMemory { value },
        TraceLine::Compare { value, key },
    ] {
        next.push_line(&line);
    }

    next.mid = Some(mid);
    let registers = next
        .registers
        .with(Register::D, mid_register)
        .with_hl(address);

    let outcome = match u32::from(value).cmp(&key) {
        Ordering::Equal => {
            next.push_line(&TraceLine::Found { mid });
            // The accumulator receives the matched index, not the value.
            next.registers = registers.with(Register::A, mid_register);
            next.run_state = RunState::Finished(SearchResult::Found(mid));
            StepOutcome::Found { index: mid }
        }
        Ordering::Less => {
            let narrowed = interval.above(mid);
            next.push_line(&TraceLine::SearchUpper { value, key });
            next.push_line(&TraceLine::IncrementLow {
                low: narrowed.low(),
            });
            next.registers = registers
                .with(Register::A, value)
                .with(Register::B, index_register(narrowed.low()));
            next.interval = Some(narrowed);
            StepOutcome::NarrowedUpper {
                mid,
                low: narrowed.low(),
            }
        }
        Ordering::Greater => {
            let narrowed = interval.below(mid);
            next.push_line(&TraceLine::SearchLower { value, key });
            next.push_line(&TraceLine::DecrementHigh {
                high: narrowed.high(),
            });
            next.registers = registers
                .with(Register::A, value)
                .with(Register::C, index_register(narrowed.high()));
            next.interval = Some(narrowed);
            StepOutcome::NarrowedLower {
                mid,
                high: narrowed.high(),
            }
        }
    };

    debug!(mid, value, key, ?outcome, "probed midpoint");
    outcome
}

/// Steps `state` until it finishes.
///
/// Every non-terminal step strictly shrinks the interval, so this returns
/// after at most `ceil(log2(len + 1)) + 1` steps.
#[must_use]
pub fn run_to_completion(state: &SimulationState) -> RunOutcome {
    let mut current = state.clone();
    let mut steps = 0_u32;
    let mut final_step = StepOutcome::Idle;

    while current.run_state == RunState::Searching {
        let (next, outcome) = step_with_outcome(&current);
        current = next;
        steps = steps.saturating_add(1);
        final_step = outcome;
    }

    RunOutcome {
        steps,
        final_step,
        state: current,
    }
}
