//! Property coverage for interval narrowing, termination and log growth.

use proptest::prelude::*;
use rstest as _;
#[cfg(feature = "serde")]
use serde as _;
use simulator_core::{initialize, step, SearchResult, SimulationState};
use thiserror as _;
use tracing as _;

fn sorted_array() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..64).prop_map(|mut array| {
        array.sort_unstable();
        array
    })
}

/// `ceil(log2(len + 1)) + 1`: probes of a non-empty interval plus the final check.
fn step_bound(len: usize) -> u32 {
    usize::BITS - len.leading_zeros() + 1
}

fn span(state: &SimulationState) -> i64 {
    state.interval().map_or(i64::MAX, |interval| interval.span())
}

fn trajectory(array: &[u8], key: u8) -> Vec<SimulationState> {
    let mut states = vec![initialize(&key.to_string(), array)];
    while let Some(last) = states.last() {
        if last.is_finished() || states.len() > 64 {
            break;
        }
        let next = step(last);
        states.push(next);
    }
    states
}

proptest! {
    #[test]
    fn property_run_terminates_within_log_bound(array in sorted_array(), key in any::<u8>()) {
        let states = trajectory(&array, key);
        let steps = u32::try_from(states.len() - 1).expect("trajectory is short");

        prop_assert!(states.last().is_some_and(SimulationState::is_finished));
        prop_assert!(steps <= step_bound(array.len()), "{} steps for len {}", steps, array.len());
    }

    #[test]
    fn property_steps_shrink_interval_or_terminate(array in sorted_array(), key in any::<u8>()) {
        for pair in trajectory(&array, key).windows(2) {
            let (before, after) = (&pair[0], &pair[1]);
            if !after.is_finished() {
                prop_assert!(span(after) < span(before));
            }
        }
    }

    #[test]
    fn property_bounds_stay_within_one_of_each_other(array in sorted_array(), key in any::<u8>()) {
        for state in trajectory(&array, key) {
            if let (Some(low), Some(high)) = (state.low(), state.high()) {
                prop_assert!(low <= high + 1);
            }
        }
    }

    #[test]
    fn property_mid_lies_in_interval_it_was_computed_from(array in sorted_array(), key in any::<u8>()) {
        for pair in trajectory(&array, key).windows(2) {
            let (before, after) = (&pair[0], &pair[1]);
            if after.mid() == before.mid() {
                continue;
            }
            let mid = after.mid().and_then(|mid| i32::try_from(mid).ok());
            if let (Some(mid), Some(low), Some(high)) = (mid, before.low(), before.high()) {
                prop_assert!(low <= mid && mid <= high);
            } else {
                prop_assert!(false, "probe without interval");
            }
        }
    }

    #[test]
    fn property_log_only_grows_by_prefix_extension(array in sorted_array(), key in any::<u8>()) {
        for pair in trajectory(&array, key).windows(2) {
            let (before, after) = (&pair[0], &pair[1]);
            prop_assert!(after.log().len() > before.log().len());
            prop_assert_eq!(&after.log()[..before.log().len()], before.log());
        }
    }

    #[test]
    fn property_result_is_set_once_and_correct(array in sorted_array(), key in any::<u8>()) {
        let states = trajectory(&array, key);
        let (last, running) = states.split_last().expect("trajectory is never empty");

        for state in running {
            prop_assert_eq!(state.found_index(), None);
        }
        match last.result() {
            Some(SearchResult::Found(index)) => {
                prop_assert_eq!(array[index], key);
            }
            Some(SearchResult::NotFound) => {
                prop_assert!(!array.contains(&key));
            }
            None => {
                prop_assert!(false, "run did not finish");
            }
        }
    }

    #[test]
    fn property_terminal_state_is_a_fixed_point(array in sorted_array(), key in any::<u8>()) {
        let states = trajectory(&array, key);
        let last = states.last().expect("trajectory is never empty");
        prop_assert_eq!(&step(last), last);
    }

    #[test]
    fn property_keys_above_a_byte_are_never_found(array in sorted_array(), key in 256_u32..) {
        let mut state = initialize(&key.to_string(), &array);
        while !state.is_finished() {
            state = step(&state);
        }
        prop_assert_eq!(state.key_to_search(), key);
        prop_assert_eq!(state.result(), Some(SearchResult::NotFound));
    }

    #[test]
    fn property_arbitrary_key_text_never_panics(text in ".{0,12}") {
        let state = initialize(&text, &[1, 2, 3]);
        prop_assert!(state.is_initialized());
    }
}
