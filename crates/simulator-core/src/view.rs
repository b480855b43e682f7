//! Render-ready projection of a snapshot for presentation hosts.
//!
//! Hosts render these rows directly; nothing here feeds back into the core.

use crate::trace::{hex, HexWidth};
use crate::{Register, SearchResult, SimulationState};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One array element with its interval markers.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CellView {
    /// Element index.
    pub index: usize,
    /// Element value as two-digit hex.
    pub value: String,
    /// Index equals the low bound.
    pub is_low: bool,
    /// Index equals the high bound.
    pub is_high: bool,
    /// Index was probed by the last step.
    pub is_mid: bool,
    /// Index holds the found key.
    pub is_found: bool,
}

/// One row of the register table.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RegisterRow {
    /// Register name (`A`..`E`, `HL`).
    pub name: String,
    /// Role in the search program.
    pub role: String,
    /// Value as zero-padded hex.
    pub value: String,
}

/// Everything a host needs to draw one snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StateView {
    /// Array cells in index order.
    pub cells: Vec<CellView>,
    /// Register rows `A..E` followed by `HL`.
    pub registers: Vec<RegisterRow>,
    /// Result banner, once the run has finished.
    pub result: Option<String>,
    /// Found index with `-1` for "not found"; `None` while running.
    pub found_index: Option<i64>,
    /// Raw key text.
    pub key_input: String,
    /// Trace log.
    pub log: Vec<String>,
    /// Log length; hosts scroll the log when this grows.
    pub log_len: usize,
    /// Whether a new run may be started.
    pub can_initialize: bool,
    /// Whether the current run accepts steps.
    pub can_step: bool,
}

impl StateView {
    /// Projects `state` into display rows.
    #[must_use]
    pub fn from_state(state: &SimulationState) -> Self {
        let low = state.low().and_then(|low| usize::try_from(low).ok());
        let high = state.high().and_then(|high| usize::try_from(high).ok());
        let found = match state.result() {
            Some(SearchResult::Found(index)) => Some(index),
            Some(SearchResult::NotFound) | None => None,
        };

        let cells = state
            .array()
            .iter()
            .enumerate()
            .map(|(index, &value)| CellView {
                index,
                value: hex(u64::from(value), HexWidth::Byte),
                is_low: low == Some(index),
                is_high: high == Some(index),
                is_mid: state.mid() == Some(index),
                is_found: found == Some(index),
            })
            .collect();

        let mut registers: Vec<RegisterRow> = Register::ALL
            .iter()
            .map(|&reg| RegisterRow {
                name: reg.name().to_owned(),
                role: reg.role().to_owned(),
                value: hex(u64::from(state.register(reg)), HexWidth::Byte),
            })
            .collect();
        registers.push(RegisterRow {
            name: "HL".to_owned(),
            role: "Mem Pointer".to_owned(),
            value: hex(u64::from(state.hl()), HexWidth::Word),
        });

        Self {
            cells,
            registers,
            result: state.result().map(result_banner),
            found_index: state.found_index(),
            key_input: state.key_input().to_owned(),
            log: state.log().to_vec(),
            log_len: state.log().len(),
            can_initialize: !state.is_initialized() || state.is_finished(),
            can_step: state.is_initialized() && !state.is_finished(),
        }
    }
}

/// Banner text for a terminal result.
#[must_use]
pub fn result_banner(result: SearchResult) -> String {
    match result {
        SearchResult::Found(index) => format!("Key Found at Index {index}"),
        SearchResult::NotFound => "Key Not Found (FFH)".to_owned(),
    }
}
