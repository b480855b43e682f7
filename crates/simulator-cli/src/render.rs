//! Plain-text rendering of [`StateView`] for the terminal.

use simulator_core::{SimulationState, StateView};

const CELL_WIDTH: usize = 9;

/// Renders the array as three aligned rows: indices, values and markers.
///
/// The probed cell is bracketed and the found cell starred.
#[must_use]
pub fn render_array(view: &StateView) -> String {
    let mut indices = String::from("index ");
    let mut values = String::from("value ");
    let mut markers = String::from("      ");

    for cell in &view.cells {
        let value = if cell.is_found {
            format!("*{}*", cell.value)
        } else if cell.is_mid {
            format!("[{}]", cell.value)
        } else {
            cell.value.clone()
        };

        let marker = match (cell.is_low, cell.is_high) {
            (true, true) => "low/high",
            (true, false) => "low",
            (false, true) => "high",
            (false, false) => "",
        };

        indices.push_str(&format!("{:>CELL_WIDTH$}", cell.index));
        values.push_str(&format!("{value:>CELL_WIDTH$}"));
        markers.push_str(&format!("{marker:>CELL_WIDTH$}"));
    }

    format!(
        "{}\n{}\n{}",
        indices.trim_end(),
        values.trim_end(),
        markers.trim_end()
    )
}

/// Renders the register table, one register per line.
#[must_use]
pub fn render_registers(view: &StateView) -> String {
    view.registers
        .iter()
        .map(|row| {
            let label = format!("{} ({})", row.name, row.role);
            format!("{label:<18} {}", row.value)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Renders the result banner, if the run has finished.
#[must_use]
pub fn render_result(view: &StateView) -> Option<String> {
    view.result.as_ref().map(|result| format!("Result: {result}"))
}

/// Renders array, registers and result as one block.
#[must_use]
pub fn render_state(view: &StateView) -> String {
    let mut out = format!(
        "Memory Array\n{}\n\nRegisters\n{}",
        render_array(view),
        render_registers(view)
    );
    if let Some(result) = render_result(view) {
        out.push_str("\n\n");
        out.push_str(&result);
    }
    out
}

/// Serializes a snapshot as one line of JSON.
///
/// # Errors
///
/// Propagates serializer failures.
pub fn render_json(state: &SimulationState) -> serde_json::Result<String> {
    serde_json::to_string(state)
}
