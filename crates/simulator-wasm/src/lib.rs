use serde::{Deserialize, Serialize};
use simulator_core::{Session, SimulatorConfig, StepOutcome};
use wasm_bindgen::prelude::*;

macro_rules! console_log {
    ($($t:tt)*) => (web_sys::console::log_1(&JsValue::from_str(&format!($($t)*))))
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(JsValue::from)
}

/// JS-compatible summary of a run stepped to completion
#[derive(Serialize, Deserialize)]
pub struct WasmRunOutcome {
    pub steps: u32,
    pub final_step: StepOutcome,
}

#[wasm_bindgen]
pub struct WasmSimulator {
    session: Session,
}

#[wasm_bindgen]
impl WasmSimulator {
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new() -> Self {
        console_error_panic_hook::set_once();
        Self {
            session: Session::default(),
        }
    }

    /// Creates a simulator over a custom sorted array.
    ///
    /// Fails with the validation message when the array cannot be searched.
    pub fn with_array(array: &[u8], base_address: u16) -> Result<WasmSimulator, JsValue> {
        console_error_panic_hook::set_once();
        let config = SimulatorConfig {
            array: array.to_vec(),
            base_address,
            ..SimulatorConfig::default()
        };
        let session = Session::new(config).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self { session })
    }

    /// Replaces the key text and returns to the ready state.
    pub fn set_key_input(&mut self, key_input: &str) {
        self.session.set_key_input(key_input);
    }

    /// Starts a run with the current key text.
    /// Ignored while a run is in progress.
    pub fn initialize(&mut self) {
        if self.session.can_initialize() {
            self.session.initialize();
            console_log!(
                "Initialized search for 0x{:02X}",
                self.session.state().key_to_search()
            );
        }
    }

    /// Executes one loop iteration.
    /// Returns the step outcome as a JSON object.
    pub fn step(&mut self) -> Result<JsValue, JsValue> {
        let outcome = self.session.step();
        if outcome.is_terminal() {
            console_log!("Search finished: {:?}", outcome);
        }
        to_js(&outcome)
    }

    /// Steps the current run until it finishes.
    /// Returns the run outcome as a JSON object.
    pub fn run_to_end(&mut self) -> Result<JsValue, JsValue> {
        let run = self.session.run_to_end();
        to_js(&WasmRunOutcome {
            steps: run.steps,
            final_step: run.final_step,
        })
    }

    /// Discards the current run and restores the default key text.
    pub fn reset(&mut self) {
        self.session.reset();
    }

    #[must_use]
    pub fn can_initialize(&self) -> bool {
        self.session.can_initialize()
    }

    #[must_use]
    pub fn can_step(&self) -> bool {
        self.session.can_step()
    }

    /// Returns the full snapshot as a JSON object.
    pub fn get_state(&self) -> Result<JsValue, JsValue> {
        to_js(self.session.state())
    }

    /// Returns the render-ready view as a JSON object.
    pub fn get_view(&self) -> Result<JsValue, JsValue> {
        to_js(&self.session.view())
    }

    /// Returns a copy of the searched array as a Uint8Array.
    #[must_use]
    pub fn get_array(&self) -> js_sys::Uint8Array {
        js_sys::Uint8Array::from(self.session.state().array())
    }
}

impl Default for WasmSimulator {
    fn default() -> Self {
        Self::new()
    }
}
