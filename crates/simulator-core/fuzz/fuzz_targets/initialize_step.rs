#![no_main]

use libfuzzer_sys::fuzz_target;
use simulator_core::{initialize, parse_key, step, SimulatorConfig};

fuzz_target!(|data: &[u8]| {
    let Some((&split, rest)) = data.split_first() else {
        return;
    };
    let split = usize::from(split).min(rest.len());
    let (key_bytes, array_bytes) = rest.split_at(split);

    let key_text = String::from_utf8_lossy(key_bytes);
    let _ = parse_key(&key_text);

    let mut array = array_bytes.to_vec();
    array.sort_unstable();
    let config = SimulatorConfig {
        array,
        ..SimulatorConfig::default()
    };
    let _ = config.validate();

    let mut state = initialize(&key_text, &config.array);
    for _ in 0..64 {
        if state.is_finished() {
            break;
        }
        state = step(&state);
    }
    assert!(state.is_finished());
});
