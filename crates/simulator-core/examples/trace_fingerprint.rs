//! Deterministic trace fingerprint generator used for cross-host comparison.

use proptest as _;
use rstest as _;
#[cfg(feature = "serde")]
use serde as _;
use simulator_core::{initialize, run_to_completion, Register, DEFAULT_ARRAY};
use thiserror as _;
use tracing as _;

fn hash_bytes(hash: &mut u64, bytes: &[u8]) {
    for byte in bytes {
        *hash ^= u64::from(*byte);
        *hash = hash.wrapping_mul(0x1000_0000_01B3);
    }
}

fn fingerprint() -> String {
    let mut hash = 0xcbf2_9ce4_8422_2325_u64;

    for key in 0..=u8::MAX {
        let run = run_to_completion(&initialize(&key.to_string(), &DEFAULT_ARRAY));

        hash_bytes(&mut hash, &run.steps.to_le_bytes());
        hash_bytes(&mut hash, &run.state.found_index().unwrap_or(i64::MIN).to_le_bytes());
        for reg in Register::ALL {
            hash_bytes(&mut hash, &[run.state.register(reg)]);
        }
        hash_bytes(&mut hash, &run.state.hl().to_le_bytes());
        for line in run.state.log() {
            hash_bytes(&mut hash, line.as_bytes());
            hash_bytes(&mut hash, b"\n");
        }
    }

    format!("{hash:016x}")
}

fn main() {
    println!("{}", fingerprint());
}
