//! Terminal host for the binary search register-machine simulator.

use tracing_subscriber::{fmt, EnvFilter};

/// Plain-text rendering of snapshots.
pub mod render;
/// Interactive stdin driver.
pub mod repl;

#[cfg(test)]
use tempfile as _;

/// Installs the stderr log subscriber.
///
/// `RUST_LOG` overrides the default `warn` filter.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
