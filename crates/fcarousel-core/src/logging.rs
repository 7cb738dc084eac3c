#![forbid(unsafe_code)]

//! JSON log output for production hosts.
//!
//! The engine itself only emits `tracing` events (targets under
//! `fcarousel_core`); hosts that already install a subscriber need nothing
//! from this module.

use tracing_subscriber::EnvFilter;

/// Install a global JSON subscriber filtered by `RUST_LOG` (default `info`).
///
/// Returns `false` if a global subscriber was already installed.
pub fn init_json_logging() -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .json()
        .with_current_span(true)
        .with_env_filter(filter)
        .try_init()
        .is_ok()
}
