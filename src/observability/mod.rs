//! Logging setup for tgcnc
//!
//! Events are emitted with `tracing` and rendered by `tracing-subscriber`.
//!
//! # Principles
//!
//! 1. One subscriber per process, installed by the CLI before anything runs
//! 2. Verbosity is controlled by `RUST_LOG`
//! 3. Data-file and model failures are WARN; they never reach the caller

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or invalid
pub const DEFAULT_LOG_FILTER: &str = "tgcnc=info,tower_http=info";

/// Build the env filter from `RUST_LOG`, falling back to [`DEFAULT_LOG_FILTER`]
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Install the global subscriber
///
/// Calling twice is harmless; the second install is ignored.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_target(true)
        .try_init();
}
