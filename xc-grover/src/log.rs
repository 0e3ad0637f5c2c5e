//! Logging targets used by the circuit builders and the resource estimator.
//!
//! Events are emitted with [`tracing`]. The library never installs a
//! subscriber; binaries filter on these targets to choose what to display.

/// The logging target for general events.
pub const LOG_TARGET: &str = "xc_grover::log";
/// The logging target for per-stage progress events. More verbose than the
/// general log.
pub const PROGRESS_TARGET: &str = "xc_grover::progress";
