//! Logging facilities for Countdown Lattice.
//!
//! Everything is instrumented with the `tracing` crate. To see logs, the host
//! application installs a subscriber:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt::init();
//!     // ...
//! }
//! ```
//!
//! Filter by the constants in [`targets`], for example
//! `RUST_LOG=countdown_lattice::button=debug`.

/// Span names used for tracing.
pub mod span_names {
    /// Event loop processing span.
    pub const EVENT_LOOP: &str = "countdown_lattice::event_loop";
    /// Timer processing span.
    pub const TIMER: &str = "countdown_lattice::timer";
    /// Widget event dispatch span.
    pub const DISPATCH: &str = "countdown_lattice::dispatch";
}

/// Target names for log filtering.
pub mod targets {
    /// Core framework target.
    pub const CORE: &str = "countdown_lattice_core";
    /// Event loop target.
    pub const EVENT_LOOP: &str = "countdown_lattice_core::event_loop";
    /// Timer system target.
    pub const TIMER: &str = "countdown_lattice_core::timer";
    /// Signal system target.
    pub const SIGNAL: &str = "countdown_lattice_core::signal";
    /// Countdown button target.
    pub const BUTTON: &str = "countdown_lattice::button";
    /// Configuration loading target.
    pub const CONFIG: &str = "countdown_lattice::config";
}

/// A guard that keeps a tracing span entered until dropped.
#[derive(Debug)]
pub struct PerfSpan {
    _span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Enter a performance span named after `operation`.
    pub fn new(operation: &'static str) -> Self {
        let span = tracing::info_span!(target: "countdown_lattice::perf", "perf", operation);
        Self {
            _span: span.entered(),
        }
    }
}
