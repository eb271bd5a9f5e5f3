//! Core systems for Countdown Lattice.
//!
//! This crate provides the plumbing that widgets compose with:
//!
//! - **Timers**: Repeating timers, on a system or manual clock
//! - **Signal/Slot System**: Type-safe widget notifications
//! - **Events**: Values produced by the event loop
//! - **Thread Affinity**: Checks that widget code stays on the UI thread
//! - **Logging**: `tracing` targets and helpers
//!
//! # Timer Example
//!
//! ```
//! use std::time::Duration;
//! use countdown_lattice_core::{LatticeEvent, TimerManager};
//!
//! let mut timers = TimerManager::with_manual_clock();
//! let id = timers.start_repeating(Duration::from_secs(1)).unwrap();
//!
//! timers.advance_clock(Duration::from_secs(1));
//! assert_eq!(timers.process_expired(), vec![LatticeEvent::Timer { id }]);
//! ```

mod error;
mod event;
pub mod logging;
pub mod signal;
pub mod thread_check;
mod timer;

pub use error::{LatticeError, Result, TimerError};
pub use event::{EventPriority, LatticeEvent};
pub use logging::PerfSpan;
pub use signal::{ConnectionId, Signal};
pub use thread_check::ThreadAffinity;
pub use timer::{SharedTimerManager, TimerClock, TimerId, TimerManager};
