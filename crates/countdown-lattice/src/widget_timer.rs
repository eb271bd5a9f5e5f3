//! Widget timer seam.
//!
//! Widgets schedule their repeating callbacks through a [`TimerHost`] and
//! receive `WidgetEvent::Timer` when one fires. The event loop's
//! [`SharedTimerManager`] is the standard host; a toolkit integration can
//! provide its own.

use std::time::Duration;

use countdown_lattice_core::{Result, SharedTimerManager, TimerId};

/// Something that can schedule and cancel repeating timers for widgets.
pub trait TimerHost: Send + Sync {
    /// Start a timer that fires every `interval` until stopped.
    fn start_repeating(&self, interval: Duration) -> Result<TimerId>;

    /// Stop a timer started by this host.
    fn stop_timer(&self, id: TimerId) -> Result<()>;

    /// Whether the timer is still scheduled.
    fn is_timer_active(&self, id: TimerId) -> bool;
}

impl TimerHost for SharedTimerManager {
    fn start_repeating(&self, interval: Duration) -> Result<TimerId> {
        SharedTimerManager::start_repeating(self, interval)
    }

    fn stop_timer(&self, id: TimerId) -> Result<()> {
        self.stop(id)
    }

    fn is_timer_active(&self, id: TimerId) -> bool {
        self.is_active(id)
    }
}
