//! Events produced by the Countdown Lattice event loop.

use crate::timer::TimerId;

/// Priority levels for loop events.
/// Higher priority events are processed first within the same loop iteration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum EventPriority {
    /// Lowest priority - idle work.
    Low = 0,
    /// Normal priority - most application events.
    #[default]
    Normal = 1,
    /// High priority - user input, timers.
    High = 2,
    /// Critical priority - shutdown.
    Critical = 3,
}

/// Events dispatched through the event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LatticeEvent {
    /// A timer has fired.
    Timer {
        /// The timer that fired.
        id: TimerId,
    },

    /// Request to quit the application.
    Quit,

    /// Wake up the event loop (for polling changes).
    WakeUp,
}

impl LatticeEvent {
    /// Get the priority of this event.
    pub fn priority(&self) -> EventPriority {
        match self {
            Self::Quit => EventPriority::Critical,
            Self::Timer { .. } => EventPriority::High,
            Self::WakeUp => EventPriority::Normal,
        }
    }

    /// The timer ID carried by a timer event.
    pub fn timer_id(&self) -> Option<TimerId> {
        match self {
            Self::Timer { id } => Some(*id),
            _ => None,
        }
    }
}
