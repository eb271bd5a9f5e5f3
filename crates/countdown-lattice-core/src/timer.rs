//! Timer system for Countdown Lattice.
//!
//! Provides repeating timers that integrate with the event loop.
//! Timers read time from a [`TimerClock`]: the system clock for real hosts, or
//! a manual clock that only moves when told to, for headless hosts and tests.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use slotmap::{new_key_type, SlotMap};

use crate::error::{Result, TimerError};
use crate::event::LatticeEvent;
use crate::logging::targets;

new_key_type! {
    /// A unique identifier for a timer.
    pub struct TimerId;
}

/// Where a timer manager reads the current time from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerClock {
    /// `Instant::now()`.
    System,
    /// A frozen instant, moved forward explicitly.
    Manual(Instant),
}

impl TimerClock {
    fn now(&self) -> Instant {
        match self {
            Self::System => Instant::now(),
            Self::Manual(now) => *now,
        }
    }
}

#[derive(Debug)]
struct TimerData {
    next_fire: Instant,
    interval: Duration,
}

/// An entry in the timer queue (min-heap by fire time).
#[derive(Debug, Clone, Copy)]
struct TimerQueueEntry {
    id: TimerId,
    fire_time: Instant,
    /// Insertion order, so timers due at the same instant fire FIFO.
    sequence: u64,
}

impl PartialEq for TimerQueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.fire_time == other.fire_time && self.sequence == other.sequence
    }
}

impl Eq for TimerQueueEntry {}

impl PartialOrd for TimerQueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimerQueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap.
        other
            .fire_time
            .cmp(&self.fire_time)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

/// Manages all timers for an event loop.
pub struct TimerManager {
    timers: SlotMap<TimerId, TimerData>,
    queue: BinaryHeap<TimerQueueEntry>,
    clock: TimerClock,
    sequence: u64,
}

impl TimerManager {
    /// Create a timer manager driven by the system clock.
    pub fn new() -> Self {
        Self::with_clock(TimerClock::System)
    }

    /// Create a timer manager whose clock starts now and only moves via
    /// [`advance_clock`](Self::advance_clock) or [`set_time`](Self::set_time).
    pub fn with_manual_clock() -> Self {
        Self::with_clock(TimerClock::Manual(Instant::now()))
    }

    /// Create a timer manager with an explicit clock.
    pub fn with_clock(clock: TimerClock) -> Self {
        Self {
            timers: SlotMap::with_key(),
            queue: BinaryHeap::new(),
            clock,
            sequence: 0,
        }
    }

    /// The clock this manager reads.
    pub fn clock(&self) -> TimerClock {
        self.clock
    }

    /// The current time according to the clock.
    pub fn now(&self) -> Instant {
        self.clock.now()
    }

    /// Move a manual clock to `instant`.
    ///
    /// Has no effect on the system clock, or if `instant` is in the past.
    pub fn set_time(&mut self, instant: Instant) {
        if let TimerClock::Manual(now) = &mut self.clock {
            if instant > *now {
                *now = instant;
            }
        }
    }

    /// Move a manual clock forward by `delta`.
    pub fn advance_clock(&mut self, delta: Duration) {
        if let TimerClock::Manual(now) = &mut self.clock {
            *now += delta;
        }
    }

    fn schedule(&mut self, id: TimerId, fire_time: Instant) {
        self.sequence += 1;
        self.queue.push(TimerQueueEntry {
            id,
            fire_time,
            sequence: self.sequence,
        });
    }

    /// Start a repeating timer that fires at the specified interval.
    ///
    /// The first fire occurs after `interval`. A zero interval is rejected,
    /// since it would fire on every pass of the loop.
    pub fn start_repeating(&mut self, interval: Duration) -> Result<TimerId> {
        if interval.is_zero() {
            return Err(TimerError::ZeroInterval.into());
        }

        let next_fire = self.now() + interval;
        let id = self.timers.insert(TimerData { next_fire, interval });
        self.schedule(id, next_fire);
        tracing::trace!(target: targets::TIMER, ?id, ?interval, "repeating timer started");
        Ok(id)
    }

    /// Stop and remove a timer.
    ///
    /// Returns an error if the timer is unknown or already gone.
    pub fn stop(&mut self, id: TimerId) -> Result<()> {
        match self.timers.remove(id) {
            Some(_) => {
                tracing::trace!(target: targets::TIMER, ?id, "timer stopped");
                Ok(())
            }
            None => Err(TimerError::InvalidTimerId.into()),
        }
    }

    /// Check if a timer is currently active.
    pub fn is_active(&self, id: TimerId) -> bool {
        self.timers.contains_key(id)
    }

    fn discard_stale(&mut self) {
        while let Some(entry) = self.queue.peek() {
            let live = self
                .timers
                .get(entry.id)
                .is_some_and(|t| t.next_fire == entry.fire_time);
            if live {
                break;
            }
            self.queue.pop();
        }
    }

    /// When the next active timer is due, if any.
    pub fn next_fire_time(&mut self) -> Option<Instant> {
        self.discard_stale();
        self.queue.peek().map(|entry| entry.fire_time)
    }

    /// Get the duration until the next timer fires, if any.
    ///
    /// Returns `None` if there are no active timers.
    pub fn time_until_next(&mut self) -> Option<Duration> {
        let now = self.now();
        self.next_fire_time()
            .map(|fire_time| fire_time.saturating_duration_since(now))
    }

    /// Process all timers that should fire now.
    ///
    /// Returns a list of timer events to dispatch. Under a manual clock a
    /// repeating timer is rescheduled from its previous fire time, so a large
    /// clock jump yields one event per elapsed interval. Under the system clock
    /// it is rescheduled from now, so a stalled loop does not burst.
    #[tracing::instrument(skip(self), target = "countdown_lattice_core::timer", level = "trace")]
    pub fn process_expired(&mut self) -> Vec<LatticeEvent> {
        let now = self.now();
        let catch_up = matches!(self.clock, TimerClock::Manual(_));
        let mut events = Vec::new();

        while let Some(entry) = self.queue.peek().copied() {
            if entry.fire_time > now {
                break;
            }
            self.queue.pop();

            let id = entry.id;
            let Some(timer) = self.timers.get_mut(id) else {
                continue;
            };
            // A stop followed by a restart can leave an outdated entry behind.
            if timer.next_fire != entry.fire_time {
                continue;
            }

            tracing::trace!(target: targets::TIMER, ?id, "timer fired");
            events.push(LatticeEvent::Timer { id });

            let base = if catch_up { entry.fire_time } else { now };
            timer.next_fire = base + timer.interval;
            let next_fire = timer.next_fire;
            self.schedule(id, next_fire);
        }

        events
    }

    /// Get the number of active timers.
    pub fn active_count(&self) -> usize {
        self.timers.len()
    }
}

impl Default for TimerManager {
    fn default() -> Self {
        Self::new()
    }
}

/// A thread-safe wrapper around `TimerManager`, shared between an event loop
/// and the widgets that schedule timers on it.
pub struct SharedTimerManager {
    inner: Mutex<TimerManager>,
}

impl SharedTimerManager {
    /// Create a shared manager driven by the system clock.
    pub fn new() -> Self {
        Self::from_manager(TimerManager::new())
    }

    /// Create a shared manager driven by a manual clock.
    pub fn with_manual_clock() -> Self {
        Self::from_manager(TimerManager::with_manual_clock())
    }

    /// Wrap an existing manager.
    pub fn from_manager(manager: TimerManager) -> Self {
        Self {
            inner: Mutex::new(manager),
        }
    }

    pub fn clock(&self) -> TimerClock {
        self.inner.lock().clock()
    }

    pub fn now(&self) -> Instant {
        self.inner.lock().now()
    }

    pub fn set_time(&self, instant: Instant) {
        self.inner.lock().set_time(instant)
    }

    pub fn advance_clock(&self, delta: Duration) {
        self.inner.lock().advance_clock(delta)
    }

    pub fn start_repeating(&self, interval: Duration) -> Result<TimerId> {
        self.inner.lock().start_repeating(interval)
    }

    pub fn stop(&self, id: TimerId) -> Result<()> {
        self.inner.lock().stop(id)
    }

    pub fn is_active(&self, id: TimerId) -> bool {
        self.inner.lock().is_active(id)
    }

    pub fn next_fire_time(&self) -> Option<Instant> {
        self.inner.lock().next_fire_time()
    }

    pub fn time_until_next(&self) -> Option<Duration> {
        self.inner.lock().time_until_next()
    }

    pub fn process_expired(&self) -> Vec<LatticeEvent> {
        self.inner.lock().process_expired()
    }

    pub fn active_count(&self) -> usize {
        self.inner.lock().active_count()
    }
}

impl Default for SharedTimerManager {
    fn default() -> Self {
        Self::new()
    }
}

static_assertions::assert_impl_all!(SharedTimerManager: Send, Sync);
