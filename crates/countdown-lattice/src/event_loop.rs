//! A headless event loop for hosting widgets without a windowing system.
//!
//! [`HeadlessEventLoop`] owns the [`SharedTimerManager`] that widgets schedule
//! their ticks on, keeps the widgets it hosts, and routes fired timers back to
//! them. Under a manual clock, [`advance`](HeadlessEventLoop::advance) moves
//! time forward deterministically, firing every timer due along the way in
//! order. Under the system clock, [`run_for`](HeadlessEventLoop::run_for)
//! sleeps between timers.
//!
//! Every timer on the loop's manager is expected to belong to a hosted
//! widget. A timer that fires with no hosted widget claiming it is stopped.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use countdown_lattice::{CountdownButton, CountdownConfig, HeadlessEventLoop};
//!
//! let mut event_loop = HeadlessEventLoop::with_manual_clock();
//! let button = CountdownButton::new(
//!     CountdownConfig::new("Submit", 2),
//!     event_loop.timer_host(),
//! )
//! .unwrap();
//! let button = event_loop.add_widget(button);
//!
//! button.lock().click();
//! event_loop.advance(Duration::from_secs(1));
//! assert_eq!(button.lock().text(), "Retry in 1 seconds...");
//!
//! event_loop.advance(Duration::from_secs(1));
//! assert_eq!(button.lock().text(), "Submit");
//! ```

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::{Duration, Instant};

use countdown_lattice_core::logging::{span_names, targets};
use countdown_lattice_core::{
    LatticeEvent, PerfSpan, SharedTimerManager, ThreadAffinity, TimerClock, TimerId,
};
use parking_lot::{Mutex, MutexGuard};
use slotmap::{SlotMap, new_key_type};

use crate::events::WidgetEvent;
use crate::widget::Widget;
use crate::widget_timer::TimerHost;

new_key_type! {
    /// Identifies a widget hosted by a [`HeadlessEventLoop`].
    pub struct WidgetId;
}

/// Shared access to a widget hosted by an event loop.
pub struct WidgetHandle<W> {
    id: WidgetId,
    widget: Arc<Mutex<W>>,
}

impl<W> WidgetHandle<W> {
    pub fn id(&self) -> WidgetId {
        self.id
    }

    /// Lock the widget. Do not hold the guard across
    /// [`HeadlessEventLoop`] calls that dispatch events.
    pub fn lock(&self) -> MutexGuard<'_, W> {
        self.widget.lock()
    }
}

impl<W> Clone for WidgetHandle<W> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            widget: Arc::clone(&self.widget),
        }
    }
}

type SharedWidget = Arc<Mutex<dyn Widget>>;

/// A single-threaded event loop that delivers timers and input to widgets.
pub struct HeadlessEventLoop {
    affinity: ThreadAffinity,
    timers: Arc<SharedTimerManager>,
    widgets: SlotMap<WidgetId, SharedWidget>,
    pending: VecDeque<LatticeEvent>,
    quit_requested: bool,
}

impl HeadlessEventLoop {
    /// Create an event loop driven by the system clock.
    pub fn new() -> Self {
        Self::with_timers(Arc::new(SharedTimerManager::new()))
    }

    /// Create an event loop whose time only moves via
    /// [`advance`](Self::advance).
    pub fn with_manual_clock() -> Self {
        Self::with_timers(Arc::new(SharedTimerManager::with_manual_clock()))
    }

    /// Create an event loop around an existing timer manager.
    pub fn with_timers(timers: Arc<SharedTimerManager>) -> Self {
        Self {
            affinity: ThreadAffinity::current(),
            timers,
            widgets: SlotMap::with_key(),
            pending: VecDeque::new(),
            quit_requested: false,
        }
    }

    /// The timer manager widgets should schedule on.
    pub fn timers(&self) -> &Arc<SharedTimerManager> {
        &self.timers
    }

    /// The timer manager as a [`TimerHost`], ready to pass to a widget.
    pub fn timer_host(&self) -> Arc<dyn TimerHost> {
        self.timers.clone()
    }

    pub fn is_manual_clock(&self) -> bool {
        matches!(self.timers.clock(), TimerClock::Manual(_))
    }

    // =========================================================================
    // Widgets
    // =========================================================================

    /// Start hosting a widget.
    pub fn add_widget<W: Widget + 'static>(&mut self, widget: W) -> WidgetHandle<W> {
        self.affinity.debug_assert_same_thread();
        let widget = Arc::new(Mutex::new(widget));
        let shared: SharedWidget = widget.clone();
        let id = self.widgets.insert(shared);
        tracing::debug!(target: targets::EVENT_LOOP, ?id, "widget added");
        WidgetHandle { id, widget }
    }

    /// Stop hosting a widget. It is dropped once all handles are gone.
    ///
    /// While another handle keeps it alive, its timers no longer reach it:
    /// the next time one fires it is stopped, so a locked button stays
    /// locked.
    pub fn remove_widget(&mut self, id: WidgetId) -> bool {
        self.affinity.debug_assert_same_thread();
        let removed = self.widgets.remove(id).is_some();
        if removed {
            tracing::debug!(target: targets::EVENT_LOOP, ?id, "widget removed");
        }
        removed
    }

    pub fn widget_count(&self) -> usize {
        self.widgets.len()
    }

    /// Deliver an input event to one widget. Returns `true` if it was
    /// consumed.
    pub fn dispatch(&mut self, id: WidgetId, event: &mut WidgetEvent) -> bool {
        self.affinity.debug_assert_same_thread();
        let Some(widget) = self.widgets.get(id) else {
            tracing::warn!(target: targets::EVENT_LOOP, ?id, "event for unknown widget");
            return false;
        };

        let _span = tracing::trace_span!(span_names::DISPATCH, ?id).entered();
        widget.lock().event(event)
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Queue an event for the next processing pass.
    pub fn post_event(&mut self, event: LatticeEvent) {
        self.pending.push_back(event);
    }

    /// Ask [`run_for`](Self::run_for) to return early.
    pub fn quit(&mut self) {
        tracing::info!(target: targets::EVENT_LOOP, "quit requested");
        self.post_event(LatticeEvent::Quit);
    }

    pub fn should_quit(&self) -> bool {
        self.quit_requested
    }

    /// Collect expired timers and queued events, then handle them in
    /// priority order. Returns the number of timer events a widget consumed.
    pub fn process_events(&mut self) -> usize {
        self.affinity.debug_assert_same_thread();
        let _span = tracing::trace_span!(span_names::EVENT_LOOP).entered();

        let mut events: Vec<LatticeEvent> = self.pending.drain(..).collect();
        events.extend(self.timers.process_expired());
        if events.is_empty() {
            return 0;
        }
        events.sort_by_key(|event| std::cmp::Reverse(event.priority()));

        tracing::trace!(target: targets::EVENT_LOOP, count = events.len(), "processing events");
        let mut delivered = 0;
        for event in events {
            match event {
                LatticeEvent::Timer { id } => {
                    if self.route_timer(id) {
                        delivered += 1;
                    }
                }
                LatticeEvent::Quit => self.quit_requested = true,
                LatticeEvent::WakeUp => {}
            }
        }
        delivered
    }

    fn route_timer(&self, id: TimerId) -> bool {
        let _span = tracing::trace_span!(span_names::TIMER, ?id).entered();
        for widget in self.widgets.values() {
            let mut event = WidgetEvent::timer(id);
            if widget.lock().event(&mut event) {
                return true;
            }
        }
        tracing::warn!(target: targets::EVENT_LOOP, ?id, "stopping timer with no hosted owner");
        if let Err(err) = self.timers.stop(id) {
            tracing::warn!(target: targets::EVENT_LOOP, ?id, %err, "failed to stop orphaned timer");
        }
        false
    }

    /// Move a manual clock forward by `delta`, firing every timer due on the
    /// way at its own scheduled instant.
    ///
    /// Under the system clock this behaves like [`run_for`](Self::run_for).
    /// Returns the number of timer events a widget consumed.
    pub fn advance(&mut self, delta: Duration) -> usize {
        if !self.is_manual_clock() {
            return self.run_for(delta);
        }

        let _perf = PerfSpan::new("advance");
        let target = self.timers.now() + delta;
        let mut delivered = self.process_events();

        while let Some(next) = self.timers.next_fire_time() {
            if next > target {
                break;
            }
            self.timers.set_time(next);
            delivered += self.process_events();
        }

        self.timers.set_time(target);
        delivered
    }

    /// Run for a wall-clock span, sleeping until each timer is due.
    ///
    /// Returns early after [`quit`](Self::quit). Under a manual clock this
    /// behaves like [`advance`](Self::advance).
    pub fn run_for(&mut self, duration: Duration) -> usize {
        if self.is_manual_clock() {
            return self.advance(duration);
        }

        tracing::debug!(target: targets::EVENT_LOOP, ?duration, "running event loop");
        let deadline = Instant::now() + duration;
        let mut delivered = 0;

        loop {
            delivered += self.process_events();
            if self.quit_requested {
                break;
            }

            let now = Instant::now();
            if now >= deadline {
                break;
            }
            let remaining = deadline - now;
            let wait = self
                .timers
                .time_until_next()
                .map_or(remaining, |next| next.min(remaining));
            std::thread::sleep(wait);
        }

        delivered
    }
}

impl Default for HeadlessEventLoop {
    fn default() -> Self {
        Self::new()
    }
}

static_assertions::assert_impl_all!(HeadlessEventLoop: Send);
