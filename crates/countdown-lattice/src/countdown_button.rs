//! Countdown push button widget.
//!
//! This module provides [`CountdownButton`], a push button that locks itself
//! for a configurable number of seconds after each click, showing the time
//! left on its label, then unlocks and restores its original text.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use countdown_lattice::{CountdownButton, CountdownConfig};
//! use countdown_lattice_core::SharedTimerManager;
//!
//! let timers = Arc::new(SharedTimerManager::with_manual_clock());
//! let mut button = CountdownButton::new(CountdownConfig::new("Submit", 3), timers).unwrap();
//!
//! button.countdown_finished.connect(|_| println!("ready again"));
//!
//! button.click();
//! assert_eq!(button.text(), "Retry in 3 seconds...");
//! assert!(!button.is_enabled());
//! ```
//!
//! # Threading
//!
//! All methods must be called on the thread that created the button; debug
//! builds assert this. The button owns its tick timer and stops it when the
//! countdown ends or when the button is dropped.

use std::collections::VecDeque;
use std::sync::Arc;

use countdown_lattice_core::logging::targets;
use countdown_lattice_core::{Signal, TimerId};

use crate::color::Color;
use crate::config::CountdownConfig;
use crate::error::CountdownResult;
use crate::events::{Key, MouseButton, MousePressEvent, MouseReleaseEvent, WidgetEvent};
use crate::font::Font;
use crate::state::{ButtonState, Effect, Phase};
use crate::style::ButtonStyle;
use crate::widget::{Widget, WidgetBase};
use crate::widget_timer::TimerHost;

/// Everything a host toolkit needs to draw the button.
#[derive(Debug, Clone, PartialEq)]
pub struct ButtonAppearance {
    pub text: String,
    pub background: Color,
    pub foreground: Color,
    pub font: Font,
    pub enabled: bool,
    pub hovered: bool,
    pub focus_painted: bool,
    pub border_painted: bool,
    pub opaque: bool,
}

/// A push button that disables itself for a countdown after each click.
///
/// # Signals
///
/// - `clicked`: an enabled click was accepted
/// - `countdown_started`: a lockout began, with its length in seconds
/// - `countdown_tick`: seconds left after each tick that keeps the lock
/// - `countdown_finished`: the button is idle again
/// - `text_changed`: the displayed label changed
pub struct CountdownButton {
    base: WidgetBase,
    state: ButtonState,
    timers: Arc<dyn TimerHost>,
    timer_id: Option<TimerId>,

    pub clicked: Signal<()>,
    pub countdown_started: Signal<u32>,
    pub countdown_tick: Signal<u32>,
    pub countdown_finished: Signal<()>,
    pub text_changed: Signal<String>,
}

impl CountdownButton {
    /// Create a button from validated parameters, scheduling its ticks on
    /// `timers`.
    ///
    /// Fails with `InvalidConfiguration` for a negative duration.
    pub fn new(config: CountdownConfig, timers: Arc<dyn TimerHost>) -> CountdownResult<Self> {
        let state = ButtonState::from_config(&config)?;
        tracing::debug!(
            target: targets::BUTTON,
            text = state.original_label(),
            countdown_seconds = state.countdown_seconds(),
            "countdown button created"
        );

        Ok(Self {
            base: WidgetBase::new(),
            state,
            timers,
            timer_id: None,
            clicked: Signal::new(),
            countdown_started: Signal::new(),
            countdown_tick: Signal::new(),
            countdown_finished: Signal::new(),
            text_changed: Signal::new(),
        })
    }

    /// Create a button with the default style.
    pub fn with_defaults(
        text: impl Into<String>,
        duration_seconds: i64,
        timers: Arc<dyn TimerHost>,
    ) -> CountdownResult<Self> {
        Self::new(CountdownConfig::new(text, duration_seconds), timers)
    }

    // =========================================================================
    // State
    // =========================================================================

    /// The displayed label.
    pub fn text(&self) -> &str {
        self.state.label()
    }

    /// The label shown while idle.
    pub fn original_text(&self) -> &str {
        self.state.original_label()
    }

    pub fn is_locked(&self) -> bool {
        self.state.is_locked()
    }

    /// Whether the button accepts clicks. False exactly while locked.
    pub fn is_enabled(&self) -> bool {
        self.base.is_enabled()
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    /// Seconds left in the lockout; zero while idle.
    pub fn remaining_seconds(&self) -> u32 {
        self.state.remaining_seconds()
    }

    pub fn countdown_seconds(&self) -> u32 {
        self.state.countdown_seconds()
    }

    /// The displayed background color.
    pub fn background(&self) -> Color {
        self.state.background()
    }

    pub fn style(&self) -> &ButtonStyle {
        self.state.style()
    }

    pub fn state(&self) -> &ButtonState {
        &self.state
    }

    /// The running tick timer, if locked.
    pub fn timer_id(&self) -> Option<TimerId> {
        self.timer_id
    }

    /// Snapshot of what to draw.
    pub fn appearance(&self) -> ButtonAppearance {
        let style = self.state.style();
        ButtonAppearance {
            text: self.state.label().to_string(),
            background: self.state.background(),
            foreground: style.foreground,
            font: style.font.clone(),
            enabled: self.base.is_enabled(),
            hovered: self.base.is_hovered(),
            focus_painted: style.focus_painted,
            border_painted: style.border_painted,
            opaque: style.opaque,
        }
    }

    // =========================================================================
    // Interaction
    // =========================================================================

    /// Programmatically click the button.
    ///
    /// Ignored while locked.
    pub fn click(&mut self) {
        self.base.affinity().debug_assert_same_thread();
        if !self.base.is_enabled() || self.state.is_locked() {
            tracing::trace!(target: targets::BUTTON, "click ignored while locked");
            return;
        }

        self.clicked.emit(());
        let effects = self.state.activate();
        self.apply(effects);
    }

    /// Handle a mouse press. Returns `true` if the event was handled.
    pub fn handle_mouse_press(&mut self, event: &MousePressEvent) -> bool {
        if event.button != MouseButton::Left || !self.base.is_enabled() {
            return false;
        }
        self.base.set_pressed(true);
        true
    }

    /// Handle a mouse release. Returns `true` if a click occurred.
    pub fn handle_mouse_release(&mut self, event: &MouseReleaseEvent) -> bool {
        if event.button != MouseButton::Left {
            return false;
        }

        let was_pressed = self.base.is_pressed();
        self.base.set_pressed(false);

        if was_pressed && self.base.is_enabled() && self.base.contains_point(event.local_pos) {
            self.click();
            return true;
        }
        false
    }

    /// Handle a key press. Returns `true` if the event was handled.
    pub fn handle_key_press(&mut self, key: Key, is_repeat: bool) -> bool {
        if !key.activates_button() || !self.base.is_enabled() {
            return false;
        }
        if !is_repeat {
            self.base.set_pressed(true);
        }
        true
    }

    /// Handle a key release. Returns `true` if a click occurred.
    pub fn handle_key_release(&mut self, key: Key) -> bool {
        if !key.activates_button() || !self.base.is_enabled() {
            return false;
        }
        self.base.set_pressed(false);
        self.click();
        true
    }

    /// Pointer entered the button.
    pub fn handle_enter(&mut self) {
        self.base.affinity().debug_assert_same_thread();
        self.base.set_hovered(true);
        let effects = self.state.hover_enter();
        self.apply(effects);
    }

    /// Pointer left the button.
    pub fn handle_leave(&mut self) {
        self.base.affinity().debug_assert_same_thread();
        self.base.set_hovered(false);
        let effects = self.state.hover_leave();
        self.apply(effects);
    }

    /// Handle a fired timer. Returns `true` if it was this button's tick.
    pub fn handle_timer(&mut self, id: TimerId) -> bool {
        self.base.affinity().debug_assert_same_thread();
        if self.timer_id != Some(id) {
            return false;
        }

        let effects = self.state.tick();
        self.apply(effects);
        true
    }

    // =========================================================================
    // Effects
    // =========================================================================

    fn apply(&mut self, effects: Vec<Effect>) {
        let mut pending: VecDeque<Effect> = effects.into();

        while let Some(effect) = pending.pop_front() {
            match effect {
                Effect::SetLabel(text) => {
                    self.base.update();
                    self.text_changed.emit(text);
                }
                Effect::SetEnabled(enabled) => self.base.set_enabled(enabled),
                Effect::SetBackground(_) => self.base.update(),
                Effect::StartTimer(interval) => match self.timers.start_repeating(interval) {
                    Ok(id) => self.timer_id = Some(id),
                    Err(err) => {
                        tracing::error!(
                            target: targets::BUTTON,
                            %err,
                            "failed to start countdown timer, unlocking"
                        );
                        pending.extend(self.state.abort());
                    }
                },
                Effect::StopTimer => self.release_timer(),
                Effect::CountdownStarted(seconds) => {
                    tracing::debug!(target: targets::BUTTON, seconds, "countdown started");
                    self.countdown_started.emit(seconds);
                }
                Effect::CountdownTick(remaining) => {
                    tracing::trace!(target: targets::BUTTON, remaining, "countdown tick");
                    self.countdown_tick.emit(remaining);
                }
                Effect::CountdownFinished => {
                    tracing::debug!(target: targets::BUTTON, "countdown finished");
                    self.countdown_finished.emit(());
                }
            }
        }

        debug_assert_eq!(
            self.state.is_locked(),
            self.timer_id.is_some(),
            "a countdown timer must exist exactly while locked"
        );
    }

    fn release_timer(&mut self) {
        if let Some(id) = self.timer_id.take() {
            if !self.timers.is_timer_active(id) {
                tracing::trace!(target: targets::BUTTON, ?id, "countdown timer already stopped");
                return;
            }
            if let Err(err) = self.timers.stop_timer(id) {
                tracing::warn!(target: targets::BUTTON, ?id, %err, "failed to stop countdown timer");
            }
        }
    }
}

impl Widget for CountdownButton {
    fn widget_base(&self) -> &WidgetBase {
        &self.base
    }

    fn widget_base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn event(&mut self, event: &mut WidgetEvent) -> bool {
        let handled = match event {
            WidgetEvent::MousePress(e) => self.handle_mouse_press(e),
            WidgetEvent::MouseRelease(e) => self.handle_mouse_release(e),
            WidgetEvent::KeyPress(e) => self.handle_key_press(e.key, e.is_repeat),
            WidgetEvent::KeyRelease(e) => self.handle_key_release(e.key),
            WidgetEvent::Enter(_) => {
                self.handle_enter();
                true
            }
            WidgetEvent::Leave(_) => {
                self.handle_leave();
                true
            }
            WidgetEvent::Timer(e) => self.handle_timer(e.id),
        };

        if handled {
            event.accept();
        }
        handled
    }
}

impl Drop for CountdownButton {
    fn drop(&mut self) {
        self.release_timer();
    }
}

static_assertions::assert_impl_all!(CountdownButton: Send, Sync);

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use countdown_lattice_core::{LatticeError, Result, SharedTimerManager, TimerError};
    use parking_lot::Mutex;

    use super::*;
    use crate::events::KeyReleaseEvent;
    use crate::geometry::{Point, Rect};

    fn setup(text: &str, seconds: i64) -> (Arc<SharedTimerManager>, CountdownButton) {
        let timers = Arc::new(SharedTimerManager::with_manual_clock());
        let mut button = CountdownButton::with_defaults(text, seconds, timers.clone()).unwrap();
        button.set_geometry(Rect::new(0.0, 0.0, 200.0, 80.0));
        (timers, button)
    }

    fn tick(timers: &SharedTimerManager, button: &mut CountdownButton) {
        timers.advance_clock(Duration::from_secs(1));
        for event in timers.process_expired() {
            if let Some(id) = event.timer_id() {
                button.handle_timer(id);
            }
        }
    }

    #[test]
    fn test_new_rejects_negative_duration() {
        let timers = Arc::new(SharedTimerManager::with_manual_clock());
        assert!(CountdownButton::with_defaults("Submit", -1, timers).is_err());
    }

    #[test]
    fn test_submit_scenario() {
        let (timers, mut button) = setup("Submit", 3);

        button.click();
        assert_eq!(button.text(), "Retry in 3 seconds...");
        assert!(!button.is_enabled());

        tick(&timers, &mut button);
        assert_eq!(button.text(), "Retry in 2 seconds...");
        tick(&timers, &mut button);
        assert_eq!(button.text(), "Retry in 1 seconds...");
        tick(&timers, &mut button);
        assert_eq!(button.text(), "Submit");
        assert!(button.is_enabled());
        assert_eq!(button.timer_id(), None);
        assert_eq!(timers.active_count(), 0);
    }

    #[test]
    fn test_zero_duration_never_locks() {
        let (timers, mut button) = setup("Go", 0);
        let finished = Arc::new(AtomicUsize::new(0));
        let finished_clone = finished.clone();
        button.countdown_finished.connect(move |_| {
            finished_clone.fetch_add(1, Ordering::SeqCst);
        });

        button.click();
        assert_eq!(button.text(), "Go");
        assert!(button.is_enabled());
        assert_eq!(timers.active_count(), 0);
        assert_eq!(finished.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_click_while_locked_is_ignored() {
        let (timers, mut button) = setup("Submit", 3);
        button.click();
        tick(&timers, &mut button);
        let timer = button.timer_id();

        button.click();
        assert_eq!(button.timer_id(), timer);
        assert_eq!(button.text(), "Retry in 2 seconds...");
        assert_eq!(timers.active_count(), 1);
    }

    #[test]
    fn test_mouse_click_over_button() {
        let (_timers, mut button) = setup("Submit", 2);

        assert!(button.event(&mut WidgetEvent::left_press(Point::new(10.0, 10.0))));
        assert!(button.event(&mut WidgetEvent::left_release(Point::new(10.0, 10.0))));
        assert!(button.is_locked());
    }

    #[test]
    fn test_mouse_release_outside_does_not_click() {
        let (_timers, mut button) = setup("Submit", 2);

        button.event(&mut WidgetEvent::left_press(Point::new(10.0, 10.0)));
        assert!(!button.event(&mut WidgetEvent::left_release(Point::new(500.0, 10.0))));
        assert!(!button.is_locked());
        assert!(!button.widget_base().is_pressed());
    }

    #[test]
    fn test_mouse_ignored_while_locked() {
        let (_timers, mut button) = setup("Submit", 2);
        button.click();

        let mut press = WidgetEvent::left_press(Point::new(10.0, 10.0));
        assert!(!button.event(&mut press));
        assert!(!press.is_accepted());
    }

    #[test]
    fn test_keyboard_activation() {
        let (_timers, mut button) = setup("Submit", 2);

        let mut release = WidgetEvent::KeyRelease(KeyReleaseEvent::new(Key::Tab));
        assert!(!button.event(&mut release));

        let mut release = WidgetEvent::KeyRelease(KeyReleaseEvent::new(Key::Space));
        assert!(button.event(&mut release));
        assert!(release.is_accepted());
        assert!(button.is_locked());
    }

    #[test]
    fn test_hover_independent_of_lock() {
        let (timers, mut button) = setup("Submit", 2);

        button.event(&mut WidgetEvent::enter(Point::ZERO));
        assert_eq!(button.background(), Color::DARK_GRAY);
        assert!(button.appearance().hovered);

        button.click();
        button.event(&mut WidgetEvent::leave());
        assert_eq!(button.background(), Color::BLACK);
        assert!(button.is_locked());

        button.event(&mut WidgetEvent::enter(Point::ZERO));
        tick(&timers, &mut button);
        tick(&timers, &mut button);
        assert!(!button.is_locked());
        assert_eq!(button.background(), Color::DARK_GRAY);

        button.event(&mut WidgetEvent::leave());
        assert_eq!(button.background(), Color::BLACK);
    }

    #[test]
    fn test_foreign_timer_ignored() {
        let (timers, mut button) = setup("Submit", 2);
        button.click();
        let other = timers.start_repeating(Duration::from_secs(5)).unwrap();

        assert!(!button.event(&mut WidgetEvent::timer(other)));
        assert_eq!(button.remaining_seconds(), 2);
    }

    #[test]
    fn test_signals_follow_countdown() {
        let (timers, mut button) = setup("Submit", 3);
        let log = Arc::new(Mutex::new(Vec::new()));

        let l = log.clone();
        button.countdown_started.connect(move |n| l.lock().push(format!("started {n}")));
        let l = log.clone();
        button.countdown_tick.connect(move |n| l.lock().push(format!("tick {n}")));
        let l = log.clone();
        button.countdown_finished.connect(move |_| l.lock().push("finished".to_string()));
        let l = log.clone();
        button.text_changed.connect(move |t| l.lock().push(format!("text {t}")));

        button.click();
        for _ in 0..3 {
            tick(&timers, &mut button);
        }

        assert_eq!(
            *log.lock(),
            vec![
                "text Retry in 3 seconds...",
                "started 3",
                "text Retry in 2 seconds...",
                "tick 2",
                "text Retry in 1 seconds...",
                "tick 1",
                "text Submit",
                "finished",
            ]
        );
    }

    #[test]
    fn test_enabled_changed_emitted_twice_per_cycle() {
        let (timers, mut button) = setup("Submit", 1);
        let states = Arc::new(Mutex::new(Vec::new()));
        let s = states.clone();
        button.widget_base().enabled_changed.connect(move |e| s.lock().push(*e));

        button.click();
        tick(&timers, &mut button);
        assert_eq!(*states.lock(), vec![false, true]);
    }

    #[test]
    fn test_drop_releases_timer() {
        let (timers, mut button) = setup("Submit", 10);
        button.click();
        assert_eq!(timers.active_count(), 1);

        drop(button);
        assert_eq!(timers.active_count(), 0);
    }

    #[test]
    fn test_appearance_defaults() {
        let (_timers, button) = setup("Submit", 3);
        let look = button.appearance();

        assert_eq!(look.text, "Submit");
        assert_eq!(look.background, Color::BLACK);
        assert_eq!(look.foreground, Color::WHITE);
        assert_eq!(look.font, Font::button_default());
        assert!(look.enabled);
        assert!(look.opaque);
        assert!(!look.border_painted);
        assert!(!look.focus_painted);
    }

    struct RefusingHost;

    impl TimerHost for RefusingHost {
        fn start_repeating(&self, _interval: Duration) -> Result<TimerId> {
            Err(LatticeError::Timer(TimerError::ZeroInterval))
        }

        fn stop_timer(&self, _id: TimerId) -> Result<()> {
            Err(TimerError::InvalidTimerId.into())
        }

        fn is_timer_active(&self, _id: TimerId) -> bool {
            false
        }
    }

    #[test]
    fn test_timer_start_failure_unlocks() {
        let mut button = CountdownButton::with_defaults("Submit", 3, Arc::new(RefusingHost)).unwrap();

        button.click();
        assert!(!button.is_locked());
        assert!(button.is_enabled());
        assert_eq!(button.text(), "Submit");
    }
}
