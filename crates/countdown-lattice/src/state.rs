//! Presentation-agnostic countdown state machine.
//!
//! [`ButtonState`] holds everything a countdown button displays and knows
//! nothing about rendering, timers or event delivery. Each transition mutates
//! the state and returns the [`Effect`]s the host must carry out, so the same
//! logic can sit behind any toolkit adapter.
//!
//! Two states exist, **Idle** and **Locked**:
//!
//! | From   | Input                        | To     | Effects                                  |
//! |--------|------------------------------|--------|------------------------------------------|
//! | Idle   | activate, countdown > 0      | Locked | label = status(n), disable, start timer  |
//! | Idle   | activate, countdown = 0      | Idle   | label = original, finished               |
//! | Locked | activate                     | Locked | none                                     |
//! | Locked | tick, remaining - 1 > 0      | Locked | label = status(remaining)                |
//! | Locked | tick, remaining - 1 = 0      | Idle   | stop timer, label = original, enable     |
//! | Idle   | tick                         | Idle   | none                                     |

use std::time::Duration;

use crate::color::Color;
use crate::config::{CountdownConfig, SECONDS_PLACEHOLDER};
use crate::error::CountdownResult;
use crate::style::ButtonStyle;

/// A side effect requested by a state transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Display this label.
    SetLabel(String),
    /// Enable or disable interaction.
    SetEnabled(bool),
    /// Display this background.
    SetBackground(Color),
    /// Start the repeating countdown timer at this interval.
    StartTimer(Duration),
    /// Cancel the countdown timer.
    StopTimer,
    /// A lockout began with this many seconds.
    CountdownStarted(u32),
    /// A tick left this many seconds, still locked.
    CountdownTick(u32),
    /// The lockout ended and the button is idle again.
    CountdownFinished,
}

/// Whether the button is accepting clicks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Locked,
}

/// The complete displayed state of a countdown button.
#[derive(Debug, Clone, PartialEq)]
pub struct ButtonState {
    label: String,
    original_label: String,
    countdown_seconds: u32,
    remaining_seconds: u32,
    locked: bool,
    style: ButtonStyle,
    background: Color,
    status_template: String,
    tick_interval: Duration,
}

impl ButtonState {
    /// Build the initial idle state from validated parameters.
    pub fn from_config(config: &CountdownConfig) -> CountdownResult<Self> {
        let countdown_seconds = config.validate()?;
        Ok(Self {
            label: config.text.clone(),
            original_label: config.text.clone(),
            countdown_seconds,
            remaining_seconds: 0,
            locked: false,
            background: config.style.background,
            style: config.style.clone(),
            status_template: config.status_template.clone(),
            tick_interval: config.tick_interval(),
        })
    }

    /// Currently displayed label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Label shown while idle.
    pub fn original_label(&self) -> &str {
        &self.original_label
    }

    pub fn countdown_seconds(&self) -> u32 {
        self.countdown_seconds
    }

    /// Seconds left in the current lockout; zero while idle.
    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn phase(&self) -> Phase {
        if self.locked {
            Phase::Locked
        } else {
            Phase::Idle
        }
    }

    pub fn style(&self) -> &ButtonStyle {
        &self.style
    }

    /// Currently displayed background (idle or hover color).
    pub fn background(&self) -> Color {
        self.background
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// The status text for `seconds` remaining.
    pub fn status_text(&self, seconds: u32) -> String {
        self.status_template
            .replace(SECONDS_PLACEHOLDER, &seconds.to_string())
    }

    /// Handle a click.
    ///
    /// Ignored while locked. A zero-length countdown completes immediately
    /// without starting a timer.
    pub fn activate(&mut self) -> Vec<Effect> {
        if self.locked {
            return Vec::new();
        }

        if self.countdown_seconds == 0 {
            self.remaining_seconds = 0;
            self.label = self.original_label.clone();
            return vec![
                Effect::CountdownStarted(0),
                Effect::SetLabel(self.label.clone()),
                Effect::CountdownFinished,
            ];
        }

        self.locked = true;
        self.remaining_seconds = self.countdown_seconds;
        self.label = self.status_text(self.remaining_seconds);

        vec![
            Effect::SetEnabled(false),
            Effect::SetLabel(self.label.clone()),
            Effect::StartTimer(self.tick_interval),
            Effect::CountdownStarted(self.countdown_seconds),
        ]
    }

    /// Handle one timer tick.
    ///
    /// Decrements the remaining time; on reaching zero the timer is stopped
    /// and the button returns to idle. Ticks while idle are ignored.
    pub fn tick(&mut self) -> Vec<Effect> {
        if !self.locked {
            return Vec::new();
        }

        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);

        if self.remaining_seconds > 0 {
            self.label = self.status_text(self.remaining_seconds);
            return vec![
                Effect::SetLabel(self.label.clone()),
                Effect::CountdownTick(self.remaining_seconds),
            ];
        }

        self.locked = false;
        self.label = self.original_label.clone();
        vec![
            Effect::StopTimer,
            Effect::SetLabel(self.label.clone()),
            Effect::SetEnabled(true),
            Effect::CountdownFinished,
        ]
    }

    /// Return to idle without finishing the countdown.
    ///
    /// Only used when the host could not start the tick timer; there is no
    /// public way to cut a lockout short.
    pub(crate) fn abort(&mut self) -> Vec<Effect> {
        if !self.locked {
            return Vec::new();
        }
        self.locked = false;
        self.remaining_seconds = 0;
        self.label = self.original_label.clone();
        vec![
            Effect::SetLabel(self.label.clone()),
            Effect::SetEnabled(true),
            Effect::CountdownFinished,
        ]
    }

    /// Pointer entered the button: show the hover color.
    pub fn hover_enter(&mut self) -> Vec<Effect> {
        self.set_background(self.style.hover_background)
    }

    /// Pointer left the button: restore the idle color, locked or not.
    pub fn hover_leave(&mut self) -> Vec<Effect> {
        self.set_background(self.style.background)
    }

    fn set_background(&mut self, color: Color) -> Vec<Effect> {
        if self.background == color {
            return Vec::new();
        }
        self.background = color;
        vec![Effect::SetBackground(color)]
    }
}
