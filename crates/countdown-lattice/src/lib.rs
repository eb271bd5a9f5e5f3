//! Countdown Lattice - a push button that locks itself after each click.
//!
//! After a click the button disables itself for a configured number of
//! seconds, showing `"Retry in N seconds..."` as its label, then restores its
//! original text and re-enables. It is built for rate-limiting actions such
//! as resend or retry.
//!
//! The crate re-exports the core systems (timers, signals, thread affinity)
//! and adds:
//!
//! - [`CountdownConfig`]: construction parameters, from code or TOML
//! - [`ButtonState`]: the presentation-free state machine
//! - [`CountdownButton`]: the widget that drives it from input and timers
//! - [`HeadlessEventLoop`]: a host that delivers timers without a window
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use countdown_lattice::{Color, CountdownButton, CountdownConfig, HeadlessEventLoop};
//!
//! let mut event_loop = HeadlessEventLoop::with_manual_clock();
//! let config = CountdownConfig::new("Resend code", 30).with_background(Color::from_rgb8(30, 144, 255));
//! let button = CountdownButton::new(config, event_loop.timer_host()).unwrap();
//! let button = event_loop.add_widget(button);
//!
//! button.lock().click();
//! assert_eq!(button.lock().text(), "Retry in 30 seconds...");
//!
//! event_loop.advance(Duration::from_secs(30));
//! assert_eq!(button.lock().text(), "Resend code");
//! ```

pub use countdown_lattice_core::*;

pub mod color;
pub mod config;
pub mod countdown_button;
mod error;
pub mod event_loop;
pub mod events;
pub mod font;
pub mod geometry;
pub mod state;
pub mod style;
pub mod widget;
pub mod widget_timer;

pub use color::{Color, ParseColorError};
pub use config::CountdownConfig;
pub use countdown_button::{ButtonAppearance, CountdownButton};
pub use error::{CountdownError, CountdownResult};
pub use event_loop::{HeadlessEventLoop, WidgetHandle, WidgetId};
pub use events::{Key, MouseButton, WidgetEvent};
pub use font::{Font, FontFamily, FontStyle, FontWeight};
pub use geometry::{Point, Rect, Size};
pub use state::{ButtonState, Effect, Phase};
pub use style::ButtonStyle;
pub use widget::{Widget, WidgetBase};
pub use widget_timer::TimerHost;
