//! Widget input events.
//!
//! The host toolkit translates its native input into these values and feeds
//! them to [`Widget::event`](crate::widget::Widget::event). Each event carries
//! an accepted flag the widget sets when it consumed the event.

use countdown_lattice_core::TimerId;

use crate::geometry::Point;

/// Accept/ignore bookkeeping shared by all events.
#[derive(Debug, Clone, Copy, Default)]
pub struct EventBase {
    accepted: bool,
}

impl EventBase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_accepted(&self) -> bool {
        self.accepted
    }

    pub fn accept(&mut self) {
        self.accepted = true;
    }

    pub fn ignore(&mut self) {
        self.accepted = false;
    }
}

/// Mouse buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// The keys a button reacts to; everything else is `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Space,
    Enter,
    Escape,
    Tab,
    Other,
}

impl Key {
    /// Whether this key activates a focused button.
    pub fn activates_button(self) -> bool {
        matches!(self, Key::Space | Key::Enter)
    }
}

/// A mouse button went down over the widget.
#[derive(Debug, Clone, Copy)]
pub struct MousePressEvent {
    pub base: EventBase,
    pub button: MouseButton,
    pub local_pos: Point,
}

impl MousePressEvent {
    pub fn new(button: MouseButton, local_pos: Point) -> Self {
        Self {
            base: EventBase::new(),
            button,
            local_pos,
        }
    }
}

/// A mouse button was released after a press on the widget.
#[derive(Debug, Clone, Copy)]
pub struct MouseReleaseEvent {
    pub base: EventBase,
    pub button: MouseButton,
    pub local_pos: Point,
}

impl MouseReleaseEvent {
    pub fn new(button: MouseButton, local_pos: Point) -> Self {
        Self {
            base: EventBase::new(),
            button,
            local_pos,
        }
    }
}

/// The pointer entered the widget area.
#[derive(Debug, Clone, Copy)]
pub struct EnterEvent {
    pub base: EventBase,
    pub local_pos: Point,
}

impl EnterEvent {
    pub fn new(local_pos: Point) -> Self {
        Self {
            base: EventBase::new(),
            local_pos,
        }
    }
}

/// The pointer left the widget area.
#[derive(Debug, Clone, Copy, Default)]
pub struct LeaveEvent {
    pub base: EventBase,
}

impl LeaveEvent {
    pub fn new() -> Self {
        Self::default()
    }
}

/// A key went down while the widget had focus.
#[derive(Debug, Clone, Copy)]
pub struct KeyPressEvent {
    pub base: EventBase,
    pub key: Key,
    /// Whether this is an auto-repeat of a held key.
    pub is_repeat: bool,
}

impl KeyPressEvent {
    pub fn new(key: Key) -> Self {
        Self {
            base: EventBase::new(),
            key,
            is_repeat: false,
        }
    }
}

/// A key was released while the widget had focus.
#[derive(Debug, Clone, Copy)]
pub struct KeyReleaseEvent {
    pub base: EventBase,
    pub key: Key,
}

impl KeyReleaseEvent {
    pub fn new(key: Key) -> Self {
        Self {
            base: EventBase::new(),
            key,
        }
    }
}

/// A timer owned by the widget fired.
#[derive(Debug, Clone, Copy)]
pub struct TimerEvent {
    pub base: EventBase,
    pub id: TimerId,
}

impl TimerEvent {
    pub fn new(id: TimerId) -> Self {
        Self {
            base: EventBase::new(),
            id,
        }
    }
}

/// All events a widget can receive.
#[derive(Debug, Clone, Copy)]
pub enum WidgetEvent {
    MousePress(MousePressEvent),
    MouseRelease(MouseReleaseEvent),
    Enter(EnterEvent),
    Leave(LeaveEvent),
    KeyPress(KeyPressEvent),
    KeyRelease(KeyReleaseEvent),
    Timer(TimerEvent),
}

impl WidgetEvent {
    fn base(&self) -> &EventBase {
        match self {
            Self::MousePress(e) => &e.base,
            Self::MouseRelease(e) => &e.base,
            Self::Enter(e) => &e.base,
            Self::Leave(e) => &e.base,
            Self::KeyPress(e) => &e.base,
            Self::KeyRelease(e) => &e.base,
            Self::Timer(e) => &e.base,
        }
    }

    fn base_mut(&mut self) -> &mut EventBase {
        match self {
            Self::MousePress(e) => &mut e.base,
            Self::MouseRelease(e) => &mut e.base,
            Self::Enter(e) => &mut e.base,
            Self::Leave(e) => &mut e.base,
            Self::KeyPress(e) => &mut e.base,
            Self::KeyRelease(e) => &mut e.base,
            Self::Timer(e) => &mut e.base,
        }
    }

    /// Check if the event has been accepted.
    pub fn is_accepted(&self) -> bool {
        self.base().is_accepted()
    }

    /// Mark the event as consumed.
    pub fn accept(&mut self) {
        self.base_mut().accept();
    }

    /// Mark the event as not consumed.
    pub fn ignore(&mut self) {
        self.base_mut().ignore();
    }

    /// Left-button press at `pos`.
    pub fn left_press(pos: Point) -> Self {
        Self::MousePress(MousePressEvent::new(MouseButton::Left, pos))
    }

    /// Left-button release at `pos`.
    pub fn left_release(pos: Point) -> Self {
        Self::MouseRelease(MouseReleaseEvent::new(MouseButton::Left, pos))
    }

    pub fn enter(pos: Point) -> Self {
        Self::Enter(EnterEvent::new(pos))
    }

    pub fn leave() -> Self {
        Self::Leave(LeaveEvent::new())
    }

    pub fn timer(id: TimerId) -> Self {
        Self::Timer(TimerEvent::new(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accept_and_ignore() {
        let mut event = WidgetEvent::leave();
        assert!(!event.is_accepted());
        event.accept();
        assert!(event.is_accepted());
        event.ignore();
        assert!(!event.is_accepted());
    }

    #[test]
    fn test_activation_keys() {
        assert!(Key::Space.activates_button());
        assert!(Key::Enter.activates_button());
        assert!(!Key::Escape.activates_button());
    }
}
