//! Widget trait and shared widget state.
//!
//! A widget is anything the host toolkit can deliver [`WidgetEvent`]s to.
//! [`WidgetBase`] carries the state every widget has (geometry, enabled,
//! hover, pressed, repaint flag) and is embedded by concrete widgets, which
//! delegate to it.

use countdown_lattice_core::{Signal, ThreadAffinity};

use crate::events::WidgetEvent;
use crate::geometry::{Point, Rect};

/// Common state for all widgets.
pub struct WidgetBase {
    affinity: ThreadAffinity,
    name: String,
    geometry: Rect,
    enabled: bool,
    hovered: bool,
    pressed: bool,
    needs_repaint: bool,

    /// Emitted when the enabled state changes.
    pub enabled_changed: Signal<bool>,
    /// Emitted when the pointer enters (`true`) or leaves (`false`).
    pub hovered_changed: Signal<bool>,
}

impl WidgetBase {
    /// Create a widget base bound to the current (UI) thread.
    pub fn new() -> Self {
        Self {
            affinity: ThreadAffinity::current(),
            name: String::new(),
            geometry: Rect::ZERO,
            enabled: true,
            hovered: false,
            pressed: false,
            needs_repaint: true,
            enabled_changed: Signal::new(),
            hovered_changed: Signal::new(),
        }
    }

    /// The thread this widget must be used from.
    pub fn affinity(&self) -> ThreadAffinity {
        self.affinity
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn geometry(&self) -> Rect {
        self.geometry
    }

    pub fn set_geometry(&mut self, rect: Rect) {
        if self.geometry != rect {
            self.geometry = rect;
            self.update();
        }
    }

    /// Whether a widget-local point is inside the widget.
    pub fn contains_point(&self, local: Point) -> bool {
        Rect::new(0.0, 0.0, self.geometry.size.width, self.geometry.size.height).contains(local)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable input. Emits `enabled_changed` on change.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled != enabled {
            self.enabled = enabled;
            if !enabled {
                self.pressed = false;
            }
            self.update();
            self.enabled_changed.emit(enabled);
        }
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Record pointer presence. Emits `hovered_changed` on change.
    pub fn set_hovered(&mut self, hovered: bool) {
        if self.hovered != hovered {
            self.hovered = hovered;
            self.update();
            self.hovered_changed.emit(hovered);
        }
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub fn set_pressed(&mut self, pressed: bool) {
        if self.pressed != pressed {
            self.pressed = pressed;
            self.update();
        }
    }

    /// Request a repaint.
    pub fn update(&mut self) {
        self.needs_repaint = true;
    }

    pub fn needs_repaint(&self) -> bool {
        self.needs_repaint
    }

    /// Called by the host after painting.
    pub fn clear_repaint(&mut self) {
        self.needs_repaint = false;
    }
}

impl Default for WidgetBase {
    fn default() -> Self {
        Self::new()
    }
}

/// A UI element that receives events from the host toolkit.
///
/// All methods must be called on the thread the widget was created on.
pub trait Widget: Send {
    fn widget_base(&self) -> &WidgetBase;

    fn widget_base_mut(&mut self) -> &mut WidgetBase;

    /// Handle an event. Returns `true` if the widget consumed it.
    fn event(&mut self, event: &mut WidgetEvent) -> bool;

    fn is_enabled(&self) -> bool {
        self.widget_base().is_enabled()
    }

    fn geometry(&self) -> Rect {
        self.widget_base().geometry()
    }

    fn set_geometry(&mut self, rect: Rect) {
        self.widget_base_mut().set_geometry(rect);
    }
}

static_assertions::assert_impl_all!(WidgetBase: Send, Sync);

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;

    #[test]
    fn test_defaults() {
        let base = WidgetBase::new();
        assert!(base.is_enabled());
        assert!(!base.is_hovered());
        assert!(!base.is_pressed());
        assert!(base.needs_repaint());
        assert!(base.affinity().is_same_thread());
    }

    #[test]
    fn test_enabled_signal_only_on_change() {
        let mut base = WidgetBase::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let hits_clone = hits.clone();
        base.enabled_changed.connect(move |_| {
            hits_clone.fetch_add(1, Ordering::SeqCst);
        });

        base.set_enabled(true);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
        base.set_enabled(false);
        base.set_enabled(false);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_disable_clears_pressed() {
        let mut base = WidgetBase::new();
        base.set_pressed(true);
        base.set_enabled(false);
        assert!(!base.is_pressed());
    }

    #[test]
    fn test_repaint_flag() {
        let mut base = WidgetBase::new();
        base.clear_repaint();
        assert!(!base.needs_repaint());
        base.set_hovered(true);
        assert!(base.needs_repaint());
    }

    #[test]
    fn test_contains_point_uses_local_coordinates() {
        let mut base = WidgetBase::new();
        base.set_geometry(Rect::new(50.0, 50.0, 100.0, 30.0));
        assert!(base.contains_point(Point::new(10.0, 10.0)));
        assert!(!base.contains_point(Point::new(120.0, 10.0)));
    }
}
