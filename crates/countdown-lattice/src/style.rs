//! Presentation attributes of a countdown button.

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::font::Font;

/// Colors, font and painting flags of a countdown button.
///
/// Constant after construction; the only transient change is the hover swap
/// of the displayed background, which lives in the button state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ButtonStyle {
    /// Idle background, restored when the pointer leaves.
    pub background: Color,
    /// Background while the pointer is over the button. Defaults to dark
    /// gray whatever the idle background is.
    pub hover_background: Color,
    /// Label color.
    pub foreground: Color,
    /// Whether a focus indicator is drawn.
    pub focus_painted: bool,
    /// Whether a border is drawn.
    pub border_painted: bool,
    /// Whether the background is filled.
    pub opaque: bool,
    /// Label font.
    pub font: Font,
}

impl Default for ButtonStyle {
    fn default() -> Self {
        Self {
            background: Color::BLACK,
            hover_background: Color::DARK_GRAY,
            foreground: Color::WHITE,
            focus_painted: false,
            border_painted: false,
            opaque: true,
            font: Font::button_default(),
        }
    }
}

impl ButtonStyle {
    /// Default style with the given idle background and label colors.
    pub fn with_colors(background: Color, foreground: Color) -> Self {
        Self {
            background,
            foreground,
            ..Self::default()
        }
    }

    pub fn with_background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    pub fn with_hover_background(mut self, color: Color) -> Self {
        self.hover_background = color;
        self
    }

    pub fn with_foreground(mut self, color: Color) -> Self {
        self.foreground = color;
        self
    }

    pub fn with_font(mut self, font: Font) -> Self {
        self.font = font;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::FontWeight;

    #[test]
    fn test_defaults() {
        let style = ButtonStyle::default();
        assert_eq!(style.background, Color::BLACK);
        assert_eq!(style.foreground, Color::WHITE);
        assert_eq!(style.hover_background, Color::DARK_GRAY);
        assert_eq!(style.font.weight(), FontWeight::BOLD);
        assert!(!style.focus_painted);
        assert!(!style.border_painted);
        assert!(style.opaque);
    }

    #[test]
    fn test_overrides_keep_other_defaults() {
        let style = ButtonStyle::with_colors(Color::BLUE, Color::RED);
        assert_eq!(style.background, Color::BLUE);
        assert_eq!(style.foreground, Color::RED);
        assert_eq!(style.hover_background, Color::DARK_GRAY);
        assert_eq!(style.font, Font::button_default());
    }

    #[test]
    fn test_partial_toml() {
        let style: ButtonStyle = toml::from_str(r##"background = "#1E90FF""##).unwrap();
        assert_eq!(style.background, Color::from_rgb8(30, 144, 255));
        assert_eq!(style.foreground, Color::WHITE);
        assert_eq!(style.hover_background, Color::DARK_GRAY);
    }

    #[test]
    fn test_hover_background_is_fixed_unless_set() {
        let style = ButtonStyle::default().with_background(Color::WHITE);
        assert_eq!(style.hover_background, Color::DARK_GRAY);

        let style: ButtonStyle = toml::from_str(
            r##"
background = "#FFFFFF"
hover_background = "#C0C0C0"
"##,
        )
        .unwrap();
        assert_eq!(style.hover_background, Color::LIGHT_GRAY);
    }
}
