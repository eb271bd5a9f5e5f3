//! Construction parameters for a countdown button.
//!
//! A [`CountdownConfig`] is built in code or read from TOML:
//!
//! ```
//! use countdown_lattice::CountdownConfig;
//!
//! let config = CountdownConfig::from_toml_str(r##"
//! text = "Submit"
//! duration_seconds = 3
//!
//! [style]
//! background = "#1E90FF"
//! "##).unwrap();
//!
//! assert_eq!(config.duration_seconds, 3);
//! ```

use std::path::Path;
use std::time::Duration;

use countdown_lattice_core::logging::targets;
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::{CountdownError, CountdownResult};
use crate::font::Font;
use crate::style::ButtonStyle;

/// Placeholder replaced by the remaining seconds in a status template.
pub const SECONDS_PLACEHOLDER: &str = "{seconds}";

/// Status text shown while the button is locked.
pub const DEFAULT_STATUS_TEMPLATE: &str = "Retry in {seconds} seconds...";

/// Interval between countdown ticks.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 1000;

/// Construction parameters for a countdown button.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountdownConfig {
    /// Label shown while idle.
    pub text: String,
    /// Lockout length in seconds. Must not be negative.
    pub duration_seconds: i64,
    /// Status text while locked; must contain `{seconds}`.
    #[serde(default = "default_status_template")]
    pub status_template: String,
    /// Milliseconds between ticks. Must be greater than zero.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    /// Presentation attributes.
    #[serde(default)]
    pub style: ButtonStyle,
}

fn default_status_template() -> String {
    DEFAULT_STATUS_TEMPLATE.to_string()
}

fn default_tick_interval_ms() -> u64 {
    DEFAULT_TICK_INTERVAL_MS
}

impl CountdownConfig {
    /// Config with the given label and duration and default style.
    pub fn new(text: impl Into<String>, duration_seconds: i64) -> Self {
        Self {
            text: text.into(),
            duration_seconds,
            status_template: default_status_template(),
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            style: ButtonStyle::default(),
        }
    }

    pub fn with_style(mut self, style: ButtonStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_background(mut self, color: Color) -> Self {
        self.style.background = color;
        self
    }

    pub fn with_foreground(mut self, color: Color) -> Self {
        self.style.foreground = color;
        self
    }

    pub fn with_hover_background(mut self, color: Color) -> Self {
        self.style.hover_background = color;
        self
    }

    pub fn with_font(mut self, font: Font) -> Self {
        self.style.font = font;
        self
    }

    pub fn with_status_template(mut self, template: impl Into<String>) -> Self {
        self.status_template = template.into();
        self
    }

    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval_ms = u64::try_from(interval.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// The tick interval as a `Duration`.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Check the parameters and return the validated duration.
    pub fn validate(&self) -> CountdownResult<u32> {
        let seconds = u32::try_from(self.duration_seconds).map_err(|_| {
            CountdownError::invalid(format!(
                "duration_seconds must be between 0 and {}, got {}",
                u32::MAX,
                self.duration_seconds
            ))
        })?;

        if self.tick_interval_ms == 0 {
            return Err(CountdownError::invalid("tick_interval_ms must be greater than zero"));
        }

        if !self.status_template.contains(SECONDS_PLACEHOLDER) {
            return Err(CountdownError::invalid(format!(
                "status_template {:?} does not contain {SECONDS_PLACEHOLDER}",
                self.status_template
            )));
        }

        Ok(seconds)
    }

    /// Parse and validate a config from a TOML string.
    pub fn from_toml_str(content: &str) -> CountdownResult<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a config from a TOML file.
    pub fn read_toml(path: impl AsRef<Path>) -> CountdownResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::info!(
            target: targets::CONFIG,
            path = %path.display(),
            text = %config.text,
            duration_seconds = config.duration_seconds,
            "loaded countdown button configuration"
        );
        Ok(config)
    }

    /// Serialize to a TOML string.
    pub fn to_toml_string(&self) -> CountdownResult<String> {
        Ok(toml::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::FontFamily;

    #[test]
    fn test_defaults() {
        let config = CountdownConfig::new("Submit", 3);
        assert_eq!(config.validate().unwrap(), 3);
        assert_eq!(config.status_template, "Retry in {seconds} seconds...");
        assert_eq!(config.tick_interval(), Duration::from_secs(1));
        assert_eq!(config.style, ButtonStyle::default());
    }

    #[test]
    fn test_negative_duration_rejected() {
        let err = CountdownConfig::new("Submit", -1).validate().unwrap_err();
        assert!(matches!(err, CountdownError::InvalidConfiguration(_)));
        assert!(err.to_string().contains("-1"));
    }

    #[test]
    fn test_oversized_duration_rejected() {
        let config = CountdownConfig::new("Submit", i64::from(u32::MAX) + 1);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_duration_accepted() {
        assert_eq!(CountdownConfig::new("Go", 0).validate().unwrap(), 0);
    }

    #[test]
    fn test_zero_interval_rejected() {
        let config = CountdownConfig::new("Go", 1).with_tick_interval(Duration::ZERO);
        assert!(matches!(
            config.validate(),
            Err(CountdownError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_template_needs_placeholder() {
        let config = CountdownConfig::new("Go", 1).with_status_template("Please wait");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_toml() {
        let config = CountdownConfig::from_toml_str(
            r##"
            text = "Send"
            duration_seconds = 5
            tick_interval_ms = 250
            status_template = "Wait {seconds}s"

            [style]
            background = "#1E90FF"
            foreground = "#000000"
            font = { family = "monospace", size = 20.0, weight = 700 }
            "##,
        )
        .unwrap();

        assert_eq!(config.text, "Send");
        assert_eq!(config.duration_seconds, 5);
        assert_eq!(config.tick_interval(), Duration::from_millis(250));
        assert_eq!(config.style.background, Color::from_rgb8(30, 144, 255));
        assert_eq!(config.style.foreground, Color::BLACK);
        assert_eq!(config.style.hover_background, Color::DARK_GRAY);
        assert_eq!(config.style.font.family(), &FontFamily::Monospace);
    }

    #[test]
    fn test_from_toml_validates() {
        let err = CountdownConfig::from_toml_str("text = \"A\"\nduration_seconds = -4").unwrap_err();
        assert!(matches!(err, CountdownError::InvalidConfiguration(_)));

        let err = CountdownConfig::from_toml_str("text = 12").unwrap_err();
        assert!(matches!(err, CountdownError::ConfigParse(_)));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = CountdownConfig::new("Submit", 3)
            .with_background(Color::BLUE)
            .with_status_template("{seconds} left");
        let text = config.to_toml_string().unwrap();
        assert_eq!(CountdownConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_read_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("button.toml");
        std::fs::write(&path, "text = \"Go\"\nduration_seconds = 0\n").unwrap();

        let config = CountdownConfig::read_toml(&path).unwrap();
        assert_eq!(config, CountdownConfig::new("Go", 0));

        let missing = CountdownConfig::read_toml(dir.path().join("missing.toml"));
        assert!(matches!(missing, Err(CountdownError::Io(_))));
    }
}
