//! Session configuration: screen size, timing, extra palette text.
//!
//! Built in code with the `with_*` builders, or read from TOML:
//!
//! ```toml
//! screen_width = 320
//! screen_height = 222
//! tick_ms = 20
//! first_press_delay_ms = 400
//! repeat_delay_ms = 100
//! release_poll_ms = 50
//! palette = "base { fill: #ff0000; }"
//! ```
//!
//! Every key is optional.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::geometry::Size;
use crate::input::repeat::RepeatTiming;

/// Errors from reading a configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("`{0}` must be greater than zero")]
    Zero(&'static str),
}

// ---------------------------------------------------------------------------
// SessionConfig
// ---------------------------------------------------------------------------

/// Configuration for one interactive session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Logical screen size.
    pub screen: Size,
    /// Sleep at the end of every loop iteration.
    pub tick: Duration,
    /// Hold time before a focused key starts repeating.
    pub first_press_delay: Duration,
    /// Interval between repeats.
    pub repeat_delay: Duration,
    /// Poll interval while waiting for a key release.
    pub release_poll: Duration,
    /// Palette text compiled on top of the default palette.
    pub palette: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            screen: Size::new(320, 222),
            tick: Duration::from_millis(20),
            first_press_delay: Duration::from_millis(400),
            repeat_delay: Duration::from_millis(100),
            release_poll: Duration::from_millis(50),
            palette: None,
        }
    }
}

impl SessionConfig {
    /// Create a new default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the screen size (builder).
    pub fn with_screen(mut self, width: i32, height: i32) -> Self {
        self.screen = Size::new(width, height);
        self
    }

    /// Set the loop tick (builder).
    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick;
        self
    }

    /// Set the key-repeat delays (builder).
    pub fn with_repeat(mut self, first_press_delay: Duration, repeat_delay: Duration) -> Self {
        self.first_press_delay = first_press_delay;
        self.repeat_delay = repeat_delay;
        self
    }

    /// Set the release poll interval (builder).
    pub fn with_release_poll(mut self, release_poll: Duration) -> Self {
        self.release_poll = release_poll;
        self
    }

    /// Set extra palette text (builder).
    pub fn with_palette(mut self, palette: impl Into<String>) -> Self {
        self.palette = Some(palette.into());
        self
    }

    /// The key-repeat delays as one value.
    pub fn repeat_timing(&self) -> RepeatTiming {
        RepeatTiming {
            first_delay: self.first_press_delay,
            repeat_delay: self.repeat_delay,
        }
    }

    /// Parse a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(text)?;
        file.into_config()
    }

    /// Check that every duration and the screen size are non-zero.
    ///
    /// `Session::new` calls this, so builder-made and TOML configs are held
    /// to the same rules.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let durations = [
            ("tick", self.tick),
            ("first_press_delay", self.first_press_delay),
            ("repeat_delay", self.repeat_delay),
            ("release_poll", self.release_poll),
        ];
        if let Some((name, _)) = durations.iter().find(|(_, d)| d.is_zero()) {
            return Err(ConfigError::Zero(*name));
        }
        if self.screen.width <= 0 {
            return Err(ConfigError::Zero("screen_width"));
        }
        if self.screen.height <= 0 {
            return Err(ConfigError::Zero("screen_height"));
        }
        Ok(())
    }

    /// Read and parse a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}

/// On-disk shape of [`SessionConfig`].
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    screen_width: Option<i32>,
    screen_height: Option<i32>,
    tick_ms: Option<u64>,
    first_press_delay_ms: Option<u64>,
    repeat_delay_ms: Option<u64>,
    release_poll_ms: Option<u64>,
    palette: Option<String>,
}

impl ConfigFile {
    fn into_config(self) -> Result<SessionConfig, ConfigError> {
        let defaults = SessionConfig::default();
        let config = SessionConfig {
            screen: Size::new(
                self.screen_width.unwrap_or(defaults.screen.width),
                self.screen_height.unwrap_or(defaults.screen.height),
            ),
            tick: millis(self.tick_ms, defaults.tick),
            first_press_delay: millis(self.first_press_delay_ms, defaults.first_press_delay),
            repeat_delay: millis(self.repeat_delay_ms, defaults.repeat_delay),
            release_poll: millis(self.release_poll_ms, defaults.release_poll),
            palette: self.palette,
        };
        config.validate()?;
        Ok(config)
    }
}

fn millis(value: Option<u64>, default: Duration) -> Duration {
    value.map_or(default, Duration::from_millis)
}

// ===========================================================================
// Tests
// ===========================================================================
