//! Pilot: a headless device with scripted keys and virtual time.
//!
//! The `Pilot` implements [`Device`](crate::device::Device) without a screen
//! or a keyboard. Key state comes from a script of holds, time only moves
//! when the session sleeps, and every draw call is recorded.

use std::time::Duration;

use crate::input::clock::Clock;
use crate::input::keys::{Key, Keypad};
use crate::render::canvas::Canvas;
use crate::session::{Session, SessionError, SessionResult, Tick};
use crate::style::color::Color;

use super::recorder::DrawRecorder;

/// How long [`Pilot::tap`] holds a key.
pub const TAP: Duration = Duration::from_millis(30);

/// A key held down over `[from, until)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hold {
    pub key: Key,
    pub from: Duration,
    pub until: Duration,
}

impl Hold {
    fn covers(&self, key: Key, now: Duration) -> bool {
        self.key == key && self.from <= now && now < self.until
    }
}

// ---------------------------------------------------------------------------
// Pilot
// ---------------------------------------------------------------------------

/// A headless device for testing.
///
/// # Examples
///
/// ```ignore
/// use std::time::Duration;
/// use padkit::input::Key;
/// use padkit::testing::Pilot;
///
/// let mut pilot = Pilot::new()
///     .tap(Key::Right, Duration::ZERO)
///     .tap(Key::Confirm, Duration::from_millis(200));
/// let result = session.run(&mut pilot)?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct Pilot {
    now: Duration,
    script: Vec<Hold>,
    recorder: DrawRecorder,
    sleeps: usize,
}

impl Pilot {
    /// Create a pilot at time zero with no keys scripted.
    pub fn new() -> Self {
        Self::default()
    }

    // ── Script ───────────────────────────────────────────────────────

    /// Hold `key` from `from` until just before `until` (builder).
    pub fn hold(mut self, key: Key, from: Duration, until: Duration) -> Self {
        self.script.push(Hold { key, from, until });
        self
    }

    /// Hold `key` briefly starting at `at` (builder).
    pub fn tap(self, key: Key, at: Duration) -> Self {
        self.hold(key, at, at + TAP)
    }

    /// Tap each key in turn, `gap` apart, starting at `at` (builder).
    pub fn tap_sequence(mut self, keys: &[Key], at: Duration, gap: Duration) -> Self {
        let mut when = at;
        for &key in keys {
            self = self.tap(key, when);
            when += gap;
        }
        self
    }

    /// Add a hold to an existing pilot.
    pub fn push_hold(&mut self, key: Key, from: Duration, until: Duration) {
        self.script.push(Hold { key, from, until });
    }

    // ── Driving ──────────────────────────────────────────────────────

    /// Tick `session` until it finishes or virtual time reaches `until`.
    pub fn run_for(&mut self, session: &mut Session, until: Duration) -> Result<Option<SessionResult>, SessionError> {
        while self.now < until {
            if let Tick::Finished(result) = session.tick(self)? {
                return Ok(Some(result));
            }
        }
        Ok(None)
    }

    // ── Query ────────────────────────────────────────────────────────

    /// Virtual time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of sleeps so far.
    pub fn sleeps(&self) -> usize {
        self.sleeps
    }

    pub fn recorder(&self) -> &DrawRecorder {
        &self.recorder
    }

    pub fn recorder_mut(&mut self) -> &mut DrawRecorder {
        &mut self.recorder
    }
}

impl Keypad for Pilot {
    fn is_key_down(&self, key: Key) -> bool {
        self.script.iter().any(|hold| hold.covers(key, self.now))
    }
}

impl Clock for Pilot {
    fn sleep(&mut self, duration: Duration) {
        self.now += duration;
        self.sleeps += 1;
    }
}

impl Canvas for Pilot {
    fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: Color) {
        self.recorder.fill_rect(x, y, width, height, color);
    }

    fn draw_string(&mut self, text: &str, x: i32, y: i32, foreground: Color, background: Color) {
        self.recorder.draw_string(text, x, y, foreground, background);
    }
}

// ===========================================================================
// Tests
// ===========================================================================
