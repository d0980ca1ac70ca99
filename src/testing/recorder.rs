//! Draw recording for assertions and snapshots.
//!
//! A [`DrawRecorder`] is a [`Canvas`] that keeps every call instead of
//! drawing. [`DrawRecorder::log`] renders the calls one per line, which is
//! the format the inline snapshots in this crate use:
//!
//! ```text
//! fill_rect 9 19 22 20 #592506
//! draw_string 'Hi' 10 20 #592506 on #ff843d
//! ```

use std::fmt;

use crate::render::canvas::Canvas;
use crate::style::color::Color;

// ---------------------------------------------------------------------------
// DrawCall
// ---------------------------------------------------------------------------

/// One recorded drawing primitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawCall {
    FillRect {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        color: Color,
    },
    DrawString {
        text: String,
        x: i32,
        y: i32,
        foreground: Color,
        background: Color,
    },
}

impl fmt::Display for DrawCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawCall::FillRect { x, y, width, height, color } => {
                write!(f, "fill_rect {x} {y} {width} {height} {color}")
            }
            DrawCall::DrawString { text, x, y, foreground, background } => {
                write!(f, "draw_string '{text}' {x} {y} {foreground} on {background}")
            }
        }
    }
}

// ---------------------------------------------------------------------------
// DrawRecorder
// ---------------------------------------------------------------------------

/// A canvas that records calls.
#[derive(Debug, Clone, Default)]
pub struct DrawRecorder {
    calls: Vec<DrawCall>,
}

impl DrawRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call so far, in order.
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Take the calls, leaving the recorder empty.
    pub fn take(&mut self) -> Vec<DrawCall> {
        std::mem::take(&mut self.calls)
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    /// Texts of every `draw_string` call, in order.
    pub fn strings(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::DrawString { text, .. } => Some(text.as_str()),
                DrawCall::FillRect { .. } => None,
            })
            .collect()
    }

    /// One line per call.
    pub fn log(&self) -> String {
        self.calls.iter().map(ToString::to_string).collect::<Vec<_>>().join("\n")
    }
}

impl Canvas for DrawRecorder {
    fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: Color) {
        self.calls.push(DrawCall::FillRect { x, y, width, height, color });
    }

    fn draw_string(&mut self, text: &str, x: i32, y: i32, foreground: Color, background: Color) {
        self.calls.push(DrawCall::DrawString {
            text: text.to_owned(),
            x,
            y,
            foreground,
            background,
        });
    }
}
