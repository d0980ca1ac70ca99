//! Button widget: a labelled toggle.
//!
//! A button's `enabled` flag (held on the owning [`Widget`](crate::widget::Widget))
//! means "selected". Keeping one selected button per row is the session's job,
//! not the button's.

use crate::geometry::{text_size, Offset, Size};
use crate::render::canvas::Canvas;
use crate::widget::Swatch;

use super::label::draw_text_box;

// ---------------------------------------------------------------------------
// Button
// ---------------------------------------------------------------------------

/// A labelled toggle button.
///
/// # Examples
///
/// ```ignore
/// let b = Widget::button("Az").enabled(true);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    text: String,
}

impl Button {
    /// Create a new button with the given label.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Return the button label.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn size(&self) -> Size {
        text_size(&self.text)
    }

    pub(crate) fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C, position: Offset, swatch: &Swatch) {
        draw_text_box(canvas, &self.text, position, swatch);
    }
}

// ===========================================================================
// Tests
// ===========================================================================
