//! Label widget: read-only text in an outlined box.
//!
//! A label's text lives behind a [`SharedText`] handle, so a callback on
//! another widget can rewrite it. The session notices the change after the
//! callback runs and redraws the label.

use std::cell::RefCell;
use std::rc::Rc;

use crate::geometry::{text_size, Offset, Region, Size, OUTLINE};
use crate::render::canvas::Canvas;
use crate::widget::Swatch;

/// Text shared between a label and whoever updates it.
pub type SharedText = Rc<RefCell<String>>;

// ---------------------------------------------------------------------------
// Label
// ---------------------------------------------------------------------------

/// Static text. Hovering a label shows the uneditable outline.
///
/// Cloning a label shares its text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    text: SharedText,
    /// Text as of the last [`sync`](Label::sync).
    shown: String,
}

impl Label {
    /// Create a label showing `text`.
    pub fn new(text: impl Into<String>) -> Self {
        Self::shared(Rc::new(RefCell::new(text.into())))
    }

    /// Create a label showing whatever `text` currently holds.
    pub fn shared(text: SharedText) -> Self {
        let shown = text.borrow().clone();
        Self { text, shown }
    }

    /// A handle to the label's text.
    pub fn handle(&self) -> SharedText {
        Rc::clone(&self.text)
    }

    /// The displayed text.
    pub fn text(&self) -> String {
        self.text.borrow().clone()
    }

    /// Replace the displayed text. The session redraws on its next sync.
    pub fn set_text(&mut self, text: impl Into<String>) {
        *self.text.borrow_mut() = text.into();
    }

    /// Record the current text as shown. Returns whether it changed since
    /// the last sync.
    pub fn sync(&mut self) -> bool {
        let current = self.text.borrow();
        if *current == self.shown {
            return false;
        }
        self.shown.clone_from(&current);
        true
    }

    /// Text length times the character cell.
    pub fn size(&self) -> Size {
        text_size(&self.text.borrow())
    }

    pub(crate) fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C, position: Offset, swatch: &Swatch) {
        draw_text_box(canvas, &self.text.borrow(), position, swatch);
    }
}

impl Default for Label {
    fn default() -> Self {
        Self::new("")
    }
}

/// Draw `text` at `position` inside an outline, as labels and buttons do.
pub(crate) fn draw_text_box<C: Canvas + ?Sized>(canvas: &mut C, text: &str, position: Offset, swatch: &Swatch) {
    canvas.fill_region(Region::from_parts(position, text_size(text)).outset(OUTLINE), swatch.outline);
    canvas.draw_string(text, position.x, position.y, swatch.outline, swatch.fill);
}

// ===========================================================================
// Tests
// ===========================================================================
