//! Text field widget: an editable single line with a caret.
//!
//! The buffer is stored as `char`s so the caret is always a character index.
//! Only `size` characters are visible; the window scrolls so the caret stays
//! in view.

use crate::geometry::{Offset, Region, Size, CHAR_HEIGHT, CHAR_WIDTH, OUTLINE};
use crate::input::keys::Key;
use crate::render::canvas::Canvas;
use crate::widget::{Response, Swatch};

/// Characters a text field accepts by default.
pub const DEFAULT_CHARSET: &str = "abcdefghijklmnopqrstuvwxyz0123456789 ";

/// Width of the caret bar.
pub const CARET_WIDTH: i32 = 1;

/// Widest visible window a field accepts, in characters.
pub const MAX_VISIBLE: usize = 1024;

// ---------------------------------------------------------------------------
// TextField
// ---------------------------------------------------------------------------

/// An editable text field.
///
/// # Examples
///
/// ```ignore
/// let field = TextField::new(8).with_text("hello");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextField {
    chars: Vec<char>,
    caret: usize,
    size: usize,
    charset: Vec<char>,
}

impl TextField {
    /// Create an empty field showing `size` characters, kept within
    /// `[1, MAX_VISIBLE]`.
    pub fn new(size: usize) -> Self {
        Self {
            chars: Vec::new(),
            caret: 0,
            size: size.clamp(1, MAX_VISIBLE),
            charset: DEFAULT_CHARSET.chars().collect(),
        }
    }

    /// Set the initial text (builder). The caret moves to the end.
    pub fn with_text(mut self, text: &str) -> Self {
        self.chars = text.chars().collect();
        self.caret = self.chars.len();
        self
    }

    /// Replace the accepted characters (builder). Letters are given in lower case.
    pub fn with_charset(mut self, charset: &str) -> Self {
        self.charset = charset.chars().collect();
        self
    }

    /// The current text.
    pub fn text(&self) -> String {
        self.chars.iter().collect()
    }

    /// Caret index in `[0, len]`.
    pub fn caret(&self) -> usize {
        self.caret
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Visible width in characters.
    pub fn visible_chars(&self) -> usize {
        self.size
    }

    /// Visible characters times the character cell.
    pub fn size(&self) -> Size {
        Size::new(columns(self.size).saturating_mul(CHAR_WIDTH), CHAR_HEIGHT)
    }

    // ── Editing ──────────────────────────────────────────────────────

    /// Insert `ch` at the caret and advance the caret.
    pub fn insert_char(&mut self, ch: char) {
        self.chars.insert(self.caret, ch);
        self.caret += 1;
    }

    /// Delete the character before the caret. Returns whether anything was deleted.
    pub fn delete_char(&mut self) -> bool {
        if self.caret == 0 {
            return false;
        }
        self.caret -= 1;
        self.chars.remove(self.caret);
        true
    }

    /// Move the caret by one character, clamped. Returns whether it moved.
    pub fn move_caret_left(&mut self) -> bool {
        if self.caret == 0 {
            return false;
        }
        self.caret -= 1;
        true
    }

    pub fn move_caret_right(&mut self) -> bool {
        if self.caret >= self.chars.len() {
            return false;
        }
        self.caret += 1;
        true
    }

    /// Move the caret to the start.
    pub fn home(&mut self) -> bool {
        let moved = self.caret != 0;
        self.caret = 0;
        moved
    }

    /// Move the caret to the end.
    pub fn end(&mut self) -> bool {
        let moved = self.caret != self.chars.len();
        self.caret = self.chars.len();
        moved
    }

    // ── Input ────────────────────────────────────────────────────────

    /// Keys a focused field polls: caret movement, backspace, the charset.
    pub fn watched_keys(&self) -> Vec<Key> {
        let mut keys = vec![Key::Left, Key::Right, Key::Up, Key::Down, Key::Backspace];
        keys.extend(self.charset.iter().map(|&c| Key::Char(c)));
        keys
    }

    pub(crate) fn handle_key(&mut self, key: Key, shift: bool) -> Response {
        let moved = match key {
            Key::Left => self.move_caret_left(),
            Key::Right => self.move_caret_right(),
            Key::Up => self.home(),
            Key::Down => self.end(),
            Key::Backspace => {
                return if self.delete_char() { Response::Changed } else { Response::Ignored };
            }
            Key::Char(c) if self.charset.contains(&c) => {
                self.insert_char(if shift { c.to_ascii_uppercase() } else { c });
                return Response::Changed;
            }
            _ => false,
        };
        if moved {
            Response::Redraw
        } else {
            Response::Ignored
        }
    }

    // ── Drawing ──────────────────────────────────────────────────────

    /// Index of the first visible character.
    pub fn scroll_offset(&self) -> usize {
        self.caret.saturating_sub(self.size)
    }

    /// The visible window, padded with spaces to the visible width.
    pub fn visible_text(&self) -> String {
        let offset = self.scroll_offset();
        let mut shown: String = self.chars.iter().skip(offset).take(self.size).collect();
        let missing = self.size.saturating_sub(shown.chars().count());
        shown.extend(std::iter::repeat(' ').take(missing));
        shown
    }

    pub(crate) fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C, position: Offset, swatch: &Swatch, focused: bool) {
        canvas.fill_region(Region::from_parts(position, self.size()).outset(OUTLINE), swatch.outline);
        canvas.draw_string(&self.visible_text(), position.x, position.y, swatch.outline, swatch.fill);
        if focused {
            let column = columns(self.caret - self.scroll_offset());
            canvas.fill_rect(position.x + column * CHAR_WIDTH, position.y, CARET_WIDTH, CHAR_HEIGHT, swatch.caret);
        }
    }
}

fn columns(chars: usize) -> i32 {
    i32::try_from(chars).unwrap_or(i32::MAX)
}

impl Default for TextField {
    fn default() -> Self {
        Self::new(10)
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::color::Color;
    use crate::testing::DrawRecorder;

    // ── Editing ──────────────────────────────────────────────────────

    #[test]
    fn type_then_backspace_twice() {
        let mut f = TextField::new(8);
        for c in ['a', 'b', 'c'] {
            assert_eq!(f.handle_key(Key::Char(c), false), Response::Changed);
        }
        f.handle_key(Key::Backspace, false);
        f.handle_key(Key::Backspace, false);
        assert_eq!(f.text(), "a");
        assert_eq!(f.caret(), 1);
    }

    #[test]
    fn backspace_at_start_is_noop() {
        let mut f = TextField::new(8);
        assert_eq!(f.handle_key(Key::Backspace, false), Response::Ignored);
        let mut f = TextField::new(8).with_text("xy");
        f.home();
        assert_eq!(f.handle_key(Key::Backspace, false), Response::Ignored);
        assert_eq!(f.text(), "xy");
    }

    #[test]
    fn insert_in_middle() {
        let mut f = TextField::new(8).with_text("ac");
        f.move_caret_left();
        f.insert_char('b');
        assert_eq!(f.text(), "abc");
        assert_eq!(f.caret(), 2);
    }

    #[test]
    fn caret_movement_clamps() {
        let mut f = TextField::new(8).with_text("abc");
        assert_eq!(f.handle_key(Key::Right, false), Response::Ignored);
        assert_eq!(f.handle_key(Key::Up, false), Response::Redraw);
        assert_eq!(f.caret(), 0);
        assert_eq!(f.handle_key(Key::Left, false), Response::Ignored);
        assert_eq!(f.handle_key(Key::Down, false), Response::Redraw);
        assert_eq!(f.caret(), 3);
    }

    #[test]
    fn shift_uppercases() {
        let mut f = TextField::new(8);
        f.handle_key(Key::Char('q'), true);
        f.handle_key(Key::Char('7'), true);
        assert_eq!(f.text(), "Q7");
    }

    #[test]
    fn charset_filters_input() {
        let mut f = TextField::new(8).with_charset("01");
        assert_eq!(f.handle_key(Key::Char('a'), false), Response::Ignored);
        assert_eq!(f.handle_key(Key::Char('1'), false), Response::Changed);
        assert_eq!(f.text(), "1");
        assert!(f.watched_keys().contains(&Key::Char('0')));
        assert!(!f.watched_keys().contains(&Key::Char('a')));
    }

    // ── Sizing ───────────────────────────────────────────────────────

    #[test]
    fn visible_width_is_capped() {
        let f = TextField::new(usize::MAX);
        assert_eq!(f.visible_chars(), MAX_VISIBLE);
        assert_eq!(f.size(), Size::new(MAX_VISIBLE as i32 * CHAR_WIDTH, CHAR_HEIGHT));
        assert!(f.size().width > 0);
        assert_eq!(TextField::new(0).visible_chars(), 1);
    }

    // ── Scrolling ────────────────────────────────────────────────────

    #[test]
    fn window_scrolls_with_caret() {
        let f = TextField::new(3).with_text("abcdef");
        assert_eq!(f.scroll_offset(), 3);
        assert_eq!(f.visible_text(), "def");
        let mut g = f.clone();
        g.home();
        assert_eq!(g.scroll_offset(), 0);
        assert_eq!(g.visible_text(), "abc");
    }

    #[test]
    fn short_text_is_padded() {
        assert_eq!(TextField::new(4).with_text("ab").visible_text(), "ab  ");
        assert_eq!(TextField::new(4).size(), Size::new(40, 18));
    }

    // ── Drawing ──────────────────────────────────────────────────────

    #[test]
    fn caret_only_while_focused() {
        let swatch = Swatch {
            screen: Color::WHITE_BLUE,
            fill: Color::DARK_BLUE,
            outline: Color::WHITE,
            caret: Color::BLACK,
        };
        let f = TextField::new(3).with_text("ab");
        let mut rec = DrawRecorder::new();
        f.draw(&mut rec, Offset::new(10, 10), &swatch, false);
        assert_eq!(rec.calls().len(), 2);

        let mut rec = DrawRecorder::new();
        f.draw(&mut rec, Offset::new(10, 10), &swatch, true);
        insta::assert_snapshot!(rec.log(), @r"
        fill_rect 9 9 32 20 #ffffff
        draw_string 'ab ' 10 10 #ffffff on #009998
        fill_rect 30 10 1 18 #000000
        ");
    }
}
