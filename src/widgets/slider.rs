//! Slider widget: an integer value on a horizontal bar.
//!
//! While focused, Left/Right move the value by one step (ten with Shift),
//! clamped to `[min, max]`.

use crate::geometry::{rows_height, Offset, Size, OUTLINE};
use crate::input::keys::Key;
use crate::render::canvas::Canvas;
use crate::widget::{Response, Swatch};

/// Height of the bar.
pub const BAR_HEIGHT: i32 = 4;
/// Side of the square cursor.
pub const CURSOR_SIZE: i32 = 8;
/// Default bar length.
pub const DEFAULT_SIZE: i32 = 100;
/// Step multiplier while Shift is held.
pub const COARSE_FACTOR: i64 = 10;

// ---------------------------------------------------------------------------
// Slider
// ---------------------------------------------------------------------------

/// An integer slider.
///
/// # Examples
///
/// ```ignore
/// let s = Slider::new(0, 91, 1); // starts at 46
/// let t = Slider::new(0, 100, 10).with_value(50);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slider {
    min: i64,
    max: i64,
    step: i64,
    value: i64,
    size: i32,
}

impl Slider {
    /// Keys a focused slider polls.
    pub const WATCHED: [Key; 2] = [Key::Left, Key::Right];

    /// Create a slider over `[min, max]` starting at the step-rounded midpoint.
    ///
    /// Reversed bounds are swapped and a zero step becomes 1.
    pub fn new(min: i64, max: i64, step: i64) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        let step = step.checked_abs().unwrap_or(i64::MAX).max(1);
        Self {
            min,
            max,
            step,
            value: midpoint(min, max, step),
            size: DEFAULT_SIZE,
        }
    }

    /// Start at `value` instead of the midpoint (builder). Clamped.
    pub fn with_value(mut self, value: i64) -> Self {
        self.value = value.clamp(self.min, self.max);
        self
    }

    /// Set the bar length (builder).
    pub fn with_size(mut self, size: i32) -> Self {
        self.size = size.max(CURSOR_SIZE);
        self
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    pub fn min(&self) -> i64 {
        self.min
    }

    pub fn max(&self) -> i64 {
        self.max
    }

    pub fn step(&self) -> i64 {
        self.step
    }

    /// Bar length by bar height.
    pub fn size(&self) -> Size {
        Size::new(self.size, BAR_HEIGHT)
    }

    /// Move by `steps` steps, clamped. Returns whether the value changed.
    pub fn adjust(&mut self, steps: i64) -> bool {
        let old = self.value;
        let delta = steps.saturating_mul(self.step);
        self.value = self.value.saturating_add(delta).clamp(self.min, self.max);
        if self.value != old {
            tracing::debug!(from = old, to = self.value, "slider value changed");
        }
        self.value != old
    }

    pub(crate) fn handle_key(&mut self, key: Key, shift: bool) -> Response {
        let factor = if shift { COARSE_FACTOR } else { 1 };
        let steps = match key {
            Key::Left => -factor,
            Key::Right => factor,
            _ => return Response::Ignored,
        };
        if self.adjust(steps) {
            Response::Changed
        } else {
            Response::Ignored
        }
    }

    /// Horizontal offset of the cursor from the bar's left edge.
    pub fn cursor_offset(&self) -> i32 {
        let span = i128::from(self.max) - i128::from(self.min);
        if span == 0 {
            return 0;
        }
        let travel = i128::from(self.size - CURSOR_SIZE);
        let offset = (i128::from(self.value) - i128::from(self.min)) * travel / span;
        i32::try_from(offset.clamp(0, travel)).unwrap_or(0)
    }

    pub(crate) fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C, position: Offset, swatch: &Swatch) {
        let band = rows_height(1);
        canvas.fill_rect(position.x - OUTLINE, position.y, self.size + OUTLINE, band + 1, swatch.screen);

        let bar_y = position.y + (band - BAR_HEIGHT) / 2;
        canvas.fill_rect(
            position.x - OUTLINE,
            bar_y - OUTLINE,
            self.size + 2 * OUTLINE,
            BAR_HEIGHT + 2 * OUTLINE,
            swatch.outline,
        );
        canvas.fill_rect(position.x, bar_y, self.size, BAR_HEIGHT, swatch.fill);

        let cursor_x = position.x + self.cursor_offset();
        let cursor_y = position.y + (band - CURSOR_SIZE) / 2;
        canvas.fill_rect(
            cursor_x - OUTLINE,
            cursor_y - OUTLINE,
            CURSOR_SIZE + 2 * OUTLINE,
            CURSOR_SIZE + 2 * OUTLINE,
            swatch.outline,
        );
        canvas.fill_rect(cursor_x, cursor_y, CURSOR_SIZE, CURSOR_SIZE, swatch.fill);
    }
}

/// `round((min + max) / 2 / step) * step`, rounding half to even, clamped
/// to `[min, max]`.
fn midpoint(min: i64, max: i64, step: i64) -> i64 {
    let (lo, hi, step) = (i128::from(min), i128::from(max), i128::from(step));
    let (sum, unit) = (lo + hi, 2 * step);
    let mut steps = sum.div_euclid(unit);
    let twice_rem = 2 * sum.rem_euclid(unit);
    if twice_rem > unit || (twice_rem == unit && steps % 2 != 0) {
        steps += 1;
    }
    i64::try_from((steps * step).clamp(lo, hi)).unwrap_or(min)
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::color::Color;
    use crate::testing::DrawRecorder;

    // ── Construction ─────────────────────────────────────────────────

    #[test]
    fn midpoint_rounds_half_to_even() {
        assert_eq!(Slider::new(0, 91, 1).value(), 46);
        assert_eq!(Slider::new(0, 10, 2).value(), 4);
        assert_eq!(Slider::new(0, 100, 10).value(), 50);
        assert_eq!(Slider::new(0, 30, 20).value(), 20);
        assert_eq!(Slider::new(-5, 0, 1).value(), -2);
    }

    #[test]
    fn midpoint_is_exact_on_wide_ranges() {
        assert_eq!(Slider::new(0, i64::MAX / 4, 1).value(), 1 << 60);
        assert_eq!(Slider::new(i64::MIN, i64::MAX, 1).value(), 0);
        assert_eq!(Slider::new(i64::MIN, i64::MAX, i64::MAX).value(), 0);
    }

    #[test]
    fn explicit_value_is_clamped() {
        assert_eq!(Slider::new(0, 100, 10).with_value(50).value(), 50);
        assert_eq!(Slider::new(0, 100, 10).with_value(500).value(), 100);
        assert_eq!(Slider::new(0, 100, 10).with_value(-3).value(), 0);
    }

    #[test]
    fn reversed_bounds_and_bad_step_are_normalised() {
        let s = Slider::new(10, 0, -2);
        assert_eq!((s.min(), s.max(), s.step()), (0, 10, 2));
        assert_eq!(Slider::new(0, 10, 0).step(), 1);
    }

    // ── Adjustment ───────────────────────────────────────────────────

    #[test]
    fn left_never_goes_below_min() {
        let mut s = Slider::new(0, 10, 2);
        let initial = s.value();
        for _ in 0..20 {
            s.handle_key(Key::Left, false);
            assert!(s.value() >= 0);
            assert_eq!((s.value() - initial) % 2, 0);
        }
        assert_eq!(s.value(), 0);
        assert_eq!(s.handle_key(Key::Left, false), Response::Ignored);
    }

    #[test]
    fn shift_moves_ten_steps() {
        let mut s = Slider::new(0, 1000, 5).with_value(500);
        assert_eq!(s.handle_key(Key::Right, true), Response::Changed);
        assert_eq!(s.value(), 550);
        assert_eq!(s.handle_key(Key::Left, false), Response::Changed);
        assert_eq!(s.value(), 545);
    }

    #[test]
    fn right_clamps_to_max() {
        let mut s = Slider::new(0, 91, 10).with_value(86);
        assert!(s.adjust(1));
        assert_eq!(s.value(), 91);
        assert!(!s.adjust(1));
    }

    #[test]
    fn other_keys_are_ignored() {
        let mut s = Slider::new(0, 10, 1);
        assert_eq!(s.handle_key(Key::Up, false), Response::Ignored);
        assert_eq!(s.handle_key(Key::Char('a'), false), Response::Ignored);
    }

    // ── Drawing ──────────────────────────────────────────────────────

    #[test]
    fn cursor_spans_bar() {
        let s = Slider::new(0, 100, 10);
        assert_eq!(s.clone().with_value(0).cursor_offset(), 0);
        assert_eq!(s.clone().with_value(50).cursor_offset(), 46);
        assert_eq!(s.with_value(100).cursor_offset(), 92);
        assert_eq!(Slider::new(5, 5, 1).cursor_offset(), 0);
    }

    #[test]
    fn cursor_on_wide_ranges() {
        assert_eq!(Slider::new(0, i64::MAX / 4, 1).cursor_offset(), 46);
        let full = Slider::new(i64::MIN, i64::MAX, 1);
        assert_eq!(full.cursor_offset(), 46);
        assert_eq!(full.clone().with_value(i64::MIN).cursor_offset(), 0);
        assert_eq!(full.with_value(i64::MAX).cursor_offset(), 92);
    }

    #[test]
    fn wide_slider_draws_through_widget() {
        let sheet = crate::style::palette::default_sheet().unwrap();
        let mut rec = DrawRecorder::new();
        let widget = crate::widget::Widget::new(Slider::new(0, i64::MAX / 4, 1));
        widget.draw(&mut rec, &sheet).unwrap();
        assert_eq!(rec.len(), 5);
    }

    #[test]
    fn draw_sequence() {
        let swatch = Swatch {
            screen: Color::WHITE_BLUE,
            fill: Color::LIGHT_BROWN,
            outline: Color::DARK_BROWN,
            caret: Color::BLACK,
        };
        let mut rec = DrawRecorder::new();
        Slider::new(0, 100, 10).with_value(50).draw(&mut rec, Offset::new(10, 100), &swatch);
        insta::assert_snapshot!(rec.log(), @r"
        fill_rect 9 100 101 20 #c8ffff
        fill_rect 9 106 102 6 #592506
        fill_rect 10 107 100 4 #ff843d
        fill_rect 55 104 10 10 #592506
        fill_rect 56 105 8 8 #ff843d
        ");
    }
}
