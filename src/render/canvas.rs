//! Drawing primitives the widgets render through.
//!
//! The toolkit never reads pixels back; a [`Canvas`] only receives filled
//! rectangles and strings, in logical screen units.

use crate::geometry::Region;
use crate::style::color::Color;

/// A fixed-size drawing surface.
pub trait Canvas {
    /// Fill the rectangle `(x, y, width, height)` with `color`.
    fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: Color);

    /// Draw `text` with its top-left corner at `(x, y)`.
    fn draw_string(&mut self, text: &str, x: i32, y: i32, foreground: Color, background: Color);

    /// Fill a [`Region`].
    fn fill_region(&mut self, region: Region, color: Color) {
        self.fill_rect(region.x, region.y, region.width, region.height, color);
    }
}

impl<C: Canvas + ?Sized> Canvas for &mut C {
    fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: Color) {
        (**self).fill_rect(x, y, width, height, color);
    }

    fn draw_string(&mut self, text: &str, x: i32, y: i32, foreground: Color, background: Color) {
        (**self).draw_string(text, x, y, foreground, background);
    }
}
