//! Core geometry types: Offset, Size, Region, and layout arithmetic.
//!
//! All coordinates are integer logical units on the device screen. The layout
//! helpers compute the footprint of a row of widgets and of a stack of rows,
//! including outlines and the spacing between neighbours.

use std::ops::{Add, Mul, Neg, Sub};

/// Errors from geometry construction.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum GeometryError {
    #[error("coordinates must be integers, got ({x}, {y})")]
    NonInteger { x: f64, y: f64 },
    #[error("coordinate ({x}, {y}) does not fit in a logical unit")]
    OutOfRange { x: f64, y: f64 },
}

// ---------------------------------------------------------------------------
// Offset
// ---------------------------------------------------------------------------

/// A 2D position or displacement in logical screen units.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Offset {
    pub x: i32,
    pub y: i32,
}

impl Offset {
    /// The origin.
    pub const ZERO: Offset = Offset { x: 0, y: 0 };

    /// Create a new offset.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl TryFrom<(f64, f64)> for Offset {
    type Error = GeometryError;

    /// Accepts only values with no fractional part.
    fn try_from((x, y): (f64, f64)) -> Result<Self, Self::Error> {
        if x.fract() != 0.0 || y.fract() != 0.0 || !x.is_finite() || !y.is_finite() {
            return Err(GeometryError::NonInteger { x, y });
        }
        let range = f64::from(i32::MIN)..=f64::from(i32::MAX);
        if !range.contains(&x) || !range.contains(&y) {
            return Err(GeometryError::OutOfRange { x, y });
        }
        Ok(Offset::new(x as i32, y as i32))
    }
}

impl Add for Offset {
    type Output = Offset;
    #[inline]
    fn add(self, rhs: Offset) -> Offset {
        Offset { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl Sub for Offset {
    type Output = Offset;
    #[inline]
    fn sub(self, rhs: Offset) -> Offset {
        Offset { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

impl Neg for Offset {
    type Output = Offset;
    #[inline]
    fn neg(self) -> Offset {
        Offset { x: -self.x, y: -self.y }
    }
}

impl Mul<i32> for Offset {
    type Output = Offset;
    #[inline]
    fn mul(self, rhs: i32) -> Offset {
        Offset { x: self.x * rhs, y: self.y * rhs }
    }
}

impl std::fmt::Display for Offset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<{}, {}>", self.x, self.y)
    }
}

// ---------------------------------------------------------------------------
// Size
// ---------------------------------------------------------------------------

/// A 2D size in logical units (width x height).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    /// A zero-sized size.
    pub const ZERO: Size = Size { width: 0, height: 0 };

    /// Create a new size.
    #[inline]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// The centre point of a region of this size placed at the origin.
    #[inline]
    pub const fn center(self) -> Offset {
        Offset { x: self.width / 2, y: self.height / 2 }
    }
}

impl Add for Size {
    type Output = Size;
    #[inline]
    fn add(self, rhs: Size) -> Size {
        Size { width: self.width + rhs.width, height: self.height + rhs.height }
    }
}

// ---------------------------------------------------------------------------
// Region
// ---------------------------------------------------------------------------

/// A rectangle defined by its top-left corner and size.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Region {
    /// Create a new region.
    #[inline]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Build a region from a corner and a size.
    #[inline]
    pub const fn from_parts(origin: Offset, size: Size) -> Self {
        Self { x: origin.x, y: origin.y, width: size.width, height: size.height }
    }

    /// The right edge (exclusive): `x + width`.
    #[inline]
    pub const fn right(self) -> i32 {
        self.x + self.width
    }

    /// The bottom edge (exclusive): `y + height`.
    #[inline]
    pub const fn bottom(self) -> i32 {
        self.y + self.height
    }

    /// Whether the point (x, y) lies inside this region.
    #[inline]
    pub const fn contains(self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Grow the region by `amount` on every side.
    ///
    /// This is how outlines are drawn around a widget body.
    #[inline]
    pub const fn outset(self, amount: i32) -> Region {
        Region {
            x: self.x - amount,
            y: self.y - amount,
            width: self.width + 2 * amount,
            height: self.height + 2 * amount,
        }
    }
}

// ---------------------------------------------------------------------------
// Layout metrics
// ---------------------------------------------------------------------------

/// Width of one rendered character, in logical units.
pub const CHAR_WIDTH: i32 = 10;
/// Height of one rendered character (and of one widget row body).
pub const CHAR_HEIGHT: i32 = 18;
/// Horizontal gap between neighbouring widgets in a row.
pub const SPACING_X: i32 = 2;
/// Vertical gap between neighbouring rows.
pub const SPACING_Y: i32 = 4;
/// Thickness of the outline drawn around each widget.
pub const OUTLINE: i32 = 1;

/// The size a string occupies when drawn.
#[inline]
pub fn text_size(text: &str) -> Size {
    Size::new(text.chars().count() as i32 * CHAR_WIDTH, CHAR_HEIGHT)
}

/// Total width of a row of widgets with the given body widths.
///
/// Each widget contributes its outline plus the gap to its neighbour; the
/// trailing gap is not counted.
pub fn row_width(widths: impl IntoIterator<Item = i32>) -> i32 {
    let mut count = 0;
    let mut total = 0;
    for width in widths {
        count += 1;
        total += width;
    }
    if count == 0 {
        return 0;
    }
    total + count * (OUTLINE + SPACING_X) - SPACING_X
}

/// Total height of `rows` stacked widget rows.
#[inline]
pub const fn rows_height(rows: i32) -> i32 {
    if rows <= 0 {
        return 0;
    }
    rows * (CHAR_HEIGHT + OUTLINE + SPACING_Y) - SPACING_Y
}

// ===========================================================================
// Tests
// ===========================================================================
