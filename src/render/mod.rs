//! Rendering: the canvas primitives and the crossterm terminal device.

pub mod canvas;
pub mod driver;

pub use canvas::Canvas;
pub use driver::{CellMapping, TerminalDevice};
