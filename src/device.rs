//! The hardware a session runs on.
//!
//! A session needs somewhere to draw, keys to poll, and a way to wait. Any
//! type providing all three is a [`Device`].

pub use crate::input::clock::Clock;
pub use crate::input::keys::Keypad;
pub use crate::render::canvas::Canvas;

/// A screen, a keypad and a clock.
pub trait Device: Canvas + Keypad + Clock {}

impl<T: Canvas + Keypad + Clock + ?Sized> Device for T {}
