//! Headless testing framework: Pilot, draw recorder.
//!
//! Use the [`Pilot`] to drive a [`Session`](crate::session::Session) with a
//! scripted keypad and virtual time. Use the [`DrawRecorder`] to capture draw
//! calls for assertions and inline snapshots.

pub mod pilot;
pub mod recorder;

pub use pilot::{Hold, Pilot, TAP};
pub use recorder::{DrawCall, DrawRecorder};
