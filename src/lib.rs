//! # padkit
//!
//! A palette-styled widget toolkit for fixed-size screens driven by a
//! directional pad.
//!
//! padkit renders labels, toggle buttons, sliders and text fields on a small
//! screen and drives them from polled key state. Widgets share colors through
//! a cascading style sheet whose tokens are narrowed by widget state
//! (`fill.enabled`, `outline.hovered`), and a single-threaded tick loop turns
//! key presses into grid navigation or into input for one focused widget.
//!
//! ## Core Systems
//!
//! - **[`style`]** — Colors, state-qualified tokens, palette text parser, cascading resolution
//! - **[`widget`]** — Widget record, widget kinds, capability pipeline
//! - **[`widgets`]** — Built-in widgets: Label, Button, Slider, TextField
//! - **[`grid`]** — Grid navigator: rows of widgets, hover cursor, radio selection
//! - **[`session`]** — Tick loop, focus mode, key repeat, session result
//! - **[`input`]** — Pad keys, key repeat timing, terminal key bindings, sleep
//! - **[`render`]** — Canvas primitives and the crossterm terminal device
//! - **[`device`]** — The combined screen, keypad and clock a session runs on
//! - **[`config`]** — Session configuration (builders or TOML)
//! - **[`testing`]** — Headless pilot with virtual time and a draw recorder
//! - **[`geometry`]** — Offset, Size, Region and layout metrics

// Foundation
pub mod geometry;

// Styling
pub mod style;

// Widget system
pub mod widget;
pub mod widgets;

// Input and output
pub mod device;
pub mod input;
pub mod render;

// Session
pub mod config;
pub mod grid;
pub mod session;

// Testing support
pub mod testing;

pub use config::SessionConfig;
pub use grid::{Cell, Grid, LayoutError};
pub use session::{CellValue, Mode, Session, SessionError, SessionResult, Tick};
pub use widget::Widget;
