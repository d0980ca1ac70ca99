//! The default device palette.

use crate::style::sheet::{StyleError, StyleSheet};
use crate::style::token::ColorToken;

/// Screen background.
pub const SCREEN: &str = "screen";
/// Widget body.
pub const FILL: &str = "fill";
/// Widget outline and text.
pub const OUTLINE: &str = "outline";
/// Text caret of a focused text field.
pub const CARET: &str = "caret";

/// Every role a stock widget draws with.
pub const ROLES: [&str; 4] = [SCREEN, FILL, OUTLINE, CARET];

/// Palette text compiled into every new session's base style.
pub const DEFAULT_PALETTE: &str = r#"
/* Shared colors of the stock widgets. */
base {
  screen: white_blue;

  fill: light_brown;
  fill.enabled: dark_blue;
  fill.focused: dark_blue;

  outline: dark_brown;
  outline.hovered: white;
  outline.focused: white;
  outline.hovered.uneditable: grey;

  caret: $outline;
}
"#;

/// A sheet whose base style holds [`DEFAULT_PALETTE`].
pub fn default_sheet() -> Result<StyleSheet, StyleError> {
    StyleSheet::from_palette(DEFAULT_PALETTE)
}

/// Shorthand for an unqualified token.
pub fn role(name: &str) -> ColorToken {
    ColorToken::new(name)
}
