//! Style engine: colors, tokens, palette tokenizer and parser, resolution.

pub mod color;
pub mod token;
pub mod tokenizer;
pub mod model;
pub mod parser;
pub mod sheet;
pub mod palette;

pub use color::Color;
pub use sheet::{Style, StyleError, StyleId, StyleSheet};
pub use token::{ColorToken, Modifier};
