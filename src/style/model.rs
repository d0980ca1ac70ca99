//! Palette AST: StyleDecl, Entry, EntryValue.

use crate::style::color::Color;
use crate::style::token::ColorToken;

/// The right-hand side of a palette entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryValue {
    /// A concrete color.
    Color(Color),
    /// Another token of the same style; resolves to whatever that token resolves to.
    Alias(ColorToken),
}

/// A single `token: value` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub token: ColorToken,
    pub value: EntryValue,
}

/// A named block of entries, optionally extending another style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleDecl {
    pub name: String,
    /// `extends` target. `None` means the style falls back to the base style.
    pub parent: Option<String>,
    pub entries: Vec<Entry>,
}

impl StyleDecl {
    /// Create an empty declaration.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), parent: None, entries: Vec::new() }
    }
}

/// A parsed palette document: style blocks in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaletteDoc {
    pub styles: Vec<StyleDecl>,
}
