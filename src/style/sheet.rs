//! Style registry and color resolution.
//!
//! A [`StyleSheet`] owns every [`Style`] of a session in a slotmap arena and
//! knows which one is the base style. Widgets hold a [`StyleId`] (or nothing,
//! meaning the base style) and ask the sheet to turn a [`ColorToken`] into a
//! concrete [`Color`].
//!
//! Resolution order for `resolve(style, token)`:
//!
//! 1. an entry for `token` in `style` (an alias restarts resolution from
//!    `style` with the alias target),
//! 2. the fallback style (the explicit parent, or the base style),
//! 3. `token` with its lowest-precedence modifier stripped, from `style` again.

use std::collections::{HashMap, HashSet};

use slotmap::{new_key_type, SlotMap};

use crate::style::color::Color;
use crate::style::model::{EntryValue, PaletteDoc};
use crate::style::parser::{parse_palette, ParseError};
use crate::style::token::ColorToken;

new_key_type! {
    /// Handle to a style stored in a [`StyleSheet`].
    pub struct StyleId;
}

/// Errors from style setup and color resolution.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum StyleError {
    #[error("no color found for token `{token}`")]
    ColorNotFound { token: String },
    #[error("alias cycle while resolving `{token}`")]
    AliasCycle { token: String },
    #[error("unknown style `{0}`")]
    UnknownStyle(String),
    #[error("style handle does not belong to this sheet")]
    StaleHandle,
    #[error("style `{0}` falls back onto itself")]
    FallbackCycle(String),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

// ---------------------------------------------------------------------------
// Style
// ---------------------------------------------------------------------------

/// A named table from tokens to colors or aliases.
#[derive(Debug, Clone, Default)]
pub struct Style {
    name: String,
    entries: HashMap<ColorToken, EntryValue>,
    parent: Option<StyleId>,
}

impl Style {
    /// The style's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The explicit parent, if one was set.
    pub fn parent(&self) -> Option<StyleId> {
        self.parent
    }

    /// The literal entry for `token`, without any fallback.
    pub fn entry(&self, token: &ColorToken) -> Option<&EntryValue> {
        self.entries.get(token)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the style has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ---------------------------------------------------------------------------
// StyleSheet
// ---------------------------------------------------------------------------

/// Arena of styles with a designated base style.
#[derive(Debug, Clone)]
pub struct StyleSheet {
    styles: SlotMap<StyleId, Style>,
    names: HashMap<String, StyleId>,
    base: StyleId,
}

impl StyleSheet {
    /// Name of the style created as the initial base.
    pub const BASE: &'static str = "base";

    /// Create a sheet holding a single, empty base style.
    pub fn new() -> Self {
        let mut styles = SlotMap::with_key();
        let base = styles.insert(Style { name: Self::BASE.to_owned(), ..Style::default() });
        let mut names = HashMap::new();
        names.insert(Self::BASE.to_owned(), base);
        Self { styles, names, base }
    }

    /// Create a sheet from palette text.
    pub fn from_palette(text: &str) -> Result<Self, StyleError> {
        let mut sheet = Self::new();
        sheet.load(text)?;
        Ok(sheet)
    }

    /// Parse palette text and merge it into the sheet.
    ///
    /// A block naming an existing style adds to (and overrides entries of) that
    /// style. Returns the ids of the styles the text declared, in order.
    pub fn load(&mut self, text: &str) -> Result<Vec<StyleId>, StyleError> {
        let doc = parse_palette(text)?;
        self.apply(&doc)
    }

    /// Merge an already-parsed palette document.
    pub fn apply(&mut self, doc: &PaletteDoc) -> Result<Vec<StyleId>, StyleError> {
        // All names first so blocks may extend styles declared later.
        let mut ids = Vec::with_capacity(doc.styles.len());
        for decl in &doc.styles {
            ids.push(self.ensure(&decl.name));
        }

        for (decl, &id) in doc.styles.iter().zip(&ids) {
            let parent = match &decl.parent {
                Some(name) => Some(self.id(name).ok_or_else(|| StyleError::UnknownStyle(name.clone()))?),
                None => None,
            };
            let style = self.styles.get_mut(id).ok_or(StyleError::StaleHandle)?;
            if parent.is_some() {
                style.parent = parent;
            }
            for entry in &decl.entries {
                style.entries.insert(entry.token.clone(), entry.value.clone());
            }
            tracing::debug!(style = %decl.name, entries = decl.entries.len(), "palette block loaded");
        }

        self.check_fallbacks()?;
        Ok(ids)
    }

    /// Get or create the style with `name`.
    pub fn ensure(&mut self, name: &str) -> StyleId {
        if let Some(&id) = self.names.get(name) {
            return id;
        }
        let id = self.styles.insert(Style { name: name.to_owned(), ..Style::default() });
        self.names.insert(name.to_owned(), id);
        id
    }

    /// Look up a style by name.
    pub fn id(&self, name: &str) -> Option<StyleId> {
        self.names.get(name).copied()
    }

    /// Borrow a style.
    pub fn get(&self, id: StyleId) -> Option<&Style> {
        self.styles.get(id)
    }

    /// The current base style.
    pub fn base(&self) -> StyleId {
        self.base
    }

    /// Replace the base style. Styles without an explicit parent now fall back to `id`.
    pub fn set_base(&mut self, id: StyleId) -> Result<(), StyleError> {
        if !self.styles.contains_key(id) {
            return Err(StyleError::StaleHandle);
        }
        let previous = self.base;
        self.base = id;
        if let Err(err) = self.check_fallbacks() {
            self.base = previous;
            return Err(err);
        }
        Ok(())
    }

    /// Set the explicit parent of `id`.
    pub fn set_parent(&mut self, id: StyleId, parent: Option<StyleId>) -> Result<(), StyleError> {
        if parent.is_some_and(|p| !self.styles.contains_key(p)) {
            return Err(StyleError::StaleHandle);
        }
        let style = self.styles.get_mut(id).ok_or(StyleError::StaleHandle)?;
        let previous = std::mem::replace(&mut style.parent, parent);
        if let Err(err) = self.check_fallbacks() {
            if let Some(style) = self.styles.get_mut(id) {
                style.parent = previous;
            }
            return Err(err);
        }
        Ok(())
    }

    /// Map `token` to a concrete color in style `id`.
    pub fn set_color(&mut self, id: StyleId, token: ColorToken, color: Color) -> Result<(), StyleError> {
        let style = self.styles.get_mut(id).ok_or(StyleError::StaleHandle)?;
        style.entries.insert(token, EntryValue::Color(color));
        Ok(())
    }

    /// Make `token` mean "the same color as `target`" in style `id`.
    pub fn set_alias(&mut self, id: StyleId, token: ColorToken, target: ColorToken) -> Result<(), StyleError> {
        let style = self.styles.get_mut(id).ok_or(StyleError::StaleHandle)?;
        style.entries.insert(token, EntryValue::Alias(target));
        Ok(())
    }

    /// The style `id` falls back to: its parent, else the base style.
    fn fallback_of(&self, id: StyleId) -> Option<StyleId> {
        let style = self.styles.get(id)?;
        match style.parent {
            Some(parent) => Some(parent),
            None if id != self.base => Some(self.base),
            None => None,
        }
    }

    fn check_fallbacks(&self) -> Result<(), StyleError> {
        for (start, style) in &self.styles {
            let mut seen = HashSet::new();
            let mut current = Some(start);
            while let Some(id) = current {
                if !seen.insert(id) {
                    return Err(StyleError::FallbackCycle(style.name.clone()));
                }
                current = self.fallback_of(id);
            }
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Resolution
    // -----------------------------------------------------------------------

    /// Resolve `token` against `style` (or the base style when `None`).
    pub fn resolve_in(&self, style: Option<StyleId>, token: &ColorToken) -> Result<Color, StyleError> {
        self.resolve(style.unwrap_or(self.base), token)
    }

    /// Resolve `token` against style `id`.
    pub fn resolve(&self, id: StyleId, token: &ColorToken) -> Result<Color, StyleError> {
        let mut aliases = Vec::new();
        self.resolve_step(id, token, &mut aliases).map_err(|err| match err {
            StyleError::ColorNotFound { .. } => StyleError::ColorNotFound { token: token.to_string() },
            other => other,
        })
    }

    fn resolve_step(
        &self,
        id: StyleId,
        token: &ColorToken,
        aliases: &mut Vec<(StyleId, ColorToken)>,
    ) -> Result<Color, StyleError> {
        let style = self.styles.get(id).ok_or(StyleError::StaleHandle)?;

        if let Some(value) = style.entries.get(token) {
            return match value {
                EntryValue::Color(color) => Ok(*color),
                EntryValue::Alias(target) => {
                    let key = (id, token.clone());
                    if aliases.contains(&key) {
                        return Err(StyleError::AliasCycle { token: token.to_string() });
                    }
                    aliases.push(key);
                    let resolved = self.resolve_step(id, target, aliases);
                    aliases.pop();
                    resolved
                }
            };
        }

        if let Some(parent) = self.fallback_of(id) {
            match self.resolve_step(parent, token, aliases) {
                Ok(color) => return Ok(color),
                Err(StyleError::ColorNotFound { .. }) => {}
                Err(other) => return Err(other),
            }
        }

        match token.dequalified() {
            Some(less) => self.resolve_step(id, &less, aliases),
            None => Err(StyleError::ColorNotFound { token: token.to_string() }),
        }
    }

    /// Check that the sheet can serve a session.
    ///
    /// Every alias entry must resolve, and every `(style, role)` pair in
    /// `required` must resolve. Since de-qualification always ends at the bare
    /// role, this guarantees every qualified form of those roles resolves too.
    pub fn validate<'a>(
        &self,
        required: impl IntoIterator<Item = (Option<StyleId>, &'a ColorToken)>,
    ) -> Result<(), StyleError> {
        for (id, style) in &self.styles {
            for (token, value) in &style.entries {
                if matches!(value, EntryValue::Alias(_)) {
                    self.resolve(id, token)?;
                }
            }
        }
        for (style, token) in required {
            self.resolve_in(style, token)?;
        }
        Ok(())
    }
}

impl Default for StyleSheet {
    fn default() -> Self {
        Self::new()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
