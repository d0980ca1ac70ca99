//! Color tokens: a base role name narrowed by state modifiers.
//!
//! A token such as `fill.enabled.hovered` names the `fill` role as seen by a
//! widget that is both enabled and hovered. Modifiers are always stored in
//! canonical order, highest precedence first, so the last modifier in the list
//! is the one de-qualification strips next.

use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Modifier
// ---------------------------------------------------------------------------

/// A widget state narrowing a color role.
///
/// Variants are declared in precedence order, lowest first: `Uneditable` is
/// the first qualifier to be dropped when a qualified token has no entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Modifier {
    Uneditable,
    Hovered,
    Enabled,
    Focused,
}

impl Modifier {
    /// The suffix used in token strings.
    pub fn as_str(self) -> &'static str {
        match self {
            Modifier::Uneditable => "uneditable",
            Modifier::Hovered => "hovered",
            Modifier::Enabled => "enabled",
            Modifier::Focused => "focused",
        }
    }

    /// Parse a suffix; `None` if it is not a known modifier.
    pub fn from_name(name: &str) -> Option<Modifier> {
        match name {
            "uneditable" => Some(Modifier::Uneditable),
            "hovered" => Some(Modifier::Hovered),
            "enabled" => Some(Modifier::Enabled),
            "focused" => Some(Modifier::Focused),
            _ => None,
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ColorToken
// ---------------------------------------------------------------------------

/// An immutable, optionally state-qualified reference to a color role.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColorToken {
    base: String,
    modifiers: Vec<Modifier>,
}

impl ColorToken {
    /// An unqualified token for the given role.
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into(), modifiers: Vec::new() }
    }

    /// The role name without modifiers.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Modifiers in canonical order (highest precedence first).
    pub fn modifiers(&self) -> &[Modifier] {
        &self.modifiers
    }

    /// Whether the token carries any modifier.
    pub fn is_qualified(&self) -> bool {
        !self.modifiers.is_empty()
    }

    /// A copy of this token narrowed by `modifier`.
    ///
    /// Adding a modifier that is already present returns an equal token.
    pub fn with(&self, modifier: Modifier) -> ColorToken {
        let mut token = self.clone();
        if let Err(idx) = token
            .modifiers
            .binary_search_by(|probe| modifier.cmp(probe))
        {
            token.modifiers.insert(idx, modifier);
        }
        token
    }

    /// Narrow by `modifier` only when `condition` holds.
    pub fn with_if(&self, modifier: Modifier, condition: bool) -> ColorToken {
        if condition {
            self.with(modifier)
        } else {
            self.clone()
        }
    }

    pub fn uneditable(&self) -> ColorToken {
        self.with(Modifier::Uneditable)
    }

    pub fn hovered(&self) -> ColorToken {
        self.with(Modifier::Hovered)
    }

    pub fn enabled(&self) -> ColorToken {
        self.with(Modifier::Enabled)
    }

    pub fn focused(&self) -> ColorToken {
        self.with(Modifier::Focused)
    }

    /// The token with its lowest-precedence modifier removed.
    ///
    /// Returns `None` for an unqualified token.
    pub fn dequalified(&self) -> Option<ColorToken> {
        if self.modifiers.is_empty() {
            return None;
        }
        let mut token = self.clone();
        token.modifiers.pop();
        Some(token)
    }
}

impl fmt::Display for ColorToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base)?;
        for modifier in &self.modifiers {
            write!(f, ".{modifier}")?;
        }
        Ok(())
    }
}

/// Error returned when a token string is malformed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("empty color token")]
    Empty,
    #[error("unknown modifier `{modifier}` in token `{token}`")]
    UnknownModifier { token: String, modifier: String },
}

impl FromStr for ColorToken {
    type Err = TokenError;

    /// Parse `base.mod.mod`; modifiers may be written in any order.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.trim().split('.');
        let base = match parts.next() {
            Some(b) if !b.is_empty() => b,
            _ => return Err(TokenError::Empty),
        };
        let mut token = ColorToken::new(base);
        for part in parts {
            let modifier = Modifier::from_name(part).ok_or_else(|| TokenError::UnknownModifier {
                token: s.to_owned(),
                modifier: part.to_owned(),
            })?;
            token = token.with(modifier);
        }
        Ok(token)
    }
}

impl From<&str> for ColorToken {
    /// Build an unqualified token. Use [`str::parse`] for dotted forms.
    fn from(base: &str) -> Self {
        ColorToken::new(base)
    }
}
