//! Terminal key binding registry.
//!
//! [`KeyBindings`] maps terminal key codes onto pad [`Key`]s. The
//! `with_defaults()` constructor installs the standard layout (arrows move,
//! Enter activates, Esc confirms). Printable characters that are not bound
//! explicitly map to [`Key::Char`] in lower case.

use std::collections::HashMap;

use crossterm::event::KeyCode;

use super::keys::Key;

/// Registry of terminal key code -> pad key.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyCode, Key>,
}

impl KeyBindings {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self { bindings: HashMap::new() }
    }

    /// Create a registry with standard default bindings.
    ///
    /// Defaults:
    /// - arrows -> directions
    /// - `Enter` -> Activate
    /// - `Esc` -> Confirm
    /// - `Backspace` -> Backspace
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.bind(KeyCode::Up, Key::Up);
        registry.bind(KeyCode::Down, Key::Down);
        registry.bind(KeyCode::Left, Key::Left);
        registry.bind(KeyCode::Right, Key::Right);
        registry.bind(KeyCode::Enter, Key::Activate);
        registry.bind(KeyCode::Esc, Key::Confirm);
        registry.bind(KeyCode::Backspace, Key::Backspace);
        registry
    }

    /// Register a binding, replacing any existing one for `code`.
    pub fn bind(&mut self, code: KeyCode, key: Key) {
        self.bindings.insert(code, key);
    }

    /// Remove a binding. Returns the removed key, if any.
    pub fn unbind(&mut self, code: KeyCode) -> Option<Key> {
        self.bindings.remove(&code)
    }

    /// Look up the pad key for a terminal key code.
    pub fn resolve(&self, code: KeyCode) -> Option<Key> {
        if let Some(&key) = self.bindings.get(&code) {
            return Some(key);
        }
        match code {
            KeyCode::Char(c) if !c.is_control() => Some(Key::Char(c.to_ascii_lowercase())),
            _ => None,
        }
    }

    /// Number of explicit bindings.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether the registry has no explicit bindings.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::with_defaults()
    }
}
