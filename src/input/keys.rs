//! Pad keys and the polled key-state primitive.

use std::fmt;

// ---------------------------------------------------------------------------
// Key
// ---------------------------------------------------------------------------

/// A key on the input device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    /// Toggles focus, or selects the hovered button.
    Activate,
    /// Ends the session.
    Confirm,
    /// Held to make slider steps coarse and typed letters upper-case.
    Shift,
    Backspace,
    Char(char),
}

impl Key {
    /// Directional keys in the order navigation processes them.
    pub const DIRECTIONS: [Key; 4] = [Key::Up, Key::Down, Key::Right, Key::Left];

    /// Unit grid delta `(dx, dy)` for a directional key.
    pub fn delta(self) -> Option<(i32, i32)> {
        match self {
            Key::Up => Some((0, -1)),
            Key::Down => Some((0, 1)),
            Key::Right => Some((1, 0)),
            Key::Left => Some((-1, 0)),
            _ => None,
        }
    }

    /// Whether this is one of the four directional keys.
    pub fn is_direction(self) -> bool {
        self.delta().is_some()
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Char(c) => write!(f, "'{c}'"),
            other => write!(f, "{other:?}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Keypad
// ---------------------------------------------------------------------------

/// Polled, non-blocking key state. No debouncing is expected from implementors.
pub trait Keypad {
    /// Whether `key` is currently held down.
    fn is_key_down(&self, key: Key) -> bool;

    /// Whether any of `keys` is held down.
    fn any_down(&self, keys: &[Key]) -> bool {
        keys.iter().any(|&k| self.is_key_down(k))
    }
}

impl<K: Keypad + ?Sized> Keypad for &K {
    fn is_key_down(&self, key: Key) -> bool {
        (**self).is_key_down(key)
    }
}

impl<K: Keypad + ?Sized> Keypad for &mut K {
    fn is_key_down(&self, key: Key) -> bool {
        (**self).is_key_down(key)
    }
}
