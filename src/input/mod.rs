//! Input system: pad keys, polling, key repeat, terminal bindings, timing.

pub mod binding;
pub mod clock;
pub mod keys;
pub mod repeat;

pub use binding::KeyBindings;
pub use clock::Clock;
pub use keys::{Key, Keypad};
pub use repeat::{KeyRepeat, RepeatTiming};
