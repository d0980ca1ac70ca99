//! Press-and-hold key repeat.
//!
//! A held action fires once on the tick its key goes down, again once the key
//! has been held for the first-press delay, then once per repeat delay until
//! the key is released. Releasing never fires.

use std::collections::HashMap;
use std::time::Duration;

use super::keys::Key;

/// Delays governing held-key repetition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepeatTiming {
    /// Time a key must stay down before it starts repeating.
    pub first_delay: Duration,
    /// Interval between repeats once repeating.
    pub repeat_delay: Duration,
}

impl Default for RepeatTiming {
    fn default() -> Self {
        Self {
            first_delay: Duration::from_millis(400),
            repeat_delay: Duration::from_millis(100),
        }
    }
}

/// Tracks the next firing time of every held key.
#[derive(Debug, Clone, Default)]
pub struct KeyRepeat {
    timing: RepeatTiming,
    next_fire: HashMap<Key, Duration>,
}

impl KeyRepeat {
    /// Create a tracker with the given timing.
    pub fn new(timing: RepeatTiming) -> Self {
        Self { timing, next_fire: HashMap::new() }
    }

    /// The timing in use.
    pub fn timing(&self) -> RepeatTiming {
        self.timing
    }

    /// Feed the state of `key` sampled at session time `now`.
    ///
    /// Returns `true` when the key's action should run on this sample.
    pub fn poll(&mut self, key: Key, down: bool, now: Duration) -> bool {
        if !down {
            self.next_fire.remove(&key);
            return false;
        }
        match self.next_fire.get_mut(&key) {
            None => {
                self.next_fire.insert(key, now + self.timing.first_delay);
                true
            }
            Some(next) if now >= *next => {
                *next += self.timing.repeat_delay;
                tracing::trace!(%key, ?now, "key repeat");
                true
            }
            Some(_) => false,
        }
    }

    /// Whether `key` is currently tracked as held.
    pub fn is_held(&self, key: Key) -> bool {
        self.next_fire.contains_key(&key)
    }

    /// Forget every held key.
    pub fn reset(&mut self) {
        self.next_fire.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TICK: Duration = Duration::from_millis(10);

    fn timing() -> RepeatTiming {
        RepeatTiming {
            first_delay: Duration::from_millis(400),
            repeat_delay: Duration::from_millis(100),
        }
    }

    /// Sample every tick from 0 up to `total`, with the key down for `held`.
    fn count_fires(held: Duration, total: Duration) -> usize {
        let mut repeat = KeyRepeat::new(timing());
        let mut now = Duration::ZERO;
        let mut fires = 0;
        while now <= total {
            if repeat.poll(Key::Backspace, now < held, now) {
                fires += 1;
            }
            now += TICK;
        }
        fires
    }

    #[test]
    fn tap_fires_once() {
        assert_eq!(count_fires(Duration::from_millis(10), Duration::from_secs(2)), 1);
        assert_eq!(count_fires(Duration::from_millis(390), Duration::from_secs(2)), 1);
    }

    #[test]
    fn hold_for_first_delay_plus_three_repeats_fires_four_times() {
        let held = Duration::from_millis(400 + 3 * 100);
        assert_eq!(count_fires(held, Duration::from_secs(2)), 4);
    }

    #[test]
    fn hold_exactly_first_delay_fires_once() {
        assert_eq!(count_fires(Duration::from_millis(400), Duration::from_secs(2)), 1);
    }

    #[test]
    fn release_stops_and_rearms() {
        let mut repeat = KeyRepeat::new(timing());
        assert!(repeat.poll(Key::Left, true, Duration::ZERO));
        assert!(!repeat.poll(Key::Left, true, Duration::from_millis(100)));
        assert!(!repeat.poll(Key::Left, false, Duration::from_millis(200)));
        assert!(!repeat.is_held(Key::Left));
        // A new press fires immediately.
        assert!(repeat.poll(Key::Left, true, Duration::from_millis(210)));
    }

    #[test]
    fn keys_are_tracked_independently() {
        let mut repeat = KeyRepeat::new(timing());
        assert!(repeat.poll(Key::Left, true, Duration::ZERO));
        assert!(repeat.poll(Key::Right, true, Duration::from_millis(50)));
        assert!(repeat.poll(Key::Left, true, Duration::from_millis(400)));
        assert!(!repeat.poll(Key::Right, true, Duration::from_millis(400)));
        assert!(repeat.poll(Key::Right, true, Duration::from_millis(450)));
    }

    #[test]
    fn reset_forgets_keys() {
        let mut repeat = KeyRepeat::new(timing());
        repeat.poll(Key::Left, true, Duration::ZERO);
        repeat.reset();
        assert!(!repeat.is_held(Key::Left));
    }
}
