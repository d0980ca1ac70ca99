//! The blocking sleep primitive.

use std::time::Duration;

/// Suspends the caller. The session's only suspension point.
pub trait Clock {
    /// Block for `duration`.
    fn sleep(&mut self, duration: Duration);
}

impl<C: Clock + ?Sized> Clock for &mut C {
    fn sleep(&mut self, duration: Duration) {
        (**self).sleep(duration);
    }
}
