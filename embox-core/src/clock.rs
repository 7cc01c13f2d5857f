//! Time sources for cache expiration.

use chrono::{DateTime, Utc};

/// Source of the current time for expiration checks.
pub trait Clock: Send + Sync {
    /// Returns the current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock backed by [`Utc::now`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(any(test, feature = "test-helpers"))]
pub use manual::ManualClock;

#[cfg(any(test, feature = "test-helpers"))]
mod manual {
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use chrono::{DateTime, TimeDelta, Utc};

    use super::Clock;

    /// A clock that only moves when told to.
    ///
    /// Clones share the same instant, so a test can keep one handle and give
    /// another to the cache.
    #[derive(Debug, Clone)]
    pub struct ManualClock {
        now: Arc<Mutex<DateTime<Utc>>>,
    }

    impl ManualClock {
        /// Creates a clock frozen at `start`.
        pub fn new(start: DateTime<Utc>) -> Self {
            Self {
                now: Arc::new(Mutex::new(start)),
            }
        }

        /// Moves the clock forward by `duration`.
        pub fn advance(&self, duration: Duration) {
            let delta = TimeDelta::from_std(duration).expect("duration out of range");
            let mut now = self.now.lock().expect("clock mutex poisoned");
            *now += delta;
        }

        /// Sets the clock to `instant`.
        pub fn set(&self, instant: DateTime<Utc>) {
            *self.now.lock().expect("clock mutex poisoned") = instant;
        }
    }

    impl Default for ManualClock {
        fn default() -> Self {
            Self::new(Utc::now())
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            *self.now.lock().expect("clock mutex poisoned")
        }
    }
}
