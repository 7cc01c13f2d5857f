//! Cached value with expiration metadata.

use chrono::{DateTime, Utc};
use std::time::Duration;

/// A cached value together with the instant it stops being served.
///
/// An entry is fresh while `now <= expire` and expired strictly after that.
///
/// ```
/// use chrono::{TimeDelta, Utc};
/// use embox_core::CacheValue;
///
/// let now = Utc::now();
/// let value = CacheValue::new("payload", now + TimeDelta::seconds(30));
///
/// assert!(!value.is_expired(now));
/// assert!(!value.is_expired(now + TimeDelta::seconds(30)));
/// assert!(value.is_expired(now + TimeDelta::seconds(31)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheValue<T> {
    data: T,
    expire: DateTime<Utc>,
}

impl<T> CacheValue<T> {
    /// Creates a new cache value expiring at `expire`.
    pub fn new(data: T, expire: DateTime<Utc>) -> Self {
        CacheValue { data, expire }
    }

    /// Creates a cache value that lives for `ttl` starting at `now`.
    ///
    /// A `ttl` too large to represent saturates to the maximum timestamp.
    pub fn with_ttl(data: T, now: DateTime<Utc>, ttl: Duration) -> Self {
        let expire = chrono::TimeDelta::from_std(ttl)
            .ok()
            .and_then(|delta| now.checked_add_signed(delta))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        CacheValue { data, expire }
    }

    /// Returns a reference to the cached data.
    #[inline]
    pub fn data(&self) -> &T {
        &self.data
    }

    /// Returns when the data expires.
    #[inline]
    pub fn expire(&self) -> DateTime<Utc> {
        self.expire
    }

    /// Returns `true` once `now` is past the expiration timestamp.
    #[inline]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expire
    }

    /// Remaining lifetime relative to `now`, or `None` if already expired.
    pub fn ttl(&self, now: DateTime<Utc>) -> Option<Duration> {
        (self.expire - now).to_std().ok()
    }

    /// Consumes the cache value and returns the inner data.
    pub fn into_inner(self) -> T {
        self.data
    }
}
