//! Expiring response cache.
//!
//! [`ResponseCache`] stores serialized JSON bodies under a [`CacheKey`] for a
//! fixed TTL. It is a memo table: no capacity limit, no LRU, and no
//! single-flight. Two concurrent misses on the same key both reach upstream
//! and the later write wins; since writes replace whole entries, readers see
//! one payload or the other, never a mix.

use std::sync::Arc;
use std::time::Duration;

use embox_backend::Backend;
use embox_core::{CacheKey, CacheValue, Clock, KeyPart, Raw, SystemClock};

use crate::handlers::ListParams;

/// Backend, clock and TTL for cached responses. Clones share storage.
#[derive(Clone)]
pub struct ResponseCache {
    backend: Arc<dyn Backend>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
}

impl std::fmt::Debug for ResponseCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseCache")
            .field("backend", &self.backend.name())
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl ResponseCache {
    /// Creates a cache on `backend` using the system clock.
    pub fn new(backend: impl Backend + 'static, ttl: Duration) -> Self {
        Self {
            backend: Arc::new(backend),
            clock: Arc::new(SystemClock),
            ttl,
        }
    }

    /// Replaces the time source used for expiration.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Returns the payload stored under `key` while it is fresh.
    ///
    /// An expired entry is reported as absent and removed unless a fresh
    /// write has replaced it meanwhile. Backend errors are logged and count
    /// as a miss.
    pub async fn get(&self, key: &CacheKey) -> Option<Raw> {
        let value = match self.backend.read(key).await {
            Ok(value) => value?,
            Err(error) => {
                tracing::warn!(%key, backend = self.backend.name(), %error, "cache read failed");
                return None;
            }
        };

        let now = self.clock.now();
        if value.is_expired(now) {
            tracing::trace!(%key, "cache entry expired");
            if let Err(error) = self.backend.remove_expired(key, now).await {
                tracing::warn!(%key, backend = self.backend.name(), %error, "cache eviction failed");
            }
            return None;
        }

        Some(value.into_inner())
    }

    /// Stores `payload` under `key` for one TTL, replacing any previous entry.
    pub async fn set(&self, key: &CacheKey, payload: Raw) {
        let value = CacheValue::with_ttl(payload, self.clock.now(), self.ttl);
        if let Err(error) = self.backend.write(key, value).await {
            tracing::warn!(%key, backend = self.backend.name(), %error, "cache write failed");
        }
    }
}

/// Key for one page of the item list.
///
/// An absent parent is a value-less `parentId` part, distinct from any id.
pub fn list_key(params: &ListParams) -> CacheKey {
    CacheKey::new(
        "emby.list",
        vec![
            KeyPart::new("page", Some(params.page.to_string())),
            KeyPart::new("pageSize", Some(params.page_size.to_string())),
            KeyPart::new("parentId", params.parent_id.as_deref()),
        ],
    )
}

/// The single key of the views endpoint.
pub fn views_key() -> CacheKey {
    CacheKey::new("emby.views", Vec::new())
}
