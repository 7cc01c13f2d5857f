//! In-process backend built on [`DashMap`].

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use embox_core::{CacheKey, CacheValue, Raw};

use crate::{Backend, BackendResult, DeleteStatus};

/// Unbounded in-memory backend.
///
/// Entries are only dropped through [`Backend::remove_expired`], which the
/// response cache calls when it observes an expired value. There is no capacity limit and no
/// LRU; the key space is bounded by the distinct query parameter tuples.
///
/// Clones share the same map, so a test can keep a handle to inspect what a
/// handler stored.
///
/// ```
/// use embox_backend::MemoryBackend;
///
/// let backend = MemoryBackend::new();
/// let observer = backend.clone();
/// assert!(observer.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    entries: Arc<DashMap<CacheKey, CacheValue<Raw>>>,
}

impl MemoryBackend {
    /// Creates an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if an entry, fresh or not, exists for `key`.
    pub fn contains(&self, key: &CacheKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns a copy of the entry stored for `key`.
    pub fn peek(&self, key: &CacheKey) -> Option<CacheValue<Raw>> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }
}

#[async_trait]
impl Backend for MemoryBackend {
    async fn read(&self, key: &CacheKey) -> BackendResult<Option<CacheValue<Raw>>> {
        Ok(self.peek(key))
    }

    async fn write(&self, key: &CacheKey, value: CacheValue<Raw>) -> BackendResult<()> {
        self.entries.insert(key.clone(), value);
        Ok(())
    }

    async fn remove_expired(
        &self,
        key: &CacheKey,
        now: DateTime<Utc>,
    ) -> BackendResult<DeleteStatus> {
        match self.entries.remove_if(key, |_, value| value.is_expired(now)) {
            Some(_) => Ok(DeleteStatus::Deleted),
            None => Ok(DeleteStatus::Missing),
        }
    }

    fn name(&self) -> &str {
        "memory"
    }
}
