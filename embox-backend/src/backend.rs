use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use embox_core::{CacheKey, CacheValue, Raw};

use crate::{BackendError, DeleteStatus};

pub type BackendResult<T> = Result<T, BackendError>;

/// Key/value storage for serialized responses.
///
/// `write` always replaces the whole entry stored under `key`.
#[async_trait]
pub trait Backend: Sync + Send {
    async fn read(&self, key: &CacheKey) -> BackendResult<Option<CacheValue<Raw>>>;

    async fn write(&self, key: &CacheKey, value: CacheValue<Raw>) -> BackendResult<()>;

    /// Removes the entry under `key` only if it is expired at `now`.
    ///
    /// An entry written after the caller observed a stale value is fresh and
    /// survives.
    async fn remove_expired(
        &self,
        key: &CacheKey,
        now: DateTime<Utc>,
    ) -> BackendResult<DeleteStatus>;

    /// Returns the name of this backend for log fields.
    fn name(&self) -> &str {
        "backend"
    }
}

#[async_trait]
impl<B> Backend for Arc<B>
where
    B: Backend + ?Sized,
{
    async fn read(&self, key: &CacheKey) -> BackendResult<Option<CacheValue<Raw>>> {
        self.as_ref().read(key).await
    }

    async fn write(&self, key: &CacheKey, value: CacheValue<Raw>) -> BackendResult<()> {
        self.as_ref().write(key, value).await
    }

    async fn remove_expired(
        &self,
        key: &CacheKey,
        now: DateTime<Utc>,
    ) -> BackendResult<DeleteStatus> {
        self.as_ref().remove_expired(key, now).await
    }

    fn name(&self) -> &str {
        self.as_ref().name()
    }
}
