//! Traits and structs for embox cache storage.
//!
//! A backend only stores and returns [`CacheValue`]s; deciding whether a
//! value is still fresh is left to the caller, which owns the clock.
//!
//! [`CacheValue`]: embox_core::CacheValue
mod backend;
mod memory;

pub use backend::{Backend, BackendResult};
pub use memory::MemoryBackend;
use thiserror::Error;

/// Error groups a backend can report.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Internal backend error, state or computation error.
    #[error(transparent)]
    InternalError(Box<dyn std::error::Error + Send + Sync>),
    /// Network interaction error, for backends living out of process.
    #[error(transparent)]
    ConnectionError(Box<dyn std::error::Error + Send + Sync>),
}

/// Status of deleting result.
#[derive(Debug, PartialEq, Eq)]
pub enum DeleteStatus {
    /// Record successfully deleted.
    Deleted,
    /// Record already missing.
    Missing,
}
