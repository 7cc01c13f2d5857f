#![warn(missing_docs)]
//! # embox-core
//!
//! Core types shared by the embox response cache:
//!
//! - [`CacheKey`] and [`KeyPart`] - deterministic keys built from request parameters
//! - [`CacheValue`] - a cached payload with its expiration timestamp
//! - [`Clock`] - the time source used to decide whether an entry is still fresh
//!
//! Storage lives in `embox-backend`; the policy that ties keys, values and
//! clocks together lives in the `embox` crate.

pub mod clock;
pub mod key;
pub mod value;

#[cfg(any(test, feature = "test-helpers"))]
pub use clock::ManualClock;
pub use clock::{Clock, SystemClock};
pub use key::{CacheKey, KeyPart};
#[doc(hidden)]
pub use smol_str::SmolStr;
pub use value::CacheValue;

/// Raw byte data type used for cached response payloads.
/// Using `Bytes` provides efficient zero-copy cloning via reference counting.
pub type Raw = bytes::Bytes;
