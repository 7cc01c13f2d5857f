//! # embox
//!
//! A caching proxy in front of an Emby media server. Two endpoints expose a
//! simplified view of the library:
//!
//! - `GET {prefix}/list` - movies and series, paginated, sorted by name
//! - `GET {prefix}/views` - the movie and TV show libraries
//!
//! Each request goes through the same steps: cache lookup, configuration
//! check, lazy login, upstream fetch, response shaping, cache write. Successful
//! responses are cached for a fixed TTL; failures are never cached.
//!
//! Both endpoints always answer `200 OK`. A failure is reported in the `error`
//! field of the body, next to empty data.

pub mod cache;
mod error;
pub mod handlers;
pub mod response;
pub mod router;
mod service;

pub use cache::ResponseCache;
pub use error::Error;
pub use handlers::ListParams;
pub use router::router;
pub use service::EmbyService;
