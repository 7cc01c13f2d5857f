//! Configuration for the embox media proxy.
//!
//! Two kinds of configuration live in the same YAML document:
//!
//! - [`ServiceConfig`] - listener, route prefix, cache TTL and upstream client
//!   settings. Read once at startup.
//! - [`Settings`] - the `EmbyConfig` block describing the media server. Read
//!   through a [`ConfigSource`] on every request, so credential changes apply
//!   without a restart.
//!
//! ```yaml
//! server:
//!   listen: 0.0.0.0:3000
//!   prefix: /api/emby
//! cache:
//!   ttl: 5m
//! EmbyConfig:
//!   Enabled: true
//!   ServerURL: http://emby.local:8096
//!   Username: viewer
//!   Password: secret
//! ```

mod emby;
mod error;
mod service;
mod source;

pub use emby::{EmbyConfig, Settings};
pub use error::ConfigError;
pub use service::{CacheConfig, ServerConfig, ServiceConfig, UpstreamConfig};
pub use source::{ConfigSource, FileConfigSource, StaticConfigSource};
