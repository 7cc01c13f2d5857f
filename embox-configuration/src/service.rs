use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Startup settings. Every field has a default, so an empty document is valid
/// and a partial one only overrides what it names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
}

impl ServiceConfig {
    /// Parses `document`; a blank document yields the defaults.
    pub fn from_yaml(document: &str) -> Result<Self, ConfigError> {
        if document.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_saphyr::from_str(document)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let document = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&document)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to.
    #[serde(default = "default_listen")]
    pub listen: SocketAddr,
    /// Path under which `/list` and `/views` are mounted.
    #[serde(default = "default_prefix")]
    pub prefix: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            prefix: default_prefix(),
        }
    }
}

fn default_listen() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 3000))
}

fn default_prefix() -> String {
    "/api/emby".to_owned()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Time-to-live of cached responses (e.g. "30s", "5m").
    #[serde(default = "default_ttl", with = "humantime_serde")]
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { ttl: default_ttl() }
    }
}

fn default_ttl() -> Duration {
    Duration::from_secs(5 * 60)
}

/// How the proxy identifies itself to the media server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Whole-request timeout for upstream calls; none when omitted.
    #[serde(default, with = "humantime_serde")]
    pub timeout: Option<Duration>,
    #[serde(default = "default_client_name")]
    pub client_name: String,
    #[serde(default = "default_client_name")]
    pub device_name: String,
    #[serde(default = "default_client_name")]
    pub device_id: String,
    #[serde(default = "default_version")]
    pub version: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            timeout: None,
            client_name: default_client_name(),
            device_name: default_client_name(),
            device_id: default_client_name(),
            version: default_version(),
        }
    }
}

fn default_client_name() -> String {
    "embox".to_owned()
}

fn default_version() -> String {
    env!("CARGO_PKG_VERSION").to_owned()
}
