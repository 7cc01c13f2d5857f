use serde::{Deserialize, Serialize};

/// Per-request view of the configuration document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Media server integration, absent when the block is missing.
    #[serde(
        rename = "EmbyConfig",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub emby: Option<EmbyConfig>,
}

/// Connection and credential settings for the Emby server.
///
/// Empty strings count as "not set" for every optional field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EmbyConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(rename = "ServerURL", default)]
    pub server_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl EmbyConfig {
    /// Enabled and pointing at a server.
    pub fn is_usable(&self) -> bool {
        self.enabled && !self.server_url.trim().is_empty()
    }

    pub fn api_key(&self) -> Option<&str> {
        non_empty(&self.api_key)
    }

    pub fn user_id(&self) -> Option<&str> {
        non_empty(&self.user_id)
    }

    /// Username and password, only when both are set.
    pub fn login(&self) -> Option<(&str, &str)> {
        Some((non_empty(&self.username)?, non_empty(&self.password)?))
    }

    /// API key or user id configured, no login round-trip needed.
    pub fn has_direct_credentials(&self) -> bool {
        self.api_key().is_some() || self.user_id().is_some()
    }
}
