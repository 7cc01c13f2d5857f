use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;

use crate::{ConfigError, Settings};

/// Supplies the media server settings for a request.
#[async_trait]
pub trait ConfigSource: Send + Sync {
    async fn load(&self) -> Result<Settings, ConfigError>;
}

#[async_trait]
impl<S> ConfigSource for Arc<S>
where
    S: ConfigSource + ?Sized,
{
    async fn load(&self) -> Result<Settings, ConfigError> {
        self.as_ref().load().await
    }
}

/// Reads a YAML file on every call.
#[derive(Debug, Clone)]
pub struct FileConfigSource {
    path: PathBuf,
}

impl FileConfigSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ConfigSource for FileConfigSource {
    async fn load(&self) -> Result<Settings, ConfigError> {
        let document = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| ConfigError::Io {
                path: self.path.clone(),
                source,
            })?;
        let settings: Settings = if document.trim().is_empty() {
            Settings::default()
        } else {
            serde_saphyr::from_str(&document)?
        };
        tracing::trace!(path = %self.path.display(), "configuration loaded");
        Ok(settings)
    }
}

/// Serves a fixed snapshot.
#[derive(Debug, Clone, Default)]
pub struct StaticConfigSource {
    settings: Settings,
}

impl StaticConfigSource {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }
}

impl From<Settings> for StaticConfigSource {
    fn from(settings: Settings) -> Self {
        Self::new(settings)
    }
}

#[async_trait]
impl ConfigSource for StaticConfigSource {
    async fn load(&self) -> Result<Settings, ConfigError> {
        Ok(self.settings.clone())
    }
}
