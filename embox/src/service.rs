use std::future::Future;
use std::path::Path;
use std::sync::Arc;

use embox_backend::MemoryBackend;
use embox_configuration::{ConfigSource, EmbyConfig, FileConfigSource, ServiceConfig};
use embox_core::{CacheKey, Raw};
use embox_emby::{ClientIdentity, EmbyClient, EmbyError, MediaServer, Session};
use serde::Serialize;

use crate::{Error, ResponseCache};

/// Shared state behind both endpoints.
///
/// Cloning is cheap; clones share configuration source, upstream client and
/// cache.
#[derive(Clone)]
pub struct EmbyService {
    config: Arc<dyn ConfigSource>,
    upstream: Arc<dyn MediaServer>,
    cache: ResponseCache,
}

impl std::fmt::Debug for EmbyService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmbyService")
            .field("config", &"...")
            .field("upstream", &"...")
            .field("cache", &self.cache)
            .finish()
    }
}

impl EmbyService {
    pub fn new(
        config: impl ConfigSource + 'static,
        upstream: impl MediaServer + 'static,
        cache: ResponseCache,
    ) -> Self {
        Self {
            config: Arc::new(config),
            upstream: Arc::new(upstream),
            cache,
        }
    }

    /// Production wiring: the YAML file at `path` is re-read per request,
    /// responses are cached in memory.
    pub fn from_config(path: impl AsRef<Path>, config: &ServiceConfig) -> Result<Self, EmbyError> {
        let identity = ClientIdentity {
            client: config.upstream.client_name.clone(),
            device: config.upstream.device_name.clone(),
            device_id: config.upstream.device_id.clone(),
            version: config.upstream.version.clone(),
        };
        let upstream = EmbyClient::with_timeout(identity, config.upstream.timeout)?;
        let cache = ResponseCache::new(MemoryBackend::new(), config.cache.ttl);
        Ok(Self::new(
            FileConfigSource::new(path.as_ref()),
            upstream,
            cache,
        ))
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    pub(crate) fn upstream(&self) -> &dyn MediaServer {
        self.upstream.as_ref()
    }

    /// Loads the Emby block and rejects it unless enabled with a server URL.
    async fn emby_config(&self) -> Result<EmbyConfig, Error> {
        let settings = self.config.load().await?;
        settings
            .emby
            .filter(EmbyConfig::is_usable)
            .ok_or(Error::NotConfigured)
    }

    /// Loads the configuration and resolves credentials for this request.
    pub(crate) async fn session(&self) -> Result<Session, Error> {
        let config = self.emby_config().await?;
        resolve_session(&config, self.upstream()).await
    }

    /// Cache lookup, fetch on miss, cache write on success.
    ///
    /// `fetch` is only polled on a miss. Errors are turned into a body by
    /// `failure`, logged, and not cached.
    pub(crate) async fn respond<T, F>(
        &self,
        key: &CacheKey,
        context: &str,
        fetch: F,
        failure: impl FnOnce(String) -> T,
    ) -> Raw
    where
        T: Serialize,
        F: Future<Output = Result<T, Error>>,
    {
        if let Some(cached) = self.cache.get(key).await {
            tracing::debug!(%key, "cache hit");
            return cached;
        }
        tracing::debug!(%key, "cache miss");

        let result = match fetch.await {
            Ok(response) => encode(&response).map_err(Error::from),
            Err(error) => Err(error),
        };

        match result {
            Ok(payload) => {
                self.cache.set(key, payload.clone()).await;
                payload
            }
            Err(error) => {
                if error.is_setup() {
                    tracing::warn!(%key, %error, "{context}");
                } else {
                    tracing::error!(%key, %error, "{context}");
                }
                encode_failure(&failure(error.client_message(context)))
            }
        }
    }
}

/// Builds the session for `config`, logging in by name when neither an API
/// key nor a user id is configured.
///
/// The configuration is left untouched; the login result only lives in the
/// returned session.
pub(crate) async fn resolve_session(
    config: &EmbyConfig,
    upstream: &dyn MediaServer,
) -> Result<Session, Error> {
    let mut session = Session::new(config.server_url.trim());
    session.api_key = config.api_key().map(str::to_owned);
    session.user_id = config.user_id().map(str::to_owned);

    if !config.has_direct_credentials()
        && let Some((username, password)) = config.login()
    {
        let login = upstream
            .authenticate(&session.server_url, username, password)
            .await
            .map_err(Error::Authentication)?;
        tracing::debug!(user_id = %login.user.id, "logged in to Emby");
        session.user_id = Some(login.user.id).filter(|id| !id.is_empty());
        session.access_token = login.access_token;
    }

    if session.is_authorized() {
        Ok(session)
    } else {
        Err(Error::MissingCredentials)
    }
}

fn encode<T: Serialize>(response: &T) -> Result<Raw, serde_json::Error> {
    serde_json::to_vec(response).map(Raw::from)
}

fn encode_failure<T: Serialize>(response: &T) -> Raw {
    encode(response).unwrap_or_else(|error| {
        tracing::error!(%error, "failed to encode error response");
        Raw::from_static(br#"{"error":"internal error"}"#)
    })
}
