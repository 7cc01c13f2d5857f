#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use embox::{EmbyService, ResponseCache};
use chrono::{DateTime, Utc};
use embox_backend::{Backend, BackendError, BackendResult, DeleteStatus, MemoryBackend};
use embox_configuration::{EmbyConfig, Settings, StaticConfigSource};
use embox_core::{CacheKey, CacheValue, ManualClock, Raw};
use embox_emby::{
    AuthenticationResult, BaseItem, Collection, EmbyError, ImageType, ItemsQuery, ItemsResult,
    MediaServer, Session, User,
};
use http::StatusCode;
use tokio::sync::Barrier;

pub const TTL: Duration = Duration::from_secs(60);
pub const SERVER_URL: &str = "http://emby.test:8096";

#[derive(Default)]
struct MockState {
    authenticate_calls: AtomicUsize,
    items_calls: AtomicUsize,
    views_calls: AtomicUsize,
    login: Mutex<Option<Result<AuthenticationResult, String>>>,
    items: Mutex<Vec<BaseItem>>,
    total: Mutex<u64>,
    items_error: Mutex<Option<String>>,
    views: Mutex<Vec<Collection>>,
    views_error: Mutex<Option<String>>,
    vary_by_call: AtomicBool,
    barrier: Mutex<Option<Arc<Barrier>>>,
    last_session: Mutex<Option<Session>>,
    last_query: Mutex<Option<ItemsQuery>>,
}

/// In-process media server that records every call.
#[derive(Clone, Default)]
pub struct MockMediaServer {
    state: Arc<MockState>,
}

fn upstream_error(message: &str) -> EmbyError {
    EmbyError::Status {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        body: message.to_owned(),
    }
}

impl MockMediaServer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn login_as(self, user_id: &str, token: &str) -> Self {
        *self.state.login.lock().unwrap() = Some(Ok(AuthenticationResult {
            user: User {
                id: user_id.to_owned(),
                name: Some("viewer".to_owned()),
            },
            access_token: Some(token.to_owned()),
        }));
        self
    }

    pub fn reject_login(self, message: &str) -> Self {
        *self.state.login.lock().unwrap() = Some(Err(message.to_owned()));
        self
    }

    pub fn with_items(self, items: Vec<BaseItem>, total: u64) -> Self {
        *self.state.items.lock().unwrap() = items;
        *self.state.total.lock().unwrap() = total;
        self
    }

    pub fn failing_items(self, message: &str) -> Self {
        *self.state.items_error.lock().unwrap() = Some(message.to_owned());
        self
    }

    pub fn with_views(self, views: Vec<Collection>) -> Self {
        *self.state.views.lock().unwrap() = views;
        self
    }

    pub fn failing_views(self, message: &str) -> Self {
        *self.state.views_error.lock().unwrap() = Some(message.to_owned());
        self
    }

    /// Suffix the first item's name with the call number.
    pub fn vary_by_call(self) -> Self {
        self.state.vary_by_call.store(true, Ordering::SeqCst);
        self
    }

    /// Make every item fetch wait on `barrier` before answering.
    pub fn with_barrier(self, barrier: Arc<Barrier>) -> Self {
        *self.state.barrier.lock().unwrap() = Some(barrier);
        self
    }

    pub fn clear_items_error(&self) {
        *self.state.items_error.lock().unwrap() = None;
    }

    pub fn authenticate_calls(&self) -> usize {
        self.state.authenticate_calls.load(Ordering::SeqCst)
    }

    pub fn items_calls(&self) -> usize {
        self.state.items_calls.load(Ordering::SeqCst)
    }

    pub fn views_calls(&self) -> usize {
        self.state.views_calls.load(Ordering::SeqCst)
    }

    pub fn upstream_calls(&self) -> usize {
        self.authenticate_calls() + self.items_calls() + self.views_calls()
    }

    pub fn last_session(&self) -> Option<Session> {
        self.state.last_session.lock().unwrap().clone()
    }

    pub fn last_query(&self) -> Option<ItemsQuery> {
        self.state.last_query.lock().unwrap().clone()
    }
}

#[async_trait]
impl MediaServer for MockMediaServer {
    async fn authenticate(
        &self,
        _server_url: &str,
        _username: &str,
        _password: &str,
    ) -> Result<AuthenticationResult, EmbyError> {
        self.state.authenticate_calls.fetch_add(1, Ordering::SeqCst);
        match self.state.login.lock().unwrap().clone() {
            Some(Ok(result)) => Ok(result),
            Some(Err(message)) => Err(EmbyError::Status {
                status: StatusCode::UNAUTHORIZED,
                body: message,
            }),
            None => Err(upstream_error("login not configured")),
        }
    }

    async fn items(&self, session: &Session, query: &ItemsQuery) -> Result<ItemsResult, EmbyError> {
        let call = self.state.items_calls.fetch_add(1, Ordering::SeqCst) + 1;
        *self.state.last_session.lock().unwrap() = Some(session.clone());
        *self.state.last_query.lock().unwrap() = Some(query.clone());

        let barrier = self.state.barrier.lock().unwrap().clone();
        if let Some(barrier) = barrier {
            barrier.wait().await;
        }

        if let Some(message) = self.state.items_error.lock().unwrap().clone() {
            return Err(upstream_error(&message));
        }

        let mut items = self.state.items.lock().unwrap().clone();
        if self.state.vary_by_call.load(Ordering::SeqCst)
            && let Some(first) = items.first_mut()
        {
            first.name = format!("{} #{call}", first.name);
        }
        Ok(ItemsResult {
            items,
            total_record_count: *self.state.total.lock().unwrap(),
        })
    }

    async fn user_views(&self, session: &Session) -> Result<Vec<Collection>, EmbyError> {
        self.state.views_calls.fetch_add(1, Ordering::SeqCst);
        *self.state.last_session.lock().unwrap() = Some(session.clone());

        if let Some(message) = self.state.views_error.lock().unwrap().clone() {
            return Err(upstream_error(&message));
        }
        Ok(self.state.views.lock().unwrap().clone())
    }

    fn image_url(&self, session: &Session, item_id: &str, image_type: ImageType) -> String {
        format!("{}/Items/{item_id}/Images/{image_type}", session.server_url)
    }
}

pub fn movie(id: &str, name: &str, year: Option<i32>, rating: Option<f64>) -> BaseItem {
    BaseItem {
        id: id.to_owned(),
        name: name.to_owned(),
        item_type: "Movie".to_owned(),
        production_year: year,
        community_rating: rating,
        overview: None,
    }
}

pub fn series(id: &str, name: &str) -> BaseItem {
    BaseItem {
        id: id.to_owned(),
        name: name.to_owned(),
        item_type: "Series".to_owned(),
        production_year: None,
        community_rating: None,
        overview: Some("overview".to_owned()),
    }
}

pub fn collection(id: &str, name: &str, kind: Option<&str>) -> Collection {
    Collection {
        id: id.to_owned(),
        name: name.to_owned(),
        collection_type: kind.map(str::to_owned),
    }
}

pub fn api_key_config() -> EmbyConfig {
    EmbyConfig {
        enabled: true,
        server_url: SERVER_URL.to_owned(),
        api_key: Some("api-key".to_owned()),
        ..Default::default()
    }
}

pub fn login_config() -> EmbyConfig {
    EmbyConfig {
        enabled: true,
        server_url: SERVER_URL.to_owned(),
        username: Some("viewer".to_owned()),
        password: Some("secret".to_owned()),
        ..Default::default()
    }
}

/// A service wired to a mock upstream, an observable backend and a manual clock.
pub struct Harness {
    pub service: EmbyService,
    pub upstream: MockMediaServer,
    pub backend: MemoryBackend,
    pub clock: ManualClock,
}

pub fn harness(emby: Option<EmbyConfig>, upstream: MockMediaServer) -> Harness {
    let backend = MemoryBackend::new();
    let clock = ManualClock::default();
    let service = service_on(emby, upstream.clone(), backend.clone(), clock.clone());
    Harness {
        service,
        upstream,
        backend,
        clock,
    }
}

/// A service whose cache stores into `backend`.
pub fn service_on(
    emby: Option<EmbyConfig>,
    upstream: MockMediaServer,
    backend: impl Backend + 'static,
    clock: ManualClock,
) -> EmbyService {
    let cache = ResponseCache::new(backend, TTL).with_clock(clock);
    let config = StaticConfigSource::new(Settings { emby });
    EmbyService::new(config, upstream, cache)
}

/// Backend that fails every operation.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingBackend;

fn unavailable() -> std::io::Error {
    std::io::Error::other("storage unavailable")
}

#[async_trait]
impl Backend for FailingBackend {
    async fn read(&self, _key: &CacheKey) -> BackendResult<Option<CacheValue<Raw>>> {
        Err(BackendError::ConnectionError(Box::new(unavailable())))
    }

    async fn write(&self, _key: &CacheKey, _value: CacheValue<Raw>) -> BackendResult<()> {
        Err(BackendError::InternalError(Box::new(unavailable())))
    }

    async fn remove_expired(
        &self,
        _key: &CacheKey,
        _now: DateTime<Utc>,
    ) -> BackendResult<DeleteStatus> {
        Err(BackendError::InternalError(Box::new(unavailable())))
    }

    fn name(&self) -> &str {
        "failing"
    }
}
