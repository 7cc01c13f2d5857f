use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::HeaderValue;
use serde::de::DeserializeOwned;
use url::Url;

use crate::model::CollectionList;
use crate::{
    AuthenticationResult, Collection, EmbyError, ImageType, ItemsQuery, ItemsResult, MediaServer,
    Session,
};

const AUTHORIZATION_HEADER: &str = "X-Emby-Authorization";
const TOKEN_HEADER: &str = "X-Emby-Token";

/// How the client introduces itself in the `X-Emby-Authorization` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientIdentity {
    pub client: String,
    pub device: String,
    pub device_id: String,
    pub version: String,
}

impl Default for ClientIdentity {
    fn default() -> Self {
        Self {
            client: "embox".to_owned(),
            device: "embox".to_owned(),
            device_id: "embox".to_owned(),
            version: env!("CARGO_PKG_VERSION").to_owned(),
        }
    }
}

impl ClientIdentity {
    fn authorization(&self, session: Option<&Session>) -> String {
        let mut value = format!(
            r#"MediaBrowser Client="{}", Device="{}", DeviceId="{}", Version="{}""#,
            self.client, self.device, self.device_id, self.version
        );
        if let Some(user_id) = session.and_then(|s| s.user_id.as_deref()) {
            value.push_str(&format!(r#", UserId="{user_id}""#));
        }
        if let Some(token) = session.and_then(Session::token) {
            value.push_str(&format!(r#", Token="{token}""#));
        }
        value
    }
}

/// HTTP implementation of [`MediaServer`].
///
/// One instance is shared by all requests; the server URL and credentials
/// travel with each call in a [`Session`].
#[derive(Debug, Clone)]
pub struct EmbyClient {
    http: reqwest::Client,
    identity: ClientIdentity,
}

impl EmbyClient {
    pub fn new(identity: ClientIdentity) -> Self {
        Self::from_client(reqwest::Client::new(), identity)
    }

    /// Builds a client whose requests fail after `timeout`.
    pub fn with_timeout(
        identity: ClientIdentity,
        timeout: Option<Duration>,
    ) -> Result<Self, EmbyError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self::from_client(builder.build()?, identity))
    }

    pub fn from_client(http: reqwest::Client, identity: ClientIdentity) -> Self {
        Self { http, identity }
    }

    fn authorized(&self, request: reqwest::RequestBuilder, session: &Session) -> reqwest::RequestBuilder {
        let request = request.header(AUTHORIZATION_HEADER, self.identity.authorization(Some(session)));
        match session.token().and_then(|t| HeaderValue::from_str(t).ok()) {
            Some(token) => request.header(TOKEN_HEADER, token),
            None => request,
        }
    }

    async fn send<T: DeserializeOwned>(request: reqwest::RequestBuilder) -> Result<T, EmbyError> {
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EmbyError::Status { status, body });
        }
        Ok(response.json::<T>().await?)
    }
}

/// Appends `segments` to the path of `server_url`, keeping any sub-path the
/// server is mounted under.
fn endpoint(server_url: &str, segments: &[&str]) -> Result<Url, EmbyError> {
    let mut url = Url::parse(server_url.trim())?;
    url.path_segments_mut()
        .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

#[async_trait]
impl MediaServer for EmbyClient {
    #[tracing::instrument(name = "emby.authenticate", skip(self, password), err)]
    async fn authenticate(
        &self,
        server_url: &str,
        username: &str,
        password: &str,
    ) -> Result<AuthenticationResult, EmbyError> {
        let url = endpoint(server_url, &["Users", "AuthenticateByName"])?;
        let request = self
            .http
            .post(url)
            .header(AUTHORIZATION_HEADER, self.identity.authorization(None))
            .json(&serde_json::json!({ "Username": username, "Pw": password }));
        Self::send(request).await
    }

    #[tracing::instrument(
        name = "emby.items",
        skip(self, session, query),
        fields(user_id = ?session.user_id, start = ?query.start_index, limit = ?query.limit),
        err
    )]
    async fn items(&self, session: &Session, query: &ItemsQuery) -> Result<ItemsResult, EmbyError> {
        let mut url = match session.user_id.as_deref() {
            Some(user_id) => endpoint(&session.server_url, &["Users", user_id, "Items"])?,
            None => endpoint(&session.server_url, &["Items"])?,
        };
        let pairs = query.to_pairs();
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
        Self::send(self.authorized(self.http.get(url), session)).await
    }

    #[tracing::instrument(name = "emby.views", skip(self, session), fields(user_id = ?session.user_id), err)]
    async fn user_views(&self, session: &Session) -> Result<Vec<Collection>, EmbyError> {
        let url = match session.user_id.as_deref() {
            Some(user_id) => endpoint(&session.server_url, &["Users", user_id, "Views"])?,
            None => endpoint(&session.server_url, &["Library", "MediaFolders"])?,
        };
        let list: CollectionList = Self::send(self.authorized(self.http.get(url), session)).await?;
        Ok(list.items)
    }

    fn image_url(&self, session: &Session, item_id: &str, image_type: ImageType) -> String {
        let image_type = image_type.to_string();
        match endpoint(&session.server_url, &["Items", item_id, "Images", &image_type]) {
            Ok(mut url) => {
                if let Some(api_key) = session.api_key.as_deref() {
                    url.query_pairs_mut().append_pair("api_key", api_key);
                }
                url.into()
            }
            Err(_) => format!(
                "{}/Items/{item_id}/Images/{image_type}",
                session.server_url.trim_end_matches('/')
            ),
        }
    }
}
