//! Emby API client for the embox proxy.
//!
//! Only the calls the proxy needs are covered: login by name, item queries,
//! the user's library views and image URLs. The [`MediaServer`] trait is the
//! seam the handlers depend on; [`EmbyClient`] is its HTTP implementation.

mod client;
mod error;
pub mod model;
mod session;

pub use client::{ClientIdentity, EmbyClient};
pub use error::EmbyError;
pub use model::{
    AuthenticationResult, BaseItem, Collection, ImageType, ItemsQuery, ItemsResult, SortOrder,
    User,
};
pub use session::Session;

use async_trait::async_trait;

/// Operations the proxy performs against a media server.
#[async_trait]
pub trait MediaServer: Send + Sync {
    /// Logs in by user name and returns the user id and access token.
    async fn authenticate(
        &self,
        server_url: &str,
        username: &str,
        password: &str,
    ) -> Result<AuthenticationResult, EmbyError>;

    /// Queries library items.
    async fn items(&self, session: &Session, query: &ItemsQuery) -> Result<ItemsResult, EmbyError>;

    /// Lists the collections visible to the session's user.
    async fn user_views(&self, session: &Session) -> Result<Vec<Collection>, EmbyError>;

    /// Builds the URL of an item image. Does not touch the network.
    fn image_url(&self, session: &Session, item_id: &str, image_type: ImageType) -> String;
}

#[async_trait]
impl<M> MediaServer for std::sync::Arc<M>
where
    M: MediaServer + ?Sized,
{
    async fn authenticate(
        &self,
        server_url: &str,
        username: &str,
        password: &str,
    ) -> Result<AuthenticationResult, EmbyError> {
        self.as_ref().authenticate(server_url, username, password).await
    }

    async fn items(&self, session: &Session, query: &ItemsQuery) -> Result<ItemsResult, EmbyError> {
        self.as_ref().items(session, query).await
    }

    async fn user_views(&self, session: &Session) -> Result<Vec<Collection>, EmbyError> {
        self.as_ref().user_views(session).await
    }

    fn image_url(&self, session: &Session, item_id: &str, image_type: ImageType) -> String {
        self.as_ref().image_url(session, item_id, image_type)
    }
}
