/// Resolved credentials for talking to one Emby server.
///
/// Built per request from the configuration, and from the login result when
/// the configuration only carries a username and password.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub server_url: String,
    pub api_key: Option<String>,
    pub user_id: Option<String>,
    pub access_token: Option<String>,
}

impl Session {
    pub fn new(server_url: impl Into<String>) -> Self {
        Self {
            server_url: server_url.into(),
            ..Default::default()
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Value for the `X-Emby-Token` header: the login token wins over the API key.
    pub fn token(&self) -> Option<&str> {
        self.access_token.as_deref().or(self.api_key.as_deref())
    }

    /// Enough to issue authorized queries.
    pub fn is_authorized(&self) -> bool {
        self.api_key.is_some() || self.user_id.is_some()
    }
}
