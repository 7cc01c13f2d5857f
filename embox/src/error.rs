use embox_configuration::ConfigError;
use embox_emby::EmbyError;
use thiserror::Error;

/// Why a request could not be answered with data.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Emby is not configured or not enabled")]
    NotConfigured,

    #[error("Emby authentication failed: {0}")]
    Authentication(#[source] EmbyError),

    #[error("Emby authentication failed, please check the configuration")]
    MissingCredentials,

    #[error(transparent)]
    Upstream(#[from] EmbyError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to encode response: {0}")]
    Encode(#[from] serde_json::Error),
}

impl Error {
    /// Text for the `error` field of a response.
    ///
    /// Unexpected failures are prefixed with `context`, e.g.
    /// "Failed to fetch Emby list".
    pub fn client_message(&self, context: &str) -> String {
        match self {
            Error::NotConfigured | Error::Authentication(_) | Error::MissingCredentials => {
                self.to_string()
            }
            Error::Upstream(_) | Error::Config(_) | Error::Encode(_) => {
                format!("{context}: {self}")
            }
        }
    }

    /// Configuration or credential problems, as opposed to runtime failures.
    pub fn is_setup(&self) -> bool {
        matches!(
            self,
            Error::NotConfigured | Error::Authentication(_) | Error::MissingCredentials
        )
    }
}
