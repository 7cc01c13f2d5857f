use reqwest::StatusCode;
use thiserror::Error;

/// Errors returned by the Emby client.
#[derive(Debug, Error)]
pub enum EmbyError {
    /// Transport failure or undecodable response body.
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("Emby responded with {status}: {body}")]
    Status { status: StatusCode, body: String },

    /// The configured server URL cannot be used as a base URL.
    #[error("invalid Emby server URL: {0}")]
    Url(#[from] url::ParseError),
}
