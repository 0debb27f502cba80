//! Error types for the Place&Play API client.

use thiserror::Error;

/// Result type alias using the Place&Play client [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by Place&Play API calls.
#[derive(Debug, Error)]
pub enum Error {
    /// The API rejected the credentials or session tokens (HTTP 401)
    #[error("authentication rejected by the Place&Play API")]
    Auth,

    /// The API answered with a non-success status
    #[error("Place&Play API error: HTTP {status}: {body}")]
    Api { status: u16, body: String },

    /// A 200 response that does not carry the expected payload
    #[error("unexpected Place&Play API response: {0}")]
    UnexpectedResponse(String),

    /// Transport failure
    #[error("transport error: {0}")]
    Http(#[from] reqwest::Error),
}
