//! The error types returned by every [`crate::api::NekosClient`] operation.

use reqwest::Url;
use thiserror::Error;

/// A boxed error coming from a [`crate::transport::Transport`] implementation.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Any failure of a request/response cycle.
///
/// Errors are never retried and never logged by this crate,
/// they are handed back to the caller as is.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    /// `amount` or `query` is out of the bounds accepted by the API.
    /// Nothing has been sent to the network.
    #[error("invalid parameter: {0}")]
    InvalidParameter(#[from] validator::ValidationErrors),
    /// The transport failed to connect, or the server answered with a non-success status.
    #[error("transport error: {0}")]
    Transport(#[source] BoxError),
    /// The body is not JSON, or its shape does not match the requested operation.
    #[error(transparent)]
    Decode(#[from] DecodeError),
    /// A URL given by the caller could not be parsed.
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
    /// The base URL cannot have path segments appended to it, e.g. `data:` URLs.
    #[error("`{0}` cannot be used as an API base url")]
    InvalidBaseUrl(Url),
}

/// The response body does not decode into the expected shape.
#[derive(Error, Debug)]
#[error("failed to decode response at `{path}`: {source}")]
pub struct DecodeError {
    path: String,
    #[source]
    source: serde_json::Error,
}

impl DecodeError {
    pub(crate) fn new(path: impl Into<String>, source: serde_json::Error) -> Self {
        Self {
            path: path.into(),
            source,
        }
    }

    /// The JSON path at which decoding failed, e.g. `results[2].url`.
    pub fn path(&self) -> &str {
        &self.path
    }
}

/// Shorthand for results carrying this crate's [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
