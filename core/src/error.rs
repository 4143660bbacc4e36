//! Error types for the ChatWork client.
//!
//! # Design
//! Transport failures are carried verbatim: `TransportError` boxes whatever
//! the underlying transport produced and hands it back through `get_ref` /
//! `into_inner`, so callers can downcast to the concrete error. Non-2xx
//! responses become `HttpError` carrying the remote error list, while a
//! 2xx body that lists errors is still a successful decode.

use thiserror::Error;

/// Boxed error produced by a transport implementation.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A failure to execute an HTTP round-trip (DNS, connect, TLS, timeout, I/O).
#[derive(Debug, Error)]
#[error("transport error: {source}")]
pub struct TransportError {
    source: BoxError,
}

impl TransportError {
    pub fn new(source: impl Into<BoxError>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// The error reported by the underlying transport.
    pub fn get_ref(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        self.source.as_ref()
    }

    pub fn into_inner(self) -> BoxError {
        self.source
    }
}

/// Errors returned by `ChatworkClient`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The server answered with a non-2xx status. `errors` holds the remote
    /// error list when the body was a JSON error object.
    #[error("HTTP {status}: {body}")]
    HttpError {
        status: u16,
        errors: Vec<String>,
        body: String,
    },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(#[from] serde_json::Error),

    /// The form payload could not be encoded.
    #[error("serialization failed: {0}")]
    SerializationError(#[from] serde_urlencoded::ser::Error),

    #[error("invalid request url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}
