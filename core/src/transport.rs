//! Transports execute `HttpRequest`s.
//!
//! # Design
//! `Transport` is the I/O seam of the crate. `UreqTransport` performs real
//! blocking HTTP; `TokenTransport` decorates any other transport by adding the
//! `X-ChatWorkToken` header to a private copy of each request. Tests plug in
//! their own implementations to observe requests or fake responses.

use std::fmt;
use std::sync::Arc;

use tracing::trace;

use crate::error::TransportError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Header carrying the API token on every authenticated request.
pub const TOKEN_HEADER: &str = "X-ChatWorkToken";

/// Executes a single HTTP round-trip.
///
/// Implementations must not treat non-2xx statuses as errors: a response
/// that arrived is returned as data, whatever its status.
pub trait Transport: Send + Sync {
    fn round_trip(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn round_trip(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).round_trip(request)
    }
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn round_trip(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).round_trip(request)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn round_trip(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).round_trip(request)
    }
}

/// Blocking transport backed by a `ureq::Agent`.
///
/// `Default` builds an agent with ureq's defaults except that HTTP statuses
/// are never turned into errors. Pass a custom agent to `new` to configure
/// timeouts, proxies or TLS.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl fmt::Debug for UreqTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UreqTransport").finish_non_exhaustive()
    }
}

impl UreqTransport {
    pub fn new(agent: ureq::Agent) -> Self {
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Transport for UreqTransport {
    fn round_trip(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let result = match (request.method, request.body.as_deref()) {
            (HttpMethod::Get, _) => apply_headers(self.agent.get(&request.url), request).call(),
            (HttpMethod::Post, Some(body)) => {
                apply_headers(self.agent.post(&request.url), request).send(body.as_bytes())
            }
            (HttpMethod::Post, None) => apply_headers(self.agent.post(&request.url), request).send_empty(),
        };
        let mut response = result.map_err(TransportError::new)?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(TransportError::new)?;

        Ok(HttpResponse { status, headers, body })
    }
}

/// Copy request headers onto a ureq builder. `Content-Length` is skipped
/// because ureq derives it from the body it sends.
fn apply_headers<B>(mut builder: ureq::RequestBuilder<B>, request: &HttpRequest) -> ureq::RequestBuilder<B> {
    for (name, value) in &request.headers {
        if name.eq_ignore_ascii_case("content-length") {
            continue;
        }
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

/// Transport decorator that authenticates every request with a fixed token.
///
/// The caller's request is never modified: each call works on a clone whose
/// header list is its own, then hands the clone to the inner transport. The
/// inner transport's response or error is returned as is.
#[derive(Clone)]
pub struct TokenTransport<T = UreqTransport> {
    token: String,
    inner: T,
}

impl TokenTransport<UreqTransport> {
    /// Authenticate over a default `UreqTransport`.
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_transport(token, UreqTransport::default())
    }
}

impl<T> TokenTransport<T> {
    pub fn with_transport(token: impl Into<String>, inner: T) -> Self {
        Self {
            token: token.into(),
            inner,
        }
    }

    pub fn inner(&self) -> &T {
        &self.inner
    }
}

impl<T: fmt::Debug> fmt::Debug for TokenTransport<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenTransport")
            .field("token", &"<redacted>")
            .field("inner", &self.inner)
            .finish()
    }
}

impl<T: Transport> Transport for TokenTransport<T> {
    fn round_trip(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut authenticated = request.clone();
        authenticated.set_header(TOKEN_HEADER, &self.token);
        trace!(method = authenticated.method.as_str(), url = %authenticated.url, "sending authenticated request");
        self.inner.round_trip(&authenticated)
    }
}
