//! ChatWork API client.
//!
//! # Design
//! `ChatworkClient` owns a transport and an immutable base URL. Posting a
//! message is split the same way as every operation here: `build_*` produces
//! an `HttpRequest`, the transport executes it, `parse_*` turns the
//! `HttpResponse` into a result. The target URL is derived fresh on every
//! call, so one client can be shared by any number of threads.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use tracing::debug;
use url::Url;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::transport::{TokenTransport, Transport};
use crate::types::{PostMessage, SendResult};

pub const DEFAULT_BASE_URL: &str = "https://api.chatwork.com/";
pub const API_VERSION: &str = "v1";

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
const USER_AGENT: &str = concat!("chatwork-rs/", env!("CARGO_PKG_VERSION"));

/// Everything but RFC 3986 unreserved characters. `.` is encoded too, so a
/// room id can never form a dot segment.
const ROOM_ID_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'~');

/// Client for the ChatWork messaging API.
#[derive(Debug, Clone)]
pub struct ChatworkClient<T> {
    base_url: Result<Url, url::ParseError>,
    transport: T,
}

impl ChatworkClient<TokenTransport> {
    /// Client authenticating with `token` over the default ureq transport.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self::new(TokenTransport::new(token))
    }
}

impl<T> ChatworkClient<T> {
    /// Client sending every request through `transport`. Authentication is
    /// the transport's job; wrap it in a `TokenTransport` for real use.
    pub fn new(transport: T) -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL),
            transport,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Build the request posting `body` to room `room_id`.
    ///
    /// `room_id` is not validated. It is percent-encoded as a single path
    /// segment, so `/`, `%` and dots stay part of the id.
    pub fn build_send_message(&self, room_id: &str, body: &str) -> Result<HttpRequest, ApiError> {
        let base = self.base_url.as_ref().map_err(|err| ApiError::InvalidUrl(*err))?;
        let room = utf8_percent_encode(room_id, ROOM_ID_ENCODE_SET);
        let url = format!("{}{API_VERSION}/rooms/{room}/messages", base.as_str());

        let form = serde_urlencoded::to_string(PostMessage { body })?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url,
            headers: vec![
                ("content-type".to_string(), FORM_CONTENT_TYPE.to_string()),
                ("content-length".to_string(), form.len().to_string()),
                ("user-agent".to_string(), USER_AGENT.to_string()),
            ],
            body: Some(form),
        })
    }

    /// Decode a send-message response.
    ///
    /// A 2xx body is decoded as is, including any `errors` it lists. Any
    /// other status is an `HttpError`.
    pub fn parse_send_message(&self, response: HttpResponse) -> Result<SendResult, ApiError> {
        check_status(&response)?;
        Ok(serde_json::from_str(&response.body)?)
    }
}

impl<T: Transport> ChatworkClient<T> {
    /// Post `body` to room `room_id`.
    pub fn send_message(&self, room_id: &str, body: &str) -> Result<SendResult, ApiError> {
        let request = self.build_send_message(room_id, body)?;
        let response = self.transport.round_trip(&request)?;
        debug!(room_id, status = response.status, "send message response");
        self.parse_send_message(response)
    }
}

/// Map non-2xx statuses to `ApiError::HttpError`, keeping the remote error
/// list when the body has one.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    let errors = serde_json::from_str::<SendResult>(&response.body)
        .map(|decoded| decoded.errors)
        .unwrap_or_default();
    Err(ApiError::HttpError {
        status: response.status,
        errors,
        body: response.body.clone(),
    })
}
