//! Blocking client for the ChatWork messaging API.
//!
//! # Overview
//! Posts text messages to ChatWork rooms. Requests and responses are plain
//! data (`HttpRequest` / `HttpResponse`); a `Transport` executes them.
//!
//! ```no_run
//! use chatwork_core::ChatworkClient;
//!
//! let client = ChatworkClient::with_token("my-api-token");
//! let result = client.send_message("123456", "hello")?;
//! println!("posted message {:?}", result.message_id);
//! # Ok::<(), chatwork_core::ApiError>(())
//! ```
//!
//! # Design
//! - `ChatworkClient` holds no mutable state; the URL of each call is
//!   derived from an immutable base, so the client can be shared freely.
//! - `TokenTransport` adds `X-ChatWorkToken` to a copy of each request and
//!   delegates to another transport (`UreqTransport` by default).
//! - Non-2xx responses are errors; errors listed in a 2xx body are returned
//!   in `SendResult::errors` for the caller to inspect.

pub mod client;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use client::{ChatworkClient, API_VERSION, DEFAULT_BASE_URL};
pub use error::{ApiError, BoxError, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::{TokenTransport, Transport, UreqTransport, TOKEN_HEADER};
pub use types::{PostMessage, SendResult};
