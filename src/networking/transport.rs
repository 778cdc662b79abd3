//! The "send bytes, get bytes and a status" boundary.
//!
//! [`Transport`] is the only place the stack touches the network. Hosts can
//! supply their own executor; [`ReqwestTransport`] is the default.

use std::error::Error as _;
use std::io;
use std::iter;

use async_trait::async_trait;
use http::{HeaderMap, StatusCode};
use thiserror::Error;

use super::request::PreparedRequest;

/// Failures reported by a transport before a usable response exists.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    /// The host could not be reached at all.
    #[error("not connected to the internet")]
    NotConnectedToInternet,

    /// The request exceeded its timeout.
    #[error("request timed out")]
    TimedOut,

    /// The server replied with something that is not a usable HTTP response.
    #[error("bad server response")]
    BadServerResponse,

    /// Any other transport failure.
    #[error("{message}")]
    Other {
        /// Error detail from the transport.
        message: String,
    },
}

/// Raw response returned by a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Response body bytes.
    pub body: Vec<u8>,
}

impl TransportResponse {
    /// Creates a response with no headers.
    #[must_use]
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }
}

/// Executes prepared requests against the network.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends the request and returns the raw response.
    async fn send(&self, request: &PreparedRequest) -> Result<TransportResponse, TransportError>;
}

/// `reqwest`-backed transport.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Creates a transport with a default `reqwest` client.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Other`] when the TLS backend cannot be
    /// initialised.
    pub fn new() -> Result<Self, TransportError> {
        reqwest::Client::builder()
            .build()
            .map(Self::from_client)
            .map_err(|error| TransportError::Other {
                message: format!("failed to configure HTTP client: {error}"),
            })
    }

    /// Wraps an existing `reqwest` client.
    #[must_use]
    pub const fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: &PreparedRequest) -> Result<TransportResponse, TransportError> {
        let mut builder = self
            .client
            .request(request.method.into(), request.url.clone())
            .headers(request.headers.clone())
            .timeout(request.timeout);
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder.send().await.map_err(|error| map_reqwest_error(&error))?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(|error| map_reqwest_error(&error))?;

        Ok(TransportResponse {
            status,
            headers,
            body: body.to_vec(),
        })
    }
}

/// Maps a `reqwest` failure onto the transport taxonomy.
///
/// Only connect failures whose I/O cause reports an unusable network count
/// as offline. A refused connection or a failed DNS lookup means the network
/// works but the host does not, so those stay [`TransportError::Other`].
fn map_reqwest_error(error: &reqwest::Error) -> TransportError {
    if error.is_timeout() {
        TransportError::TimedOut
    } else if error.is_connect() && io_error_kind(error).is_some_and(is_offline) {
        TransportError::NotConnectedToInternet
    } else if error.is_body() || error.is_decode() {
        TransportError::BadServerResponse
    } else {
        TransportError::Other {
            message: error.to_string(),
        }
    }
}

fn io_error_kind(error: &reqwest::Error) -> Option<io::ErrorKind> {
    iter::successors(error.source(), |&cause| cause.source())
        .find_map(|cause| cause.downcast_ref::<io::Error>())
        .map(io::Error::kind)
}

const fn is_offline(kind: io::ErrorKind) -> bool {
    matches!(
        kind,
        io::ErrorKind::NetworkDown
            | io::ErrorKind::NetworkUnreachable
            | io::ErrorKind::HostUnreachable
            | io::ErrorKind::AddrNotAvailable
    )
}
