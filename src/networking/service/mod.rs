//! Request execution, response validation and decoding.
//!
//! [`NetworkService`] is the single place where failures are classified into
//! [`NetworkingError`]. Each call makes one logical attempt; the only retry is
//! the credential retry performed inside [`AuthenticatedClient`].

use http::header::CONTENT_TYPE;
use serde::Deserialize;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::codec::decode_json;
use super::endpoint::Endpoint;
use super::error::NetworkingError;
use super::request::{PreparedRequest, RequestBuilder};
use super::transport::{TransportError, TransportResponse};
use crate::auth::AuthenticatedClient;

const CLIENT_ERROR_MESSAGE: &str = "Client error";
const SERVER_ERROR_MESSAGE: &str = "Server error";

/// Error body returned by the API for 4xx and 5xx responses.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// Builds, sends, validates and decodes API calls.
#[derive(Debug, Clone)]
pub struct NetworkService {
    requests: RequestBuilder,
    client: AuthenticatedClient,
}

impl NetworkService {
    /// Creates a service.
    #[must_use]
    pub const fn new(requests: RequestBuilder, client: AuthenticatedClient) -> Self {
        Self { requests, client }
    }

    /// Executes `endpoint` and decodes the response body.
    ///
    /// # Errors
    ///
    /// Returns the [`NetworkingError`] classifying the first failure: request
    /// building, transport, status, content type, empty body or decoding.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        endpoint: &Endpoint,
    ) -> Result<T, NetworkingError> {
        let request = self.requests.build(endpoint)?;
        self.dispatch(&request).await
    }

    /// Executes `endpoint` with an encoded body and decodes the response.
    ///
    /// # Errors
    ///
    /// As [`NetworkService::execute`], plus the body encoding failures of
    /// [`RequestBuilder::build_with_body`].
    pub async fn execute_with_body<T, B>(
        &self,
        endpoint: &Endpoint,
        body: &B,
    ) -> Result<T, NetworkingError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized + Sync,
    {
        let request = self.requests.build_with_body(endpoint, body)?;
        self.dispatch(&request).await
    }

    async fn dispatch<T: DeserializeOwned>(
        &self,
        request: &PreparedRequest,
    ) -> Result<T, NetworkingError> {
        let response = self.client.send(request).await?;
        decode_response(&response).inspect_err(|error| {
            tracing::debug!("{} {} failed: {error}", request.method, request.url.path());
        })
    }
}

/// Validates a raw response and decodes its JSON body.
///
/// # Errors
///
/// - [`NetworkingError::InvalidContentType`] for a 2xx response declaring a
///   non-JSON `Content-Type`; a missing header is tolerated.
/// - [`NetworkingError::Server`] for 4xx and 5xx responses, with the
///   `message` from the error body when one can be parsed.
/// - [`NetworkingError::Transport`] wrapping
///   [`TransportError::BadServerResponse`] for any other status.
/// - [`NetworkingError::EmptyResponse`] for a 2xx response without a body.
/// - [`NetworkingError::DecodingFailed`] when the body does not decode.
pub(crate) fn decode_response<T: DeserializeOwned>(
    response: &TransportResponse,
) -> Result<T, NetworkingError> {
    let status = response.status;

    if status.is_client_error() || status.is_server_error() {
        let fallback = if status.is_client_error() {
            CLIENT_ERROR_MESSAGE
        } else {
            SERVER_ERROR_MESSAGE
        };
        return Err(NetworkingError::Server {
            code: status.as_u16(),
            message: Some(error_message(&response.body).unwrap_or_else(|| fallback.to_owned())),
        });
    }
    if !status.is_success() {
        return Err(NetworkingError::Transport(TransportError::BadServerResponse));
    }

    check_content_type(&response)?;
    if response.body.is_empty() {
        return Err(NetworkingError::EmptyResponse);
    }
    decode_json(&response.body)
}

fn check_content_type(response: &TransportResponse) -> Result<(), NetworkingError> {
    let Some(header) = response.headers.get(CONTENT_TYPE) else {
        tracing::debug!("response has no Content-Type header; decoding as JSON");
        return Ok(());
    };
    let content_type = String::from_utf8_lossy(header.as_bytes()).into_owned();
    if content_type.is_empty() || content_type.to_ascii_lowercase().contains("json") {
        return Ok(());
    }
    Err(NetworkingError::InvalidContentType { content_type })
}

fn error_message(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<ApiErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.message)
        .filter(|message| !message.trim().is_empty())
}
