//! Assembly of transport-ready requests from endpoints.

use std::sync::Arc;
use std::time::Duration;

use http::HeaderMap;
use http::header::{AUTHORIZATION, CONTENT_TYPE, HeaderValue};
use serde::Serialize;
use url::Url;

use super::codec::{PayloadEncoder, SnakeCaseJsonEncoder, to_json_value};
use super::endpoint::{Endpoint, HttpMethod};
use super::error::NetworkingError;
use super::url::BaseUrl;

/// Timeout applied to every request attempt.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// A fully resolved request ready for a transport.
///
/// Prepared requests are built fresh for every logical call. A retried
/// attempt starts again from the unmodified request rather than from the copy
/// that had credentials attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedRequest {
    /// Absolute request URL.
    pub url: Url,
    /// HTTP method.
    pub method: HttpMethod,
    /// Merged request headers.
    pub headers: HeaderMap,
    /// Encoded body, if any.
    pub body: Option<Vec<u8>>,
    /// Per-attempt timeout.
    pub timeout: Duration,
}

impl PreparedRequest {
    /// Returns the bearer token carried in the `Authorization` header.
    #[must_use]
    pub fn bearer_token(&self) -> Option<&str> {
        self.headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
    }
}

/// Builds [`PreparedRequest`] values against one base URL.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    base_url: BaseUrl,
    encoder: Option<Arc<dyn PayloadEncoder>>,
}

impl RequestBuilder {
    /// Creates a builder that encodes bodies as snake_case JSON.
    #[must_use]
    pub fn new(base_url: BaseUrl) -> Self {
        Self::with_encoder(base_url, Arc::new(SnakeCaseJsonEncoder))
    }

    /// Creates a builder with a custom payload encoder.
    #[must_use]
    pub fn with_encoder(base_url: BaseUrl, encoder: Arc<dyn PayloadEncoder>) -> Self {
        Self {
            base_url,
            encoder: Some(encoder),
        }
    }

    /// Creates a builder that refuses to attach request bodies.
    #[must_use]
    pub const fn without_encoder(base_url: BaseUrl) -> Self {
        Self {
            base_url,
            encoder: None,
        }
    }

    /// Returns the base URL requests are resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Builds a request without a body.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkingError::InvalidUrl`] when the URL cannot be composed
    /// or [`NetworkingError::RequestBuildingFailed`] for invalid headers.
    pub fn build(&self, endpoint: &Endpoint) -> Result<PreparedRequest, NetworkingError> {
        Ok(PreparedRequest {
            url: self.base_url.build(endpoint)?,
            method: endpoint.method(),
            headers: endpoint.merged_headers()?,
            body: None,
            timeout: REQUEST_TIMEOUT,
        })
    }

    /// Builds a request carrying an encoded body.
    ///
    /// `Content-Type` is set from the encoder unless the endpoint declared
    /// one.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`RequestBuilder::build`],
    /// [`NetworkingError::RequestBuildingFailed`] when no encoder is
    /// configured, or [`NetworkingError::EncodingFailed`] when encoding fails.
    pub fn build_with_body<B: Serialize + ?Sized>(
        &self,
        endpoint: &Endpoint,
        body: &B,
    ) -> Result<PreparedRequest, NetworkingError> {
        let mut request = self.build(endpoint)?;
        let encoder =
            self.encoder
                .as_ref()
                .ok_or_else(|| NetworkingError::RequestBuildingFailed {
                    message: format!(
                        "{method} {path} has a body but no payload encoder is configured",
                        method = endpoint.method(),
                        path = endpoint.path()
                    ),
                })?;

        let encoded = encoder.encode(to_json_value(body)?)?;
        if !request.headers.contains_key(CONTENT_TYPE) {
            request.headers.insert(
                CONTENT_TYPE,
                HeaderValue::from_static(encoder.content_type()),
            );
        }
        request.body = Some(encoded);
        Ok(request)
    }
}
