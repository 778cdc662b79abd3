//! Declarative description of a single API call.

use std::fmt;

use http::header::{ACCEPT, HeaderMap, HeaderName, HeaderValue};

use super::error::NetworkingError;
use super::query::{QueryItem, QueryParameters};

/// Header carrying the client version on every request.
pub const APP_VERSION_HEADER: &str = "x-app-version";

/// HTTP methods supported by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `DELETE`
    Delete,
    /// `PATCH`
    Patch,
}

impl HttpMethod {
    /// Returns the method token as sent on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Patch => "PATCH",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for http::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Self::GET,
            HttpMethod::Post => Self::POST,
            HttpMethod::Put => Self::PUT,
            HttpMethod::Delete => Self::DELETE,
            HttpMethod::Patch => Self::PATCH,
        }
    }
}

/// Method, path, query and headers for one logical API call.
///
/// Endpoints are plain values built at each call site. Headers declared here
/// take precedence over the common headers sent with every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    method: HttpMethod,
    path: String,
    query_items: Option<Vec<QueryItem>>,
    headers: Option<Vec<(String, String)>>,
}

impl Endpoint {
    /// Creates an endpoint without query items or extra headers.
    #[must_use]
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query_items: None,
            headers: None,
        }
    }

    /// Sets the query items in order.
    #[must_use]
    pub fn with_query_items(mut self, items: Vec<QueryItem>) -> Self {
        self.query_items = Some(items);
        self
    }

    /// Sets the query items from a parameter set.
    #[must_use]
    pub fn with_query<P: QueryParameters>(self, params: &P) -> Self {
        self.with_query_items(params.query_items())
    }

    /// Adds a header that overrides any common header of the same name.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(Vec::new)
            .push((name.into(), value.into()));
        self
    }

    /// Returns the HTTP method.
    #[must_use]
    pub const fn method(&self) -> HttpMethod {
        self.method
    }

    /// Returns the path appended to the base URL path.
    #[must_use]
    pub const fn path(&self) -> &str {
        self.path.as_str()
    }

    /// Returns the query items, if any were declared.
    #[must_use]
    pub fn query_items(&self) -> Option<&[QueryItem]> {
        self.query_items.as_deref()
    }

    /// Returns the endpoint-specific headers, if any were declared.
    #[must_use]
    pub fn headers(&self) -> Option<&[(String, String)]> {
        self.headers.as_deref()
    }

    /// Merges the common headers with this endpoint's headers.
    ///
    /// Common headers are inserted first; endpoint headers replace them on a
    /// (case-insensitive) name collision.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkingError::RequestBuildingFailed`] when an endpoint
    /// header name or value is not valid HTTP.
    pub fn merged_headers(&self) -> Result<HeaderMap, NetworkingError> {
        let mut merged = common_headers();
        for (name, value) in self.headers().unwrap_or_default() {
            let header_name =
                HeaderName::from_bytes(name.as_bytes()).map_err(|error| {
                    NetworkingError::RequestBuildingFailed {
                        message: format!("invalid header name `{name}`: {error}"),
                    }
                })?;
            let header_value = HeaderValue::from_str(value).map_err(|error| {
                NetworkingError::RequestBuildingFailed {
                    message: format!("invalid value for header `{name}`: {error}"),
                }
            })?;
            merged.insert(header_name, header_value);
        }
        Ok(merged)
    }
}

/// Headers sent with every request unless an endpoint overrides them.
#[must_use]
pub fn common_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(
        HeaderName::from_static(APP_VERSION_HEADER),
        HeaderValue::from_static(env!("CARGO_PKG_VERSION")),
    );
    headers
}

#[cfg(test)]
mod tests {
    use http::header::{ACCEPT, AUTHORIZATION};
    use rstest::rstest;

    use super::{APP_VERSION_HEADER, Endpoint, HttpMethod};
    use crate::networking::error::NetworkingError;

    #[rstest]
    fn common_headers_apply_without_overrides() {
        let headers = Endpoint::new(HttpMethod::Get, "/pois")
            .merged_headers()
            .expect("headers should merge");

        assert_eq!(
            headers.get(ACCEPT).and_then(|value| value.to_str().ok()),
            Some("application/json")
        );
        assert_eq!(
            headers
                .get(APP_VERSION_HEADER)
                .and_then(|value| value.to_str().ok()),
            Some(env!("CARGO_PKG_VERSION"))
        );
    }

    #[rstest]
    #[case::same_case("Accept")]
    #[case::lower_case("accept")]
    #[case::upper_case("ACCEPT")]
    fn endpoint_headers_win_on_collision(#[case] name: &str) {
        let headers = Endpoint::new(HttpMethod::Get, "/export")
            .with_header(name, "text/csv")
            .with_header("Authorization", "Bearer fixed")
            .merged_headers()
            .expect("headers should merge");

        assert_eq!(headers.get_all(ACCEPT).iter().count(), 1);
        assert_eq!(
            headers.get(ACCEPT).and_then(|value| value.to_str().ok()),
            Some("text/csv")
        );
        assert!(headers.contains_key(AUTHORIZATION));
    }

    #[rstest]
    fn rejects_invalid_header_names() {
        let result = Endpoint::new(HttpMethod::Get, "/pois")
            .with_header("bad header", "value")
            .merged_headers();

        assert!(
            matches!(result, Err(NetworkingError::RequestBuildingFailed { .. })),
            "expected RequestBuildingFailed, got {result:?}"
        );
    }

    #[rstest]
    fn converts_to_http_method() {
        assert_eq!(http::Method::from(HttpMethod::Patch), http::Method::PATCH);
        assert_eq!(HttpMethod::Delete.to_string(), "DELETE");
    }
}
