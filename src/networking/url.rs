//! Base URL validation and absolute URL composition.

use std::fmt;

use url::Url;

use super::endpoint::Endpoint;
use super::error::NetworkingError;

/// Validated API base URL.
///
/// Construction guarantees a scheme and a host, so per-request URL building
/// only fails when an endpoint path or query cannot be parsed. A trailing `/`
/// on the base path is dropped here once; endpoint paths are expected to
/// start with `/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrl {
    url: Url,
}

impl BaseUrl {
    /// Parses and validates a base URL.
    ///
    /// Any query string or fragment on the input is discarded.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkingError::InvalidUrl`] when the input is not an
    /// absolute URL, lacks a host, or embeds a user name or password.
    /// Credentials travel in the `Authorization` header, never in the URL.
    pub fn parse(raw: &str) -> Result<Self, NetworkingError> {
        let mut url = Url::parse(raw.trim()).map_err(|error| NetworkingError::InvalidUrl {
            message: format!("{raw}: {error}"),
        })?;

        if url.cannot_be_a_base() || url.host_str().is_none_or(str::is_empty) {
            return Err(NetworkingError::InvalidUrl {
                message: format!("{raw}: base URL must include a scheme and host"),
            });
        }

        if !url.username().is_empty() || url.password().is_some() {
            return Err(NetworkingError::InvalidUrl {
                message: format!(
                    "base URL for {host} must not embed credentials",
                    host = url.host_str().unwrap_or_default()
                ),
            });
        }

        url.set_query(None);
        url.set_fragment(None);
        let trimmed_path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&trimmed_path);

        Ok(Self { url })
    }

    /// Returns the base path without a trailing slash (empty for the root).
    #[must_use]
    pub fn base_path(&self) -> &str {
        self.url.path().trim_end_matches('/')
    }

    /// Composes the absolute URL for an endpoint.
    ///
    /// The path is the base path followed verbatim by the endpoint path;
    /// slashes are not collapsed. Query items are appended in order and no
    /// `?` is emitted when there are none.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkingError::InvalidUrl`] when the composed URL cannot be
    /// parsed.
    pub fn build(&self, endpoint: &Endpoint) -> Result<Url, NetworkingError> {
        let origin = self.url.origin().ascii_serialization();
        let raw = format!(
            "{origin}{base_path}{endpoint_path}",
            base_path = self.base_path(),
            endpoint_path = endpoint.path()
        );
        let mut url = Url::parse(&raw).map_err(|error| NetworkingError::InvalidUrl {
            message: format!("{raw}: {error}"),
        })?;

        if let Some(items) = endpoint.query_items()
            && !items.is_empty()
        {
            url.query_pairs_mut()
                .extend_pairs(items.iter().map(|item| (item.name(), item.value())));
        }

        Ok(url)
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url.as_str().trim_end_matches('/'))
    }
}
