//! Error taxonomy shared by every layer of the networking stack.
//!
//! Equality is defined by variant plus the discriminating payload only:
//! [`NetworkingError::Server`] compares by status code and ignores the
//! message, and every variant that wraps an underlying cause compares by
//! variant alone. Tests rely on this to assert on the kind of failure without
//! reproducing transport-specific detail.

use std::mem;

use thiserror::Error;

use super::transport::TransportError;

/// Errors surfaced by the networking stack.
#[derive(Debug, Clone, Error)]
pub enum NetworkingError {
    /// The base URL or the composed request URL is not a valid absolute URL.
    #[error("invalid URL: {message}")]
    InvalidUrl {
        /// Why the URL was rejected.
        message: String,
    },

    /// The request could not be assembled (bad header, missing encoder).
    #[error("request could not be built: {message}")]
    RequestBuildingFailed {
        /// Description of the build failure.
        message: String,
    },

    /// The request body could not be serialised.
    #[error("request body encoding failed: {message}")]
    EncodingFailed {
        /// Serialiser error detail.
        message: String,
    },

    /// The device has no usable network connection.
    #[error("no network connection")]
    NoConnection,

    /// The request did not complete within its timeout.
    #[error("request timed out")]
    Timeout,

    /// Any other transport-level failure.
    #[error("transport error: {0}")]
    Transport(TransportError),

    /// A successful response declared a non-JSON content type.
    #[error("unexpected response content type: {content_type}")]
    InvalidContentType {
        /// The `Content-Type` header value that was received.
        content_type: String,
    },

    /// A successful response carried no body.
    #[error("response body was empty")]
    EmptyResponse,

    /// The server answered with a 4xx or 5xx status.
    #[error("server returned status {code}: {}", .message.as_deref().unwrap_or("no message"))]
    Server {
        /// HTTP status code.
        code: u16,
        /// Message parsed from the error body, when present.
        message: Option<String>,
    },

    /// The response body could not be decoded into the expected shape.
    #[error("response decoding failed: {message}")]
    DecodingFailed {
        /// Deserialiser error detail.
        message: String,
    },

    /// A failure that fits no other category.
    #[error("unexpected error: {message}")]
    Unknown {
        /// Error detail.
        message: String,
    },
}

impl NetworkingError {
    /// Returns the HTTP status code for server errors.
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Server { code, .. } => Some(*code),
            _ => None,
        }
    }
}

impl PartialEq for NetworkingError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Server { code: left, .. }, Self::Server { code: right, .. }) => left == right,
            _ => mem::discriminant(self) == mem::discriminant(other),
        }
    }
}

impl Eq for NetworkingError {}

impl From<TransportError> for NetworkingError {
    fn from(error: TransportError) -> Self {
        match error {
            TransportError::NotConnectedToInternet => Self::NoConnection,
            TransportError::TimedOut => Self::Timeout,
            other @ (TransportError::BadServerResponse | TransportError::Other { .. }) => {
                Self::Transport(other)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::NetworkingError;
    use crate::networking::transport::TransportError;

    #[rstest]
    fn server_errors_compare_by_status_code_only() {
        let parsed = NetworkingError::Server {
            code: 400,
            message: Some("Bad request".to_owned()),
        };
        let generic = NetworkingError::Server {
            code: 400,
            message: None,
        };
        let other_code = NetworkingError::Server {
            code: 500,
            message: Some("Bad request".to_owned()),
        };

        assert_eq!(parsed, generic, "message must not affect equality");
        assert_ne!(parsed, other_code, "status code must affect equality");
    }

    #[rstest]
    fn wrapped_causes_compare_by_case_only() {
        let first = NetworkingError::DecodingFailed {
            message: "missing field `id`".to_owned(),
        };
        let second = NetworkingError::DecodingFailed {
            message: "expected a string".to_owned(),
        };

        assert_eq!(first, second);
        assert_ne!(
            first,
            NetworkingError::EncodingFailed {
                message: "missing field `id`".to_owned(),
            }
        );
    }

    #[rstest]
    #[case::offline(TransportError::NotConnectedToInternet, NetworkingError::NoConnection)]
    #[case::timeout(TransportError::TimedOut, NetworkingError::Timeout)]
    #[case::bad_response(
        TransportError::BadServerResponse,
        NetworkingError::Transport(TransportError::BadServerResponse)
    )]
    #[case::other(
        TransportError::Other { message: "tls handshake".to_owned() },
        NetworkingError::Transport(TransportError::Other { message: "tls handshake".to_owned() })
    )]
    fn classifies_transport_errors(
        #[case] input: TransportError,
        #[case] expected: NetworkingError,
    ) {
        let classified = NetworkingError::from(input);

        assert_eq!(classified.to_string(), expected.to_string());
        assert_eq!(classified, expected);
    }

    #[rstest]
    fn server_error_display_falls_back_when_message_missing() {
        let error = NetworkingError::Server {
            code: 503,
            message: None,
        };
        assert_eq!(error.to_string(), "server returned status 503: no message");
        assert_eq!(error.status_code(), Some(503));
    }
}
