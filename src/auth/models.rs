//! Authentication payloads and session models.
//!
//! Types prefixed with `Api` are wire-level deserialisation targets that
//! convert into public domain types.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::tokens::OAuthTokens;

/// Email and password used to open a session.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    /// Account email.
    pub email: String,
    /// Account password.
    pub password: String,
}

impl Credentials {
    /// Creates a credential pair.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// The signed-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    /// User identifier as issued by the server.
    pub id: String,
    /// Account email.
    pub email: String,
    /// Given name, if recorded.
    pub first_name: Option<String>,
    /// Family name, if recorded.
    pub last_name: Option<String>,
}

/// Result of a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    /// The signed-in user.
    pub user: AuthUser,
    /// Tokens issued for the session.
    pub tokens: OAuthTokens,
}

#[derive(Debug, Serialize)]
pub(crate) struct ApiRefreshRequest<'a> {
    pub(crate) refresh_token: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiTokenPair {
    pub(crate) access_token: String,
    #[serde(default)]
    pub(crate) refresh_token: Option<String>,
}

/// Refresh responses arrive either bare or wrapped in `data`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum ApiRefreshResponse {
    Wrapped { data: ApiTokenPair },
    Bare(ApiTokenPair),
}

/// Identifiers are strings on some deployments and integers on others.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum ApiIdentifier {
    Text(String),
    Number(i64),
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiAuthUser {
    pub(crate) id: ApiIdentifier,
    pub(crate) email: String,
    #[serde(default)]
    pub(crate) first_name: Option<String>,
    #[serde(default)]
    pub(crate) last_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiLoginData {
    pub(crate) user: ApiAuthUser,
    #[serde(flatten)]
    pub(crate) tokens: ApiTokenPair,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiLoginResponse {
    pub(crate) data: ApiLoginData,
}

impl From<ApiTokenPair> for OAuthTokens {
    fn from(value: ApiTokenPair) -> Self {
        Self {
            access_token: value.access_token,
            refresh_token: value.refresh_token,
        }
    }
}

impl From<ApiRefreshResponse> for OAuthTokens {
    fn from(value: ApiRefreshResponse) -> Self {
        match value {
            ApiRefreshResponse::Wrapped { data } | ApiRefreshResponse::Bare(data) => data.into(),
        }
    }
}

impl fmt::Display for ApiIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Number(number) => write!(f, "{number}"),
        }
    }
}

impl From<ApiAuthUser> for AuthUser {
    fn from(value: ApiAuthUser) -> Self {
        Self {
            id: value.id.to_string(),
            email: value.email,
            first_name: value.first_name,
            last_name: value.last_name,
        }
    }
}

impl From<ApiLoginResponse> for AuthSession {
    fn from(value: ApiLoginResponse) -> Self {
        Self {
            user: value.data.user.into(),
            tokens: value.data.tokens.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{ApiLoginResponse, ApiRefreshResponse, AuthSession, Credentials};
    use crate::auth::tokens::OAuthTokens;
    use crate::networking::decode_json;

    #[rstest]
    #[case::bare(br#"{"access_token":"a2","refresh_token":"r2"}"#.as_slice())]
    #[case::wrapped(br#"{"data":{"accessToken":"a2","refreshToken":"r2"}}"#.as_slice())]
    fn refresh_response_accepts_both_shapes(#[case] body: &[u8]) {
        let response: ApiRefreshResponse = decode_json(body).expect("refresh body should decode");

        assert_eq!(
            OAuthTokens::from(response),
            OAuthTokens::new("a2", Some("r2".to_owned()))
        );
    }

    #[rstest]
    fn refresh_response_without_refresh_token_clears_it() {
        let response: ApiRefreshResponse =
            decode_json(br#"{"access_token":"a2"}"#).expect("refresh body should decode");

        assert_eq!(OAuthTokens::from(response).refresh_token, None);
    }

    #[rstest]
    #[case::numeric_id(br#"{"data":{"user":{"id":7,"email":"ada@example.com","firstName":"Ada"},"accessToken":"a1","refreshToken":"r1"}}"#.as_slice())]
    #[case::string_id(br#"{"data":{"user":{"id":"7","email":"ada@example.com","first_name":"Ada"},"access_token":"a1","refresh_token":"r1"}}"#.as_slice())]
    fn login_response_maps_to_session(#[case] body: &[u8]) {
        let response: ApiLoginResponse = decode_json(body).expect("login body should decode");
        let session = AuthSession::from(response);

        assert_eq!(session.user.id, "7");
        assert_eq!(session.user.email, "ada@example.com");
        assert_eq!(session.user.first_name.as_deref(), Some("Ada"));
        assert_eq!(session.user.last_name, None);
        assert_eq!(session.tokens, OAuthTokens::new("a1", Some("r1".to_owned())));
    }

    #[rstest]
    fn credentials_debug_hides_password() {
        let rendered = format!("{:?}", Credentials::new("ada@example.com", "hunter2"));

        assert!(rendered.contains("ada@example.com"));
        assert!(!rendered.contains("hunter2"), "password leaked: {rendered}");
    }
}
