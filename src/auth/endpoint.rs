//! Authentication endpoints.

use crate::networking::{Endpoint, HttpMethod};

/// Default login path.
pub const DEFAULT_LOGIN_PATH: &str = "/auth/login";

/// Default token refresh path.
pub const DEFAULT_REFRESH_PATH: &str = "/auth/refresh";

/// Paths of the authentication endpoints, relative to the API base URL.
///
/// The interceptor never attempts a refresh for a 401 returned by either of
/// these paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthPaths {
    /// Login path.
    pub login: String,
    /// Token refresh path.
    pub refresh: String,
}

impl Default for AuthPaths {
    fn default() -> Self {
        Self {
            login: DEFAULT_LOGIN_PATH.to_owned(),
            refresh: DEFAULT_REFRESH_PATH.to_owned(),
        }
    }
}

impl AuthPaths {
    /// Returns whether a request URL path targets login or refresh.
    ///
    /// Request paths include the base URL path, so the comparison matches on
    /// the trailing segment.
    #[must_use]
    pub fn is_auth_path(&self, request_path: &str) -> bool {
        let trimmed = request_path.trim_end_matches('/');
        [self.login.as_str(), self.refresh.as_str()]
            .into_iter()
            .map(|path| path.trim_end_matches('/'))
            .any(|path| !path.is_empty() && trimmed.ends_with(path))
    }

    /// Returns the login endpoint.
    #[must_use]
    pub fn login_endpoint(&self) -> Endpoint {
        Endpoint::new(HttpMethod::Post, self.login.as_str())
    }

    /// Returns the token refresh endpoint.
    #[must_use]
    pub fn refresh_endpoint(&self) -> Endpoint {
        Endpoint::new(HttpMethod::Post, self.refresh.as_str())
    }
}
