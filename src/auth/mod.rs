//! Credentials, token refresh and authenticated dispatch.
//!
//! Requests sent through [`AuthenticatedClient`] carry the stored access
//! token. When the API rejects it with a 401, the [`AuthInterceptor`]
//! exchanges the refresh token for a new pair and the request is sent once
//! more. A failed refresh clears the [`TokenStore`].

pub mod client;
pub mod endpoint;
pub mod interceptor;
pub mod models;
pub mod repository;
pub mod tokens;

#[cfg(test)]
pub(crate) mod test_support;

pub use client::{AuthenticatedClient, DispatchError, MAX_AUTH_RETRIES};
pub use endpoint::{AuthPaths, DEFAULT_LOGIN_PATH, DEFAULT_REFRESH_PATH};
pub use interceptor::{AuthInterceptor, RefreshOutcome, RetryDecision};
pub use models::{AuthSession, AuthUser, Credentials};
pub use repository::{AuthRepository, NetworkAuthRepository};
pub use tokens::{InMemoryTokenStore, OAuthTokens, TokenStore, TokenStoreError};
