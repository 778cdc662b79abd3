//! Bearer token injection and expired-credential recovery.
//!
//! The interceptor wraps every transport call made through
//! [`AuthenticatedClient`](super::client::AuthenticatedClient):
//!
//! 1. [`AuthInterceptor::adapt`] attaches `Authorization: Bearer <token>` to
//!    a copy of the outgoing request.
//! 2. [`AuthInterceptor::evaluate`] inspects the response status. A 401 from
//!    any path other than login or refresh triggers a token refresh and asks
//!    the caller to retry.
//!
//! Concurrent 401s share a single in-flight refresh. The first caller starts
//! it and every other caller awaits the same future, so the refresh endpoint
//! is called once per expiry.

use std::fmt;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use http::StatusCode;
use http::header::{AUTHORIZATION, HeaderValue};
use tokio::sync::Mutex;

use super::endpoint::AuthPaths;
use super::models::{ApiRefreshRequest, ApiRefreshResponse};
use super::tokens::{OAuthTokens, TokenStore};
use crate::networking::service::decode_response;
use crate::networking::{NetworkingError, PreparedRequest, RequestBuilder, Transport};

/// What the client should do with a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryDecision {
    /// Hand the response to the caller unchanged.
    Proceed,
    /// Credentials were renewed; send the request again.
    Retry,
    /// Hand the response to the caller without retrying.
    DoNotRetry,
    /// Refreshing failed; surface this error instead of the response.
    DoNotRetryWithError(NetworkingError),
}

/// Result of a refresh attempt that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// New tokens were saved.
    Refreshed,
    /// No refresh token was stored, so nothing was attempted.
    NoRefreshToken,
}

type RefreshFuture = Shared<BoxFuture<'static, Result<RefreshOutcome, NetworkingError>>>;

/// Adds credentials to requests and recovers from expired access tokens.
pub struct AuthInterceptor {
    refresher: Arc<TokenRefresher>,
    in_flight: Mutex<Option<RefreshFuture>>,
}

impl fmt::Debug for AuthInterceptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthInterceptor")
            .field("paths", &self.refresher.paths)
            .field("base_url", self.refresher.requests.base_url())
            .finish_non_exhaustive()
    }
}

impl AuthInterceptor {
    /// Creates an interceptor.
    ///
    /// `transport` is used directly for refresh calls, so a refresh never
    /// passes back through the interceptor.
    #[must_use]
    pub fn new(
        transport: Arc<dyn Transport>,
        requests: RequestBuilder,
        store: Arc<dyn TokenStore>,
        paths: AuthPaths,
    ) -> Self {
        Self {
            refresher: Arc::new(TokenRefresher {
                transport,
                requests,
                store,
                paths,
            }),
            in_flight: Mutex::new(None),
        }
    }

    /// Returns a copy of `request` carrying the current bearer token.
    ///
    /// Requests that already declare an `Authorization` header, and requests
    /// made while no token is stored, are returned unchanged.
    #[must_use]
    pub fn adapt(&self, request: &PreparedRequest) -> PreparedRequest {
        let mut adapted = request.clone();
        if adapted.headers.contains_key(AUTHORIZATION) {
            return adapted;
        }
        let Some(token) = self.refresher.store.access_token() else {
            return adapted;
        };
        match HeaderValue::from_str(&format!("Bearer {token}")) {
            Ok(mut value) => {
                value.set_sensitive(true);
                adapted.headers.insert(AUTHORIZATION, value);
            }
            Err(_) => {
                tracing::warn!(
                    "stored access token is not a valid header value; sending without it"
                );
            }
        }
        adapted
    }

    /// Decides whether the response to `request` should be retried.
    ///
    /// `request` is the adapted request that was sent.
    pub async fn evaluate(&self, request: &PreparedRequest, status: StatusCode) -> RetryDecision {
        if status != StatusCode::UNAUTHORIZED {
            return RetryDecision::Proceed;
        }
        if self.refresher.paths.is_auth_path(request.url.path()) {
            tracing::debug!(
                "401 from authentication endpoint {}; not refreshing",
                request.url.path()
            );
            return RetryDecision::DoNotRetry;
        }
        if let Some(current) = self.refresher.store.access_token()
            && request.bearer_token() != Some(current.as_str())
        {
            tracing::debug!("access token changed since the request was sent; retrying");
            return RetryDecision::Retry;
        }

        match self.refresh().await {
            Ok(RefreshOutcome::Refreshed) => RetryDecision::Retry,
            Ok(RefreshOutcome::NoRefreshToken) => RetryDecision::DoNotRetry,
            Err(error) => RetryDecision::DoNotRetryWithError(error),
        }
    }

    /// Refreshes the access token, joining any refresh already in flight.
    ///
    /// # Errors
    ///
    /// Returns the refresh failure; stored tokens have been cleared by then.
    pub async fn refresh(&self) -> Result<RefreshOutcome, NetworkingError> {
        let refresh = {
            let mut slot = self.in_flight.lock().await;
            if slot.is_some() {
                tracing::debug!("joining in-flight token refresh");
            }
            slot.get_or_insert_with(|| {
                let refresher = Arc::clone(&self.refresher);
                async move { refresher.refresh().await }.boxed().shared()
            })
            .clone()
        };

        let outcome = refresh.clone().await;

        let mut slot = self.in_flight.lock().await;
        if slot.as_ref().is_some_and(|current| current.ptr_eq(&refresh)) {
            *slot = None;
        }
        outcome
    }
}

struct TokenRefresher {
    transport: Arc<dyn Transport>,
    requests: RequestBuilder,
    store: Arc<dyn TokenStore>,
    paths: AuthPaths,
}

impl TokenRefresher {
    async fn refresh(&self) -> Result<RefreshOutcome, NetworkingError> {
        let Some(refresh_token) = self.store.refresh_token() else {
            tracing::debug!("access token rejected and no refresh token is stored");
            return Ok(RefreshOutcome::NoRefreshToken);
        };

        tracing::debug!("refreshing access token");
        match self.renew(&refresh_token).await {
            Ok(()) => {
                tracing::info!("access token refreshed");
                Ok(RefreshOutcome::Refreshed)
            }
            Err(error) => {
                tracing::warn!("token refresh failed, clearing stored credentials: {error}");
                self.store.clear_tokens();
                Err(error)
            }
        }
    }

    async fn renew(&self, refresh_token: &str) -> Result<(), NetworkingError> {
        let request = self.requests.build_with_body(
            &self.paths.refresh_endpoint(),
            &ApiRefreshRequest { refresh_token },
        )?;
        let response = self.transport.send(&request).await?;
        let body: ApiRefreshResponse = decode_response(&response)?;
        let tokens = OAuthTokens::from(body);
        self.store.save_tokens(&tokens).map_err(|error| NetworkingError::Unknown {
            message: error.to_string(),
        })
    }
}
