//! Transport wrapper applying the authentication interceptor.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use super::interceptor::{AuthInterceptor, RetryDecision};
use crate::networking::{
    NetworkingError, PreparedRequest, Transport, TransportError, TransportResponse,
};

/// Number of times a request is re-sent after a credential refresh.
pub const MAX_AUTH_RETRIES: u8 = 1;

/// Failure of an authenticated dispatch.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DispatchError {
    /// The transport failed before producing a response.
    #[error(transparent)]
    Transport(TransportError),

    /// Credentials were rejected and renewing them failed.
    #[error(transparent)]
    Refresh(NetworkingError),
}

impl From<DispatchError> for NetworkingError {
    fn from(error: DispatchError) -> Self {
        match error {
            DispatchError::Transport(transport) => transport.into(),
            DispatchError::Refresh(refresh) => refresh,
        }
    }
}

/// Sends requests with credentials attached, retrying once after a refresh.
///
/// Every attempt is adapted from the original request, so a retry picks up
/// the renewed token rather than the one that was rejected. The retried
/// attempt is never evaluated again: a second 401 is returned to the caller.
#[derive(Clone)]
pub struct AuthenticatedClient {
    transport: Arc<dyn Transport>,
    interceptor: Arc<AuthInterceptor>,
}

impl fmt::Debug for AuthenticatedClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthenticatedClient")
            .field("interceptor", &self.interceptor)
            .finish_non_exhaustive()
    }
}

impl AuthenticatedClient {
    /// Creates a client.
    #[must_use]
    pub const fn new(transport: Arc<dyn Transport>, interceptor: Arc<AuthInterceptor>) -> Self {
        Self {
            transport,
            interceptor,
        }
    }

    /// Sends `request`, refreshing credentials and retrying once on a 401.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Transport`] when an attempt fails to produce
    /// a response and [`DispatchError::Refresh`] when a refresh failed.
    pub async fn send(
        &self,
        request: &PreparedRequest,
    ) -> Result<TransportResponse, DispatchError> {
        let mut retries_left = MAX_AUTH_RETRIES;
        loop {
            let attempt = self.interceptor.adapt(request);
            tracing::debug!("{} {}", attempt.method, attempt.url);
            let response = self
                .transport
                .send(&attempt)
                .await
                .map_err(DispatchError::Transport)?;

            if retries_left == 0 {
                return Ok(response);
            }
            match self.interceptor.evaluate(&attempt, response.status).await {
                RetryDecision::Proceed | RetryDecision::DoNotRetry => return Ok(response),
                RetryDecision::DoNotRetryWithError(error) => {
                    return Err(DispatchError::Refresh(error));
                }
                RetryDecision::Retry => {
                    retries_left -= 1;
                    tracing::debug!(
                        "retrying {} {} with renewed credentials",
                        attempt.method,
                        attempt.url
                    );
                }
            }
        }
    }
}
