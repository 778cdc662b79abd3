//! Session management against the authentication endpoints.

use std::sync::Arc;

use async_trait::async_trait;

use super::endpoint::AuthPaths;
use super::models::{ApiLoginResponse, AuthSession, Credentials};
use super::tokens::TokenStore;
use crate::networking::{NetworkService, NetworkingError};

/// Opens and closes authenticated sessions.
#[async_trait]
pub trait AuthRepository: Send + Sync {
    /// Signs in and stores the issued tokens.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkingError`] when the request fails, the credentials
    /// are rejected, or the tokens cannot be stored.
    async fn login(&self, credentials: &Credentials) -> Result<AuthSession, NetworkingError>;

    /// Forgets the stored tokens.
    fn logout(&self);
}

/// [`AuthRepository`] backed by the API.
#[derive(Clone)]
pub struct NetworkAuthRepository {
    service: NetworkService,
    store: Arc<dyn TokenStore>,
    paths: AuthPaths,
}

impl NetworkAuthRepository {
    /// Creates a repository.
    #[must_use]
    pub const fn new(
        service: NetworkService,
        store: Arc<dyn TokenStore>,
        paths: AuthPaths,
    ) -> Self {
        Self {
            service,
            store,
            paths,
        }
    }
}

#[async_trait]
impl AuthRepository for NetworkAuthRepository {
    async fn login(&self, credentials: &Credentials) -> Result<AuthSession, NetworkingError> {
        let response: ApiLoginResponse = self
            .service
            .execute_with_body(&self.paths.login_endpoint(), credentials)
            .await?;
        let session = AuthSession::from(response);
        self.store
            .save_tokens(&session.tokens)
            .map_err(|error| NetworkingError::Unknown {
                message: error.to_string(),
            })?;
        tracing::info!("signed in as {}", session.user.email);
        Ok(session)
    }

    fn logout(&self) {
        self.store.clear_tokens();
        tracing::info!("signed out");
    }
}
