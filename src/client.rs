//! Assembly of the networking stack for one API deployment.

use std::fmt;
use std::sync::Arc;

use crate::auth::{
    AuthInterceptor, AuthPaths, AuthenticatedClient, InMemoryTokenStore, NetworkAuthRepository,
    TokenStore,
};
use crate::networking::{
    BaseUrl, NetworkService, NetworkingError, PayloadEncoder, RequestBuilder, ReqwestTransport,
    SnakeCaseJsonEncoder, Transport,
};
use crate::poi::NetworkPoiRepository;

/// A configured client for one API deployment.
///
/// All repositories handed out by a client share its token store and its
/// interceptor, so a refresh triggered through one is seen by every other.
#[derive(Clone)]
pub struct Wayfinder {
    service: NetworkService,
    store: Arc<dyn TokenStore>,
    auth_paths: AuthPaths,
}

impl fmt::Debug for Wayfinder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wayfinder")
            .field("service", &self.service)
            .field("auth_paths", &self.auth_paths)
            .finish_non_exhaustive()
    }
}

impl Wayfinder {
    /// Starts building a client for `base_url`.
    #[must_use]
    pub fn builder(base_url: BaseUrl) -> WayfinderBuilder {
        WayfinderBuilder {
            base_url,
            transport: None,
            store: None,
            encoder: Arc::new(SnakeCaseJsonEncoder),
            auth_paths: AuthPaths::default(),
        }
    }

    /// Returns the POI repository.
    #[must_use]
    pub fn pois(&self) -> NetworkPoiRepository {
        NetworkPoiRepository::new(self.service.clone())
    }

    /// Returns the authentication repository.
    #[must_use]
    pub fn auth(&self) -> NetworkAuthRepository {
        NetworkAuthRepository::new(
            self.service.clone(),
            Arc::clone(&self.store),
            self.auth_paths.clone(),
        )
    }

    /// Returns the token store.
    #[must_use]
    pub const fn token_store(&self) -> &Arc<dyn TokenStore> {
        &self.store
    }
}

/// Builder for [`Wayfinder`].
pub struct WayfinderBuilder {
    base_url: BaseUrl,
    transport: Option<Arc<dyn Transport>>,
    store: Option<Arc<dyn TokenStore>>,
    encoder: Arc<dyn PayloadEncoder>,
    auth_paths: AuthPaths,
}

impl WayfinderBuilder {
    /// Uses a host-supplied transport instead of `reqwest`.
    #[must_use]
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Uses a host-supplied token store instead of an in-memory one.
    #[must_use]
    pub fn token_store(mut self, store: Arc<dyn TokenStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Replaces the payload encoder.
    #[must_use]
    pub fn encoder(mut self, encoder: Arc<dyn PayloadEncoder>) -> Self {
        self.encoder = encoder;
        self
    }

    /// Overrides the authentication paths.
    #[must_use]
    pub fn auth_paths(mut self, paths: AuthPaths) -> Self {
        self.auth_paths = paths;
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkingError::Transport`] when no transport was supplied
    /// and the default `reqwest` client cannot be created.
    pub fn build(self) -> Result<Wayfinder, NetworkingError> {
        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new()?),
        };
        let store: Arc<dyn TokenStore> = self
            .store
            .unwrap_or_else(|| Arc::new(InMemoryTokenStore::new()));
        let requests = RequestBuilder::with_encoder(self.base_url, self.encoder);
        let interceptor = Arc::new(AuthInterceptor::new(
            Arc::clone(&transport),
            requests.clone(),
            Arc::clone(&store),
            self.auth_paths.clone(),
        ));
        let client = AuthenticatedClient::new(transport, interceptor);

        Ok(Wayfinder {
            service: NetworkService::new(requests, client),
            store,
            auth_paths: self.auth_paths,
        })
    }
}
