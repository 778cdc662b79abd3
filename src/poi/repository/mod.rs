//! Public façade for POI lookups.

use async_trait::async_trait;

use super::endpoint::PoiEndpoint;
use super::models::{ApiPoiItem, ApiPoiList, BoundingBoxSearch, NameSearch, Poi, RadiusSearch};
use crate::networking::{NetworkService, NetworkingError};

/// POI lookups expressed in domain types.
#[async_trait]
pub trait PoiRepository: Send + Sync {
    /// Finds POIs within a radius, in API order.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkingError`] when the request fails.
    async fn search_by_radius(&self, search: &RadiusSearch) -> Result<Vec<Poi>, NetworkingError>;

    /// Finds POIs inside a bounding box, in API order.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkingError`] when the request fails.
    async fn search_by_bounding_box(
        &self,
        search: &BoundingBoxSearch,
    ) -> Result<Vec<Poi>, NetworkingError>;

    /// Finds POIs by name, in API order.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkingError`] when the request fails.
    async fn search_by_name(&self, search: &NameSearch) -> Result<Vec<Poi>, NetworkingError>;

    /// Fetches a single POI.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkingError`] when the request fails, including
    /// [`NetworkingError::Server`] with code 404 for unknown identifiers.
    async fn poi(&self, id: &str) -> Result<Poi, NetworkingError>;
}

/// [`PoiRepository`] backed by the API.
#[derive(Debug, Clone)]
pub struct NetworkPoiRepository {
    service: NetworkService,
}

impl NetworkPoiRepository {
    /// Creates a repository.
    #[must_use]
    pub const fn new(service: NetworkService) -> Self {
        Self { service }
    }

    async fn list(&self, endpoint: PoiEndpoint) -> Result<Vec<Poi>, NetworkingError> {
        let list: ApiPoiList = self.service.execute(&endpoint.endpoint()).await?;
        Ok(list.data.into_iter().map(Poi::from).collect())
    }
}

#[async_trait]
impl PoiRepository for NetworkPoiRepository {
    async fn search_by_radius(&self, search: &RadiusSearch) -> Result<Vec<Poi>, NetworkingError> {
        self.list(PoiEndpoint::Radius(search.into())).await
    }

    async fn search_by_bounding_box(
        &self,
        search: &BoundingBoxSearch,
    ) -> Result<Vec<Poi>, NetworkingError> {
        self.list(PoiEndpoint::BoundingBox(search.into())).await
    }

    async fn search_by_name(&self, search: &NameSearch) -> Result<Vec<Poi>, NetworkingError> {
        self.list(PoiEndpoint::Name(search.into())).await
    }

    async fn poi(&self, id: &str) -> Result<Poi, NetworkingError> {
        let item: ApiPoiItem = self
            .service
            .execute(&PoiEndpoint::ById(id.to_owned()).endpoint())
            .await?;
        Ok(item.data.into())
    }
}
