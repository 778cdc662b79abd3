//! Wire-level query parameter sets for the POI search endpoints.

use crate::networking::{QueryItem, QueryItems, QueryParameters};

/// Query for `GET /pois/search/bbox`.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundingBoxParams {
    /// Northern latitude bound.
    pub north: f64,
    /// Southern latitude bound.
    pub south: f64,
    /// Eastern longitude bound.
    pub east: f64,
    /// Western longitude bound.
    pub west: f64,
    /// Category names.
    pub categories: Option<Vec<String>>,
    /// Maximum number of results.
    pub limit: Option<u32>,
    /// Number of results to skip.
    pub offset: Option<u32>,
}

impl QueryParameters for BoundingBoxParams {
    fn query_items(&self) -> Vec<QueryItem> {
        QueryItems::new()
            .value("north", self.north)
            .value("south", self.south)
            .value("east", self.east)
            .value("west", self.west)
            .list("categories", self.categories.as_deref())
            .optional("limit", self.limit)
            .optional("offset", self.offset)
            .build()
    }
}

/// Query for `GET /pois/search/radius`.
#[derive(Debug, Clone, PartialEq)]
pub struct RadiusParams {
    /// Centre latitude.
    pub latitude: f64,
    /// Centre longitude.
    pub longitude: f64,
    /// Radius in metres.
    pub radius: f64,
    /// Category names.
    pub categories: Option<Vec<String>>,
    /// Maximum number of results.
    pub limit: Option<u32>,
    /// Number of results to skip.
    pub offset: Option<u32>,
}

impl QueryParameters for RadiusParams {
    fn query_items(&self) -> Vec<QueryItem> {
        QueryItems::new()
            .value("latitude", self.latitude)
            .value("longitude", self.longitude)
            .value("radius", self.radius)
            .list("categories", self.categories.as_deref())
            .optional("limit", self.limit)
            .optional("offset", self.offset)
            .build()
    }
}

/// Nested `page[...]` block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParams {
    /// Maximum number of results.
    pub limit: Option<u32>,
    /// Number of results to skip.
    pub offset: Option<u32>,
}

impl QueryParameters for PageParams {
    fn query_items(&self) -> Vec<QueryItem> {
        QueryItems::new()
            .optional("limit", self.limit)
            .optional("offset", self.offset)
            .build()
    }
}

/// Query for `GET /pois/search/name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameParams {
    /// Name or name fragment.
    pub name: String,
    /// Category names.
    pub categories: Option<Vec<String>>,
    /// Result window.
    pub page: Option<PageParams>,
}

impl QueryParameters for NameParams {
    fn query_items(&self) -> Vec<QueryItem> {
        QueryItems::new()
            .value("name", &self.name)
            .list("categories", self.categories.as_deref())
            .nested("page", self.page.as_ref())
            .build()
    }
}
