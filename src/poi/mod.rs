//! Points of interest.
//!
//! [`PoiRepository`] is the public entry point. Domain search types are
//! mapped to wire parameter sets, sent through the
//! [`NetworkService`](crate::networking::NetworkService), and the returned
//! records are mapped back to [`Poi`] values in API order.

pub mod endpoint;
pub mod mapper;
pub mod models;
pub mod params;
pub mod repository;

pub use endpoint::PoiEndpoint;
pub use models::{
    BoundingBoxSearch, Coordinates, NameSearch, Pagination, Poi, PoiCategory, RadiusSearch,
};
pub use params::{BoundingBoxParams, NameParams, PageParams, RadiusParams};
pub use repository::{NetworkPoiRepository, PoiRepository};
