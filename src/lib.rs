//! Wayfinder client library for the points-of-interest API.
//!
//! The library builds requests from typed endpoint descriptions, sends them
//! through a pluggable transport, refreshes expired OAuth tokens
//! transparently, and maps POI records into domain types. [`Wayfinder`]
//! assembles the pieces for one deployment.

pub mod auth;
pub mod client;
pub mod config;
pub mod networking;
pub mod poi;

pub use auth::{
    AuthRepository, AuthSession, AuthUser, Credentials, InMemoryTokenStore, NetworkAuthRepository,
    OAuthTokens, TokenStore, TokenStoreError,
};
pub use client::{Wayfinder, WayfinderBuilder};
pub use config::{ApiEnvironment, ConfigError, OperationMode, WayfinderConfig};
pub use networking::{BaseUrl, NetworkService, NetworkingError, Transport};
pub use poi::{
    BoundingBoxSearch, Coordinates, NameSearch, NetworkPoiRepository, Pagination, Poi, PoiCategory,
    PoiRepository, RadiusSearch,
};
