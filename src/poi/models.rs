//! Point-of-interest domain models and their wire representations.
//!
//! Types prefixed with `Api` are internal deserialisation targets that
//! convert into public domain types. Wire records carry API metadata the
//! domain has no use for; conversion drops it.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::auth::models::ApiIdentifier;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
}

/// POI category as understood by the API.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PoiCategory {
    /// Restaurants and other sit-down food.
    Restaurant,
    /// Cafes.
    Cafe,
    /// Bars and pubs.
    Bar,
    /// Museums and galleries.
    Museum,
    /// Parks and gardens.
    Park,
    /// Monuments and notable sights.
    Landmark,
    /// Shops.
    Shop,
    /// Accommodation.
    Hotel,
    /// A category this client does not know about yet.
    Other(String),
}

impl PoiCategory {
    /// Returns the category name as sent on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        match self {
            Self::Restaurant => "restaurant",
            Self::Cafe => "cafe",
            Self::Bar => "bar",
            Self::Museum => "museum",
            Self::Park => "park",
            Self::Landmark => "landmark",
            Self::Shop => "shop",
            Self::Hotel => "hotel",
            Self::Other(name) => name.as_str(),
        }
    }
}

impl fmt::Display for PoiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for PoiCategory {
    fn from(value: &str) -> Self {
        let normalised = value.trim().to_ascii_lowercase();
        match normalised.as_str() {
            "restaurant" => Self::Restaurant,
            "cafe" => Self::Cafe,
            "bar" => Self::Bar,
            "museum" => Self::Museum,
            "park" => Self::Park,
            "landmark" => Self::Landmark,
            "shop" => Self::Shop,
            "hotel" => Self::Hotel,
            _ => Self::Other(normalised),
        }
    }
}

impl FromStr for PoiCategory {
    type Err = std::convert::Infallible;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(value))
    }
}

/// A point of interest.
#[derive(Debug, Clone, PartialEq)]
pub struct Poi {
    /// Identifier issued by the API.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Location.
    pub coordinates: Coordinates,
    /// Category.
    pub category: PoiCategory,
    /// Picture URLs, in the order the API lists them.
    pub pictures: Vec<String>,
}

/// Page window for list operations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pagination {
    /// Maximum number of results.
    pub limit: Option<u32>,
    /// Number of results to skip.
    pub offset: Option<u32>,
}

/// Search for POIs within a radius of a point.
#[derive(Debug, Clone, PartialEq)]
pub struct RadiusSearch {
    /// Centre of the search.
    pub centre: Coordinates,
    /// Radius in metres.
    pub radius: f64,
    /// Categories to include. `None` sends no filter; an empty list is sent
    /// as an empty `categories` value.
    pub categories: Option<Vec<PoiCategory>>,
    /// Result window.
    pub pagination: Pagination,
}

/// Search for POIs inside a bounding box.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundingBoxSearch {
    /// Northern latitude bound.
    pub north: f64,
    /// Southern latitude bound.
    pub south: f64,
    /// Eastern longitude bound.
    pub east: f64,
    /// Western longitude bound.
    pub west: f64,
    /// Categories to include. `None` sends no filter; an empty list is sent
    /// as an empty `categories` value.
    pub categories: Option<Vec<PoiCategory>>,
    /// Result window.
    pub pagination: Pagination,
}

/// Search for POIs by name.
#[derive(Debug, Clone, PartialEq)]
pub struct NameSearch {
    /// Name or name fragment to match.
    pub name: String,
    /// Categories to include. `None` sends no filter; an empty list is sent
    /// as an empty `categories` value.
    pub categories: Option<Vec<PoiCategory>>,
    /// Result window, sent as `page[limit]` and `page[offset]`.
    pub page: Option<Pagination>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiCoordinates {
    pub(crate) lat: f64,
    pub(crate) lon: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ApiPoiLinks {
    #[serde(rename = "self")]
    #[expect(dead_code, reason = "self links are not surfaced in the domain model")]
    pub(crate) self_link: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiPoi {
    pub(crate) id: ApiIdentifier,
    pub(crate) name: String,
    pub(crate) coordinates: ApiCoordinates,
    pub(crate) category: String,
    #[serde(default)]
    #[expect(dead_code, reason = "subtypes are not surfaced in the domain model")]
    pub(crate) subtype: Option<String>,
    #[serde(default)]
    #[expect(dead_code, reason = "ranking is applied server-side")]
    pub(crate) rank: Option<f64>,
    #[serde(default)]
    #[expect(dead_code, reason = "tags are not surfaced in the domain model")]
    pub(crate) tags: Vec<String>,
    #[serde(default)]
    pub(crate) pictures: Vec<String>,
    #[serde(default)]
    #[expect(dead_code, reason = "links are not surfaced in the domain model")]
    pub(crate) links: Option<ApiPoiLinks>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiPoiList {
    pub(crate) data: Vec<ApiPoi>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiPoiItem {
    pub(crate) data: ApiPoi,
}
