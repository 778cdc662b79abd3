//! POI endpoint variants.

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

use super::params::{BoundingBoxParams, NameParams, RadiusParams};
use crate::networking::{Endpoint, HttpMethod};

/// Radius search path.
pub const RADIUS_SEARCH_PATH: &str = "/pois/search/radius";
/// Bounding-box search path.
pub const BOUNDING_BOX_SEARCH_PATH: &str = "/pois/search/bbox";
/// Name search path.
pub const NAME_SEARCH_PATH: &str = "/pois/search/name";
/// Prefix of single-POI lookups.
pub const POI_PATH: &str = "/pois";

/// Bytes escaped when an identifier becomes a single path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// The POI calls the API supports.
#[derive(Debug, Clone, PartialEq)]
pub enum PoiEndpoint {
    /// Search around a point.
    Radius(RadiusParams),
    /// Search inside a bounding box.
    BoundingBox(BoundingBoxParams),
    /// Search by name.
    Name(NameParams),
    /// Fetch one POI by identifier.
    ById(String),
}

impl PoiEndpoint {
    /// Describes the call as an [`Endpoint`].
    #[must_use]
    pub fn endpoint(&self) -> Endpoint {
        match self {
            Self::Radius(params) => {
                Endpoint::new(HttpMethod::Get, RADIUS_SEARCH_PATH).with_query(params)
            }
            Self::BoundingBox(params) => {
                Endpoint::new(HttpMethod::Get, BOUNDING_BOX_SEARCH_PATH).with_query(params)
            }
            Self::Name(params) => {
                Endpoint::new(HttpMethod::Get, NAME_SEARCH_PATH).with_query(params)
            }
            Self::ById(id) => Endpoint::new(
                HttpMethod::Get,
                format!("{POI_PATH}/{}", utf8_percent_encode(id, PATH_SEGMENT)),
            ),
        }
    }
}
