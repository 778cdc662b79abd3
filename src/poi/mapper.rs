//! Translation between POI domain types and their wire forms.
//!
//! This is the only module that knows both shapes. Search parameters map
//! domain to wire; POI records map wire to domain and lose the API metadata
//! on the way.

use super::models::{
    ApiPoi, BoundingBoxSearch, Coordinates, NameSearch, Pagination, Poi, PoiCategory, RadiusSearch,
};
use super::params::{BoundingBoxParams, NameParams, PageParams, RadiusParams};

fn category_names(categories: Option<&[PoiCategory]>) -> Option<Vec<String>> {
    categories.map(|list| list.iter().map(|category| category.as_str().to_owned()).collect())
}

impl From<&RadiusSearch> for RadiusParams {
    fn from(value: &RadiusSearch) -> Self {
        Self {
            latitude: value.centre.latitude,
            longitude: value.centre.longitude,
            radius: value.radius,
            categories: category_names(value.categories.as_deref()),
            limit: value.pagination.limit,
            offset: value.pagination.offset,
        }
    }
}

impl From<&BoundingBoxSearch> for BoundingBoxParams {
    fn from(value: &BoundingBoxSearch) -> Self {
        Self {
            north: value.north,
            south: value.south,
            east: value.east,
            west: value.west,
            categories: category_names(value.categories.as_deref()),
            limit: value.pagination.limit,
            offset: value.pagination.offset,
        }
    }
}

impl From<Pagination> for PageParams {
    fn from(value: Pagination) -> Self {
        Self {
            limit: value.limit,
            offset: value.offset,
        }
    }
}

impl From<&NameSearch> for NameParams {
    fn from(value: &NameSearch) -> Self {
        Self {
            name: value.name.clone(),
            categories: category_names(value.categories.as_deref()),
            page: value.page.map(PageParams::from),
        }
    }
}

impl From<ApiPoi> for Poi {
    fn from(value: ApiPoi) -> Self {
        Self {
            id: value.id.to_string(),
            name: value.name,
            coordinates: Coordinates {
                latitude: value.coordinates.lat,
                longitude: value.coordinates.lon,
            },
            category: PoiCategory::from(value.category.as_str()),
            pictures: value.pictures,
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::super::models::{ApiPoi, Pagination};
    use crate::networking::{QueryParameters, decode_json};
    use crate::poi::models::{
        BoundingBoxSearch, Coordinates, NameSearch, Poi, PoiCategory, RadiusSearch,
    };
    use crate::poi::params::{BoundingBoxParams, NameParams, PageParams, RadiusParams};

    #[rstest]
    fn bounding_box_search_maps_every_field() {
        let search = BoundingBoxSearch {
            north: 10.0,
            south: 5.0,
            east: 8.0,
            west: 3.0,
            categories: Some(vec![PoiCategory::Restaurant]),
            pagination: Pagination {
                limit: Some(20),
                offset: Some(5),
            },
        };

        assert_eq!(
            BoundingBoxParams::from(&search),
            BoundingBoxParams {
                north: 10.0,
                south: 5.0,
                east: 8.0,
                west: 3.0,
                categories: Some(vec!["restaurant".to_owned()]),
                limit: Some(20),
                offset: Some(5),
            }
        );
    }

    #[rstest]
    fn missing_category_filter_is_omitted() {
        let search = NameSearch {
            name: "harbour".to_owned(),
            categories: None,
            page: Some(Pagination {
                limit: Some(5),
                offset: None,
            }),
        };

        assert_eq!(
            NameParams::from(&search),
            NameParams {
                name: "harbour".to_owned(),
                categories: None,
                page: Some(PageParams {
                    limit: Some(5),
                    offset: None,
                }),
            }
        );
    }

    #[rstest]
    fn empty_category_filter_is_kept() {
        let search = RadiusSearch {
            centre: Coordinates {
                latitude: 55.95,
                longitude: -3.19,
            },
            radius: 500.0,
            categories: Some(Vec::new()),
            pagination: Pagination::default(),
        };

        let params = RadiusParams::from(&search);

        assert_eq!(params.categories, Some(Vec::new()));
        assert!(
            params
                .query_items()
                .iter()
                .any(|item| item.name() == "categories" && item.value().is_empty()),
            "expected an empty categories item, got {:?}",
            params.query_items()
        );
    }

    #[rstest]
    fn wire_poi_drops_api_metadata() {
        let wire: ApiPoi = decode_json(
            br#"{
                "id": 881,
                "name": "Harbour Museum",
                "coordinates": {"lat": 55.95, "lon": -3.19},
                "category": "museum",
                "subtype": "maritime",
                "rank": 0.82,
                "tags": ["indoor"],
                "pictures": ["https://img.example.com/1.jpg"],
                "links": {"self": "/pois/881"}
            }"#,
        )
        .expect("wire POI should decode");

        assert_eq!(
            Poi::from(wire),
            Poi {
                id: "881".to_owned(),
                name: "Harbour Museum".to_owned(),
                coordinates: Coordinates {
                    latitude: 55.95,
                    longitude: -3.19,
                },
                category: PoiCategory::Museum,
                pictures: vec!["https://img.example.com/1.jpg".to_owned()],
            }
        );
    }

    #[rstest]
    fn wire_poi_without_optional_metadata_decodes() {
        let wire: ApiPoi = decode_json(
            br#"{"id":"p-1","name":"Kiosk","coordinates":{"lat":1.0,"lon":2.0},"category":"street_food"}"#,
        )
        .expect("minimal wire POI should decode");
        let poi = Poi::from(wire);

        assert_eq!(poi.id, "p-1");
        assert_eq!(poi.category, PoiCategory::Other("street_food".to_owned()));
        assert!(poi.pictures.is_empty());
    }
}
