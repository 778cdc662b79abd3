//! Application configuration loaded from CLI, environment, and files.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in application defaults
//! 2. **Configuration file** – `.wayfinder.toml` in the current directory,
//!    home directory, or XDG config directory
//! 3. **Environment variables** – `WAYFINDER_*`, e.g. `WAYFINDER_BASE_URL`
//! 4. **Command-line arguments** – `--base-url`, `--email`, ...
//!
//! # Configuration File
//!
//! ```toml
//! environment = "local"
//! email = "ada@example.com"
//! password = "correct horse"
//! latitude = 55.95
//! longitude = -3.19
//! radius = 500.0
//! categories = "museum,park"
//! limit = 20
//! ```

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::auth::{Credentials, OAuthTokens};
use crate::networking::BaseUrl;
use crate::poi::{BoundingBoxSearch, Coordinates, NameSearch, Pagination, PoiCategory, RadiusSearch};

/// Base URL of a locally running API.
pub const LOCAL_BASE_URL: &str = "http://localhost:8080/api/v1";

/// Base URL of the production API.
pub const PRODUCTION_BASE_URL: &str = "https://api.wayfinder.app/api/v1";

/// Radius used when only a centre point is configured, in metres.
pub const DEFAULT_RADIUS_METRES: f64 = 1_000.0;

/// Errors raised while interpreting configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The `environment` value is not recognised.
    #[error("unknown environment `{value}` (expected `local` or `production`)")]
    UnknownEnvironment {
        /// The rejected value.
        value: String,
    },

    /// The configured base URL is not usable.
    #[error("invalid base URL: {message}")]
    InvalidBaseUrl {
        /// Why the URL was rejected.
        message: String,
    },

    /// A value required by the selected operation is missing.
    #[error("{field} is required for this operation (use --{flag})")]
    MissingValue {
        /// Configuration field name.
        field: &'static str,
        /// Long CLI flag for the field.
        flag: &'static str,
    },

    /// A coordinate is outside its valid range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        /// Configuration field name.
        field: &'static str,
        /// Smallest accepted value.
        min: i16,
        /// Largest accepted value.
        max: i16,
    },

    /// Only one of email and password was supplied.
    #[error("email and password must be supplied together")]
    IncompleteCredentials,
}

/// API deployment to talk to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ApiEnvironment {
    /// A developer machine.
    Local,
    /// The public API.
    #[default]
    Production,
}

impl ApiEnvironment {
    /// Returns the default base URL of the deployment.
    #[must_use]
    pub const fn default_base_url(self) -> &'static str {
        match self {
            Self::Local => LOCAL_BASE_URL,
            Self::Production => PRODUCTION_BASE_URL,
        }
    }

    /// Parses an environment name, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownEnvironment`] for unrecognised names.
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "local" | "development" | "dev" => Ok(Self::Local),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(ConfigError::UnknownEnvironment {
                value: value.to_owned(),
            }),
        }
    }
}

/// Operation selected by the supplied configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationMode {
    /// Fetch one POI by identifier.
    PoiById,
    /// Search by name.
    NameSearch,
    /// Search inside a bounding box.
    BoundingBoxSearch,
    /// Search around a point.
    RadiusSearch,
    /// Sign in only and report the session.
    Login,
}

/// Application configuration supporting CLI, environment, and file sources.
///
/// # Example
///
/// ```no_run
/// use ortho_config::OrthoConfig;
/// use wayfinder::WayfinderConfig;
///
/// let config = WayfinderConfig::load().expect("failed to load configuration");
/// let base_url = config.resolve_base_url().expect("base URL required");
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "WAYFINDER",
    discovery(
        dotfile_name = ".wayfinder.toml",
        config_file_name = "wayfinder.toml",
        app_name = "wayfinder"
    )
)]
pub struct WayfinderConfig {
    /// Deployment to use: `local` or `production` (the default).
    #[ortho_config()]
    pub environment: Option<String>,

    /// API base URL; overrides the environment default.
    #[ortho_config()]
    pub base_url: Option<String>,

    /// Access token to start with instead of signing in.
    #[ortho_config()]
    pub access_token: Option<String>,

    /// Refresh token paired with `access_token`.
    #[ortho_config()]
    pub refresh_token: Option<String>,

    /// Account email used to sign in.
    #[ortho_config()]
    pub email: Option<String>,

    /// Account password used to sign in.
    #[ortho_config()]
    pub password: Option<String>,

    /// Latitude of the radius search centre.
    #[ortho_config()]
    pub latitude: Option<f64>,

    /// Longitude of the radius search centre.
    #[ortho_config()]
    pub longitude: Option<f64>,

    /// Radius of the search, in metres.
    #[ortho_config()]
    pub radius: Option<f64>,

    /// Northern bound of a bounding-box search.
    #[ortho_config()]
    pub north: Option<f64>,

    /// Southern bound of a bounding-box search.
    #[ortho_config()]
    pub south: Option<f64>,

    /// Eastern bound of a bounding-box search.
    #[ortho_config()]
    pub east: Option<f64>,

    /// Western bound of a bounding-box search.
    #[ortho_config()]
    pub west: Option<f64>,

    /// Name to search for.
    #[ortho_config()]
    pub name: Option<String>,

    /// Comma-separated category filter, e.g. `museum,park`.
    #[ortho_config()]
    pub categories: Option<String>,

    /// Maximum number of results.
    #[ortho_config()]
    pub limit: Option<u32>,

    /// Number of results to skip.
    #[ortho_config()]
    pub offset: Option<u32>,

    /// Identifier of a single POI to fetch.
    #[ortho_config()]
    pub poi_id: Option<String>,
}

impl WayfinderConfig {
    /// Resolves the API base URL.
    ///
    /// An explicit `base_url` wins; otherwise the default URL of the
    /// configured environment is used. The environment name is checked in
    /// both cases.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownEnvironment`] or
    /// [`ConfigError::InvalidBaseUrl`].
    pub fn resolve_base_url(&self) -> Result<BaseUrl, ConfigError> {
        let environment = self.api_environment()?;
        let raw = self
            .base_url
            .as_deref()
            .unwrap_or_else(|| environment.default_base_url());
        BaseUrl::parse(raw).map_err(|error| ConfigError::InvalidBaseUrl {
            message: error.to_string(),
        })
    }

    /// Returns the configured deployment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownEnvironment`] for unrecognised names.
    pub fn api_environment(&self) -> Result<ApiEnvironment, ConfigError> {
        self.environment
            .as_deref()
            .map_or_else(|| Ok(ApiEnvironment::default()), ApiEnvironment::parse)
    }

    /// Determines the operation from the values present.
    ///
    /// A POI identifier wins over a name, a name over bounding-box bounds,
    /// and bounds over a radius centre. With none of these the client only
    /// signs in.
    #[must_use]
    pub const fn operation_mode(&self) -> OperationMode {
        if self.poi_id.is_some() {
            OperationMode::PoiById
        } else if self.name.is_some() {
            OperationMode::NameSearch
        } else if self.north.is_some()
            || self.south.is_some()
            || self.east.is_some()
            || self.west.is_some()
        {
            OperationMode::BoundingBoxSearch
        } else if self.latitude.is_some() || self.longitude.is_some() {
            OperationMode::RadiusSearch
        } else {
            OperationMode::Login
        }
    }

    /// Returns the sign-in credentials, if configured.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::IncompleteCredentials`] when only one of email
    /// and password is present.
    pub fn credentials(&self) -> Result<Option<Credentials>, ConfigError> {
        match (&self.email, &self.password) {
            (Some(email), Some(password)) => Ok(Some(Credentials::new(email, password))),
            (None, None) => Ok(None),
            _ => Err(ConfigError::IncompleteCredentials),
        }
    }

    /// Returns preconfigured tokens, if an access token is set.
    #[must_use]
    pub fn initial_tokens(&self) -> Option<OAuthTokens> {
        self.access_token
            .as_ref()
            .map(|access| OAuthTokens::new(access.clone(), self.refresh_token.clone()))
    }

    /// Returns the category filter.
    ///
    /// An unset value means no filter. A value with no names left after
    /// trimming is an explicit empty filter.
    #[must_use]
    pub fn category_filter(&self) -> Option<Vec<PoiCategory>> {
        self.categories.as_deref().map(|names| {
            names
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(PoiCategory::from)
                .collect()
        })
    }

    /// Returns the result window.
    #[must_use]
    pub const fn pagination(&self) -> Pagination {
        Pagination {
            limit: self.limit,
            offset: self.offset,
        }
    }

    /// Returns the POI identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingValue`] when no identifier is set.
    pub fn require_poi_id(&self) -> Result<&str, ConfigError> {
        self.poi_id.as_deref().ok_or(ConfigError::MissingValue {
            field: "poi_id",
            flag: "poi-id",
        })
    }

    /// Builds a radius search.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingValue`] without a full centre point and
    /// [`ConfigError::OutOfRange`] for impossible coordinates.
    pub fn radius_search(&self) -> Result<RadiusSearch, ConfigError> {
        let latitude = latitude_value("latitude", self.latitude)?;
        let longitude = longitude_value("longitude", self.longitude)?;
        Ok(RadiusSearch {
            centre: Coordinates {
                latitude,
                longitude,
            },
            radius: self.radius.unwrap_or(DEFAULT_RADIUS_METRES),
            categories: self.category_filter(),
            pagination: self.pagination(),
        })
    }

    /// Builds a bounding-box search.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingValue`] unless all four bounds are set
    /// and [`ConfigError::OutOfRange`] for impossible coordinates.
    pub fn bounding_box_search(&self) -> Result<BoundingBoxSearch, ConfigError> {
        Ok(BoundingBoxSearch {
            north: latitude_value("north", self.north)?,
            south: latitude_value("south", self.south)?,
            east: longitude_value("east", self.east)?,
            west: longitude_value("west", self.west)?,
            categories: self.category_filter(),
            pagination: self.pagination(),
        })
    }

    /// Builds a name search.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingValue`] when no name is set.
    pub fn name_search(&self) -> Result<NameSearch, ConfigError> {
        let name = self.name.clone().ok_or(ConfigError::MissingValue {
            field: "name",
            flag: "name",
        })?;
        let pagination = self.pagination();
        Ok(NameSearch {
            name,
            categories: self.category_filter(),
            page: (pagination != Pagination::default()).then_some(pagination),
        })
    }
}

fn latitude_value(field: &'static str, value: Option<f64>) -> Result<f64, ConfigError> {
    bounded(field, value, 90)
}

fn longitude_value(field: &'static str, value: Option<f64>) -> Result<f64, ConfigError> {
    bounded(field, value, 180)
}

/// Coordinate fields share their name with their CLI flag.
fn bounded(field: &'static str, value: Option<f64>, limit: i16) -> Result<f64, ConfigError> {
    let present = value.ok_or(ConfigError::MissingValue { field, flag: field })?;
    let range = f64::from(-limit)..=f64::from(limit);
    if range.contains(&present) {
        Ok(present)
    } else {
        Err(ConfigError::OutOfRange {
            field,
            min: -limit,
            max: limit,
        })
    }
}
