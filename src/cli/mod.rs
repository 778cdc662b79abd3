//! Operation handlers for the command-line client.
//!
//! [`execute`] seeds the token store, signs in when credentials are
//! configured, and dispatches to [`search`] for the selected operation.
//! Output formatting lives in [`output`].

pub mod output;

use std::io::Write;

use thiserror::Error;
use wayfinder::{
    AuthRepository, ConfigError, NetworkingError, OperationMode, PoiRepository, TokenStoreError,
    Wayfinder, WayfinderConfig,
};

/// Failures reported by the command-line client.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration sources could not be read.
    #[error("configuration could not be loaded: {message}")]
    Load {
        /// Loader message.
        message: String,
    },

    /// Configuration values are invalid for the requested operation.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A request failed.
    #[error(transparent)]
    Networking(#[from] NetworkingError),

    /// Preconfigured tokens could not be stored.
    #[error(transparent)]
    TokenStore(#[from] TokenStoreError),

    /// Neither credentials nor a search were supplied.
    #[error("nothing to do: supply --email and --password, or a search (see --help)")]
    NothingToDo,

    /// Output could not be written.
    #[error("failed to write output: {message}")]
    Io {
        /// Writer message.
        message: String,
    },
}

/// Runs the operation selected by `config` against `client`.
///
/// # Errors
///
/// Returns [`CliError`] when configuration is incomplete, a request fails,
/// or output cannot be written.
pub async fn execute<W: Write>(
    config: &WayfinderConfig,
    client: &Wayfinder,
    writer: &mut W,
) -> Result<(), CliError> {
    if let Some(tokens) = config.initial_tokens() {
        client.token_store().save_tokens(&tokens)?;
    }

    let session = match config.credentials()? {
        Some(credentials) => Some(client.auth().login(&credentials).await?),
        None => None,
    };

    if config.operation_mode() == OperationMode::Login {
        let Some(signed_in) = session else {
            return Err(CliError::NothingToDo);
        };
        return output::write_session(writer, &signed_in);
    }

    search(config, &client.pois(), writer).await
}

/// Runs the POI operation selected by `config` and writes the result.
///
/// # Errors
///
/// Returns [`CliError`] when the search cannot be built, the request fails,
/// or output cannot be written.
pub async fn search<W: Write>(
    config: &WayfinderConfig,
    pois: &dyn PoiRepository,
    writer: &mut W,
) -> Result<(), CliError> {
    match config.operation_mode() {
        OperationMode::PoiById => {
            let poi = pois.poi(config.require_poi_id()?).await?;
            output::write_poi(writer, &poi)
        }
        OperationMode::NameSearch => {
            let found = pois.search_by_name(&config.name_search()?).await?;
            output::write_pois(writer, &found)
        }
        OperationMode::BoundingBoxSearch => {
            let found = pois
                .search_by_bounding_box(&config.bounding_box_search()?)
                .await?;
            output::write_pois(writer, &found)
        }
        OperationMode::RadiusSearch => {
            let found = pois.search_by_radius(&config.radius_search()?).await?;
            output::write_pois(writer, &found)
        }
        OperationMode::Login => Err(CliError::NothingToDo),
    }
}
