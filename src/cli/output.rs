//! Output formatting utilities for CLI operations.

use std::io::{self, Write};

use wayfinder::{AuthSession, Poi};

use super::CliError;

/// Writes a one-line summary of a signed-in session.
///
/// # Errors
///
/// Returns [`CliError::Io`] when the writer fails.
pub fn write_session<W: Write>(writer: &mut W, session: &AuthSession) -> Result<(), CliError> {
    let user = &session.user;
    let name = match (user.first_name.as_deref(), user.last_name.as_deref()) {
        (Some(first), Some(last)) => format!("{first} {last}"),
        (Some(only), None) | (None, Some(only)) => only.to_owned(),
        (None, None) => user.email.clone(),
    };

    writeln!(writer, "Signed in as {name} <{}> (user {})", user.email, user.id)
        .map_err(|e| io_error(&e))
}

/// Writes the details of a single POI.
///
/// # Errors
///
/// Returns [`CliError::Io`] when the writer fails.
pub fn write_poi<W: Write>(writer: &mut W, poi: &Poi) -> Result<(), CliError> {
    writeln!(writer, "{} ({})", poi.name, poi.category).map_err(|e| io_error(&e))?;
    writeln!(writer, "  id: {}", poi.id).map_err(|e| io_error(&e))?;
    writeln!(
        writer,
        "  location: {:.5}, {:.5}",
        poi.coordinates.latitude, poi.coordinates.longitude
    )
    .map_err(|e| io_error(&e))?;

    for picture in &poi.pictures {
        writeln!(writer, "  picture: {picture}").map_err(|e| io_error(&e))?;
    }

    Ok(())
}

/// Writes a list of POIs in the order given.
///
/// # Errors
///
/// Returns [`CliError::Io`] when the writer fails.
pub fn write_pois<W: Write>(writer: &mut W, pois: &[Poi]) -> Result<(), CliError> {
    if pois.is_empty() {
        return writeln!(writer, "No points of interest found.").map_err(|e| io_error(&e));
    }

    writeln!(writer, "Found {} points of interest:", pois.len()).map_err(|e| io_error(&e))?;
    writeln!(writer).map_err(|e| io_error(&e))?;

    for poi in pois {
        writeln!(
            writer,
            "  [{}] {} ({:.5}, {:.5}) id={}",
            poi.category, poi.name, poi.coordinates.latitude, poi.coordinates.longitude, poi.id
        )
        .map_err(|e| io_error(&e))?;
    }

    Ok(())
}

fn io_error(error: &io::Error) -> CliError {
    CliError::Io {
        message: error.to_string(),
    }
}
