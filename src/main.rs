//! Wayfinder CLI entrypoint for POI lookups.

mod cli;

use std::io::{self, Write};
use std::process::ExitCode;

use ortho_config::OrthoConfig;
use tracing_subscriber::EnvFilter;
use wayfinder::{Wayfinder, WayfinderConfig};

use cli::CliError;

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            if writeln!(io::stderr().lock(), "{error}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), CliError> {
    let config = load_config()?;
    let client = Wayfinder::builder(config.resolve_base_url()?).build()?;

    let mut stdout = io::stdout().lock();
    cli::execute(&config, &client, &mut stdout).await
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`CliError::Load`] when ortho-config fails to parse arguments or
/// load configuration files.
fn load_config() -> Result<WayfinderConfig, CliError> {
    WayfinderConfig::load().map_err(|error| CliError::Load {
        message: error.to_string(),
    })
}

/// Logs to stderr, filtered by `RUST_LOG` and defaulting to warnings.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ignored = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}
