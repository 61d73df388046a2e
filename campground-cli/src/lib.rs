//! Command-line interface for the campground seed importer.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod seed;

pub use error::CliError;
pub use seed::{SeedConfig, SeedReport, execute_seed};

use seed::{SeedArgs, run_seed};

const ARG_AUTHOR_ID: &str = "author-id";
const ARG_DB_URL: &str = "db-url";
const ARG_OVERPASS_ENDPOINT: &str = "overpass-endpoint";
const ARG_WIKIDATA_ENDPOINT: &str = "wikidata-endpoint";
const ARG_COMMONS_ENDPOINT: &str = "commons-endpoint";
const ARG_USER_AGENT: &str = "user-agent";
const ENV_AUTHOR_ID: &str = "SEED_AUTHOR_ID";
const ENV_DB_URL: &str = "DB_URL";

/// Run the campground CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns [`CliError`] when arguments are invalid, configuration is
/// incomplete, or any stage of the import fails.
pub async fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Seed(args) => {
            run_seed(args).await?;
        }
    }
    Ok(())
}

#[derive(Debug, Parser)]
#[command(
    name = "campground",
    about = "Seed the campground listing store from open data",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Import campsites in Japan from OpenStreetMap.
    Seed(SeedArgs),
}

#[cfg(test)]
mod tests;
