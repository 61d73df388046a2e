//! Error types emitted by the campground CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use campground_data::ProviderBuildError;
use campground_data::overpass::OverpassError;
use campground_data::store::PersistListingsError;
use thiserror::Error;

/// Errors emitted by the campground CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        field: &'static str,
        env: &'static str,
    },
    /// An endpoint override is not an absolute URL.
    #[error("{field} value {value:?} is not a valid URL: {source}")]
    InvalidEndpoint {
        field: &'static str,
        value: String,
        #[source]
        source: url::ParseError,
    },
    /// An endpoint override uses a scheme other than HTTP(S).
    #[error("{field} value {value:?} must use http or https")]
    UnsupportedScheme { field: &'static str, value: String },
    /// The database setting holds a connection string rather than a file path.
    #[error(
        "{field} must be a SQLite file path, not a {scheme}:// connection string (set --{field} or {env})"
    )]
    UnsupportedDatabaseUrl {
        field: &'static str,
        env: &'static str,
        scheme: String,
    },
    /// Building an HTTP client failed.
    #[error(transparent)]
    BuildHttpClient(#[from] ProviderBuildError),
    /// Fetching campsite elements from Overpass failed.
    #[error("failed to fetch campsites: {0}")]
    FetchElements(#[from] OverpassError),
    /// Opening the listing store failed.
    #[error("failed to open listing store at {path:?}: {source}")]
    OpenStore {
        path: Utf8PathBuf,
        #[source]
        source: PersistListingsError,
    },
    /// Writing listings to the store failed.
    #[error("failed to store listings: {0}")]
    PersistListings(#[source] PersistListingsError),
    /// Closing the listing store failed.
    #[error("failed to close listing store at {path:?}: {source}")]
    CloseStore {
        path: Utf8PathBuf,
        #[source]
        source: PersistListingsError,
    },
}
