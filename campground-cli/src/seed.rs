//! Seed command implementation for the campground CLI.

use camino::{Utf8Path, Utf8PathBuf};
use campground_data::DEFAULT_USER_AGENT;
use campground_data::ingest::map_elements;
use campground_data::overpass::{
    DEFAULT_ENDPOINT, ElementSource, HttpOverpassSource, OverpassConfig,
};
use campground_data::store::{ListingStore, SqliteListingStore};
use campground_data::wikidata::{
    DEFAULT_COMMONS_BASE_URL, DEFAULT_WIKIDATA_BASE_URL, EntityImageResolver, EntitySource,
    HttpEntitySource, WikidataConfig,
};
use clap::Parser;
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::{
    ARG_AUTHOR_ID, ARG_COMMONS_ENDPOINT, ARG_DB_URL, ARG_OVERPASS_ENDPOINT, ARG_USER_AGENT,
    ARG_WIKIDATA_ENDPOINT, CliError, ENV_AUTHOR_ID, ENV_DB_URL,
};

/// Database used when neither `--db-url` nor `DB_URL` is set.
pub(crate) const DEFAULT_DB_PATH: &str = "campgrounds.db";

/// CLI arguments for the `seed` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "seed",
    long_about = "Fetch every campsite in Japan from the Overpass API, enrich \
                 listings with Wikidata images where OSM has none, and insert \
                 them into the listing store in one batch. Values can come \
                 from CLI flags, configuration files, or environment \
                 variables.",
    about = "Import campsites from OpenStreetMap"
)]
#[ortho_config(prefix = "CAMPGROUND")]
pub(crate) struct SeedArgs {
    /// Identifier credited as the author of every imported listing.
    #[arg(long = ARG_AUTHOR_ID, env = ENV_AUTHOR_ID, value_name = "id")]
    #[serde(default)]
    pub(crate) author_id: Option<String>,
    /// Path to the SQLite listing store. `scheme://` connection strings are
    /// rejected.
    #[arg(long = ARG_DB_URL, env = ENV_DB_URL, value_name = "path")]
    #[serde(default)]
    pub(crate) db_url: Option<Utf8PathBuf>,
    /// Overpass interpreter endpoint.
    #[arg(long = ARG_OVERPASS_ENDPOINT, value_name = "url")]
    #[serde(default)]
    pub(crate) overpass_endpoint: Option<String>,
    /// Wikidata site serving `Special:EntityData`.
    #[arg(long = ARG_WIKIDATA_ENDPOINT, value_name = "url")]
    #[serde(default)]
    pub(crate) wikidata_endpoint: Option<String>,
    /// Wikimedia Commons site used in generated image URLs.
    #[arg(long = ARG_COMMONS_ENDPOINT, value_name = "url")]
    #[serde(default)]
    pub(crate) commons_endpoint: Option<String>,
    /// User agent sent with every request.
    #[arg(long = ARG_USER_AGENT, value_name = "agent")]
    #[serde(default)]
    pub(crate) user_agent: Option<String>,
}

impl SeedArgs {
    pub(crate) fn into_config(self) -> Result<SeedConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        SeedConfig::try_from(merged)
    }
}

/// Resolved `seed` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedConfig {
    /// Author credited on every listing.
    pub author_id: String,
    /// SQLite database receiving the listings.
    pub db_path: Utf8PathBuf,
    /// Overpass interpreter endpoint.
    pub overpass_endpoint: String,
    /// Wikidata site base URL.
    pub wikidata_endpoint: String,
    /// Commons site base URL.
    pub commons_endpoint: String,
    /// User agent for outgoing requests.
    pub user_agent: String,
}

impl SeedConfig {
    fn require_http_url(value: String, field: &'static str) -> Result<String, CliError> {
        let parsed = Url::parse(&value).map_err(|source| CliError::InvalidEndpoint {
            field,
            value: value.clone(),
            source,
        })?;
        match parsed.scheme() {
            "http" | "https" => Ok(value),
            _ => Err(CliError::UnsupportedScheme { field, value }),
        }
    }

    /// Reject `scheme://` values such as a document-database connection
    /// string. Only the scheme is echoed back.
    fn require_file_path(path: Utf8PathBuf) -> Result<Utf8PathBuf, CliError> {
        let connection_scheme = path
            .as_str()
            .split_once("://")
            .map(|(scheme, _)| scheme)
            .filter(|scheme| {
                !scheme.is_empty()
                    && scheme
                        .chars()
                        .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '+' | '-' | '.'))
            });
        match connection_scheme {
            Some(scheme) => Err(CliError::UnsupportedDatabaseUrl {
                field: ARG_DB_URL,
                env: ENV_DB_URL,
                scheme: scheme.to_owned(),
            }),
            None => Ok(path),
        }
    }
}

impl TryFrom<SeedArgs> for SeedConfig {
    type Error = CliError;

    fn try_from(args: SeedArgs) -> Result<Self, Self::Error> {
        let author_id = args
            .author_id
            .map(|id| id.trim().to_owned())
            .filter(|id| !id.is_empty())
            .ok_or(CliError::MissingArgument {
                field: ARG_AUTHOR_ID,
                env: ENV_AUTHOR_ID,
            })?;

        let db_path = Self::require_file_path(
            args.db_url
                .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_DB_PATH)),
        )?;

        let overpass_endpoint = Self::require_http_url(
            args.overpass_endpoint
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_owned()),
            ARG_OVERPASS_ENDPOINT,
        )?;
        let wikidata_endpoint = Self::require_http_url(
            args.wikidata_endpoint
                .unwrap_or_else(|| DEFAULT_WIKIDATA_BASE_URL.to_owned()),
            ARG_WIKIDATA_ENDPOINT,
        )?;
        let commons_endpoint = Self::require_http_url(
            args.commons_endpoint
                .unwrap_or_else(|| DEFAULT_COMMONS_BASE_URL.to_owned()),
            ARG_COMMONS_ENDPOINT,
        )?;
        let user_agent = args
            .user_agent
            .filter(|agent| !agent.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_owned());

        Ok(Self {
            author_id,
            db_path,
            overpass_endpoint,
            wikidata_endpoint,
            commons_endpoint,
            user_agent,
        })
    }
}

/// Counts describing a finished import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeedReport {
    /// Elements returned by Overpass.
    pub fetched: usize,
    /// Listings written to the store.
    pub inserted: usize,
    /// Wikidata lookups issued while mapping.
    pub image_lookups: usize,
}

impl SeedReport {
    /// Elements dropped for lacking coordinates.
    #[must_use]
    pub fn dropped(&self) -> usize {
        self.fetched.saturating_sub(self.inserted)
    }
}

pub(crate) async fn run_seed(args: SeedArgs) -> Result<SeedReport, CliError> {
    let config = args.into_config()?;

    let elements = HttpOverpassSource::with_config(
        OverpassConfig::new(config.overpass_endpoint.as_str())
            .with_user_agent(config.user_agent.as_str()),
    )?;
    let entities = HttpEntitySource::with_config(
        WikidataConfig::new(&config.wikidata_endpoint).with_user_agent(config.user_agent.as_str()),
    )?;
    let mut resolver =
        EntityImageResolver::new(entities).with_commons_base_url(&config.commons_endpoint);

    let mut store = open_store(&config.db_path)?;
    let outcome = execute_seed(&config, &elements, &mut resolver, &mut store).await;
    let closed = store.close().map_err(|source| CliError::CloseStore {
        path: config.db_path.clone(),
        source,
    });
    let report = outcome?;
    closed?;
    Ok(report)
}

fn open_store(path: &Utf8Path) -> Result<SqliteListingStore, CliError> {
    SqliteListingStore::open(path).map_err(|source| CliError::OpenStore {
        path: path.to_path_buf(),
        source,
    })
}

/// Fetch, map and store campsites using the supplied collaborators.
///
/// Elements are mapped one at a time in response order. Listings are
/// written with a single `insert_many` call, skipped entirely when nothing
/// survived mapping.
///
/// # Errors
///
/// Returns [`CliError::FetchElements`] when Overpass fails and
/// [`CliError::PersistListings`] when the batch cannot be written.
pub async fn execute_seed<E, S, L>(
    config: &SeedConfig,
    source: &E,
    resolver: &mut EntityImageResolver<S>,
    store: &mut L,
) -> Result<SeedReport, CliError>
where
    E: ElementSource,
    S: EntitySource,
    L: ListingStore,
{
    info!("fetching campsites from {}", source.endpoint());
    let elements = source.fetch_elements().await?;
    info!("fetched {} elements", elements.len());

    let listings = map_elements(&elements, &config.author_id, resolver).await;
    info!("storing {} campgrounds", listings.len());
    let inserted = if listings.is_empty() {
        0
    } else {
        store
            .insert_many(&listings)
            .map_err(CliError::PersistListings)?
    };

    let report = SeedReport {
        fetched: elements.len(),
        inserted,
        image_lookups: resolver.lookups_issued(),
    };
    info!(
        "done: {} stored, {} dropped, {} image lookups",
        report.inserted,
        report.dropped(),
        report.image_lookups
    );
    Ok(report)
}
