//! SQLite-backed listing store.
#![forbid(unsafe_code)]

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};
use campground_core::Listing;
use log::debug;
use rusqlite::{Connection, Transaction};
use serde_json::to_string;

use super::{ListingStore, PersistListingsError};

/// Table receiving listing documents.
pub const LISTINGS_TABLE: &str = "campgrounds";

/// Listing store writing to a SQLite database on disk.
///
/// Each listing becomes one row holding its JSON document plus a few
/// columns duplicated for querying. Rows are append-only.
///
/// # Examples
/// ```no_run
/// use camino::Utf8Path;
/// use campground_data::store::{ListingStore, SqliteListingStore};
///
/// # fn main() -> Result<(), campground_data::store::PersistListingsError> {
/// let mut store = SqliteListingStore::open(Utf8Path::new("data/campgrounds.db"))?;
/// let written = store.insert_many(&[])?;
/// assert_eq!(written, 0);
/// store.close()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct SqliteListingStore {
    connection: Connection,
    path: Utf8PathBuf,
}

impl SqliteListingStore {
    /// Open or create the database at `path`.
    ///
    /// Parent directories are created automatically and the `campgrounds`
    /// table is initialised if missing.
    ///
    /// # Errors
    ///
    /// Returns an error when the directory, database or schema cannot be
    /// prepared.
    pub fn open(path: &Utf8Path) -> Result<Self, PersistListingsError> {
        ensure_parent_dir(path)?;
        let connection =
            Connection::open(path.as_std_path()).map_err(|source| PersistListingsError::Open {
                path: path.to_path_buf(),
                source,
            })?;
        create_schema(&connection)?;
        Ok(Self {
            connection,
            path: path.to_path_buf(),
        })
    }

    /// Location of the database file.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Close the connection, surfacing any error SQLite reports.
    ///
    /// # Errors
    ///
    /// Returns [`PersistListingsError::Close`] when SQLite refuses to close.
    pub fn close(self) -> Result<(), PersistListingsError> {
        let Self { connection, path } = self;
        connection
            .close()
            .map_err(|(_, source)| PersistListingsError::Close { path, source })
    }
}

impl ListingStore for SqliteListingStore {
    fn insert_many(&mut self, listings: &[Listing]) -> Result<usize, PersistListingsError> {
        if listings.is_empty() {
            return Ok(0);
        }

        let transaction = self
            .connection
            .transaction()
            .map_err(|source| PersistListingsError::BeginTransaction { source })?;
        persist_rows(&transaction, listings)?;
        transaction
            .commit()
            .map_err(|source| PersistListingsError::Commit { source })?;

        debug!("committed {} listings to {}", listings.len(), self.path);
        Ok(listings.len())
    }
}

fn ensure_parent_dir(path: &Utf8Path) -> Result<(), PersistListingsError> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    if parent.as_os_str().is_empty() || parent == Utf8Path::new("/") {
        return Ok(());
    }

    let (base_dir, relative) = base_dir_and_relative(parent)?;
    base_dir
        .create_dir_all(&relative)
        .map_err(|source| PersistListingsError::CreateDirectory {
            path: parent.to_path_buf(),
            source,
        })
}

fn base_dir_and_relative(
    parent: &Utf8Path,
) -> Result<(fs_utf8::Dir, Utf8PathBuf), PersistListingsError> {
    let (base, relative) = if parent.is_absolute() {
        ("/", parent.strip_prefix("/").unwrap_or(parent))
    } else {
        (".", parent)
    };

    let dir = fs_utf8::Dir::open_ambient_dir(base, ambient_authority()).map_err(|source| {
        PersistListingsError::CreateDirectory {
            path: parent.to_path_buf(),
            source,
        }
    })?;

    Ok((dir, relative.to_path_buf()))
}

fn create_schema(connection: &Connection) -> Result<(), PersistListingsError> {
    connection
        .execute(
            "CREATE TABLE IF NOT EXISTS campgrounds (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                author TEXT NOT NULL,
                title TEXT NOT NULL,
                location TEXT NOT NULL,
                lon REAL NOT NULL,
                lat REAL NOT NULL,
                document TEXT NOT NULL
            )",
            [],
        )
        .map(|_| ())
        .map_err(|source| PersistListingsError::CreateSchema { source })
}

fn persist_rows(
    transaction: &Transaction<'_>,
    listings: &[Listing],
) -> Result<(), PersistListingsError> {
    let mut statement = transaction
        .prepare(
            "INSERT INTO campgrounds (author, title, location, lon, lat, document)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )
        .map_err(|source| PersistListingsError::PrepareInsert { source })?;

    for (index, listing) in listings.iter().enumerate() {
        let document =
            to_string(listing).map_err(|source| PersistListingsError::SerialiseListing {
                index,
                title: listing.title.clone(),
                source,
            })?;
        statement
            .execute((
                &listing.author,
                &listing.title,
                &listing.location,
                listing.geometry.lon(),
                listing.geometry.lat(),
                document,
            ))
            .map_err(|source| PersistListingsError::PersistRow {
                index,
                title: listing.title.clone(),
                source,
            })?;
    }

    Ok(())
}
