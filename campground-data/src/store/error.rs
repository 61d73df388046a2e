use camino::Utf8PathBuf;
use rusqlite::Error as SqliteError;
use thiserror::Error;

/// Errors raised when persisting listings to SQLite.
#[derive(Debug, Error)]
pub enum PersistListingsError {
    /// Failed to create the parent directory for the SQLite database.
    #[error("failed to create parent directory {path:?}")]
    CreateDirectory {
        /// Path of the directory that could not be created.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Opening the SQLite database failed.
    #[error("failed to open SQLite database at {path:?}")]
    Open {
        /// Destination database path.
        path: Utf8PathBuf,
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// Creating the `campgrounds` table failed.
    #[error("failed to create campgrounds table")]
    CreateSchema {
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// Beginning the transaction failed.
    #[error("failed to begin listing persistence transaction")]
    BeginTransaction {
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// Serialising a listing document failed.
    #[error("failed to serialise listing {index} ({title})")]
    SerialiseListing {
        /// Position of the listing within the batch.
        index: usize,
        /// Title of the listing, for diagnostics.
        title: String,
        /// Source error produced by `serde_json`.
        #[source]
        source: serde_json::Error,
    },
    /// Preparing the insert statement failed.
    #[error("failed to prepare listing insert statement")]
    PrepareInsert {
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// Writing a listing row failed.
    #[error("failed to persist listing {index} ({title})")]
    PersistRow {
        /// Position of the listing within the batch.
        index: usize,
        /// Title of the listing, for diagnostics.
        title: String,
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// Committing the transaction failed.
    #[error("failed to commit listing persistence transaction")]
    Commit {
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// Closing the database connection failed.
    #[error("failed to close SQLite database at {path:?}")]
    Close {
        /// Database path.
        path: Utf8PathBuf,
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
}
