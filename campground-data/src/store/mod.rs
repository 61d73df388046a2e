//! Persistence for mapped listings.
//!
//! The importer only ever appends: listings are written in one batch per run
//! and never updated afterwards. [`ListingStore`] captures that contract so
//! the runner can be exercised against [`test_support::MemoryListingStore`].

mod error;
mod sqlite;

#[doc(hidden)]
pub mod test_support;

use campground_core::Listing;

pub use error::PersistListingsError;
pub use sqlite::{LISTINGS_TABLE, SqliteListingStore};

/// Destination for mapped listings.
pub trait ListingStore {
    /// Insert `listings` as one batch, returning how many were written.
    ///
    /// Either every listing is written or none is.
    ///
    /// # Errors
    ///
    /// Returns [`PersistListingsError`] when the batch could not be written.
    fn insert_many(&mut self, listings: &[Listing]) -> Result<usize, PersistListingsError>;
}
