//! In-memory listing store for tests.

use campground_core::Listing;

use super::{ListingStore, PersistListingsError};

/// [`ListingStore`] that keeps listings in a vector.
///
/// Records each batch separately so tests can assert that a run issued a
/// single bulk insert, or none at all.
#[derive(Debug, Clone, Default)]
pub struct MemoryListingStore {
    batches: Vec<Vec<Listing>>,
}

impl MemoryListingStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every listing stored so far, across batches.
    #[must_use]
    pub fn listings(&self) -> Vec<&Listing> {
        self.batches.iter().flatten().collect()
    }

    /// Number of `insert_many` calls that reached the store.
    #[must_use]
    pub fn batch_count(&self) -> usize {
        self.batches.len()
    }
}

impl ListingStore for MemoryListingStore {
    fn insert_many(&mut self, listings: &[Listing]) -> Result<usize, PersistListingsError> {
        self.batches.push(listings.to_vec());
        Ok(listings.len())
    }
}
