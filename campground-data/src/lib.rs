//! Data access and ingestion logic for the campground importer.
//!
//! Responsibilities:
//! - Fetch raw campsite elements from the Overpass API.
//! - Resolve listing images through Wikidata entity documents.
//! - Map raw elements into [`campground_core::Listing`] values.
//! - Persist listings into a SQLite-backed store.
//!
//! Boundaries:
//! - Tag cleaning rules live in `campground-core`.
//! - Network access sits behind the [`overpass::ElementSource`] and
//!   [`wikidata::EntitySource`] traits so callers can substitute stubs.
//!
//! Invariants:
//! - No global mutable state; caches are owned by the values using them.
//! - Requests are issued one at a time and never retried.

pub mod http;
pub mod ingest;
pub mod overpass;
pub mod store;
pub mod wikidata;

#[doc(hidden)]
pub mod test_support;

pub use http::{DEFAULT_USER_AGENT, ProviderBuildError};
pub use ingest::{map_element, map_elements};
pub use overpass::{ElementSource, HttpOverpassSource, OverpassError};
pub use store::{ListingStore, PersistListingsError, SqliteListingStore};
pub use wikidata::{EntityImageResolver, EntitySource, HttpEntitySource};
