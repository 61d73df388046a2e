//! Facade crate for the campground importer.
//!
//! This crate re-exports the listing model, the tag normalisers and the data
//! adapters used to seed a campground store from OpenStreetMap.

#![forbid(unsafe_code)]

pub use campground_core::{
    ImageRef, Listing, PointGeometry, RawCenter, RawElement, Tags, normalise_image_url,
    normalise_website_url, parse_price,
};

pub use campground_data::ingest::{map_element, map_elements};
pub use campground_data::overpass::{ElementSource, HttpOverpassSource, OverpassError};
pub use campground_data::store::{ListingStore, PersistListingsError, SqliteListingStore};
pub use campground_data::wikidata::{EntityImageResolver, EntitySource, HttpEntitySource};
