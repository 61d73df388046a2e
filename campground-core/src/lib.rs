//! Core domain types for the campground importer.
//!
//! Raw OpenStreetMap elements arrive as [`RawElement`] values carrying
//! free-form [`Tags`]. The importer turns each usable element into a
//! [`Listing`], the document persisted by the campground store. The helpers in
//! [`normalise`] clean the loosely formatted tag values on the way through.
//!
//! Coordinates follow the WGS84 convention used by `geo`: `x = longitude`,
//! `y = latitude`.

#![forbid(unsafe_code)]

pub mod element;
pub mod listing;
pub mod normalise;

pub use element::{RawCenter, RawElement, Tags};
pub use listing::{
    DEFAULT_DESCRIPTION, DEFAULT_LOCATION, DEFAULT_TITLE, ImageRef, Listing, PointGeometry,
};
pub use normalise::{normalise_image_url, normalise_website_url, parse_price};
