//! Campsite retrieval from the Overpass API.
//!
//! [`HttpOverpassSource`] posts a fixed query selecting every
//! `tourism=camp_site` node, way and relation inside Japan and decodes the
//! `elements` array of the JSON answer. Callers depend on the
//! [`ElementSource`] trait so tests can swap in [`test_support`] stubs.
//!
//! # Example
//!
//! ```no_run
//! use campground_data::overpass::{ElementSource, HttpOverpassSource};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let source = HttpOverpassSource::new("https://overpass-api.de/api/interpreter")?;
//! let elements = source.fetch_elements().await?;
//! println!("{} campsites", elements.len());
//! # Ok(())
//! # }
//! ```

mod error;
mod source;

#[doc(hidden)]
pub mod test_support;

pub use error::OverpassError;
pub use source::{
    CAMP_SITE_QUERY, DEFAULT_ENDPOINT, ElementSource, HttpOverpassSource, OverpassConfig,
    decode_elements,
};
