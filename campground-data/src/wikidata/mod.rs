//! Image lookup through Wikidata entity documents.
//!
//! OSM elements often link a Wikidata item instead of carrying an `image`
//! tag. [`EntityImageResolver`] follows that link: it fetches the entity
//! document, reads the first P18 ("image") claim and turns the Commons file
//! name into a scaled `Special:FilePath` URL. Every failure degrades to "no
//! image", and outcomes are cached per entity id for the resolver's lifetime.

mod error;
mod resolver;
mod source;

#[doc(hidden)]
pub mod test_support;

pub use error::EntityLookupError;
pub use resolver::{DEFAULT_COMMONS_BASE_URL, DEFAULT_IMAGE_WIDTH, EntityImageResolver};
pub use source::{DEFAULT_WIKIDATA_BASE_URL, EntitySource, HttpEntitySource, WikidataConfig};

#[cfg(test)]
mod tests;
