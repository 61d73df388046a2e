//! Mapping raw Overpass elements onto campground listings.
//!
//! Each element is examined independently. Elements without a usable
//! position are dropped; every other field falls back to a default or is
//! omitted, so mapping never fails. When an element carries no `image` tag
//! but links a Wikidata item, the resolver is consulted for a picture.

mod location;

use campground_core::{
    DEFAULT_DESCRIPTION, DEFAULT_TITLE, ImageRef, Listing, PointGeometry, RawElement,
    normalise_image_url, normalise_website_url, parse_price,
};
use log::debug;

use crate::wikidata::{EntityImageResolver, EntitySource};

use self::location::derive_location;

const PRICE_KEYS: [&str; 2] = ["charge", "fee"];
const WEBSITE_KEYS: [&str; 3] = ["website", "url", "official_website"];

/// Map one element into a listing credited to `author`.
///
/// Returns `None` when the element lacks a longitude or latitude, either
/// directly or through its center.
///
/// # Examples
/// ```
/// use campground_core::{RawElement, Tags};
/// use campground_data::ingest::map_element;
/// use campground_data::test_support::block_on_for_tests;
/// use campground_data::wikidata::EntityImageResolver;
/// use campground_data::wikidata::test_support::StubEntitySource;
///
/// let mut resolver = EntityImageResolver::new(StubEntitySource::new());
/// let element = RawElement::node(138.5, 35.4, Tags::from([("name", "Fumotoppara"), ("fee", "1,000円")]));
///
/// let listing = block_on_for_tests(map_element(&element, "author-1", &mut resolver))
///     .expect("node has coordinates");
///
/// assert_eq!(listing.title, "Fumotoppara");
/// assert_eq!(listing.price, Some(1000.0));
/// assert_eq!(listing.geometry.coordinates, [138.5, 35.4]);
/// ```
pub async fn map_element<S: EntitySource>(
    element: &RawElement,
    author: &str,
    resolver: &mut EntityImageResolver<S>,
) -> Option<Listing> {
    let Some(coordinate) = element.coordinate() else {
        debug!(
            "dropping {} {} without coordinates",
            element.kind.as_deref().unwrap_or("element"),
            element
                .id
                .map_or_else(|| "(no id)".to_owned(), |id| id.to_string())
        );
        return None;
    };
    let tags = &element.tags;

    let image = match normalise_image_url(tags.text("image")) {
        Some(url) => Some(url),
        None => match tags.text("wikidata") {
            Some(entity_id) => resolver.resolve_image(entity_id).await,
            None => None,
        },
    };

    Some(Listing {
        author: author.to_owned(),
        location: derive_location(tags),
        title: tags.text("name").unwrap_or(DEFAULT_TITLE).to_owned(),
        description: tags
            .text("description")
            .unwrap_or(DEFAULT_DESCRIPTION)
            .to_owned(),
        geometry: PointGeometry::from(coordinate),
        price: tags.first_text(&PRICE_KEYS).and_then(parse_price),
        images: image.map(ImageRef::new).into_iter().collect(),
        website: normalise_website_url(tags.first_text(&WEBSITE_KEYS)),
    })
}

/// Map `elements` in order, awaiting each element before the next.
///
/// Elements without coordinates are skipped; the relative order of the
/// remaining listings is preserved.
pub async fn map_elements<S: EntitySource>(
    elements: &[RawElement],
    author: &str,
    resolver: &mut EntityImageResolver<S>,
) -> Vec<Listing> {
    let mut listings = Vec::with_capacity(elements.len());
    for element in elements {
        if let Some(listing) = map_element(element, author, resolver).await {
            listings.push(listing);
        }
    }
    listings
}
