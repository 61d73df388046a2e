//! Normalised campground listings.

use geo::Coord;
use serde::{Deserialize, Serialize};

/// Title used when an element has no `name` tag.
pub const DEFAULT_TITLE: &str = "キャンプ場";

/// Location used when neither an address nor a name is available.
pub const DEFAULT_LOCATION: &str = "日本";

/// Description recorded for elements without a `description` tag.
pub const DEFAULT_DESCRIPTION: &str = "オープンデータから取り込んだキャンプ場です。";

/// A campground record ready to be stored.
///
/// Optional fields are omitted from the serialised document rather than
/// written as `null`; an empty `images` list is omitted as well.
///
/// # Examples
/// ```
/// use campground_core::{Listing, PointGeometry};
///
/// let listing = Listing {
///     author: "5f0c1d".into(),
///     location: "北海道 札幌市".into(),
///     title: "Moiwa".into(),
///     description: "Forest pitches".into(),
///     geometry: PointGeometry::new(141.3, 43.0),
///     price: None,
///     images: Vec::new(),
///     website: None,
/// };
/// let document = serde_json::to_value(&listing)?;
///
/// assert_eq!(document["geometry"]["type"], "Point");
/// assert!(document.get("images").is_none());
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    /// Identifier of the user credited with the listing.
    pub author: String,
    /// Human-readable location.
    pub location: String,
    /// Display name.
    pub title: String,
    /// Free-text description.
    pub description: String,
    /// Position of the campground.
    pub geometry: PointGeometry,
    /// Nightly price, when the source states one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    /// Images in display order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<ImageRef>,
    /// Absolute URL of the campground website.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

/// Reference to an image hosted elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    /// Absolute image URL.
    pub url: String,
}

impl ImageRef {
    /// Wrap an image URL.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

/// GeoJSON point geometry, serialised as `{"type":"Point","coordinates":[lon,lat]}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "Point")]
pub struct PointGeometry {
    /// `[longitude, latitude]` in degrees.
    pub coordinates: [f64; 2],
}

impl PointGeometry {
    /// Construct a point from longitude and latitude.
    #[must_use]
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self {
            coordinates: [lon, lat],
        }
    }

    /// Longitude in degrees.
    #[must_use]
    pub const fn lon(&self) -> f64 {
        let [lon, _] = self.coordinates;
        lon
    }

    /// Latitude in degrees.
    #[must_use]
    pub const fn lat(&self) -> f64 {
        let [_, lat] = self.coordinates;
        lat
    }
}

impl From<Coord<f64>> for PointGeometry {
    fn from(coord: Coord<f64>) -> Self {
        Self::new(coord.x, coord.y)
    }
}

impl From<PointGeometry> for Coord<f64> {
    fn from(point: PointGeometry) -> Self {
        Self {
            x: point.lon(),
            y: point.lat(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use serde_json::json;

    #[fixture]
    fn listing() -> Listing {
        Listing {
            author: "author-1".into(),
            location: "長野県".into(),
            title: "Kamikochi".into(),
            description: DEFAULT_DESCRIPTION.into(),
            geometry: PointGeometry::new(137.6, 36.2),
            price: Some(800.0),
            images: vec![ImageRef::new("https://example.org/a.jpg")],
            website: Some("https://example.org".into()),
        }
    }

    #[rstest]
    fn serialises_geojson_point(listing: Listing) {
        let document = serde_json::to_value(&listing).expect("serialise listing");
        assert_eq!(
            document["geometry"],
            json!({"type": "Point", "coordinates": [137.6, 36.2]})
        );
        assert_eq!(document["images"], json!([{"url": "https://example.org/a.jpg"}]));
        assert_eq!(document["price"], json!(800.0));
    }

    #[rstest]
    fn omits_absent_optional_fields(mut listing: Listing) {
        listing.price = None;
        listing.images.clear();
        listing.website = None;
        let document = serde_json::to_value(&listing).expect("serialise listing");
        let object = document.as_object().expect("listing is an object");
        assert!(!object.contains_key("price"));
        assert!(!object.contains_key("images"));
        assert!(!object.contains_key("website"));
    }

    #[rstest]
    fn geometry_converts_to_and_from_coord() {
        let point = PointGeometry::from(Coord { x: 139.7, y: 35.6 });
        assert_eq!(point.coordinates, [139.7, 35.6]);
        assert_eq!(Coord::from(point), Coord { x: 139.7, y: 35.6 });
    }

    #[rstest]
    fn listing_round_trips_through_json(listing: Listing) {
        let encoded = serde_json::to_string(&listing).expect("serialise listing");
        let decoded: Listing = serde_json::from_str(&encoded).expect("decode listing");
        assert_eq!(decoded, listing);
    }
}
