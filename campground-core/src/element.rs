//! Raw elements as returned by the Overpass API.
//!
//! Overpass answers with nodes, ways and relations. Nodes carry their own
//! `lat`/`lon`; ways and relations queried with `out center` carry a nested
//! `center` instead. Nothing about the tag set is guaranteed, so every field
//! is optional and tag values are kept as loosely typed JSON.

use std::collections::BTreeMap;

use geo::Coord;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Free-form OpenStreetMap tags attached to an element.
///
/// # Examples
/// ```
/// use campground_core::Tags;
///
/// let tags = Tags::from([("name", "Lakeside"), ("fee", "")]);
///
/// assert_eq!(tags.text("name"), Some("Lakeside"));
/// assert_eq!(tags.text("fee"), None);
/// assert_eq!(tags.first_text(&["fee", "name"]), Some("Lakeside"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tags(BTreeMap<String, Value>);

impl Tags {
    /// Construct an empty tag map.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Return the value stored under `key` when it is a non-empty string.
    ///
    /// Missing keys, empty strings and non-string values all read as absent.
    #[must_use]
    pub fn text(&self, key: &str) -> Option<&str> {
        match self.0.get(key)? {
            Value::String(value) if !value.is_empty() => Some(value.as_str()),
            _ => None,
        }
    }

    /// Return the first textual value among `keys`, in order.
    #[must_use]
    pub fn first_text(&self, keys: &[&str]) -> Option<&str> {
        keys.iter().find_map(|key| self.text(key))
    }

    /// Insert a tag, returning the previous value if one was present.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Number of tags, including non-textual ones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the element carries no tags at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for Tags
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from(entries: [(K, V); N]) -> Self {
        Self(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

/// Center point reported for ways and relations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RawCenter {
    /// Latitude in degrees.
    pub lat: Option<f64>,
    /// Longitude in degrees.
    pub lon: Option<f64>,
}

/// One element of an Overpass response.
///
/// # Examples
/// ```
/// use campground_core::RawElement;
///
/// let element: RawElement = serde_json::from_str(
///     r#"{"type":"way","id":7,"center":{"lat":35.5,"lon":138.7},"tags":{"name":"Fuji"}}"#,
/// )?;
/// let coordinate = element.coordinate().expect("center supplies coordinates");
///
/// assert_eq!((coordinate.x, coordinate.y), (138.7, 35.5));
/// assert_eq!(element.tags.text("name"), Some("Fuji"));
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawElement {
    /// Element kind (`node`, `way` or `relation`).
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// OpenStreetMap identifier, unique per kind.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// Latitude for nodes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    /// Longitude for nodes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lon: Option<f64>,
    /// Center point for ways and relations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center: Option<RawCenter>,
    /// Free-form tags; `null` and missing both read as empty.
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Tags,
}

impl RawElement {
    /// Construct a node positioned at `lon`/`lat` with the supplied tags.
    #[must_use]
    pub fn node(lon: f64, lat: f64, tags: Tags) -> Self {
        Self {
            kind: Some("node".to_owned()),
            lat: Some(lat),
            lon: Some(lon),
            tags,
            ..Self::default()
        }
    }

    /// Construct a way whose position is only known through its center.
    #[must_use]
    pub fn way(center: RawCenter, tags: Tags) -> Self {
        Self {
            kind: Some("way".to_owned()),
            center: Some(center),
            tags,
            ..Self::default()
        }
    }

    /// Resolve the element position.
    ///
    /// Longitude and latitude are each taken from the element itself first
    /// and from its center second. Returns `None` unless both are known.
    #[must_use]
    pub fn coordinate(&self) -> Option<Coord<f64>> {
        let lon = self.lon.or_else(|| self.center.and_then(|center| center.lon))?;
        let lat = self.lat.or_else(|| self.center.and_then(|center| center.lat))?;
        Some(Coord { x: lon, y: lat })
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
