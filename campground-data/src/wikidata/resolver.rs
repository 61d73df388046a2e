use std::collections::HashMap;

use log::debug;
use serde_json::Value;

use super::EntitySource;
use crate::http::trim_base_url;

/// Public Wikimedia Commons site.
pub const DEFAULT_COMMONS_BASE_URL: &str = "https://commons.wikimedia.org";

/// Width requested from `Special:FilePath` thumbnails.
pub const DEFAULT_IMAGE_WIDTH: u32 = 1200;

const IMAGE_PROPERTY: &str = "P18";

/// Resolves Wikidata ids to Commons image URLs, caching every outcome.
///
/// The cache lives as long as the resolver, so one resolver per import run
/// gives run-scoped caching. Misses are cached too.
///
/// # Examples
/// ```
/// use campground_data::test_support::block_on_for_tests;
/// use campground_data::wikidata::EntityImageResolver;
/// use campground_data::wikidata::test_support::StubEntitySource;
///
/// let source = StubEntitySource::new().with_image("Q1", "Camp site.jpg");
/// let mut resolver = EntityImageResolver::new(source);
///
/// let first = block_on_for_tests(resolver.resolve_image("Q1"));
/// let second = block_on_for_tests(resolver.resolve_image("Q1"));
///
/// assert_eq!(
///     first.as_deref(),
///     Some("https://commons.wikimedia.org/wiki/Special:FilePath/Camp%20site.jpg?width=1200"),
/// );
/// assert_eq!(first, second);
/// assert_eq!(resolver.lookups_issued(), 1);
/// ```
#[derive(Debug)]
pub struct EntityImageResolver<S> {
    source: S,
    commons_base_url: String,
    width: u32,
    cache: HashMap<String, Option<String>>,
    lookups: usize,
}

impl<S: EntitySource> EntityImageResolver<S> {
    /// Create a resolver over `source` with an empty cache.
    #[must_use]
    pub fn new(source: S) -> Self {
        Self {
            source,
            commons_base_url: DEFAULT_COMMONS_BASE_URL.to_owned(),
            width: DEFAULT_IMAGE_WIDTH,
            cache: HashMap::new(),
            lookups: 0,
        }
    }

    /// Point generated image URLs at another Commons mirror.
    #[must_use]
    pub fn with_commons_base_url(mut self, base_url: impl AsRef<str>) -> Self {
        self.commons_base_url = trim_base_url(base_url.as_ref());
        self
    }

    /// Override the requested thumbnail width.
    #[must_use]
    pub const fn with_width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    /// Resolve the image for `entity_id`.
    ///
    /// Blank ids return `None` without a lookup. Otherwise the first call
    /// per id consults the source and later calls reuse the cached outcome.
    /// Lookup failures and entities without an image claim both yield
    /// `None`.
    pub async fn resolve_image(&mut self, entity_id: &str) -> Option<String> {
        let id = entity_id.trim();
        if id.is_empty() {
            return None;
        }
        if let Some(cached) = self.cache.get(id) {
            return cached.clone();
        }

        self.lookups += 1;
        let resolved = match self.source.fetch_entity(id).await {
            Ok(document) => {
                let file = image_file_name(&document, id);
                if file.is_none() {
                    debug!("entity {id} has no {IMAGE_PROPERTY} image claim");
                }
                file.map(|name| self.file_path_url(name))
            }
            Err(err) => {
                debug!("image lookup for {id} failed: {err}");
                None
            }
        };
        self.cache.insert(id.to_owned(), resolved.clone());
        resolved
    }

    /// Number of lookups sent to the source so far.
    #[must_use]
    pub const fn lookups_issued(&self) -> usize {
        self.lookups
    }

    /// Borrow the underlying source.
    #[must_use]
    pub const fn source(&self) -> &S {
        &self.source
    }

    fn file_path_url(&self, file_name: &str) -> String {
        format!(
            "{}/wiki/Special:FilePath/{}?width={}",
            self.commons_base_url,
            urlencoding::encode(file_name),
            self.width
        )
    }
}

/// Read `entities.<id>.claims.P18[0].mainsnak.datavalue.value`.
fn image_file_name<'a>(document: &'a Value, entity_id: &str) -> Option<&'a str> {
    document
        .get("entities")?
        .get(entity_id)?
        .get("claims")?
        .get(IMAGE_PROPERTY)?
        .get(0)?
        .get("mainsnak")?
        .get("datavalue")?
        .get("value")?
        .as_str()
        .filter(|name| !name.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn reads_first_image_claim() {
        let document = json!({
            "entities": {"Q5": {"claims": {"P18": [
                {"mainsnak": {"datavalue": {"value": "First.jpg"}}},
                {"mainsnak": {"datavalue": {"value": "Second.jpg"}}}
            ]}}}
        });
        assert_eq!(image_file_name(&document, "Q5"), Some("First.jpg"));
    }

    #[rstest]
    #[case(json!({}))]
    #[case(json!({"entities": {}}))]
    #[case(json!({"entities": {"Q5": {"claims": []}}}))]
    #[case(json!({"entities": {"Q5": {"claims": {"P18": []}}}}))]
    #[case(json!({"entities": {"Q5": {"claims": {"P18": [{"mainsnak": {"snaktype": "novalue"}}]}}}}))]
    #[case(json!({"entities": {"Q5": {"claims": {"P18": [{"mainsnak": {"datavalue": {"value": 4}}}]}}}}))]
    #[case(json!({"entities": {"Q6": {"claims": {"P18": [{"mainsnak": {"datavalue": {"value": "Other.jpg"}}}]}}}}))]
    fn missing_claim_paths_yield_none(#[case] document: Value) {
        assert_eq!(image_file_name(&document, "Q5"), None);
    }
}
