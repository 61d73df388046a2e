//! Location fallback chain.

use campground_core::{DEFAULT_LOCATION, Tags};

type LocationCandidate = fn(&Tags) -> Option<String>;

const ADDRESS_PARTS: [&str; 4] = ["addr:province", "addr:city", "addr:suburb", "addr:street"];

/// Candidates in priority order; the first to produce a value wins.
const LOCATION_CHAIN: [LocationCandidate; 3] = [full_address, joined_address, name];

/// Derive a human-readable location for a campsite.
pub(crate) fn derive_location(tags: &Tags) -> String {
    LOCATION_CHAIN
        .iter()
        .find_map(|candidate| candidate(tags))
        .unwrap_or_else(|| DEFAULT_LOCATION.to_owned())
}

fn full_address(tags: &Tags) -> Option<String> {
    tags.text("addr:full").map(str::to_owned)
}

fn joined_address(tags: &Tags) -> Option<String> {
    let parts: Vec<&str> = ADDRESS_PARTS
        .iter()
        .filter_map(|key| tags.text(key))
        .collect();
    (!parts.is_empty()).then(|| parts.join(" "))
}

fn name(tags: &Tags) -> Option<String> {
    tags.text("name").map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Tags::from([("addr:full", "長野県松本市安曇4468"), ("addr:city", "松本市"), ("name", "小梨平")]), "長野県松本市安曇4468")]
    #[case(Tags::from([("addr:province", "北海道"), ("addr:city", "札幌市"), ("addr:street", "南区"), ("name", "Moiwa")]), "北海道 札幌市 南区")]
    #[case(Tags::from([("addr:city", "富士河口湖町"), ("addr:suburb", "")]), "富士河口湖町")]
    #[case(Tags::from([("addr:full", ""), ("name", "Lakeside")]), "Lakeside")]
    #[case(Tags::new(), "日本")]
    fn follows_fallback_chain(#[case] tags: Tags, #[case] expected: &str) {
        assert_eq!(derive_location(&tags), expected);
    }
}
