//! Fixtures shared by the seed command tests.

use super::*;
use campground_core::{RawCenter, RawElement, Tags};
use std::path::Path;

pub(super) const AUTHOR: &str = "5f1d7e9a0c";

/// Configuration pointing at a database inside `dir`.
pub(super) fn seed_config(dir: &Path) -> SeedConfig {
    let db_path = camino::Utf8PathBuf::from_path_buf(dir.join("campgrounds.db"))
        .expect("utf-8 temp path");
    let args = SeedArgs {
        author_id: Some(AUTHOR.to_owned()),
        db_url: Some(db_path),
        ..SeedArgs::default()
    };
    SeedConfig::try_from(args).expect("complete configuration")
}

/// Three campsites with coordinates and two without.
pub(super) fn mixed_elements() -> Vec<RawElement> {
    vec![
        RawElement::node(
            138.56,
            35.4,
            Tags::from([("name", "Fumotoppara"), ("charge", "1,000 JPY")]),
        ),
        RawElement::way(RawCenter::default(), Tags::from([("name", "No center")])),
        RawElement::way(
            RawCenter {
                lat: Some(36.25),
                lon: Some(137.64),
            },
            Tags::from([("name", "Konashidaira"), ("wikidata", "Q11")]),
        ),
        RawElement {
            kind: Some("relation".into()),
            id: Some(3),
            ..RawElement::default()
        },
        RawElement::node(
            141.35,
            43.06,
            Tags::from([("image", "//upload.example.org/takino.jpg"), ("wikidata", "Q11")]),
        ),
    ]
}

/// Authors and documents stored in the `campgrounds` table, in insertion order.
pub(super) fn stored_rows(path: &camino::Utf8Path) -> Vec<(String, serde_json::Value)> {
    let connection = rusqlite::Connection::open(path.as_std_path()).expect("open database");
    let mut statement = connection
        .prepare("SELECT author, document FROM campgrounds ORDER BY id")
        .expect("prepare select");
    statement
        .query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })
        .expect("query rows")
        .map(|row| {
            let (author, document) = row.expect("read row");
            (
                author,
                serde_json::from_str(&document).expect("decode document"),
            )
        })
        .collect()
}
