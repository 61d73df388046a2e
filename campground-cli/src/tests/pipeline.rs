//! Pipeline tests covering the seed command flow with stubbed sources.

use super::helpers::{AUTHOR, mixed_elements, seed_config, stored_rows};
use super::*;
use campground_data::overpass::test_support::StubElementSource;
use campground_data::store::SqliteListingStore;
use campground_data::store::test_support::MemoryListingStore;
use campground_data::test_support::block_on_for_tests;
use campground_data::wikidata::EntityImageResolver;
use campground_data::wikidata::test_support::StubEntitySource;
use rstest::{fixture, rstest};
use tempfile::TempDir;

#[fixture]
fn workspace() -> TempDir {
    TempDir::new().expect("temp dir")
}

#[fixture]
fn resolver() -> EntityImageResolver<StubEntitySource> {
    EntityImageResolver::new(StubEntitySource::new().with_image("Q11", "Konashidaira.jpg"))
}

#[rstest]
fn stores_every_element_with_coordinates(
    workspace: TempDir,
    mut resolver: EntityImageResolver<StubEntitySource>,
) {
    let config = seed_config(workspace.path());
    let source = StubElementSource::with_elements(mixed_elements());
    let mut store = SqliteListingStore::open(&config.db_path).expect("open store");

    let report = block_on_for_tests(execute_seed(&config, &source, &mut resolver, &mut store))
        .expect("seed succeeds");
    store.close().expect("close store");

    assert_eq!(report.fetched, 5);
    assert_eq!(report.inserted, 3);
    assert_eq!(report.dropped(), 2);
    assert_eq!(report.image_lookups, 1);

    let rows = stored_rows(&config.db_path);
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|(author, document)| {
        author == AUTHOR && document["author"] == AUTHOR
    }));
    let titles: Vec<&str> = rows
        .iter()
        .map(|(_, document)| document["title"].as_str().expect("title is a string"))
        .collect();
    assert_eq!(titles, ["Fumotoppara", "Konashidaira", "キャンプ場"]);
    assert_eq!(rows[0].1["price"], 1000.0);
    assert_eq!(
        rows[1].1["images"][0]["url"],
        "https://commons.wikimedia.org/wiki/Special:FilePath/Konashidaira.jpg?width=1200"
    );
    assert_eq!(
        rows[2].1["images"][0]["url"],
        "https://upload.example.org/takino.jpg"
    );
}

#[rstest]
fn zero_listings_skip_the_insert(
    workspace: TempDir,
    mut resolver: EntityImageResolver<StubEntitySource>,
) {
    let config = seed_config(workspace.path());
    let source = StubElementSource::with_elements(Vec::new());
    let mut store = MemoryListingStore::new();

    let report = block_on_for_tests(execute_seed(&config, &source, &mut resolver, &mut store))
        .expect("empty runs succeed");

    assert_eq!(report, SeedReport::default());
    assert_eq!(store.batch_count(), 0);
}

#[rstest]
fn listings_are_inserted_in_one_batch(
    workspace: TempDir,
    mut resolver: EntityImageResolver<StubEntitySource>,
) {
    let config = seed_config(workspace.path());
    let source = StubElementSource::with_elements(mixed_elements());
    let mut store = MemoryListingStore::new();

    block_on_for_tests(execute_seed(&config, &source, &mut resolver, &mut store))
        .expect("seed succeeds");

    assert_eq!(store.batch_count(), 1);
    assert_eq!(store.listings().len(), 3);
    assert_eq!(source.calls(), 1);
}

#[rstest]
fn fetch_failures_abort_before_storing(
    workspace: TempDir,
    mut resolver: EntityImageResolver<StubEntitySource>,
) {
    let config = seed_config(workspace.path());
    let source = StubElementSource::with_status(504, "gateway timeout");
    let mut store = MemoryListingStore::new();

    let err = block_on_for_tests(execute_seed(&config, &source, &mut resolver, &mut store))
        .expect_err("fetch failure should propagate");

    match err {
        CliError::FetchElements(inner) => {
            let message = inner.to_string();
            assert!(message.contains("504"), "unexpected message {message}");
            assert!(message.contains("gateway timeout"), "unexpected message {message}");
        }
        other => panic!("expected FetchElements, found {other:?}"),
    }
    assert_eq!(store.batch_count(), 0);
    assert_eq!(resolver.lookups_issued(), 0);
}
