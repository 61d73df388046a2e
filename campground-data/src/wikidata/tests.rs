use super::test_support::StubEntitySource;
use super::*;
use crate::test_support::{OneShotServer, block_on_for_tests};
use rstest::{fixture, rstest};
use serde_json::json;

fn loopback_source(base_url: String) -> HttpEntitySource {
    HttpEntitySource::with_config(WikidataConfig::new(base_url).with_system_proxy(false))
        .expect("build source")
}

#[fixture]
fn resolver() -> EntityImageResolver<StubEntitySource> {
    EntityImageResolver::new(
        StubEntitySource::new()
            .with_image("Q100", "Lake Motosu.jpg")
            .with_status("Q500", 500)
            .with_document("Q200", json!({"entities": {"Q200": {"claims": []}}})),
    )
}

#[rstest]
fn builds_file_path_url(mut resolver: EntityImageResolver<StubEntitySource>) {
    let url = block_on_for_tests(resolver.resolve_image("Q100"));
    assert_eq!(
        url.as_deref(),
        Some("https://commons.wikimedia.org/wiki/Special:FilePath/Lake%20Motosu.jpg?width=1200")
    );
}

#[rstest]
fn repeated_ids_are_looked_up_once(mut resolver: EntityImageResolver<StubEntitySource>) {
    let first = block_on_for_tests(resolver.resolve_image("Q100"));
    let second = block_on_for_tests(resolver.resolve_image("Q100"));
    assert_eq!(first, second);
    assert_eq!(resolver.lookups_issued(), 1);
    assert_eq!(resolver.source().requests(), vec!["Q100".to_owned()]);
}

#[rstest]
#[case("Q500")]
#[case("Q200")]
#[case("Q999")]
fn misses_are_cached(mut resolver: EntityImageResolver<StubEntitySource>, #[case] id: &str) {
    assert_eq!(block_on_for_tests(resolver.resolve_image(id)), None);
    assert_eq!(block_on_for_tests(resolver.resolve_image(id)), None);
    assert_eq!(resolver.lookups_issued(), 1);
    assert_eq!(resolver.source().calls(), 1);
}

#[rstest]
#[case("")]
#[case("   ")]
fn blank_ids_skip_the_source(
    mut resolver: EntityImageResolver<StubEntitySource>,
    #[case] id: &str,
) {
    assert_eq!(block_on_for_tests(resolver.resolve_image(id)), None);
    assert_eq!(block_on_for_tests(resolver.resolve_image(id)), None);
    assert_eq!(resolver.lookups_issued(), 0);
    assert_eq!(resolver.source().calls(), 0);
}

#[rstest]
fn custom_commons_mirror_and_width(resolver: EntityImageResolver<StubEntitySource>) {
    let mut resolver = resolver
        .with_commons_base_url("http://commons.local/")
        .with_width(640);
    let url = block_on_for_tests(resolver.resolve_image("Q100"));
    assert_eq!(
        url.as_deref(),
        Some("http://commons.local/wiki/Special:FilePath/Lake%20Motosu.jpg?width=640")
    );
}

#[rstest]
fn entity_url_percent_encodes_the_id() {
    let source = HttpEntitySource::new("https://www.wikidata.org/").expect("build source");
    assert_eq!(
        source.entity_url("Q42"),
        "https://www.wikidata.org/wiki/Special:EntityData/Q42.json"
    );
    assert_eq!(
        source.entity_url("Q1/../x"),
        "https://www.wikidata.org/wiki/Special:EntityData/Q1%2F..%2Fx.json"
    );
}

#[rstest]
fn http_source_fetches_entity_documents() {
    let server = OneShotServer::respond_with(
        200,
        json!({"entities": {"Q7": {"claims": {"P18": [
            {"mainsnak": {"datavalue": {"value": "Seven.png"}}}
        ]}}}})
        .to_string(),
    );
    let source = loopback_source(server.base_url());
    let mut resolver = EntityImageResolver::new(source);

    let url = block_on_for_tests(resolver.resolve_image("Q7"));
    let request = server.finish();

    assert_eq!(
        request.request_line,
        "GET /wiki/Special:EntityData/Q7.json HTTP/1.1"
    );
    assert_eq!(
        url.as_deref(),
        Some("https://commons.wikimedia.org/wiki/Special:FilePath/Seven.png?width=1200")
    );
}

#[rstest]
fn http_status_failures_degrade_to_no_image() {
    let server = OneShotServer::respond_with(404, r#"{"error":"missing"}"#);
    let source = loopback_source(server.base_url());
    let mut resolver = EntityImageResolver::new(source);

    assert_eq!(block_on_for_tests(resolver.resolve_image("Q8")), None);
    server.finish();
    assert_eq!(resolver.lookups_issued(), 1);
}

#[rstest]
fn malformed_entity_documents_are_cached_as_no_image() {
    let server = OneShotServer::respond_with(200, "<html>maintenance</html>");
    let source = loopback_source(server.base_url());
    let mut resolver = EntityImageResolver::new(source);

    let first = block_on_for_tests(resolver.resolve_image("Q9"));
    server.finish();
    let second = block_on_for_tests(resolver.resolve_image("Q9"));

    assert_eq!((first, second), (None, None));
    assert_eq!(resolver.lookups_issued(), 1);
}

#[rstest]
fn refused_connections_are_cached_as_no_image() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind listener");
    let address = listener.local_addr().expect("local address");
    drop(listener);
    let source = loopback_source(format!("http://{address}"));
    let mut resolver = EntityImageResolver::new(source);

    let first = block_on_for_tests(resolver.resolve_image("Q10"));
    let second = block_on_for_tests(resolver.resolve_image("Q10"));

    assert_eq!((first, second), (None, None));
    assert_eq!(resolver.lookups_issued(), 1);
}
