//! HTTP provider parsing against mock servers.

use marquee::domain::FieldValue;
use marquee::enrichment::{
    EnrichmentPipeline, MetadataProvider, OmdbClient, ProviderError, TmdbTrailerClient,
    TrailerProvider,
};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TIMEOUT: Duration = Duration::from_secs(2);

fn omdb(server: &MockServer, key: Option<&str>) -> OmdbClient {
    OmdbClient::new(server.uri(), key.map(String::from), TIMEOUT).expect("client")
}

fn tmdb(server: &MockServer, key: Option<&str>) -> TmdbTrailerClient {
    TmdbTrailerClient::new(server.uri(), key.map(String::from), TIMEOUT).expect("client")
}

#[tokio::test]
async fn omdb_record_is_parsed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("apikey", "secret"))
        .and(query_param("i", "tt0468569"))
        .and(query_param("plot", "full"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Title": "The Dark Knight",
            "Plot": "Batman raises the stakes.",
            "Director": "Christopher Nolan",
            "Actors": "Christian Bale, Heath Ledger",
            "Genre": "Action, Crime, Drama",
            "Runtime": "152 min",
            "Released": "18 Jul 2008",
            "BoxOffice": "N/A",
            "Awards": "",
            "Response": "True"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let record = omdb(&server, Some("secret"))
        .fetch_metadata("tt0468569")
        .await
        .expect("record");

    assert_eq!(record.director, FieldValue::Known("Christopher Nolan".to_string()));
    assert_eq!(record.runtime.display(), "152 min");
    assert_eq!(record.box_office, FieldValue::Unknown);
    assert_eq!(record.awards, FieldValue::Unknown);
}

#[tokio::test]
async fn omdb_false_response_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Response": "False",
            "Error": "Incorrect IMDb ID."
        })))
        .mount(&server)
        .await;

    let err = omdb(&server, Some("secret"))
        .fetch_metadata("tt9999999")
        .await
        .unwrap_err();
    assert!(matches!(err, ProviderError::NotFound(_)));
}

#[tokio::test]
async fn omdb_server_error_is_transport() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = omdb(&server, Some("secret"))
        .fetch_metadata("tt0468569")
        .await
        .unwrap_err();
    assert!(matches!(err, ProviderError::Transport(_)));
}

#[tokio::test]
async fn omdb_garbage_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>nope</html>"))
        .mount(&server)
        .await;

    let err = omdb(&server, Some("secret"))
        .fetch_metadata("tt0468569")
        .await
        .unwrap_err();
    assert!(matches!(err, ProviderError::Decode(_)));
}

#[tokio::test]
async fn missing_keys_skip_the_network() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = omdb(&server, None).fetch_metadata("tt0468569").await.unwrap_err();
    assert!(matches!(err, ProviderError::MissingApiKey("omdb")));

    let err = tmdb(&server, Some(" "))
        .fetch_trailer("tt0468569", "en-US")
        .await
        .unwrap_err();
    assert!(matches!(err, ProviderError::MissingApiKey("tmdb")));
}

#[tokio::test]
async fn tmdb_picks_youtube_trailer() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/movie/tt0468569/videos"))
        .and(query_param("api_key", "secret"))
        .and(query_param("language", "en-US"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 155,
            "results": [
                {"key": "teaser", "site": "YouTube", "type": "Teaser"},
                {"key": "vimeo", "site": "Vimeo", "type": "Trailer"},
                {"key": "EXeTwQWrcwY", "site": "YouTube", "type": "Trailer"}
            ]
        })))
        .mount(&server)
        .await;

    let trailer = tmdb(&server, Some("secret"))
        .fetch_trailer("tt0468569", "en-US")
        .await
        .expect("trailer");

    assert_eq!(trailer.video_id, "EXeTwQWrcwY");
    assert_eq!(
        trailer.embed_url().as_deref(),
        Some("https://www.youtube.com/embed/EXeTwQWrcwY")
    );
}

#[tokio::test]
async fn tmdb_unknown_movie_or_no_video_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/movie/tt0000001/videos"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/movie/tt0000002/videos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
        .mount(&server)
        .await;

    let client = tmdb(&server, Some("secret"));
    for identity in ["tt0000001", "tt0000002"] {
        let err = client.fetch_trailer(identity, "en-US").await.unwrap_err();
        assert!(matches!(err, ProviderError::NotFound(_)), "{identity}: {err}");
    }
}

#[tokio::test]
async fn tmdb_escapes_identity_in_path() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/movie/a%2Fb%3Fx/videos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"key": "escaped", "site": "YouTube", "type": "Trailer"}]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/movie/a/b"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"key": "wrong", "site": "YouTube", "type": "Trailer"}]
        })))
        .expect(0)
        .mount(&server)
        .await;

    let trailer = tmdb(&server, Some("secret"))
        .fetch_trailer("a/b?x", "en-US")
        .await
        .expect("trailer");
    assert_eq!(trailer.video_id, "escaped");
}

#[tokio::test]
async fn pipeline_caches_successes_and_retries_failures() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("i", "tt0468569"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Title": "The Dark Knight",
            "Plot": "Batman raises the stakes.",
            "Response": "True"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("i", "tt9999999"))
        .respond_with(ResponseTemplate::new(500))
        .expect(2)
        .mount(&server)
        .await;

    let pipeline = EnrichmentPipeline::new(
        Arc::new(omdb(&server, Some("secret"))),
        Arc::new(tmdb(&server, Some("secret"))),
    );

    assert!(pipeline.fetch_metadata("tt0468569").await.is_some());
    assert!(pipeline.fetch_metadata("tt0468569").await.is_some());
    assert!(pipeline.fetch_metadata("tt9999999").await.is_none());
    assert!(pipeline.fetch_metadata("tt9999999").await.is_none());
    assert_eq!(pipeline.cached_count(), 1);
}
