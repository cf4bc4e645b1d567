use std::sync::Arc;

use catalog_core::{Character, PageEnvelope};
use catalog_engine::{
    CatalogClient, FailureKind, ReqwestTransport, TransportSettings,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> CatalogClient {
    catalog_logging::initialize_for_tests();
    let transport = ReqwestTransport::new(TransportSettings::default()).unwrap();
    CatalogClient::with_transport(&format!("{}/api", server.uri()), Arc::new(transport)).unwrap()
}

#[tokio::test]
async fn first_page_without_query_omits_name_filter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/character"))
        .and(query_param("page", "1"))
        .and(query_param_is_missing("name"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "info": { "count": 2, "pages": 2, "next": "https://example.com/api/character?page=2", "prev": null },
            "results": [{ "id": 1, "name": "Rick" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = client_for(&server).fetch_page(1, None).await.unwrap();

    assert!(page.has_more());
    assert_eq!(page.results, vec![Character::new(1, "Rick")]);
}

#[tokio::test]
async fn query_is_sent_as_name_filter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/character"))
        .and(query_param("page", "3"))
        .and(query_param("name", "rick"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "info": { "count": 1, "pages": 1, "next": null, "prev": null },
            "results": [{ "id": 8, "name": "Adjudicator Rick" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = client_for(&server)
        .fetch_page(3, Some("rick"))
        .await
        .unwrap();

    assert!(!page.has_more());
    assert_eq!(page.results[0].name(), "Adjudicator Rick");
}

#[tokio::test]
async fn not_found_is_an_empty_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/character"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "error": "There is nothing here" })),
        )
        .mount(&server)
        .await;

    let page = client_for(&server)
        .fetch_page(1, Some("zz-nonexistent"))
        .await
        .expect("404 is not an error");

    assert_eq!(page, PageEnvelope::empty());
}

#[tokio::test]
async fn server_error_is_a_fetch_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/character"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client_for(&server).fetch_page(1, None).await.unwrap_err();

    assert_eq!(
        err.kind,
        FailureKind::HttpStatus {
            endpoint: "character".to_string(),
            status: 503,
        }
    );
    assert!(err.to_string().contains("503"));
}

#[tokio::test]
async fn malformed_body_is_a_decode_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/character"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server).fetch_page(1, None).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Decode);
}
