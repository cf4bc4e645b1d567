use std::sync::Arc;
use std::time::Duration;

use catalog_core::{Character, SessionView, Status};
use catalog_engine::{
    CatalogClient, ChannelObserver, ReqwestTransport, SessionHandle, TransportSettings,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use tokio::sync::mpsc::UnboundedReceiver;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn session_for(server: &MockServer) -> (SessionHandle, UnboundedReceiver<SessionView>) {
    catalog_logging::initialize_for_tests();
    let transport = ReqwestTransport::new(TransportSettings::default()).unwrap();
    let client =
        CatalogClient::with_transport(&format!("{}/api", server.uri()), Arc::new(transport))
            .unwrap();
    let session = SessionHandle::spawn(client);
    let (observer, rx) = ChannelObserver::channel();
    session.subscribe(Arc::new(observer));
    (session, rx)
}

async fn next_view(rx: &mut UnboundedReceiver<SessionView>) -> SessionView {
    tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("notification within timeout")
        .expect("session alive")
}

async fn mount_page(server: &MockServer, page: u32, next: Option<&str>, results: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/api/character"))
        .and(query_param("page", page.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "info": { "count": 2, "pages": 2, "next": next, "prev": null },
            "results": results
        })))
        .mount(server)
        .await;
}

fn names(view: &SessionView) -> Vec<&str> {
    view.results.iter().map(Character::name).collect()
}

#[tokio::test]
async fn pages_accumulate_across_next_page_loads() {
    let server = MockServer::start().await;
    let next = format!("{}/api/character?page=2", server.uri());
    mount_page(&server, 1, Some(&next), json!([{ "id": 1, "name": "Rick" }])).await;
    mount_page(&server, 2, None, json!([{ "id": 2, "name": "Morty" }])).await;
    let (session, mut rx) = session_for(&server);

    session.load_first_page("");
    assert_eq!(next_view(&mut rx).await.status, Status::Loading);
    let view = next_view(&mut rx).await;
    assert_eq!(view.status, Status::Idle);
    assert_eq!(names(&view), vec!["Rick"]);
    assert!(view.has_more);

    session.load_next_page();
    let view = next_view(&mut rx).await;
    assert!(view.loading_more);
    let view = next_view(&mut rx).await;
    assert_eq!(view.status, Status::Idle);
    assert_eq!(names(&view), vec!["Rick", "Morty"]);
    assert!(!view.has_more);
    assert!(!view.loading_more);
    assert_eq!(session.state(), view);
}

#[tokio::test]
async fn nonexistent_query_settles_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/character"))
        .and(query_param("name", "zz-nonexistent"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "error": "There is nothing here" })),
        )
        .mount(&server)
        .await;
    let (session, mut rx) = session_for(&server);

    session.load_first_page("zz-nonexistent");
    assert_eq!(next_view(&mut rx).await.status, Status::Loading);
    let view = next_view(&mut rx).await;

    assert_eq!(view.status, Status::Empty);
    assert!(view.results.is_empty());
    assert_eq!(view.error_message, None);
}

#[tokio::test]
async fn rapid_next_page_calls_issue_one_fetch() {
    let server = MockServer::start().await;
    let next = format!("{}/api/character?page=2", server.uri());
    mount_page(&server, 1, Some(&next), json!([{ "id": 1, "name": "Rick" }])).await;
    Mock::given(method("GET"))
        .and(path("/api/character"))
        .and(query_param("page", "2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(200))
                .set_body_json(json!({
                    "info": { "count": 2, "pages": 2, "next": null, "prev": null },
                    "results": [{ "id": 2, "name": "Morty" }]
                })),
        )
        .expect(1)
        .mount(&server)
        .await;
    let (session, mut rx) = session_for(&server);

    session.load_first_page("");
    next_view(&mut rx).await;
    next_view(&mut rx).await;

    session.load_next_page();
    session.load_next_page();

    assert!(next_view(&mut rx).await.loading_more);
    let view = next_view(&mut rx).await;
    assert_eq!(names(&view), vec!["Rick", "Morty"]);
    // The dropped call produced no notification of its own.
    assert!(rx.try_recv().is_err());
    server.verify().await;
}

#[tokio::test]
async fn refresh_resets_instead_of_duplicating() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        1,
        None,
        json!([{ "id": 1, "name": "Rick" }, { "id": 2, "name": "Morty" }]),
    )
    .await;
    let (session, mut rx) = session_for(&server);

    session.load_first_page("");
    next_view(&mut rx).await;
    next_view(&mut rx).await;

    session.refresh();
    let loading = next_view(&mut rx).await;
    assert_eq!(loading.status, Status::Loading);
    assert!(loading.results.is_empty());
    let view = next_view(&mut rx).await;
    assert_eq!(names(&view), vec!["Rick", "Morty"]);
}

#[tokio::test]
async fn server_error_surfaces_as_error_state() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/character"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let (session, mut rx) = session_for(&server);

    session.search("  rick  ");
    let loading = next_view(&mut rx).await;
    assert_eq!(loading.query, "rick");
    let view = next_view(&mut rx).await;

    assert_eq!(view.status, Status::Error);
    let message = view.error_message.expect("error message");
    assert!(message.contains("500"), "unexpected message: {message}");
    assert!(view.results.is_empty());
}

#[tokio::test]
async fn latest_search_wins_over_slower_earlier_one() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/character"))
        .and(query_param("name", "slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(300))
                .set_body_json(json!({ "info": null, "results": [{ "id": 1, "name": "Slow Rick" }] })),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/character"))
        .and(query_param("name", "fast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "info": null,
            "results": [{ "id": 2, "name": "Fast Morty" }]
        })))
        .mount(&server)
        .await;
    let (session, mut rx) = session_for(&server);

    session.search("slow");
    session.search("fast");

    assert_eq!(next_view(&mut rx).await.query, "slow");
    assert_eq!(next_view(&mut rx).await.query, "fast");
    let view = next_view(&mut rx).await;
    assert_eq!(names(&view), vec!["Fast Morty"]);

    // Give the cancelled request time to have landed if it were not cancelled.
    tokio::time::sleep(Duration::from_millis(400)).await;
    assert!(rx.try_recv().is_err());
    assert_eq!(names(&session.state()), vec!["Fast Morty"]);
}

#[tokio::test]
async fn unsubscribed_observer_stops_receiving() {
    let server = MockServer::start().await;
    mount_page(&server, 1, None, json!([{ "id": 1, "name": "Rick" }])).await;
    catalog_logging::initialize_for_tests();
    let transport = ReqwestTransport::new(TransportSettings::default()).unwrap();
    let client =
        CatalogClient::with_transport(&format!("{}/api", server.uri()), Arc::new(transport))
            .unwrap();
    let session = SessionHandle::spawn(client);
    let (observer, mut rx) = ChannelObserver::channel();
    let (watcher, mut watcher_rx) = ChannelObserver::channel();
    let id = session.subscribe(Arc::new(observer));
    session.subscribe(Arc::new(watcher));

    assert!(session.unsubscribe(id));
    assert!(!session.unsubscribe(id));

    session.load_first_page("");
    next_view(&mut watcher_rx).await;
    next_view(&mut watcher_rx).await;
    assert!(rx.try_recv().is_err());
}
