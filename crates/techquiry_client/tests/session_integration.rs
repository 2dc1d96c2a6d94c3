//! Integration tests for the session service: the identity → profile →
//! avatar chain against a mock HTTP API, including the 401/404 partial
//! cases and error surfacing through the hub.

use serde_json::json;
use techquiry_client::{SessionState, TechQuiryClient, UserData, UserLogin};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ICON_BYTES: &[u8] = &[0x89, 0x50, 0x4e, 0x47];

fn alice() -> serde_json::Value {
    json!({ "userId": 1, "username": "alice" })
}

fn alice_data() -> serde_json::Value {
    json!({ "userId": 1, "firstName": "Alice", "lastName": "Doe" })
}

async fn mock_current(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/user/current"))
        .respond_with(response)
        .mount(server)
        .await;
}

async fn mock_data(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/user/id/1/data"))
        .respond_with(response)
        .mount(server)
        .await;
}

async fn mock_icon(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/user/id/1/data/icon"))
        .respond_with(response)
        .mount(server)
        .await;
}

fn client_for(server: &MockServer) -> TechQuiryClient {
    TechQuiryClient::connect(&server.uri(), None).expect("client should build")
}

#[tokio::test]
async fn unauthenticated_401_resolves_to_anonymous_without_error() {
    let server = MockServer::start().await;
    mock_current(&server, ResponseTemplate::new(401)).await;

    let client = client_for(&server);
    let mut errors = client.errors.subscribe();

    let session = client.session.refresh().await;

    assert_eq!(session, None);
    assert_eq!(client.session.current_session(), None);
    assert_eq!(client.session.current_state(), SessionState::Anonymous);
    assert!(errors.try_recv().is_err(), "401 must not reach the sink");
}

#[tokio::test]
async fn missing_profile_404_yields_login_only_session_without_error() {
    let server = MockServer::start().await;
    mock_current(&server, ResponseTemplate::new(200).set_body_json(alice())).await;
    mock_data(&server, ResponseTemplate::new(404)).await;

    let client = client_for(&server);
    let mut errors = client.errors.subscribe();

    let session = client.session.refresh().await.expect("partial session");

    assert_eq!(session.user_login.username, "alice");
    assert_eq!(session.user_data, None);
    assert_eq!(session.user_icon, None);
    assert!(errors.try_recv().is_err(), "404 must not reach the sink");
}

#[tokio::test]
async fn missing_avatar_404_yields_session_without_icon_and_no_error() {
    let server = MockServer::start().await;
    mock_current(&server, ResponseTemplate::new(200).set_body_json(alice())).await;
    mock_data(&server, ResponseTemplate::new(200).set_body_json(alice_data())).await;
    mock_icon(&server, ResponseTemplate::new(404)).await;

    let client = client_for(&server);
    let mut errors = client.errors.subscribe();

    let session = client.session.refresh().await.expect("partial session");

    assert_eq!(
        session.user_data,
        Some(UserData {
            user_id: Some(1),
            first_name: "Alice".into(),
            last_name: "Doe".into(),
        })
    );
    assert_eq!(session.user_icon, None);
    assert!(errors.try_recv().is_err(), "404 must not reach the sink");
}

#[tokio::test]
async fn profile_failure_publishes_partial_and_surfaces_error_once() {
    let server = MockServer::start().await;
    mock_current(&server, ResponseTemplate::new(200).set_body_json(alice())).await;
    mock_data(
        &server,
        ResponseTemplate::new(500).set_body_json(json!({ "message": "database down" })),
    )
    .await;

    let client = client_for(&server);
    let mut errors = client.errors.subscribe();

    let session = client.session.refresh().await.expect("partial session");

    assert_eq!(session.user_login.username, "alice");
    assert_eq!(session.user_data, None);

    let surfaced = errors.recv().await.expect("error must reach the sink");
    assert!(surfaced.is_status(500));
    assert_eq!(surfaced.message, "database down");
    assert!(errors.try_recv().is_err(), "exactly one error expected");
}

#[tokio::test]
async fn avatar_failure_publishes_partial_and_surfaces_error_once() {
    let server = MockServer::start().await;
    mock_current(&server, ResponseTemplate::new(200).set_body_json(alice())).await;
    mock_data(&server, ResponseTemplate::new(200).set_body_json(alice_data())).await;
    mock_icon(&server, ResponseTemplate::new(500)).await;

    let client = client_for(&server);
    let mut errors = client.errors.subscribe();

    let session = client.session.refresh().await.expect("partial session");

    assert!(session.user_data.is_some());
    assert_eq!(session.user_icon, None);

    let surfaced = errors.recv().await.expect("error must reach the sink");
    assert!(surfaced.is_status(500));
    assert!(errors.try_recv().is_err(), "exactly one error expected");
}

#[tokio::test]
async fn identity_failure_other_than_401_publishes_nothing_and_surfaces_error() {
    let server = MockServer::start().await;
    mock_current(&server, ResponseTemplate::new(503)).await;

    let client = client_for(&server);
    let mut errors = client.errors.subscribe();

    let session = client.session.refresh().await;

    assert_eq!(session, None);
    // Nothing new published: the state is still unresolved.
    assert_eq!(client.session.current_state(), SessionState::Unresolved);

    let surfaced = errors.recv().await.expect("error must reach the sink");
    assert!(surfaced.is_status(503));
}

#[tokio::test]
async fn successful_chain_publishes_fully_composed_session() {
    let server = MockServer::start().await;
    mock_current(&server, ResponseTemplate::new(200).set_body_json(alice())).await;
    mock_data(&server, ResponseTemplate::new(200).set_body_json(alice_data())).await;
    mock_icon(
        &server,
        ResponseTemplate::new(200)
            .set_body_bytes(ICON_BYTES)
            .insert_header("content-type", "image/png"),
    )
    .await;

    let client = client_for(&server);
    let mut errors = client.errors.subscribe();

    let session = client.session.refresh().await.expect("full session");

    assert_eq!(
        session.user_login,
        UserLogin {
            user_id: Some(1),
            username: "alice".into(),
            password: None,
        }
    );
    assert_eq!(session.user_data.as_ref().unwrap().first_name, "Alice");
    assert_eq!(session.user_icon.as_deref(), Some(ICON_BYTES));
    // The synchronous snapshot returns the same value.
    assert_eq!(client.session.current_session(), Some(session));
    assert!(errors.try_recv().is_err());
}

#[tokio::test]
async fn refresh_is_idempotent_over_identical_responses() {
    let server = MockServer::start().await;
    mock_current(&server, ResponseTemplate::new(200).set_body_json(alice())).await;
    mock_data(&server, ResponseTemplate::new(200).set_body_json(alice_data())).await;
    mock_icon(&server, ResponseTemplate::new(404)).await;

    let client = client_for(&server);

    let first = client.session.refresh().await;
    let second = client.session.refresh().await;

    assert_eq!(first, second);
    assert_eq!(client.session.current_session(), second);
}

#[tokio::test]
async fn session_updates_replays_latest_value_to_new_subscribers() {
    let server = MockServer::start().await;
    mock_current(&server, ResponseTemplate::new(200).set_body_json(alice())).await;
    mock_data(&server, ResponseTemplate::new(404)).await;

    let client = client_for(&server);

    let mut early = client.session.session_updates();
    assert_eq!(*early.borrow_and_update(), SessionState::Unresolved);

    client.session.refresh().await;

    // The earlier subscriber sees the change...
    early.changed().await.expect("update expected");
    assert!(matches!(&*early.borrow(), SessionState::Active(_)));

    // ...and a late subscriber observes the latest value immediately.
    let late = client.session.session_updates();
    assert!(matches!(&*late.borrow(), SessionState::Active(_)));
}

#[tokio::test]
async fn logout_clear_drops_to_anonymous() {
    let server = MockServer::start().await;
    mock_current(&server, ResponseTemplate::new(200).set_body_json(alice())).await;
    mock_data(&server, ResponseTemplate::new(404)).await;

    let client = client_for(&server);
    client.session.refresh().await;
    assert!(client.session.current_session().is_some());

    client.session.clear();
    assert_eq!(client.session.current_state(), SessionState::Anonymous);
    assert_eq!(client.session.current_session(), None);
}
