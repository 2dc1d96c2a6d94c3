//! Integration tests for the `techquiry` CLI binary. Runs the binary with
//! assert_cmd against a mock HTTP API served from a background thread.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use std::io::Write as _;
use std::sync::mpsc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Write a YAML config pointing the binary at `base_url`.
fn write_config(dir: &tempfile::TempDir, base_url: &str) -> std::path::PathBuf {
    let path = dir.path().join("config.yaml");
    let mut f = std::fs::File::create(&path).unwrap();
    writeln!(f, "api:\n  base_url: {}", base_url).unwrap();
    path
}

/// Run a mock server on its own runtime thread; the server stays up until
/// the returned sender is dropped.
fn spawn_server<F>(mount: F) -> (String, mpsc::Sender<()>)
where
    F: FnOnce(MockServer) -> futures_util::future::BoxFuture<'static, MockServer> + Send + 'static,
{
    let (uri_tx, uri_rx) = mpsc::channel();
    let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>();
    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async move {
            let server = mount(MockServer::start().await).await;
            uri_tx.send(server.uri()).unwrap();
            // Serve until the test drops its shutdown handle.
            let _ = tokio::task::spawn_blocking(move || {
                let _ = shutdown_rx.recv();
            })
            .await;
            drop(server);
        });
    });
    (uri_rx.recv().unwrap(), shutdown_tx)
}

#[test]
fn cli_reports_anonymous_session_and_lists_inquiries() {
    let (uri, _shutdown) = spawn_server(|server| {
        Box::pin(async move {
            Mock::given(method("GET"))
                .and(path("/user/current"))
                .respond_with(ResponseTemplate::new(401))
                .mount(&server)
                .await;
            Mock::given(method("GET"))
                .and(path("/inquiry/range/10/0"))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                    {
                        "inquiryId": 1,
                        "userId": 2,
                        "title": "How do lifetimes work?",
                        "content": "Example inside.",
                        "anonymous": false
                    }
                ])))
                .mount(&server)
                .await;
            server
        })
    });

    let dir = tempfile::tempdir().unwrap();
    let config_path = write_config(&dir, &uri);

    let mut cmd = Command::cargo_bin("techquiry").unwrap();
    cmd.arg("--config").arg(&config_path);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Not logged in"))
        .stdout(predicate::str::contains("How do lifetimes work?"));
}

#[test]
fn cli_logs_in_with_password_from_stdin() {
    let (uri, _shutdown) = spawn_server(|server| {
        Box::pin(async move {
            Mock::given(method("POST"))
                .and(path("/user/login"))
                .respond_with(
                    ResponseTemplate::new(200)
                        .set_body_json(json!({ "userId": 1, "username": "alice" })),
                )
                .mount(&server)
                .await;
            Mock::given(method("GET"))
                .and(path("/user/current"))
                .respond_with(
                    ResponseTemplate::new(200)
                        .set_body_json(json!({ "userId": 1, "username": "alice" })),
                )
                .mount(&server)
                .await;
            Mock::given(method("GET"))
                .and(path("/user/id/1/data"))
                .respond_with(ResponseTemplate::new(404))
                .mount(&server)
                .await;
            Mock::given(method("GET"))
                .and(path("/inquiry/range/10/0"))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
                .mount(&server)
                .await;
            server
        })
    });

    let dir = tempfile::tempdir().unwrap();
    let config_path = write_config(&dir, &uri);

    let mut cmd = Command::cargo_bin("techquiry").unwrap();
    cmd.env("TECHQUIRY_CONFIG", &config_path)
        .arg("--user")
        .arg("alice")
        .write_stdin("secret\n");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Logged in as alice"))
        .stdout(predicate::str::contains("No inquiries."));
}

#[test]
fn cli_server_down_shows_error() {
    // Point the config at a port where nothing is listening.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let base_url = format!("http://127.0.0.1:{}", listener.local_addr().unwrap().port());
    drop(listener);

    let dir = tempfile::tempdir().unwrap();
    let config_path = write_config(&dir, &base_url);

    let mut cmd = Command::cargo_bin("techquiry").unwrap();
    cmd.arg("--config").arg(&config_path);

    cmd.assert()
        .failure()
        .stderr(predicate::str::is_match("(?i)(connect|error|refused)").unwrap());
}

#[test]
fn cli_missing_config_fails() {
    let mut cmd = Command::cargo_bin("techquiry").unwrap();
    cmd.arg("--config").arg("/nonexistent/config.yaml");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("failed to load config"));
}
