//! Shared helpers for GUI backend tests: a mock API server running on its
//! own runtime thread, usable from the synchronous command functions.

use std::sync::mpsc;

use wiremock::MockServer;

/// Handle keeping the mock server thread alive for the test's duration.
pub struct MockApi {
    pub uri: String,
    _shutdown: mpsc::Sender<()>,
}

/// Run a mock server on a dedicated runtime thread. `mount` installs the
/// scenario's mocks; the server stays up until the handle is dropped.
pub fn spawn_server<F>(mount: F) -> MockApi
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
            let _ = tokio::task::spawn_blocking(move || {
                let _ = shutdown_rx.recv();
            })
            .await;
            drop(server);
        });
    });
    MockApi {
        uri: uri_rx.recv().unwrap(),
        _shutdown: shutdown_tx,
    }
}
