//! Test support: routers and servers backed by in-memory SQLite. Used by the
//! unit tests here and the HTTP-client integration suite.

use axum::Router;
use lanesync_db::Db;
use lanesync_service::LocalService;
use tokio::net::TcpListener;

/// Build a router with a fresh in-memory document store.
pub fn test_router() -> Router {
    let db = Db::open_in_memory().expect("open in-memory db");
    crate::routes::build_router(LocalService::new(db))
}

/// A running test server with base_url and background task handle.
pub struct TestServer {
    pub base_url: String,
    _handle: tokio::task::JoinHandle<()>,
}

/// Spawn an axum test server on a random port. Returns the TestServer with
/// the `base_url` (e.g. "http://127.0.0.1:12345").
pub async fn spawn_test_server() -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let base_url = format!("http://{addr}");
    let app = test_router();
    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    TestServer {
        base_url,
        _handle: handle,
    }
}
