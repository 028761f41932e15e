use axum::{Json, Router, http::StatusCode, routing::post};
use linklet::{
    backend::BackendClient,
    services::LinkService,
    startup::{AppState, app},
    store::LinkStore,
};
use serde_json::Value;
use tempfile::TempDir;

pub struct TestApp {
    pub address: String,
    pub slot_dir: TempDir,
    pub client: reqwest::Client,
}

impl TestApp {
    pub fn slot_path(&self) -> std::path::PathBuf {
        self.slot_dir.path().join("shortUrls.json")
    }
}

/// Boot the full router on an ephemeral port, backed by a slot file in a
/// fresh temp dir and pointed at the given backend address.
pub async fn spawn_app(backend_url: String) -> TestApp {
    let slot_dir = tempfile::tempdir().unwrap();
    let store = LinkStore::new(slot_dir.path().join("shortUrls.json"));
    let link_service = LinkService::new(store, BackendClient::new(backend_url));
    let state = AppState { link_service };

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = format!("http://{}", listener.local_addr().unwrap());
    tokio::spawn(async move {
        axum::serve(listener, app(state)).await.unwrap();
    });

    // Redirects stay visible to the assertions.
    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();

    TestApp {
        address,
        slot_dir,
        client,
    }
}

/// A canned stand-in for the shortening backend: answers every create request
/// with the given status and body.
pub async fn spawn_backend(status: u16, body: Value) -> String {
    let router = Router::new().route(
        "/api/short-urls",
        post(move || {
            let body = body.clone();
            async move { (StatusCode::from_u16(status).unwrap(), Json(body)) }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = format!("http://{}", listener.local_addr().unwrap());
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    address
}

/// An address where nothing is listening, for transport-failure cases.
pub async fn unreachable_backend() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);
    address
}
