//! Shared fixtures for musiclib-api integration tests
//!
//! - In-memory SQLite database
//! - Local enrichment service stub on an ephemeral port
//! - Request/response helpers for driving the router with `oneshot`

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::{Query, State},
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use http_body_util::BodyExt;
use musiclib_api::services::EnrichmentClient;
use musiclib_api::{build_router, db, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

/// Client timeout used by test apps; the `Slow` group sleeps past it
pub const CLIENT_TIMEOUT: Duration = Duration::from_secs(1);

/// Handle to a running enrichment stub
#[derive(Clone)]
pub struct EnrichmentStub {
    pub url: String,
    hits: Arc<AtomicUsize>,
}

impl EnrichmentStub {
    /// Number of lookups served so far
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// Stub behaviour is keyed on the requested group:
/// - `Broken` answers 503
/// - `Garbage` answers 200 with a non-JSON body
/// - `Slow` answers after three seconds
/// - `Muse`/`Uprising` answers the canonical two-verse example
/// - anything else gets three verses derived from the song title
async fn stub_lookup(
    State(hits): State<Arc<AtomicUsize>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    hits.fetch_add(1, Ordering::SeqCst);

    let group = params.get("group").cloned().unwrap_or_default();
    let song = params.get("song").cloned().unwrap_or_default();

    match (group.as_str(), song.as_str()) {
        ("Broken", _) => (StatusCode::SERVICE_UNAVAILABLE, "down for maintenance").into_response(),
        ("Garbage", _) => (StatusCode::OK, "<html>not json</html>").into_response(),
        ("Slow", _) => {
            tokio::time::sleep(Duration::from_secs(3)).await;
            Json(json!({"releaseDate": "01.01.2000", "text": "late", "link": ""})).into_response()
        }
        ("Muse", "Uprising") => Json(json!({
            "releaseDate": "03.09.2009",
            "text": "verse one\n\nverse two",
            "link": "http://x",
        }))
        .into_response(),
        _ => Json(json!({
            "releaseDate": "01.01.2000",
            "text": format!("{song} one\n\n{song} two\n\n{song} three"),
            "link": format!("https://songs.example/{group}/{song}"),
        }))
        .into_response(),
    }
}

/// Start the enrichment stub on 127.0.0.1 with an ephemeral port
pub async fn spawn_enrichment_stub() -> EnrichmentStub {
    let hits = Arc::new(AtomicUsize::new(0));
    let app = Router::new()
        .route("/info", get(stub_lookup))
        .with_state(hits.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Should bind stub listener");
    let addr = listener.local_addr().expect("Should have local address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Stub server failed");
    });

    EnrichmentStub {
        url: format!("http://{}/info", addr),
        hits,
    }
}

/// Test app with fresh in-memory database and enrichment stub
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub stub: EnrichmentStub,
}

impl TestApp {
    pub async fn new() -> Self {
        let stub = spawn_enrichment_stub().await;
        let pool = db::init_database_pool("sqlite::memory:")
            .await
            .expect("Should create in-memory database");
        let enrichment = EnrichmentClient::new(stub.url.clone(), CLIENT_TIMEOUT)
            .expect("Should create enrichment client");

        let state = AppState::new(pool, enrichment);
        Self {
            router: build_router(state.clone()),
            state,
            stub,
        }
    }

    /// Send a request and decode the JSON response body
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router should respond");
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Should read body")
            .to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };
        (status, body)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(empty_request("GET", uri)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.send(empty_request("DELETE", uri)).await
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(json_request("POST", uri, body.to_string())).await
    }

    pub async fn patch_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(json_request("PATCH", uri, body.to_string())).await
    }

    /// Create a song and return its id
    pub async fn create(&self, group: &str, song: &str) -> i64 {
        let (status, body) = self
            .post_json("/songs", json!({"group": group, "song": song}))
            .await;
        assert_eq!(status, StatusCode::OK, "create failed: {}", body);
        body["id"].as_i64().expect("created song should have an id")
    }
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn json_request(method: &str, uri: &str, body: String) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap()
}
