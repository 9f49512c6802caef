//! Common test utilities for driving the router in-process.
//!
//! The fixture wires a real SQLite library (in a temp dir) and a mock catalog
//! into the server state, so the full HTTP surface can be exercised without
//! network access.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use earmark_core::{
    testing::MockCatalog, CatalogEpisode, Config, DatabaseConfig, Library, PodcastCatalog,
    ServerConfig, Show, SqliteLibrary,
};

/// Re-export fixtures for test convenience
pub use earmark_core::testing::fixtures;

/// In-process server plus handles to its library and mock catalog.
pub struct TestFixture {
    pub router: Router,
    pub catalog: Arc<MockCatalog>,
    pub library: Arc<SqliteLibrary>,
    pub temp_dir: TempDir,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestFixture {
    /// Create a fixture with a mock catalog wired in.
    pub async fn new() -> Self {
        Self::build(true).await
    }

    /// Create a fixture with no catalog configured, for exercising the 503
    /// behavior of catalog-backed endpoints.
    pub async fn without_catalog() -> Self {
        Self::build(false).await
    }

    async fn build(with_catalog: bool) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.db");

        let library =
            Arc::new(SqliteLibrary::new(&db_path).expect("Failed to create library"));
        let catalog = Arc::new(MockCatalog::new());

        let config = Config {
            server: ServerConfig::default(),
            database: DatabaseConfig {
                path: db_path.clone(),
            },
            spotify: None,
        };

        let state = Arc::new(earmark_server::state::AppState::new(
            config,
            Arc::clone(&library) as Arc<dyn Library>,
            with_catalog.then(|| Arc::clone(&catalog) as Arc<dyn PodcastCatalog>),
        ));

        let router = earmark_server::api::create_router(state);

        Self {
            router,
            catalog,
            library,
            temp_dir,
        }
    }

    /// Cache a show directly in the library, bypassing the catalog.
    pub fn seed_show(&self, id: &str, name: &str) {
        let show = Show::from(fixtures::catalog_show(id, name));
        self.library.upsert_show(&show).expect("Failed to seed show");
    }

    /// Cache episodes directly in the library, bypassing the catalog.
    pub fn seed_episodes(&self, show_id: &str, episodes: &[CatalogEpisode]) {
        self.library
            .upsert_episodes(show_id, episodes)
            .expect("Failed to seed episodes");
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None).await
    }

    /// Send a POST request with JSON body.
    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.request("POST", path, Some(body)).await
    }

    /// Send a POST request with raw string body (for testing malformed JSON).
    pub async fn post_raw(&self, path: &str, body: &str) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        self.send(request).await
    }

    async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let mut request_builder = Request::builder().method(method).uri(path);

        let body = if let Some(json_body) = body {
            request_builder = request_builder.header("Content-Type", "application/json");
            Body::from(serde_json::to_vec(&json_body).unwrap())
        } else {
            Body::empty()
        };

        self.send(request_builder.body(body).unwrap()).await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body }
    }
}

/// Helper to assert a response has expected status.
#[macro_export]
macro_rules! assert_status {
    ($response:expr, $status:expr) => {
        assert_eq!(
            $response.status, $status,
            "Expected status {:?}, got {:?}. Body: {}",
            $status,
            $response.status,
            serde_json::to_string_pretty(&$response.body).unwrap_or_default()
        );
    };
}
