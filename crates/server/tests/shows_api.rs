//! Show endpoints: listing, search, and the add/refresh catalog flows.

mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{fixtures, TestFixture};
use earmark_core::{CatalogError, Library};

#[tokio::test]
async fn test_health_endpoint() {
    let fixture = TestFixture::new().await;
    let response = fixture.get("/api/health").await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
}

#[tokio::test]
async fn test_config_endpoint_has_no_secrets() {
    let fixture = TestFixture::new().await;
    let response = fixture.get("/api/config").await;
    assert_status!(response, StatusCode::OK);
    assert!(response.body["server"]["port"].is_number());
    assert!(response.body.get("spotify").is_none() || response.body["spotify"].is_null());
}

#[tokio::test]
async fn test_list_shows_empty() {
    let fixture = TestFixture::new().await;
    let response = fixture.get("/api/shows").await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_get_show_not_found_carries_error_body() {
    let fixture = TestFixture::new().await;
    let response = fixture.get("/api/shows/missing").await;
    assert_status!(response, StatusCode::NOT_FOUND);
    assert!(response.body["error"].as_str().unwrap().contains("missing"));
}

#[tokio::test]
async fn test_get_show_returns_cached_show() {
    let fixture = TestFixture::new().await;
    fixture.seed_show("s1", "Test Show");

    let response = fixture.get("/api/shows/s1").await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["id"], "s1");
    assert_eq!(response.body["name"], "Test Show");
    assert!(response.body["images"].is_array());
}

#[tokio::test]
async fn test_add_show_fetches_details_and_all_episodes() {
    let fixture = TestFixture::new().await;
    fixture.catalog.add_show(fixtures::catalog_show("s1", "New Show"));
    let listing: Vec<_> = (0..120)
        .map(|i| fixtures::catalog_episode(&format!("ep{}", i), &format!("Episode {}", i)))
        .collect();
    fixture.catalog.add_episodes("s1", listing);

    let response = fixture.post("/api/shows", json!({"show_id": "s1"})).await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["status"], "success");
    assert_eq!(response.body["show"]["name"], "New Show");
    // All pages of the listing were walked.
    assert_eq!(response.body["episodes_count"], 120);

    // Episodes landed in the library.
    let episodes = fixture.get("/api/episodes?show_id=s1&limit=200").await;
    assert_eq!(episodes.body.as_array().unwrap().len(), 120);
}

#[tokio::test]
async fn test_add_show_already_cached_skips_catalog() {
    let fixture = TestFixture::new().await;
    fixture.seed_show("s1", "Cached Show");

    let response = fixture.post("/api/shows", json!({"show_id": "s1"})).await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["status"], "exists");
    assert_eq!(response.body["show"]["name"], "Cached Show");
    assert!(response.body.get("episodes_count").is_none());
}

#[tokio::test]
async fn test_add_show_unknown_id_maps_catalog_not_found() {
    let fixture = TestFixture::new().await;

    let response = fixture.post("/api/shows", json!({"show_id": "nope"})).await;
    assert_status!(response, StatusCode::NOT_FOUND);
    assert!(response.body["error"].is_string());
}

#[tokio::test]
async fn test_add_show_rate_limited_maps_to_429() {
    let fixture = TestFixture::new().await;
    fixture.catalog.inject_error(CatalogError::RateLimited);

    let response = fixture.post("/api/shows", json!({"show_id": "s1"})).await;
    assert_status!(response, StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn test_add_show_without_catalog_returns_503() {
    let fixture = TestFixture::without_catalog().await;

    let response = fixture.post("/api/shows", json!({"show_id": "s1"})).await;
    assert_status!(response, StatusCode::SERVICE_UNAVAILABLE);
    assert!(response.body["error"].is_string());
}

#[tokio::test]
async fn test_search_shows_passthrough() {
    let fixture = TestFixture::new().await;
    fixture.catalog.set_search_results(vec![
        fixtures::catalog_show("s1", "History Pod"),
        fixtures::catalog_show("s2", "More History"),
    ]);

    let response = fixture.get("/api/shows/search?q=history").await;
    assert_status!(response, StatusCode::OK);
    let results = response.body.as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["name"], "History Pod");
    assert_eq!(fixture.catalog.search_queries(), vec!["history"]);
}

#[tokio::test]
async fn test_search_shows_respects_limit() {
    let fixture = TestFixture::new().await;
    fixture.catalog.set_search_results(
        (0..5)
            .map(|i| fixtures::catalog_show(&format!("s{}", i), &format!("Show {}", i)))
            .collect(),
    );

    let response = fixture.get("/api/shows/search?q=show&limit=3").await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_search_shows_missing_q_is_400() {
    let fixture = TestFixture::new().await;

    let response = fixture.get("/api/shows/search").await;
    assert_status!(response, StatusCode::BAD_REQUEST);
    assert!(response.body["error"].as_str().unwrap().contains("q"));

    let response = fixture.get("/api/shows/search?q=").await;
    assert_status!(response, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_search_shows_without_catalog_returns_503() {
    let fixture = TestFixture::without_catalog().await;
    let response = fixture.get("/api/shows/search?q=anything").await;
    assert_status!(response, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_refresh_show_overwrites_cache() {
    let fixture = TestFixture::new().await;
    fixture.seed_show("s1", "Stale Name");
    fixture.catalog.add_show(fixtures::catalog_show("s1", "Fresh Name"));
    fixture.catalog.add_episodes(
        "s1",
        vec![fixtures::catalog_episode("ep1", "New Episode")],
    );

    let response = fixture.post("/api/shows/s1/refresh", json!({})).await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["status"], "success");
    assert_eq!(response.body["episodes_count"], 1);

    let show = fixture.library.get_show("s1").unwrap();
    assert_eq!(show.name, "Fresh Name");
}

#[tokio::test]
async fn test_add_show_malformed_body_is_client_error() {
    let fixture = TestFixture::new().await;
    let response = fixture.post_raw("/api/shows", "{not json").await;
    assert!(response.status.is_client_error());
}
