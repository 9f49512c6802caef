//! End-to-end scenario: add a show from the catalog, review and listen to its
//! episodes, and read everything back over the HTTP surface.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::json;
use tower::ServiceExt;

use common::{fixtures, TestFixture};

#[tokio::test]
async fn test_full_tracking_scenario() {
    let fixture = TestFixture::new().await;

    // The catalog knows one show with three episodes.
    fixture
        .catalog
        .add_show(fixtures::catalog_show("show1", "Deep Dives"));
    fixture.catalog.add_episodes(
        "show1",
        vec![
            fixtures::catalog_episode("ep1", "Origins"),
            fixtures::catalog_episode("ep2", "Middles"),
            fixtures::catalog_episode("ep3", "Endings"),
        ],
    );

    // Search it, add it.
    fixture
        .catalog
        .set_search_results(vec![fixtures::catalog_show("show1", "Deep Dives")]);
    let response = fixture.get("/api/shows/search?q=deep").await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body[0]["id"], "show1");

    let response = fixture.post("/api/shows", json!({"show_id": "show1"})).await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["status"], "success");
    assert_eq!(response.body["episodes_count"], 3);

    // Adding again is a no-op against the catalog.
    let response = fixture.post("/api/shows", json!({"show_id": "show1"})).await;
    assert_eq!(response.body["status"], "exists");

    // The episodes are browsable.
    let response = fixture.get("/api/episodes?show_id=show1").await;
    assert_status!(response, StatusCode::OK);
    let episodes = response.body.as_array().unwrap();
    assert_eq!(episodes.len(), 3);
    assert!(episodes.iter().all(|e| e["show_name"] == "Deep Dives"));

    let response = fixture.get("/api/episodes/ep2").await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["name"], "Middles");
    assert_eq!(
        response.body["spotify_url"],
        "https://open.spotify.com/episode/ep2"
    );

    // Review one, listen to two.
    let response = fixture
        .post(
            "/api/reviews",
            json!({"episode_id": "ep1", "rating": 5, "review": "A fantastic opener"}),
        )
        .await;
    assert_status!(response, StatusCode::OK);

    for (episode, date) in [("ep1", "2024-05-01"), ("ep2", "2024-06-01")] {
        let response = fixture
            .post(
                "/api/listening-history",
                json!({"episode_id": episode, "listened_date": date}),
            )
            .await;
        assert_status!(response, StatusCode::OK);
    }

    // Reviews carry the joined episode and show context.
    let response = fixture.get("/api/reviews?show_id=show1").await;
    let reviews = response.body.as_array().unwrap();
    assert_eq!(reviews.len(), 1);
    assert_eq!(reviews[0]["episode_name"], "Origins");
    assert_eq!(reviews[0]["show_name"], "Deep Dives");

    // The review is searchable by its text.
    let response = fixture.get("/api/reviews/search?q=fantastic").await;
    assert_eq!(response.body.as_array().unwrap().len(), 1);

    // Stats reflect the two listens across two months.
    let response = fixture.get("/api/stats").await;
    assert_eq!(response.body["total_episodes"], 2);
    assert_eq!(response.body["total_shows"], 1);
    let monthly = response.body["monthly_stats"].as_array().unwrap();
    assert_eq!(monthly[0]["month"], "2024-06");
    assert_eq!(monthly[1]["month"], "2024-05");
}

#[tokio::test]
async fn test_list_episodes_pagination_over_http() {
    let fixture = TestFixture::new().await;
    fixture.seed_show("s1", "Long Show");
    let listing: Vec<_> = (0..5)
        .map(|i| {
            let mut ep =
                fixtures::catalog_episode(&format!("ep{}", i), &format!("Episode {}", i));
            ep.release_date = format!("2024-0{}-01", i + 1);
            ep
        })
        .collect();
    fixture.seed_episodes("s1", &listing);

    let page1 = fixture.get("/api/episodes?limit=2&offset=0").await;
    let page2 = fixture.get("/api/episodes?limit=2&offset=2").await;

    let ids = |resp: &common::TestResponse| -> Vec<String> {
        resp.body
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["id"].as_str().unwrap().to_string())
            .collect()
    };

    assert_eq!(ids(&page1), vec!["ep4", "ep3"]);
    assert_eq!(ids(&page2), vec!["ep2", "ep1"]);
}

#[tokio::test]
async fn test_get_episode_not_found_body() {
    let fixture = TestFixture::new().await;
    let response = fixture.get("/api/episodes/ghost").await;
    assert_status!(response, StatusCode::NOT_FOUND);
    assert!(response.body["error"].as_str().unwrap().contains("ghost"));
}

#[tokio::test]
async fn test_metrics_endpoint_serves_prometheus_text() {
    let fixture = TestFixture::new().await;

    // Drive one request through the middleware first.
    fixture.get("/api/health").await;

    let request = Request::builder()
        .uri("/metrics")
        .body(Body::empty())
        .unwrap();
    let response = fixture.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let text = String::from_utf8(body.to_vec()).unwrap();
    assert!(text.contains("earmark_http_requests_total"));
    assert!(text.contains("# TYPE"));
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let fixture = TestFixture::new().await;
    let response = fixture.get("/api/nonexistent").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
