use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::{episodes, handlers, history, reviews, shows};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        // Health and config
        .route("/health", get(handlers::health))
        .route("/config", get(handlers::get_config))
        // Shows
        .route("/shows", get(shows::list_shows))
        .route("/shows", post(shows::add_show))
        .route("/shows/search", get(shows::search_shows))
        .route("/shows/{id}", get(shows::get_show))
        .route("/shows/{id}/refresh", post(shows::refresh_show))
        // Episodes
        .route("/episodes", get(episodes::list_episodes))
        .route("/episodes/{id}", get(episodes::get_episode))
        // Reviews
        .route("/reviews", get(reviews::list_reviews))
        .route("/reviews", post(reviews::add_review))
        .route("/reviews/search", get(reviews::search_reviews))
        // Listening history and stats
        .route("/listening-history", get(history::list_history))
        .route("/listening-history", post(history::mark_listened))
        .route("/stats", get(history::get_stats))
        .with_state(state);

    Router::new()
        .nest("/api", api_routes)
        .route("/metrics", get(handlers::metrics))
        .layer(middleware::from_fn(super::middleware::metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
