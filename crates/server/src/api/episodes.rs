//! Cached-episode endpoints.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::sync::Arc;

use earmark_core::{EpisodeQuery, EpisodeRow};

use super::{library_error, ApiError};
use crate::state::AppState;

pub async fn list_episodes(
    State(state): State<Arc<AppState>>,
    Query(query): Query<EpisodeQuery>,
) -> Result<Json<Vec<EpisodeRow>>, ApiError> {
    state
        .library()
        .list_episodes(&query)
        .map(Json)
        .map_err(library_error)
}

pub async fn get_episode(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<EpisodeRow>, ApiError> {
    state
        .library()
        .get_episode(&id)
        .map(Json)
        .map_err(library_error)
}
