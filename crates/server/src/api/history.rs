//! Listening history and statistics endpoints.

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;

use earmark_core::{HistoryEntry, ListeningStats};

use super::{library_error, ApiError, StatusResponse};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct HistoryParams {
    pub show_id: Option<String>,
    #[serde(default = "default_history_limit")]
    pub limit: u32,
}

fn default_history_limit() -> u32 {
    100
}

pub async fn list_history(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HistoryParams>,
) -> Result<Json<Vec<HistoryEntry>>, ApiError> {
    state
        .library()
        .list_history(params.show_id.as_deref(), params.limit)
        .map(Json)
        .map_err(library_error)
}

#[derive(Deserialize)]
pub struct MarkListenedRequest {
    pub episode_id: String,
    /// Calendar date, `YYYY-MM-DD`. Defaults to today.
    #[serde(default)]
    pub listened_date: Option<NaiveDate>,
}

pub async fn mark_listened(
    State(state): State<Arc<AppState>>,
    Json(request): Json<MarkListenedRequest>,
) -> Result<Json<StatusResponse>, ApiError> {
    state
        .library()
        .mark_listened(&request.episode_id, request.listened_date)
        .map_err(library_error)?;

    Ok(Json(StatusResponse { status: "success" }))
}

pub async fn get_stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ListeningStats>, ApiError> {
    state
        .library()
        .listening_stats()
        .map(Json)
        .map_err(library_error)
}
