//! Review endpoints.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use earmark_core::ReviewRow;

use super::{error_response, library_error, ApiError, StatusResponse};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ListReviewsParams {
    pub show_id: Option<String>,
    pub limit: Option<u32>,
}

pub async fn list_reviews(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListReviewsParams>,
) -> Result<Json<Vec<ReviewRow>>, ApiError> {
    state
        .library()
        .list_reviews(params.show_id.as_deref(), params.limit)
        .map(Json)
        .map_err(library_error)
}

#[derive(Deserialize)]
pub struct AddReviewRequest {
    pub episode_id: String,
    pub rating: i64,
    #[serde(default)]
    pub review: String,
}

pub async fn add_review(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AddReviewRequest>,
) -> Result<Json<StatusResponse>, ApiError> {
    state
        .library()
        .add_review(&request.episode_id, request.rating, &request.review)
        .map_err(library_error)?;

    Ok(Json(StatusResponse { status: "success" }))
}

#[derive(Deserialize)]
pub struct SearchReviewsParams {
    pub q: Option<String>,
    pub show_id: Option<String>,
}

pub async fn search_reviews(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchReviewsParams>,
) -> Result<Json<Vec<ReviewRow>>, ApiError> {
    let query = match params.q.as_deref() {
        Some(q) if !q.is_empty() => q,
        _ => {
            return Err(error_response(
                StatusCode::BAD_REQUEST,
                "Missing required query parameter: q",
            ))
        }
    };

    state
        .library()
        .search_reviews(query, params.show_id.as_deref())
        .map(Json)
        .map_err(library_error)
}
