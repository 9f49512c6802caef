//! Show endpoints: cached listing, catalog search, and the add/refresh flows
//! that pull a show plus its full episode listing into the library.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use earmark_core::{CatalogShow, LibraryError, Show};

use super::{catalog_error, catalog_unavailable, error_response, library_error, ApiError};
use crate::state::AppState;

pub async fn list_shows(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Show>>, ApiError> {
    state
        .library()
        .list_shows()
        .map(Json)
        .map_err(library_error)
}

pub async fn get_show(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Show>, ApiError> {
    state.library().get_show(&id).map(Json).map_err(library_error)
}

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    #[serde(default = "default_search_limit")]
    pub limit: u32,
}

fn default_search_limit() -> u32 {
    10
}

pub async fn search_shows(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<CatalogShow>>, ApiError> {
    let query = match params.q.as_deref() {
        Some(q) if !q.is_empty() => q,
        _ => {
            return Err(error_response(
                StatusCode::BAD_REQUEST,
                "Missing required query parameter: q",
            ))
        }
    };

    let catalog = state.catalog().ok_or_else(catalog_unavailable)?;
    let shows = catalog
        .search_shows(query, params.limit)
        .await
        .map_err(catalog_error)?;
    Ok(Json(shows))
}

#[derive(Deserialize)]
pub struct AddShowRequest {
    pub show_id: String,
}

#[derive(Serialize)]
pub struct AddShowResponse {
    pub status: &'static str,
    pub show: Show,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub episodes_count: Option<usize>,
}

/// Add a show to the library. If it is already cached nothing is fetched;
/// otherwise the catalog is asked for the show and its full episode listing.
pub async fn add_show(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AddShowRequest>,
) -> Result<Json<AddShowResponse>, ApiError> {
    match state.library().get_show(&request.show_id) {
        Ok(show) => {
            return Ok(Json(AddShowResponse {
                status: "exists",
                show,
                episodes_count: None,
            }))
        }
        Err(LibraryError::NotFound(_)) => {}
        Err(e) => return Err(library_error(e)),
    }

    let catalog = state.catalog().ok_or_else(catalog_unavailable)?;

    let details = catalog
        .show_details(&request.show_id)
        .await
        .map_err(catalog_error)?;
    let episodes = catalog
        .all_episodes(&request.show_id)
        .await
        .map_err(catalog_error)?;

    info!(
        "Caching show '{}' with {} episodes",
        details.name,
        episodes.len()
    );

    let show = Show::from(details);
    state.library().upsert_show(&show).map_err(library_error)?;
    state
        .library()
        .upsert_episodes(&request.show_id, &episodes)
        .map_err(library_error)?;

    Ok(Json(AddShowResponse {
        status: "success",
        show,
        episodes_count: Some(episodes.len()),
    }))
}

#[derive(Serialize)]
pub struct RefreshShowResponse {
    pub status: &'static str,
    pub episodes_count: usize,
}

/// Re-fetch a show and its episodes from the catalog, overwriting the cache.
pub async fn refresh_show(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<RefreshShowResponse>, ApiError> {
    let catalog = state.catalog().ok_or_else(catalog_unavailable)?;

    let details = catalog.show_details(&id).await.map_err(catalog_error)?;
    let episodes = catalog.all_episodes(&id).await.map_err(catalog_error)?;

    info!("Refreshed show '{}', {} episodes", details.name, episodes.len());

    state
        .library()
        .upsert_show(&Show::from(details))
        .map_err(library_error)?;
    state
        .library()
        .upsert_episodes(&id, &episodes)
        .map_err(library_error)?;

    Ok(Json(RefreshShowResponse {
        status: "success",
        episodes_count: episodes.len(),
    }))
}
