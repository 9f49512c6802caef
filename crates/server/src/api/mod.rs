//! HTTP API: router, handlers, and error mapping.

pub mod episodes;
pub mod handlers;
pub mod history;
pub mod middleware;
pub mod reviews;
pub mod routes;
pub mod shows;

pub use routes::create_router;

use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use earmark_core::{CatalogError, LibraryError};

/// Error body shape used by every endpoint.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Minimal success body for write endpoints.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

pub(crate) fn error_response(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

pub(crate) fn library_error(err: LibraryError) -> ApiError {
    let status = match &err {
        LibraryError::NotFound(_) => StatusCode::NOT_FOUND,
        LibraryError::InvalidRating(_) => StatusCode::BAD_REQUEST,
        LibraryError::Database(_) | LibraryError::Decode(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    error_response(status, err.to_string())
}

pub(crate) fn catalog_error(err: CatalogError) -> ApiError {
    let status = match &err {
        CatalogError::NotFound(_) => StatusCode::NOT_FOUND,
        CatalogError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    error_response(status, err.to_string())
}

/// 503 for catalog-backed endpoints when no credentials are configured.
pub(crate) fn catalog_unavailable() -> ApiError {
    error_response(
        StatusCode::SERVICE_UNAVAILABLE,
        "Podcast catalog not configured (missing Spotify credentials)",
    )
}
