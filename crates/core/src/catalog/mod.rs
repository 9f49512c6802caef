//! Podcast catalog integration (Spotify Web API).
//!
//! The catalog is the upstream source of show and episode metadata; the
//! library caches what it returns.

mod spotify;
mod types;

pub use spotify::SpotifyClient;
pub use types::*;

use async_trait::async_trait;
use thiserror::Error;

/// Page size used when walking a show's full episode listing.
pub const EPISODE_PAGE_SIZE: u32 = 50;

/// Errors that can occur when talking to the upstream catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Authentication with the catalog failed (bad or expired credentials).
    #[error("Catalog authentication failed: {0}")]
    Unauthorized(String),

    /// Rate limit exceeded.
    #[error("Rate limit exceeded, please wait before retrying")]
    RateLimited,

    /// Resource not found (404).
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// API returned an error.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    Parse(String),
}

/// Trait for podcast catalog clients.
///
/// Implemented by [`SpotifyClient`] and by the mock in [`crate::testing`],
/// so handlers can be exercised without network access.
#[async_trait]
pub trait PodcastCatalog: Send + Sync {
    /// Search for shows by free-text query, returning up to `limit` summaries.
    /// An empty vec means the upstream reported no matches.
    async fn search_shows(&self, query: &str, limit: u32)
        -> Result<Vec<CatalogShow>, CatalogError>;

    /// Get full metadata for one show. Upstream errors (not-found, auth
    /// failure) are carried through unchanged.
    async fn show_details(&self, show_id: &str) -> Result<CatalogShow, CatalogError>;

    /// Fetch one page of a show's episode listing.
    async fn episode_page(
        &self,
        show_id: &str,
        limit: u32,
        offset: u32,
    ) -> Result<EpisodePage, CatalogError>;

    /// Fetch every episode of a show by paging through the upstream listing.
    ///
    /// Terminates on the first page shorter than [`EPISODE_PAGE_SIZE`]
    /// (including an empty page). With a stable upstream ordering no item is
    /// lost or duplicated across page boundaries.
    async fn all_episodes(&self, show_id: &str) -> Result<Vec<CatalogEpisode>, CatalogError> {
        let mut episodes = Vec::new();
        let mut offset = 0;

        loop {
            let page = self
                .episode_page(show_id, EPISODE_PAGE_SIZE, offset)
                .await?;
            let fetched = page.items.len() as u32;
            episodes.extend(page.items);

            if fetched < EPISODE_PAGE_SIZE {
                break;
            }
            offset += EPISODE_PAGE_SIZE;
        }

        Ok(episodes)
    }
}
