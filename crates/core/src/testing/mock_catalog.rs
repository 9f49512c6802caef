//! In-memory [`PodcastCatalog`] for tests.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::catalog::{CatalogEpisode, CatalogError, CatalogShow, EpisodePage, PodcastCatalog};

/// Mock catalog backed by in-memory maps.
///
/// Shows and episodes are registered up front; `search_shows` returns a
/// preset result list. A single error can be injected and is consumed by the
/// next call, whichever operation that is.
#[derive(Default)]
pub struct MockCatalog {
    shows: RwLock<HashMap<String, CatalogShow>>,
    episodes: RwLock<HashMap<String, Vec<CatalogEpisode>>>,
    search_results: RwLock<Vec<CatalogShow>>,
    search_queries: RwLock<Vec<String>>,
    next_error: RwLock<Option<CatalogError>>,
}

impl MockCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a show for `show_details` lookups.
    pub fn add_show(&self, show: CatalogShow) {
        self.shows.write().unwrap().insert(show.id.clone(), show);
    }

    /// Register the full episode listing for a show.
    pub fn add_episodes(&self, show_id: &str, episodes: Vec<CatalogEpisode>) {
        self.episodes
            .write()
            .unwrap()
            .insert(show_id.to_string(), episodes);
    }

    /// Set what the next search calls return.
    pub fn set_search_results(&self, shows: Vec<CatalogShow>) {
        *self.search_results.write().unwrap() = shows;
    }

    /// Fail the next catalog call with `error`.
    pub fn inject_error(&self, error: CatalogError) {
        *self.next_error.write().unwrap() = Some(error);
    }

    /// Queries passed to `search_shows`, in call order.
    pub fn search_queries(&self) -> Vec<String> {
        self.search_queries.read().unwrap().clone()
    }

    fn take_error(&self) -> Option<CatalogError> {
        self.next_error.write().unwrap().take()
    }
}

#[async_trait]
impl PodcastCatalog for MockCatalog {
    async fn search_shows(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<Vec<CatalogShow>, CatalogError> {
        if let Some(error) = self.take_error() {
            return Err(error);
        }

        self.search_queries.write().unwrap().push(query.to_string());

        let results = self.search_results.read().unwrap();
        Ok(results.iter().take(limit as usize).cloned().collect())
    }

    async fn show_details(&self, show_id: &str) -> Result<CatalogShow, CatalogError> {
        if let Some(error) = self.take_error() {
            return Err(error);
        }

        self.shows
            .read()
            .unwrap()
            .get(show_id)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(show_id.to_string()))
    }

    async fn episode_page(
        &self,
        show_id: &str,
        limit: u32,
        offset: u32,
    ) -> Result<EpisodePage, CatalogError> {
        if let Some(error) = self.take_error() {
            return Err(error);
        }

        let episodes = self.episodes.read().unwrap();
        let listing = episodes
            .get(show_id)
            .ok_or_else(|| CatalogError::NotFound(show_id.to_string()))?;

        let start = (offset as usize).min(listing.len());
        let end = (start + limit as usize).min(listing.len());
        Ok(EpisodePage {
            items: listing[start..end].to_vec(),
            total: listing.len() as u32,
        })
    }
}
