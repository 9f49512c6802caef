//! Test support: a mock catalog and fixture builders.
//!
//! Compiled into the library so the server crate's integration tests can use
//! it too.

mod mock_catalog;

pub use mock_catalog::MockCatalog;

/// Builders for commonly needed test values.
pub mod fixtures {
    use crate::catalog::{CatalogEpisode, CatalogShow, ShowImage};

    pub fn catalog_show(id: &str, name: &str) -> CatalogShow {
        CatalogShow {
            id: id.to_string(),
            name: name.to_string(),
            publisher: "Fixture Publisher".to_string(),
            description: Some(format!("Description of {}", name)),
            total_episodes: 10,
            images: vec![ShowImage {
                url: format!("https://img/{}.jpg", id),
                width: Some(640),
                height: Some(640),
            }],
        }
    }

    pub fn catalog_episode(id: &str, name: &str) -> CatalogEpisode {
        CatalogEpisode {
            id: id.to_string(),
            name: name.to_string(),
            description: format!("Description of {}", name),
            release_date: "2024-01-01".to_string(),
            duration_ms: 1_800_000,
            external_url: format!("https://open.spotify.com/episode/{}", id),
            images: vec![ShowImage {
                url: format!("https://img/{}.jpg", id),
                width: Some(640),
                height: Some(640),
            }],
        }
    }
}
