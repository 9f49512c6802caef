//! Public types for podcast catalog responses.

use serde::{Deserialize, Serialize};

/// Cover art in one of the sizes the catalog provides.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShowImage {
    /// Image URL.
    pub url: String,
    /// Width in pixels (if reported).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    /// Height in pixels (if reported).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

/// A podcast show as reported by the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogShow {
    /// Catalog identifier (Spotify show id).
    pub id: String,
    /// Show name.
    pub name: String,
    /// Publisher name.
    pub publisher: String,
    /// Show description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Total number of episodes the catalog reports.
    pub total_episodes: u32,
    /// Cover art, largest first (catalog ordering preserved).
    #[serde(default)]
    pub images: Vec<ShowImage>,
}

/// One episode of a show as reported by the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogEpisode {
    /// Catalog identifier (Spotify episode id).
    pub id: String,
    /// Episode name.
    pub name: String,
    /// Episode description.
    pub description: String,
    /// Release date (ISO, possibly day/month/year precision).
    pub release_date: String,
    /// Duration in milliseconds.
    pub duration_ms: u64,
    /// Link to the episode on the catalog, carried verbatim.
    pub external_url: String,
    /// Episode art, largest first.
    #[serde(default)]
    pub images: Vec<ShowImage>,
}

impl CatalogEpisode {
    /// URL of the first (largest) image, if any.
    pub fn first_image_url(&self) -> Option<&str> {
        self.images.first().map(|i| i.url.as_str())
    }
}

/// One page of a show's episode listing.
#[derive(Debug, Clone)]
pub struct EpisodePage {
    /// Episodes on this page, upstream ordering preserved.
    pub items: Vec<CatalogEpisode>,
    /// Total episodes the upstream reports for the show.
    pub total: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_image_url() {
        let mut episode = CatalogEpisode {
            id: "ep1".to_string(),
            name: "Episode".to_string(),
            description: String::new(),
            release_date: "2024-01-01".to_string(),
            duration_ms: 1000,
            external_url: "https://open.spotify.com/episode/ep1".to_string(),
            images: vec![
                ShowImage {
                    url: "https://img/large.jpg".to_string(),
                    width: Some(640),
                    height: Some(640),
                },
                ShowImage {
                    url: "https://img/small.jpg".to_string(),
                    width: Some(64),
                    height: Some(64),
                },
            ],
        };

        assert_eq!(episode.first_image_url(), Some("https://img/large.jpg"));

        episode.images.clear();
        assert_eq!(episode.first_image_url(), None);
    }

    #[test]
    fn test_show_image_serialization_skips_missing_dimensions() {
        let image = ShowImage {
            url: "https://img/a.jpg".to_string(),
            width: None,
            height: None,
        };
        let json = serde_json::to_string(&image).unwrap();
        assert!(!json.contains("width"));

        let parsed: ShowImage = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, image);
    }

    #[test]
    fn test_catalog_show_deserialize_without_images() {
        let json = r#"{"id":"s1","name":"Show","publisher":"Pub","total_episodes":3}"#;
        let show: CatalogShow = serde_json::from_str(json).unwrap();
        assert!(show.images.is_empty());
        assert!(show.description.is_none());
    }
}
