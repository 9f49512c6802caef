//! Types for the podcast library (cached shows, reviews, listening history).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::{CatalogShow, ShowImage};

/// A cached podcast show.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Show {
    /// Catalog identifier (Spotify show id).
    pub id: String,
    /// Show name.
    pub name: String,
    /// Publisher name.
    pub publisher: String,
    /// Total episodes the catalog reported at cache time.
    pub total_episodes: u32,
    /// Cover art, catalog ordering preserved.
    #[serde(default)]
    pub images: Vec<ShowImage>,
}

impl From<CatalogShow> for Show {
    fn from(show: CatalogShow) -> Self {
        Self {
            id: show.id,
            name: show.name,
            publisher: show.publisher,
            total_episodes: show.total_episodes,
            images: show.images,
        }
    }
}

/// Query for listing episodes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpisodeQuery {
    /// Restrict to one show.
    #[serde(default)]
    pub show_id: Option<String>,
    /// Maximum rows returned.
    #[serde(default = "default_limit")]
    pub limit: u32,
    /// Rows to skip.
    #[serde(default)]
    pub offset: u32,
}

impl Default for EpisodeQuery {
    fn default() -> Self {
        Self {
            show_id: None,
            limit: default_limit(),
            offset: 0,
        }
    }
}

fn default_limit() -> u32 {
    100
}

/// A cached episode joined with its show's name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EpisodeRow {
    /// Catalog identifier (Spotify episode id).
    pub id: String,
    /// Owning show id.
    pub show_id: String,
    /// Episode name.
    pub name: String,
    /// Episode description.
    pub description: String,
    /// Release date (ISO string; orders correctly lexicographically).
    pub release_date: String,
    /// Duration in milliseconds.
    pub duration_ms: u64,
    /// Link to the episode on the catalog.
    pub spotify_url: String,
    /// First episode image, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Owning show name (joined).
    pub show_name: String,
}

/// A review joined with episode and show context.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReviewRow {
    /// Auto-increment review id.
    pub id: i64,
    /// Reviewed episode id.
    pub episode_id: String,
    /// Rating, 1 to 5 inclusive.
    pub rating: u8,
    /// Review text.
    pub review: String,
    /// When the review was written (server-assigned).
    pub timestamp: DateTime<Utc>,
    /// Episode name (joined).
    pub episode_name: String,
    /// Episode release date (joined).
    pub release_date: String,
    /// Episode image (joined).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Show name (joined).
    pub show_name: String,
}

/// One listened-episode mark joined with episode and show names.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoryEntry {
    /// Listened episode id.
    pub episode_id: String,
    /// Calendar date the episode was listened to.
    pub listened_date: NaiveDate,
    /// When the mark was recorded (server-assigned).
    pub timestamp: DateTime<Utc>,
    /// Episode name (joined).
    pub episode_name: String,
    /// Show name (joined).
    pub show_name: String,
}

/// Aggregate listening statistics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListeningStats {
    /// Distinct episodes with at least one history entry.
    pub total_episodes: u64,
    /// Distinct shows with at least one listened episode.
    pub total_shows: u64,
    /// Listened counts per calendar month, most recent first, at most 12.
    pub monthly_stats: Vec<MonthlyCount>,
}

/// Listened count for one calendar month.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MonthlyCount {
    /// Month as `YYYY-MM`.
    pub month: String,
    /// Episodes marked listened in that month.
    pub count: u64,
}

/// Errors for library operations.
#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Rating must be between 1 and 5, got {0}")]
    InvalidRating(i64),

    #[error("Failed to decode stored value: {0}")]
    Decode(String),
}
