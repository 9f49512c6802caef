//! The podcast library: a SQLite-backed cache of shows and episodes with
//! reviews and listening history layered on top.

mod sqlite;
mod types;

pub use sqlite::SqliteLibrary;
pub use types::*;

use crate::catalog::CatalogEpisode;
use chrono::NaiveDate;

/// Trait for the podcast library store.
///
/// Every operation is a single request/response against the store; there is
/// no session or multi-step protocol. Single-row lookups signal absence with
/// [`LibraryError::NotFound`].
pub trait Library: Send + Sync {
    /// All cached shows, ordered by name ascending.
    fn list_shows(&self) -> Result<Vec<Show>, LibraryError>;

    /// One show by catalog id.
    fn get_show(&self, show_id: &str) -> Result<Show, LibraryError>;

    /// Insert-or-replace a show keyed on its id.
    fn upsert_show(&self, show: &Show) -> Result<(), LibraryError>;

    /// Episodes joined with their show's name, newest release first.
    fn list_episodes(&self, query: &EpisodeQuery) -> Result<Vec<EpisodeRow>, LibraryError>;

    /// One episode joined with its show's name.
    fn get_episode(&self, episode_id: &str) -> Result<EpisodeRow, LibraryError>;

    /// Insert-or-replace each episode keyed on id, associating it to
    /// `show_id`. The batch executes inside one transaction. The show is not
    /// required to exist; episodes for unknown shows are accepted.
    fn upsert_episodes(
        &self,
        show_id: &str,
        episodes: &[CatalogEpisode],
    ) -> Result<(), LibraryError>;

    /// Append a review. Rating must be within 1..=5; the timestamp is
    /// assigned server-side. Duplicate calls create duplicate reviews.
    fn add_review(&self, episode_id: &str, rating: i64, review: &str)
        -> Result<(), LibraryError>;

    /// Reviews joined with episode and show context, newest first,
    /// optionally filtered by show and capped by limit.
    fn list_reviews(
        &self,
        show_id: Option<&str>,
        limit: Option<u32>,
    ) -> Result<Vec<ReviewRow>, LibraryError>;

    /// Case-insensitive substring search over review text and episode name;
    /// show names are also matched when no show filter is given.
    fn search_reviews(
        &self,
        query: &str,
        show_id: Option<&str>,
    ) -> Result<Vec<ReviewRow>, LibraryError>;

    /// Record that an episode was listened to on `date` (default: today).
    /// Marking the same (episode, date) again replaces the prior entry.
    fn mark_listened(&self, episode_id: &str, date: Option<NaiveDate>)
        -> Result<(), LibraryError>;

    /// Listening history joined with episode and show names, most recent
    /// listened date first, capped by `limit`.
    fn list_history(
        &self,
        show_id: Option<&str>,
        limit: u32,
    ) -> Result<Vec<HistoryEntry>, LibraryError>;

    /// Aggregate listening statistics.
    fn listening_stats(&self) -> Result<ListeningStats, LibraryError>;
}
