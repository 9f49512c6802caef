//! SQLite-backed library implementation.

use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, Local, NaiveDate, Utc};
use rusqlite::{params, Connection};

use super::{
    EpisodeQuery, EpisodeRow, HistoryEntry, Library, LibraryError, ListeningStats, MonthlyCount,
    ReviewRow, Show,
};
use crate::catalog::{CatalogEpisode, ShowImage};

/// SQLite-backed podcast library.
pub struct SqliteLibrary {
    conn: Mutex<Connection>,
}

impl SqliteLibrary {
    /// Create a new SQLite library, creating the database file and tables if needed.
    pub fn new(path: &Path) -> Result<Self, LibraryError> {
        let conn = Connection::open(path).map_err(|e| LibraryError::Database(e.to_string()))?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create an in-memory SQLite library (useful for testing).
    pub fn in_memory() -> Result<Self, LibraryError> {
        let conn =
            Connection::open_in_memory().map_err(|e| LibraryError::Database(e.to_string()))?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn initialize_schema(conn: &Connection) -> Result<(), LibraryError> {
        conn.execute_batch(
            r#"
            -- Cached shows (one row per catalog show id)
            CREATE TABLE IF NOT EXISTS shows (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                publisher TEXT NOT NULL,
                total_episodes INTEGER NOT NULL,
                images TEXT NOT NULL DEFAULT '[]'
            );

            CREATE INDEX IF NOT EXISTS idx_shows_name ON shows(name);

            -- Cached episodes. show_id is not an enforced foreign key:
            -- episodes for not-yet-cached shows are accepted.
            CREATE TABLE IF NOT EXISTS episodes (
                id TEXT PRIMARY KEY,
                show_id TEXT NOT NULL,
                name TEXT NOT NULL,
                description TEXT NOT NULL,
                release_date TEXT NOT NULL,
                duration_ms INTEGER NOT NULL,
                spotify_url TEXT NOT NULL,
                image_url TEXT
            );

            CREATE INDEX IF NOT EXISTS idx_episodes_show ON episodes(show_id);
            CREATE INDEX IF NOT EXISTS idx_episodes_release ON episodes(release_date DESC);

            -- Reviews are append-only.
            CREATE TABLE IF NOT EXISTS reviews (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                episode_id TEXT NOT NULL,
                rating INTEGER NOT NULL,
                review TEXT NOT NULL,
                timestamp TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_reviews_episode ON reviews(episode_id);
            CREATE INDEX IF NOT EXISTS idx_reviews_timestamp ON reviews(timestamp);

            -- One row per (episode, calendar date); re-marking replaces.
            CREATE TABLE IF NOT EXISTS listening_history (
                episode_id TEXT NOT NULL,
                listened_date TEXT NOT NULL,
                timestamp TEXT NOT NULL,
                PRIMARY KEY (episode_id, listened_date)
            );
            "#,
        )
        .map_err(|e| LibraryError::Database(e.to_string()))?;

        Ok(())
    }

    /// Decode the images column; malformed stored JSON fails at read time.
    fn decode_images(raw: &str) -> Result<Vec<ShowImage>, LibraryError> {
        if raw.is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(raw)
            .map_err(|e| LibraryError::Decode(format!("invalid images JSON: {}", e)))
    }

    fn encode_images(images: &[ShowImage]) -> Result<String, LibraryError> {
        serde_json::to_string(images)
            .map_err(|e| LibraryError::Decode(format!("failed to encode images: {}", e)))
    }

    /// Convert a row to (Show, raw images JSON); decoding happens outside the
    /// mapper so it can report a typed error.
    fn row_to_show_raw(row: &rusqlite::Row) -> rusqlite::Result<(Show, String)> {
        let images_raw: String = row.get(4)?;
        Ok((
            Show {
                id: row.get(0)?,
                name: row.get(1)?,
                publisher: row.get(2)?,
                total_episodes: row.get::<_, i64>(3)? as u32,
                images: Vec::new(),
            },
            images_raw,
        ))
    }

    fn row_to_episode(row: &rusqlite::Row) -> rusqlite::Result<EpisodeRow> {
        Ok(EpisodeRow {
            id: row.get(0)?,
            show_id: row.get(1)?,
            name: row.get(2)?,
            description: row.get(3)?,
            release_date: row.get(4)?,
            duration_ms: row.get::<_, i64>(5)? as u64,
            spotify_url: row.get(6)?,
            image_url: row.get(7)?,
            show_name: row.get(8)?,
        })
    }

    fn row_to_review(row: &rusqlite::Row) -> rusqlite::Result<ReviewRow> {
        let timestamp_str: String = row.get(4)?;
        let timestamp = DateTime::parse_from_rfc3339(&timestamp_str)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now());

        Ok(ReviewRow {
            id: row.get(0)?,
            episode_id: row.get(1)?,
            rating: row.get::<_, i64>(2)? as u8,
            review: row.get(3)?,
            timestamp,
            episode_name: row.get(5)?,
            release_date: row.get(6)?,
            image_url: row.get(7)?,
            show_name: row.get(8)?,
        })
    }

    fn row_to_history(row: &rusqlite::Row) -> rusqlite::Result<HistoryEntry> {
        let date_str: String = row.get(1)?;
        let listened_date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
            .unwrap_or_else(|_| Utc::now().date_naive());

        let timestamp_str: String = row.get(2)?;
        let timestamp = DateTime::parse_from_rfc3339(&timestamp_str)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now());

        Ok(HistoryEntry {
            episode_id: row.get(0)?,
            listened_date,
            timestamp,
            episode_name: row.get(3)?,
            show_name: row.get(4)?,
        })
    }

    fn collect_reviews(
        stmt: &mut rusqlite::Statement<'_>,
        params: &[&dyn rusqlite::ToSql],
    ) -> Result<Vec<ReviewRow>, LibraryError> {
        let rows = stmt
            .query_map(params, Self::row_to_review)
            .map_err(|e| LibraryError::Database(e.to_string()))?;

        let mut reviews = Vec::new();
        for row in rows {
            reviews.push(row.map_err(|e| LibraryError::Database(e.to_string()))?);
        }
        Ok(reviews)
    }

    fn collect_episodes(
        stmt: &mut rusqlite::Statement<'_>,
        params: &[&dyn rusqlite::ToSql],
    ) -> Result<Vec<EpisodeRow>, LibraryError> {
        let rows = stmt
            .query_map(params, Self::row_to_episode)
            .map_err(|e| LibraryError::Database(e.to_string()))?;

        let mut episodes = Vec::new();
        for row in rows {
            episodes.push(row.map_err(|e| LibraryError::Database(e.to_string()))?);
        }
        Ok(episodes)
    }
}

const REVIEW_SELECT: &str = "SELECT r.id, r.episode_id, r.rating, r.review, r.timestamp,
        e.name, e.release_date, e.image_url, s.name
 FROM reviews r
 JOIN episodes e ON r.episode_id = e.id
 JOIN shows s ON e.show_id = s.id";

impl Library for SqliteLibrary {
    fn list_shows(&self) -> Result<Vec<Show>, LibraryError> {
        let conn = self.conn.lock().unwrap();

        let mut stmt = conn
            .prepare("SELECT id, name, publisher, total_episodes, images FROM shows ORDER BY name")
            .map_err(|e| LibraryError::Database(e.to_string()))?;

        let rows = stmt
            .query_map([], Self::row_to_show_raw)
            .map_err(|e| LibraryError::Database(e.to_string()))?;

        let mut shows = Vec::new();
        for row in rows {
            let (mut show, images_raw) =
                row.map_err(|e| LibraryError::Database(e.to_string()))?;
            show.images = Self::decode_images(&images_raw)?;
            shows.push(show);
        }
        Ok(shows)
    }

    fn get_show(&self, show_id: &str) -> Result<Show, LibraryError> {
        let conn = self.conn.lock().unwrap();

        let (mut show, images_raw) = conn
            .query_row(
                "SELECT id, name, publisher, total_episodes, images FROM shows WHERE id = ?",
                params![show_id],
                Self::row_to_show_raw,
            )
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => {
                    LibraryError::NotFound(show_id.to_string())
                }
                _ => LibraryError::Database(e.to_string()),
            })?;

        show.images = Self::decode_images(&images_raw)?;
        Ok(show)
    }

    fn upsert_show(&self, show: &Show) -> Result<(), LibraryError> {
        let conn = self.conn.lock().unwrap();
        let images = Self::encode_images(&show.images)?;

        conn.execute(
            "INSERT OR REPLACE INTO shows (id, name, publisher, total_episodes, images)
             VALUES (?, ?, ?, ?, ?)",
            params![
                &show.id,
                &show.name,
                &show.publisher,
                show.total_episodes as i64,
                &images,
            ],
        )
        .map_err(|e| LibraryError::Database(e.to_string()))?;

        Ok(())
    }

    fn list_episodes(&self, query: &EpisodeQuery) -> Result<Vec<EpisodeRow>, LibraryError> {
        let conn = self.conn.lock().unwrap();

        let base = "SELECT e.id, e.show_id, e.name, e.description, e.release_date,
                    e.duration_ms, e.spotify_url, e.image_url, s.name
             FROM episodes e
             JOIN shows s ON e.show_id = s.id";

        let limit = query.limit as i64;
        let offset = query.offset as i64;

        if let Some(show_id) = &query.show_id {
            let sql = format!(
                "{base} WHERE e.show_id = ? ORDER BY e.release_date DESC LIMIT ? OFFSET ?"
            );
            let mut stmt = conn
                .prepare(&sql)
                .map_err(|e| LibraryError::Database(e.to_string()))?;
            Self::collect_episodes(&mut stmt, &[show_id, &limit, &offset])
        } else {
            let sql = format!("{base} ORDER BY e.release_date DESC LIMIT ? OFFSET ?");
            let mut stmt = conn
                .prepare(&sql)
                .map_err(|e| LibraryError::Database(e.to_string()))?;
            Self::collect_episodes(&mut stmt, &[&limit, &offset])
        }
    }

    fn get_episode(&self, episode_id: &str) -> Result<EpisodeRow, LibraryError> {
        let conn = self.conn.lock().unwrap();

        conn.query_row(
            "SELECT e.id, e.show_id, e.name, e.description, e.release_date,
                    e.duration_ms, e.spotify_url, e.image_url, s.name
             FROM episodes e
             JOIN shows s ON e.show_id = s.id
             WHERE e.id = ?",
            params![episode_id],
            Self::row_to_episode,
        )
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => LibraryError::NotFound(episode_id.to_string()),
            _ => LibraryError::Database(e.to_string()),
        })
    }

    fn upsert_episodes(
        &self,
        show_id: &str,
        episodes: &[CatalogEpisode],
    ) -> Result<(), LibraryError> {
        let mut conn = self.conn.lock().unwrap();

        // One transaction so the batch commits at a single boundary.
        let tx = conn
            .transaction()
            .map_err(|e| LibraryError::Database(e.to_string()))?;

        for episode in episodes {
            tx.execute(
                "INSERT OR REPLACE INTO episodes (
                    id, show_id, name, description, release_date,
                    duration_ms, spotify_url, image_url
                 )
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
                params![
                    &episode.id,
                    show_id,
                    &episode.name,
                    &episode.description,
                    &episode.release_date,
                    episode.duration_ms as i64,
                    &episode.external_url,
                    episode.first_image_url(),
                ],
            )
            .map_err(|e| LibraryError::Database(e.to_string()))?;
        }

        tx.commit()
            .map_err(|e| LibraryError::Database(e.to_string()))
    }

    fn add_review(
        &self,
        episode_id: &str,
        rating: i64,
        review: &str,
    ) -> Result<(), LibraryError> {
        if !(1..=5).contains(&rating) {
            return Err(LibraryError::InvalidRating(rating));
        }

        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO reviews (episode_id, rating, review, timestamp) VALUES (?, ?, ?, ?)",
            params![episode_id, rating, review, Utc::now().to_rfc3339()],
        )
        .map_err(|e| LibraryError::Database(e.to_string()))?;

        Ok(())
    }

    fn list_reviews(
        &self,
        show_id: Option<&str>,
        limit: Option<u32>,
    ) -> Result<Vec<ReviewRow>, LibraryError> {
        let conn = self.conn.lock().unwrap();
        // Negative LIMIT means unlimited in SQLite.
        let limit = limit.map(|l| l as i64).unwrap_or(-1);

        if let Some(show_id) = show_id {
            let sql = format!(
                "{REVIEW_SELECT} WHERE e.show_id = ? ORDER BY r.timestamp DESC, r.id DESC LIMIT ?"
            );
            let mut stmt = conn
                .prepare(&sql)
                .map_err(|e| LibraryError::Database(e.to_string()))?;
            Self::collect_reviews(&mut stmt, &[&show_id, &limit])
        } else {
            let sql = format!("{REVIEW_SELECT} ORDER BY r.timestamp DESC, r.id DESC LIMIT ?");
            let mut stmt = conn
                .prepare(&sql)
                .map_err(|e| LibraryError::Database(e.to_string()))?;
            Self::collect_reviews(&mut stmt, &[&limit])
        }
    }

    fn search_reviews(
        &self,
        query: &str,
        show_id: Option<&str>,
    ) -> Result<Vec<ReviewRow>, LibraryError> {
        let conn = self.conn.lock().unwrap();
        let pattern = format!("%{}%", query);

        if let Some(show_id) = show_id {
            let sql = format!(
                "{REVIEW_SELECT}
                 WHERE (r.review LIKE ?1 OR e.name LIKE ?1) AND e.show_id = ?2
                 ORDER BY r.timestamp DESC, r.id DESC"
            );
            let mut stmt = conn
                .prepare(&sql)
                .map_err(|e| LibraryError::Database(e.to_string()))?;
            Self::collect_reviews(&mut stmt, &[&pattern, &show_id])
        } else {
            // Without a show filter the show name is matched too.
            let sql = format!(
                "{REVIEW_SELECT}
                 WHERE r.review LIKE ?1 OR e.name LIKE ?1 OR s.name LIKE ?1
                 ORDER BY r.timestamp DESC, r.id DESC"
            );
            let mut stmt = conn
                .prepare(&sql)
                .map_err(|e| LibraryError::Database(e.to_string()))?;
            Self::collect_reviews(&mut stmt, &[&pattern])
        }
    }

    fn mark_listened(
        &self,
        episode_id: &str,
        date: Option<NaiveDate>,
    ) -> Result<(), LibraryError> {
        let conn = self.conn.lock().unwrap();
        let date = date.unwrap_or_else(|| Local::now().date_naive());

        conn.execute(
            "INSERT OR REPLACE INTO listening_history (episode_id, listened_date, timestamp)
             VALUES (?, ?, ?)",
            params![
                episode_id,
                date.format("%Y-%m-%d").to_string(),
                Utc::now().to_rfc3339(),
            ],
        )
        .map_err(|e| LibraryError::Database(e.to_string()))?;

        Ok(())
    }

    fn list_history(
        &self,
        show_id: Option<&str>,
        limit: u32,
    ) -> Result<Vec<HistoryEntry>, LibraryError> {
        let conn = self.conn.lock().unwrap();

        let base = "SELECT h.episode_id, h.listened_date, h.timestamp, e.name, s.name
             FROM listening_history h
             JOIN episodes e ON h.episode_id = e.id
             JOIN shows s ON e.show_id = s.id";

        let mut entries = Vec::new();
        if let Some(show_id) = show_id {
            let sql = format!(
                "{base} WHERE e.show_id = ? ORDER BY h.listened_date DESC, h.timestamp DESC LIMIT ?"
            );
            let mut stmt = conn
                .prepare(&sql)
                .map_err(|e| LibraryError::Database(e.to_string()))?;
            let rows = stmt
                .query_map(params![show_id, limit as i64], Self::row_to_history)
                .map_err(|e| LibraryError::Database(e.to_string()))?;
            for row in rows {
                entries.push(row.map_err(|e| LibraryError::Database(e.to_string()))?);
            }
        } else {
            let sql =
                format!("{base} ORDER BY h.listened_date DESC, h.timestamp DESC LIMIT ?");
            let mut stmt = conn
                .prepare(&sql)
                .map_err(|e| LibraryError::Database(e.to_string()))?;
            let rows = stmt
                .query_map(params![limit as i64], Self::row_to_history)
                .map_err(|e| LibraryError::Database(e.to_string()))?;
            for row in rows {
                entries.push(row.map_err(|e| LibraryError::Database(e.to_string()))?);
            }
        }

        Ok(entries)
    }

    fn listening_stats(&self) -> Result<ListeningStats, LibraryError> {
        let conn = self.conn.lock().unwrap();

        let total_episodes: i64 = conn
            .query_row(
                "SELECT COUNT(DISTINCT episode_id) FROM listening_history",
                [],
                |row| row.get(0),
            )
            .map_err(|e| LibraryError::Database(e.to_string()))?;

        let total_shows: i64 = conn
            .query_row(
                "SELECT COUNT(DISTINCT s.id)
                 FROM shows s
                 JOIN episodes e ON s.id = e.show_id
                 JOIN listening_history h ON e.id = h.episode_id",
                [],
                |row| row.get(0),
            )
            .map_err(|e| LibraryError::Database(e.to_string()))?;

        let mut stmt = conn
            .prepare(
                "SELECT strftime('%Y-%m', listened_date) AS month, COUNT(*) AS count
                 FROM listening_history
                 GROUP BY month
                 ORDER BY month DESC
                 LIMIT 12",
            )
            .map_err(|e| LibraryError::Database(e.to_string()))?;

        let rows = stmt
            .query_map([], |row| {
                Ok(MonthlyCount {
                    month: row.get(0)?,
                    count: row.get::<_, i64>(1)? as u64,
                })
            })
            .map_err(|e| LibraryError::Database(e.to_string()))?;

        let mut monthly_stats = Vec::new();
        for row in rows {
            monthly_stats.push(row.map_err(|e| LibraryError::Database(e.to_string()))?);
        }

        Ok(ListeningStats {
            total_episodes: total_episodes as u64,
            total_shows: total_shows as u64,
            monthly_stats,
        })
    }
}
