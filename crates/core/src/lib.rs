pub mod catalog;
pub mod config;
pub mod library;
pub mod metrics;
pub mod testing;

pub use catalog::{
    CatalogEpisode, CatalogError, CatalogShow, EpisodePage, PodcastCatalog, ShowImage,
    SpotifyClient,
};
pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, DatabaseConfig,
    SanitizedConfig, ServerConfig, SpotifyConfig,
};
pub use library::{
    EpisodeQuery, EpisodeRow, HistoryEntry, Library, LibraryError, ListeningStats, MonthlyCount,
    ReviewRow, Show, SqliteLibrary,
};
