use std::sync::Arc;

use earmark_core::{Config, Library, PodcastCatalog, SanitizedConfig};

/// Shared application state
pub struct AppState {
    config: Config,
    library: Arc<dyn Library>,
    catalog: Option<Arc<dyn PodcastCatalog>>,
}

impl AppState {
    pub fn new(
        config: Config,
        library: Arc<dyn Library>,
        catalog: Option<Arc<dyn PodcastCatalog>>,
    ) -> Self {
        Self {
            config,
            library,
            catalog,
        }
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn library(&self) -> &dyn Library {
        self.library.as_ref()
    }

    /// The catalog client, absent when no credentials are configured.
    pub fn catalog(&self) -> Option<&Arc<dyn PodcastCatalog>> {
        self.catalog.as_ref()
    }
}
