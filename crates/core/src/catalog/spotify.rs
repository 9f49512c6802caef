//! Spotify Web API client.
//!
//! Uses the client-credentials flow: a bearer token is fetched from the
//! accounts endpoint with HTTP basic auth and cached in-process until
//! shortly before it expires. No retries; upstream failures surface
//! immediately to the caller.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::debug;

use super::{CatalogEpisode, CatalogError, CatalogShow, EpisodePage, PodcastCatalog, ShowImage};
use crate::config::SpotifyConfig;
use crate::metrics::{CATALOG_REQUESTS, CATALOG_REQUEST_DURATION, CATALOG_TOKEN_REFRESHES};

/// Refresh the token this long before its reported expiry.
const TOKEN_EXPIRY_MARGIN: Duration = Duration::from_secs(60);

struct CachedToken {
    token: String,
    expires_at: Instant,
}

/// Spotify Web API client.
pub struct SpotifyClient {
    client: Client,
    api_base: String,
    auth_base: String,
    client_id: String,
    client_secret: String,
    token: Mutex<Option<CachedToken>>,
}

impl SpotifyClient {
    /// Create a new client from configuration.
    pub fn new(config: SpotifyConfig) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()?;

        let api_base = config
            .api_base_url
            .unwrap_or_else(|| "https://api.spotify.com".to_string());
        let auth_base = config
            .auth_base_url
            .unwrap_or_else(|| "https://accounts.spotify.com".to_string());

        Ok(Self {
            client,
            api_base,
            auth_base,
            client_id: config.client_id,
            client_secret: config.client_secret,
            token: Mutex::new(None),
        })
    }

    /// Return a valid access token, refreshing it if absent or near expiry.
    async fn access_token(&self) -> Result<String, CatalogError> {
        let mut guard = self.token.lock().await;

        if let Some(cached) = guard.as_ref() {
            if Instant::now() < cached.expires_at {
                return Ok(cached.token.clone());
            }
        }

        debug!("Requesting new Spotify access token");
        CATALOG_TOKEN_REFRESHES.inc();

        let url = format!("{}/api/token", self.auth_base);
        let response = self
            .client
            .post(&url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_error_status(status, body, "token request"));
        }

        let parsed: SpTokenResponse = response.json().await.map_err(|e| {
            CatalogError::Parse(format!("Failed to parse token response: {}", e))
        })?;

        let ttl = Duration::from_secs(parsed.expires_in).saturating_sub(TOKEN_EXPIRY_MARGIN);
        let token = parsed.access_token;
        *guard = Some(CachedToken {
            token: token.clone(),
            expires_at: Instant::now() + ttl,
        });

        Ok(token)
    }

    /// Issue an authenticated GET, recording request metrics per endpoint.
    async fn get(
        &self,
        endpoint: &'static str,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<reqwest::Response, CatalogError> {
        let token = self.access_token().await?;

        let start = Instant::now();
        let result = self
            .client
            .get(url)
            .bearer_auth(token)
            .query(query)
            .send()
            .await;
        CATALOG_REQUEST_DURATION
            .with_label_values(&[endpoint])
            .observe(start.elapsed().as_secs_f64());

        let response = result?;
        CATALOG_REQUESTS
            .with_label_values(&[endpoint, response.status().as_str()])
            .inc();

        Ok(response)
    }
}

#[async_trait]
impl PodcastCatalog for SpotifyClient {
    async fn search_shows(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<Vec<CatalogShow>, CatalogError> {
        let limit = limit.min(50); // Spotify max per request
        debug!("Spotify show search: query='{}', limit={}", query, limit);

        let url = format!("{}/v1/search", self.api_base);
        let response = self
            .get(
                "search",
                &url,
                &[
                    ("q", query.to_string()),
                    ("type", "show".to_string()),
                    ("limit", limit.to_string()),
                ],
            )
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_error_status(status, body, query));
        }

        let parsed: SpSearchResponse = response.json().await.map_err(|e| {
            CatalogError::Parse(format!("Failed to parse search response: {}", e))
        })?;

        Ok(parsed.shows.items.into_iter().map(Into::into).collect())
    }

    async fn show_details(&self, show_id: &str) -> Result<CatalogShow, CatalogError> {
        debug!("Spotify show details: id={}", show_id);

        let url = format!("{}/v1/shows/{}", self.api_base, show_id);
        let response = self.get("show", &url, &[]).await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_error_status(status, body, show_id));
        }

        let parsed: SpShow = response.json().await.map_err(|e| {
            CatalogError::Parse(format!("Failed to parse show response: {}", e))
        })?;

        Ok(parsed.into())
    }

    async fn episode_page(
        &self,
        show_id: &str,
        limit: u32,
        offset: u32,
    ) -> Result<EpisodePage, CatalogError> {
        debug!(
            "Spotify episodes: show={}, limit={}, offset={}",
            show_id, limit, offset
        );

        let url = format!("{}/v1/shows/{}/episodes", self.api_base, show_id);
        let response = self
            .get(
                "episodes",
                &url,
                &[("limit", limit.to_string()), ("offset", offset.to_string())],
            )
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_error_status(status, body, show_id));
        }

        let parsed: SpEpisodesResponse = response.json().await.map_err(|e| {
            CatalogError::Parse(format!("Failed to parse episodes response: {}", e))
        })?;

        Ok(EpisodePage {
            items: parsed.items.into_iter().map(Into::into).collect(),
            total: parsed.total,
        })
    }
}

/// Map a non-2xx upstream status to a catalog error.
fn map_error_status(status: StatusCode, body: String, subject: &str) -> CatalogError {
    match status.as_u16() {
        401 => CatalogError::Unauthorized(if body.is_empty() {
            "invalid or expired credentials".to_string()
        } else {
            body
        }),
        404 => CatalogError::NotFound(subject.to_string()),
        429 => CatalogError::RateLimited,
        s => CatalogError::Api {
            status: s,
            message: body,
        },
    }
}

// ============================================================================
// Spotify API Response Types (private)
// ============================================================================

#[derive(Debug, Deserialize)]
struct SpTokenResponse {
    access_token: String,
    expires_in: u64,
}

#[derive(Debug, Deserialize)]
struct SpSearchResponse {
    shows: SpShowPage,
}

#[derive(Debug, Deserialize)]
struct SpShowPage {
    #[serde(default)]
    items: Vec<SpShow>,
}

#[derive(Debug, Deserialize)]
struct SpShow {
    id: String,
    name: String,
    #[serde(default)]
    publisher: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    total_episodes: u32,
    #[serde(default)]
    images: Vec<SpImage>,
}

#[derive(Debug, Deserialize)]
struct SpImage {
    url: String,
    #[serde(default)]
    width: Option<u32>,
    #[serde(default)]
    height: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct SpEpisodesResponse {
    #[serde(default)]
    items: Vec<SpEpisode>,
    #[serde(default)]
    total: u32,
}

#[derive(Debug, Deserialize)]
struct SpEpisode {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    release_date: String,
    #[serde(default)]
    duration_ms: u64,
    external_urls: SpExternalUrls,
    #[serde(default)]
    images: Vec<SpImage>,
}

#[derive(Debug, Deserialize)]
struct SpExternalUrls {
    #[serde(default)]
    spotify: String,
}

impl From<SpImage> for ShowImage {
    fn from(image: SpImage) -> Self {
        Self {
            url: image.url,
            width: image.width,
            height: image.height,
        }
    }
}

impl From<SpShow> for CatalogShow {
    fn from(show: SpShow) -> Self {
        Self {
            id: show.id,
            name: show.name,
            publisher: show.publisher,
            description: show.description,
            total_episodes: show.total_episodes,
            images: show.images.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<SpEpisode> for CatalogEpisode {
    fn from(episode: SpEpisode) -> Self {
        Self {
            id: episode.id,
            name: episode.name,
            description: episode.description,
            release_date: episode.release_date,
            duration_ms: episode.duration_ms,
            external_url: episode.external_urls.spotify,
            images: episode.images.into_iter().map(Into::into).collect(),
        }
    }
}
