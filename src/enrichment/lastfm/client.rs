//! Last.fm HTTP client
//!
//! Read-only, unsigned calls; only an API key is needed.
//!
//! API: https://www.last.fm/api

use super::dto;
use crate::enrichment::domain::EnrichmentError;

/// Size label used for album artwork
pub const COVER_SIZE: &str = "large";

/// Last.fm API client
pub struct LastFmClient {
    http_client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl LastFmClient {
    /// Create a new client
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, "https://ws.audioscrobbler.com/2.0/")
    }

    /// Create a client with a custom base URL (tests)
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: base_url.into(),
        }
    }

    /// URL of the album's `large` cover image, if Last.fm has one
    pub async fn find_artwork(
        &self,
        artist: &str,
        album: &str,
    ) -> Result<Option<String>, EnrichmentError> {
        let info = self.album_info(artist, album).await?;
        Ok(info.album.image_url(COVER_SIZE).map(str::to_string))
    }

    /// `album.getinfo` for an artist/album pair
    pub async fn album_info(
        &self,
        artist: &str,
        album: &str,
    ) -> Result<dto::AlbumInfoResponse, EnrichmentError> {
        let params = [
            ("method", "album.getinfo"),
            ("api_key", self.api_key.as_str()),
            ("artist", artist),
            ("album", album),
            ("autocorrect", "1"),
            ("format", "json"),
        ];

        let response = self
            .http_client
            .get(&self.base_url)
            .query(&params)
            .send()
            .await
            .map_err(|e| EnrichmentError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| EnrichmentError::Network(e.to_string()))?;

        // Last.fm reports failures in the body, often with a non-200 status too
        if let Ok(json) = serde_json::from_str::<serde_json::Value>(&body)
            && let Some(error) = api_error(&json)
        {
            return Err(error);
        }

        if !status.is_success() {
            return Err(EnrichmentError::from_status(status));
        }

        serde_json::from_str::<dto::AlbumInfoResponse>(&body)
            .map_err(|e| EnrichmentError::Parse(e.to_string()))
    }
}

/// Map a Last.fm `{"error": code, "message": ...}` body to an error
fn api_error(json: &serde_json::Value) -> Option<EnrichmentError> {
    let code = json.get("error").and_then(|e| e.as_u64())?;
    let message = json
        .get("message")
        .and_then(|m| m.as_str())
        .unwrap_or("Unknown error")
        .to_string();

    Some(match code {
        6 => EnrichmentError::NoMatches,
        29 => EnrichmentError::RateLimited,
        _ => EnrichmentError::ApiError(format!("Last.fm error {code}: {message}")),
    })
}
