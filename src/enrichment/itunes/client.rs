//! iTunes Search HTTP client
//!
//! Album search against the public iTunes Search API. No key required.
//!
//! API: https://itunes.apple.com/search

use super::dto;
use crate::enrichment::domain::EnrichmentError;

/// How many album hits to scan for an artist match
const SEARCH_LIMIT: u32 = 25;

/// iTunes Search client
pub struct ITunesClient {
    http_client: reqwest::Client,
    base_url: String,
}

/// Rewrite a 100x100 artwork URL to its 600x600 variant
pub fn hires_artwork_url(url: &str) -> String {
    url.replace("100x100", "600x600")
}

impl ITunesClient {
    /// Create a new client
    pub fn new() -> Self {
        Self::with_base_url("https://itunes.apple.com")
    }

    /// Create a client with a custom base URL (tests)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// 600x600 artwork URL of the first album whose artist matches
    /// `artist` case-insensitively.
    pub async fn find_artwork(
        &self,
        artist: &str,
        album: &str,
    ) -> Result<Option<String>, EnrichmentError> {
        let response = self.search_albums(album).await?;
        Ok(select_artwork(&response.results, artist))
    }

    /// Search albums by free-text term
    pub async fn search_albums(&self, term: &str) -> Result<dto::SearchResponse, EnrichmentError> {
        let url = format!(
            "{}/search?term={}&media=music&entity=album&limit={}",
            self.base_url,
            urlencoding::encode(term),
            SEARCH_LIMIT
        );

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| EnrichmentError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(EnrichmentError::from_status(status));
        }

        response
            .json::<dto::SearchResponse>()
            .await
            .map_err(|e| EnrichmentError::Parse(e.to_string()))
    }
}

impl Default for ITunesClient {
    fn default() -> Self {
        Self::new()
    }
}

fn select_artwork(results: &[dto::Collection], artist: &str) -> Option<String> {
    let wanted = artist.to_lowercase();
    results
        .iter()
        .filter(|hit| {
            hit.artist_name
                .as_deref()
                .is_some_and(|name| name.to_lowercase() == wanted)
        })
        .find_map(|hit| hit.artwork_url100.as_deref())
        .map(hires_artwork_url)
}
