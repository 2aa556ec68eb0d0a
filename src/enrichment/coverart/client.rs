//! Cover Art Archive HTTP client
//!
//! Lists the artwork stored for a MusicBrainz release.
//! No API key required, but please respect their rate limits.
//!
//! API: https://coverartarchive.org

use super::dto;
use crate::enrichment::domain::EnrichmentError;

/// Cover Art Archive client
pub struct CoverArtClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl CoverArtClient {
    /// Create a new client
    pub fn new() -> Self {
        Self::with_base_url("https://coverartarchive.org")
    }

    /// Create a client with a custom base URL (mirrors, tests)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// URL of the release's front cover, if the archive has one
    pub async fn front_image_url(
        &self,
        release_id: &str,
    ) -> Result<Option<String>, EnrichmentError> {
        let listing = self.list_cover_art(release_id).await?;
        Ok(listing.front_image().map(|image| image.image.clone()))
    }

    /// List all cover art for a release
    pub async fn list_cover_art(
        &self,
        release_id: &str,
    ) -> Result<dto::CoverArtResponse, EnrichmentError> {
        let url = format!("{}/release/{}", self.base_url, release_id);

        let response = self
            .http_client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| EnrichmentError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(EnrichmentError::from_status(status));
        }

        response
            .json::<dto::CoverArtResponse>()
            .await
            .map_err(|e| EnrichmentError::Parse(e.to_string()))
    }
}

impl Default for CoverArtClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = CoverArtClient::new();
        assert_eq!(client.base_url, "https://coverartarchive.org");
    }

    #[test]
    fn test_client_with_custom_url() {
        let client = CoverArtClient::with_base_url("http://localhost:9000");
        assert_eq!(client.base_url, "http://localhost:9000");
    }
}
