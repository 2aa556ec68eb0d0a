//! MusicBrainz HTTP client
//!
//! Handles communication with the MusicBrainz web service.
//! See: https://musicbrainz.org/doc/MusicBrainz_API
//!
//! IMPORTANT: MusicBrainz requires a User-Agent with contact information and
//! rate limits to 1 req/sec.

use super::dto;
use crate::enrichment::domain::EnrichmentError;

/// MusicBrainz API client
pub struct MusicBrainzClient {
    http_client: reqwest::Client,
    base_url: String,
}

/// Application part of the User-Agent; the contact email is appended
const USER_AGENT: &str = concat!("cover-minder/", env!("CARGO_PKG_VERSION"));

/// User-Agent in the form MusicBrainz asks for: `app/version ( contact )`
fn user_agent(contact_email: &str) -> String {
    format!("{USER_AGENT} ( {contact_email} )")
}

/// Lucene query for a release by artist and title
fn release_query(artist: &str, album: &str) -> String {
    fn quote(value: &str) -> String {
        let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
        format!("\"{escaped}\"")
    }
    format!("artist:{} AND release:{}", quote(artist), quote(album))
}

impl MusicBrainzClient {
    /// Create a new client identifying itself with `contact_email`
    pub fn new(contact_email: &str) -> Result<Self, EnrichmentError> {
        Self::with_base_url(contact_email, "https://musicbrainz.org/ws/2")
    }

    /// Create a client with a custom base URL (mirrors, tests)
    pub fn with_base_url(
        contact_email: &str,
        base_url: impl Into<String>,
    ) -> Result<Self, EnrichmentError> {
        let http_client = reqwest::Client::builder()
            .user_agent(user_agent(contact_email))
            .build()
            .map_err(|e| EnrichmentError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.into(),
        })
    }

    /// Search for the best-matching release and return its MBID.
    ///
    /// `Ok(None)` when the search has no hits.
    pub async fn search_release(
        &self,
        artist: &str,
        album: &str,
    ) -> Result<Option<String>, EnrichmentError> {
        let response = self.send_search_request(artist, album).await?;
        Ok(response.releases.into_iter().next().map(|r| r.id))
    }

    /// Send the HTTP request and parse the response
    async fn send_search_request(
        &self,
        artist: &str,
        album: &str,
    ) -> Result<dto::ReleaseSearchResponse, EnrichmentError> {
        let url = format!(
            "{}/release?query={}&fmt=json&limit=1",
            self.base_url,
            urlencoding::encode(&release_query(artist, album))
        );

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| EnrichmentError::Network(e.to_string()))?;

        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND
            || status == reqwest::StatusCode::TOO_MANY_REQUESTS
        {
            return Err(EnrichmentError::from_status(status));
        }

        if !status.is_success() {
            // Try to parse error response
            if let Ok(error) = response.json::<dto::ApiError>().await {
                return Err(EnrichmentError::ApiError(error.error));
            }
            return Err(EnrichmentError::from_status(status));
        }

        response
            .json::<dto::ReleaseSearchResponse>()
            .await
            .map_err(|e| EnrichmentError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = MusicBrainzClient::new("me@example.com").unwrap();
        assert_eq!(client.base_url, "https://musicbrainz.org/ws/2");
    }

    #[test]
    fn test_client_with_custom_url() {
        let client = MusicBrainzClient::with_base_url("me@example.com", "http://localhost:8080")
            .unwrap();
        assert_eq!(client.base_url, "http://localhost:8080");
    }

    #[test]
    fn test_user_agent_format() {
        let ua = user_agent("me@example.com");
        assert!(ua.starts_with("cover-minder/"));
        assert!(ua.ends_with("( me@example.com )"));
    }

    #[test]
    fn test_release_query_quotes_values() {
        assert_eq!(
            release_query("Queen", "A Night at the Opera"),
            r#"artist:"Queen" AND release:"A Night at the Opera""#
        );
        assert_eq!(
            release_query(r#"The "Band""#, "X"),
            r#"artist:"The \"Band\"" AND release:"X""#
        );
    }
}
