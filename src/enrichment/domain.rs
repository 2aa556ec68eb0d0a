//! Internal domain models for artwork lookup.
//!
//! These types are OUR types - they don't change when external APIs change.
//! Provider responses get converted into these types inside each client.

use std::fmt;

/// Artist and album of a folder, read from its first audio file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumIdentity {
    pub artist: String,
    pub album: String,
}

impl AlbumIdentity {
    pub fn new(artist: impl Into<String>, album: impl Into<String>) -> Self {
        Self {
            artist: artist.into(),
            album: album.into(),
        }
    }
}

impl fmt::Display for AlbumIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.artist, self.album)
    }
}

/// Where a candidate came from. Declaration order is lookup priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SourceKind {
    /// MusicBrainz release search + Cover Art Archive
    MusicBrainz,
    ITunes,
    LastFm,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SourceKind::MusicBrainz => "MusicBrainz",
            SourceKind::ITunes => "iTunes",
            SourceKind::LastFm => "Last.fm",
        })
    }
}

/// An artwork URL proposed by one source. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtworkCandidate {
    pub url: String,
    pub source: SourceKind,
}

/// Errors that can occur while looking up or downloading artwork
#[derive(Debug, Clone, thiserror::Error)]
pub enum EnrichmentError {
    #[error("API request failed: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("No matches found")]
    NoMatches,

    #[error("Rate limited - try again later")]
    RateLimited,

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    #[error("{url} is not an image (Content-Type: {content_type})")]
    NotAnImage { url: String, content_type: String },
}

impl EnrichmentError {
    /// Classify a non-success HTTP status.
    pub fn from_status(status: reqwest::StatusCode) -> Self {
        match status {
            reqwest::StatusCode::NOT_FOUND => EnrichmentError::NoMatches,
            reqwest::StatusCode::TOO_MANY_REQUESTS => EnrichmentError::RateLimited,
            _ => EnrichmentError::Network(format!(
                "HTTP {}: {}",
                status,
                status.canonical_reason().unwrap_or("Unknown")
            )),
        }
    }
}
