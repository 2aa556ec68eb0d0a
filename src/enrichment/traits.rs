//! Trait definitions for artwork sources and the image downloader.
//!
//! These traits enable dependency injection and mocking for tests.
//! Production code uses the real client implementations, while tests
//! can substitute mock implementations.
//!
//! # Example
//!
//! ```ignore
//! use cover_minder::enrichment::traits::ArtworkSource;
//!
//! // In production code:
//! async fn first_url<S: ArtworkSource>(source: &S, id: &AlbumIdentity) {
//!     let url = source.lookup(id).await?;
//! }
//!
//! // In tests:
//! let source = MockSource::found(SourceKind::ITunes, "https://example.com/a.jpg");
//! ```

use async_trait::async_trait;

use super::coverart::CoverArtClient;
use super::domain::{AlbumIdentity, EnrichmentError, SourceKind};
use super::download::{DownloadedImage, HttpImageFetcher};
use super::itunes::ITunesClient;
use super::lastfm::LastFmClient;
use super::musicbrainz::MusicBrainzClient;

/// One artwork provider.
///
/// Implement this trait to create mock implementations for testing.
#[async_trait]
pub trait ArtworkSource: Send + Sync {
    /// Which provider this is
    fn kind(&self) -> SourceKind;

    /// Look up an artwork URL. `Ok(None)` means the provider answered but
    /// had nothing suitable.
    async fn lookup(&self, identity: &AlbumIdentity) -> Result<Option<String>, EnrichmentError>;
}

/// Downloads a chosen candidate.
#[async_trait]
pub trait ImageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<DownloadedImage, EnrichmentError>;
}

/// MusicBrainz release search.
#[async_trait]
pub trait MusicBrainzApi: Send + Sync {
    /// MBID of the best-matching release
    async fn search_release(
        &self,
        artist: &str,
        album: &str,
    ) -> Result<Option<String>, EnrichmentError>;
}

/// Cover Art Archive front cover lookup.
#[async_trait]
pub trait CoverArtApi: Send + Sync {
    async fn front_image_url(&self, release_id: &str) -> Result<Option<String>, EnrichmentError>;
}

/// MusicBrainz release search followed by the Cover Art Archive listing
pub struct MusicBrainzCoverArt<M = MusicBrainzClient, C = CoverArtClient> {
    pub musicbrainz: M,
    pub coverart: C,
}

// Implement traits for real clients

#[async_trait]
impl MusicBrainzApi for MusicBrainzClient {
    async fn search_release(
        &self,
        artist: &str,
        album: &str,
    ) -> Result<Option<String>, EnrichmentError> {
        MusicBrainzClient::search_release(self, artist, album).await
    }
}

#[async_trait]
impl CoverArtApi for CoverArtClient {
    async fn front_image_url(&self, release_id: &str) -> Result<Option<String>, EnrichmentError> {
        CoverArtClient::front_image_url(self, release_id).await
    }
}

#[async_trait]
impl<M: MusicBrainzApi, C: CoverArtApi> ArtworkSource for MusicBrainzCoverArt<M, C> {
    fn kind(&self) -> SourceKind {
        SourceKind::MusicBrainz
    }

    async fn lookup(&self, identity: &AlbumIdentity) -> Result<Option<String>, EnrichmentError> {
        let Some(release_id) = self
            .musicbrainz
            .search_release(&identity.artist, &identity.album)
            .await?
        else {
            return Ok(None);
        };
        tracing::debug!(release_id = %release_id, "MusicBrainz release found");
        self.coverart.front_image_url(&release_id).await
    }
}

#[async_trait]
impl ArtworkSource for ITunesClient {
    fn kind(&self) -> SourceKind {
        SourceKind::ITunes
    }

    async fn lookup(&self, identity: &AlbumIdentity) -> Result<Option<String>, EnrichmentError> {
        self.find_artwork(&identity.artist, &identity.album).await
    }
}

#[async_trait]
impl ArtworkSource for LastFmClient {
    fn kind(&self) -> SourceKind {
        SourceKind::LastFm
    }

    async fn lookup(&self, identity: &AlbumIdentity) -> Result<Option<String>, EnrichmentError> {
        self.find_artwork(&identity.artist, &identity.album).await
    }
}

#[async_trait]
impl ImageFetcher for HttpImageFetcher {
    async fn fetch(&self, url: &str) -> Result<DownloadedImage, EnrichmentError> {
        self.download(url).await
    }
}
