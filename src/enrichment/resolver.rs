//! Artwork source resolution.
//!
//! Providers are queried strictly in priority order and the first URL wins:
//!
//! 1. MusicBrainz release search + Cover Art Archive (`use_musicbrainz`)
//! 2. iTunes album search (`use_hires_priority`)
//! 3. Last.fm `album.getinfo` (unless `no_low_res`)
//!
//! Every lookup fails soft. An error from one provider is logged and the
//! next provider is tried.

use tracing::{debug, info, warn};

use super::coverart::CoverArtClient;
use super::domain::{AlbumIdentity, ArtworkCandidate, EnrichmentError, SourceKind};
use super::itunes::ITunesClient;
use super::lastfm::LastFmClient;
use super::musicbrainz::MusicBrainzClient;
use super::traits::{ArtworkSource, MusicBrainzCoverArt};

/// Which providers to use and their credentials
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceSettings {
    pub use_musicbrainz: bool,
    pub use_hires_priority: bool,
    /// Never build or query the low-resolution Last.fm source
    pub no_low_res: bool,
    /// Contact address sent in the MusicBrainz User-Agent
    pub musicbrainz_email: String,
    pub lastfm_api_key: String,
}

/// Ordered chain of artwork sources
pub struct ArtworkResolver {
    sources: Vec<Box<dyn ArtworkSource>>,
}

impl ArtworkResolver {
    /// Build the provider chain enabled by `settings`.
    pub fn from_settings(settings: &SourceSettings) -> Result<Self, EnrichmentError> {
        let mut sources: Vec<Box<dyn ArtworkSource>> = Vec::new();

        if settings.use_musicbrainz {
            sources.push(Box::new(MusicBrainzCoverArt {
                musicbrainz: MusicBrainzClient::new(&settings.musicbrainz_email)?,
                coverart: CoverArtClient::new(),
            }));
        }
        if settings.use_hires_priority {
            sources.push(Box::new(ITunesClient::new()));
        }
        if !settings.no_low_res {
            sources.push(Box::new(LastFmClient::new(settings.lastfm_api_key.clone())));
        }

        Ok(Self::with_sources(sources))
    }

    /// Use an explicit chain, queried in the given order.
    pub fn with_sources(sources: Vec<Box<dyn ArtworkSource>>) -> Self {
        Self { sources }
    }

    pub fn source_kinds(&self) -> Vec<SourceKind> {
        self.sources.iter().map(|s| s.kind()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// First candidate any source returns, or `None` once all are exhausted.
    pub async fn resolve(&self, identity: &AlbumIdentity) -> Option<ArtworkCandidate> {
        for source in &self.sources {
            let kind = source.kind();
            match source.lookup(identity).await {
                Ok(Some(url)) if !url.trim().is_empty() => {
                    info!(source = %kind, album = %identity, url = %url, "Artwork candidate found");
                    return Some(ArtworkCandidate { url, source: kind });
                }
                Ok(_) => {
                    debug!(source = %kind, album = %identity, "No artwork from source");
                }
                Err(EnrichmentError::NoMatches) => {
                    debug!(source = %kind, album = %identity, "Source has no match");
                }
                Err(e) => {
                    warn!(source = %kind, album = %identity, error = %e, "Artwork lookup failed");
                }
            }
        }

        None
    }
}
