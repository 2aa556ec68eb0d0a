//! Artwork lookup - finds cover art for an album on external services.
//!
//! # Architecture
//!
//! This module follows a clean separation between:
//! - **Domain models** (`domain.rs`) - Internal types that represent our business logic
//! - **API DTOs** (`*/dto.rs`) - Exact API response shapes
//! - **Clients** - HTTP clients for MusicBrainz, Cover Art Archive, iTunes and Last.fm
//! - **Traits** (`traits.rs`) - Seams for swapping real clients with mocks
//! - **Resolver** - Priority-ordered, soft-failing provider chain
//! - **Download** - Fetching the chosen image
//!
//! # Usage
//!
//! ```ignore
//! use enrichment::{ArtworkResolver, AlbumIdentity, SourceSettings};
//!
//! let resolver = ArtworkResolver::from_settings(&settings)?;
//! if let Some(candidate) = resolver.resolve(&AlbumIdentity::new("Queen", "Innuendo")).await {
//!     println!("{} from {}", candidate.url, candidate.source);
//! }
//! ```

pub mod coverart;
pub mod domain;
pub mod download;
pub mod itunes;
pub mod lastfm;
pub mod musicbrainz;
pub mod resolver;
pub mod traits;

pub use domain::{AlbumIdentity, ArtworkCandidate, EnrichmentError, SourceKind};
pub use download::{DownloadedImage, HttpImageFetcher};
pub use resolver::{ArtworkResolver, SourceSettings};
pub use traits::{ArtworkSource, ImageFetcher};
