//! Fetching: album identity -> provider chain -> download -> `cover.jpg`.

use std::path::Path;

use tracing::{info, warn};

use crate::cover::{Resolution, evaluate, has_cover, write_cover};
use crate::enrichment::{ArtworkResolver, ImageFetcher};
use crate::library::audio_files;
use crate::metadata;

use super::{FolderOutcome, SkipReason, skip};

/// What to do with downloaded artwork below the minimum resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FetchPolicy {
    /// Enforce `min_res`
    pub use_hires: bool,
    pub min_res: u32,
    /// Keep undersized artwork anyway (with a warning)
    pub use_fallback: bool,
}

impl FetchPolicy {
    /// `Err(reason)` when the artwork must be rejected
    fn check(&self, resolution: Resolution) -> Result<(), SkipReason> {
        if !self.use_hires || resolution.at_least(self.min_res) {
            return Ok(());
        }
        if self.use_fallback {
            warn!(
                resolution = %resolution,
                min_res = self.min_res,
                "Artwork is below the minimum resolution, keeping it as a fallback"
            );
            Ok(())
        } else {
            Err(SkipReason::BelowMinimum(resolution))
        }
    }
}

/// Look up, download and write `cover.jpg` for a folder that has none.
pub async fn fetch_folder(
    folder: &Path,
    resolver: &ArtworkResolver,
    fetcher: &dyn ImageFetcher,
    policy: &FetchPolicy,
    jpeg_quality: u8,
) -> FolderOutcome {
    if has_cover(folder) {
        return skip(folder, SkipReason::CoverExists);
    }

    let files = match audio_files(folder) {
        Ok(files) => files,
        Err(e) => return skip(folder, SkipReason::Unreadable(e.to_string())),
    };
    let Some(first) = files.first() else {
        return skip(folder, SkipReason::NoAudioFiles);
    };

    // Unreadable tags still get a lookup, under the placeholder identity
    let tags = metadata::read(first).unwrap_or_else(|e| {
        warn!(file = %first.display(), error = %e, "Could not read tags");
        metadata::TrackTags::default()
    });
    let identity = tags.identity();
    info!(folder = %folder.display(), album = %identity, "Looking up artwork");

    let Some(candidate) = resolver.resolve(&identity).await else {
        return skip(folder, SkipReason::NoCandidate);
    };

    let image = match fetcher.fetch(&candidate.url).await {
        Ok(image) => image,
        Err(e) => return skip(folder, SkipReason::DownloadFailed(e.to_string())),
    };

    let info = match evaluate(&image.data) {
        Ok(info) => info,
        Err(e) => return skip(folder, SkipReason::InvalidArtwork(e.to_string())),
    };

    if let Err(reason) = policy.check(info.resolution) {
        return skip(folder, reason);
    }

    match write_cover(folder, &image.data, &info, jpeg_quality) {
        Ok(cover) => {
            info!(
                album = %identity,
                source = %candidate.source,
                cover = %cover.path.display(),
                resolution = %cover.resolution,
                "Artwork saved"
            );
            FolderOutcome::Fetched {
                identity,
                candidate,
                cover,
            }
        }
        Err(e) => skip(folder, SkipReason::WriteFailed(e.to_string())),
    }
}
