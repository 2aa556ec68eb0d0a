//! Extraction: embedded artwork of the first audio file -> `cover.jpg`.

use std::path::Path;

use tracing::info;

use crate::cover::{evaluate, has_cover, read_artwork, write_cover};
use crate::library::audio_files;

use super::{FolderOutcome, SkipReason, skip};

/// Write `cover.jpg` from the first audio file's embedded picture.
///
/// Folders that already have a cover are left alone. Non-JPEG pictures
/// are transcoded at `jpeg_quality`.
pub fn export_folder(folder: &Path, jpeg_quality: u8) -> FolderOutcome {
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

    let artwork = match read_artwork(first) {
        Ok(Some(artwork)) => artwork,
        Ok(None) => return skip(folder, SkipReason::NoEmbeddedArtwork),
        Err(e) => return skip(folder, SkipReason::UnreadableTags(e.to_string())),
    };

    let info = match evaluate(&artwork.data) {
        Ok(info) => info,
        Err(e) => return skip(folder, SkipReason::InvalidArtwork(e.to_string())),
    };

    match write_cover(folder, &artwork.data, &info, jpeg_quality) {
        Ok(cover) => {
            info!(
                source = %first.display(),
                cover = %cover.path.display(),
                resolution = %cover.resolution,
                transcoded = cover.transcoded,
                "Exported cover art"
            );
            FolderOutcome::Exported {
                source: first.clone(),
                cover,
            }
        }
        Err(e) => skip(folder, SkipReason::WriteFailed(e.to_string())),
    }
}
