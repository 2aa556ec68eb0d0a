//! Embedding: `cover.jpg` -> every audio file of the folder.
//!
//! A file's existing picture is only replaced by a strictly larger one
//! (both dimensions), so re-running never downgrades artwork.

use std::path::Path;

use tracing::{debug, info, warn};

use crate::cover::{
    CoverState, NormalizeOptions, Resolution, SidecarCover, embedded_resolution, inspect_cover,
    normalize, replace_artwork,
};
use crate::error::Result;
use crate::library::audio_files;

use super::{FolderOutcome, SkipReason, skip};

#[derive(Debug, Clone, Copy, Default)]
pub struct EmbedOptions {
    pub normalize: NormalizeOptions,
    /// Decide everything, write nothing
    pub dry_run: bool,
}

/// JPEG bytes ready to embed
#[derive(Debug, Clone)]
pub struct PreparedCover {
    pub data: Vec<u8>,
    pub resolution: Resolution,
    /// Re-encoded by the normaliser rather than taken verbatim
    pub normalized: bool,
}

/// Turn a validated `cover.jpg` into the bytes to embed.
///
/// A JPEG smaller than the target in at least one dimension is used
/// byte-for-byte. Anything else goes through the normaliser.
pub fn prepare_cover(cover: &SidecarCover, options: &NormalizeOptions) -> Result<PreparedCover> {
    if cover.info.is_jpeg() && !cover.info.resolution.at_least(options.target) {
        return Ok(PreparedCover {
            data: cover.data.clone(),
            resolution: cover.info.resolution,
            normalized: false,
        });
    }

    let image = normalize(&cover.data, options)?;
    Ok(PreparedCover {
        data: image.data,
        resolution: image.resolution,
        normalized: true,
    })
}

/// Decision taken for one audio file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// Pictures removed and the cover added; `replaced` old pictures dropped
    Embedded { replaced: usize },
    /// Dry run: would have embedded
    WouldEmbed,
    /// Existing artwork is at least as large in one dimension
    KeptExisting { existing: Resolution },
}

/// Embed `cover` into one audio file unless its artwork is as good or better.
///
/// An embedded picture that can't be decoded is an error: the file is
/// left untouched rather than overwritten blind.
pub fn embed_file(path: &Path, cover: &PreparedCover, dry_run: bool) -> Result<FileOutcome> {
    if let Some(existing) = embedded_resolution(path)?
        && !cover.resolution.exceeds(&existing)
    {
        return Ok(FileOutcome::KeptExisting { existing });
    }

    if dry_run {
        return Ok(FileOutcome::WouldEmbed);
    }

    let replaced = replace_artwork(path, cover.data.clone())?;
    Ok(FileOutcome::Embedded { replaced })
}

/// Per-folder embedding counts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmbedReport {
    /// Resolution of the embedded bytes
    pub cover: Option<Resolution>,
    /// Embedded (or, in a dry run, would have been)
    pub embedded: usize,
    pub kept: usize,
    pub failed: usize,
}

/// Validate the folder cover, normalise it and embed it into each audio file.
pub fn embed_folder(folder: &Path, options: &EmbedOptions) -> FolderOutcome {
    let files = match audio_files(folder) {
        Ok(files) => files,
        Err(e) => return skip(folder, SkipReason::Unreadable(e.to_string())),
    };
    if files.is_empty() {
        return skip(folder, SkipReason::NoAudioFiles);
    }

    let sidecar = match inspect_cover(folder) {
        CoverState::Missing => return skip(folder, SkipReason::NoCover),
        CoverState::Empty => return skip(folder, SkipReason::EmptyCover),
        CoverState::Invalid(e) => return skip(folder, SkipReason::InvalidCover(e)),
        CoverState::Valid(cover) => cover,
    };

    let cover = match prepare_cover(&sidecar, &options.normalize) {
        Ok(cover) => cover,
        Err(e) => return skip(folder, SkipReason::InvalidCover(e.to_string())),
    };
    debug!(
        folder = %folder.display(),
        source = %sidecar.info.resolution,
        resolution = %cover.resolution,
        normalized = cover.normalized,
        "Prepared cover"
    );

    let mut report = EmbedReport {
        cover: Some(cover.resolution),
        ..Default::default()
    };

    for file in &files {
        match embed_file(file, &cover, options.dry_run) {
            Ok(FileOutcome::Embedded { replaced }) => {
                info!(file = %file.display(), replaced, resolution = %cover.resolution, "Embedded artwork");
                report.embedded += 1;
            }
            Ok(FileOutcome::WouldEmbed) => {
                info!(file = %file.display(), resolution = %cover.resolution, "Would embed artwork (dry run)");
                report.embedded += 1;
            }
            Ok(FileOutcome::KeptExisting { existing }) => {
                info!(
                    file = %file.display(),
                    existing = %existing,
                    candidate = %cover.resolution,
                    "Embedded artwork is already as large, keeping it"
                );
                report.kept += 1;
            }
            Err(e) => {
                warn!(file = %file.display(), error = %e, "Failed to embed artwork");
                report.failed += 1;
            }
        }
    }

    FolderOutcome::Embedded(report)
}
