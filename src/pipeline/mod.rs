//! Per-folder cover decisions.
//!
//! Each command runs one function per folder and gets a [`FolderOutcome`]
//! back. Nothing in here returns an error: every failure is classified as a
//! [`SkipReason`] (or counted per file in an [`EmbedReport`]) so one bad
//! folder never stops a library run.
//!
//! ```text
//! export: no cover.jpg -> first audio file's picture -> cover.jpg
//! fetch:  no cover.jpg -> identity -> resolver -> download -> cover.jpg
//! embed:  cover.jpg -> validate -> normalise -> every audio file
//! ```

mod embed;
mod export;
mod fetch;

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::cover::{Resolution, WrittenCover};
use crate::enrichment::{AlbumIdentity, ArtworkCandidate};

pub use embed::{EmbedOptions, EmbedReport, embed_folder};
pub use export::export_folder;
pub use fetch::{FetchPolicy, fetch_folder};

/// What happened to one folder
#[derive(Debug)]
pub enum FolderOutcome {
    Skipped(SkipReason),
    /// `cover.jpg` written from an audio file's embedded picture
    Exported { source: PathBuf, cover: WrittenCover },
    /// `cover.jpg` written from a downloaded candidate
    Fetched {
        identity: AlbumIdentity,
        candidate: ArtworkCandidate,
        cover: WrittenCover,
    },
    /// Cover embedded into the folder's audio files
    Embedded(EmbedReport),
}

impl FolderOutcome {
    pub fn is_skipped(&self) -> bool {
        matches!(self, FolderOutcome::Skipped(_))
    }
}

/// Why a folder was left alone
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// export/fetch: `cover.jpg` is already there
    CoverExists,
    /// embed: nothing to embed
    NoCover,
    EmptyCover,
    InvalidCover(String),
    NoAudioFiles,
    NoEmbeddedArtwork,
    UnreadableTags(String),
    NoCandidate,
    DownloadFailed(String),
    /// Downloaded artwork is below `min_res` and fallback is off
    BelowMinimum(Resolution),
    /// Embedded or downloaded bytes aren't a decodable image
    InvalidArtwork(String),
    WriteFailed(String),
    /// The folder itself couldn't be listed
    Unreadable(String),
}

impl SkipReason {
    /// Skips that point at something wrong, as opposed to nothing to do.
    pub fn is_problem(&self) -> bool {
        !matches!(
            self,
            SkipReason::CoverExists
                | SkipReason::NoCover
                | SkipReason::NoAudioFiles
                | SkipReason::NoEmbeddedArtwork
                | SkipReason::NoCandidate
        )
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::CoverExists => write!(f, "cover.jpg already exists"),
            SkipReason::NoCover => write!(f, "no cover.jpg"),
            SkipReason::EmptyCover => write!(f, "cover.jpg is empty"),
            SkipReason::InvalidCover(e) => write!(f, "cover.jpg is invalid: {e}"),
            SkipReason::NoAudioFiles => write!(f, "no MP3 files"),
            SkipReason::NoEmbeddedArtwork => write!(f, "first MP3 file has no embedded artwork"),
            SkipReason::UnreadableTags(e) => write!(f, "could not read tags: {e}"),
            SkipReason::NoCandidate => write!(f, "no artwork found"),
            SkipReason::DownloadFailed(e) => write!(f, "download failed: {e}"),
            SkipReason::BelowMinimum(r) => write!(f, "artwork is only {r}"),
            SkipReason::InvalidArtwork(e) => write!(f, "artwork is not a valid image: {e}"),
            SkipReason::WriteFailed(e) => write!(f, "could not write cover.jpg: {e}"),
            SkipReason::Unreadable(e) => write!(f, "could not read folder: {e}"),
        }
    }
}

/// Log a skip and wrap it as an outcome.
fn skip(folder: &Path, reason: SkipReason) -> FolderOutcome {
    if reason.is_problem() {
        warn!(folder = %folder.display(), reason = %reason, "Skipping folder");
    } else {
        info!(folder = %folder.display(), reason = %reason, "Skipping folder");
    }
    FolderOutcome::Skipped(reason)
}
