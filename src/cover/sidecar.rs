//! The canonical `cover.jpg` file of a folder.
//!
//! Only the exact name `cover.jpg` counts as the folder cover. Anything
//! written here is JPEG: other formats are transcoded first, and bytes that
//! don't decode are never written.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, ResultExt};

use super::normalize::to_jpeg;
use super::{ImageInfo, Resolution, evaluate};

/// File name of the folder cover
pub const COVER_FILENAME: &str = "cover.jpg";

/// Path of the cover file for a folder.
pub fn cover_path(folder: &Path) -> PathBuf {
    folder.join(COVER_FILENAME)
}

/// Whether the folder already has a cover file (valid or not).
pub fn has_cover(folder: &Path) -> bool {
    cover_path(folder).exists()
}

/// A cover file that has been read and decoded
#[derive(Debug, Clone)]
pub struct SidecarCover {
    pub path: PathBuf,
    pub data: Vec<u8>,
    pub info: ImageInfo,
}

/// What was found at a folder's cover path
#[derive(Debug)]
pub enum CoverState {
    Missing,
    /// Zero-byte file
    Empty,
    /// Unreadable or not a decodable image
    Invalid(String),
    Valid(SidecarCover),
}

/// Read and validate the folder cover.
pub fn inspect_cover(folder: &Path) -> CoverState {
    let path = cover_path(folder);
    if !path.exists() {
        return CoverState::Missing;
    }

    let data = match fs::read(&path) {
        Ok(data) => data,
        Err(e) => return CoverState::Invalid(e.to_string()),
    };
    if data.is_empty() {
        return CoverState::Empty;
    }

    match evaluate(&data) {
        Ok(info) => CoverState::Valid(SidecarCover { path, data, info }),
        Err(e) => CoverState::Invalid(e.to_string()),
    }
}

/// A cover file written to disk
#[derive(Debug, Clone)]
pub struct WrittenCover {
    pub path: PathBuf,
    pub resolution: Resolution,
    /// The source bytes weren't JPEG and had to be re-encoded
    pub transcoded: bool,
}

/// Write image bytes as the folder cover.
///
/// `info` must describe `data` (from [`evaluate`]). JPEG is written as-is,
/// anything else is re-encoded to JPEG at `jpeg_quality`. The file is
/// written to a temporary name and renamed into place.
pub fn write_cover(
    folder: &Path,
    data: &[u8],
    info: &ImageInfo,
    jpeg_quality: u8,
) -> Result<WrittenCover> {
    let path = cover_path(folder);

    let (bytes, transcoded) = if info.is_jpeg() {
        (data.to_vec(), false)
    } else {
        (to_jpeg(data, jpeg_quality)?.data, true)
    };

    let temp_path = path.with_extension("jpg.tmp");
    let saved = fs::write(&temp_path, &bytes)
        .with_context(format!("writing {}", temp_path.display()))
        .and_then(|()| {
            fs::rename(&temp_path, &path).with_context(format!("renaming to {}", path.display()))
        });
    if let Err(e) = saved {
        // Don't leave a half-written cover behind
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }

    Ok(WrittenCover {
        path,
        resolution: info.resolution,
        transcoded,
    })
}
