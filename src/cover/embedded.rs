//! Read and replace cover art embedded in audio file tags.
//!
//! Uses lofty's format-independent [`Tag`]; for MP3 files that is the ID3v2
//! tag and pictures are APIC frames. Saving merges into the tag on disk, so
//! frames the generic tag can't represent (PRIV, POPM, ...) are preserved.

use lofty::config::WriteOptions;
use lofty::file::TaggedFileExt;
use lofty::picture::{MimeType, Picture, PictureType};
use lofty::probe::Probe;
use lofty::tag::{Tag, TagExt};
use std::path::Path;

use crate::error::{Error, Result};

/// Description written with every embedded cover
pub const COVER_DESCRIPTION: &str = "Cover";

/// A picture found in an audio file's tags
#[derive(Debug, Clone)]
pub struct EmbeddedArtwork {
    pub data: Vec<u8>,
    pub mime_type: Option<String>,
    pub pic_type: PictureType,
}

/// Read the embedded cover, preferring the front cover over other pictures.
///
/// Returns `Ok(None)` when the file has no pictures. Unreadable files and
/// tags are [`Error::Metadata`].
pub fn read_artwork(path: &Path) -> Result<Option<EmbeddedArtwork>> {
    let tagged_file = Probe::open(path)
        .and_then(|probe| probe.read())
        .map_err(|e| Error::metadata(path, e.to_string()))?;

    let Some(tag) = tagged_file
        .primary_tag()
        .or_else(|| tagged_file.first_tag())
    else {
        return Ok(None);
    };

    let pictures = tag.pictures();
    let picture = pictures
        .iter()
        .find(|p| p.pic_type() == PictureType::CoverFront)
        .or_else(|| pictures.first());

    Ok(picture.map(|p| EmbeddedArtwork {
        data: p.data().to_vec(),
        mime_type: p.mime_type().map(|m| m.as_str().to_string()),
        pic_type: p.pic_type(),
    }))
}

/// Remove every embedded picture, then embed `jpeg` as the front cover.
///
/// The tag is written to disk before returning. Returns how many pictures
/// were removed.
pub fn replace_artwork(path: &Path, jpeg: Vec<u8>) -> Result<usize> {
    let mut tagged_file = Probe::open(path)
        .and_then(|probe| probe.read())
        .map_err(|e| Error::metadata(path, e.to_string()))?;

    let tag_type = tagged_file.primary_tag_type();
    if tagged_file.tag(tag_type).is_none() {
        tagged_file.insert_tag(Tag::new(tag_type));
    }
    let tag = tagged_file
        .tag_mut(tag_type)
        .ok_or_else(|| Error::metadata(path, format!("{tag_type:?} tags are not supported")))?;

    let removed = tag.picture_count() as usize;
    while tag.picture_count() > 0 {
        tag.remove_picture(0);
    }

    tag.push_picture(Picture::new_unchecked(
        PictureType::CoverFront,
        Some(MimeType::Jpeg),
        Some(COVER_DESCRIPTION.to_string()),
        jpeg,
    ));

    tag.save_to_path(path, WriteOptions::default())
        .map_err(|e| Error::metadata(path, format!("failed to save tag: {e}")))?;

    Ok(removed)
}
