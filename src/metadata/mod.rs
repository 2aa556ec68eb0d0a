//! Audio file tag reading.
//!
//! Uses the lofty crate for format-independent metadata access. Only the
//! fields needed to look up album artwork are read.

use lofty::file::TaggedFileExt;
use lofty::probe::Probe;
use lofty::tag::Accessor;
use std::path::Path;

use crate::enrichment::AlbumIdentity;
use crate::error::{Error, Result};

pub const UNKNOWN_ARTIST: &str = "Unknown Artist";
pub const UNKNOWN_ALBUM: &str = "Unknown Album";

/// Artist/album tags of one track, as found in the file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackTags {
    pub artist: Option<String>,
    pub album: Option<String>,
}

impl TrackTags {
    /// Identity used for artwork lookups, with placeholders for missing tags.
    pub fn identity(&self) -> AlbumIdentity {
        let non_empty = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        AlbumIdentity {
            artist: non_empty(&self.artist).unwrap_or_else(|| UNKNOWN_ARTIST.to_string()),
            album: non_empty(&self.album).unwrap_or_else(|| UNKNOWN_ALBUM.to_string()),
        }
    }
}

pub fn read(path: &Path) -> Result<TrackTags> {
    let tagged_file = Probe::open(path)
        .and_then(|probe| probe.read())
        .map_err(|e| Error::metadata(path, e.to_string()))?;

    // Get the primary tag, or fall back to the first available tag
    let Some(tag) = tagged_file
        .primary_tag()
        .or_else(|| tagged_file.first_tag())
    else {
        return Ok(TrackTags::default());
    };

    Ok(TrackTags {
        artist: tag.artist().map(|s| s.to_string()),
        album: tag.album().map(|s| s.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{silent_mp3, silent_mp3_with_tags};
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_read_non_audio_file_returns_error() {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        writeln!(file, "This is just some text, not music.").expect("Failed to write to temp file");

        let result = read(file.path());
        assert!(matches!(result, Err(Error::Metadata { .. })));
    }

    #[test]
    fn test_read_non_existent_file_returns_error() {
        let path = Path::new("non_existent_file.mp3");
        assert!(read(path).is_err());
    }

    #[test]
    fn test_read_artist_and_album() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("01.mp3");
        silent_mp3_with_tags(&path, Some("Queen"), Some("Innuendo"), &[]);

        let tags = read(&path).unwrap();
        assert_eq!(tags.artist.as_deref(), Some("Queen"));
        assert_eq!(tags.album.as_deref(), Some("Innuendo"));
    }

    #[test]
    fn test_untagged_file_has_no_fields() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("01.mp3");
        std::fs::write(&path, silent_mp3()).unwrap();

        assert_eq!(read(&path).unwrap(), TrackTags::default());
    }

    #[test]
    fn test_identity_placeholders() {
        let tags = TrackTags {
            artist: Some("  ".to_string()),
            album: None,
        };
        let identity = tags.identity();
        assert_eq!(identity.artist, UNKNOWN_ARTIST);
        assert_eq!(identity.album, UNKNOWN_ALBUM);
    }

    #[test]
    fn test_identity_trims_values() {
        let tags = TrackTags {
            artist: Some("Björk ".to_string()),
            album: Some("Homogenic".to_string()),
        };
        let identity = tags.identity();
        assert_eq!(identity.artist, "Björk");
        assert_eq!(identity.album, "Homogenic");
    }
}
