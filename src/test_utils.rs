//! Test utilities and fixtures for cover-minder tests.
//!
//! Images are generated in memory with the `image` crate; MP3 files are a
//! run of silent MPEG-1 Layer III frames, which is enough for lofty to probe
//! them and read/write an ID3v2 tag.
//!
//! # Example
//!
//! ```ignore
//! let dir = tempfile::tempdir().unwrap();
//! let track = dir.path().join("01.mp3");
//! silent_mp3_with_tags(&track, Some("Queen"), Some("Innuendo"), &[jpeg_bytes(500, 500)]);
//! ```

use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use lofty::config::WriteOptions;
use lofty::file::TaggedFileExt;
use lofty::picture::{MimeType, Picture, PictureType};
use lofty::probe::Probe;
use lofty::tag::{Accessor, Tag, TagExt, TagType};
use std::io::Cursor;
use std::path::Path;

/// MPEG-1 Layer III, 128 kbps, 44.1 kHz, joint stereo, no padding
const FRAME_HEADER: [u8; 4] = [0xFF, 0xFB, 0x90, 0x64];

/// 144 * 128000 / 44100
const FRAME_LEN: usize = 417;

const FRAME_COUNT: usize = 20;

fn encode(image: DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut buffer = Cursor::new(Vec::new());
    image
        .write_to(&mut buffer, format)
        .expect("Failed to encode test image");
    buffer.into_inner()
}

fn gradient(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    })
}

/// RGB JPEG of the given size.
pub fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
    encode(DynamicImage::ImageRgb8(gradient(width, height)), ImageFormat::Jpeg)
}

/// RGB PNG of the given size.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    encode(DynamicImage::ImageRgb8(gradient(width, height)), ImageFormat::Png)
}

/// Semi-transparent RGBA PNG of the given size.
pub fn rgba_png_bytes(width: u32, height: u32) -> Vec<u8> {
    let image = RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, 200, 127])
    });
    encode(DynamicImage::ImageRgba8(image), ImageFormat::Png)
}

/// Raw bytes of a tagless, silent MP3.
pub fn silent_mp3() -> Vec<u8> {
    let mut data = Vec::with_capacity(FRAME_LEN * FRAME_COUNT);
    for _ in 0..FRAME_COUNT {
        data.extend_from_slice(&FRAME_HEADER);
        data.resize(data.len() + FRAME_LEN - FRAME_HEADER.len(), 0);
    }
    data
}

/// Write a silent MP3 with an ID3v2 tag holding the given artist, album and pictures.
///
/// The first picture is the front cover, later ones are back covers.
pub fn silent_mp3_with_tags(
    path: &Path,
    artist: Option<&str>,
    album: Option<&str>,
    pictures: &[Vec<u8>],
) {
    std::fs::write(path, silent_mp3()).expect("Failed to write test mp3");

    let mut tag = Tag::new(TagType::Id3v2);
    if let Some(artist) = artist {
        tag.set_artist(artist.to_string());
    }
    if let Some(album) = album {
        tag.set_album(album.to_string());
    }
    for (i, data) in pictures.iter().enumerate() {
        let (pic_type, description) = if i == 0 {
            (PictureType::CoverFront, "front".to_string())
        } else {
            (PictureType::CoverBack, format!("back {i}"))
        };
        let mime = if data.starts_with(&[0x89, b'P', b'N', b'G']) {
            MimeType::Png
        } else {
            MimeType::Jpeg
        };
        tag.push_picture(Picture::new_unchecked(
            pic_type,
            Some(mime),
            Some(description),
            data.clone(),
        ));
    }

    tag.save_to_path(path, WriteOptions::default())
        .expect("Failed to write test tag");
}

/// All pictures in the primary tag of an audio file.
pub fn read_pictures(path: &Path) -> Vec<Picture> {
    let tagged_file = Probe::open(path)
        .expect("Failed to open test mp3")
        .read()
        .expect("Failed to read test mp3");
    tagged_file
        .primary_tag()
        .map(|tag| tag.pictures().to_vec())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silent_mp3_is_probed_as_mpeg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("silence.mp3");
        std::fs::write(&path, silent_mp3()).unwrap();

        let tagged_file = Probe::open(&path).unwrap().read().unwrap();
        assert_eq!(tagged_file.file_type(), lofty::file::FileType::Mpeg);
    }

    #[test]
    fn test_fixture_pictures_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("01.mp3");
        silent_mp3_with_tags(&path, Some("A"), Some("B"), &[jpeg_bytes(4, 4), png_bytes(4, 4)]);

        let pictures = read_pictures(&path);
        assert_eq!(pictures.len(), 2);
        assert_eq!(pictures[1].mime_type(), Some(&MimeType::Png));
    }
}
