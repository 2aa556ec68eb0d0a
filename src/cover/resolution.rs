//! Image resolution and format detection.
//!
//! Every image is fully decoded, not just header-probed, so a truncated or
//! corrupt file is reported as [`Error::InvalidImage`] here rather than
//! failing later in the pipeline.

use image::{ImageFormat, ImageReader};
use std::fmt;
use std::io::Cursor;
use std::path::Path;

use crate::error::{Error, Result, ResultExt};

use super::embedded::read_artwork;

/// Pixel dimensions of an image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Strictly larger than `other` in both dimensions.
    pub fn exceeds(&self, other: &Resolution) -> bool {
        self.width > other.width && self.height > other.height
    }

    /// Both dimensions are at least `min`.
    pub fn at_least(&self, min: u32) -> bool {
        self.width >= min && self.height >= min
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Result of evaluating an image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageInfo {
    pub resolution: Resolution,
    pub format: ImageFormat,
}

impl ImageInfo {
    pub fn is_jpeg(&self) -> bool {
        self.format == ImageFormat::Jpeg
    }
}

/// Decode image bytes and report their resolution and format.
pub fn evaluate(bytes: &[u8]) -> Result<ImageInfo> {
    if bytes.is_empty() {
        return Err(Error::invalid_image("image data is empty"));
    }

    let reader = ImageReader::new(Cursor::new(bytes)).with_guessed_format()?;
    let format = reader
        .format()
        .ok_or_else(|| Error::invalid_image("unrecognised image format"))?;
    let image = reader.decode()?;

    Ok(ImageInfo {
        resolution: Resolution::new(image.width(), image.height()),
        format,
    })
}

/// Read an image file and evaluate it.
pub fn evaluate_file(path: &Path) -> Result<ImageInfo> {
    let bytes = std::fs::read(path).with_context(path.display().to_string())?;
    evaluate(&bytes).with_context(path.display().to_string())
}

/// Resolution of the artwork embedded in an audio file.
///
/// Returns `Ok(None)` when the file carries no picture. An embedded picture
/// that can't be decoded is an error, not "no artwork".
pub fn embedded_resolution(path: &Path) -> Result<Option<Resolution>> {
    let Some(artwork) = read_artwork(path)? else {
        return Ok(None);
    };
    let info = evaluate(&artwork.data)
        .with_context(format!("embedded artwork in {}", path.display()))?;
    Ok(Some(info.resolution))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{jpeg_bytes, png_bytes, rgba_png_bytes, silent_mp3_with_tags};
    use tempfile::TempDir;

    #[test]
    fn test_evaluate_jpeg() {
        let info = evaluate(&jpeg_bytes(40, 30)).unwrap();
        assert_eq!(info.resolution, Resolution::new(40, 30));
        assert!(info.is_jpeg());
    }

    #[test]
    fn test_evaluate_png() {
        let info = evaluate(&png_bytes(12, 64)).unwrap();
        assert_eq!(info.resolution, Resolution::new(12, 64));
        assert_eq!(info.format, ImageFormat::Png);
        assert!(!info.is_jpeg());

        let rgba = evaluate(&rgba_png_bytes(8, 8)).unwrap();
        assert_eq!(rgba.format, ImageFormat::Png);
    }

    #[test]
    fn test_evaluate_empty_is_invalid() {
        let err = evaluate(&[]).unwrap_err();
        assert!(err.is_invalid_image());
    }

    #[test]
    fn test_evaluate_garbage_is_invalid() {
        let err = evaluate(b"definitely not an image").unwrap_err();
        assert!(err.is_invalid_image());
    }

    #[test]
    fn test_evaluate_file_missing() {
        let result = evaluate_file(Path::new("no/such/cover.jpg"));
        assert!(result.is_err());
    }

    #[test]
    fn test_exceeds_requires_both_dimensions() {
        let candidate = Resolution::new(600, 600);
        assert!(candidate.exceeds(&Resolution::new(599, 599)));
        assert!(!candidate.exceeds(&Resolution::new(600, 500)));
        assert!(!candidate.exceeds(&Resolution::new(500, 700)));
        assert!(!candidate.exceeds(&Resolution::new(600, 600)));
    }

    #[test]
    fn test_at_least() {
        assert!(Resolution::new(600, 800).at_least(600));
        assert!(!Resolution::new(599, 800).at_least(600));
        assert_eq!(Resolution::new(600, 800).to_string(), "600x800");
    }

    #[test]
    fn test_embedded_resolution() {
        let temp = TempDir::new().unwrap();
        let bare = temp.path().join("bare.mp3");
        let with_art = temp.path().join("art.mp3");
        silent_mp3_with_tags(&bare, Some("Queen"), Some("Innuendo"), &[]);
        silent_mp3_with_tags(&with_art, Some("Queen"), Some("Innuendo"), &[jpeg_bytes(320, 240)]);

        assert_eq!(embedded_resolution(&bare).unwrap(), None);
        assert_eq!(
            embedded_resolution(&with_art).unwrap(),
            Some(Resolution::new(320, 240))
        );
    }
}
