//! Cover normalisation: RGB, bounded size, JPEG.
//!
//! Images at or above the target resolution in both dimensions are resized;
//! anything smaller keeps its dimensions (no upscaling). The output is always
//! re-encoded, so normalisation is lossy even when no resize happens.
//!
//! [`ResizeMode::Stretch`] reproduces the historical behaviour of squashing
//! every cover to exactly R×R, which distorts non-square art.
//! [`ResizeMode::Fit`] keeps the aspect ratio instead.

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::DynamicImage;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

use super::Resolution;

/// How covers at or above the target resolution are resized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeMode {
    /// Exactly target×target regardless of aspect ratio
    #[default]
    Stretch,
    /// Longest edge becomes target, aspect ratio preserved
    Fit,
}

/// Normalisation parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// Target resolution R
    pub target: u32,
    pub mode: ResizeMode,
    pub jpeg_quality: u8,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            target: 600,
            mode: ResizeMode::Stretch,
            jpeg_quality: 90,
        }
    }
}

/// A JPEG produced by the normaliser
#[derive(Debug, Clone)]
pub struct NormalizedImage {
    pub data: Vec<u8>,
    pub resolution: Resolution,
    /// Whether the dimensions changed
    pub resized: bool,
}

/// Convert to RGB, resize when both dimensions reach the target, encode as JPEG.
pub fn normalize(bytes: &[u8], options: &NormalizeOptions) -> Result<NormalizedImage> {
    let image = decode_rgb(bytes)?;
    let target = options.target;

    let (image, resized) = if image.width() >= target && image.height() >= target {
        let resized = match options.mode {
            ResizeMode::Stretch => image.resize_exact(target, target, FilterType::Lanczos3),
            ResizeMode::Fit => image.resize(target, target, FilterType::Lanczos3),
        };
        (resized, true)
    } else {
        (image, false)
    };

    encode(image, options.jpeg_quality, resized)
}

/// Re-encode any decodable image as JPEG without touching its dimensions.
pub fn to_jpeg(bytes: &[u8], jpeg_quality: u8) -> Result<NormalizedImage> {
    encode(decode_rgb(bytes)?, jpeg_quality, false)
}

/// Decode and drop alpha/palette/extra precision.
fn decode_rgb(bytes: &[u8]) -> Result<DynamicImage> {
    if bytes.is_empty() {
        return Err(Error::invalid_image("image data is empty"));
    }
    let image = image::load_from_memory(bytes)?;
    Ok(match image {
        DynamicImage::ImageRgb8(_) => image,
        other => DynamicImage::ImageRgb8(other.to_rgb8()),
    })
}

fn encode(image: DynamicImage, jpeg_quality: u8, resized: bool) -> Result<NormalizedImage> {
    let mut data = Vec::new();
    image.write_with_encoder(JpegEncoder::new_with_quality(&mut data, jpeg_quality))?;

    Ok(NormalizedImage {
        data,
        resolution: Resolution::new(image.width(), image.height()),
        resized,
    })
}


/// Property-based tests using proptest
#[cfg(test)]
mod proptests {
    use super::*;
    use crate::cover::evaluate;
    use crate::test_utils::png_bytes;
    use proptest::prelude::*;

    const TARGET: u32 = 32;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]

        /// Images smaller than the target in both dimensions are never upscaled
        #[test]
        fn small_images_keep_dimensions(width in 1u32..TARGET, height in 1u32..TARGET) {
            let opts = NormalizeOptions { target: TARGET, ..Default::default() };
            let out = normalize(&png_bytes(width, height), &opts).unwrap();
            prop_assert!(!out.resized);
            prop_assert_eq!(out.resolution, Resolution::new(width, height));
        }

        /// Images at or above the target in both dimensions become exactly R×R JPEG
        #[test]
        fn large_images_become_square_jpeg(
            width in TARGET..TARGET * 3,
            height in TARGET..TARGET * 3,
        ) {
            let opts = NormalizeOptions { target: TARGET, ..Default::default() };
            let out = normalize(&png_bytes(width, height), &opts).unwrap();
            let info = evaluate(&out.data).unwrap();
            prop_assert!(info.is_jpeg());
            prop_assert_eq!(info.resolution, Resolution::new(TARGET, TARGET));
        }

        /// Fit mode never produces an edge longer than the target
        #[test]
        fn fit_mode_stays_within_target(
            width in TARGET..TARGET * 4,
            height in TARGET..TARGET * 4,
        ) {
            let opts = NormalizeOptions { target: TARGET, mode: ResizeMode::Fit, ..Default::default() };
            let out = normalize(&png_bytes(width, height), &opts).unwrap();
            prop_assert!(out.resolution.width <= TARGET && out.resolution.height <= TARGET);
            prop_assert!(out.resolution.width == TARGET || out.resolution.height == TARGET);
        }
    }
}
