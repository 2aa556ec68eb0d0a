//! Cover images: evaluation, normalisation, embedded artwork and `cover.jpg`.
//!
//! - [`evaluate`] - decode bytes, report dimensions and format
//! - [`normalize`] - RGB + bounded resize + JPEG re-encode
//! - [`read_artwork`] / [`replace_artwork`] - pictures inside audio tags
//! - [`inspect_cover`] / [`write_cover`] - the folder's `cover.jpg`

mod embedded;
mod normalize;
mod resolution;
mod sidecar;

pub use embedded::{COVER_DESCRIPTION, EmbeddedArtwork, read_artwork, replace_artwork};
pub use normalize::{NormalizeOptions, NormalizedImage, ResizeMode, normalize, to_jpeg};
pub use resolution::{ImageInfo, Resolution, embedded_resolution, evaluate, evaluate_file};
pub use sidecar::{
    COVER_FILENAME, CoverState, SidecarCover, WrittenCover, cover_path, has_cover, inspect_cover,
    write_cover,
};
