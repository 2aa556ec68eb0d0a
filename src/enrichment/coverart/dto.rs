//! Cover Art Archive API Data Transfer Objects
//!
//! API Reference: https://wiki.musicbrainz.org/Cover_Art_Archive/API

use serde::{Deserialize, Serialize};

/// Cover art listing for a release
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CoverArtResponse {
    /// Array of images for this release
    #[serde(default)]
    pub images: Vec<Image>,
    /// URL of the release on MusicBrainz
    pub release: String,
}

impl CoverArtResponse {
    /// First image flagged as the front cover, in listing order.
    pub fn front_image(&self) -> Option<&Image> {
        self.images.iter().find(|image| image.front)
    }
}

/// A single cover art image
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Image {
    /// Whether this is the front cover
    #[serde(default)]
    pub front: bool,
    #[serde(default)]
    pub back: bool,
    /// Image types (Front, Back, Booklet, etc.)
    #[serde(default)]
    pub types: Vec<String>,
    /// URL to the full-size original
    pub image: String,
    #[serde(default)]
    pub approved: bool,
}
