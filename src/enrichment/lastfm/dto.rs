//! Last.fm `album.getinfo` Data Transfer Objects
//!
//! API Reference: https://www.last.fm/api/show/album.getInfo

use serde::{Deserialize, Serialize};

/// `album.getinfo` response envelope
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AlbumInfoResponse {
    pub album: Album,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Album {
    pub name: String,
    pub artist: String,
    pub mbid: Option<String>,
    /// One entry per size: small, medium, large, extralarge, mega
    #[serde(default)]
    pub image: Vec<Image>,
}

impl Album {
    /// URL of the image with the given size label, if non-empty
    pub fn image_url(&self, size: &str) -> Option<&str> {
        self.image
            .iter()
            .find(|image| image.size == size)
            .map(|image| image.url.as_str())
            .filter(|url| !url.is_empty())
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Image {
    #[serde(rename = "#text")]
    pub url: String,
    #[serde(default)]
    pub size: String,
}
