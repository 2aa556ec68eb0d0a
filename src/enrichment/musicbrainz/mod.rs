//! MusicBrainz API integration
//!
//! Resolves an artist/album pair to a release MBID, which the Cover Art
//! Archive uses as its key.
//!
//! API docs: https://musicbrainz.org/doc/MusicBrainz_API

pub mod dto;
mod client;

pub use client::MusicBrainzClient;
