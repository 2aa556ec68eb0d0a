//! Cover Art Archive integration
//!
//! Finds album artwork on coverartarchive.org by MusicBrainz release ID.
//! No API key required.

pub mod dto;
mod client;

pub use client::CoverArtClient;
