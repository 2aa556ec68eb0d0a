//! Last.fm integration
//!
//! Low-resolution fallback source: `album.getinfo` artwork, `large` size.

pub mod dto;
mod client;

pub use client::{COVER_SIZE, LastFmClient};
