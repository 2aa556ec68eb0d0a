//! iTunes Search integration
//!
//! Searches albums by title and keeps the first hit whose artist matches.
//! Artwork is served at 600x600.

pub mod dto;
mod client;

pub use client::{ITunesClient, hires_artwork_url};
