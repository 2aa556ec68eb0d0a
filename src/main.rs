//! Cover Minder - cover art management for MP3 album folders.
//!
//! Exports embedded artwork to `cover.jpg`, downloads missing covers from
//! MusicBrainz/Cover Art Archive, iTunes and Last.fm, and embeds
//! normalised covers back into every track of a folder.

pub mod cli;
pub mod config;
pub mod cover;
pub mod enrichment;
pub mod error;
pub mod library;
pub mod metadata;
pub mod pipeline;
#[cfg(test)]
pub mod test_utils;

use std::fs::{self, File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();
    let Some(command) = args.runnable_command() else {
        args.print_usage();
        std::process::exit(1);
    };

    let config = config::load(args.config.as_deref()).context("Failed to load configuration")?;

    // Initialize logging
    let log_file = config.log_file().and_then(|path| match open_log_file(&path) {
        Ok(file) => Some(file),
        Err(e) => {
            eprintln!("Warning: cannot open log file {}: {}", path.display(), e);
            None
        }
    });
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(log_file.map(|file| {
            fmt::layer()
                .with_target(true)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
        }))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("cover_minder=info")))
        .init();

    cli::run_command(command, &config)
}

/// Open the log file for appending, creating its directory if needed
fn open_log_file(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}
