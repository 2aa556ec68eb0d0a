//! Fetch command - download cover.jpg from online artwork providers

use anyhow::{Context, Result, bail};
use tokio::runtime::Builder;

use crate::config::Config;
use crate::enrichment::{ArtworkResolver, HttpImageFetcher};
use crate::pipeline::{self, FolderOutcome};

use super::{Summary, TargetArgs, print_skip};

pub fn cmd_fetch(target: &TargetArgs, config: &Config) -> Result<()> {
    let settings = config.fetch_settings()?;
    let quality = config.normalize_options()?.jpeg_quality;
    let traversal = target.album_traversal(config)?;
    let folders = traversal.folders()?;

    let resolver = ArtworkResolver::from_settings(&settings.sources)?;
    if resolver.is_empty() {
        bail!("every artwork source is disabled in the configuration");
    }
    let fetcher = HttpImageFetcher::new();

    let rt = Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to create async runtime")?;

    let sources: Vec<String> = resolver.source_kinds().iter().map(|k| k.to_string()).collect();
    println!(
        "Fetching cover art for {} folder(s) from {}...",
        folders.len(),
        sources.join(", ")
    );

    let mut summary = Summary::default();
    for folder in &folders {
        let outcome = rt.block_on(pipeline::fetch_folder(
            folder,
            &resolver,
            &fetcher,
            &settings.policy,
            quality,
        ));
        match &outcome {
            FolderOutcome::Fetched {
                identity,
                candidate,
                cover,
            } => {
                println!(
                    "✓ {}: {} ({}, {})",
                    folder.display(),
                    identity,
                    candidate.source,
                    cover.resolution
                );
            }
            FolderOutcome::Skipped(reason) => print_skip(folder, reason),
            _ => {}
        }
        summary.record(&outcome);
    }

    summary.print("downloaded");
    Ok(())
}
