//! Export command - embedded artwork to cover.jpg

use anyhow::Result;

use crate::config::Config;
use crate::pipeline::{self, FolderOutcome};

use super::{Summary, TargetArgs, print_skip};

pub fn cmd_export(target: &TargetArgs, config: &Config) -> Result<()> {
    let traversal = target.traversal(config)?;
    let quality = config.normalize_options()?.jpeg_quality;
    let folders = traversal.folders()?;

    println!("Exporting cover art in {} folder(s)...", folders.len());

    let mut summary = Summary::default();
    for folder in &folders {
        let outcome = pipeline::export_folder(folder, quality);
        match &outcome {
            FolderOutcome::Exported { source, cover } => {
                let note = if cover.transcoded { ", converted to JPEG" } else { "" };
                println!(
                    "✓ {} ({}{}) from {}",
                    cover.path.display(),
                    cover.resolution,
                    note,
                    source.file_name().unwrap_or_default().to_string_lossy()
                );
            }
            FolderOutcome::Skipped(reason) => print_skip(folder, reason),
            _ => {}
        }
        summary.record(&outcome);
    }

    summary.print("exported");
    Ok(())
}
