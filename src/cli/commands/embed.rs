//! Embed command - cover.jpg into every MP3 in the folder

use anyhow::Result;

use crate::config::Config;
use crate::pipeline::{self, EmbedOptions, FolderOutcome};

use super::{Summary, TargetArgs, print_skip};

pub fn cmd_embed(target: &TargetArgs, config: &Config, dry_run: bool) -> Result<()> {
    let traversal = target.traversal(config)?;
    let options = EmbedOptions {
        normalize: config.normalize_options()?,
        dry_run,
    };
    let folders = traversal.folders()?;

    if dry_run {
        println!("[DRY RUN MODE - no tags will be written]\n");
    }
    println!("Embedding cover art in {} folder(s)...", folders.len());

    let mut summary = Summary::default();
    for folder in &folders {
        let outcome = pipeline::embed_folder(folder, &options);
        match &outcome {
            FolderOutcome::Embedded(report) => {
                let resolution = report
                    .cover
                    .map(|r| r.to_string())
                    .unwrap_or_else(|| "?".to_string());
                let verb = if dry_run { "would embed" } else { "embedded" };
                let line = format!(
                    "{} ({}): {} {}, {} kept existing, {} failed",
                    folder.display(),
                    resolution,
                    report.embedded,
                    verb,
                    report.kept,
                    report.failed
                );
                if report.failed > 0 {
                    eprintln!("✗ {line}");
                } else {
                    println!("✓ {line}");
                }
            }
            FolderOutcome::Skipped(reason) => print_skip(folder, reason),
            _ => {}
        }
        summary.record(&outcome);
    }

    summary.print(if dry_run { "checked" } else { "embedded" });
    Ok(())
}
