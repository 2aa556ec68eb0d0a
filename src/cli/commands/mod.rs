//! CLI command definitions and dispatch.
//!
//! Each subcommand is implemented in its own submodule:
//! - `export`: embedded artwork -> `cover.jpg`
//! - `fetch`: online providers -> `cover.jpg`
//! - `embed`: `cover.jpg` -> MP3 tags
//!
//! All three share the same target flags (`-i`, `-a`, `-c`).

mod embed;
mod export;
mod fetch;

use clap::{Args, CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::Config;
use crate::library::Traversal;
use crate::pipeline::{FolderOutcome, SkipReason};

use embed::cmd_embed;
use export::cmd_export;
use fetch::cmd_fetch;

/// Cover Minder CLI
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file [default: ./artwork-config.toml, then the user config directory]
    #[arg(long, global = true, env = "COVER_MINDER_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Which folders to process
#[derive(Args, Debug, Clone, Default)]
pub struct TargetArgs {
    /// Process a specific folder (album or CD folder)
    #[arg(short, long, value_name = "FOLDER")]
    pub input: Option<PathBuf>,
    /// Process the entire music library
    #[arg(short, long)]
    pub all: bool,
    /// Process CD folders (e.g. "CD 1", "CD 2")
    #[arg(short, long)]
    pub cd: bool,
}

impl TargetArgs {
    pub fn is_empty(&self) -> bool {
        self.input.is_none() && !self.all && !self.cd
    }

    /// Folder traversal for `export` and `embed`.
    pub fn traversal(&self, config: &Config) -> anyhow::Result<Traversal> {
        if let Some(input) = &self.input {
            return Ok(Traversal::Single(input.clone()));
        }
        let root = config.library_root()?.to_path_buf();
        Ok(if self.cd {
            Traversal::DiscFolders(root)
        } else {
            Traversal::Library(root)
        })
    }

    /// Artist/album-aware traversal for `fetch`.
    pub fn album_traversal(&self, config: &Config) -> anyhow::Result<Traversal> {
        if let Some(input) = &self.input {
            return Ok(Traversal::Single(input.clone()));
        }
        Ok(Traversal::Albums {
            root: config.library_root()?.to_path_buf(),
            discs: self.cd,
        })
    }
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Export the first MP3's embedded artwork to cover.jpg
    #[command(after_help = "Examples:\n  cover-minder export -i \"/music/Artist/Album (2012)/CD 1/\"\n  cover-minder export -a\n  cover-minder export -a -c")]
    Export {
        #[command(flatten)]
        target: TargetArgs,
    },
    /// Download cover.jpg from MusicBrainz, iTunes or Last.fm
    #[command(after_help = "Examples:\n  cover-minder fetch -i \"/music/Artist/Album/\"\n  cover-minder fetch -a\n  cover-minder fetch -a -c")]
    Fetch {
        #[command(flatten)]
        target: TargetArgs,
    },
    /// Embed cover.jpg into every MP3 in the folder
    #[command(after_help = "Examples:\n  cover-minder embed -i \"/music/Artist/Album/\"\n  cover-minder embed -a\n  cover-minder embed -a -c --dry-run")]
    Embed {
        #[command(flatten)]
        target: TargetArgs,
        /// Show what would be embedded without writing tags
        #[arg(long)]
        dry_run: bool,
    },
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Export { .. } => "export",
            Commands::Fetch { .. } => "fetch",
            Commands::Embed { .. } => "embed",
        }
    }

    fn target(&self) -> &TargetArgs {
        match self {
            Commands::Export { target } | Commands::Fetch { target } | Commands::Embed { target, .. } => {
                target
            }
        }
    }
}

impl Cli {
    /// The subcommand to run, or `None` when only usage can be shown:
    /// no subcommand, or a subcommand without target flags.
    ///
    /// Needs nothing but the parsed arguments, so usage is printed even when
    /// the configuration file is broken.
    pub fn runnable_command(&self) -> Option<&Commands> {
        self.command
            .as_ref()
            .filter(|command| !command.target().is_empty())
    }

    /// Print usage for the given subcommand (or the whole CLI) to stderr.
    pub fn print_usage(&self) {
        let mut cli = Cli::command();
        let help = self
            .command
            .as_ref()
            .and_then(|command| cli.find_subcommand_mut(command.name()))
            .map(|sub| sub.render_help())
            .unwrap_or_else(|| cli.render_help());
        eprintln!("{help}");
    }
}

/// Run the specified CLI command.
pub fn run_command(command: &Commands, config: &Config) -> anyhow::Result<()> {
    match command {
        Commands::Export { target } => cmd_export(target, config),
        Commands::Fetch { target } => cmd_fetch(target, config),
        Commands::Embed { target, dry_run } => cmd_embed(target, config, *dry_run),
    }
}

// ============================================================================
// Shared helper functions
// ============================================================================

/// Tally of folder outcomes, printed at the end of a run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct Summary {
    pub done: usize,
    pub skipped: usize,
    pub problems: usize,
}

impl Summary {
    pub fn record(&mut self, outcome: &FolderOutcome) {
        match outcome {
            FolderOutcome::Skipped(reason) if reason.is_problem() => self.problems += 1,
            FolderOutcome::Skipped(_) => self.skipped += 1,
            FolderOutcome::Embedded(report) if report.failed > 0 => self.problems += 1,
            _ => self.done += 1,
        }
    }

    pub fn print(&self, verb: &str) {
        println!(
            "\nCompleted: {} {}, {} skipped, {} with errors",
            self.done, verb, self.skipped, self.problems
        );
    }
}

/// One line per skipped folder
pub(crate) fn print_skip(folder: &std::path::Path, reason: &SkipReason) {
    if reason.is_problem() {
        eprintln!("✗ {}: {}", folder.display(), reason);
    } else {
        println!("- {}: {}", folder.display(), reason);
    }
}
