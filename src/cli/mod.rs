//! Command-line interface for cover-minder.
//!
//! Provides the `export`, `fetch` and `embed` commands.

mod commands;

pub use commands::{Cli, run_command};
