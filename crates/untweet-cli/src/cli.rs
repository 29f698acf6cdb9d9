//! CLI argument parsing.

use clap::Parser;
use std::path::PathBuf;
use untweet_janitor::RunMode;

/// Default settings file, relative to the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "settings.toml";

/// Untweet - Archive and delete old posts from a Twitter account.
///
/// Without arguments the run is a dry run: the timeline is fetched, a
/// snapshot and an archive of the posts that would be deleted are written,
/// and nothing is deleted.
#[derive(Debug, Parser)]
#[command(name = "untweet")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Delete the archived posts
    #[arg(long)]
    pub delete: bool,

    /// Settings file (TOML, or JSON with a .json extension)
    #[arg(long, env = "UNTWEET_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

impl Cli {
    /// Run mode selected by the flags.
    pub fn mode(&self) -> RunMode {
        if self.delete {
            RunMode::Destructive
        } else {
            RunMode::DryRun
        }
    }
}
