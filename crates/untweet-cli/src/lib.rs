//! Untweet CLI library.
//!
//! Settings loading, logging setup and output formatting for the `untweet`
//! binary, plus [`execute`], which wires the API client into a pruning run.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;

pub use cli::Cli;
pub use config::Settings;
pub use error::{CliError, Result};
pub use output::Formatter;

use untweet_janitor::{Janitor, RunMode, RunOutcome};

/// Run the pruning pipeline described by validated settings.
pub fn execute(settings: &Settings, mode: RunMode) -> Result<RunOutcome> {
    let client = settings.client()?;
    let config = settings.janitor_config(mode);

    tracing::info!(
        "Starting {} run for @{} (posts older than {} days, keeping the {} most recent)",
        if mode.is_destructive() { "destructive" } else { "dry" },
        config.screen_name,
        config.max_age_days,
        config.min_count
    );

    Ok(Janitor::new(config).run(&client)?)
}
