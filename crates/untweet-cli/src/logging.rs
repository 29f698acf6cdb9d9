//! Tracing subscriber setup.

use crate::error::{CliError, Result};
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};
use untweet_janitor::RunMode;

/// Log file kept in the archive directory for destructive runs.
pub const LOG_FILE_NAME: &str = "untweet.log";

/// Install the global subscriber.
///
/// Events always go to stderr, filtered by `RUST_LOG` (default `info`).
/// Destructive runs also append them to [`LOG_FILE_NAME`] in `archive_dir`.
/// The returned guard flushes the file writer when dropped, so it must be
/// held until the run ends.
pub fn init(mode: RunMode, archive_dir: &Path, ansi: bool) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let console = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(ansi)
        .with_target(false);

    let (file, guard) = if mode.is_destructive() {
        let appender = RollingFileAppender::builder()
            .rotation(Rotation::NEVER)
            .filename_prefix(LOG_FILE_NAME)
            .build(archive_dir)
            .map_err(|e| {
                CliError::Logging(format!(
                    "Could not open {}: {}",
                    archive_dir.join(LOG_FILE_NAME).display(),
                    e
                ))
            })?;
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let layer = fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
            .with_target(false);
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file)
        .try_init()
        .map_err(|e| CliError::Logging(e.to_string()))?;

    Ok(guard)
}
