//! Untweet Janitor
//!
//! The pruning pipeline: fetch an account's full history, snapshot it, select
//! the posts past the retention threshold, archive them, and only then delete
//! them.
//!
//! # Overview
//!
//! A run goes through five stages in a fixed order:
//! - **Fetch**: page backwards through the timeline with an inclusive
//!   `max_id` cursor until nothing older comes back
//! - **Snapshot**: write every fetched post to `timeline_snapshot.json`
//! - **Select**: apply the [`RetentionPolicy`] (age threshold plus a floor of
//!   most recent posts that are always kept)
//! - **Archive**: write the selected posts to
//!   `archived_posts_{YYYY-MM-DD_HH-MM-SS}.json`
//! - **Delete**: one delete call per archived post, destructive mode only
//!
//! A failure in any of the first four stages aborts the run. A failed delete
//! is recorded and the batch continues.
//!
//! # Usage
//!
//! ```no_run
//! use untweet_client::{Credentials, TwitterClient};
//! use untweet_janitor::{Janitor, JanitorConfig, RunMode, RunOutcome};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = TwitterClient::new(Credentials::new("key", "secret", "token", "token-secret"))?;
//! let config = JanitorConfig::new("someone", "archive", 30)
//!     .with_min_count(50)
//!     .with_mode(RunMode::Destructive);
//!
//! match Janitor::new(config).run(&client)? {
//!     RunOutcome::Deleted { report, .. } => println!("{}", report.summary()),
//!     other => println!("Fetched {} posts, nothing deleted", other.fetched()),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Dry Run
//!
//! [`RunMode::DryRun`] is the default. It performs every stage except
//! deletion, so the snapshot and archive can be inspected before a
//! destructive run.

#![warn(missing_docs)]

mod archive;
mod config;
mod deleter;
mod error;
mod fetcher;
mod janitor;
mod report;
mod reporter;
mod retention;

#[cfg(test)]
mod testing;

pub use archive::{
    archive_file_name, ArchiveReceipt, Archiver, Snapshotter, ARCHIVE_TIMESTAMP_FORMAT,
    SNAPSHOT_FILE_NAME,
};
pub use config::{JanitorConfig, RunMode, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
pub use deleter::delete_posts;
pub use error::JanitorError;
pub use fetcher::fetch_timeline;
pub use janitor::{Janitor, RunOutcome};
pub use report::{DeleteOutcome, DeleteResult, DeletionReport};
pub use reporter::{EventLevel, MemoryReporter, Reporter, RunEvent, TracingReporter};
pub use retention::RetentionPolicy;
