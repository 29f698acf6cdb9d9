//! Pruning run orchestration

use crate::{
    delete_posts, fetch_timeline, Archiver, DeletionReport, JanitorConfig, JanitorError, Reporter,
    RunEvent, RunMode, Snapshotter, TracingReporter,
};
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use untweet_domain::TimelineApi;

/// How a successful run ended
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// No post met the retention criteria; no archive was written
    NothingToDelete {
        /// Distinct posts retrieved
        fetched: usize,
    },

    /// Posts were selected and archived but not deleted
    DryRun {
        /// Distinct posts retrieved
        fetched: usize,
        /// Posts that would have been deleted
        scheduled: usize,
        /// Archive holding them
        archive: PathBuf,
    },

    /// Posts were archived and delete calls were issued
    Deleted {
        /// Distinct posts retrieved
        fetched: usize,
        /// Archive holding the selected posts
        archive: PathBuf,
        /// Per-post results
        report: DeletionReport,
    },
}

impl RunOutcome {
    /// Distinct posts retrieved during the run
    pub fn fetched(&self) -> usize {
        match self {
            RunOutcome::NothingToDelete { fetched }
            | RunOutcome::DryRun { fetched, .. }
            | RunOutcome::Deleted { fetched, .. } => *fetched,
        }
    }

    /// Archive written by the run, if any
    pub fn archive(&self) -> Option<&std::path::Path> {
        match self {
            RunOutcome::NothingToDelete { .. } => None,
            RunOutcome::DryRun { archive, .. } | RunOutcome::Deleted { archive, .. } => {
                Some(archive)
            }
        }
    }
}

/// Runs the fetch, snapshot, select, archive and delete stages in order
///
/// A failure in fetch, snapshot or archive aborts the run before any later
/// stage starts. In particular no delete call is issued unless the archive
/// of the selected posts was written. Delete failures do not abort the run;
/// they are collected in the returned [`DeletionReport`].
///
/// # Examples
///
/// ```no_run
/// use untweet_client::{Credentials, TwitterClient};
/// use untweet_janitor::{Janitor, JanitorConfig};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = TwitterClient::new(Credentials::new("key", "secret", "token", "token-secret"))?;
/// let janitor = Janitor::new(JanitorConfig::new("someone", "archive", 30));
///
/// let outcome = janitor.run(&client)?;
/// println!("Fetched {} posts", outcome.fetched());
/// # Ok(())
/// # }
/// ```
pub struct Janitor<R = TracingReporter> {
    config: JanitorConfig,
    reporter: R,
}

impl Janitor {
    /// Create a Janitor reporting through `tracing`
    pub fn new(config: JanitorConfig) -> Self {
        Self::with_reporter(config, TracingReporter)
    }
}

impl<R: Reporter> Janitor<R> {
    /// Create a Janitor with a custom reporter
    pub fn with_reporter(config: JanitorConfig, reporter: R) -> Self {
        Self { config, reporter }
    }

    /// Get the run configuration
    pub fn config(&self) -> &JanitorConfig {
        &self.config
    }

    /// Get the reporter
    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    /// Perform a complete run against the current time
    pub fn run<A>(&self, api: &A) -> Result<RunOutcome, JanitorError>
    where
        A: TimelineApi + ?Sized,
        A::Error: std::fmt::Display,
    {
        self.run_at(api, Utc::now())
    }

    /// Perform a complete run as of `now`
    ///
    /// `now` drives both post ages and the archive file name.
    pub fn run_at<A>(&self, api: &A, now: DateTime<Utc>) -> Result<RunOutcome, JanitorError>
    where
        A: TimelineApi + ?Sized,
        A::Error: std::fmt::Display,
    {
        self.config.validate()?;

        let timeline = fetch_timeline(
            api,
            &self.config.screen_name,
            self.config.page_size,
            &self.reporter,
        )?;
        let fetched = timeline.len();

        let snapshotter = Snapshotter::new(&self.config.archive_dir);
        self.reporter.report(&RunEvent::SnapshotWritten {
            path: snapshotter.write(&timeline)?,
            posts: fetched,
        });

        let selected =
            self.config
                .retention_policy()
                .select(&timeline, now.naive_utc(), &self.reporter);

        let bundle = timeline.bundle(&selected);
        let Some(receipt) = Archiver::new(&self.config.archive_dir).write(&bundle, now)? else {
            self.reporter.report(&RunEvent::NothingToDelete);
            return Ok(RunOutcome::NothingToDelete { fetched });
        };
        self.reporter.report(&RunEvent::ArchiveWritten {
            path: receipt.path(),
            posts: receipt.posts(),
        });

        match self.config.mode {
            RunMode::DryRun => {
                self.reporter.report(&RunEvent::DeletionSkipped {
                    scheduled: selected.len(),
                });
                Ok(RunOutcome::DryRun {
                    fetched,
                    scheduled: selected.len(),
                    archive: receipt.path().to_path_buf(),
                })
            }
            RunMode::Destructive => {
                let report = delete_posts(api, &timeline, &selected, &receipt, &self.reporter);
                Ok(RunOutcome::Deleted {
                    fetched,
                    archive: receipt.path().to_path_buf(),
                    report,
                })
            }
        }
    }
}
