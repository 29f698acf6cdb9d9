//! Configuration for pruning runs
//!
//! Defines the account, retention thresholds, page size and run mode.

use crate::{JanitorError, RetentionPolicy};
use std::path::PathBuf;

/// Largest page the provider serves per timeline call
pub const MAX_PAGE_SIZE: u32 = 200;

/// Default page size (the provider maximum)
pub const DEFAULT_PAGE_SIZE: u32 = MAX_PAGE_SIZE;

/// Whether selected posts are actually deleted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    /// Fetch, snapshot, select and archive; never delete
    #[default]
    DryRun,

    /// Same as dry run, followed by one delete call per selected post
    Destructive,
}

impl RunMode {
    /// Whether delete calls will be issued
    pub fn is_destructive(&self) -> bool {
        matches!(self, RunMode::Destructive)
    }
}

/// Configuration for a [`Janitor`](crate::Janitor) run
///
/// # Examples
///
/// ```
/// use untweet_janitor::{JanitorConfig, RunMode};
///
/// let config = JanitorConfig::new("someone", "/var/lib/untweet", 30)
///     .with_min_count(20)
///     .with_mode(RunMode::Destructive);
/// assert_eq!(config.page_size, 200);
/// assert!(config.mode.is_destructive());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct JanitorConfig {
    /// Account whose timeline is pruned
    pub screen_name: String,

    /// Directory receiving the snapshot and archives
    pub archive_dir: PathBuf,

    /// Posts strictly older than this many whole days are eligible
    pub max_age_days: u32,

    /// Number of most recent posts that are never deleted
    /// Default: 0
    pub min_count: usize,

    /// Posts requested per timeline call
    /// Default: 200
    pub page_size: u32,

    /// Dry run unless explicitly destructive
    pub mode: RunMode,
}

impl JanitorConfig {
    /// Dry-run configuration with default page size and no protected floor
    pub fn new(
        screen_name: impl Into<String>,
        archive_dir: impl Into<PathBuf>,
        max_age_days: u32,
    ) -> Self {
        Self {
            screen_name: screen_name.into(),
            archive_dir: archive_dir.into(),
            max_age_days,
            min_count: 0,
            page_size: DEFAULT_PAGE_SIZE,
            mode: RunMode::DryRun,
        }
    }

    /// Protect the `min_count` most recent posts
    pub fn with_min_count(mut self, min_count: usize) -> Self {
        self.min_count = min_count;
        self
    }

    /// Set the page size
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set the run mode
    pub fn with_mode(mut self, mode: RunMode) -> Self {
        self.mode = mode;
        self
    }

    /// Retention policy described by this configuration
    pub fn retention_policy(&self) -> RetentionPolicy {
        RetentionPolicy::new(self.max_age_days).with_min_count(self.min_count)
    }

    /// Check the configuration before any network or file activity
    ///
    /// The page size must be at least 2: every anchored page repeats the
    /// anchor post, so a page of one can never reach older posts.
    pub fn validate(&self) -> Result<(), JanitorError> {
        if self.screen_name.trim().is_empty() {
            return Err(JanitorError::Config("screen_name must not be empty".to_string()));
        }
        if !(2..=MAX_PAGE_SIZE).contains(&self.page_size) {
            return Err(JanitorError::Config(format!(
                "page_size must be between 2 and {}, got {}",
                MAX_PAGE_SIZE, self.page_size
            )));
        }
        if !self.archive_dir.is_dir() {
            return Err(JanitorError::Config(format!(
                "archive directory {} does not exist or is not a directory",
                self.archive_dir.display()
            )));
        }
        Ok(())
    }
}
