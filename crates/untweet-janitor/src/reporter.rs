//! Run reporting collaborator
//!
//! Every stage receives a [`Reporter`] and describes what it does through
//! [`RunEvent`]s instead of logging directly. Production runs use
//! [`TracingReporter`]; tests use [`MemoryReporter`] to inspect the events.

use crate::DeletionReport;
use std::fmt;
use std::path::Path;
use std::sync::{Arc, Mutex};
use untweet_domain::{Post, PostError, PostId};

/// Severity of an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventLevel {
    /// Normal progress
    Info,
    /// Something was skipped or looks off, the run continues
    Warn,
    /// An item failed, the run continues
    Error,
}

/// Something a pipeline stage did
#[derive(Debug)]
pub enum RunEvent<'a> {
    /// A timeline page was merged
    PageFetched {
        /// Oldest id on the page, the next anchor
        oldest: PostId,
        /// Posts on the page
        received: usize,
        /// Posts not seen on earlier pages
        added: usize,
    },
    /// A page started above the anchor; the cursor would move backwards
    CursorStalled {
        /// Anchor the page was requested with
        anchor: PostId,
        /// Oldest id the provider returned
        oldest: PostId,
    },
    /// Pagination finished
    FetchCompleted {
        /// Distinct posts retrieved
        total: usize,
        /// Timeline calls issued
        calls: usize,
    },
    /// The full timeline was persisted
    SnapshotWritten {
        /// Snapshot file
        path: &'a Path,
        /// Posts written
        posts: usize,
    },
    /// A post was selected for deletion
    Scheduled {
        /// 1-based position in most-recent-first order
        position: usize,
        /// Selected post
        post: &'a Post,
        /// Age in whole days
        age_days: i64,
    },
    /// A post was kept because its age is unknown
    UnparseableTimestamp {
        /// Kept post
        post: &'a Post,
        /// Parser failure
        error: &'a PostError,
    },
    /// Classification finished
    SelectionCompleted {
        /// Posts selected for deletion
        scheduled: usize,
    },
    /// The deletion set is empty; the run ends here
    NothingToDelete,
    /// The selected posts were persisted
    ArchiveWritten {
        /// Archive file
        path: &'a Path,
        /// Posts written
        posts: usize,
    },
    /// Dry run: deletion stage skipped
    DeletionSkipped {
        /// Posts that would have been deleted
        scheduled: usize,
    },
    /// A delete call is about to be issued
    Deleting {
        /// Target post
        id: PostId,
        /// Its creation timestamp as reported by the provider
        created_at: &'a str,
    },
    /// A delete call failed
    DeleteFailed {
        /// Target post
        id: PostId,
        /// Error message
        error: &'a str,
    },
    /// The deletion batch finished
    DeletionCompleted {
        /// Per-item results
        report: &'a DeletionReport,
    },
}

impl RunEvent<'_> {
    /// Severity of the event
    pub fn level(&self) -> EventLevel {
        match self {
            RunEvent::CursorStalled { .. } | RunEvent::UnparseableTimestamp { .. } => {
                EventLevel::Warn
            }
            RunEvent::DeletionCompleted { report } if report.failed() > 0 => EventLevel::Warn,
            RunEvent::DeleteFailed { .. } => EventLevel::Error,
            _ => EventLevel::Info,
        }
    }
}

impl fmt::Display for RunEvent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunEvent::PageFetched {
                oldest,
                received,
                added,
            } => write!(
                f,
                "Retrieved posts up to ID {} ({} posts, {} new)",
                oldest, received, added
            ),
            RunEvent::CursorStalled { anchor, oldest } => write!(
                f,
                "Page requested below ID {} started at ID {}; stopping pagination",
                anchor, oldest
            ),
            RunEvent::FetchCompleted { total, calls } => write!(
                f,
                "Retrieved {} posts from the API in {} calls",
                total, calls
            ),
            RunEvent::SnapshotWritten { path, posts } => {
                write!(f, "Wrote snapshot of {} posts to {}", posts, path.display())
            }
            RunEvent::Scheduled {
                position,
                post,
                age_days,
            } => write!(
                f,
                "Will delete post #{} ({}) from {} ({} days old)",
                position,
                post.id(),
                post.created_at(),
                age_days
            ),
            RunEvent::UnparseableTimestamp { post, error } => {
                write!(f, "Keeping post {}: {}", post.id(), error)
            }
            RunEvent::SelectionCompleted { scheduled } => {
                write!(f, "{} posts scheduled for deletion", scheduled)
            }
            RunEvent::NothingToDelete => write!(f, "Nothing to delete."),
            RunEvent::ArchiveWritten { path, posts } => {
                write!(f, "Archived {} posts to {}", posts, path.display())
            }
            RunEvent::DeletionSkipped { scheduled } => write!(
                f,
                "No delete option provided. Skipping deletion of {} posts.",
                scheduled
            ),
            RunEvent::Deleting { id, created_at } => {
                write!(f, "Deleting post {} from {}", id, created_at)
            }
            RunEvent::DeleteFailed { id, error } => {
                write!(f, "Failed to delete post {}: {}", id, error)
            }
            RunEvent::DeletionCompleted { report } => write!(f, "{}", report.summary()),
        }
    }
}

/// Receives the events of a run
pub trait Reporter {
    /// Handle one event
    fn report(&self, event: &RunEvent<'_>);
}

impl<R: Reporter + ?Sized> Reporter for &R {
    fn report(&self, event: &RunEvent<'_>) {
        (**self).report(event)
    }
}

/// Emits every event as a `tracing` event at its level
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&self, event: &RunEvent<'_>) {
        match event.level() {
            EventLevel::Info => tracing::info!("{}", event),
            EventLevel::Warn => tracing::warn!("{}", event),
            EventLevel::Error => tracing::error!("{}", event),
        }
    }
}

/// Keeps rendered events in memory
///
/// Clones share the same buffer.
///
/// # Examples
///
/// ```
/// use untweet_janitor::{MemoryReporter, Reporter, RunEvent};
///
/// let reporter = MemoryReporter::new();
/// reporter.report(&RunEvent::NothingToDelete);
/// assert_eq!(reporter.lines(), vec!["Nothing to delete.".to_string()]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryReporter {
    events: Arc<Mutex<Vec<(EventLevel, String)>>>,
}

impl MemoryReporter {
    /// Create an empty reporter
    pub fn new() -> Self {
        Self::default()
    }

    /// Rendered events in order
    pub fn lines(&self) -> Vec<String> {
        self.entries().into_iter().map(|(_, line)| line).collect()
    }

    /// Rendered events with their levels
    pub fn entries(&self) -> Vec<(EventLevel, String)> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Whether any rendered event contains `needle`
    pub fn contains(&self, needle: &str) -> bool {
        self.lines().iter().any(|line| line.contains(needle))
    }
}

impl Reporter for MemoryReporter {
    fn report(&self, event: &RunEvent<'_>) {
        if let Ok(mut events) = self.events.lock() {
            events.push((event.level(), event.to_string()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn post() -> Post {
        Post::from_json(json!({"id": 11, "created_at": "Mon Mar 18 12:00:00 +0000 2024"})).unwrap()
    }

    #[test]
    fn test_scheduled_line() {
        let post = post();
        let event = RunEvent::Scheduled {
            position: 4,
            post: &post,
            age_days: 41,
        };
        assert_eq!(
            event.to_string(),
            "Will delete post #4 (11) from Mon Mar 18 12:00:00 +0000 2024 (41 days old)"
        );
        assert_eq!(event.level(), EventLevel::Info);
    }

    #[test]
    fn test_levels() {
        let mut report = DeletionReport::new();
        report.record_success(PostId::new(1));
        assert_eq!(
            RunEvent::DeletionCompleted { report: &report }.level(),
            EventLevel::Info
        );

        report.record_failure(PostId::new(2), "boom");
        assert_eq!(
            RunEvent::DeletionCompleted { report: &report }.level(),
            EventLevel::Warn
        );
        assert_eq!(
            RunEvent::DeleteFailed {
                id: PostId::new(2),
                error: "boom"
            }
            .level(),
            EventLevel::Error
        );
    }

    #[test]
    fn test_memory_reporter_shares_buffer() {
        let reporter = MemoryReporter::new();
        let clone = reporter.clone();
        clone.report(&RunEvent::SelectionCompleted { scheduled: 2 });
        (&reporter).report(&RunEvent::NothingToDelete);

        assert_eq!(
            reporter.lines(),
            vec![
                "2 posts scheduled for deletion".to_string(),
                "Nothing to delete.".to_string()
            ]
        );
        assert!(reporter.contains("scheduled"));
    }
}
