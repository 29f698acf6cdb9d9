//! Best-effort batch deletion

use crate::{ArchiveReceipt, DeletionReport, Reporter, RunEvent};
use untweet_domain::{DeletionSet, Timeline, TimelineApi};

/// Issue one delete call per selected post, in deletion-set order
///
/// Requires the receipt of the run's archive write, so deletion cannot be
/// reached without a durable record of the posts. A failed call is recorded
/// and the batch moves on; nothing is retried or rolled back.
pub fn delete_posts<A, R>(
    api: &A,
    timeline: &Timeline,
    selected: &DeletionSet,
    _archived: &ArchiveReceipt,
    reporter: &R,
) -> DeletionReport
where
    A: TimelineApi + ?Sized,
    A::Error: std::fmt::Display,
    R: Reporter + ?Sized,
{
    let mut report = DeletionReport::new();

    for id in selected.iter() {
        let created_at = timeline.get(id).map_or("unknown date", |post| post.created_at());
        reporter.report(&RunEvent::Deleting { id, created_at });

        match api.destroy_post(id) {
            Ok(()) => report.record_success(id),
            Err(e) => {
                let error = e.to_string();
                reporter.report(&RunEvent::DeleteFailed { id, error: &error });
                report.record_failure(id, error);
            }
        }
    }

    reporter.report(&RunEvent::DeletionCompleted { report: &report });
    report
}
