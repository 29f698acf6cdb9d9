//! Per-item results of the deletion stage

use untweet_domain::PostId;

/// What happened to one delete call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The provider accepted the delete
    Deleted,
    /// The call failed; the message is the provider or transport error
    Failed(String),
}

/// One attempted deletion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteResult {
    /// Target post
    pub id: PostId,
    /// Result of the call
    pub outcome: DeleteOutcome,
}

/// Ordered results of a deletion batch
///
/// Every id in the deletion set gets exactly one entry, in call order.
/// The headline figure is [`succeeded`](Self::succeeded); attempted and
/// failed counts are available alongside it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeletionReport {
    results: Vec<DeleteResult>,
}

impl DeletionReport {
    /// Create an empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successful delete
    pub fn record_success(&mut self, id: PostId) {
        self.results.push(DeleteResult {
            id,
            outcome: DeleteOutcome::Deleted,
        });
    }

    /// Record a failed delete
    pub fn record_failure(&mut self, id: PostId, error: impl Into<String>) {
        self.results.push(DeleteResult {
            id,
            outcome: DeleteOutcome::Failed(error.into()),
        });
    }

    /// Every result, in call order
    pub fn results(&self) -> &[DeleteResult] {
        &self.results
    }

    /// Number of delete calls issued
    pub fn attempted(&self) -> usize {
        self.results.len()
    }

    /// Number of posts actually deleted
    pub fn succeeded(&self) -> usize {
        self.results
            .iter()
            .filter(|r| r.outcome == DeleteOutcome::Deleted)
            .count()
    }

    /// Number of failed calls
    pub fn failed(&self) -> usize {
        self.attempted() - self.succeeded()
    }

    /// Failed results with their error messages
    pub fn failures(&self) -> impl Iterator<Item = (PostId, &str)> {
        self.results.iter().filter_map(|r| match &r.outcome {
            DeleteOutcome::Failed(error) => Some((r.id, error.as_str())),
            DeleteOutcome::Deleted => None,
        })
    }

    /// One-line summary of the batch
    pub fn summary(&self) -> String {
        format!(
            "Deleted {} of {} posts ({} failed)",
            self.succeeded(),
            self.attempted(),
            self.failed()
        )
    }
}
