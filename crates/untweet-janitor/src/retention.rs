//! Age-based retention policy

use crate::{Reporter, RunEvent};
use chrono::NaiveDateTime;
use untweet_domain::{DeletionSet, Timeline};

/// Selects posts that are old enough and outside the protected floor
///
/// A post is selected when both hold:
/// - its age in whole days is strictly greater than `max_age_days`
/// - its index in most-recent-first order is at least `min_count`
///
/// Ages are computed with [`Post::age_days`](untweet_domain::Post::age_days):
/// the creation offset is discarded and the difference truncated toward zero.
/// A post exactly `max_age_days` old is kept; one day older is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionPolicy {
    /// Age threshold in whole days
    pub max_age_days: u32,
    /// Number of most recent posts that are never selected
    pub min_count: usize,
}

impl RetentionPolicy {
    /// Policy with no protected floor
    pub fn new(max_age_days: u32) -> Self {
        Self {
            max_age_days,
            min_count: 0,
        }
    }

    /// Protect the `min_count` most recent posts
    pub fn with_min_count(mut self, min_count: usize) -> Self {
        self.min_count = min_count;
        self
    }

    /// Whether a post of this age is past the threshold
    pub fn is_expired(&self, age_days: i64) -> bool {
        age_days > i64::from(self.max_age_days)
    }

    /// Classify every post of the timeline
    ///
    /// The deletion set is in most-recent-first order. Posts with an
    /// unparseable timestamp are never selected.
    pub fn select<R>(&self, timeline: &Timeline, now_utc: NaiveDateTime, reporter: &R) -> DeletionSet
    where
        R: Reporter + ?Sized,
    {
        let mut selected = DeletionSet::new();

        for (index, post) in timeline.most_recent_first().into_iter().enumerate() {
            let age_days = match post.age_days(now_utc) {
                Ok(age) => age,
                Err(error) => {
                    reporter.report(&RunEvent::UnparseableTimestamp {
                        post,
                        error: &error,
                    });
                    continue;
                }
            };

            if index >= self.min_count && self.is_expired(age_days) {
                selected.push(post.id());
                reporter.report(&RunEvent::Scheduled {
                    position: index + 1,
                    post,
                    age_days,
                });
            }
        }

        reporter.report(&RunEvent::SelectionCompleted {
            scheduled: selected.len(),
        });

        selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{now, post_aged};
    use crate::MemoryReporter;
    use serde_json::json;
    use untweet_domain::{Post, PostId};

    fn ids(set: &DeletionSet) -> Vec<u64> {
        set.iter().map(|id| id.value()).collect()
    }

    fn select(policy: RetentionPolicy, timeline: &Timeline) -> DeletionSet {
        policy.select(timeline, now().naive_utc(), &MemoryReporter::new())
    }

    #[test]
    fn test_threshold_is_strict() {
        let timeline: Timeline = vec![post_aged(1, 30), post_aged(2, 31), post_aged(3, 29)]
            .into_iter()
            .collect();

        assert_eq!(ids(&select(RetentionPolicy::new(30), &timeline)), vec![2]);
    }

    #[test]
    fn test_partial_day_does_not_count() {
        // 30 days and 23 hours old is still 30 whole days
        let created = now() - chrono::Duration::days(30) - chrono::Duration::hours(23);
        let post = Post::from_json(json!({
            "id": 1,
            "created_at": created.format(untweet_domain::CREATED_AT_FORMAT).to_string(),
        }))
        .unwrap();
        let timeline: Timeline = vec![post].into_iter().collect();

        assert!(select(RetentionPolicy::new(30), &timeline).is_empty());
    }

    #[test]
    fn test_reference_scenario() {
        let timeline: Timeline = vec![post_aged(100, 10), post_aged(200, 40), post_aged(300, 70)]
            .into_iter()
            .collect();

        let set = select(RetentionPolicy::new(30), &timeline);
        assert_eq!(ids(&set), vec![200, 300]);
    }

    #[test]
    fn test_floor_protects_most_recent_by_time() {
        // Ids deliberately not in time order
        let timeline: Timeline = vec![
            post_aged(5, 100),
            post_aged(4, 90),
            post_aged(3, 80),
            post_aged(2, 70),
            post_aged(1, 60),
        ]
        .into_iter()
        .collect();

        let set = select(RetentionPolicy::new(30).with_min_count(2), &timeline);

        // Most recent are 1 (60d) and 2 (70d)
        assert_eq!(ids(&set), vec![3, 4, 5]);
        assert!(!set.contains(PostId::new(1)));
        assert!(!set.contains(PostId::new(2)));
    }

    #[test]
    fn test_floor_larger_than_timeline_selects_nothing() {
        let timeline: Timeline = vec![post_aged(1, 400), post_aged(2, 500)].into_iter().collect();
        assert!(select(RetentionPolicy::new(30).with_min_count(10), &timeline).is_empty());
    }

    #[test]
    fn test_unparseable_timestamp_is_kept() {
        let broken = Post::from_json(json!({"id": 9, "created_at": "long ago"})).unwrap();
        let timeline: Timeline = vec![post_aged(1, 400), broken].into_iter().collect();
        let reporter = MemoryReporter::new();

        let set = RetentionPolicy::new(30).select(&timeline, now().naive_utc(), &reporter);

        assert_eq!(ids(&set), vec![1]);
        assert!(reporter.contains("Keeping post 9"));
    }

    #[test]
    fn test_reports_each_scheduled_post() {
        let timeline: Timeline = vec![post_aged(1, 10), post_aged(2, 45)].into_iter().collect();
        let reporter = MemoryReporter::new();

        RetentionPolicy::new(30).select(&timeline, now().naive_utc(), &reporter);

        let lines = reporter.lines();
        assert!(lines[0].starts_with("Will delete post #2 (2) from "));
        assert!(lines[0].ends_with("(45 days old)"));
        assert_eq!(lines[1], "1 posts scheduled for deletion");
    }
}
