//! Timeline pagination

use crate::{JanitorError, Reporter, RunEvent};
use untweet_domain::{Post, PostId, Timeline, TimelineApi};

/// Page through an account's history until nothing older is returned
///
/// The first call has no anchor; every later call is anchored at the oldest
/// id seen so far. Because the anchor is inclusive the provider repeats it
/// at the top of the next page, so posts are merged by id. Pagination stops
/// when:
/// - a page is empty
/// - a page's oldest id equals the anchor (only the anchor came back)
/// - a page's oldest id is above the anchor, which would move the cursor
///   backwards
///
/// The cursor strictly decreases on every continuing call, so the loop
/// always terminates. Any API error aborts the fetch; nothing is retried.
pub fn fetch_timeline<A, R>(
    api: &A,
    screen_name: &str,
    page_size: u32,
    reporter: &R,
) -> Result<Timeline, JanitorError>
where
    A: TimelineApi + ?Sized,
    A::Error: std::fmt::Display,
    R: Reporter + ?Sized,
{
    let mut timeline = Timeline::new();
    let mut anchor: Option<PostId> = None;
    let mut calls = 0;

    loop {
        let page = api
            .user_timeline(screen_name, page_size, anchor)
            .map_err(|e| JanitorError::Fetch(e.to_string()))?;
        calls += 1;

        let Some(oldest) = page.iter().map(Post::id).min() else {
            break;
        };
        let received = page.len();

        match anchor {
            Some(previous) if oldest == previous => {
                timeline.merge_page(page);
                break;
            }
            Some(previous) if oldest > previous => {
                reporter.report(&RunEvent::CursorStalled {
                    anchor: previous,
                    oldest,
                });
                timeline.merge_page(page);
                break;
            }
            _ => {}
        }

        let added = timeline.merge_page(page);
        reporter.report(&RunEvent::PageFetched {
            oldest,
            received,
            added,
        });
        anchor = Some(oldest);
    }

    reporter.report(&RunEvent::FetchCompleted {
        total: timeline.len(),
        calls,
    });

    Ok(timeline)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{post_aged, MockApi};
    use crate::MemoryReporter;
    use std::collections::HashSet;

    fn history(count: u64) -> Vec<Post> {
        (1..=count).map(|id| post_aged(id * 10, (count - id) as i64)).collect()
    }

    #[test]
    fn test_multi_page_history_is_complete_and_unique() {
        let api = MockApi::new(history(25));
        let reporter = MemoryReporter::new();

        let timeline = fetch_timeline(&api, "someone", 10, &reporter).unwrap();

        assert_eq!(timeline.len(), 25);
        let ids: HashSet<PostId> = timeline.iter().map(Post::id).collect();
        assert_eq!(ids.len(), 25);
        assert!(reporter.contains("Retrieved 25 posts from the API"));
    }

    #[test]
    fn test_anchor_is_previous_oldest() {
        let api = MockApi::new(history(25));
        fetch_timeline(&api, "someone", 10, &MemoryReporter::new()).unwrap();

        // Pages: 250..160, 160..70, 70..10, then only 10 comes back
        assert_eq!(
            api.timeline_calls(),
            vec![
                None,
                Some(PostId::new(160)),
                Some(PostId::new(70)),
                Some(PostId::new(10)),
            ]
        );
    }

    #[test]
    fn test_cursor_never_increases() {
        let api = MockApi::new(history(57));
        fetch_timeline(&api, "someone", 7, &MemoryReporter::new()).unwrap();

        let anchors: Vec<PostId> = api.timeline_calls().into_iter().flatten().collect();
        assert!(anchors.windows(2).all(|w| w[1] < w[0]));
    }

    #[test]
    fn test_call_count_is_bounded_by_history_over_page() {
        for (count, page) in [(1u64, 200u32), (199, 200), (200, 200), (1000, 200), (37, 2), (64, 8)] {
            let api = MockApi::new(history(count));
            let timeline = fetch_timeline(&api, "someone", page, &MemoryReporter::new()).unwrap();

            assert_eq!(timeline.len() as u64, count);
            let bound = count.div_ceil(u64::from(page) - 1) + 2;
            assert!(
                api.timeline_calls().len() as u64 <= bound,
                "{} posts with page {} took {} calls",
                count,
                page,
                api.timeline_calls().len()
            );
        }
    }

    #[test]
    fn test_account_smaller_than_one_page_terminates() {
        let api = MockApi::new(history(3));
        let timeline = fetch_timeline(&api, "someone", 200, &MemoryReporter::new()).unwrap();

        assert_eq!(timeline.len(), 3);
        // First page, then the anchor alone comes back
        assert_eq!(api.timeline_calls().len(), 2);
    }

    #[test]
    fn test_empty_account() {
        let api = MockApi::new(Vec::new());
        let timeline = fetch_timeline(&api, "someone", 200, &MemoryReporter::new()).unwrap();

        assert!(timeline.is_empty());
        assert_eq!(api.timeline_calls(), vec![None]);
    }

    #[test]
    fn test_fetch_error_aborts() {
        let api = MockApi::new(history(25)).failing_fetch_at(1);
        let result = fetch_timeline(&api, "someone", 10, &MemoryReporter::new());

        match result {
            Err(JanitorError::Fetch(message)) => assert!(message.contains("Over capacity")),
            other => panic!("Expected fetch error, got {:?}", other),
        }
        assert_eq!(api.timeline_calls().len(), 2);
    }

    /// Ignores `max_id` and always serves the same page
    struct StuckApi;

    impl TimelineApi for StuckApi {
        type Error = String;

        fn user_timeline(
            &self,
            _screen_name: &str,
            _count: u32,
            max_id: Option<PostId>,
        ) -> Result<Vec<Post>, Self::Error> {
            match max_id {
                None => Ok(vec![post_aged(50, 1), post_aged(40, 2)]),
                Some(_) => Ok(vec![post_aged(90, 0), post_aged(80, 0)]),
            }
        }

        fn destroy_post(&self, _id: PostId) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    #[test]
    fn test_backwards_cursor_stops_pagination() {
        let reporter = MemoryReporter::new();
        let timeline = fetch_timeline(&StuckApi, "someone", 200, &reporter).unwrap();

        assert_eq!(timeline.len(), 4);
        assert!(reporter.contains("stopping pagination"));
    }
}
