//! In-memory provider used by the unit tests

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::json;
use std::collections::HashSet;
use std::sync::Mutex;
use untweet_domain::{Post, PostId, TimelineApi, CREATED_AT_FORMAT};

/// Fixed "now" for every test
pub(crate) fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 20, 12, 0, 0).unwrap()
}

/// Post created exactly `days` days before [`now`]
pub(crate) fn post_aged(id: u64, days: i64) -> Post {
    let created = now() - Duration::days(days);
    Post::from_json(json!({
        "id": id,
        "created_at": created.format(CREATED_AT_FORMAT).to_string(),
        "text": format!("post {id}"),
    }))
    .unwrap()
}

/// Provider that serves pages from a fixed history
///
/// Pages follow the provider's contract: newest first, `max_id` inclusive,
/// at most `count` posts.
pub(crate) struct MockApi {
    posts: Vec<Post>,
    fail_deletes: HashSet<PostId>,
    fail_fetch_at_call: Option<usize>,
    timeline_calls: Mutex<Vec<Option<PostId>>>,
    delete_calls: Mutex<Vec<PostId>>,
}

impl MockApi {
    pub(crate) fn new(posts: Vec<Post>) -> Self {
        let mut posts = posts;
        posts.sort_by_key(|p| std::cmp::Reverse(p.id()));
        Self {
            posts,
            fail_deletes: HashSet::new(),
            fail_fetch_at_call: None,
            timeline_calls: Mutex::new(Vec::new()),
            delete_calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn failing_delete(mut self, id: u64) -> Self {
        self.fail_deletes.insert(PostId::new(id));
        self
    }

    /// Fail the n-th (0-based) timeline call
    pub(crate) fn failing_fetch_at(mut self, call: usize) -> Self {
        self.fail_fetch_at_call = Some(call);
        self
    }

    pub(crate) fn timeline_calls(&self) -> Vec<Option<PostId>> {
        self.timeline_calls.lock().unwrap().clone()
    }

    pub(crate) fn delete_calls(&self) -> Vec<PostId> {
        self.delete_calls.lock().unwrap().clone()
    }
}

impl TimelineApi for MockApi {
    type Error = String;

    fn user_timeline(
        &self,
        _screen_name: &str,
        count: u32,
        max_id: Option<PostId>,
    ) -> Result<Vec<Post>, Self::Error> {
        let mut calls = self.timeline_calls.lock().unwrap();
        let call = calls.len();
        calls.push(max_id);

        if self.fail_fetch_at_call == Some(call) {
            return Err("HTTP 503: Over capacity".to_string());
        }

        Ok(self
            .posts
            .iter()
            .filter(|p| max_id.map_or(true, |max| p.id() <= max))
            .take(count as usize)
            .cloned()
            .collect())
    }

    fn destroy_post(&self, id: PostId) -> Result<(), Self::Error> {
        self.delete_calls.lock().unwrap().push(id);
        if self.fail_deletes.contains(&id) {
            Err(format!("No status found with that ID. ({})", id))
        } else {
            Ok(())
        }
    }
}
