//! Timeline aggregate, deletion sets and archive bundles

use crate::{Post, PostId};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::cmp::Reverse;
use std::collections::BTreeMap;

/// Deduplicated aggregate of every fetched post, keyed by id
///
/// Serializes as a JSON object mapping the decimal id to the raw post.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Timeline {
    posts: BTreeMap<PostId, Post>,
}

impl Timeline {
    /// Create an empty timeline
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one page of posts, returning how many ids were not seen before
    ///
    /// A post already present (such as the pagination anchor, which the
    /// provider repeats at the top of the next page) is replaced by the
    /// newer copy without being counted.
    pub fn merge_page(&mut self, page: Vec<Post>) -> usize {
        let mut added = 0;
        for post in page {
            if self.posts.insert(post.id(), post).is_none() {
                added += 1;
            }
        }
        added
    }

    /// Number of distinct posts
    pub fn len(&self) -> usize {
        self.posts.len()
    }

    /// Whether nothing was fetched
    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Look up a post by id
    pub fn get(&self, id: PostId) -> Option<&Post> {
        self.posts.get(&id)
    }

    /// Whether the id is present
    pub fn contains(&self, id: PostId) -> bool {
        self.posts.contains_key(&id)
    }

    /// Smallest id, i.e. the oldest post
    pub fn oldest_id(&self) -> Option<PostId> {
        self.posts.keys().next().copied()
    }

    /// Posts in ascending id order
    pub fn iter(&self) -> impl Iterator<Item = &Post> {
        self.posts.values()
    }

    /// Posts ordered most recent first
    ///
    /// Ordered by creation instant descending, then id descending on ties.
    /// Posts whose timestamp cannot be parsed come last.
    pub fn most_recent_first(&self) -> Vec<&Post> {
        let mut posts: Vec<&Post> = self.posts.values().collect();
        posts.sort_by_cached_key(|post| Reverse((post.created_at_time().ok(), post.id())));
        posts
    }

    /// Restrict the timeline to the members of a deletion set
    pub fn bundle<'a>(&'a self, set: &DeletionSet) -> ArchiveBundle<'a> {
        ArchiveBundle {
            entries: set.iter().filter_map(|id| self.get(id)).collect(),
        }
    }
}

impl FromIterator<Post> for Timeline {
    fn from_iter<I: IntoIterator<Item = Post>>(iter: I) -> Self {
        let mut timeline = Self::new();
        timeline.merge_page(iter.into_iter().collect());
        timeline
    }
}

/// Ordered ids selected for deletion
///
/// The order is the order of delete calls and of archive entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeletionSet {
    ids: Vec<PostId>,
}

impl DeletionSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an id, ignoring repeats
    pub fn push(&mut self, id: PostId) {
        if !self.ids.contains(&id) {
            self.ids.push(id);
        }
    }

    /// Number of selected ids
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether nothing was selected
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Whether the id was selected
    pub fn contains(&self, id: PostId) -> bool {
        self.ids.contains(&id)
    }

    /// Selected ids in order
    pub fn iter(&self) -> impl Iterator<Item = PostId> + '_ {
        self.ids.iter().copied()
    }
}

impl FromIterator<PostId> for DeletionSet {
    fn from_iter<I: IntoIterator<Item = PostId>>(iter: I) -> Self {
        let mut set = Self::new();
        for id in iter {
            set.push(id);
        }
        set
    }
}

/// The posts of a deletion set, borrowed from the timeline
///
/// Serializes as a JSON object keyed by id, entries in deletion order.
#[derive(Debug, Clone, PartialEq)]
pub struct ArchiveBundle<'a> {
    entries: Vec<&'a Post>,
}

impl<'a> ArchiveBundle<'a> {
    /// Number of archived posts
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the bundle holds nothing
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Archived posts in deletion order
    pub fn posts(&self) -> &[&'a Post] {
        &self.entries
    }
}

impl Serialize for ArchiveBundle<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for post in &self.entries {
            map.serialize_entry(&post.id(), post)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn post(id: u64, created_at: &str) -> Post {
        Post::from_json(json!({"id": id, "created_at": created_at, "text": format!("post {id}")}))
            .unwrap()
    }

    #[test]
    fn test_merge_page_dedupes_by_id() {
        let mut timeline = Timeline::new();
        let first = vec![
            post(30, "Wed Mar 20 10:00:00 +0000 2024"),
            post(20, "Tue Mar 19 10:00:00 +0000 2024"),
        ];
        let second = vec![
            post(20, "Tue Mar 19 10:00:00 +0000 2024"),
            post(10, "Mon Mar 18 10:00:00 +0000 2024"),
        ];

        assert_eq!(timeline.merge_page(first), 2);
        assert_eq!(timeline.merge_page(second), 1);
        assert_eq!(timeline.len(), 3);
        assert_eq!(timeline.oldest_id(), Some(PostId::new(10)));
    }

    #[test]
    fn test_most_recent_first_orders_by_time_not_id() {
        let timeline: Timeline = vec![
            post(1, "Wed Mar 20 10:00:00 +0000 2024"),
            post(2, "Mon Mar 18 10:00:00 +0000 2024"),
            post(3, "Tue Mar 19 10:00:00 +0000 2024"),
            post(4, "not a date"),
            post(5, "Tue Mar 19 10:00:00 +0000 2024"),
        ]
        .into_iter()
        .collect();

        let order: Vec<u64> = timeline
            .most_recent_first()
            .iter()
            .map(|p| p.id().value())
            .collect();
        assert_eq!(order, vec![1, 5, 3, 2, 4]);
    }

    #[test]
    fn test_most_recent_first_compares_instants() {
        // 23:00 at -0500 is later than 02:00 the next day at +0000
        let timeline: Timeline = vec![
            post(1, "Wed Mar 20 02:00:00 +0000 2024"),
            post(2, "Tue Mar 19 23:00:00 -0500 2024"),
        ]
        .into_iter()
        .collect();

        let first = timeline.most_recent_first()[0].id();
        assert_eq!(first, PostId::new(2));
    }

    #[test]
    fn test_bundle_follows_deletion_order() {
        let timeline: Timeline = vec![
            post(1, "Wed Mar 20 10:00:00 +0000 2024"),
            post(2, "Tue Mar 19 10:00:00 +0000 2024"),
            post(3, "Mon Mar 18 10:00:00 +0000 2024"),
        ]
        .into_iter()
        .collect();
        let set: DeletionSet = [3, 1, 3].into_iter().map(PostId::new).collect();

        let bundle = timeline.bundle(&set);
        assert_eq!(set.len(), 2);
        assert_eq!(bundle.len(), 2);
        assert_eq!(bundle.posts()[0].id(), PostId::new(3));

        let text = serde_json::to_string(&bundle).unwrap();
        assert!(text.find("\"3\"").unwrap() < text.find("\"1\"").unwrap());
    }

    #[test]
    fn test_timeline_serializes_keyed_by_id() {
        let timeline: Timeline = vec![post(7, "Wed Mar 20 10:00:00 +0000 2024")]
            .into_iter()
            .collect();
        let value = serde_json::to_value(&timeline).unwrap();
        assert_eq!(value["7"]["text"], "post 7");
    }
}
