//! Trait definitions for external interactions
//!
//! The remote API is the only collaborator with side effects beyond the
//! archive directory. Implemented by the infrastructure layer
//! (untweet-client) and by in-memory mocks in tests.

use crate::{Post, PostId};

/// Paged timeline retrieval and delete-by-id against the provider
pub trait TimelineApi {
    /// Error type for API calls
    type Error;

    /// Fetch one page of the account's timeline, newest first
    ///
    /// `max_id` is inclusive: when set, the page starts at that post (if it
    /// still exists) and continues with older ones.
    fn user_timeline(
        &self,
        screen_name: &str,
        count: u32,
        max_id: Option<PostId>,
    ) -> Result<Vec<Post>, Self::Error>;

    /// Delete one post
    fn destroy_post(&self, id: PostId) -> Result<(), Self::Error>;
}

impl<T: TimelineApi + ?Sized> TimelineApi for &T {
    type Error = T::Error;

    fn user_timeline(
        &self,
        screen_name: &str,
        count: u32,
        max_id: Option<PostId>,
    ) -> Result<Vec<Post>, Self::Error> {
        (**self).user_timeline(screen_name, count, max_id)
    }

    fn destroy_post(&self, id: PostId) -> Result<(), Self::Error> {
        (**self).destroy_post(id)
    }
}
