//! Untweet Domain Layer
//!
//! Core types shared by every other crate in the workspace. It defines what a
//! post is, how fetched pages aggregate into a timeline, and the trait the
//! remote API client has to implement.
//!
//! ## Key Concepts
//!
//! - **Post**: one entry of an account's history, a typed id and creation
//!   time plus the untouched provider payload
//! - **Timeline**: the deduplicated aggregate of every fetched page
//! - **DeletionSet**: the ordered ids selected by the retention policy
//! - **ArchiveBundle**: the timeline restricted to a deletion set, written
//!   before anything is destroyed
//!
//! ## Architecture
//!
//! No network or filesystem access lives here. The HTTP client
//! (`untweet-client`) implements [`traits::TimelineApi`] and the pipeline
//! (`untweet-janitor`) consumes it.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod post;
pub mod timeline;
pub mod traits;

// Re-exports for convenience
pub use post::{Post, PostError, PostId, CREATED_AT_FORMAT};
pub use timeline::{ArchiveBundle, DeletionSet, Timeline};
pub use traits::TimelineApi;
