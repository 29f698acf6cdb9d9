//! Untweet API client
//!
//! Blocking client for the Twitter v1.1 REST endpoints the pruning pipeline
//! needs: paged `statuses/user_timeline` and `statuses/destroy/:id`. Every
//! request is signed with OAuth 1.0a user credentials.
//!
//! # Example
//!
//! ```no_run
//! use untweet_client::{Credentials, TwitterClient};
//! use untweet_domain::TimelineApi;
//!
//! let credentials = Credentials::new("key", "secret", "token", "token-secret");
//! let client = TwitterClient::new(credentials).expect("Failed to build client");
//!
//! let page = client.user_timeline("someone", 200, None).expect("Failed to fetch");
//! println!("{} posts on the first page", page.len());
//! ```

#![warn(missing_docs)]

mod client;
mod error;
mod oauth;

pub use client::{TwitterClient, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
pub use error::ClientError;
pub use oauth::{percent_encode, Credentials};
