//! Post module - a single entry of an account's timeline

use chrono::{DateTime, FixedOffset, NaiveDateTime};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;

/// Format of the provider's `created_at` field
///
/// Example: `Wed Oct 10 20:19:24 +0000 2018`
pub const CREATED_AT_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

/// Unique 64-bit post identifier assigned by the provider
///
/// Identifiers grow over time, so the smallest id of a page is its oldest
/// post and serves as the pagination cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(u64);

impl PostId {
    /// Wrap a raw provider id
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Get the raw u64 value
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for PostId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

impl From<u64> for PostId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Errors raised while interpreting raw provider JSON as a post
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PostError {
    /// The payload is not a JSON object
    #[error("Post payload is not a JSON object")]
    NotAnObject,

    /// Neither `id` nor `id_str` holds a valid 64-bit id
    #[error("Post payload has no valid `id` field")]
    MissingId,

    /// `created_at` is absent or not a string
    #[error("Post {0} has no `created_at` string")]
    MissingCreatedAt(PostId),

    /// `created_at` does not match [`CREATED_AT_FORMAT`]
    #[error("Post {id} has an unparseable `created_at` {value:?}: {reason}")]
    InvalidTimestamp {
        /// Post the timestamp belongs to
        id: PostId,
        /// Raw timestamp text
        value: String,
        /// Parser message
        reason: String,
    },
}

/// A post as returned by the provider
///
/// Only `id` and `created_at` are interpreted. Every field, including those
/// two, is kept in the raw object and serialized back verbatim so that
/// snapshots and archives hold exactly what the API returned.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Value")]
pub struct Post {
    id: PostId,
    created_at: String,
    raw: Map<String, Value>,
}

impl Post {
    /// Interpret a raw JSON object as a post
    ///
    /// # Examples
    ///
    /// ```
    /// use untweet_domain::{Post, PostId};
    ///
    /// let post = Post::from_json(serde_json::json!({
    ///     "id": 1050118621198921728u64,
    ///     "created_at": "Wed Oct 10 20:19:24 +0000 2018",
    ///     "text": "hello",
    /// })).unwrap();
    /// assert_eq!(post.id(), PostId::new(1050118621198921728));
    /// assert_eq!(post.raw()["text"], "hello");
    /// ```
    pub fn from_json(value: Value) -> Result<Self, PostError> {
        let Value::Object(raw) = value else {
            return Err(PostError::NotAnObject);
        };

        let id = raw
            .get("id")
            .and_then(Value::as_u64)
            .or_else(|| {
                raw.get("id_str")
                    .and_then(Value::as_str)
                    .and_then(|s| s.parse().ok())
            })
            .map(PostId)
            .ok_or(PostError::MissingId)?;

        let created_at = raw
            .get("created_at")
            .and_then(Value::as_str)
            .ok_or(PostError::MissingCreatedAt(id))?
            .to_string();

        Ok(Self {
            id,
            created_at,
            raw,
        })
    }

    /// Post identifier
    pub fn id(&self) -> PostId {
        self.id
    }

    /// Creation timestamp exactly as the provider formatted it
    pub fn created_at(&self) -> &str {
        &self.created_at
    }

    /// The untouched provider payload
    pub fn raw(&self) -> &Map<String, Value> {
        &self.raw
    }

    /// Parse the creation time, keeping its UTC offset
    pub fn created_at_time(&self) -> Result<DateTime<FixedOffset>, PostError> {
        DateTime::parse_from_str(&self.created_at, CREATED_AT_FORMAT).map_err(|e| {
            PostError::InvalidTimestamp {
                id: self.id,
                value: self.created_at.clone(),
                reason: e.to_string(),
            }
        })
    }

    /// Creation time as wall-clock time with the offset dropped
    pub fn created_at_wall_clock(&self) -> Result<NaiveDateTime, PostError> {
        Ok(self.created_at_time()?.naive_local())
    }

    /// Age in whole days relative to `now_utc`, truncated toward zero
    ///
    /// The offset of the creation time is discarded before subtracting, so
    /// the wall-clock reading is treated as if it were UTC. The provider
    /// always reports `+0000`, where this is exact; any other offset shifts
    /// the age by up to a day near day boundaries.
    pub fn age_days(&self, now_utc: NaiveDateTime) -> Result<i64, PostError> {
        Ok((now_utc - self.created_at_wall_clock()?).num_days())
    }
}

impl TryFrom<Value> for Post {
    type Error = PostError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_json(value)
    }
}

impl Serialize for Post {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.raw.serialize(serializer)
    }
}
