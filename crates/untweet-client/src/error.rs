//! Error types for the API client.

use serde::Deserialize;
use thiserror::Error;

/// API client errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// Connection error (network, DNS, TLS)
    #[error("Connection error: {0}")]
    Connection(String),

    /// The request exceeded the configured timeout
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Credentials were rejected (HTTP 401)
    #[error("Authentication error: {0}")]
    Auth(String),

    /// The provider's rate limit was hit (HTTP 429)
    #[error("Rate limit exceeded: {0}")]
    RateLimited(String),

    /// Any other non-success response
    #[error("API error (HTTP {status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Provider error message, or the raw body
        message: String,
    },

    /// The response body could not be interpreted
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Client construction or request signing failed
    #[error("Client configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ClientError::Timeout(e.to_string())
        } else if e.is_connect() {
            ClientError::Connection(e.to_string())
        } else if e.is_decode() {
            ClientError::InvalidResponse(e.to_string())
        } else if e.is_builder() {
            ClientError::Config(e.to_string())
        } else {
            ClientError::Connection(e.to_string())
        }
    }
}

/// Error body returned by the provider
#[derive(Debug, Deserialize)]
struct ErrorBody {
    errors: Vec<ErrorEntry>,
}

#[derive(Debug, Deserialize)]
struct ErrorEntry {
    #[serde(default)]
    code: Option<i64>,
    message: String,
}

/// Extract the provider's error messages from a response body
///
/// Returns `None` when the body is not the provider's error shape.
pub(crate) fn provider_message(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    if parsed.errors.is_empty() {
        return None;
    }

    let messages: Vec<String> = parsed
        .errors
        .into_iter()
        .map(|entry| match entry.code {
            Some(code) => format!("{} (code {})", entry.message, code),
            None => entry.message,
        })
        .collect();

    Some(messages.join("; "))
}
