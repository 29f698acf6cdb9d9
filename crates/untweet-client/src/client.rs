//! Twitter v1.1 client implementation.

use crate::error::{provider_message, ClientError};
use crate::oauth::Credentials;
use reqwest::blocking::{Client, Response};
use reqwest::header::AUTHORIZATION;
use reqwest::{Method, StatusCode};
use serde_json::Value;
use std::time::Duration;
use untweet_domain::{Post, PostId, TimelineApi};

/// Default API root
pub const DEFAULT_BASE_URL: &str = "https://api.twitter.com/1.1";

/// Default per-request timeout (30 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Blocking Twitter API client
///
/// Requests are issued one at a time; each is bounded by the configured
/// timeout. No retries are performed.
#[derive(Debug)]
pub struct TwitterClient {
    base_url: String,
    credentials: Credentials,
    http: Client,
}

impl TwitterClient {
    /// Create a client against the public API with the default timeout
    pub fn new(credentials: Credentials) -> Result<Self, ClientError> {
        Self::with_options(
            credentials,
            DEFAULT_BASE_URL,
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        )
    }

    /// Create a client with an explicit API root and timeout
    pub fn with_options(
        credentials: Credentials,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ClientError> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("untweet/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ClientError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credentials,
            http,
        })
    }

    /// API root requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sign and send one request, returning the successful response
    fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
    ) -> Result<Response, ClientError> {
        let url = format!("{}/{}", self.base_url, path);
        let authorization = self
            .credentials
            .authorization_header(method.as_str(), &url, query)?;

        tracing::debug!("{} {} {:?}", method, url, query);

        let response = self
            .http
            .request(method, &url)
            .query(query)
            .header(AUTHORIZATION, authorization)
            .send()?;

        check_status(response)
    }
}

/// Map non-success responses to typed errors
fn check_status(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().unwrap_or_default();
    let message = provider_message(&body).unwrap_or_else(|| {
        if body.trim().is_empty() {
            status.canonical_reason().unwrap_or("Unknown error").to_string()
        } else {
            body
        }
    });

    Err(match status {
        StatusCode::UNAUTHORIZED => ClientError::Auth(message),
        StatusCode::TOO_MANY_REQUESTS => ClientError::RateLimited(message),
        _ => ClientError::Api {
            status: status.as_u16(),
            message,
        },
    })
}

impl TimelineApi for TwitterClient {
    type Error = ClientError;

    fn user_timeline(
        &self,
        screen_name: &str,
        count: u32,
        max_id: Option<PostId>,
    ) -> Result<Vec<Post>, Self::Error> {
        let mut query = vec![
            ("screen_name".to_string(), screen_name.to_string()),
            ("count".to_string(), count.to_string()),
        ];
        if let Some(max_id) = max_id {
            query.push(("max_id".to_string(), max_id.to_string()));
        }

        let response = self.send(Method::GET, "statuses/user_timeline.json", &query)?;
        let page: Vec<Value> = response.json()?;

        page.into_iter()
            .map(|value| {
                Post::from_json(value)
                    .map_err(|e| ClientError::InvalidResponse(format!("Malformed post: {}", e)))
            })
            .collect()
    }

    fn destroy_post(&self, id: PostId) -> Result<(), Self::Error> {
        let query = vec![("trim_user".to_string(), "true".to_string())];
        self.send(
            Method::POST,
            &format!("statuses/destroy/{}.json", id),
            &query,
        )?;
        Ok(())
    }
}
