//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Client error
    #[error("API client error: {0}")]
    Client(#[from] untweet_client::ClientError),

    /// Pruning run error
    #[error(transparent)]
    Janitor(#[from] untweet_janitor::JanitorError),

    /// Logging could not be set up
    #[error("Logging setup failed: {0}")]
    Logging(String),
}

impl CliError {
    /// Process exit code for this error.
    ///
    /// Every fatal condition exits with 1; usage errors are handled by the
    /// argument parser before any of these can occur.
    pub fn exit_code(&self) -> i32 {
        1
    }
}
