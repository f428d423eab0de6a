//! GitHub API error handling.

use thiserror::Error;

/// Errors returned by the GitHub REST API client.
#[derive(Error, Debug)]
pub enum GitHubError {
    /// The requested resource does not exist (HTTP 404 or an empty lookup key).
    #[error("Not found: {0}")]
    NotFound(String),

    /// The API answered with a non-success status.
    #[error("GitHub API request failed: HTTP {status}: {body}")]
    ApiRequestFailed {
        /// HTTP status code.
        status: u16,
        /// Response body, as returned.
        body: String,
    },

    /// The response body could not be decoded.
    #[error("Invalid response format from GitHub API: {0}")]
    InvalidResponseFormat(String),

    /// The configured API base URL cannot be used.
    #[error("Invalid GitHub API URL: {0}")]
    InvalidApiUrl(String),

    /// Network connectivity error.
    #[error("Network error: {0}")]
    NetworkError(String),
}

impl GitHubError {
    /// Returns true if the error is a not-found answer.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
