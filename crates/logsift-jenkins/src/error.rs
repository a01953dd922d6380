//! Error types for Jenkins log retrieval

use thiserror::Error;

/// Errors that can occur while fetching Jenkins logs
#[derive(Error, Debug)]
pub enum JenkinsError {
    /// Request failed or returned a non-success status
    #[error("Failed to fetch from {url}. Error: {message}")]
    Request { url: String, message: String },

    /// HTTP client could not be constructed
    #[error("HTTP client error: {0}")]
    Client(String),

    /// Stage resolved to no execution nodes
    #[error("No execution nodes for Stage ID '{0}'.")]
    NoExecutionNodes(String),

    /// Build description was not valid JSON
    #[error("Invalid build description from {url}: {source}")]
    InvalidDescription {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl JenkinsError {
    pub(crate) fn request(url: &str, err: reqwest::Error) -> Self {
        JenkinsError::Request {
            url: url.to_string(),
            message: err.to_string(),
        }
    }
}
