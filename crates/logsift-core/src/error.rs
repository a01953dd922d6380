//! Error taxonomy for logsift.
//!
//! Only configuration errors are fatal to a batch. Fetch errors are scoped to
//! a single target, and degenerate classification inputs (no banners, no
//! failure sections, no patterns) are not errors at all.

use std::path::PathBuf;

/// Errors raised while loading the stage-failure pattern file.
///
/// These never abort a run: the detector logs them and disables itself.
#[derive(Debug, thiserror::Error)]
pub enum PatternLoadError {
    #[error("patterns file not found")]
    NotFound,

    #[error("cannot read patterns file: {0}")]
    Io(#[source] std::io::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("patterns file must be a JSON list")]
    NotAList,

    #[error("entry {index} is missing required string field `{field}`")]
    MissingField { index: usize, field: &'static str },

    #[error("entry {index} has an invalid pattern: {source}")]
    InvalidRegex {
        index: usize,
        #[source]
        source: regex::Error,
    },
}

/// logsift errors.
#[derive(Debug, thiserror::Error)]
pub enum LogsiftError {
    #[error("config file not found at {0:?}")]
    TargetConfigNotFound(PathBuf),

    #[error("invalid target config {path:?}: {reason}")]
    TargetConfig { path: PathBuf, reason: String },

    #[error("failed to fetch log for {target}: {message}")]
    Fetch { target: String, message: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for logsift operations.
pub type Result<T> = std::result::Result<T, LogsiftError>;
