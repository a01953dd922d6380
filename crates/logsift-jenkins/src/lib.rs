//! Jenkins log retrieval for logsift.
//!
//! Fetches either the full console log of a build or the concatenated logs
//! of every execution node belonging to one pipeline stage.

pub mod client;
pub mod describe;
pub mod error;

pub use client::{JenkinsClient, JenkinsConfig, DEFAULT_TIMEOUT};
pub use describe::{stage_node_ids, BuildDescription, StageDescription, StageFlowNode};
pub use error::JenkinsError;

/// Result type for Jenkins operations
pub type Result<T> = std::result::Result<T, JenkinsError>;
