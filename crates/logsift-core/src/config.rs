//! Target configuration loading.
//!
//! The target file is a JSON list whose order is the processing order. The
//! file itself must be valid; individual entries are validated lazily so that
//! one bad entry is skipped instead of failing the batch.

use serde_json::Value;
use std::path::Path;

use crate::domain::Target;
use crate::error::{LogsiftError, Result};

/// Default location of the stage-failure pattern file.
pub const DEFAULT_PATTERNS_FILE: &str = "error_patterns.json";

/// One raw entry of the target file.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetEntry(pub Value);

impl TargetEntry {
    /// Validate the entry into a [`Target`].
    ///
    /// `job_name` and `build_id` are required and non-empty; numbers are
    /// accepted for either. An empty `stage_id` selects the full log.
    pub fn validate(&self) -> std::result::Result<Target, String> {
        let job_name = self.text_field("job_name");
        let build_id = self.text_field("build_id");

        let (Some(job_name), Some(build_id)) = (job_name, build_id) else {
            return Err(format!("missing job_name or build_id: {}", self.0));
        };

        let target = Target::new(job_name, build_id);
        Ok(match self.text_field("stage_id") {
            Some(stage_id) => target.with_stage(stage_id),
            None => target,
        })
    }

    /// Best-effort report context, available even for invalid entries.
    pub fn context(&self) -> String {
        format!(
            "Job: {} | Build: {} | Stage ID: {}",
            self.text_field("job_name").as_deref().unwrap_or("None"),
            self.text_field("build_id").as_deref().unwrap_or("None"),
            self.text_field("stage_id").as_deref().unwrap_or("Full Log")
        )
    }

    fn text_field(&self, field: &str) -> Option<String> {
        match self.0.get(field)? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

impl From<Target> for TargetEntry {
    fn from(target: Target) -> Self {
        let mut entry = serde_json::json!({
            "job_name": target.job_name,
            "build_id": target.build_id,
        });
        if let Some(stage_id) = target.stage_id {
            entry["stage_id"] = Value::String(stage_id);
        }
        TargetEntry(entry)
    }
}

/// Load the ordered target list. Any file-level problem is fatal.
pub fn load_targets(path: &Path) -> Result<Vec<TargetEntry>> {
    let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => LogsiftError::TargetConfigNotFound(path.to_path_buf()),
        _ => LogsiftError::Io(e),
    })?;
    parse_targets(&content).map_err(|reason| LogsiftError::TargetConfig {
        path: path.to_path_buf(),
        reason,
    })
}

/// Parse a target list from JSON text.
pub fn parse_targets(json: &str) -> std::result::Result<Vec<TargetEntry>, String> {
    let document: Value =
        serde_json::from_str(json).map_err(|e| format!("could not decode JSON: {e}"))?;
    match document {
        Value::Array(entries) => Ok(entries.into_iter().map(TargetEntry).collect()),
        _ => Err("config file must be a JSON list".to_string()),
    }
}
