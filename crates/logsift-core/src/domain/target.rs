//! Analysis targets.

use serde::{Deserialize, Serialize};

/// One validated build (or build stage) to analyze.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Target {
    pub job_name: String,
    pub build_id: String,

    /// Restricts the log to one pipeline stage; `None` means the full console log.
    pub stage_id: Option<String>,
}

impl Target {
    pub fn new(job_name: impl Into<String>, build_id: impl Into<String>) -> Self {
        Self {
            job_name: job_name.into(),
            build_id: build_id.into(),
            stage_id: None,
        }
    }

    pub fn with_stage(mut self, stage_id: impl Into<String>) -> Self {
        self.stage_id = Some(stage_id.into());
        self
    }

    /// Human-readable identity used as report context.
    pub fn context(&self) -> String {
        format!(
            "Job: {} | Build: {} | Stage ID: {}",
            self.job_name,
            self.build_id,
            self.stage_id.as_deref().unwrap_or("Full Log")
        )
    }

    /// Short `job/build[/stage]` label for errors and log fields.
    pub fn label(&self) -> String {
        match &self.stage_id {
            Some(stage) => format!("{}/{}/{}", self.job_name, self.build_id, stage),
            None => format!("{}/{}", self.job_name, self.build_id),
        }
    }
}
