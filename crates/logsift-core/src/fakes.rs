//! In-memory collaborators for tests and offline use.

use async_trait::async_trait;
use std::collections::HashMap;

use crate::batch::{LogSource, ReportSink, TargetReport};
use crate::domain::Target;
use crate::error::{LogsiftError, Result};

/// A [`LogSource`] serving canned logs keyed by target.
///
/// Unknown targets fail the way an HTTP 404 would.
#[derive(Debug, Clone, Default)]
pub struct StaticLogSource {
    logs: HashMap<Target, String>,
}

impl StaticLogSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_log(mut self, target: Target, log: impl Into<String>) -> Self {
        self.logs.insert(target, log.into());
        self
    }
}

#[async_trait]
impl LogSource for StaticLogSource {
    async fn fetch_log(&self, target: &Target) -> Result<String> {
        self.logs
            .get(target)
            .cloned()
            .ok_or_else(|| LogsiftError::Fetch {
                target: target.label(),
                message: format!("no log recorded for {}", target.context()),
            })
    }
}

/// A [`ReportSink`] that keeps every report in memory.
#[derive(Debug, Clone, Default)]
pub struct CollectingSink {
    pub reports: Vec<TargetReport>,
}

impl ReportSink for CollectingSink {
    fn emit(&mut self, report: &TargetReport) {
        self.reports.push(report.clone());
    }
}
