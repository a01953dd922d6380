//! Multi-target batch orchestration.
//!
//! Targets are processed sequentially in configuration order. Anything that
//! goes wrong for one target (invalid entry, fetch failure) is reported at
//! that target's granularity and never stops the remaining targets.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::Instrument;

use crate::classifier::LogClassifier;
use crate::config::TargetEntry;
use crate::domain::{ClassificationResult, Target};
use crate::error::Result;
use crate::obs;

/// Collaborator that retrieves the full log text for a target.
#[async_trait]
pub trait LogSource: Send + Sync {
    /// Fetch the log. Errors should name the URL and the target.
    async fn fetch_log(&self, target: &Target) -> Result<String>;
}

/// Collaborator that presents each target report as soon as it is ready.
pub trait ReportSink {
    fn emit(&mut self, report: &TargetReport);
}

/// What happened to one target.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TargetOutcome {
    Classified { result: ClassificationResult },
    Skipped { reason: String },
    Failed { error: String },
}

/// Report for one target of a batch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TargetReport {
    /// 1-based position in the batch.
    pub index: usize,
    pub total: usize,

    /// Human-readable target identity.
    pub context: String,

    pub outcome: TargetOutcome,
}

/// Batch-level tally.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BatchSummary {
    /// Targets that produced a verdict (either kind).
    pub classified: usize,

    /// Subset of `classified` that ended in a stage failure.
    pub stage_failures: usize,

    pub skipped: usize,
    pub failed: usize,
}

impl BatchSummary {
    fn record(&mut self, outcome: &TargetOutcome) {
        match outcome {
            TargetOutcome::Classified { result } => {
                self.classified += 1;
                if result.is_stage_failure() {
                    self.stage_failures += 1;
                }
            }
            TargetOutcome::Skipped { .. } => self.skipped += 1,
            TargetOutcome::Failed { .. } => self.failed += 1,
        }
    }
}

/// Fetches and classifies every configured target.
pub struct BatchAnalyzer<S> {
    source: S,
    classifier: LogClassifier,
}

impl<S: LogSource> BatchAnalyzer<S> {
    pub fn new(source: S, classifier: LogClassifier) -> Self {
        Self { source, classifier }
    }

    /// Fetch and classify a single target.
    pub async fn analyze(&self, target: &Target) -> Result<ClassificationResult> {
        let log = self.source.fetch_log(target).await?;
        Ok(self.classifier.classify(&log))
    }

    /// Process every entry in order, emitting one report per entry.
    pub async fn run_all(&self, entries: &[TargetEntry], sink: &mut dyn ReportSink) -> BatchSummary {
        let total = entries.len();
        let mut summary = BatchSummary::default();

        for (i, entry) in entries.iter().enumerate() {
            let index = i + 1;
            let context = entry.context();
            obs::emit_target_started(index, total, &context);

            let outcome = match entry.validate() {
                Err(reason) => {
                    obs::emit_target_skipped(index, &reason);
                    TargetOutcome::Skipped { reason }
                }
                Ok(target) => {
                    let span = obs::target_span(&target.label());
                    match self.analyze(&target).instrument(span).await {
                        Ok(result) => TargetOutcome::Classified { result },
                        Err(e) => {
                            obs::emit_target_failed(index, &e);
                            TargetOutcome::Failed {
                                error: e.to_string(),
                            }
                        }
                    }
                }
            };

            summary.record(&outcome);
            sink.emit(&TargetReport {
                index,
                total,
                context,
                outcome,
            });
        }

        obs::emit_batch_finished(summary.classified, summary.skipped, summary.failed);
        summary
    }
}
