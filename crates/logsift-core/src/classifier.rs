//! Single-log classification.
//!
//! A stage failure is a terminal verdict: when one is detected the test
//! summary and failure extraction never run.

use std::sync::Arc;
use tracing::debug;

use crate::domain::{ClassificationResult, TestReport};
use crate::failures::extract_failures;
use crate::obs;
use crate::passed::extract_passed_ids;
use crate::stage_detector::StageFailureDetector;
use crate::summary::aggregate_summary;

/// Classifies log documents against a shared, read-only pattern list.
#[derive(Debug, Clone, Default)]
pub struct LogClassifier {
    detector: Arc<StageFailureDetector>,
}

impl LogClassifier {
    pub fn new(detector: StageFailureDetector) -> Self {
        Self {
            detector: Arc::new(detector),
        }
    }

    /// Classify one log.
    pub fn classify(&self, log: &str) -> ClassificationResult {
        classify_log(log, &self.detector)
    }
}

/// Classify one log: stage failure first, otherwise a rerun-adjusted test report.
pub fn classify_log(log: &str, detector: &StageFailureDetector) -> ClassificationResult {
    if let Some(stage_failure) = detector.check(log) {
        obs::emit_stage_failure(&stage_failure.description, &stage_failure.evidence_line);
        return ClassificationResult::StageFailure(stage_failure);
    }

    let passed = extract_passed_ids(log);
    if !passed.is_empty() {
        debug!(
            passed = passed.len(),
            "Found unique passed tests; rerun failures for these will be ignored"
        );
    }

    let scan = aggregate_summary(log);
    if scan.banners == 0 {
        obs::emit_summary_missing();
    }

    let failures = extract_failures(log, &passed);
    obs::emit_test_summary(scan.counts.total, failures.len(), passed.len());

    ClassificationResult::TestSummary(TestReport {
        counts: scan.counts,
        failures,
        summary_banners: scan.banners,
    })
}
