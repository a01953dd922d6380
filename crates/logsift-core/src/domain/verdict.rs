//! Classification verdicts.

use serde::{Deserialize, Serialize};

use super::counts::SummaryCounts;

/// A unique, non-rerun test failure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct FailureRecord {
    /// Normalized test identifier.
    pub test_id: String,

    /// Most informative failure detail found in the failure section.
    pub detail: String,
}

impl FailureRecord {
    pub fn new(test_id: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            test_id: test_id.into(),
            detail: detail.into(),
        }
    }
}

/// An infrastructure-level failure that pre-empts test analysis.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StageFailureResult {
    /// Description of the pattern that matched.
    pub description: String,

    /// First line of the matched text, trimmed.
    pub evidence_line: String,
}

/// Aggregated, rerun-adjusted test execution report.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TestReport {
    pub counts: SummaryCounts,

    /// Failures in first-seen order, deduplicated on `(test_id, detail)`.
    pub failures: Vec<FailureRecord>,

    /// Number of summary banners found; zero means the counts carry no information.
    pub summary_banners: usize,
}

/// Final verdict for one log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum ClassificationResult {
    StageFailure(StageFailureResult),
    TestSummary(TestReport),
}

impl ClassificationResult {
    pub fn is_stage_failure(&self) -> bool {
        matches!(self, ClassificationResult::StageFailure(_))
    }

    /// The test report, if test analysis ran.
    pub fn test_report(&self) -> Option<&TestReport> {
        match self {
            ClassificationResult::TestSummary(report) => Some(report),
            ClassificationResult::StageFailure(_) => None,
        }
    }
}
