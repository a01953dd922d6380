//! logsift core library
//!
//! Classifies CI build logs into either a stage-level infrastructure failure
//! or an aggregated, rerun-aware pytest report.
//!
//! The engine is synchronous and stateless: [`classify_log`] takes one log and
//! a read-only [`StageFailureDetector`] and returns a [`ClassificationResult`].
//! [`BatchAnalyzer`] drives many targets through a [`LogSource`] and hands each
//! report to a [`ReportSink`].

pub mod batch;
pub mod classifier;
pub mod config;
pub mod domain;
pub mod error;
pub mod failures;
pub mod fakes;
pub mod obs;
pub mod passed;
pub mod reporting;
pub mod stage_detector;
pub mod summary;
pub mod telemetry;
pub mod test_id;

pub use batch::{BatchAnalyzer, BatchSummary, LogSource, ReportSink, TargetOutcome, TargetReport};
pub use classifier::{classify_log, LogClassifier};
pub use config::{load_targets, TargetEntry, DEFAULT_PATTERNS_FILE};
pub use domain::{
    ClassificationResult, FailureRecord, StageFailureResult, SummaryCounts, Target, TestReport,
};
pub use error::{LogsiftError, PatternLoadError, Result};
pub use failures::{extract_failures, UNKNOWN_FAILURE};
pub use passed::extract_passed_ids;
pub use stage_detector::{StageFailureDetector, StageFailurePattern};
pub use summary::{aggregate_summary, SummaryScan};
pub use telemetry::init_tracing;
pub use test_id::normalize_test_id;

/// logsift version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
