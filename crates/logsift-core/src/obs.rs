//! Structured observability hooks for batch and classification events.
//!
//! Events are emitted with a stable `event` field so JSON log consumers can
//! filter on them (`RUST_LOG` controls verbosity).

use tracing::{info, warn};

/// Span tagging every event emitted while one target is analyzed.
///
/// Attach it with `tracing::Instrument` so it follows the fetch across awaits.
pub fn target_span(target: &str) -> tracing::Span {
    tracing::info_span!("logsift.target", target = %target)
}

/// Emit event: analysis of a target started.
pub fn emit_target_started(index: usize, total: usize, context: &str) {
    info!(event = "target.started", index = index, total = total, context = %context);
}

/// Emit event: a target entry was skipped before fetching.
pub fn emit_target_skipped(index: usize, reason: &str) {
    warn!(event = "target.skipped", index = index, reason = %reason);
}

/// Emit event: fetching or classifying a target failed.
pub fn emit_target_failed(index: usize, error: &dyn std::fmt::Display) {
    warn!(event = "target.failed", index = index, error = %error);
}

/// Emit event: a stage failure pattern pre-empted test analysis.
pub fn emit_stage_failure(description: &str, evidence_line: &str) {
    info!(event = "classify.stage_failure", description = %description, evidence = %evidence_line);
}

/// Emit event: test analysis finished.
pub fn emit_test_summary(total: u64, failures: usize, passed_ids: usize) {
    info!(
        event = "classify.test_summary",
        total = total,
        failures = failures,
        passed_ids = passed_ids,
    );
}

/// Emit event: no summary banner was found (warning level).
pub fn emit_summary_missing() {
    warn!(event = "classify.summary_missing", "No pytest summary lines found");
}

/// Emit event: batch finished.
pub fn emit_batch_finished(classified: usize, skipped: usize, failed: usize) {
    info!(
        event = "batch.finished",
        classified = classified,
        skipped = skipped,
        failed = failed,
    );
}
