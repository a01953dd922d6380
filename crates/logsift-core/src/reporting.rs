//! Human-readable and JSON rendering of classification results.

use crate::batch::{TargetOutcome, TargetReport};
use crate::domain::{ClassificationResult, StageFailureResult, TestReport};

const WIDTH: usize = 80;

/// Render one verdict with its target context.
pub fn render_classification(result: &ClassificationResult, context: &str) -> String {
    match result {
        ClassificationResult::StageFailure(stage) => render_stage_failure(stage, context),
        ClassificationResult::TestSummary(report) => render_test_report(report, context),
    }
}

/// Render a batch entry, including skipped and failed targets.
pub fn render_target_report(report: &TargetReport) -> String {
    let mut out = format!(
        "--- Analyzing Target {}/{}: {} ---\n",
        report.index, report.total, report.context
    );
    match &report.outcome {
        TargetOutcome::Classified { result } => {
            out.push_str(&render_classification(result, &report.context));
        }
        TargetOutcome::Skipped { reason } => {
            out.push_str(&format!("Skipping invalid target ({reason}).\n"));
        }
        TargetOutcome::Failed { error } => {
            out.push_str(&format!("!!! ERROR processing target: {error}\n\n"));
        }
    }
    out
}

/// Render a batch entry as pretty JSON.
pub fn render_json(report: &TargetReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

fn render_test_report(report: &TestReport, context: &str) -> String {
    let rule = "=".repeat(WIDTH);
    let mut out = String::new();
    out.push('\n');
    out.push_str(&format!("{rule}\nPYTEST ANALYSIS REPORT\nContext: {context}\n{rule}\n"));

    let counts = &report.counts;
    if counts.is_empty() {
        out.push_str(&format!("No pytest tests were found.\n{rule}\n\n"));
        return out;
    }

    out.push_str("\nExecution Summary (Aggregated & Rerun-Adjusted):\n");
    out.push_str(&format!(
        "  - Total Tests Executed: {}\n  - Passed:   {}\n  - Failed:   {}\n  - Errors:   {}\n  - Skipped:  {}\n",
        counts.total, counts.passed, counts.failed, counts.errors, counts.skipped
    ));
    out.push_str(&"-".repeat(WIDTH));
    out.push('\n');

    if report.failures.is_empty() {
        out.push_str("\nResult: All test cases passed.\n");
    } else {
        out.push_str("\nFinal Failure Summary (Unique & Non-Rerun Failures):\n");
        for failure in &report.failures {
            out.push_str(&format!("  - {} : {}\n", failure.test_id, failure.detail));
        }
    }
    out.push_str(&format!("{rule}\n\n"));
    out
}

fn render_stage_failure(stage: &StageFailureResult, context: &str) -> String {
    let rule = "!".repeat(WIDTH);
    format!(
        "\n{rule}\nSTAGE FAILURE REPORT\nContext: {context}\n{rule}\n\n\
         Reason: {}\nLog Evidence: \"{}\"\n\n\
         Note: Pytest analysis was skipped because a critical stage error was detected.\n{rule}\n\n",
        stage.description, stage.evidence_line
    )
}
