//! Integration tests for log classification against realistic pytest output.

use logsift_core::{
    classify_log, ClassificationResult, FailureRecord, LogClassifier, StageFailureDetector,
    StageFailurePattern, SummaryCounts, TestReport, UNKNOWN_FAILURE,
};

const RERUN_LOG: &str = "\
[Pipeline] sh
+ pytest -v --reruns 1 tests/
============================= test session starts ==============================
tests/test_cart.py::test_add_item_tc-200 PASSED                          [ 25%]
tests/test_checkout.py::test_checkout_tc101 FAILED                       [ 50%]
tests/test_login.py::test_login FAILED                                   [ 75%]
tests/test_visual.py::test_home_page_tc-300 FAILED                       [100%]
=================================== FAILURES ===================================
_____________________________ test_checkout_tc101 ______________________________

    def test_checkout_tc101():
>       assert checkout() == 'ok'
checkout.py:12: AssertionError
12 > assert checkout() == 'ok'
__________________________________ test_login __________________________________
login.py:42: AssertionError
42 > assert resp.status == 200
____________________________ test_home_page_tc-300 _____________________________
Visual differences: https://eyes.applitools.com/app/test-results/00000251?accountId=abc
=========================== short test summary info ============================
FAILED tests/test_checkout.py::test_checkout_tc101 - AssertionError
========== 3 failed, 1 passed in 12.34s ==========
+ pytest -v --last-failed tests/
tests/test_checkout.py::test_checkout_tc101 PASSED                       [ 33%]
tests/test_login.py::test_login FAILED                                   [ 66%]
=================================== FAILURES ===================================
__________________________________ test_login __________________________________
login.py:42: AssertionError
42 > assert resp.status == 200
========== 1 failed, 1 passed, 1 skipped in 3.21s ==========
";

fn report(result: &ClassificationResult) -> &TestReport {
    result.test_report().expect("expected a test summary verdict")
}

/// Test: counts from every banner are summed and the total is derived.
#[test]
fn test_rerun_counts_are_summed() {
    let result = classify_log(RERUN_LOG, &StageFailureDetector::disabled());
    let counts = report(&result).counts;
    assert_eq!(counts.failed, 4);
    assert_eq!(counts.passed, 2);
    assert_eq!(counts.skipped, 1);
    assert_eq!(counts.errors, 0);
    assert_eq!(
        counts.total,
        counts.passed + counts.failed + counts.errors + counts.skipped
    );
}

/// Test: a later PASSED rerun cancels the earlier failure; duplicates collapse.
#[test]
fn test_rerun_suppression_and_dedup() {
    let result = classify_log(RERUN_LOG, &StageFailureDetector::disabled());
    assert_eq!(
        report(&result).failures,
        vec![
            FailureRecord::new("test_login", "assert resp.status == 200"),
            FailureRecord::new(
                "TC-300",
                "https://eyes.applitools.com/app/test-results/00000251?accountId=abc"
            ),
        ]
    );
}

/// Test: a PASSED line before the failure block still suppresses it.
#[test]
fn test_pass_before_failure_still_suppresses() {
    let log = "\
tests/test_checkout.py::test_checkout_tc101 PASSED
__________ test_checkout_tc101 __________
checkout.py:12: AssertionError
========== 1 failed, 1 passed ==========
";
    let result = classify_log(log, &StageFailureDetector::disabled());
    assert!(report(&result).failures.is_empty());
}

/// Test: the end-to-end login example.
#[test]
fn test_login_example() {
    let log = "\
__________ test_login __________
login.py:42: AssertionError
42 > assert resp.status == 200
========== 1 failed ==========
";
    let result = classify_log(log, &StageFailureDetector::disabled());
    assert_eq!(
        result,
        ClassificationResult::TestSummary(TestReport {
            counts: SummaryCounts {
                total: 1,
                passed: 0,
                failed: 1,
                errors: 0,
                skipped: 0,
            },
            failures: vec![FailureRecord::new("test_login", "assert resp.status == 200")],
            summary_banners: 1,
        })
    );
}

/// Test: detector precedence follows list order, not text order.
#[test]
fn test_detector_precedence() {
    let detector = StageFailureDetector::new(vec![
        StageFailurePattern::new("OOM", r"java\.lang\.OutOfMemoryError").expect("pattern"),
        StageFailurePattern::new("Timeout", r"Timeout has been exceeded").expect("pattern"),
    ]);
    let log = format!(
        "Timeout has been exceeded\n{RERUN_LOG}\nException: java.lang.OutOfMemoryError: heap\n"
    );
    match classify_log(&log, &detector) {
        ClassificationResult::StageFailure(stage) => assert_eq!(stage.description, "OOM"),
        other => panic!("expected stage failure, got {other:?}"),
    }
}

/// Test: a stage failure replaces the test report entirely.
#[test]
fn test_stage_failure_has_no_summary() {
    let detector = StageFailureDetector::from_json_str(
        r#"[{"pattern": "Agent .* was marked offline", "description": "Node offline"}]"#,
    )
    .expect("patterns");
    let log = format!("{RERUN_LOG}\nagent linux-42 was marked offline\n");
    let result = LogClassifier::new(detector).classify(&log);
    assert!(result.is_stage_failure());
    assert!(result.test_report().is_none());
}

/// Test: classifying the same log twice yields identical results.
#[test]
fn test_idempotent() {
    let classifier = LogClassifier::new(
        StageFailureDetector::from_json_str(r#"[{"pattern": "no such host", "description": "DNS"}]"#)
            .expect("patterns"),
    );
    let first = classifier.classify(RERUN_LOG);
    let second = classifier.classify(RERUN_LOG);
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).expect("json"),
        serde_json::to_string(&second).expect("json")
    );
}

/// Test: a log with sections but no evidence reports the fallback detail.
#[test]
fn test_unknown_detail() {
    let log = "\
__________ test_flaky __________
E   something went sideways
==========
";
    let result = classify_log(log, &StageFailureDetector::disabled());
    let report = report(&result);
    assert_eq!(report.failures, vec![FailureRecord::new("test_flaky", UNKNOWN_FAILURE)]);
    // A bare `=` run ends the section but is not a summary banner.
    assert_eq!(report.summary_banners, 0);
    assert!(report.counts.is_empty());
}

/// Test: rerun suppression compares normalized ids exactly, so a separator
/// difference (`tc-101` vs `tc101`) keeps the failure.
#[test]
fn test_rerun_with_different_separator_is_not_suppressed() {
    let log = "\
_____________________________ test_checkout_tc-101 _____________________________
checkout.py:9: AssertionError
========== 1 failed in 1.02s ==========
tests/test_checkout.py::test_checkout_tc101 PASSED                       [100%]
========== 1 passed in 0.51s ==========
";
    let result = classify_log(log, &StageFailureDetector::disabled());
    let report = report(&result);
    assert_eq!(
        report.failures,
        vec![FailureRecord::new("TC-101", "Error: AssertionError")]
    );
    assert_eq!(report.counts, SummaryCounts::from_categories(1, 1, 0, 0));
}
