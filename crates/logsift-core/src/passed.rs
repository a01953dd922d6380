//! Passed-test extraction.
//!
//! Builds the set of tests that passed anywhere in a log. Membership is what
//! cancels a recorded failure on rerun, so line order does not matter.

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

use crate::test_id::normalize_test_id;

static PASSED_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:.*\s)?(\S+\.\w+::\S+)\s+PASSED").expect("passed line regex")
});

/// Collect normalized identifiers of every `<module>::<test> PASSED` line.
pub fn extract_passed_ids(log: &str) -> BTreeSet<String> {
    log.lines()
        .filter_map(|line| PASSED_LINE.captures(line))
        .filter_map(|caps| caps.get(1))
        .map(|unit| normalize_test_id(unit.as_str()))
        .collect()
}
