//! Test identity normalization.
//!
//! A test is correlated across reruns by its `tc-<digits>` token when it has
//! one, and by its raw name otherwise.

use regex::Regex;
use std::sync::LazyLock;

static TEST_CASE_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)tc[-_]?\d+").expect("test case token regex"));

/// Canonicalize a raw test name.
///
/// Returns the first `tc[-_]<digits>` token upper-cased, or `raw` unchanged.
pub fn normalize_test_id(raw: &str) -> String {
    match TEST_CASE_TOKEN.find(raw) {
        Some(token) => token.as_str().to_uppercase(),
        None => raw.to_string(),
    }
}
