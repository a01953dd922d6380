//! Failure section extraction with rerun suppression.
//!
//! A failure section starts at a `_____ test_name _____` header and runs until
//! the next header or the next `==========` banner. Each section yields at most
//! one [`FailureRecord`], unless the same test passed somewhere in the log.

use regex::Regex;
use std::collections::{BTreeSet, HashSet};
use std::sync::LazyLock;
use tracing::debug;

use crate::domain::FailureRecord;
use crate::test_id::normalize_test_id;

/// Detail used when a section carries no recognizable evidence.
pub const UNKNOWN_FAILURE: &str = "Could not determine failure.";

static SECTION_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_{5,}\s+(test_\S+)\s+_{5,}").expect("section header regex"));
static SECTION_END: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"_{5,}\s+test_\S+\s+_{5,}|={10,}").expect("section end regex")
});
static VISUAL_EVIDENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"https?://\S+\.applitools\.com\S+").expect("visual evidence regex")
});
static ERROR_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*(\S+\.\w+):(\d+):\s+(.*Error.*)$").expect("error line regex")
});

/// A failure section attributed to a test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FailureSection<'a> {
    /// Raw test name from the header.
    pub test_name: &'a str,

    /// Text between the header and the section terminator.
    pub body: &'a str,
}

/// Split `log` into failure sections.
///
/// A header with no terminator after it does not open a section.
pub fn failure_sections(log: &str) -> Vec<FailureSection<'_>> {
    let mut sections = Vec::new();

    for caps in SECTION_HEADER.captures_iter(log) {
        let (Some(header), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let Some(end) = SECTION_END.find_at(log, header.end()) else {
            break;
        };
        sections.push(FailureSection {
            test_name: name.as_str(),
            body: &log[header.end()..end.start()],
        });
    }

    sections
}

/// Pick the most informative failure detail from a section body.
///
/// Priority: visual-review evidence URL, then the source line under the
/// `<line> >` cursor for the first `file:line: ...Error...` line, then the
/// error text itself, then [`UNKNOWN_FAILURE`].
pub fn failure_detail(body: &str) -> String {
    if let Some(url) = VISUAL_EVIDENCE.find(body) {
        return url.as_str().to_string();
    }

    let Some(caps) = ERROR_LINE.captures(body) else {
        return UNKNOWN_FAILURE.to_string();
    };
    let line_number = caps.get(2).map_or("", |m| m.as_str());
    let error_text = caps.get(3).map_or("", |m| m.as_str());

    cursor_line(body, line_number)
        .unwrap_or_else(|| format!("Error: {}", error_text.trim_end_matches('\r')))
}

fn cursor_line(body: &str, line_number: &str) -> Option<String> {
    let pattern = format!(r"(?m)^{}\s+>\s+(.*)$", regex::escape(line_number));
    let re = Regex::new(&pattern).ok()?;
    re.captures(body)
        .and_then(|caps| caps.get(1))
        .map(|code| code.as_str().trim().to_string())
}

/// Extract unique, non-rerun failures from `log`.
///
/// Sections whose normalized test id is in `passed` are dropped wherever the
/// PASSED line appears. Remaining records keep first-seen order.
pub fn extract_failures(log: &str, passed: &BTreeSet<String>) -> Vec<FailureRecord> {
    let mut seen = HashSet::new();
    let mut failures = Vec::new();

    for section in failure_sections(log) {
        let test_id = normalize_test_id(section.test_name);
        if passed.contains(&test_id) {
            debug!(test_id = %test_id, "Ignoring failure cancelled by a passing rerun");
            continue;
        }

        let record = FailureRecord::new(test_id, failure_detail(section.body));
        if seen.insert(record.clone()) {
            failures.push(record);
        }
    }

    failures
}
