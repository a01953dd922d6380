//! Summary banner aggregation.
//!
//! Reruns print one summary banner per test session, so counts from every
//! banner are summed rather than overwritten.

use regex::Regex;
use std::sync::LazyLock;

use crate::domain::SummaryCounts;

static BANNER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"={10,}\s(.*?)\s={10,}").expect("banner regex"));
static FAILED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s+failed").expect("failed count regex"));
static PASSED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s+passed").expect("passed count regex"));
static ERRORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s+error").expect("error count regex"));
static SKIPPED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s+skipped").expect("skipped count regex"));

/// Result of scanning a log for summary banners.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SummaryScan {
    pub counts: SummaryCounts,

    /// Number of banners found.
    pub banners: usize,
}

/// Sum per-category counts over every summary banner in `log`.
pub fn aggregate_summary(log: &str) -> SummaryScan {
    let (mut passed, mut failed, mut errors, mut skipped) = (0u64, 0u64, 0u64, 0u64);
    let mut banners = 0;

    for caps in BANNER.captures_iter(log) {
        banners += 1;
        let text = caps.get(1).map_or("", |m| m.as_str());

        failed = failed.saturating_add(first_count(&FAILED, text));
        passed = passed.saturating_add(first_count(&PASSED, text));
        errors = errors.saturating_add(first_count(&ERRORS, text));
        skipped = skipped.saturating_add(first_count(&SKIPPED, text));
    }

    SummaryScan {
        counts: SummaryCounts::from_categories(passed, failed, errors, skipped),
        banners,
    }
}

fn first_count(re: &Regex, text: &str) -> u64 {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}
