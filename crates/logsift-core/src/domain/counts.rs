//! Aggregated test counts.

use serde::{Deserialize, Serialize};

/// Per-category test counts summed across every summary banner in a log.
///
/// `total` is always derived from the four categories; a literal total
/// printed by the test framework is never trusted.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SummaryCounts {
    pub total: u64,
    pub passed: u64,
    pub failed: u64,
    pub errors: u64,
    pub skipped: u64,
}

impl SummaryCounts {
    /// Build counts from category totals, deriving `total`.
    pub fn from_categories(passed: u64, failed: u64, errors: u64, skipped: u64) -> Self {
        Self {
            total: passed
                .saturating_add(failed)
                .saturating_add(errors)
                .saturating_add(skipped),
            passed,
            failed,
            errors,
            skipped,
        }
    }

    /// Whether no test of any category was counted.
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}
