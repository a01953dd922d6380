//! Stage-level failure detection.
//!
//! Patterns are evaluated strictly in file order and the first pattern that
//! matches anywhere in the log wins. Operators rank signatures by specificity
//! through that order, so it must never be replaced by a set or a map.

use regex::{Regex, RegexBuilder};
use serde_json::Value;
use std::path::Path;
use tracing::{info, warn};

use crate::domain::StageFailureResult;
use crate::error::PatternLoadError;

/// A named infrastructure failure signature.
#[derive(Debug, Clone)]
pub struct StageFailurePattern {
    pub description: String,
    pub pattern: Regex,
}

impl StageFailurePattern {
    /// Compile `pattern` case-insensitively.
    ///
    /// Patterns use the `regex` crate syntax: look-around and backreferences
    /// are rejected with an error.
    pub fn new(
        description: impl Into<String>,
        pattern: &str,
    ) -> std::result::Result<Self, regex::Error> {
        let pattern = RegexBuilder::new(pattern).case_insensitive(true).build()?;
        Ok(Self {
            description: description.into(),
            pattern,
        })
    }
}

/// Priority-ordered stage failure detector.
#[derive(Debug, Clone, Default)]
pub struct StageFailureDetector {
    patterns: Vec<StageFailurePattern>,
}

impl StageFailureDetector {
    pub fn new(patterns: Vec<StageFailurePattern>) -> Self {
        Self { patterns }
    }

    /// A detector that never reports a stage failure.
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Load patterns from a JSON file.
    ///
    /// Never fails. Any problem with the file disables detection for the
    /// whole run rather than loading a partial priority list.
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(detector) => {
                info!(path = %path.display(), patterns = detector.len(), "Loaded stage failure patterns");
                detector
            }
            Err(PatternLoadError::NotFound) => {
                warn!(
                    path = %path.display(),
                    "Error patterns file not found; stage failure detection is disabled"
                );
                Self::disabled()
            }
            Err(e) => {
                warn!(
                    path = %path.display(),
                    error = %e,
                    "Error parsing patterns file; stage failure detection is disabled"
                );
                Self::disabled()
            }
        }
    }

    /// Load patterns from a JSON file, surfacing the failure reason.
    pub fn try_load(path: &Path) -> std::result::Result<Self, PatternLoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => PatternLoadError::NotFound,
            _ => PatternLoadError::Io(e),
        })?;
        Self::from_json_str(&content)
    }

    /// Parse a JSON list of `{"pattern": ..., "description": ...}` entries.
    pub fn from_json_str(json: &str) -> std::result::Result<Self, PatternLoadError> {
        let document: Value = serde_json::from_str(json)?;
        let entries = document.as_array().ok_or(PatternLoadError::NotAList)?;

        let mut patterns = Vec::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            let pattern = string_field(entry, index, "pattern")?;
            let description = string_field(entry, index, "description")?;
            let compiled = StageFailurePattern::new(description, pattern)
                .map_err(|source| PatternLoadError::InvalidRegex { index, source })?;
            patterns.push(compiled);
        }

        Ok(Self::new(patterns))
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Return the first pattern, in list order, that matches anywhere in `log`.
    pub fn check(&self, log: &str) -> Option<StageFailureResult> {
        self.patterns.iter().find_map(|p| {
            p.pattern.find(log).map(|m| StageFailureResult {
                description: p.description.clone(),
                evidence_line: evidence_line(m.as_str()),
            })
        })
    }
}

fn string_field<'a>(
    entry: &'a Value,
    index: usize,
    field: &'static str,
) -> std::result::Result<&'a str, PatternLoadError> {
    entry
        .get(field)
        .and_then(Value::as_str)
        .ok_or(PatternLoadError::MissingField { index, field })
}

fn evidence_line(matched: &str) -> String {
    matched
        .trim()
        .split('\n')
        .next()
        .unwrap_or_default()
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn detector(patterns: &[(&str, &str)]) -> StageFailureDetector {
        StageFailureDetector::new(
            patterns
                .iter()
                .map(|(desc, pat)| StageFailurePattern::new(*desc, pat).expect("valid pattern"))
                .collect(),
        )
    }

    #[test]
    fn test_list_order_wins_over_text_order() {
        let detector = detector(&[("OOM", r"out of memory"), ("Timeout", r"timed out")]);
        let log = "step 1 timed out\n...\nkilled: out of memory\n";
        let result = detector.check(log).expect("stage failure");
        assert_eq!(result.description, "OOM");
        assert_eq!(result.evidence_line, "out of memory");
    }

    #[test]
    fn test_case_insensitive() {
        let detector = detector(&[("Node offline", r"agent .* is offline")]);
        let result = detector
            .check("ERROR: Agent build-7 IS OFFLINE")
            .expect("stage failure");
        assert_eq!(result.evidence_line, "Agent build-7 IS OFFLINE");
    }

    #[test]
    fn test_evidence_is_first_line_of_match() {
        let detector = detector(&[("Checkout", r"fatal: could not read[\s\S]*?exit code \d+")]);
        let log = "  fatal: could not read Username   \n  for 'https://git'\nexit code 128\n";
        let result = detector.check(log).expect("stage failure");
        assert_eq!(result.evidence_line, "fatal: could not read Username");
    }

    #[test]
    fn test_no_match_and_empty_list() {
        let detector = detector(&[("OOM", r"out of memory")]);
        assert!(detector.check("all good").is_none());
        assert!(StageFailureDetector::disabled().check("out of memory").is_none());
        assert!(StageFailureDetector::disabled().is_empty());
    }

    #[test]
    fn test_from_json_preserves_order() {
        let json = r#"[
            {"pattern": "timed out", "description": "Timeout"},
            {"pattern": "out of memory", "description": "OOM"}
        ]"#;
        let detector = StageFailureDetector::from_json_str(json).expect("parse");
        assert_eq!(detector.len(), 2);
        let result = detector.check("out of memory, then timed out").expect("match");
        assert_eq!(result.description, "Timeout");
    }

    #[test]
    fn test_from_json_rejects_malformed_entries() {
        assert!(matches!(
            StageFailureDetector::from_json_str(r#"{"pattern": "x"}"#),
            Err(PatternLoadError::NotAList)
        ));
        assert!(matches!(
            StageFailureDetector::from_json_str(r#"[{"pattern": "x"}]"#),
            Err(PatternLoadError::MissingField { index: 0, field: "description" })
        ));
        assert!(matches!(
            StageFailureDetector::from_json_str(
                r#"[{"pattern": "ok", "description": "a"}, {"pattern": "(", "description": "b"}]"#
            ),
            Err(PatternLoadError::InvalidRegex { index: 1, .. })
        ));
        assert!(matches!(
            StageFailureDetector::from_json_str("not json"),
            Err(PatternLoadError::Json(_))
        ));
    }

    #[test]
    fn test_look_around_is_rejected_and_disables_list() {
        let json = r#"[
            {"pattern": "out of memory", "description": "OOM"},
            {"pattern": "(?<!soft )lockup", "description": "Kernel lockup"}
        ]"#;
        assert!(matches!(
            StageFailureDetector::from_json_str(json),
            Err(PatternLoadError::InvalidRegex { index: 1, .. })
        ));

        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        write!(file, "{json}").expect("write");
        let detector = StageFailureDetector::load(file.path());
        assert!(detector.check("killed: out of memory").is_none());
    }

    #[test]
    fn test_load_missing_file_disables() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("error_patterns.json");
        assert!(matches!(
            StageFailureDetector::try_load(&path),
            Err(PatternLoadError::NotFound)
        ));
        assert!(StageFailureDetector::load(&path).is_empty());
    }

    #[test]
    fn test_load_malformed_file_disables_whole_list() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        write!(
            file,
            r#"[{{"pattern": "ok", "description": "a"}}, {{"description": "no pattern"}}]"#
        )
        .expect("write");
        assert!(StageFailureDetector::load(file.path()).is_empty());
    }

    #[test]
    fn test_load_valid_file() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        write!(file, r#"[{{"pattern": "no space left on device", "description": "Disk full"}}]"#)
            .expect("write");
        let detector = StageFailureDetector::load(file.path());
        assert_eq!(detector.len(), 1);
        assert_eq!(
            detector
                .check("write failed: No space left on device")
                .map(|r| r.description),
            Some("Disk full".to_string())
        );
    }
}
