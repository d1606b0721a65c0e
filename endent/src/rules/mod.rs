//! Rule types shared between detection and correction.

use crate::text::SourceBuffer;
use serde::Serialize;
use std::ops::Range;
use std::path::{Path, PathBuf};

/// Module containing the closing-bracket alignment rule.
pub mod end_indentation;

#[derive(Debug, Clone, Copy, Serialize)]
/// Metadata associated with a rule.
pub struct RuleMetadata {
    /// Unique code/ID of the rule.
    pub id: &'static str,
    /// Category of the rule.
    pub category: &'static str,
}

/// A misaligned closing bracket, located in one specific buffer.
///
/// All ranges index the buffer the violation was scanned from and go stale
/// the moment that buffer is rewritten. Violations are produced fresh per
/// pass, consumed once by the planner, then dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Byte range of the opening line's indentation prefix (line start up
    /// to its first non-whitespace character).
    pub expected_range: Range<usize>,
    /// Byte range of the closing-bracket line's prefix (line start up to
    /// the bracket's column minus one).
    pub actual_range: Range<usize>,
    /// Byte offset of the closing bracket character.
    pub end_offset: usize,
    /// Byte range of the whole literal, used for suppression checks.
    pub literal_range: Range<usize>,
    /// Expected indentation width, in characters.
    pub expected: usize,
    /// Actual indentation width, in characters.
    pub actual: usize,
}

impl Violation {
    /// The human-readable message for this violation.
    #[must_use]
    pub fn message(&self) -> String {
        format!("Expected {}, got {}.", self.expected, self.actual)
    }
}

#[derive(Debug, Clone, Serialize)]
/// A single reportable issue, resolved to a file position.
pub struct Finding {
    /// ID of the rule that triggered the finding.
    pub rule_id: String,
    /// Category of the rule.
    pub category: String,
    /// Severity level (e.g., "warning", "error").
    pub severity: String,
    /// Description of the issue.
    pub message: String,
    /// File where the issue was found.
    pub file: PathBuf,
    /// Line number of the closing bracket.
    pub line: usize,
    /// Column number of the closing bracket.
    pub col: usize,
}

/// Create a `Finding` for a violation, mapping its bracket offset to a
/// line/column position in the scanned buffer.
#[must_use]
pub fn create_finding(
    violation: &Violation,
    metadata: RuleMetadata,
    buffer: &SourceBuffer,
    file: &Path,
) -> Finding {
    let (line, col) = buffer.location(violation.end_offset).unwrap_or((0, 0));
    Finding {
        rule_id: metadata.id.to_owned(),
        category: metadata.category.to_owned(),
        severity: "warning".to_owned(),
        message: violation.message(),
        file: file.to_path_buf(),
        line,
        col,
    }
}
