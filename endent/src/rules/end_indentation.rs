//! Closing-bracket alignment rule for multi-line collection literals.
//!
//! A list or dictionary literal that opens its elements on a new line must
//! close at the indentation of the line that opened it:
//!
//! ```python
//! x = [
//!     1,
//!     2,
//! ]          # aligned with the line that opened the literal
//! ```
//!
//! The "expected" indentation is the leading whitespace of the opening
//! line, not the bracket's own column, so `x = [` expects the bracket back
//! at column zero. Single-line literals and literals whose bracket shares a
//! line with the last element are never flagged.

use crate::cst::CstNode;
use crate::rules::{RuleMetadata, Violation};
use crate::text::SourceBuffer;

/// Rule metadata for closing-bracket alignment.
pub const METADATA: RuleMetadata = RuleMetadata {
    id: "END001",
    category: "format",
};

/// Scanner for misaligned closing brackets.
pub struct EndIndentation;

impl EndIndentation {
    /// Scan a CST for misaligned closing brackets.
    ///
    /// Children are evaluated before their parent, so the returned sequence
    /// is innermost-first. Nodes with offsets that do not land in the
    /// buffer (malformed structural data) are silently skipped.
    #[must_use]
    pub fn scan(buffer: &SourceBuffer, root: &CstNode) -> Vec<Violation> {
        let mut violations = Vec::new();
        Self::walk(buffer, root, &mut violations);
        violations
    }

    fn walk(buffer: &SourceBuffer, node: &CstNode, out: &mut Vec<Violation>) {
        for child in &node.children {
            Self::walk(buffer, child, out);
        }
        if node.is_collection_literal() {
            if let Some(violation) = Self::check_literal(buffer, node) {
                out.push(violation);
            }
        }
    }

    /// Evaluate one literal node. `None` means "no violation", covering
    /// both well-formed aligned literals and malformed node data.
    fn check_literal(buffer: &SourceBuffer, node: &CstNode) -> Option<Violation> {
        let first = node.elements().next()?;
        let last = node.elements().last()?;

        let (start_line, _) = buffer.location(node.start_byte)?;
        let (first_elem_line, _) = buffer.location(first.start_byte)?;
        if start_line == first_elem_line {
            // Elements begin on the opening line; the literal is compact.
            return None;
        }

        let end_offset = node.end_byte.checked_sub(1)?;
        let (end_line, end_column) = buffer.location(end_offset)?;
        let (last_elem_line, _) = buffer.location(last.start_byte)?;
        if last_elem_line == end_line {
            // Bracket shares a line with the last element.
            return None;
        }

        let opening_range = buffer.line_range(start_line)?;
        let opening_text = buffer.slice(opening_range.clone())?;
        let (expected, expected_bytes) = leading_indentation(opening_text)?;

        let actual = end_column.checked_sub(1)?;
        if expected == actual {
            return None;
        }

        let closing_start = buffer.line_range(end_line)?.start;
        Some(Violation {
            expected_range: opening_range.start..opening_range.start + expected_bytes,
            actual_range: closing_start..end_offset,
            end_offset,
            literal_range: node.start_byte..node.end_byte,
            expected,
            actual,
        })
    }
}

/// Width of a line's leading indentation as (characters, bytes).
///
/// A plain forward scan for the first non-space/tab character. Returns
/// `None` for a line with no content at all, which cannot happen for a
/// line that opens a literal.
fn leading_indentation(line: &str) -> Option<(usize, usize)> {
    for (chars, (bytes, ch)) in line.char_indices().enumerate() {
        if !matches!(ch, ' ' | '\t') {
            if matches!(ch, '\n' | '\r') {
                return None;
            }
            return Some((chars, bytes));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cst::CstParser;

    fn scan(source: &str) -> Vec<Violation> {
        let mut parser = CstParser::new().unwrap();
        let tree = parser.parse(source).unwrap();
        let buffer = SourceBuffer::new(source);
        EndIndentation::scan(&buffer, &tree.root)
    }

    #[test]
    fn test_single_line_literal_is_clean() {
        assert!(scan("x = [1, 2, 3]\n").is_empty());
        assert!(scan("d = {'a': 1}\n").is_empty());
    }

    #[test]
    fn test_empty_literal_is_clean() {
        assert!(scan("x = [\n]\n").is_empty());
    }

    #[test]
    fn test_bracket_on_last_element_line_is_clean() {
        let source = "x = [\n    1,\n    2]\n";
        assert!(scan(source).is_empty());
    }

    #[test]
    fn test_aligned_bracket_is_clean() {
        let source = "x = [\n    1,\n    2\n]\n";
        assert!(scan(source).is_empty());
    }

    #[test]
    fn test_aligned_bracket_in_nested_scope_is_clean() {
        let source = "def f():\n    x = [\n        1,\n    ]\n";
        assert!(scan(source).is_empty());
    }

    #[test]
    fn test_misaligned_bracket_is_flagged() {
        let source = "x = [\n    1,\n    2\n    ]\n";
        let violations = scan(source);
        assert_eq!(violations.len(), 1);

        let v = &violations[0];
        assert_eq!(v.expected, 0);
        assert_eq!(v.actual, 4);
        assert_eq!(v.end_offset, source.rfind(']').unwrap());
        assert_eq!(v.message(), "Expected 0, got 4.");
    }

    #[test]
    fn test_expected_uses_opening_line_indentation() {
        // The literal opens at column 9, but the statement is indented by
        // four spaces; the bracket is expected at four.
        let source = "def f():\n    x = [\n        1,\n        ]\n";
        let violations = scan(source);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].expected, 4);
        assert_eq!(violations[0].actual, 8);
    }

    #[test]
    fn test_dictionary_follows_same_rules() {
        let source = "d = {\n    'a': 1,\n    'b': 2\n  }\n";
        let violations = scan(source);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].expected, 0);
        assert_eq!(violations[0].actual, 2);
    }

    #[test]
    fn test_violation_ranges() {
        let source = "x = [\n    1\n  ]\n";
        let violations = scan(source);
        assert_eq!(violations.len(), 1);

        let v = &violations[0];
        // Opening line starts at byte 0 with no indentation.
        assert_eq!(v.expected_range, 0..0);
        // Closing line prefix is the two spaces before the bracket.
        let closing_start = source.rfind("  ]").unwrap();
        assert_eq!(v.actual_range, closing_start..closing_start + 2);
        assert_eq!(v.literal_range, 4..source.rfind(']').unwrap() + 1);
    }

    #[test]
    fn test_nested_violations_are_innermost_first() {
        let source = "x = [\n    [\n        1,\n      ],\n  ]\n";
        let violations = scan(source);
        assert_eq!(violations.len(), 2);
        // Inner literal first, outer second.
        assert!(violations[0].literal_range.start > violations[1].literal_range.start);
        assert_eq!(violations[0].expected, 4);
        assert_eq!(violations[0].actual, 6);
        assert_eq!(violations[1].expected, 0);
        assert_eq!(violations[1].actual, 2);
    }

    #[test]
    fn test_multibyte_prefix_keeps_columns_accurate() {
        // The multi-byte identifier shifts byte offsets but not columns.
        let source = "übersicht = [\n    1,\n   ]\n";
        let violations = scan(source);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].expected, 0);
        assert_eq!(violations[0].actual, 3);
    }

    #[test]
    fn test_trailing_comment_after_last_element() {
        let source = "x = [\n    1,\n    # tail\n  ]\n";
        let violations = scan(source);
        // The comment is not an element; the bracket still closes on its
        // own line and is still misaligned.
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].actual, 2);
    }
}
