//! Byte-range safe text rewriter.
//!
//! Applies indentation replacements using byte ranges, preserving all
//! surrounding formatting and refusing overlapping or out-of-bounds edits.
//!
//! # Usage
//!
//! ```
//! use endent::fix::{Edit, Rewriter};
//!
//! let mut rewriter = Rewriter::new("  ]\n");
//! rewriter.add_edit(Edit::new(0, 2, ""));
//! assert_eq!(rewriter.apply().expect("should apply"), "]\n");
//! ```

use thiserror::Error;

/// A single edit operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    /// Start byte offset (inclusive).
    pub start_byte: usize,
    /// End byte offset (exclusive).
    pub end_byte: usize,
    /// Replacement content.
    pub replacement: String,
}

impl Edit {
    /// Create a new edit.
    #[must_use]
    pub fn new(start_byte: usize, end_byte: usize, replacement: impl Into<String>) -> Self {
        Self {
            start_byte,
            end_byte,
            replacement: replacement.into(),
        }
    }

    /// Check if this edit overlaps with another.
    #[must_use]
    pub const fn overlaps(&self, other: &Self) -> bool {
        self.start_byte < other.end_byte && other.start_byte < self.end_byte
    }
}

/// Error during rewriting.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RewriteError {
    /// Two or more edits have overlapping ranges.
    #[error("Overlapping edits at indices {edit_a} and {edit_b}")]
    OverlappingEdits {
        /// Index of first overlapping edit.
        edit_a: usize,
        /// Index of second overlapping edit.
        edit_b: usize,
    },
    /// Edit range is out of bounds.
    #[error("Edit {edit_index} out of bounds: end_byte {end_byte} > source length {source_len}")]
    OutOfBounds {
        /// Index of the bad edit.
        edit_index: usize,
        /// End byte of the edit.
        end_byte: usize,
        /// Length of the source.
        source_len: usize,
    },
    /// Edit range splits a multi-byte character.
    #[error("Edit {edit_index} does not fall on character boundaries")]
    NotCharBoundary {
        /// Index of the bad edit.
        edit_index: usize,
    },
}

/// Safe text rewriter using byte ranges.
///
/// Edits are applied in reverse order by start position so that applying
/// one edit never invalidates the byte offsets of the ones still pending.
#[derive(Debug, Clone)]
pub struct Rewriter {
    /// Original source text.
    source: String,
    /// Pending edits.
    edits: Vec<Edit>,
}

impl Rewriter {
    /// Create a new rewriter for the given source.
    #[must_use]
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            edits: Vec::new(),
        }
    }

    /// Add an edit to the pending list.
    pub fn add_edit(&mut self, edit: Edit) {
        self.edits.push(edit);
    }

    /// Add multiple edits.
    pub fn add_edits(&mut self, edits: impl IntoIterator<Item = Edit>) {
        self.edits.extend(edits);
    }

    /// Get the number of pending edits.
    #[must_use]
    pub fn edit_count(&self) -> usize {
        self.edits.len()
    }

    /// Check if there are any pending edits.
    #[must_use]
    pub fn has_edits(&self) -> bool {
        !self.edits.is_empty()
    }

    /// Validate edits without applying them.
    ///
    /// # Errors
    /// Returns error if edits overlap, are out of bounds, or split a
    /// multi-byte character.
    pub fn validate(&self) -> Result<(), RewriteError> {
        for (i, edit) in self.edits.iter().enumerate() {
            if edit.end_byte > self.source.len() {
                return Err(RewriteError::OutOfBounds {
                    edit_index: i,
                    end_byte: edit.end_byte,
                    source_len: self.source.len(),
                });
            }
            if !self.source.is_char_boundary(edit.start_byte)
                || !self.source.is_char_boundary(edit.end_byte)
            {
                return Err(RewriteError::NotCharBoundary { edit_index: i });
            }
        }

        for i in 0..self.edits.len() {
            for j in (i + 1)..self.edits.len() {
                if self.edits[i].overlaps(&self.edits[j]) {
                    return Err(RewriteError::OverlappingEdits {
                        edit_a: i,
                        edit_b: j,
                    });
                }
            }
        }

        Ok(())
    }

    /// Apply all edits and return the modified source.
    ///
    /// # Errors
    /// Returns error if edits overlap or are out of bounds.
    pub fn apply(self) -> Result<String, RewriteError> {
        self.validate()?;

        let mut result = self.source;
        let mut sorted_edits = self.edits;

        // Sort by start position descending (apply from end to start).
        sorted_edits.sort_by(|a, b| b.start_byte.cmp(&a.start_byte));

        for edit in sorted_edits {
            result.replace_range(edit.start_byte..edit.end_byte, &edit.replacement);
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_replacement() {
        let mut rewriter = Rewriter::new("    ]\n");
        rewriter.add_edit(Edit::new(0, 4, "  "));

        let result = rewriter.apply().expect("should apply");
        assert_eq!(result, "  ]\n");
    }

    #[test]
    fn test_multiple_non_overlapping_edits() {
        let source = "aaa bbb ccc";
        let mut rewriter = Rewriter::new(source);
        rewriter.add_edit(Edit::new(0, 3, "AAA"));
        rewriter.add_edit(Edit::new(8, 11, "CCC"));

        let result = rewriter.apply().expect("should apply");
        assert_eq!(result, "AAA bbb CCC");
    }

    #[test]
    fn test_earlier_offsets_stay_valid() {
        // Two indentation edits on separate lines; the later edit shrinks
        // the text but the earlier one still lands correctly.
        let source = "x = [\n    1,\n   ]\ny = [\n    2,\n  ]\n";
        let first = source.find("   ]").unwrap();
        let second = source.rfind("  ]").unwrap();

        let mut rewriter = Rewriter::new(source);
        rewriter.add_edits([
            Edit::new(first, first + 3, ""),
            Edit::new(second, second + 2, ""),
        ]);

        let result = rewriter.apply().expect("should apply");
        assert_eq!(result, "x = [\n    1,\n]\ny = [\n    2,\n]\n");
    }

    #[test]
    fn test_overlapping_edits_error() {
        let mut rewriter = Rewriter::new("hello world");
        rewriter.add_edit(Edit::new(0, 8, "hi"));
        rewriter.add_edit(Edit::new(5, 10, "there"));

        let result = rewriter.apply();
        assert!(matches!(result, Err(RewriteError::OverlappingEdits { .. })));
    }

    #[test]
    fn test_out_of_bounds_error() {
        let mut rewriter = Rewriter::new("short");
        rewriter.add_edit(Edit::new(0, 100, "long"));

        let result = rewriter.apply();
        assert!(matches!(result, Err(RewriteError::OutOfBounds { .. })));
    }

    #[test]
    fn test_char_boundary_error() {
        // Offset 1 falls inside the two-byte 'é'.
        let mut rewriter = Rewriter::new("é]");
        rewriter.add_edit(Edit::new(1, 2, ""));

        let result = rewriter.apply();
        assert!(matches!(result, Err(RewriteError::NotCharBoundary { .. })));
    }

    #[test]
    fn test_empty_edits() {
        let source = "hello world";
        let rewriter = Rewriter::new(source);
        let result = rewriter.apply().expect("should apply");
        assert_eq!(result, source);
    }

    #[test]
    fn test_adjacent_non_overlapping_edits() {
        let mut rewriter = Rewriter::new("abcdef");
        rewriter.add_edit(Edit::new(0, 3, "XXX"));
        rewriter.add_edit(Edit::new(3, 6, "YYY"));

        let result = rewriter.apply().expect("should apply");
        assert_eq!(result, "XXXYYY");
    }

    #[test]
    fn test_insertion_via_empty_range() {
        // Widening an indentation is a replacement of an empty range.
        let mut rewriter = Rewriter::new("]\n");
        rewriter.add_edit(Edit::new(0, 0, "    "));

        let result = rewriter.apply().expect("should apply");
        assert_eq!(result, "    ]\n");
    }

    #[test]
    fn test_rewriter_edit_count() {
        let mut rewriter = Rewriter::new("test");
        assert!(!rewriter.has_edits());
        assert_eq!(rewriter.edit_count(), 0);

        rewriter.add_edit(Edit::new(0, 1, "x"));
        rewriter.add_edit(Edit::new(2, 3, "y"));
        assert!(rewriter.has_edits());
        assert_eq!(rewriter.edit_count(), 2);
    }
}
