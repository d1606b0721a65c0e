//! Immutable source buffer with a derived line index.
//!
//! The CST parser works with byte offsets, but reports and corrections need
//! line/column positions. The buffer owns the text of one correction pass
//! and maps offsets to 1-indexed (line, column) pairs, where columns count
//! characters rather than bytes so that non-ASCII source reports correctly.

use std::ops::Range;

/// An immutable text buffer plus the byte offset of every line start.
///
/// Rebuilt from scratch whenever the text changes; each fix pass operates on
/// a fresh buffer, so positions derived from one buffer are never applied to
/// another.
#[derive(Debug, Clone)]
pub struct SourceBuffer {
    text: String,
    /// Stores the byte index of the start of each line.
    line_starts: Vec<usize>,
}

impl SourceBuffer {
    /// Creates a new buffer by scanning the source for newlines.
    /// Uses byte iteration since '\n' is always a single byte in UTF-8.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let mut line_starts = vec![0];
        for (i, byte) in text.as_bytes().iter().enumerate() {
            if *byte == b'\n' {
                line_starts.push(i + 1);
            }
        }
        Self { text, line_starts }
    }

    /// The underlying text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length of the text in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Whether the buffer is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Number of lines (a trailing newline opens a final empty line).
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Converts a byte offset to a 1-indexed line number.
    ///
    /// Returns `None` when the offset lies past the end of the text.
    #[must_use]
    pub fn line_of_offset(&self, offset: usize) -> Option<usize> {
        if offset > self.text.len() {
            return None;
        }
        // Binary search to find which line range the offset falls into.
        match self.line_starts.binary_search(&offset) {
            Ok(line) => Some(line + 1),
            Err(line) => Some(line),
        }
    }

    /// Converts a byte offset to a 1-indexed (line, column) pair.
    ///
    /// The column counts characters from the line start, so multi-byte
    /// text yields visual positions. Returns `None` for offsets past the
    /// end of the text or not on a character boundary.
    #[must_use]
    pub fn location(&self, offset: usize) -> Option<(usize, usize)> {
        let line = self.line_of_offset(offset)?;
        let start = *self.line_starts.get(line - 1)?;
        let prefix = self.text.get(start..offset)?;
        Some((line, prefix.chars().count() + 1))
    }

    /// Byte range of a 1-indexed line, including its trailing newline.
    #[must_use]
    pub fn line_range(&self, line: usize) -> Option<Range<usize>> {
        let start = *self.line_starts.get(line.checked_sub(1)?)?;
        let end = self
            .line_starts
            .get(line)
            .copied()
            .unwrap_or(self.text.len());
        Some(start..end)
    }

    /// Slice of the text by byte range.
    ///
    /// Returns `None` when the range is out of bounds or splits a character.
    #[must_use]
    pub fn slice(&self, range: Range<usize>) -> Option<&str> {
        self.text.get(range)
    }
}
