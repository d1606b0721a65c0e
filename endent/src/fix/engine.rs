//! Fixed-point correction loop.
//!
//! A single pass can expose misalignments that were hidden behind the text
//! it just rewrote, so the engine re-parses and re-scans the corrected
//! text from scratch after every pass. The loop terminates when a scan
//! finds nothing left to plan; a configurable pass cap guards against
//! non-convergence on pathological input.

use crate::constants::DEFAULT_MAX_PASSES;
use crate::cst::{CstError, CstParser};
use crate::fix::planner;
use crate::fix::rewriter::{Edit, RewriteError, Rewriter};
use crate::rules::end_indentation::EndIndentation;
use crate::rules::Violation;
use crate::text::SourceBuffer;
use crate::utils::get_ignored_lines;
use rustc_hash::FxHashSet;
use serde::Serialize;
use thiserror::Error;

/// Location of one applied correction, as it was before the rewrite.
#[derive(Debug, Clone, Serialize)]
pub struct Correction {
    /// Byte offset of the corrected closing bracket.
    pub offset: usize,
    /// 1-indexed line of the bracket at the time of the pass.
    pub line: usize,
    /// 1-indexed column of the bracket at the time of the pass.
    pub col: usize,
}

/// Error during correction.
#[derive(Debug, Error)]
pub enum FixError {
    /// The loop failed to reach a fixed point within the pass cap.
    #[error("corrections did not converge after {0} passes")]
    NonConvergence(usize),
    /// The corrected text could not be re-parsed.
    #[error(transparent)]
    Parse(#[from] CstError),
    /// A planned replacement could not be applied.
    #[error(transparent)]
    Rewrite(#[from] RewriteError),
}

/// Result of a successful fix run.
#[derive(Debug)]
pub struct FixOutcome {
    /// The corrected text (identical to the input when nothing changed).
    pub text: String,
    /// Applied corrections, concatenated across passes in apply order.
    pub corrections: Vec<Correction>,
}

impl FixOutcome {
    /// Whether any correction was applied.
    #[must_use]
    pub fn changed(&self) -> bool {
        !self.corrections.is_empty()
    }
}

/// Scan→plan→apply driver.
#[derive(Debug, Clone)]
pub struct FixEngine {
    max_passes: usize,
}

impl Default for FixEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl FixEngine {
    /// Create an engine with the default pass cap.
    #[must_use]
    pub fn new() -> Self {
        Self {
            max_passes: DEFAULT_MAX_PASSES,
        }
    }

    /// Create an engine with a custom pass cap.
    #[must_use]
    pub fn with_max_passes(max_passes: usize) -> Self {
        Self {
            max_passes: max_passes.max(1),
        }
    }

    /// The configured pass cap.
    #[must_use]
    pub fn max_passes(&self) -> usize {
        self.max_passes
    }

    /// Correct all fixable closing-bracket misalignments in `source`.
    ///
    /// Violations on suppressed lines are excluded before planning. Each
    /// pass materializes a fresh buffer and a fresh parse; the loop ends
    /// when a pass plans nothing. Unfixable violations (stacked brackets)
    /// are left in place without failing the run.
    ///
    /// # Errors
    /// Returns [`FixError::NonConvergence`] when the pass cap is reached
    /// with corrections still pending, or a parse/rewrite error.
    pub fn fix(&self, source: &str) -> Result<FixOutcome, FixError> {
        let mut parser = CstParser::new()?;
        let mut text = source.to_owned();
        let mut corrections = Vec::new();

        for _ in 0..self.max_passes {
            let tree = parser.parse(&text)?;
            let buffer = SourceBuffer::new(text.as_str());
            let ignored = get_ignored_lines(&text);

            let violations: Vec<Violation> = EndIndentation::scan(&buffer, &tree.root)
                .into_iter()
                .filter(|v| !is_suppressed(v, &buffer, &ignored))
                .collect();

            let plan = planner::plan(&buffer, &violations);
            if plan.is_empty() {
                return Ok(FixOutcome { text, corrections });
            }

            let mut rewriter = Rewriter::new(text.as_str());
            for replacement in &plan {
                if let Some((line, col)) = buffer.location(replacement.end_offset) {
                    corrections.push(Correction {
                        offset: replacement.end_offset,
                        line,
                        col,
                    });
                }
                rewriter.add_edit(Edit::new(
                    replacement.range.start,
                    replacement.range.end,
                    replacement.text.clone(),
                ));
            }
            text = rewriter.apply()?;
        }

        Err(FixError::NonConvergence(self.max_passes))
    }
}

/// Whether a violation sits on a suppressed line.
///
/// Both the literal's opening line and the closing-bracket line honor
/// suppression comments.
pub fn is_suppressed(
    violation: &Violation,
    buffer: &SourceBuffer,
    ignored: &FxHashSet<usize>,
) -> bool {
    if ignored.is_empty() {
        return false;
    }
    let open_line = buffer.line_of_offset(violation.literal_range.start);
    let close_line = buffer.line_of_offset(violation.end_offset);
    open_line.is_some_and(|l| ignored.contains(&l))
        || close_line.is_some_and(|l| ignored.contains(&l))
}
