//! Replacement planning with chained-range resolution.
//!
//! Each violation is corrected by replacing its `actual_range` with the
//! text of an expected range. Naively that expected text can itself be a
//! range another violation is about to rewrite: when a literal closes at
//! the start of the line on which a sibling literal opens (`] + [`), the
//! sibling's expected range *is* the first literal's actual range. The
//! planner follows such chains to the final, fully-resolved range before
//! slicing any text.

use crate::rules::Violation;
use crate::text::SourceBuffer;
use rustc_hash::{FxHashMap, FxHashSet};
use std::ops::Range;

/// One planned text replacement, carrying the violation's reporting anchor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    /// Byte range to replace (the violation's `actual_range`).
    pub range: Range<usize>,
    /// Resolved replacement text.
    pub text: String,
    /// Byte offset of the closing bracket being corrected.
    pub end_offset: usize,
}

/// Build an ordered, non-conflicting replacement plan for one pass.
///
/// Replacements are emitted in reverse document order (latest byte offset
/// first) so that applying them front-to-back never shifts a pending
/// offset. A replacement is dropped when:
///
/// - its range overlaps one already planned in this pass,
/// - its range contains non-whitespace text (stacked closing brackets);
///   replacing it would destroy code, so the violation is left for the
///   report instead, or
/// - its resolved text equals the text already in place (a chained
///   violation whose fix is subsumed by the violation it chains to).
///
/// Dropped violations that remain fixable are picked up by the next
/// scan→plan→apply pass.
#[must_use]
pub fn plan(buffer: &SourceBuffer, violations: &[Violation]) -> Vec<Replacement> {
    let by_actual: FxHashMap<(usize, usize), usize> = violations
        .iter()
        .enumerate()
        .map(|(i, v)| ((v.actual_range.start, v.actual_range.end), i))
        .collect();

    let mut order: Vec<usize> = (0..violations.len()).collect();
    // Reverse document order. The scan emits innermost literals first, so
    // the stable sort keeps an inner bracket ahead of an outer bracket
    // that closes at the same offset.
    order.sort_by(|&a, &b| {
        violations[b]
            .actual_range
            .start
            .cmp(&violations[a].actual_range.start)
    });

    let mut replacements: Vec<Replacement> = Vec::with_capacity(violations.len());
    let mut planned_min_start = buffer.len() + 1;

    for idx in order {
        let violation = &violations[idx];
        if violation.actual_range.end > planned_min_start {
            // Overlaps a replacement already planned this pass.
            continue;
        }

        let Some(actual_text) = buffer.slice(violation.actual_range.clone()) else {
            continue;
        };
        if !actual_text.chars().all(|c| matches!(c, ' ' | '\t')) {
            continue;
        }

        let resolved = resolve_expected(violations, &by_actual, idx);
        let Some(text) = buffer.slice(resolved) else {
            continue;
        };
        if text == actual_text {
            // Chain resolution landed on the text already in place; with
            // nothing to rewrite, every applied pass must shrink the
            // violation set, which is what bounds the fix loop.
            continue;
        }

        planned_min_start = violation.actual_range.start;
        replacements.push(Replacement {
            range: violation.actual_range.clone(),
            text: text.to_owned(),
            end_offset: violation.end_offset,
        });
    }

    replacements
}

/// Follow the expected→actual chain for a violation until it bottoms out.
///
/// The chain is finite by construction (each hop references a distinct
/// range), but the visited set keeps termination independent of that
/// argument should the structural data ever produce a cycle.
fn resolve_expected(
    violations: &[Violation],
    by_actual: &FxHashMap<(usize, usize), usize>,
    start: usize,
) -> Range<usize> {
    let mut visited = FxHashSet::default();
    visited.insert(start);

    let mut current = start;
    loop {
        let expected = &violations[current].expected_range;
        match by_actual.get(&(expected.start, expected.end)) {
            Some(&next) if visited.insert(next) => current = next,
            _ => return expected.clone(),
        }
    }
}
