//! Correction engine.
//!
//! Detection produces violations; this module turns them into text. The
//! [`planner`] resolves each violation to a concrete replacement, the
//! [`rewriter`] applies replacements back-to-front so earlier byte offsets
//! stay valid, and the [`engine`] repeats scan→plan→apply on fresh parses
//! until the source reaches a fixed point.

pub mod engine;
pub mod planner;
pub mod rewriter;

pub use engine::{Correction, FixEngine, FixError, FixOutcome};
pub use planner::Replacement;
pub use rewriter::{Edit, RewriteError, Rewriter};
