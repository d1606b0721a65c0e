use regex::Regex;
use rustc_hash::FxHashSet;
use std::sync::OnceLock;

/// Name of the dedicated configuration file.
pub const CONFIG_FILENAME: &str = ".endent.toml";

/// Name of the Python project file that may carry a `[tool.endent]` table.
pub const PYPROJECT_FILENAME: &str = "pyproject.toml";

/// Default cap on scan→plan→apply passes in the fix engine.
///
/// Each pass strictly shrinks the set of fixable misalignments, so real
/// inputs converge in one or two passes. The cap is a safety valve against
/// pathological structural data.
pub const DEFAULT_MAX_PASSES: usize = 10;

/// Comment markers that suppress findings on a line.
///
/// Supports multiple formats:
/// - `# pragma: no endent` - Legacy format
/// - `# noqa: END001` - Standard Python linter format
pub fn get_suppression_patterns() -> &'static [&'static str] {
    &["# pragma: no endent", "# noqa: END001"]
}

/// Regex for identifying test files.
///
/// # Panics
///
/// Panics if the regex pattern is invalid.
pub fn get_test_file_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    #[allow(clippy::expect_used)]
    RE.get_or_init(|| {
        Regex::new(
            r"(?:^|[/\\])tests?[/\\]|(?:^|[/\\])test_[^/\\]+\.py$|[^/\\]+_test\.py$|conftest\.py$",
        )
        .expect("Invalid test file regex pattern")
    })
}

/// Set of folders to exclude by default.
pub fn get_default_exclude_folders() -> &'static FxHashSet<&'static str> {
    static SET: OnceLock<FxHashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| {
        let mut s = FxHashSet::default();
        s.insert("__pycache__");
        s.insert(".git");
        s.insert(".pytest_cache");
        s.insert(".mypy_cache");
        s.insert(".tox");
        s.insert("htmlcov");
        s.insert(".coverage");
        s.insert("build");
        s.insert("dist");
        s.insert("*.egg-info");
        s.insert("venv");
        s.insert(".venv");
        s
    })
}

// Legacy-style aliases, matching the call sites' upper-case convention.
pub use get_default_exclude_folders as DEFAULT_EXCLUDE_FOLDERS;
pub use get_suppression_patterns as SUPPRESSION_PATTERNS;
pub use get_test_file_re as TEST_FILE_RE;
