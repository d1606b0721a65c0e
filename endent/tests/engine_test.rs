//! End-to-end correction tests for the fix engine.

use endent::fix::{FixEngine, FixOutcome};

fn fix(source: &str) -> FixOutcome {
    FixEngine::new().fix(source).expect("fix should succeed")
}

#[test]
fn test_overindented_bracket_moves_to_column_zero() {
    // Three leading spaces before the bracket, none before the statement.
    let outcome = fix("x = [\n   1,\n   2\n   ]\n");
    assert_eq!(outcome.text, "x = [\n   1,\n   2\n]\n");
    assert_eq!(outcome.corrections.len(), 1);
}

#[test]
fn test_detection_reports_before_correction() {
    let source = "x = [\n   1,\n   2\n   ]";
    let outcome = fix(source);
    let correction = &outcome.corrections[0];
    assert_eq!(correction.offset, source.rfind(']').unwrap());
    assert_eq!(correction.line, 4);
    assert_eq!(correction.col, 4);
}

#[test]
fn test_correction_is_idempotent() {
    let once = fix("routes = {\n    'a': 1,\n        }\n");
    let twice = fix(&once.text);
    assert_eq!(twice.text, once.text);
    assert!(twice.corrections.is_empty());
}

#[test]
fn test_clean_input_round_trips_unchanged() {
    for source in [
        "x = [1, 2, 3]\n",
        "x = [\n   1,\n   2]\n",
        "x = [\n   1,\n   2\n]\n",
        "def f():\n    return {\n        'a': 1,\n    }\n",
    ] {
        let outcome = fix(source);
        assert_eq!(outcome.text, source);
        assert!(!outcome.changed());
    }
}

#[test]
fn test_independent_siblings_fixed_in_one_run() {
    let source = "a = [\n    1,\n  ]\nb = [\n    2,\n      ]\n";
    let outcome = fix(source);
    assert_eq!(outcome.text, "a = [\n    1,\n]\nb = [\n    2,\n]\n");
    assert_eq!(outcome.corrections.len(), 2);
}

#[test]
fn test_chained_siblings_joined_by_operator() {
    // The first literal closes at the head of the line that opens the
    // second; its rewrite must not leak stale indentation into the
    // second literal's correction.
    let source = "value = [\n    1,\n  ] + [\n    2,\n]\n";
    let outcome = fix(source);
    assert_eq!(outcome.text, "value = [\n    1,\n] + [\n    2,\n]\n");
}

#[test]
fn test_chained_siblings_with_misindented_tail() {
    // Both literals are wrong and the second's expected indentation is
    // the text the first one's fix rewrites; both must land at column 0.
    let source = "value = [\n    1,\n  ] + [\n    2,\n      ]\n";
    let outcome = fix(source);
    assert_eq!(outcome.text, "value = [\n    1,\n] + [\n    2,\n]\n");
}

#[test]
fn test_nested_mismatched_inner_and_outer() {
    let source = "grid = [\n    [\n        1,\n            ],\n        ]\n";
    let outcome = fix(source);
    assert_eq!(outcome.text, "grid = [\n    [\n        1,\n    ],\n]\n");
    assert_eq!(outcome.corrections.len(), 2);
}

#[test]
fn test_dictionary_of_lists() {
    let source = "cfg = {\n    'xs': [\n        1,\n          ],\n          }\n";
    let outcome = fix(source);
    assert_eq!(outcome.text, "cfg = {\n    'xs': [\n        1,\n    ],\n}\n");
}

#[test]
fn test_widening_correction_copies_opening_indentation() {
    let source = "class C:\n    def f(self):\n        return [\n            1,\n]\n";
    let outcome = fix(source);
    assert_eq!(
        outcome.text,
        "class C:\n    def f(self):\n        return [\n            1,\n        ]\n"
    );
}

#[test]
fn test_corrections_preserve_surrounding_code() {
    let source = "import os\n\nx = [\n    1,  # keep me\n  ]\n\nprint(os.name)\n";
    let outcome = fix(source);
    assert_eq!(
        outcome.text,
        "import os\n\nx = [\n    1,  # keep me\n]\n\nprint(os.name)\n"
    );
}

#[test]
fn test_multibyte_source_stays_intact() {
    let source = "# naïve café\nwörter = [\n    'straße',\n   ]\n";
    let outcome = fix(source);
    assert_eq!(outcome.text, "# naïve café\nwörter = [\n    'straße',\n]\n");
}

#[test]
fn test_fix_run_then_scan_is_clean() {
    let source = "a = {\n    'k': [\n        1,\n          ],\n  }\n";
    let outcome = fix(source);

    let rescan = fix(&outcome.text);
    assert!(rescan.corrections.is_empty());
}
