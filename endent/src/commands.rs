//! Execution logic behind the CLI: check mode and fix mode.

use crate::cst::CstParser;
use crate::fix::{Correction, FixEngine};
use crate::output;
use crate::rules::end_indentation::{EndIndentation, METADATA};
use crate::rules::{create_finding, Finding};
use crate::text::SourceBuffer;
use crate::utils::{collect_python_files, get_ignored_lines, is_test_path, normalize_display_path};
use anyhow::Result;
use rayon::prelude::*;
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Settings controlling which files are scanned.
#[derive(Debug, Default, Clone)]
pub struct ScanSettings {
    /// Folders to exclude.
    pub exclude: Vec<String>,
    /// Folders to force-include.
    pub include: Vec<String>,
    /// Whether test files are scanned.
    pub include_tests: bool,
    /// Whether the rule is enabled at all (config `ignore` can disable it).
    pub rule_enabled: bool,
    /// Whether to print walk errors and progress details.
    pub verbose: bool,
}

/// Options for check mode.
#[derive(Debug, Default, Clone)]
pub struct CheckOptions {
    /// Output raw JSON.
    pub json: bool,
    /// Show only the summary line.
    pub quiet: bool,
}

/// Options for fix mode.
#[derive(Debug, Clone)]
pub struct FixOptions {
    /// Output raw JSON.
    pub json: bool,
    /// Show only the summary line.
    pub quiet: bool,
    /// Report without writing.
    pub dry_run: bool,
    /// Cap on correction passes per file.
    pub max_passes: usize,
}

/// Expand CLI paths into the list of Python files to process.
fn gather_files(paths: &[PathBuf], settings: &ScanSettings) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_file() {
            if path.extension().is_some_and(|ext| ext == "py") {
                files.push(path.clone());
            }
        } else {
            files.extend(collect_python_files(
                path,
                &settings.exclude,
                &settings.include,
                settings.verbose,
            ));
        }
    }
    if !settings.include_tests {
        files.retain(|f| !is_test_path(&f.to_string_lossy()));
    }
    files
}

/// Scan one file and return its reportable findings.
fn check_file(path: &Path) -> Result<Vec<Finding>> {
    let source = fs::read_to_string(path)?;
    let mut parser = CstParser::new()?;
    let tree = parser.parse(&source)?;
    let buffer = SourceBuffer::new(source.as_str());
    let ignored = get_ignored_lines(&source);

    Ok(EndIndentation::scan(&buffer, &tree.root)
        .iter()
        .filter(|v| !crate::fix::engine::is_suppressed(v, &buffer, &ignored))
        .map(|v| create_finding(v, METADATA, &buffer, path))
        .collect())
}

/// Executes check mode over the given paths.
///
/// Returns the process exit code: 1 when violations were found, 0 when
/// everything is aligned. Unreadable or unparseable files are reported to
/// stderr and skipped.
pub fn run_check<W: Write>(
    paths: &[PathBuf],
    settings: &ScanSettings,
    options: &CheckOptions,
    writer: &mut W,
) -> Result<i32> {
    let files = gather_files(paths, settings);
    if settings.verbose {
        eprintln!("[VERBOSE] Scanning {} files", files.len());
    }

    if !settings.rule_enabled {
        if options.json {
            let empty = serde_json::json!({
                "files_scanned": files.len(),
                "violations": [],
            });
            writeln!(writer, "{}", serde_json::to_string_pretty(&empty)?)?;
        } else {
            output::print_check_summary(writer, files.len(), 0)?;
        }
        return Ok(0);
    }

    let spinner = (!options.json).then(output::create_spinner);
    let results: Vec<(PathBuf, Result<Vec<Finding>>)> = files
        .par_iter()
        .map(|path| (path.clone(), check_file(path)))
        .collect();
    if let Some(s) = spinner {
        s.finish_and_clear();
    }

    let mut findings = Vec::new();
    for (path, result) in results {
        match result {
            Ok(file_findings) => findings.extend(file_findings),
            Err(e) => eprintln!("Skipping {}: {e}", normalize_display_path(&path)),
        }
    }

    if options.json {
        let report = serde_json::json!({
            "files_scanned": files.len(),
            "violations": &findings,
        });
        writeln!(writer, "{}", serde_json::to_string_pretty(&report)?)?;
    } else {
        if !options.quiet {
            output::print_findings(writer, &findings)?;
        }
        output::print_check_summary(writer, files.len(), findings.len())?;
    }

    Ok(i32::from(!findings.is_empty()))
}

#[derive(Serialize)]
struct FileCorrections {
    file: PathBuf,
    corrections: Vec<Correction>,
}

/// Executes fix mode over the given paths.
///
/// Files are rewritten in place (unless `dry_run`), whole-buffer at a
/// time, only after their full correction run succeeded. Returns 1 when
/// any file failed to fix, 0 otherwise.
pub fn run_fix<W: Write>(
    paths: &[PathBuf],
    settings: &ScanSettings,
    options: &FixOptions,
    writer: &mut W,
) -> Result<i32> {
    let files = gather_files(paths, settings);
    if settings.verbose {
        eprintln!(
            "[VERBOSE] Fixing {} files ({})",
            files.len(),
            if options.dry_run {
                "dry-run"
            } else {
                "in place"
            }
        );
    }

    if !settings.rule_enabled {
        if options.json {
            let empty = serde_json::json!({
                "files_scanned": files.len(),
                "files_changed": 0,
                "corrections": [],
            });
            writeln!(writer, "{}", serde_json::to_string_pretty(&empty)?)?;
        } else {
            output::print_fix_summary(writer, 0, 0, options.dry_run)?;
        }
        return Ok(0);
    }

    let engine = FixEngine::with_max_passes(options.max_passes);
    let spinner = (!options.json).then(output::create_spinner);
    let results: Vec<(PathBuf, Result<Vec<Correction>>)> = files
        .par_iter()
        .map(|path| {
            let outcome = fix_file(path, &engine, options.dry_run);
            (path.clone(), outcome)
        })
        .collect();
    if let Some(s) = spinner {
        s.finish_and_clear();
    }

    let mut changed = Vec::new();
    let mut errors = 0usize;
    for (path, result) in results {
        match result {
            Ok(corrections) if corrections.is_empty() => {}
            Ok(corrections) => changed.push(FileCorrections {
                file: path,
                corrections,
            }),
            Err(e) => {
                errors += 1;
                eprintln!("Failed to fix {}: {e}", normalize_display_path(&path));
            }
        }
    }

    let total: usize = changed.iter().map(|fc| fc.corrections.len()).sum();
    if options.json {
        let report = serde_json::json!({
            "files_scanned": files.len(),
            "files_changed": changed.len(),
            "corrections": changed,
        });
        writeln!(writer, "{}", serde_json::to_string_pretty(&report)?)?;
    } else {
        if !options.quiet {
            for fc in &changed {
                output::print_file_corrections(writer, &fc.file, &fc.corrections, options.dry_run)?;
            }
        }
        output::print_fix_summary(writer, changed.len(), total, options.dry_run)?;
    }

    Ok(i32::from(errors > 0))
}

/// Correct one file, writing it back only when something changed.
fn fix_file(path: &Path, engine: &FixEngine, dry_run: bool) -> Result<Vec<Correction>> {
    let source = fs::read_to_string(path)?;
    let outcome = engine.fix(&source)?;
    if outcome.changed() && !dry_run {
        fs::write(path, &outcome.text)?;
    }
    Ok(outcome.corrections)
}
