//! Rich CLI output formatting.

use crate::fix::Correction;
use crate::rules::Finding;
use crate::utils::normalize_display_path;
use colored::Colorize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Write;
use std::path::Path;
use std::time::Duration;

/// Create and return a spinner shown while files are being scanned.
///
/// In test mode, returns a hidden progress bar to avoid polluting test
/// output.
#[must_use]
pub fn create_spinner() -> ProgressBar {
    if cfg!(test) {
        return ProgressBar::hidden();
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message("endent scanning your code…");
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Print the violation table.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_findings(writer: &mut impl Write, findings: &[Finding]) -> std::io::Result<()> {
    if findings.is_empty() {
        return Ok(());
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("File").add_attribute(Attribute::Bold),
            Cell::new("Location").add_attribute(Attribute::Bold),
            Cell::new("Rule").add_attribute(Attribute::Bold),
            Cell::new("Message").add_attribute(Attribute::Bold),
        ]);

    for finding in findings {
        table.add_row(vec![
            Cell::new(normalize_display_path(&finding.file)),
            Cell::new(format!("{}:{}", finding.line, finding.col)),
            Cell::new(&finding.rule_id).fg(Color::Yellow),
            Cell::new(&finding.message),
        ]);
    }

    writeln!(writer, "{table}")?;
    Ok(())
}

/// Print the check-mode summary line.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_check_summary(
    writer: &mut impl Write,
    files_scanned: usize,
    findings: usize,
) -> std::io::Result<()> {
    if findings == 0 {
        writeln!(
            writer,
            "{} {} files scanned, no misaligned closing brackets",
            "[OK]".green().bold(),
            files_scanned
        )?;
    } else {
        writeln!(
            writer,
            "{} {} misaligned closing {} in {} scanned files",
            "[FAIL]".red().bold(),
            findings,
            if findings == 1 { "bracket" } else { "brackets" },
            files_scanned
        )?;
    }
    Ok(())
}

/// Print the corrections applied to one file.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_file_corrections(
    writer: &mut impl Write,
    path: &Path,
    corrections: &[Correction],
    dry_run: bool,
) -> std::io::Result<()> {
    let verb = if dry_run { "would fix" } else { "fixed" };
    let lines: Vec<String> = corrections.iter().map(|c| c.line.to_string()).collect();
    writeln!(
        writer,
        "{} {} {} {} (line {})",
        verb.cyan().bold(),
        normalize_display_path(path),
        corrections.len(),
        if corrections.len() == 1 {
            "bracket"
        } else {
            "brackets"
        },
        lines.join(", ")
    )?;
    Ok(())
}

/// Print the fix-mode summary line.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_fix_summary(
    writer: &mut impl Write,
    files_changed: usize,
    corrections: usize,
    dry_run: bool,
) -> std::io::Result<()> {
    let verb = if dry_run { "would correct" } else { "corrected" };
    if corrections == 0 {
        writeln!(writer, "{} nothing to correct", "[OK]".green().bold())?;
    } else {
        writeln!(
            writer,
            "{} {verb} {corrections} {} across {files_changed} {}",
            "[FIX]".cyan().bold(),
            if corrections == 1 {
                "bracket"
            } else {
                "brackets"
            },
            if files_changed == 1 { "file" } else { "files" },
        )?;
    }
    Ok(())
}
