//! Shared entry point for the binary and for tests.

use crate::cli::Cli;
use crate::commands::{CheckOptions, FixOptions, ScanSettings};
use crate::config::Config;
use crate::constants::DEFAULT_MAX_PASSES;
use crate::rules::end_indentation::METADATA;
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

/// Runs the tool with the given arguments.
///
/// # Errors
///
/// Returns an error if argument parsing fails, or if the command execution
/// fails.
pub fn run_with_args(args: Vec<String>) -> Result<i32> {
    run_with_args_to(args, &mut std::io::stdout())
}

/// Run endent with the given arguments, writing output to the specified
/// writer.
///
/// This is the testable version of `run_with_args` that allows output
/// capture.
///
/// # Errors
///
/// Returns an error if argument parsing fails, or if the command execution
/// fails.
pub fn run_with_args_to<W: std::io::Write>(args: Vec<String>, writer: &mut W) -> Result<i32> {
    let mut program_args = vec!["endent".to_owned()];
    program_args.extend(args);
    let cli = match Cli::try_parse_from(program_args) {
        Ok(c) => c,
        Err(e) => {
            match e.kind() {
                clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                    // Let clap print help/version as intended, but captured
                    // by redirect
                    write!(writer, "{e}")?;
                    writer.flush()?;
                    return Ok(0);
                }
                _ => {
                    eprint!("{e}");
                    return Ok(2);
                }
            }
        }
    };

    let paths = if cli.paths.is_empty() {
        vec![PathBuf::from(".")]
    } else {
        for path in &cli.paths {
            if !path.exists() {
                eprintln!(
                    "Error: The file or directory '{}' does not exist.",
                    path.display()
                );
                return Ok(2);
            }
        }
        cli.paths.clone()
    };

    // Load config from the first path or current directory
    let config_path = paths
        .first()
        .map_or(std::path::Path::new("."), PathBuf::as_path);
    let config = Config::load_from_path(config_path);

    let mut exclude_folders = config.endent.exclude_folders.clone().unwrap_or_default();
    exclude_folders.extend(cli.exclude_folders.clone());

    let mut include_folders = config.endent.include_folders.clone().unwrap_or_default();
    include_folders.extend(cli.include_folders.clone());

    let include_tests = cli.include_tests || config.endent.include_tests.unwrap_or(false);
    let rule_enabled = !config.endent.is_rule_ignored(METADATA.id);

    if cli.output.verbose && !cli.output.json {
        eprintln!("[VERBOSE] endent v{}", env!("CARGO_PKG_VERSION"));
        eprintln!("[VERBOSE] Using {} threads", rayon::current_num_threads());
        eprintln!("[VERBOSE] Configuration:");
        if let Some(ref file) = config.config_file_path {
            eprintln!("   Config file: {}", file.display());
        }
        eprintln!("   Rule {} enabled: {rule_enabled}", METADATA.id);
        eprintln!("   Include tests: {include_tests}");
        eprintln!("   Paths: {paths:?}");
        if !exclude_folders.is_empty() {
            eprintln!("   Exclude folders: {exclude_folders:?}");
        }
        eprintln!();
    }

    let settings = ScanSettings {
        exclude: exclude_folders,
        include: include_folders,
        include_tests,
        rule_enabled,
        verbose: cli.output.verbose,
    };

    let start_time = std::time::Instant::now();
    let code = if cli.fix {
        let max_passes = cli
            .max_passes
            .or(config.endent.max_passes)
            .unwrap_or(DEFAULT_MAX_PASSES);
        crate::commands::run_fix(
            &paths,
            &settings,
            &FixOptions {
                json: cli.output.json,
                quiet: cli.output.quiet,
                dry_run: cli.dry_run,
                max_passes,
            },
            writer,
        )?
    } else {
        crate::commands::run_check(
            &paths,
            &settings,
            &CheckOptions {
                json: cli.output.json,
                quiet: cli.output.quiet,
            },
            writer,
        )?
    };

    if !cli.output.json && !cli.output.quiet {
        let elapsed = start_time.elapsed();
        writeln!(writer, "[TIME] Completed in {:.2}s", elapsed.as_secs_f64())?;
    }

    Ok(code)
}
