use clap::{Args, Parser};
use std::path::PathBuf;

/// Help text for configuration file options, shown at the bottom of --help.
const CONFIG_HELP: &str = "\
CONFIGURATION FILE (.endent.toml):
  Create this file in your project root to set defaults.
  The same keys are honored under [tool.endent] in pyproject.toml.

  [endent]
  include_tests = false      # Include test files in scanning
  max_passes = 10            # Cap on correction passes per file
  ignore = [\"END001\"]        # Disable rules by code

  # Path filters
  exclude_folders = [\"build\", \"dist\", \".venv\"]
  include_folders = [\"src\"]  # Force-include these

SUPPRESSION:
  Add `# noqa: END001` or `# pragma: no endent` to the line that opens
  or closes a literal to silence it.
";

/// Options for output formatting and verbosity.
#[derive(Args, Debug, Default, Clone)]
pub struct OutputOptions {
    /// Output raw JSON.
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output for debugging (shows files being scanned).
    #[arg(short, long)]
    pub verbose: bool,

    /// Quiet mode: show only the summary line (no detailed tables).
    #[arg(long)]
    pub quiet: bool,
}

/// Command line interface configuration using `clap`.
/// This struct defines the arguments and flags accepted by the program.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "endent - Aligns the closing bracket of multi-line list/dict literals with their opening line",
    long_about = None,
    after_help = CONFIG_HELP
)]
pub struct Cli {
    /// Paths to scan (files or directories).
    /// Can be a single directory, multiple files, or a mix of both.
    /// When no paths are provided, defaults to the current directory.
    pub paths: Vec<PathBuf>,

    /// Rewrite offending files instead of only reporting them.
    #[arg(short, long)]
    pub fix: bool,

    /// With --fix: report what would change without writing anything.
    #[arg(long, requires = "fix")]
    pub dry_run: bool,

    /// Cap on scan→plan→apply passes per file during correction.
    #[arg(long)]
    pub max_passes: Option<usize>,

    /// Folders to exclude from scanning.
    #[arg(long = "exclude", alias = "exclude-folder")]
    pub exclude_folders: Vec<String>,

    /// Folders to force-include (overrides excludes).
    #[arg(long = "include", alias = "include-folder")]
    pub include_folders: Vec<String>,

    /// Include test files in scanning.
    #[arg(long)]
    pub include_tests: bool,

    /// Output options (json/verbose/quiet).
    #[command(flatten)]
    pub output: OutputOptions,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_invocation() {
        let cli = Cli::try_parse_from(["endent"]).unwrap();
        assert!(cli.paths.is_empty());
        assert!(!cli.fix);
        assert!(!cli.output.json);
    }

    #[test]
    fn test_fix_with_paths() {
        let cli = Cli::try_parse_from(["endent", "--fix", "src", "tools"]).unwrap();
        assert!(cli.fix);
        assert_eq!(cli.paths.len(), 2);
    }

    #[test]
    fn test_dry_run_requires_fix() {
        assert!(Cli::try_parse_from(["endent", "--dry-run"]).is_err());
        assert!(Cli::try_parse_from(["endent", "--fix", "--dry-run"]).is_ok());
    }

    #[test]
    fn test_exclude_alias() {
        let cli = Cli::try_parse_from(["endent", "--exclude-folder", "build"]).unwrap();
        assert_eq!(cli.exclude_folders, vec!["build".to_owned()]);
    }
}
