//! Main binary entry point for the `endent` bracket-alignment tool.
//!
//! This binary simply delegates to the shared `entry_point::run_with_args()`
//! function to keep the CLI behavior identical for tests and the binary.

use anyhow::Result;

fn main() -> Result<()> {
    let code = endent::entry_point::run_with_args(std::env::args().skip(1).collect())?;
    std::process::exit(code);
}
